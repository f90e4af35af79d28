use super::Recorder;
use crate::error::Result;
use crate::model::Content;
use crate::template::{Arguments, Template};
use mime::Mime;
use uuid::Uuid;

/// Wrapper recording the value produced by each call as an attachment of
/// the innermost open step, or of the case when no step is open.
#[derive(Clone)]
pub struct AttachmentFn<F> {
    recorder: Recorder,
    template: Template,
    media_type: Option<Mime>,
    body: F,
}

impl<F> AttachmentFn<F> {
    /// Forces the media type of every attachment this wrapper records.
    pub fn with_type(mut self, media_type: Mime) -> Self {
        self.media_type = Some(media_type);
        self
    }

    pub fn call<A, C>(&self, args: A) -> Result<Uuid>
    where
        A: Arguments,
        F: Fn(A) -> C,
        C: Into<Content>,
    {
        let title = self.template.format(&args.to_strings());
        let content = (self.body)(args).into();
        self.recorder
            .add_content(title, content, self.media_type.clone())
    }
}

impl Recorder {
    pub fn create_attachment_fn<T, F>(&self, template: T, body: F) -> AttachmentFn<F>
    where
        T: Into<Template>,
    {
        AttachmentFn {
            recorder: self.clone(),
            template: template.into(),
            media_type: None,
            body,
        }
    }
}
