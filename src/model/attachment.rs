use derivative::*;
use mime::Mime;
use serde_derive::Serialize;

#[derive(Serialize, Clone, Derivative)]
#[derivative(Debug)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub uuid: uuid::Uuid,
    pub title: String,
    #[serde(with = "crate::serialize::mime_type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<Mime>,
    #[derivative(Debug = "ignore")]
    #[serde(with = "serde_bytes")]
    pub content: Vec<u8>,
}

/// Payload of an attachment before it is recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Raw bytes, typed with the configured default media type.
    Bytes(Vec<u8>),
    Text(String),
    Json(serde_json::Value),
}

impl Content {
    pub fn media_type(&self, bytes_default: &Mime) -> Mime {
        match self {
            Content::Bytes(_) => bytes_default.clone(),
            Content::Text(_) => mime::TEXT_PLAIN,
            Content::Json(_) => mime::APPLICATION_JSON,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Content::Bytes(bytes) => bytes,
            Content::Text(text) => text.into_bytes(),
            Content::Json(value) => value.to_string().into_bytes(),
        }
    }
}

impl From<Vec<u8>> for Content {
    fn from(bytes: Vec<u8>) -> Self {
        Content::Bytes(bytes)
    }
}

impl From<&[u8]> for Content {
    fn from(bytes: &[u8]) -> Self {
        Content::Bytes(bytes.to_vec())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_owned())
    }
}

impl From<serde_json::Value> for Content {
    fn from(value: serde_json::Value) -> Self {
        Content::Json(value)
    }
}

#[cfg(test)]
mod test {
    use super::Content;
    use serde_json::json;

    #[test]
    fn test_media_type_inferred_from_content() {
        let default = mime::TEXT_PLAIN;
        assert_eq!(Content::from(vec![1u8, 2]).media_type(&default), mime::TEXT_PLAIN);
        assert_eq!(
            Content::from(vec![1u8, 2]).media_type(&mime::APPLICATION_OCTET_STREAM),
            mime::APPLICATION_OCTET_STREAM
        );
        assert_eq!(Content::from("note").media_type(&default), mime::TEXT_PLAIN);
        assert_eq!(
            Content::from(json!({"ok": true})).media_type(&default),
            mime::APPLICATION_JSON
        );
    }

    #[test]
    fn test_json_content_is_stored_as_text() {
        let bytes = Content::from(json!({"ok": true})).into_bytes();
        assert_eq!(bytes, br#"{"ok":true}"#.to_vec());
    }
}
