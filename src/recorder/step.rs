use super::{Recorder, StepId};
use crate::error::Error;
use crate::model::{Status, StatusDetails};
use crate::template::{Arguments, Template};
use futures::future::{FutureExt, LocalBoxFuture};
use futures::ready;
use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// An opened step that has to be closed exactly once.
pub(crate) struct StepScope {
    recorder: Recorder,
    id: StepId,
    /// Explicit steps the body left open, restored on the next `enter`.
    parked: Vec<StepId>,
    closed: bool,
}

impl StepScope {
    pub(crate) fn new(recorder: Recorder, id: StepId) -> Self {
        Self {
            recorder,
            id,
            parked: Vec::new(),
            closed: false,
        }
    }

    /// Makes this step the innermost open span until the guard drops.
    fn enter(&mut self) -> ActiveStep<'_> {
        {
            let mut state = self.recorder.state.borrow_mut();
            state.active.push(self.id.clone());
            state.active.append(&mut self.parked);
        }
        ActiveStep { scope: self }
    }

    fn close(mut self, status: Status, details: Option<StatusDetails>) -> Result<(), Error> {
        self.closed = true;
        let mut state = self.recorder.state.borrow_mut();
        state.abandon(&self.parked);
        let closed = state.close_step(&self.id, status, details, None);
        closed
    }

    /// Closes the step from the outcome of its body. A failed close is only
    /// reported when the body itself succeeded.
    fn settle<T, E>(self, result: Result<T, E>) -> Result<T, E>
    where
        E: Display + From<Error>,
    {
        match result {
            Ok(value) => {
                self.close(Status::Passed, None)?;
                Ok(value)
            }
            Err(err) => {
                let details = StatusDetails::from(err.to_string());
                if let Err(close_err) = self.close(Status::Broken, Some(details)) {
                    error!("Failed to close broken step: {}", close_err);
                }
                Err(err)
            }
        }
    }
}

impl Drop for StepScope {
    fn drop(&mut self) {
        if self.closed || !std::thread::panicking() {
            return;
        }
        if let Ok(mut state) = self.recorder.state.try_borrow_mut() {
            state.abandon(&self.parked);
            let details = StatusDetails::from("step panicked".to_owned());
            let _ = state.close_step(&self.id, Status::Broken, Some(details), None);
        }
    }
}

/// Keeps a step on the active stack while its body runs. On drop the step
/// and anything the body left above it come off the stack together.
struct ActiveStep<'a> {
    scope: &'a mut StepScope,
}

impl Drop for ActiveStep<'_> {
    fn drop(&mut self) {
        let left_open = match self.scope.recorder.state.try_borrow_mut() {
            Ok(mut state) => state.leave(&self.scope.id),
            Err(_) => return,
        };
        self.scope.parked = left_open;
    }
}

/// Wrapper recording every call of a synchronous function as a step.
#[derive(Clone)]
pub struct StepFn<F> {
    recorder: Recorder,
    template: Template,
    body: F,
}

impl<F> StepFn<F> {
    /// Runs the body as a new step named from `args`. The body's error is
    /// returned unchanged after the step is marked broken.
    pub fn call<A, T, E>(&self, args: A) -> Result<T, E>
    where
        A: Arguments,
        F: Fn(A) -> Result<T, E>,
        E: Display + From<Error>,
    {
        let name = self.template.format(&args.to_strings());
        let mut scope = self.recorder.open_scope(name)?;
        let result = {
            let _active = scope.enter();
            (self.body)(args)
        };
        scope.settle(result)
    }
}

/// Wrapper recording every call of an asynchronous function as a step that
/// stays open until the returned future settles.
#[derive(Clone)]
pub struct AsyncStepFn<F> {
    recorder: Recorder,
    template: Template,
    body: F,
}

impl<F> AsyncStepFn<F> {
    /// Opens the step right away, so its place among its siblings follows
    /// call order, and returns the future that closes it.
    pub fn call<'a, A, Fut, T, E>(&self, args: A) -> StepFuture<'a, T, E>
    where
        A: Arguments,
        F: Fn(A) -> Fut,
        Fut: Future<Output = Result<T, E>> + 'a,
        T: 'a,
        E: Display + From<Error> + 'a,
    {
        let name = self.template.format(&args.to_strings());
        let mut scope = match self.recorder.open_scope(name) {
            Ok(scope) => scope,
            Err(err) => {
                return StepFuture {
                    scope: None,
                    inner: futures::future::ready(Err(E::from(err))).boxed_local(),
                }
            }
        };
        let inner = {
            let _active = scope.enter();
            (self.body)(args).boxed_local()
        };
        StepFuture {
            scope: Some(scope),
            inner,
        }
    }
}

/// Future of an asynchronous step. While it is polled the step is the
/// innermost open span.
pub struct StepFuture<'a, T, E> {
    scope: Option<StepScope>,
    inner: LocalBoxFuture<'a, Result<T, E>>,
}

impl<'a, T, E> Future for StepFuture<'a, T, E>
where
    E: Display + From<Error>,
{
    type Output = Result<T, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = &mut *self;
        let result = match &mut this.scope {
            Some(scope) => {
                let _active = scope.enter();
                ready!(this.inner.as_mut().poll(cx))
            }
            None => ready!(this.inner.as_mut().poll(cx)),
        };
        match this.scope.take() {
            Some(scope) => Poll::Ready(scope.settle(result)),
            None => Poll::Ready(result),
        }
    }
}

impl Recorder {
    pub fn create_step<T, F>(&self, template: T, body: F) -> StepFn<F>
    where
        T: Into<Template>,
    {
        StepFn {
            recorder: self.clone(),
            template: template.into(),
            body,
        }
    }

    pub fn create_async_step<T, F>(&self, template: T, body: F) -> AsyncStepFn<F>
    where
        T: Into<Template>,
    {
        AsyncStepFn {
            recorder: self.clone(),
            template: template.into(),
            body,
        }
    }
}
