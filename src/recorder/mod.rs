pub mod attachment;
pub mod runtime;
pub mod step;


use crate::configuration::Settings;
use crate::error::{Error, Result};
use crate::model::{
    Attachment, Case, Content, Label, Parameter, ParameterKind, Status, StatusDetails, Step, Suite,
};
use crate::time::{Clock, SystemClock};
use derivative::*;
use mime::Mime;
use std::cell::RefCell;
use std::error::Error as StdError;
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

pub use self::attachment::AttachmentFn;
pub use self::step::{AsyncStepFn, StepFn, StepFuture};

/// Location of a step: its suite and case, then child indexes from the case root.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StepId {
    suite: Uuid,
    case: Uuid,
    path: Vec<usize>,
}

impl StepId {
    fn child(&self, index: usize) -> Self {
        let mut path = self.path.clone();
        path.push(index);
        Self {
            suite: self.suite,
            case: self.case,
            path,
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let path: Vec<String> = self.path.iter().map(|i| i.to_string()).collect();
        write!(f, "{}#{}", self.case, path.join("."))
    }
}

#[derive(Derivative)]
#[derivative(Debug)]
struct State {
    #[derivative(Debug = "ignore")]
    clock: Box<dyn Clock>,
    settings: Settings,
    suites: Vec<Suite>,
    current_suite: Option<Uuid>,
    /// Steps whose body is running, innermost last.
    active: Vec<StepId>,
}

impl State {
    fn suite_mut(&mut self, uuid: Uuid) -> Option<&mut Suite> {
        self.suites.iter_mut().find(|suite| suite.uuid == uuid)
    }

    fn current_suite(&self) -> Result<&Suite> {
        let uuid = self.current_suite.ok_or(Error::NoSuite)?;
        self.suites
            .iter()
            .find(|suite| suite.uuid == uuid)
            .ok_or(Error::NoSuite)
    }

    fn current_suite_mut(&mut self) -> Result<&mut Suite> {
        let uuid = self.current_suite.ok_or(Error::NoSuite)?;
        self.suite_mut(uuid).ok_or(Error::NoSuite)
    }

    fn current_case_mut(&mut self) -> Result<&mut Case> {
        self.current_suite_mut()?
            .current_case_mut()
            .ok_or(Error::NoCase)
    }

    fn step_mut(&mut self, id: &StepId) -> Result<&mut Step> {
        self.suite_mut(id.suite)
            .and_then(|suite| suite.children.iter_mut().rev().find(|c| c.uuid == id.case))
            .and_then(|case| case.step_mut(&id.path))
            .ok_or_else(|| Error::StepLost(id.to_string()))
    }

    fn open_step(&mut self, name: String, start: Option<u64>) -> Result<StepId> {
        let start = start.unwrap_or_else(|| self.clock.now());
        debug!("Step '{}' started at {}", name, start);
        match self.active.last().cloned() {
            Some(parent) => {
                let steps = &mut self.step_mut(&parent)?.steps;
                steps.push(Step::new(name, start));
                Ok(parent.child(steps.len() - 1))
            }
            None => {
                let suite = self.current_suite.ok_or(Error::NoSuite)?;
                let case = self.current_case_mut()?;
                case.steps.push(Step::new(name, start));
                Ok(StepId {
                    suite,
                    case: case.uuid,
                    path: vec![case.steps.len() - 1],
                })
            }
        }
    }

    fn close_step(
        &mut self,
        id: &StepId,
        status: Status,
        details: Option<StatusDetails>,
        stop: Option<u64>,
    ) -> Result<()> {
        let stop = stop.unwrap_or_else(|| self.clock.now());
        let step = self.step_mut(id)?;
        step.status = status;
        step.status_details = details;
        step.stop = Some(stop);
        debug!("Step '{}' ended {} at {}", step.name, status.as_str(), stop);
        Ok(())
    }

    /// Pops `id` and every step opened above it. The steps found above are
    /// returned so the caller can resume or close them.
    fn leave(&mut self, id: &StepId) -> Vec<StepId> {
        match self.active.iter().rposition(|active| active == id) {
            Some(position) => {
                let above = self.active.split_off(position + 1);
                self.active.truncate(position);
                above
            }
            None => Vec::new(),
        }
    }

    /// Closes steps that were started inside a wrapper and never ended.
    fn abandon(&mut self, steps: &[StepId]) {
        for id in steps.iter().rev() {
            let details = StatusDetails::from("step was not ended".to_owned());
            if let Err(err) = self.close_step(id, Status::Broken, Some(details), None) {
                warn!("Failed to close abandoned step: {}", err);
            }
        }
    }

    fn add_attachment(
        &mut self,
        title: String,
        content: Content,
        media_type: Option<Mime>,
    ) -> Result<Uuid> {
        let media_type =
            media_type.unwrap_or_else(|| content.media_type(&self.settings.attachment_media_type));
        let attachment = Attachment {
            uuid: Uuid::new_v4(),
            title,
            r#type: Some(media_type),
            content: content.into_bytes(),
        };
        let uuid = attachment.uuid;
        debug!("Attachment '{}' recorded", attachment.title);
        match self.active.last().cloned() {
            Some(step) => self.step_mut(&step)?.attachments.push(attachment),
            None => self.current_case_mut()?.attachments.push(attachment),
        }
        Ok(uuid)
    }
}

/// Handle to one in-memory run tree. Clones share the same tree; separate
/// recorders are independent.
#[derive(Clone, Debug)]
pub struct Recorder {
    state: Rc<RefCell<State>>,
}

impl Default for Recorder {
    fn default() -> Self {
        Recorder::new()
    }
}

impl Recorder {
    pub fn new() -> Self {
        Self::with_settings(Settings::default(), SystemClock::default())
    }

    pub fn with_clock<C: Clock + 'static>(clock: C) -> Self {
        Self::with_settings(Settings::default(), clock)
    }

    pub fn with_settings<C: Clock + 'static>(settings: Settings, clock: C) -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                clock: Box::new(clock),
                settings,
                suites: Vec::new(),
                current_suite: None,
                active: Vec::new(),
            })),
        }
    }

    /// Starts a suite and makes it current. A suite still running is ended first.
    pub fn start_suite<S: Into<String>>(&self, name: S) -> Result<Uuid> {
        if self.state.borrow().current_suite.is_some() {
            self.end_suite()?;
        }
        let mut state = self.state.borrow_mut();
        let suite = Suite::new(name.into(), state.clock.now());
        let uuid = suite.uuid;
        info!("Suite '{}' started", suite.name);
        state.suites.push(suite);
        state.current_suite = Some(uuid);
        Ok(uuid)
    }

    /// Stamps the stop time of the current suite and returns a copy of it.
    pub fn end_suite(&self) -> Result<Suite> {
        let mut state = self.state.borrow_mut();
        let now = state.clock.now();
        let suite = state.current_suite_mut()?;
        suite.stop = Some(now);
        let finished = suite.clone();
        state.current_suite = None;
        info!(
            "Suite '{}' finished with {} cases",
            finished.name,
            finished.children.len()
        );
        Ok(finished)
    }

    pub fn start_case<S: Into<String>>(&self, name: S) -> Result<Uuid> {
        let mut state = self.state.borrow_mut();
        let now = state.clock.now();
        let labels = state.settings.labels.clone();
        let parameters: Vec<Parameter> = state
            .settings
            .environment
            .iter()
            .map(|entry| Parameter {
                name: entry.name.clone(),
                value: entry.value.clone(),
                kind: ParameterKind::EnvironmentVariable,
            })
            .collect();
        let suite = state.current_suite_mut()?;
        if let Some(running) = suite.current_case() {
            if !running.is_finished() {
                return Err(Error::CaseInProgress(running.name.clone()));
            }
        }
        let mut case = Case::new(name.into(), now);
        case.labels = labels;
        case.parameters = parameters;
        let uuid = case.uuid;
        debug!("Case '{}' started in suite '{}'", case.name, suite.name);
        suite.children.push(case);
        if !state.active.is_empty() {
            warn!("Discarding {} steps left open by the previous case", state.active.len());
            state.active.clear();
        }
        Ok(uuid)
    }

    /// Ends the current case. May be called again: the stop time is replaced
    /// while the status only moves towards a worse outcome.
    pub fn end_case(&self, status: Status, error: Option<&dyn StdError>) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let now = state.clock.now();
        let case = state.current_case_mut()?;
        let merged = case.status.merge(status);
        let applied = merged == status;
        if !applied {
            warn!(
                "Case '{}' keeps status {}, ignoring {}",
                case.name,
                case.status.as_str(),
                status.as_str()
            );
        }
        if let Some(error) = error {
            if applied || case.status_details.is_none() {
                case.status_details = Some(StatusDetails::from_error(error));
            }
        }
        case.status = merged;
        case.stop = Some(now);
        debug!("Case '{}' ended {}", case.name, merged.as_str());
        Ok(())
    }

    /// Records a case that was not executed.
    pub fn pending_case<S: Into<String>>(&self, name: S) -> Result<Uuid> {
        let uuid = self.start_case(name)?;
        self.end_case(Status::Pending, None)?;
        Ok(uuid)
    }

    /// Opens a step under the innermost open step, or the current case.
    pub fn start_step<S: Into<String>>(&self, name: S, start: Option<u64>) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let id = state.open_step(name.into(), start)?;
        state.active.push(id);
        Ok(())
    }

    /// Closes the innermost open step.
    pub fn end_step(&self, status: Status, stop: Option<u64>) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let id = state.active.pop().ok_or(Error::NoStep)?;
        state.close_step(&id, status, None, stop)
    }

    pub fn create_attachment<S, C>(&self, title: S, content: C) -> Result<Uuid>
    where
        S: Into<String>,
        C: Into<Content>,
    {
        self.state
            .borrow_mut()
            .add_attachment(title.into(), content.into(), None)
    }

    /// Records an attachment with an explicit media type.
    pub fn attach_with_type<S, C>(&self, title: S, content: C, media_type: Mime) -> Result<Uuid>
    where
        S: Into<String>,
        C: Into<Content>,
    {
        self.state
            .borrow_mut()
            .add_attachment(title.into(), content.into(), Some(media_type))
    }

    pub fn current_suite(&self) -> Result<Suite> {
        self.state.borrow().current_suite().map(Clone::clone)
    }

    pub fn current_case(&self) -> Result<Case> {
        let state = self.state.borrow();
        let case = state
            .current_suite()?
            .current_case()
            .cloned()
            .ok_or(Error::NoCase);
        case
    }

    /// Every suite recorded so far, in start order.
    pub fn suites(&self) -> Vec<Suite> {
        self.state.borrow().suites.clone()
    }

    /// Removes and returns the suites that have ended.
    pub fn take_finished(&self) -> Vec<Suite> {
        let mut state = self.state.borrow_mut();
        let (finished, running): (Vec<Suite>, Vec<Suite>) = state
            .suites
            .drain(..)
            .partition(|suite| suite.is_finished());
        state.suites = running;
        finished
    }

    pub(crate) fn with_case<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut Case) -> Result<R>,
    {
        let mut state = self.state.borrow_mut();
        f(state.current_case_mut()?)
    }

    pub(crate) fn push_label(&self, label: Label) -> Result<()> {
        self.with_case(|case| {
            trace!("Case '{}' label {}={}", case.name, label.name, label.value);
            case.labels.push(label);
            Ok(())
        })
    }

    pub(crate) fn open_scope(&self, name: String) -> Result<step::StepScope> {
        let id = self.state.borrow_mut().open_step(name, None)?;
        Ok(step::StepScope::new(self.clone(), id))
    }

    pub(crate) fn add_content(
        &self,
        title: String,
        content: Content,
        media_type: Option<Mime>,
    ) -> Result<Uuid> {
        self.state
            .borrow_mut()
            .add_attachment(title, content, media_type)
    }
}
