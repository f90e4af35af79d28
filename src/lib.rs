// #![forbid(unsafe_code)]
// #![deny(missing_docs)]

//! In-memory recording of a test run as a tree of suites, cases, steps and
//! attachments, serializable in the Allure result layout.

#[macro_use]
extern crate log;

pub mod configuration;
pub mod error;
pub mod logging;
pub mod model;
pub mod recorder;
mod serialize;
pub mod template;
pub mod time;

pub use self::configuration::Settings;
pub use self::error::{Error, Result};
pub use self::model::{Case, Content, Status, Step, Suite};
pub use self::recorder::Recorder;
pub use self::time::{Clock, ManualClock, SystemClock};
