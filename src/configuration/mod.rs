pub mod constants;
pub(crate) mod deserialize;
pub mod settings;

pub use self::settings::{EnvironmentEntry, Settings};
