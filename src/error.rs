use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No suite is running, call start_suite first")]
    NoSuite,

    #[error("No test case is running, call start_case first")]
    NoCase,

    #[error("No step is open")]
    NoStep,

    #[error("Test case '{0}' has not ended yet")]
    CaseInProgress(String),

    #[error("Description of test case '{0}' is already set")]
    DescriptionAlreadySet(String),

    #[error("Step '{0}' is no longer part of a recorded case")]
    StepLost(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}
