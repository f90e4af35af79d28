use serde_derive::Serialize;
use std::error::Error as StdError;

#[derive(Debug, Serialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusDetails {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

impl From<String> for StatusDetails {
    fn from(message: String) -> Self {
        Self {
            message,
            trace: None,
        }
    }
}

impl StatusDetails {
    /// Captures the error message and, when the error has causes, the chain
    /// of sources one per line.
    pub fn from_error(error: &dyn StdError) -> Self {
        let mut causes = vec![];
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        Self {
            message: error.to_string(),
            trace: if causes.is_empty() {
                None
            } else {
                Some(causes.join("\n"))
            },
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Unset,
    Passed,
    Pending,
    Broken,
    Failed,
}

impl Default for Status {
    fn default() -> Self {
        Status::Unset
    }
}

impl Status {
    fn severity(self) -> u8 {
        match self {
            Status::Unset => 0,
            Status::Passed | Status::Pending => 1,
            Status::Broken => 2,
            Status::Failed => 3,
        }
    }

    /// Status a case ends up with when `next` is reported after `self`.
    /// A later report never lowers the outcome, so `failed` is final.
    pub fn merge(self, next: Status) -> Status {
        if next.severity() >= self.severity() {
            next
        } else {
            self
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Unset => "unset",
            Status::Passed => "passed",
            Status::Pending => "pending",
            Status::Broken => "broken",
            Status::Failed => "failed",
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Wrapped(std::io::Error);

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "request failed")
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_failed_is_never_downgraded() {
        assert_eq!(Status::Failed.merge(Status::Passed), Status::Failed);
        assert_eq!(Status::Failed.merge(Status::Broken), Status::Failed);
        assert_eq!(Status::Passed.merge(Status::Failed), Status::Failed);
    }

    #[test]
    fn test_broken_keeps_over_passed() {
        assert_eq!(Status::Broken.merge(Status::Passed), Status::Broken);
        assert_eq!(Status::Broken.merge(Status::Failed), Status::Failed);
        assert_eq!(Status::Passed.merge(Status::Pending), Status::Pending);
        assert_eq!(Status::Unset.merge(Status::Passed), Status::Passed);
    }

    #[test]
    fn test_details_collect_error_sources() {
        let error = Wrapped(std::io::Error::new(std::io::ErrorKind::Other, "reset by peer"));
        let details = StatusDetails::from_error(&error);

        assert_eq!(details.message, "request failed");
        assert_eq!(details.trace, Some("reset by peer".to_owned()));
    }
}
