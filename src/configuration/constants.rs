pub mod cargo_env {
    pub const CARGO_PKG_NAME: &'static str = env!("CARGO_PKG_NAME");
}

pub mod common {
    /// Prefix of environment variables overriding settings, e.g. `ALLURE_LOG_LEVEL`.
    pub const ENV_PREFIX: &'static str = "ALLURE";
    pub const DEFAULT_ATTACHMENT_TYPE: &'static str = "text/plain";
}
