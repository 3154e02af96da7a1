pub mod limits {
    /// Depth limit applied by the CLI; library calls are unbounded unless asked.
    pub const CLI_MAX_MERGE_DEPTH: usize = 256;
}

pub mod config {
    pub const ENV_PREFIX: &str = "KIKU";
    /// Set to a truthy value to ignore `*.local.*` override files.
    pub const NO_LOCAL_ENV: &str = "KIKU_NO_LOCAL";
    pub const ENV_SEPARATOR: &str = "__";
    pub const LOCAL_INFIX: &str = "local";
    pub const SUPPORTED_EXTENSIONS: &[&str] = &["json", "toml"];
}

pub mod logging {
    pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}
