//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL of the Exhibit API
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// First page of any listing
pub const DEFAULT_PAGE: u32 = 1;

/// Posts per page when nothing else is configured
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// HTTP client timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Registration rules
pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Directory (under the home dir) holding config and session files
pub const DATA_DIR_NAME: &str = ".exhibit";
pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const SESSION_FILE_NAME: &str = "session.yaml";

/// Log file name, created inside the data directory
pub const DEFAULT_LOG_FILE: &str = "exhibit.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Application name
pub const APP_NAME: &str = "Exhibit";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
