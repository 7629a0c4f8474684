//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `CHROME_EXECUTABLE` - Chromium binary (default: auto-detected)
//! - `NAVIGATION_TIMEOUT_SECS` - Per-URL navigation bound (default: 30, max: 600)
//! - `PAGE_FORMAT` - Paper size: `A4` or `Letter` (default: `A4`)
//! - `PRINT_BACKGROUND` - Print CSS backgrounds (default: `true`)
//! - `MAX_BATCH_URLS` - URLs accepted per batch request (default: 100, max: 10000)
//! - `BROWSER_NO_SANDBOX` - Launch Chromium with `--no-sandbox` (default: `true`)

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::infrastructure::browser::{BrowserOptions, PaperFormat};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Explicit Chromium binary; `None` means auto-detect.
    pub chrome_executable: Option<PathBuf>,
    pub navigation_timeout_secs: u64,
    pub page_format: PaperFormat,
    pub print_background: bool,
    pub max_batch_urls: usize,
    pub no_sandbox: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `PAGE_FORMAT` is not a known paper size.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let chrome_executable = env::var("CHROME_EXECUTABLE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let navigation_timeout_secs = env::var("NAVIGATION_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let page_format = match env::var("PAGE_FORMAT") {
            Ok(v) => v
                .parse::<PaperFormat>()
                .map_err(anyhow::Error::msg)
                .context("PAGE_FORMAT must be 'A4' or 'Letter'")?,
            Err(_) => PaperFormat::default(),
        };

        let print_background = parse_bool("PRINT_BACKGROUND", true);

        let max_batch_urls = env::var("MAX_BATCH_URLS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100);

        let no_sandbox = parse_bool("BROWSER_NO_SANDBOX", true);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            chrome_executable,
            navigation_timeout_secs,
            page_format,
            print_background,
            max_batch_urls,
            no_sandbox,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `navigation_timeout_secs` is outside `1..=600`
    /// - `max_batch_urls` is outside `1..=10000`
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.navigation_timeout_secs == 0 || self.navigation_timeout_secs > 600 {
            anyhow::bail!(
                "NAVIGATION_TIMEOUT_SECS must be between 1 and 600, got {}",
                self.navigation_timeout_secs
            );
        }

        if self.max_batch_urls == 0 || self.max_batch_urls > 10_000 {
            anyhow::bail!(
                "MAX_BATCH_URLS must be between 1 and 10000, got {}",
                self.max_batch_urls
            );
        }

        Ok(())
    }

    /// Browser settings derived from this configuration.
    pub fn browser_options(&self) -> BrowserOptions {
        BrowserOptions {
            executable: self.chrome_executable.clone(),
            navigation_timeout: Duration::from_secs(self.navigation_timeout_secs),
            paper_format: self.page_format,
            print_background: self.print_background,
            no_sandbox: self.no_sandbox,
        }
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        match &self.chrome_executable {
            Some(path) => tracing::info!("  Browser: {}", path.display()),
            None => tracing::info!("  Browser: auto-detect"),
        }
        tracing::info!("  Navigation timeout: {}s", self.navigation_timeout_secs);
        tracing::info!("  Page format: {}", self.page_format);
        tracing::info!("  Max batch URLs: {}", self.max_batch_urls);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads a boolean flag; accepts `true`/`1` and `false`/`0`, case-insensitive.
fn parse_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) if v.eq_ignore_ascii_case("true") || v == "1" => true,
        Ok(v) if v.eq_ignore_ascii_case("false") || v == "0" => false,
        _ => default,
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn base_config() -> Config {
        Config {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            chrome_executable: None,
            navigation_timeout_secs: 30,
            page_format: PaperFormat::A4,
            print_background: true,
            max_batch_urls: 100,
            no_sandbox: true,
        }
    }

    #[test]
    fn test_config_validation() {
        let mut config = base_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "0.0.0.0:3000".to_string();

        config.navigation_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.navigation_timeout_secs = 601;
        assert!(config.validate().is_err());

        config.navigation_timeout_secs = 30;

        config.max_batch_urls = 0;
        assert!(config.validate().is_err());

        config.max_batch_urls = 10_001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_browser_options_mapping() {
        let mut config = base_config();
        config.navigation_timeout_secs = 45;
        config.page_format = PaperFormat::Letter;
        config.chrome_executable = Some(PathBuf::from("/usr/bin/chromium"));

        let options = config.browser_options();
        assert_eq!(options.navigation_timeout, Duration::from_secs(45));
        assert_eq!(options.paper_format, PaperFormat::Letter);
        assert_eq!(options.executable, Some(PathBuf::from("/usr/bin/chromium")));
    }

    #[test]
    #[serial]
    fn test_defaults_from_env() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::remove_var("LISTEN");
            env::remove_var("NAVIGATION_TIMEOUT_SECS");
            env::remove_var("PAGE_FORMAT");
            env::remove_var("MAX_BATCH_URLS");
            env::remove_var("CHROME_EXECUTABLE");
            env::remove_var("PRINT_BACKGROUND");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.navigation_timeout_secs, 30);
        assert_eq!(config.page_format, PaperFormat::A4);
        assert_eq!(config.max_batch_urls, 100);
        assert!(config.chrome_executable.is_none());
        assert!(config.print_background);
    }

    #[test]
    #[serial]
    fn test_overrides_from_env() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("NAVIGATION_TIMEOUT_SECS", "12");
            env::set_var("PAGE_FORMAT", "letter");
            env::set_var("PRINT_BACKGROUND", "0");
            env::set_var("CHROME_EXECUTABLE", "/opt/chromium/chrome");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.navigation_timeout_secs, 12);
        assert_eq!(config.page_format, PaperFormat::Letter);
        assert!(!config.print_background);
        assert_eq!(
            config.chrome_executable,
            Some(PathBuf::from("/opt/chromium/chrome"))
        );

        // Cleanup
        unsafe {
            env::remove_var("NAVIGATION_TIMEOUT_SECS");
            env::remove_var("PAGE_FORMAT");
            env::remove_var("PRINT_BACKGROUND");
            env::remove_var("CHROME_EXECUTABLE");
        }
    }

    #[test]
    #[serial]
    fn test_unknown_page_format_is_rejected() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("PAGE_FORMAT", "tabloid");
        }

        assert!(Config::from_env().is_err());

        unsafe {
            env::remove_var("PAGE_FORMAT");
        }
    }

    #[test]
    #[serial]
    fn test_blank_executable_means_auto_detect() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("CHROME_EXECUTABLE", "  ");
        }

        let config = Config::from_env().unwrap();
        assert!(config.chrome_executable.is_none());

        unsafe {
            env::remove_var("CHROME_EXECUTABLE");
        }
    }
}
