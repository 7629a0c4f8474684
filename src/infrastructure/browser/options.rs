//! Browser launch and print options.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Fixed paper size used for every exported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaperFormat {
    #[default]
    A4,
    Letter,
}

impl PaperFormat {
    /// Paper `(width, height)` in inches, as the DevTools print API expects.
    pub fn dimensions_inches(self) -> (f64, f64) {
        match self {
            PaperFormat::A4 => (8.27, 11.69),
            PaperFormat::Letter => (8.5, 11.0),
        }
    }
}

impl FromStr for PaperFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a4" => Ok(PaperFormat::A4),
            "letter" => Ok(PaperFormat::Letter),
            other => Err(format!("unknown page format '{other}'")),
        }
    }
}

impl fmt::Display for PaperFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaperFormat::A4 => f.write_str("A4"),
            PaperFormat::Letter => f.write_str("Letter"),
        }
    }
}

/// Settings shared by every session a renderer launches.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Explicit Chromium binary. Auto-detected when `None`.
    pub executable: Option<PathBuf>,
    /// Upper bound for navigation plus network-idle wait, per URL.
    pub navigation_timeout: Duration,
    pub paper_format: PaperFormat,
    pub print_background: bool,
    /// Pass `--no-sandbox` (required when running as root in containers).
    pub no_sandbox: bool,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            executable: None,
            navigation_timeout: Duration::from_secs(30),
            paper_format: PaperFormat::A4,
            print_background: true,
            no_sandbox: true,
        }
    }
}
