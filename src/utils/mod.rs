//! Utility functions shared by the service and the CLI.
//!
//! - [`file_name`] - Download file names derived from page URLs
//! - [`url_list`] - Parsing of newline-separated URL lists

pub mod file_name;
pub mod url_list;
