//! Browser UI layer.
//!
//! Serves the single-page conversion form. Uses Askama templates for
//! server-side rendering; client behaviour lives in `static/app.js`.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - UI route configuration

pub mod handlers;
pub mod routes;
