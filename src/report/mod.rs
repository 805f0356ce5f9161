//! Report rendering.
//!
//! Plain-text, Markdown, and JSON renderings of a [`Report`].
//!
//! [`Report`]: crate::models::Report

pub mod generator;

pub use generator::{generate_json_report, generate_markdown_report, generate_text_output};
