//! # tolige - TOdo LIst GEnerator
//!
//! Renders reusable line sets from a plain text configuration into a
//! checklist, asking for variables and conditions along the way.
//!
//! ## Configuration format
//!
//! - blank lines are ignored, lines starting with `#` are comments
//! - a line starting with a letter opens a new set named after it
//! - any other line is a template line of the current set
//! - `{name}` is a variable, asked once per run
//! - a line starting with `[condition]` is only kept when the condition is
//!   answered with yes, asked once per set
//!
//! ## Usage
//!
//! ```rust
//! use tolige::{Config, LinePrompter, RenderPipeline};
//! use std::io::Cursor;
//! # use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let config: Config = "Morning\n[weekday]\tcommute\n\tcall {name}".parse()?;
//! let answers = Cursor::new("y\nSam\n");
//! let mut pipeline = RenderPipeline::new(LinePrompter::new(answers, Vec::new()));
//!
//! let document = pipeline.render(&config, &[0])?;
//! assert_eq!(document.to_text(), "\tcommute\n\tcall Sam\n\n");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod interactive;
pub mod pipeline;
pub mod render;
pub mod selection;
pub mod settings;
pub mod variables;

pub use config::{Config, Set};
pub use error::{ConfigError, SelectionError};
pub use interactive::{LinePrompter, Prompter, TerminalPrompter};
pub use pipeline::{RenderPipeline, RenderedDocument, RenderedSet, RunOptions};
pub use settings::{Settings, SettingsManager};
pub use variables::{ConditionCache, VariableCache};

/// Result type used throughout the crate
pub type Result<T> = anyhow::Result<T>;

/// Error types used in the crate
pub use anyhow::Error;
