//! Brutal notes document store library
//!
//! This library owns the documents of the brutal notes application: their
//! identity and lifecycle, persistence to local storage, resolution between
//! built-in templates and stored content, name search, and export of the
//! rendered content tree to Markdown.

mod cli;
mod config;
mod document;
mod document_id;
mod errors;
mod export;
mod helper;
mod identifier;
mod markdown;
mod repository;
mod resolver;
mod search;
mod storage;
mod templates;
mod types;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use document::*;
pub use document_id::*;
pub use errors::*;
pub use export::*;
pub use helper::*;
pub use identifier::*;
pub use markdown::*;
pub use repository::*;
pub use resolver::*;
pub use search::*;
pub use storage::*;
pub use templates::*;
pub use types::*;
