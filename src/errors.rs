//! Error types for the brutal notes application.
//!
//! This module defines the error taxonomy for document operations: attempts
//! to mutate a built-in document, operations on missing documents, and
//! durable storage failures, plus the ambient errors of the CLI.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// The mutating operations a document can undergo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Save,
    Rename,
    Archive,
    Delete,
}

impl Operation {
    /// Verb form used in failure notifications ("SAVE FAILED").
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::Create => "CREATE",
            Operation::Save => "SAVE",
            Operation::Rename => "RENAME",
            Operation::Archive => "ARCHIVE",
            Operation::Delete => "DELETE",
        }
    }

    /// Participle used in rejection notifications ("CANNOT BE SAVED").
    pub fn participle(&self) -> &'static str {
        match self {
            Operation::Create => "CREATED",
            Operation::Save => "SAVED",
            Operation::Rename => "RENAMED",
            Operation::Archive => "ARCHIVED",
            Operation::Delete => "DELETED",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// The main error type for the brutal notes application.
#[derive(Error, Debug)]
pub enum NotesError {
    /// A built-in document was the target of an operation it does not allow.
    #[error("DEFAULT DOCUMENTS CANNOT BE {}", .operation.participle())]
    Reserved { id: String, operation: Operation },

    /// The document is not in the collection the operation expects.
    #[error("DOCUMENT NOT FOUND: {id}")]
    NotFound { id: String },

    /// Writing a collection to durable storage failed. The in-memory state
    /// already reflects the operation.
    #[error("{operation} FAILED - {}", storage_reason(.source))]
    Persistence {
        operation: Operation,
        key: String,
        #[source]
        source: io::Error,
    },

    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Directory creation or access failed.
    #[error("Failed to create or access directory: {path}")]
    DirectoryError { path: PathBuf },

    /// file not found
    #[error("File not found: {file_path}")]
    FileNotFound { file_path: String },

    #[error("{message}")]
    EditorError { message: String },
}

fn storage_reason(err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::StorageFull => "STORAGE FULL".to_string(),
        _ => err.to_string().to_uppercase(),
    }
}

impl NotesError {
    /// Returns true for the document-level rejections that happen before any
    /// state is touched.
    pub fn is_rejection(&self) -> bool {
        matches!(self, NotesError::Reserved { .. } | NotesError::NotFound { .. })
    }
}
