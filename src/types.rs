//! Shared types for the brutal notes application: the crate-wide result
//! alias and the CLI subcommands.
use std::path::PathBuf;

use clap::Subcommand;

use crate::{ExportFormat, NotesError};

/// A specialized Result type for brutal notes operations.
pub type Result<T> = std::result::Result<T, NotesError>;

/// Available subcommands for the brutal notes application
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new document
    New {
        /// Create a note instead of a document
        #[clap(short, long)]
        note: bool,
    },

    /// Show a document's title and content
    Show {
        /// ID of the document to show
        id: String,
    },

    /// List the sidebar documents
    List {
        /// List archived documents instead
        #[clap(short, long, conflicts_with = "favorites")]
        archived: bool,

        /// List favourite documents only
        #[clap(short, long)]
        favorites: bool,
    },

    /// Filter documents by name
    Search {
        /// Search query text
        query: String,
    },

    /// Save new content for a document
    Save {
        /// ID of the document to save
        id: String,

        /// New title for the document
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New content markup
        #[clap(short, long, conflicts_with_all = ["file", "edit"])]
        content: Option<String>,

        /// Path to a file containing the new content
        #[clap(short, long, conflicts_with = "edit")]
        file: Option<PathBuf>,

        /// Open the current content in the editor before saving
        #[clap(short, long)]
        edit: bool,
    },

    /// Rename a document
    Rename {
        /// ID of the document to rename
        id: String,

        /// New title
        title: String,
    },

    /// Move a document to the archive
    Archive {
        /// ID of the document to archive
        id: String,
    },

    /// Delete a document permanently
    Delete {
        /// ID of the document to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Export a document to another format
    Export {
        /// ID of the document to export
        id: String,

        /// Format to export to
        #[clap(short, long, value_enum, default_value_t = ExportFormat::Markdown)]
        format: ExportFormat,

        /// Directory where the exported file is written
        #[clap(short, long)]
        output: Option<PathBuf>,
    },

    /// Show document statistics and recent documents
    Dashboard,
}
