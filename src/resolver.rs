//! Chooses between a stored record and a built-in template for display.
use log::trace;

use crate::{DocumentRepository, TemplateCatalog, DEFAULT_TITLE, EMPTY_DOCUMENT_CONTENT};

/// What the editing surface needs to render a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContent {
    pub title: String,
    pub content: String,
}

/// Resolves document ids against a repository, falling back to the
/// template catalog.
pub struct ContentResolver<'a> {
    repository: &'a DocumentRepository,
}

impl<'a> ContentResolver<'a> {
    pub fn new(repository: &'a DocumentRepository) -> Self {
        Self { repository }
    }

    /// A stored record always wins over the template of the same id.
    pub fn resolve(&self, id: &str) -> ResolvedContent {
        match self.repository.resolve(id) {
            Some(record) => {
                trace!("Resolved {} from stored record", id);
                ResolvedContent {
                    title: non_empty_or(&record.title, DEFAULT_TITLE),
                    content: non_empty_or(&record.content, EMPTY_DOCUMENT_CONTENT),
                }
            }
            None => {
                trace!("Resolved {} from template catalog", id);
                let template = TemplateCatalog::lookup(id);
                ResolvedContent {
                    title: template.title.to_string(),
                    content: template.content.to_string(),
                }
            }
        }
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}
