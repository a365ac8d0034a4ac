//! Built-in document templates.
//!
//! The catalog is fixed at compile time. Edits to the savable built-ins are
//! stored as ordinary records by the repository and never touch this table.
use crate::BuiltIn;

/// Content served for documents that have no template and no record.
pub const FALLBACK_CONTENT: &str = r#"<div class="block"><p>DOCUMENT CONTENT</p></div>"#;

/// Title served for documents that have no template and no record.
pub const FALLBACK_TITLE: &str = "BRUTAL DOCUMENT";

/// Body of a freshly created document.
pub const EMPTY_DOCUMENT_CONTENT: &str = include_str!("../assets/templates/empty.html");

/// Title and markup of a built-in document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub title: &'static str,
    pub content: &'static str,
}

pub struct TemplateCatalog;

impl TemplateCatalog {
    /// Looks up a template by raw id. Unknown ids get the generic fallback.
    pub fn lookup(id: &str) -> Template {
        match BuiltIn::from_id(id) {
            Some(builtin) => Self::template(builtin),
            None => Template {
                title: FALLBACK_TITLE,
                content: FALLBACK_CONTENT,
            },
        }
    }

    pub fn template(builtin: BuiltIn) -> Template {
        Template {
            title: Self::title(builtin),
            content: Self::content(builtin),
        }
    }

    pub fn title(builtin: BuiltIn) -> &'static str {
        match builtin {
            BuiltIn::Dashboard => "DASHBOARD",
            BuiltIn::GettingStarted => "STOP TAKING WIMPY NOTES",
            BuiltIn::Todo => "BRUTAL TO-DO LIST",
            BuiltIn::Kanban => "KANBAN BOARD",
            BuiltIn::Profile => "MY PROFILE",
            BuiltIn::Project => "MY PROJECTS",
            BuiltIn::Library => "MY LIBRARY",
        }
    }

    fn content(builtin: BuiltIn) -> &'static str {
        match builtin {
            BuiltIn::Dashboard => include_str!("../assets/templates/dashboard.html"),
            BuiltIn::GettingStarted => include_str!("../assets/templates/getting-started.html"),
            BuiltIn::Todo => include_str!("../assets/templates/todo-list.html"),
            BuiltIn::Kanban => include_str!("../assets/templates/kanban-board.html"),
            BuiltIn::Profile => include_str!("../assets/templates/profile.html"),
            BuiltIn::Project => include_str!("../assets/templates/project.html"),
            BuiltIn::Library => include_str!("../assets/templates/library.html"),
        }
    }

    /// Notification shown after a successful save of the given document.
    pub fn save_message(builtin: Option<BuiltIn>) -> &'static str {
        match builtin {
            Some(BuiltIn::Profile) => "PROFILE SAVED BRUTALLY",
            Some(BuiltIn::Project) => "PROJECTS SAVED BRUTALLY",
            Some(BuiltIn::Library) => "LIBRARY SAVED BRUTALLY",
            _ => "DOCUMENT SAVED BRUTALLY",
        }
    }
}
