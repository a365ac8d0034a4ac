//! Typed document identifiers.
//!
//! Raw id strings are classified once, at the boundary, into either one of the
//! built-in documents that ship with the application or a user-owned id.
use std::fmt;

/// The built-in documents. Their ids are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltIn {
    Dashboard,
    GettingStarted,
    Todo,
    Kanban,
    Profile,
    Project,
    Library,
}

impl BuiltIn {
    /// All built-ins in sidebar order.
    pub const ALL: [BuiltIn; 7] = [
        BuiltIn::Dashboard,
        BuiltIn::GettingStarted,
        BuiltIn::Todo,
        BuiltIn::Kanban,
        BuiltIn::Profile,
        BuiltIn::Project,
        BuiltIn::Library,
    ];

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "dashboard" => Some(BuiltIn::Dashboard),
            "getting-started" => Some(BuiltIn::GettingStarted),
            "todo-list" => Some(BuiltIn::Todo),
            "kanban-board" => Some(BuiltIn::Kanban),
            "profile" => Some(BuiltIn::Profile),
            "project" => Some(BuiltIn::Project),
            "library" => Some(BuiltIn::Library),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            BuiltIn::Dashboard => "dashboard",
            BuiltIn::GettingStarted => "getting-started",
            BuiltIn::Todo => "todo-list",
            BuiltIn::Kanban => "kanban-board",
            BuiltIn::Profile => "profile",
            BuiltIn::Project => "project",
            BuiltIn::Library => "library",
        }
    }

    /// Whether the user may persist edits to this built-in.
    ///
    /// Only the profile, project and library pages hold user content; the
    /// rest are fixed templates.
    pub fn is_savable(&self) -> bool {
        matches!(self, BuiltIn::Profile | BuiltIn::Project | BuiltIn::Library)
    }
}

impl fmt::Display for BuiltIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A document identifier resolved into its class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentId {
    BuiltIn(BuiltIn),
    Custom(String),
}

impl DocumentId {
    pub fn parse(id: &str) -> Self {
        match BuiltIn::from_id(id) {
            Some(builtin) => DocumentId::BuiltIn(builtin),
            None => DocumentId::Custom(id.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DocumentId::BuiltIn(builtin) => builtin.id(),
            DocumentId::Custom(id) => id,
        }
    }

    pub fn is_reserved(&self) -> bool {
        matches!(self, DocumentId::BuiltIn(_))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids_round_trip() {
        for builtin in BuiltIn::ALL {
            assert_eq!(BuiltIn::from_id(builtin.id()), Some(builtin));
        }
    }

    #[test]
    fn unknown_ids_are_custom() {
        assert_eq!(
            DocumentId::parse("doc-1700000000000-3"),
            DocumentId::Custom("doc-1700000000000-3".to_string())
        );
        // Matching is exact, not case-folded.
        assert!(!DocumentId::parse("Profile").is_reserved());
        assert!(DocumentId::parse("profile").is_reserved());
    }

    #[test]
    fn only_profile_project_library_are_savable() {
        let savable: Vec<_> = BuiltIn::ALL.iter().filter(|b| b.is_savable()).collect();
        assert_eq!(
            savable,
            vec![&BuiltIn::Profile, &BuiltIn::Project, &BuiltIn::Library]
        );
    }
}
