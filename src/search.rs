//! Sidebar filtering by document name.
use log::debug;

use crate::BuiltIn;

/// One listed document: its id and display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry {
    pub id: String,
    pub name: String,
}

impl SearchEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

pub struct SearchIndex;

impl SearchIndex {
    /// Ids of the entries visible for `query`, in input order.
    ///
    /// A blank query shows everything. Otherwise an entry is visible when its
    /// name contains the query, ignoring case, or when it is a built-in and
    /// the query is part of one of that built-in's phrases.
    pub fn filter<'a>(query: &str, entries: &'a [SearchEntry]) -> Vec<&'a str> {
        let term = query.trim().to_lowercase();
        let visible: Vec<&str> = entries
            .iter()
            .filter(|entry| Self::matches_term(&term, entry))
            .map(|entry| entry.id.as_str())
            .collect();

        debug!(
            "Search '{}' matched {} of {} documents",
            term,
            visible.len(),
            entries.len()
        );
        visible
    }

    fn matches_term(term: &str, entry: &SearchEntry) -> bool {
        if term.is_empty() || entry.name.to_lowercase().contains(term) {
            return true;
        }

        BuiltIn::from_id(&entry.id)
            .map(|builtin| phrases(builtin).iter().any(|phrase| phrase.contains(term)))
            .unwrap_or(false)
    }
}

/// Lower-case phrases a built-in also answers to.
fn phrases(builtin: BuiltIn) -> &'static [&'static str] {
    match builtin {
        BuiltIn::Dashboard => &["dashboard"],
        BuiltIn::GettingStarted => &["getting started"],
        BuiltIn::Todo => &["todo list", "to do list"],
        BuiltIn::Kanban => &["kanban board"],
        BuiltIn::Profile => &["profile"],
        BuiltIn::Project => &["project"],
        BuiltIn::Library => &["library"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<SearchEntry> {
        vec![
            SearchEntry::new("dashboard", "DASHBOARD"),
            SearchEntry::new("getting-started", "STOP TAKING WIMPY NOTES"),
            SearchEntry::new("todo-list", "BRUTAL TO-DO LIST"),
            SearchEntry::new("kanban-board", "KANBAN BOARD"),
            SearchEntry::new("doc-1-1", "Meeting notes"),
            SearchEntry::new("note-1-2", "Groceries"),
        ]
    }

    #[test]
    fn blank_query_shows_everything() {
        let entries = entries();
        assert_eq!(SearchIndex::filter("   ", &entries).len(), entries.len());
        assert_eq!(SearchIndex::filter("", &entries).len(), entries.len());
    }

    #[test]
    fn synonym_finds_todo_list() {
        let entries = entries();
        let visible = SearchIndex::filter("to do", &entries);
        assert_eq!(visible, vec!["todo-list"]);
        assert_eq!(SearchIndex::filter("TODO LIST", &entries), vec!["todo-list"]);
    }

    #[test]
    fn name_match_is_case_insensitive_and_ordered() {
        let entries = entries();
        assert_eq!(
            SearchIndex::filter("NOTES", &entries),
            vec!["getting-started", "doc-1-1"]
        );
        assert_eq!(SearchIndex::filter("started", &entries), vec!["getting-started"]);
    }

    #[test]
    fn no_fuzzy_matching() {
        let entries = entries();
        assert!(SearchIndex::filter("grcries", &entries).is_empty());
        assert!(!SearchIndex::filter("kanban boards", &entries).contains(&"kanban-board"));
    }
}
