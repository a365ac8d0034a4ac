//! Document lifecycle and persistence.
//!
//! The repository owns the active and archived collections. Every mutating
//! call updates memory first and then rewrites the affected collections in
//! full. A failed write is reported but never rolled back: memory stays the
//! source of truth for the rest of the session.
use std::{
    collections::{btree_map::Entry, BTreeMap},
    io,
};

use log::{debug, error, info, warn};

use crate::{
    BuiltIn, DocumentId, DocumentKind, DocumentRecord, IdentifierGenerator, KeyValueStore,
    NotesError, Operation, Result, SearchEntry, TemplateCatalog, ACTIVE_KEY, ARCHIVED_KEY,
    DEFAULT_TITLE, EMPTY_DOCUMENT_CONTENT,
};

/// Records keyed by id.
pub type Collection = BTreeMap<String, DocumentRecord>;

/// Outcome of the startup load.
#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    /// Number of active records loaded
    pub active: usize,
    /// Number of archived records loaded
    pub archived: usize,
    /// Keys that could not be read or parsed, with the reason
    pub failures: Vec<(String, String)>,
}

/// Counters shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_documents: usize,
    pub archived: usize,
    pub favorites: usize,
}

/// Owns the document collections and the durable store behind them.
pub struct DocumentRepository {
    store: Box<dyn KeyValueStore>,
    active: Collection,
    archived: Collection,
    ids: IdentifierGenerator,
}

impl DocumentRepository {
    /// Loads both collections and recovers the identifier counter.
    ///
    /// A key that cannot be read or parsed is treated as an empty collection
    /// and reported in the summary; loading itself never fails.
    pub fn load(store: impl KeyValueStore + 'static) -> (Self, LoadSummary) {
        let mut summary = LoadSummary::default();

        let active = read_collection(&store, ACTIVE_KEY, &mut summary);
        let archived = read_collection(&store, ARCHIVED_KEY, &mut summary);
        let ids = IdentifierGenerator::recover_counter(active.keys().map(String::as_str));

        summary.active = active.len();
        summary.archived = archived.len();
        info!(
            "Loaded {} active and {} archived documents",
            summary.active, summary.archived
        );

        let repository = Self {
            store: Box::new(store),
            active,
            archived,
            ids,
        };
        (repository, summary)
    }

    /// Creates an empty document of the given kind and persists it.
    ///
    /// If the write fails the record still exists in memory; the error is
    /// returned so the caller can tell the user.
    pub fn create(&mut self, kind: DocumentKind) -> Result<DocumentRecord> {
        let (id, counter) = loop {
            let (id, counter) = self.ids.next(kind);
            if !self.active.contains_key(&id) && !self.archived.contains_key(&id) {
                break (id, counter);
            }
            warn!("Minted id {} already in use, minting another", id);
        };

        let record = DocumentRecord::new(
            id.clone(),
            kind.default_name(counter),
            kind.default_title().to_string(),
            EMPTY_DOCUMENT_CONTENT.to_string(),
        );
        self.active.insert(id.clone(), record.clone());
        info!("Created document {}", id);

        self.persist(Operation::Create, ACTIVE_KEY)?;
        Ok(record)
    }

    /// Looks up an active record. Archived records are not resolvable.
    pub fn resolve(&self, id: &str) -> Option<&DocumentRecord> {
        self.active.get(id)
    }

    /// Stores new content (and, for user documents, a new title).
    ///
    /// Profile, project and library keep their built-in title; the other
    /// built-ins cannot be saved at all.
    pub fn save(&mut self, id: &str, content: &str, title: &str) -> Result<()> {
        let doc_id = DocumentId::parse(id);
        debug!("Saving document {}", doc_id);

        match doc_id {
            DocumentId::BuiltIn(builtin) if !builtin.is_savable() => {
                return Err(reserved(id, Operation::Save));
            }
            DocumentId::BuiltIn(builtin) => match self.active.entry(id.to_string()) {
                Entry::Occupied(mut entry) => entry.get_mut().touch_content(content.to_string()),
                Entry::Vacant(entry) => {
                    let builtin_title = TemplateCatalog::title(builtin);
                    entry.insert(DocumentRecord::new(
                        id.to_string(),
                        builtin_title.to_string(),
                        builtin_title.to_string(),
                        content.to_string(),
                    ));
                }
            },
            DocumentId::Custom(id) => {
                if self.archived.contains_key(&id) {
                    return Err(NotesError::NotFound { id });
                }

                let title = if title.is_empty() { DEFAULT_TITLE } else { title };
                match self.active.entry(id.clone()) {
                    Entry::Occupied(mut entry) => {
                        let record = entry.get_mut();
                        record.touch_content(content.to_string());
                        record.set_title(title.to_string());
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(DocumentRecord::new(
                            id,
                            title.to_string(),
                            title.to_string(),
                            content.to_string(),
                        ));
                    }
                }
            }
        }

        self.persist(Operation::Save, ACTIVE_KEY)
    }

    /// Renames a user document. Returns `false` when there is no record to
    /// rename.
    ///
    /// The title is trimmed; an empty title becomes the default one.
    pub fn rename(&mut self, id: &str, new_title: &str) -> Result<bool> {
        if DocumentId::parse(id).is_reserved() {
            return Err(reserved(id, Operation::Rename));
        }

        let Some(record) = self.active.get_mut(id) else {
            debug!("Nothing to rename for {}", id);
            return Ok(false);
        };

        let title = match new_title.trim() {
            "" => DEFAULT_TITLE,
            trimmed => trimmed,
        };
        record.set_title(title.to_string());
        info!("Renamed document {} to {}", id, title);

        self.persist(Operation::Rename, ACTIVE_KEY)?;
        Ok(true)
    }

    /// Checks that a document may be archived or deleted and returns it.
    ///
    /// Callers that need a confirmation step run this first, confirm, and
    /// then call [`archive`](Self::archive) or [`delete`](Self::delete).
    pub fn check_removable(&self, id: &str, operation: Operation) -> Result<&DocumentRecord> {
        if DocumentId::parse(id).is_reserved() {
            return Err(reserved(id, operation));
        }

        self.active.get(id).ok_or_else(|| {
            warn!("Cannot {} {}: not found", operation.verb().to_lowercase(), id);
            NotesError::NotFound { id: id.to_string() }
        })
    }

    /// Moves a document from the active set to the archived set.
    pub fn archive(&mut self, id: &str) -> Result<()> {
        self.check_removable(id, Operation::Archive)?;

        if let Some(record) = self.active.remove(id) {
            self.archived.insert(id.to_string(), record);
        }
        info!("Archived document {}", id);

        let active_result = self.persist(Operation::Archive, ACTIVE_KEY);
        let archived_result = self.persist(Operation::Archive, ARCHIVED_KEY);
        active_result.and(archived_result)
    }

    /// Permanently removes a document from the active set.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.check_removable(id, Operation::Delete)?;

        self.active.remove(id);
        info!("Deleted document {}", id);

        self.persist(Operation::Delete, ACTIVE_KEY)
    }

    pub fn active(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.active.values()
    }

    pub fn archived(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.archived.values()
    }

    pub fn is_archived(&self, id: &str) -> bool {
        self.archived.contains_key(id)
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            total_documents: self.active.len(),
            archived: self.archived.len(),
            favorites: self.active.values().filter(|r| r.is_favorite()).count(),
        }
    }

    /// User documents, most recently updated first.
    pub fn recent(&self, limit: usize) -> Vec<&DocumentRecord> {
        let mut records: Vec<_> = self
            .active
            .values()
            .filter(|r| !DocumentId::parse(&r.id).is_reserved())
            .collect();
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        records.truncate(limit);
        records
    }

    /// Favourite records, most recently updated first.
    pub fn favorites(&self) -> Vec<&DocumentRecord> {
        let mut records: Vec<_> = self.active.values().filter(|r| r.is_favorite()).collect();
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        records
    }

    /// What the sidebar lists: every built-in, then the user documents.
    pub fn sidebar_entries(&self) -> Vec<SearchEntry> {
        let builtins = BuiltIn::ALL
            .iter()
            .map(|b| SearchEntry::new(b.id(), TemplateCatalog::title(*b)));
        let custom = self
            .active
            .values()
            .filter(|r| !DocumentId::parse(&r.id).is_reserved())
            .map(|r| SearchEntry::new(&r.id, &r.name));

        builtins.chain(custom).collect()
    }

    /// Rewrites one collection in full.
    fn persist(&mut self, operation: Operation, key: &'static str) -> Result<()> {
        let collection = if key == ARCHIVED_KEY {
            &self.archived
        } else {
            &self.active
        };

        let written = serde_json::to_string(collection)
            .map_err(io::Error::from)
            .and_then(|json| self.store.write(key, &json));

        written.map_err(|source| {
            error!(
                "Could not write {} after {}: {}",
                key,
                operation.verb().to_lowercase(),
                source
            );
            NotesError::Persistence {
                operation,
                key: key.to_string(),
                source,
            }
        })
    }
}

fn reserved(id: &str, operation: Operation) -> NotesError {
    warn!("Rejected {} of built-in document {}", operation.verb(), id);
    NotesError::Reserved {
        id: id.to_string(),
        operation,
    }
}

fn read_collection(
    store: &dyn KeyValueStore,
    key: &str,
    summary: &mut LoadSummary,
) -> Collection {
    let parsed = store
        .read(key)
        .map_err(|e| e.to_string())
        .and_then(|value| match value {
            Some(json) => serde_json::from_str::<Collection>(&json).map_err(|e| e.to_string()),
            None => Ok(Collection::new()),
        });

    parsed.unwrap_or_else(|reason| {
        warn!("Could not load saved documents from {}: {}", key, reason);
        summary.failures.push((key.to_string(), reason));
        Collection::new()
    })
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::MemoryStore;

    /// Wraps a memory store and fails writes while the switch is on.
    struct FlakyStore {
        inner: MemoryStore,
        failing: Rc<Cell<bool>>,
    }

    impl KeyValueStore for FlakyStore {
        fn read(&self, key: &str) -> io::Result<Option<String>> {
            self.inner.read(key)
        }

        fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
            if self.failing.get() {
                return Err(io::Error::from(io::ErrorKind::StorageFull));
            }
            self.inner.write(key, value)
        }
    }

    fn empty_repository() -> DocumentRepository {
        DocumentRepository::load(MemoryStore::new()).0
    }

    fn snapshot(repo: &DocumentRepository) -> (Vec<DocumentRecord>, Vec<DocumentRecord>) {
        (
            repo.active().cloned().collect(),
            repo.archived().cloned().collect(),
        )
    }

    #[test]
    fn create_returns_distinct_ids() {
        let mut repo = empty_repository();
        let first = repo.create(DocumentKind::Document).unwrap();
        let second = repo.create(DocumentKind::Note).unwrap();
        let third = repo.create(DocumentKind::Document).unwrap();

        assert_ne!(first.id, second.id);
        assert_ne!(second.id, third.id);
        assert_ne!(first.id, third.id);
        assert_eq!(first.name, "New Document 1");
        assert_eq!(second.name, "New Note 2");
        assert_eq!(second.title, "NEW NOTE");
        assert_eq!(first.content, EMPTY_DOCUMENT_CONTENT);
        assert_eq!(repo.stats().total_documents, 3);
    }

    #[test]
    fn counter_resumes_after_load() {
        let stored = r#"{
            "doc-1700000000000-3": {"id": "doc-1700000000000-3", "name": "a", "title": "a"},
            "doc-1700000000001-7": {"id": "doc-1700000000001-7", "name": "b", "title": "b"},
            "doc-1700000000002-2": {"id": "doc-1700000000002-2", "name": "c", "title": "c"}
        }"#;
        let (mut repo, summary) =
            DocumentRepository::load(MemoryStore::new().with_value(ACTIVE_KEY, stored));
        assert_eq!(summary.active, 3);
        assert!(summary.failures.is_empty());

        let record = repo.create(DocumentKind::Document).unwrap();
        assert!(record.id.ends_with("-8"), "unexpected id {}", record.id);
    }

    #[test]
    fn create_after_maximal_counter_does_not_panic() {
        let stored = r#"{
            "doc-1-18446744073709551615": {"id": "doc-1-18446744073709551615", "name": "max", "title": "max"}
        }"#;
        let (mut repo, summary) =
            DocumentRepository::load(MemoryStore::new().with_value(ACTIVE_KEY, stored));
        assert!(summary.failures.is_empty());

        let first = repo.create(DocumentKind::Document).unwrap();
        let second = repo.create(DocumentKind::Document).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(repo.active().count(), 3);
    }

    #[test]
    fn malformed_collection_loads_empty() {
        let archived = r#"{"doc-1-1": {"id": "doc-1-1", "name": "old", "title": "old"}}"#;
        let store = MemoryStore::new()
            .with_value(ACTIVE_KEY, "{not json")
            .with_value(ARCHIVED_KEY, archived);

        let (repo, summary) = DocumentRepository::load(store);
        assert_eq!(summary.active, 0);
        assert_eq!(summary.archived, 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].0, ACTIVE_KEY);
        assert!(repo.is_archived("doc-1-1"));
    }

    #[test]
    fn reserved_ids_are_rejected_without_changes() {
        let mut repo = empty_repository();
        repo.save("profile", "<p>me</p>", "ignored").unwrap();
        repo.create(DocumentKind::Document).unwrap();
        let before = snapshot(&repo);

        let rename = repo.rename("todo-list", "x").unwrap_err();
        let archive = repo.archive("profile").unwrap_err();
        let delete = repo.delete("kanban-board").unwrap_err();

        for err in [&rename, &archive, &delete] {
            assert!(matches!(err, NotesError::Reserved { .. }), "{:?}", err);
        }
        assert_eq!(delete.to_string(), "DEFAULT DOCUMENTS CANNOT BE DELETED");
        assert_eq!(snapshot(&repo), before);
    }

    #[test]
    fn renaming_savable_builtins_is_rejected() {
        let mut repo = empty_repository();
        repo.save("library", "<p>books</p>", "").unwrap();

        for id in ["profile", "project", "library", "dashboard"] {
            assert!(matches!(
                repo.rename(id, "Mine"),
                Err(NotesError::Reserved { .. })
            ));
        }
        assert_eq!(repo.resolve("library").unwrap().name, "MY LIBRARY");
    }

    #[test]
    fn template_builtins_cannot_be_saved() {
        let mut repo = empty_repository();
        for id in ["dashboard", "getting-started", "todo-list", "kanban-board"] {
            let err = repo.save(id, "<p>x</p>", "x").unwrap_err();
            assert_eq!(err.to_string(), "DEFAULT DOCUMENTS CANNOT BE SAVED");
            assert!(repo.resolve(id).is_none());
        }
    }

    #[test]
    fn savable_builtin_keeps_catalog_title() {
        let mut repo = empty_repository();
        repo.save("project", "<p>v1</p>", "Whatever").unwrap();

        let first = repo.resolve("project").unwrap().clone();
        assert_eq!(first.title, "MY PROJECTS");
        assert_eq!(first.name, "MY PROJECTS");

        repo.save("project", "<p>v2</p>", "Other").unwrap();
        let second = repo.resolve("project").unwrap();
        assert_eq!(second.content, "<p>v2</p>");
        assert_eq!(second.title, "MY PROJECTS");
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
    }

    #[test]
    fn save_updates_title_name_and_content() {
        let mut repo = empty_repository();
        let record = repo.create(DocumentKind::Document).unwrap();

        repo.save(&record.id, "<p>body</p>", "Groceries").unwrap();
        let saved = repo.resolve(&record.id).unwrap();
        assert_eq!(saved.title, "Groceries");
        assert_eq!(saved.name, "Groceries");
        assert_eq!(saved.content, "<p>body</p>");
        assert_eq!(saved.created_at, record.created_at);

        repo.save(&record.id, "<p>body</p>", "").unwrap();
        assert_eq!(repo.resolve(&record.id).unwrap().title, DEFAULT_TITLE);
    }

    #[test]
    fn save_creates_missing_record() {
        let mut repo = empty_repository();
        repo.save("doc-1", "<p>hi</p>", "Hi").unwrap();

        let record = repo.resolve("doc-1").unwrap();
        assert_eq!(record.title, "Hi");
        assert!(record.created_at.is_some());
    }

    #[test]
    fn save_of_archived_id_is_rejected() {
        let mut repo = empty_repository();
        let record = repo.create(DocumentKind::Document).unwrap();
        repo.archive(&record.id).unwrap();

        let err = repo.save(&record.id, "<p>again</p>", "Again").unwrap_err();
        assert!(matches!(err, NotesError::NotFound { .. }));
        assert!(repo.resolve(&record.id).is_none());
    }

    #[test]
    fn rename_trims_and_defaults() {
        let mut repo = empty_repository();
        let record = repo.create(DocumentKind::Document).unwrap();

        assert!(repo.rename(&record.id, "  Plans  ").unwrap());
        assert_eq!(repo.resolve(&record.id).unwrap().name, "Plans");

        assert!(repo.rename(&record.id, "   ").unwrap());
        assert_eq!(repo.resolve(&record.id).unwrap().title, DEFAULT_TITLE);
    }

    #[test]
    fn rename_of_missing_record_is_noop() {
        let mut repo = empty_repository();
        assert!(!repo.rename("doc-42-42", "Ghost").unwrap());
        assert_eq!(repo.active().count(), 0);
    }

    #[test]
    fn archive_moves_record_unchanged() {
        let mut repo = empty_repository();
        let record = repo.create(DocumentKind::Document).unwrap();
        repo.save(&record.id, "<p>keep</p>", "Keep").unwrap();
        let before = repo.resolve(&record.id).unwrap().clone();

        repo.archive(&record.id).unwrap();

        assert!(repo.resolve(&record.id).is_none());
        let archived: Vec<_> = repo.archived().collect();
        assert_eq!(archived, vec![&before]);
        assert_eq!(repo.stats().archived, 1);
    }

    #[test]
    fn archive_and_delete_of_missing_id_fail() {
        let mut repo = empty_repository();
        assert!(matches!(
            repo.archive("doc-9-9"),
            Err(NotesError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete("doc-9-9"),
            Err(NotesError::NotFound { .. })
        ));
    }

    #[test]
    fn archived_record_cannot_be_archived_again_or_deleted() {
        let mut repo = empty_repository();
        let record = repo.create(DocumentKind::Note).unwrap();
        repo.archive(&record.id).unwrap();

        assert!(repo.archive(&record.id).is_err());
        assert!(repo.delete(&record.id).is_err());
        assert!(repo.is_archived(&record.id));
    }

    #[test]
    fn delete_removes_permanently() {
        let mut repo = empty_repository();
        let record = repo.create(DocumentKind::Document).unwrap();

        repo.delete(&record.id).unwrap();

        assert!(repo.resolve(&record.id).is_none());
        assert_eq!(repo.archived().count(), 0);
    }

    #[test]
    fn persistence_failure_keeps_memory() {
        let failing = Rc::new(Cell::new(false));
        let store = FlakyStore {
            inner: MemoryStore::new(),
            failing: Rc::clone(&failing),
        };
        let (mut repo, _) = DocumentRepository::load(store);
        let record = repo.create(DocumentKind::Document).unwrap();

        failing.set(true);
        let err = repo.save(&record.id, "<p>new</p>", "New").unwrap_err();
        assert_eq!(err.to_string(), "SAVE FAILED - STORAGE FULL");
        assert_eq!(repo.resolve(&record.id).unwrap().content, "<p>new</p>");

        let err = repo.archive(&record.id).unwrap_err();
        assert!(matches!(
            err,
            NotesError::Persistence {
                operation: Operation::Archive,
                ..
            }
        ));
        assert!(repo.is_archived(&record.id));
    }

    #[test]
    fn writes_whole_collections() {
        let mut repo = empty_repository();
        let a = repo.create(DocumentKind::Document).unwrap();
        let b = repo.create(DocumentKind::Document).unwrap();
        repo.archive(&a.id).unwrap();

        let active: Collection =
            serde_json::from_str(&repo.store.read(ACTIVE_KEY).unwrap().unwrap()).unwrap();
        let archived: Collection =
            serde_json::from_str(&repo.store.read(ARCHIVED_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(active.keys().collect::<Vec<_>>(), vec![&b.id]);
        assert_eq!(archived.keys().collect::<Vec<_>>(), vec![&a.id]);
    }

    #[test]
    fn recent_excludes_builtins_and_orders_by_update() {
        let stored = r#"{
            "profile": {"id": "profile", "name": "MY PROFILE", "title": "MY PROFILE", "updatedAt": 9000},
            "doc-1-1": {"id": "doc-1-1", "name": "old", "title": "old", "updatedAt": 1000},
            "doc-1-2": {"id": "doc-1-2", "name": "new", "title": "new", "updatedAt": 5000, "isFavorite": true},
            "note-1-3": {"id": "note-1-3", "name": "undated", "title": "undated"}
        }"#;
        let (repo, _) = DocumentRepository::load(MemoryStore::new().with_value(ACTIVE_KEY, stored));

        let recent: Vec<_> = repo.recent(2).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(recent, vec!["doc-1-2", "doc-1-1"]);

        let stats = repo.stats();
        assert_eq!(stats.total_documents, 4);
        assert_eq!(stats.favorites, 1);
        assert_eq!(repo.favorites()[0].id, "doc-1-2");
    }

    #[test]
    fn sidebar_lists_builtins_once() {
        let mut repo = empty_repository();
        repo.save("profile", "<p>me</p>", "").unwrap();
        let record = repo.create(DocumentKind::Document).unwrap();

        let entries = repo.sidebar_entries();
        assert_eq!(entries.len(), BuiltIn::ALL.len() + 1);
        assert_eq!(entries[0].id, "dashboard");
        assert_eq!(entries.last().unwrap().id, record.id);
        assert_eq!(entries.iter().filter(|e| e.id == "profile").count(), 1);
    }
}
