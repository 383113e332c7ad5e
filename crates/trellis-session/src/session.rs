//! Editing session: current documents, selection, and debounced persistence.

use crate::error::Result;
use crate::storage::Storage;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use trellis_core::{
    Command, DatabaseSettings, DjangoModel, ExpressModel, IdSource, Layout, RandomIds,
};

/// Storage key of the serialized layout.
pub const LAYOUT_KEY: &str = "layout";
/// Storage key of the Express model list.
pub const EXPRESS_MODELS_KEY: &str = "express-models";
/// Storage key of the Django model list.
pub const DJANGO_MODELS_KEY: &str = "django-models";
/// Storage key of the Django database settings.
pub const DATABASE_SETTINGS_KEY: &str = "database-settings";

const ALL_KEYS: [&str; 4] = [
    LAYOUT_KEY,
    EXPRESS_MODELS_KEY,
    DJANGO_MODELS_KEY,
    DATABASE_SETTINGS_KEY,
];

/// When pending edits are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushPolicy {
    /// Edits must stop for this long before a flush.
    pub quiescence: Duration,
}

impl FlushPolicy {
    pub fn new(quiescence: Duration) -> Self {
        Self { quiescence }
    }
}

impl Default for FlushPolicy {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

/// What the editor currently has selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub component_id: Option<String>,
    pub column_id: Option<String>,
}

/// State of one editing session.
///
/// Every change goes through the session so it can track what needs
/// persisting. Nothing is written until [`Session::tick`],
/// [`Session::flush`] or [`Session::end`] is called.
pub struct Session {
    layout: Layout,
    express_models: Vec<ExpressModel>,
    django_models: Vec<DjangoModel>,
    database: DatabaseSettings,
    selection: Selection,
    ids: Box<dyn IdSource>,
    policy: FlushPolicy,
    last_change: Option<Instant>,
}

impl Session {
    /// A fresh session with default documents.
    pub fn new() -> Self {
        Self {
            layout: Layout::default(),
            express_models: Vec::new(),
            django_models: Vec::new(),
            database: DatabaseSettings::default(),
            selection: Selection::default(),
            ids: Box::new(RandomIds::new()),
            policy: FlushPolicy::default(),
            last_change: None,
        }
    }

    /// Load persisted state, falling back to defaults per key when a value is
    /// missing, unreadable or corrupt.
    pub fn restore(storage: &dyn Storage) -> Self {
        Self {
            layout: load(storage, LAYOUT_KEY),
            express_models: load(storage, EXPRESS_MODELS_KEY),
            django_models: load(storage, DJANGO_MODELS_KEY),
            database: load(storage, DATABASE_SETTINGS_KEY),
            ..Self::new()
        }
    }

    /// Use a different id source for new nodes.
    pub fn with_ids(mut self, ids: Box<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_policy(mut self, policy: FlushPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn express_models(&self) -> &[ExpressModel] {
        &self.express_models
    }

    pub fn django_models(&self) -> &[DjangoModel] {
        &self.django_models
    }

    pub fn database(&self) -> &DatabaseSettings {
        &self.database
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Whether edits are waiting to be written.
    pub fn is_dirty(&self) -> bool {
        self.last_change.is_some()
    }

    /// Apply a layout command.
    ///
    /// A selection whose target no longer exists is cleared. A command that
    /// leaves the layout unchanged does not mark the session dirty.
    pub fn dispatch(&mut self, command: &Command, now: Instant) -> &Layout {
        let next = self.layout.apply(command, self.ids.as_mut());
        if next != self.layout {
            self.layout = next;
            self.prune_selection();
            self.touch(now);
        }
        &self.layout
    }

    /// Select a component and/or column. Unknown ids are ignored.
    pub fn select(&mut self, component_id: Option<&str>, column_id: Option<&str>) {
        self.selection = Selection {
            component_id: component_id.map(str::to_string),
            column_id: column_id.map(str::to_string),
        };
        self.prune_selection();
    }

    pub fn set_express_models(&mut self, models: Vec<ExpressModel>, now: Instant) {
        self.express_models = models;
        self.touch(now);
    }

    pub fn set_django_models(&mut self, models: Vec<DjangoModel>, now: Instant) {
        self.django_models = models;
        self.touch(now);
    }

    pub fn set_database(&mut self, database: DatabaseSettings, now: Instant) {
        self.database = database;
        self.touch(now);
    }

    /// Flush if the session is dirty and quiet for the policy window.
    ///
    /// Returns whether a flush happened.
    pub fn tick(&mut self, now: Instant, storage: &mut dyn Storage) -> Result<bool> {
        match self.last_change {
            Some(changed) if now.saturating_duration_since(changed) >= self.policy.quiescence => {
                self.flush(storage)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Write every document now. The session stays dirty if a write fails.
    pub fn flush(&mut self, storage: &mut dyn Storage) -> Result<()> {
        storage.set(LAYOUT_KEY, &serde_json::to_string(&self.layout)?)?;
        storage.set(EXPRESS_MODELS_KEY, &serde_json::to_string(&self.express_models)?)?;
        storage.set(DJANGO_MODELS_KEY, &serde_json::to_string(&self.django_models)?)?;
        storage.set(DATABASE_SETTINGS_KEY, &serde_json::to_string(&self.database)?)?;
        self.last_change = None;
        tracing::debug!(
            columns = self.layout.column_count(),
            components = self.layout.component_count(),
            "session flushed"
        );
        Ok(())
    }

    /// Close the session, writing pending edits regardless of the window.
    pub fn end(mut self, storage: &mut dyn Storage) -> Result<()> {
        if self.is_dirty() {
            self.flush(storage)?;
        }
        Ok(())
    }

    /// Return to defaults and forget everything persisted.
    pub fn reset(&mut self, storage: &mut dyn Storage) -> Result<()> {
        self.layout = Layout::default();
        self.express_models.clear();
        self.django_models.clear();
        self.database = DatabaseSettings::default();
        self.selection = Selection::default();
        self.last_change = None;
        for key in ALL_KEYS {
            storage.remove(key)?;
        }
        Ok(())
    }

    fn touch(&mut self, now: Instant) {
        self.last_change = Some(now);
    }

    fn prune_selection(&mut self) {
        let layout = &self.layout;
        if let Some(id) = &self.selection.component_id {
            if layout.find_component(id).is_none() {
                tracing::debug!(component_id = %id, "selected component is gone");
                self.selection.component_id = None;
            }
        }
        if let Some(id) = &self.selection.column_id {
            if layout.find_column(id).is_none() {
                tracing::debug!(column_id = %id, "selected column is gone");
                self.selection.column_id = None;
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn load<T: DeserializeOwned + Default>(storage: &dyn Storage, key: &str) -> T {
    let text = match storage.get(key) {
        Ok(Some(text)) => text,
        Ok(None) => return T::default(),
        Err(err) => {
            tracing::warn!(key, %err, "could not read stored state, using default");
            return T::default();
        }
    };
    serde_json::from_str(&text).unwrap_or_else(|err| {
        tracing::warn!(key, %err, "stored state is corrupt, using default");
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use trellis_core::{ComponentKind, Orientation, SequentialIds};

    fn session() -> Session {
        Session::new().with_ids(Box::new(SequentialIds::new()))
    }

    fn add_button() -> Command {
        Command::AddComponent {
            column_id: "column-root".to_string(),
            component_type: ComponentKind::Button.as_str().to_string(),
            props: Default::default(),
        }
    }

    #[test]
    fn test_dispatch_marks_dirty() {
        let mut session = session();
        let start = Instant::now();
        assert!(!session.is_dirty());

        session.dispatch(&add_button(), start);
        assert!(session.is_dirty());
        assert_eq!(session.layout().component_count(), 1);
    }

    #[test]
    fn test_noop_dispatch_stays_clean() {
        let mut session = session();
        session.dispatch(
            &Command::DeleteColumn {
                column_id: "column-root".to_string(),
            },
            Instant::now(),
        );
        assert!(!session.is_dirty());
        assert_eq!(session.layout(), &Layout::default());
    }

    #[test]
    fn test_tick_waits_for_quiescence() {
        let mut session = session();
        let mut storage = MemoryStorage::new();
        let start = Instant::now();

        session.dispatch(&add_button(), start);
        assert!(!session.tick(start + Duration::from_millis(499), &mut storage).unwrap());
        assert!(storage.is_empty());

        // A later edit restarts the window.
        session.dispatch(&add_button(), start + Duration::from_millis(400));
        assert!(!session.tick(start + Duration::from_millis(800), &mut storage).unwrap());
        assert!(session.tick(start + Duration::from_millis(900), &mut storage).unwrap());

        assert!(!session.is_dirty());
        assert_eq!(storage.len(), 4);
        assert!(!session.tick(start + Duration::from_secs(5), &mut storage).unwrap());
    }

    #[test]
    fn test_selection_cleared_with_deleted_component() {
        let mut session = session();
        let now = Instant::now();
        session.dispatch(&add_button(), now);
        let id = session.layout().columns[0].components[0].id.clone();

        session.select(Some(&id), Some("column-root"));
        assert_eq!(session.selection().component_id.as_deref(), Some(id.as_str()));

        session.dispatch(
            &Command::DeleteComponent {
                column_id: "column-root".to_string(),
                component_id: id,
            },
            now,
        );
        assert_eq!(session.selection().component_id, None);
        assert_eq!(session.selection().column_id.as_deref(), Some("column-root"));
    }

    #[test]
    fn test_selection_cleared_with_deleted_column() {
        let mut session = session();
        let now = Instant::now();
        session.dispatch(
            &Command::AddColumn {
                orientation: Orientation::Horizontal,
                parent_column_id: None,
            },
            now,
        );
        let second = session.layout().columns[1].id.clone();
        session.select(None, Some(&second));
        session.dispatch(&Command::DeleteColumn { column_id: second }, now);
        assert_eq!(session.selection(), &Selection::default());
    }

    #[test]
    fn test_select_unknown_is_ignored() {
        let mut session = session();
        session.select(Some("nope"), Some("column-root"));
        assert_eq!(session.selection().component_id, None);
        assert_eq!(session.selection().column_id.as_deref(), Some("column-root"));
    }

    #[test]
    fn test_failed_flush_keeps_dirty() {
        let mut session = session();
        let mut storage = MemoryStorage::new().with_quota(8);
        let now = Instant::now();
        session.dispatch(&add_button(), now);
        assert!(session.flush(&mut storage).is_err());
        assert!(session.is_dirty());
    }

    #[test]
    fn test_reset_clears_storage() {
        let mut session = session();
        let mut storage = MemoryStorage::new();
        let now = Instant::now();
        session.dispatch(&add_button(), now);
        session.flush(&mut storage).unwrap();

        session.reset(&mut storage).unwrap();
        assert!(storage.is_empty());
        assert_eq!(session.layout(), &Layout::default());
        assert!(!session.is_dirty());
    }
}
