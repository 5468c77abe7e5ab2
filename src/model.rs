use std::io;

use tracing::{debug, error, info};

use crate::playlist::{Playlist, PlaylistError, Song};
use crate::store::PlaylistStore;
use crate::transaction::{Transaction, TransactionStack};
use crate::view::{PlaylistView, ToolbarState};

/// Holds every playlist plus the undo history of the one currently loaded.
///
/// List-level actions (create, rename, delete, load) are not undoable and
/// reset the history, since a stack only applies to the list it was built on.
/// Song edits go through the transaction stack; after each committed edit,
/// undo or redo the view is refreshed and the library saved.
pub struct PlaylistModel {
    lists: Vec<Playlist>,
    current: Option<u64>,
    next_id: u64,
    tps: TransactionStack,
    store: PlaylistStore,
    view: Box<dyn PlaylistView>,
}

impl PlaylistModel {
    pub fn new(store: PlaylistStore, view: Box<dyn PlaylistView>, history_limit: Option<usize>) -> Self {
        let tps = match history_limit {
            Some(limit) => TransactionStack::with_limit(limit),
            None => TransactionStack::new(),
        };
        Self {
            lists: Vec::new(),
            current: None,
            next_id: 0,
            tps,
            store,
            view,
        }
    }

    /// Replace the in-memory library with what the store holds
    pub fn load_lists(&mut self) -> io::Result<()> {
        let lists = self.store.load()?;
        let next_id = lists
            .iter()
            .try_fold(0u64, |acc, l| l.id.checked_add(1).map(|next| acc.max(next)))
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidData, "playlist id out of range")
            })?;
        self.lists = lists;
        self.next_id = next_id;
        self.current = None;
        self.tps.clear_all_transactions();
        self.sort_lists();
        info!(count = self.lists.len(), store = %self.store.file_name(), "playlists loaded");

        self.view.refresh_lists(&self.lists, self.current);
        self.refresh_toolbar();
        Ok(())
    }

    pub fn save_lists(&self) -> io::Result<()> {
        self.store.save(&self.lists)
    }

    /// Save, logging instead of failing the edit that triggered it
    fn persist(&self) {
        if let Err(e) = self.save_lists() {
            error!(error = %e, store = %self.store.file_name(), "failed to save playlists");
        }
    }

    fn sort_lists(&mut self) {
        self.lists.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    }

    // === Queries ===

    #[allow(dead_code)]
    pub fn lists(&self) -> &[Playlist] {
        &self.lists
    }

    pub fn get_list_index(&self, id: u64) -> Option<usize> {
        self.lists.iter().position(|l| l.id == id)
    }

    #[allow(dead_code)]
    pub fn get_list(&self, index: usize) -> Option<&Playlist> {
        self.lists.get(index)
    }

    pub fn current_list(&self) -> Option<&Playlist> {
        self.current
            .and_then(|id| self.get_list_index(id))
            .map(|idx| &self.lists[idx])
    }

    #[allow(dead_code)]
    pub fn has_current_list(&self) -> bool {
        self.current.is_some()
    }

    /// Number of songs in the loaded playlist (0 when none is loaded)
    #[allow(dead_code)]
    pub fn get_playlist_size(&self) -> usize {
        self.current_list().map(|l| l.len()).unwrap_or(0)
    }

    #[allow(dead_code)]
    pub fn has_transaction_to_undo(&self) -> bool {
        self.tps.has_transaction_to_undo()
    }

    #[allow(dead_code)]
    pub fn has_transaction_to_redo(&self) -> bool {
        self.tps.has_transaction_to_redo()
    }

    pub fn toolbar_state(&self) -> ToolbarState {
        ToolbarState {
            has_list: self.current.is_some(),
            can_undo: self.tps.has_transaction_to_undo(),
            can_redo: self.tps.has_transaction_to_redo(),
            undo_label: self.tps.peek_undo().map(|t| t.description()),
            redo_label: self.tps.peek_redo().map(|t| t.description()),
        }
    }

    fn refresh_toolbar(&mut self) {
        let state = self.toolbar_state();
        self.view.update_toolbar(&state);
    }

    pub fn refresh_list_names(&mut self) {
        self.view.refresh_lists(&self.lists, self.current);
    }

    /// Redraw the open playlist (or the closed state) and the toolbar
    pub fn refresh_playlist(&mut self) {
        match self.current.and_then(|id| self.get_list_index(id)) {
            Some(idx) => self.view.refresh_playlist(&self.lists[idx]),
            None => self.view.clear_playlist(),
        }
        self.refresh_toolbar();
    }

    // === List management ===

    /// Create a playlist and return its id
    pub fn add_new_list(&mut self, name: &str, songs: Vec<Song>) -> Result<u64, PlaylistError> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(PlaylistError::IdsExhausted)?;
        self.lists.push(Playlist::new(id, name, songs));
        self.sort_lists();
        info!(id, name, "playlist created");

        self.persist();
        self.view.refresh_lists(&self.lists, self.current);
        Ok(id)
    }

    /// Make `id` the playlist being edited. Its history starts empty.
    pub fn load_list(&mut self, id: u64) -> Result<(), PlaylistError> {
        let idx = self.get_list_index(id).ok_or(PlaylistError::UnknownList(id))?;
        self.current = Some(id);
        self.tps.clear_all_transactions();
        info!(id, name = %self.lists[idx].name, "playlist loaded");

        self.view.refresh_lists(&self.lists, self.current);
        self.view.refresh_playlist(&self.lists[idx]);
        self.refresh_toolbar();
        Ok(())
    }

    pub fn unselect_current_list(&mut self) {
        if let Some(id) = self.current.take() {
            debug!(id, "playlist closed");
        }
        self.tps.clear_all_transactions();
        self.view.clear_playlist();
        self.view.refresh_lists(&self.lists, self.current);
        self.refresh_toolbar();
    }

    pub fn delete_list(&mut self, id: u64) -> Result<(), PlaylistError> {
        let idx = self.get_list_index(id).ok_or(PlaylistError::UnknownList(id))?;
        if self.current == Some(id) {
            self.unselect_current_list();
        }
        let removed = self.lists.remove(idx);
        info!(id, name = %removed.name, "playlist deleted");

        self.persist();
        self.view.refresh_lists(&self.lists, self.current);
        Ok(())
    }

    pub fn rename_list(&mut self, id: u64, name: &str) -> Result<(), PlaylistError> {
        let idx = self.get_list_index(id).ok_or(PlaylistError::UnknownList(id))?;
        self.lists[idx].name = name.to_string();
        self.sort_lists();
        info!(id, name, "playlist renamed");

        self.persist();
        self.view.refresh_lists(&self.lists, self.current);
        Ok(())
    }

    // === Transactions ===

    fn current_index(&self) -> Result<usize, PlaylistError> {
        let id = self.current.ok_or(PlaylistError::NoListLoaded)?;
        self.get_list_index(id).ok_or(PlaylistError::UnknownList(id))
    }

    /// Run `txn` against the loaded playlist and record it
    fn commit(&mut self, txn: Transaction) -> Result<(), PlaylistError> {
        let idx = self.current_index()?;
        let description = txn.description();
        self.tps.add_transaction(txn, &mut self.lists[idx])?;
        info!(transaction = %description, list = self.lists[idx].id, "transaction committed");

        self.after_change(idx);
        Ok(())
    }

    fn after_change(&mut self, idx: usize) {
        self.view.refresh_playlist(&self.lists[idx]);
        self.refresh_toolbar();
        self.persist();
    }

    pub fn add_add_song_transaction(&mut self) -> Result<(), PlaylistError> {
        self.commit(Transaction::add_song())
    }

    pub fn add_remove_song_transaction(&mut self, index: usize) -> Result<(), PlaylistError> {
        self.commit(Transaction::remove_song(index))
    }

    pub fn add_edit_song_transaction(&mut self, index: usize, song: Song) -> Result<(), PlaylistError> {
        let idx = self.current_index()?;
        let txn = Transaction::edit_song(&self.lists[idx], index, song)?;
        self.commit(txn)
    }

    /// Dropping a song onto itself records nothing
    pub fn add_move_song_transaction(&mut self, from: usize, to: usize) -> Result<(), PlaylistError> {
        if from == to {
            return Ok(());
        }
        self.commit(Transaction::move_song(from, to))
    }

    /// Ok(false) when there was nothing to undo
    pub fn undo(&mut self) -> Result<bool, PlaylistError> {
        // nothing loaded means an empty history
        if self.current.is_none() {
            return Ok(false);
        }
        let idx = self.current_index()?;
        let description = self.tps.peek_undo().map(|t| t.description());
        if !self.tps.undo(&mut self.lists[idx])? {
            return Ok(false);
        }
        info!(transaction = ?description, "transaction undone");
        self.after_change(idx);
        Ok(true)
    }

    /// Ok(false) when there was nothing to redo
    pub fn redo(&mut self) -> Result<bool, PlaylistError> {
        // nothing loaded means an empty history
        if self.current.is_none() {
            return Ok(false);
        }
        let idx = self.current_index()?;
        let description = self.tps.peek_redo().map(|t| t.description());
        if !self.tps.redo(&mut self.lists[idx])? {
            return Ok(false);
        }
        info!(transaction = ?description, "transaction redone");
        self.after_change(idx);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    /// View that records which refreshes happened
    #[derive(Clone, Default)]
    struct RecordingView {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl PlaylistView for RecordingView {
        fn refresh_lists(&mut self, lists: &[Playlist], _current: Option<u64>) {
            self.calls.borrow_mut().push(format!("lists:{}", lists.len()));
        }

        fn refresh_playlist(&mut self, playlist: &Playlist) {
            self.calls.borrow_mut().push(format!("playlist:{}", playlist.len()));
        }

        fn clear_playlist(&mut self) {
            self.calls.borrow_mut().push("clear".to_string());
        }

        fn update_toolbar(&mut self, state: &ToolbarState) {
            self.calls
                .borrow_mut()
                .push(format!("toolbar:{}:{}", state.can_undo, state.can_redo));
        }
    }

    fn song(title: &str) -> Song {
        Song::new(title, "artist", "id")
    }

    fn make_model() -> (PlaylistModel, RecordingView) {
        let view = RecordingView::default();
        let model = PlaylistModel::new(PlaylistStore::in_memory(), Box::new(view.clone()), None);
        (model, view)
    }

    fn titles(model: &PlaylistModel) -> Vec<String> {
        model
            .current_list()
            .map(|l| l.songs().iter().map(|s| s.title.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_lists_sorted_by_name() {
        let (mut model, _) = make_model();
        let b = model.add_new_list("B side", Vec::new()).unwrap();
        let a = model.add_new_list("A side", Vec::new()).unwrap();
        assert_eq!(model.get_list_index(a), Some(0));
        assert_eq!(model.get_list_index(b), Some(1));

        model.rename_list(a, "Z side").unwrap();
        assert_eq!(model.get_list_index(a), Some(1));
        assert_eq!(model.get_list(0).map(|l| l.name.as_str()), Some("B side"));
    }

    #[test]
    fn test_transactions_require_loaded_list() {
        let (mut model, _) = make_model();
        model.add_new_list("Mix", Vec::new()).unwrap();
        assert_eq!(model.add_add_song_transaction(), Err(PlaylistError::NoListLoaded));
        assert_eq!(model.undo(), Ok(false));
        assert_eq!(model.redo(), Ok(false));
        assert_eq!(model.get_playlist_size(), 0);
    }

    #[test]
    fn test_edit_undo_redo_through_model() {
        let (mut model, view) = make_model();
        let id = model.add_new_list("Mix", vec![song("A"), song("B"), song("C")]).unwrap();
        model.load_list(id).unwrap();
        view.calls.borrow_mut().clear();

        model.add_edit_song_transaction(1, song("X")).unwrap();
        assert_eq!(titles(&model), vec!["A", "X", "C"]);
        assert_eq!(
            *view.calls.borrow(),
            vec!["playlist:3".to_string(), "toolbar:true:false".to_string()]
        );

        assert_eq!(model.undo(), Ok(true));
        assert_eq!(titles(&model), vec!["A", "B", "C"]);
        assert!(model.has_transaction_to_redo());

        assert_eq!(model.redo(), Ok(true));
        assert_eq!(titles(&model), vec!["A", "X", "C"]);
        assert_eq!(model.redo(), Ok(false));
    }

    #[test]
    fn test_move_onto_itself_not_recorded() {
        let (mut model, _) = make_model();
        let id = model.add_new_list("Mix", vec![song("A"), song("B")]).unwrap();
        model.load_list(id).unwrap();

        model.add_move_song_transaction(1, 1).unwrap();
        assert!(!model.has_transaction_to_undo());

        model.add_move_song_transaction(0, 1).unwrap();
        assert_eq!(titles(&model), vec!["B", "A"]);
        assert!(model.has_transaction_to_undo());
    }

    #[test]
    fn test_switching_lists_clears_history() {
        let (mut model, _) = make_model();
        let first = model.add_new_list("First", vec![song("A")]).unwrap();
        let second = model.add_new_list("Second", vec![song("B")]).unwrap();

        model.load_list(first).unwrap();
        model.add_remove_song_transaction(0).unwrap();
        assert!(model.has_transaction_to_undo());

        model.load_list(second).unwrap();
        assert!(!model.has_transaction_to_undo());
        assert_eq!(model.undo(), Ok(false));
        assert_eq!(titles(&model), vec!["B"]);
    }

    #[test]
    fn test_delete_current_list_unloads() {
        let (mut model, view) = make_model();
        let id = model.add_new_list("Mix", vec![song("A")]).unwrap();
        model.load_list(id).unwrap();
        model.add_add_song_transaction().unwrap();

        model.delete_list(id).unwrap();
        assert!(!model.has_current_list());
        assert!(!model.has_transaction_to_undo());
        assert!(model.lists().is_empty());
        assert!(view.calls.borrow().contains(&"clear".to_string()));
        assert_eq!(model.delete_list(id), Err(PlaylistError::UnknownList(id)));
    }

    #[test]
    fn test_toolbar_labels() {
        let (mut model, _) = make_model();
        let id = model.add_new_list("Mix", vec![song("A")]).unwrap();
        model.load_list(id).unwrap();
        model.add_add_song_transaction().unwrap();
        model.add_remove_song_transaction(0).unwrap();
        model.undo().unwrap();

        let state = model.toolbar_state();
        assert!(state.has_list);
        assert_eq!(state.undo_label.as_deref(), Some("Add Song"));
        assert_eq!(state.redo_label.as_deref(), Some("Remove Song 1"));
    }

    #[test]
    fn test_failed_edit_leaves_state() {
        let (mut model, _) = make_model();
        let id = model.add_new_list("Mix", vec![song("A")]).unwrap();
        model.load_list(id).unwrap();

        assert!(model.add_remove_song_transaction(4).is_err());
        assert!(model.add_edit_song_transaction(4, song("X")).is_err());
        assert_eq!(titles(&model), vec!["A"]);
        assert!(!model.has_transaction_to_undo());
    }

    #[test]
    fn test_every_commit_is_saved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lists.json");
        let mut model = PlaylistModel::new(
            PlaylistStore::new(Some(path.clone())),
            Box::new(RecordingView::default()),
            None,
        );
        let id = model.add_new_list("Mix", vec![song("A")]).unwrap();
        model.load_list(id).unwrap();
        model.add_add_song_transaction().unwrap();

        let saved = PlaylistStore::new(Some(path.clone())).load().unwrap();
        assert_eq!(saved[0].len(), 2);

        model.undo().unwrap();
        let saved = PlaylistStore::new(Some(path)).load().unwrap();
        assert_eq!(saved[0].len(), 1);
    }

    #[test]
    fn test_load_lists_restores_ids() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lists.json");
        PlaylistStore::new(Some(path.clone()))
            .save(&[Playlist::new(5, "Old", vec![song("A")])])
            .unwrap();

        let mut model = PlaylistModel::new(
            PlaylistStore::new(Some(path)),
            Box::new(RecordingView::default()),
            None,
        );
        model.load_lists().unwrap();
        assert_eq!(model.lists().len(), 1);
        let id = model.add_new_list("New", Vec::new()).unwrap();
        assert_eq!(id, 6);
    }

    #[test]
    fn test_load_lists_rejects_unallocatable_id() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lists.json");
        PlaylistStore::new(Some(path.clone()))
            .save(&[Playlist::new(u64::MAX, "Old", Vec::new())])
            .unwrap();

        let mut model = PlaylistModel::new(
            PlaylistStore::new(Some(path)),
            Box::new(RecordingView::default()),
            None,
        );
        let err = model.load_lists().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(model.lists().is_empty());
    }

    #[test]
    fn test_add_new_list_when_ids_exhausted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lists.json");
        PlaylistStore::new(Some(path.clone()))
            .save(&[Playlist::new(u64::MAX - 1, "Old", Vec::new())])
            .unwrap();

        let mut model = PlaylistModel::new(
            PlaylistStore::new(Some(path)),
            Box::new(RecordingView::default()),
            None,
        );
        model.load_lists().unwrap();
        assert_eq!(model.add_new_list("New", Vec::new()), Err(PlaylistError::IdsExhausted));
        assert_eq!(model.lists().len(), 1);
    }
}
