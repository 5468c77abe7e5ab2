use tracing::debug;

use super::transaction::Transaction;
use crate::playlist::{Playlist, PlaylistError};

/// Undo/redo history for a single playlist.
///
/// `history[..cursor]` are done, `history[cursor..]` are the redo tail.
/// A stack is only meaningful against the playlist it was filled from;
/// clear it whenever a different list is loaded.
#[derive(Debug, Default)]
pub struct TransactionStack {
    history: Vec<Transaction>,
    cursor: usize,
    limit: Option<usize>,
}

impl TransactionStack {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            cursor: 0,
            limit: None,
        }
    }

    /// Keep at most `limit` transactions, dropping the oldest first
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::new()
        }
    }

    /// Run the transaction, then record it at the cursor (drops the redo tail).
    /// If it fails to run nothing is recorded.
    pub fn add_transaction(&mut self, mut txn: Transaction, playlist: &mut Playlist) -> Result<(), PlaylistError> {
        txn.do_transaction(playlist)?;

        if self.cursor < self.history.len() {
            debug!(discarded = self.history.len() - self.cursor, "truncating redo tail");
            self.history.truncate(self.cursor);
        }
        self.history.push(txn);
        self.cursor += 1;

        if let Some(limit) = self.limit {
            if self.history.len() > limit {
                let excess = self.history.len() - limit;
                self.history.drain(..excess);
                self.cursor -= excess;
            }
        }
        Ok(())
    }

    /// Undo the most recent done transaction. Ok(false) when there is none.
    pub fn undo(&mut self, playlist: &mut Playlist) -> Result<bool, PlaylistError> {
        if self.cursor == 0 {
            return Ok(false);
        }
        self.history[self.cursor - 1].undo_transaction(playlist)?;
        self.cursor -= 1;
        Ok(true)
    }

    /// Redo the first transaction in the redo tail. Ok(false) when there is none.
    pub fn redo(&mut self, playlist: &mut Playlist) -> Result<bool, PlaylistError> {
        if self.cursor == self.history.len() {
            return Ok(false);
        }
        self.history[self.cursor].do_transaction(playlist)?;
        self.cursor += 1;
        Ok(true)
    }

    pub fn has_transaction_to_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn has_transaction_to_redo(&self) -> bool {
        self.cursor < self.history.len()
    }

    /// Peek at the next undo transaction without applying it
    pub fn peek_undo(&self) -> Option<&Transaction> {
        self.cursor.checked_sub(1).and_then(|i| self.history.get(i))
    }

    /// Peek at the next redo transaction without applying it
    pub fn peek_redo(&self) -> Option<&Transaction> {
        self.history.get(self.cursor)
    }

    pub fn clear_all_transactions(&mut self) {
        self.history.clear();
        self.cursor = 0;
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    #[allow(dead_code)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
