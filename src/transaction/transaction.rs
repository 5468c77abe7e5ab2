use crate::playlist::{Playlist, PlaylistError, Song};

/// Represents a reversible edit to the loaded playlist.
///
/// Each variant carries only what it needs to reverse itself. The playlist is
/// borrowed per call and never stored, so a transaction cannot outlive the
/// list it was built against without the caller handing that list back in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    /// Append the default song; undo drops the last song
    AddSong,
    /// Remove the song at index (snapshot filled in on first do)
    RemoveSong {
        index: usize,
        removed_song: Option<Song>,
    },
    /// Overwrite the song at index (old_song is snapshotted at construction)
    EditSong {
        index: usize,
        old_song: Song,
        new_song: Song,
    },
    /// Take the song at `from` and reinsert it at `to`
    MoveSong { from: usize, to: usize },
}

impl Transaction {
    pub fn add_song() -> Self {
        Transaction::AddSong
    }

    pub fn remove_song(index: usize) -> Self {
        Transaction::RemoveSong { index, removed_song: None }
    }

    /// Build an edit, capturing the current song at index before anything changes
    pub fn edit_song(playlist: &Playlist, index: usize, new_song: Song) -> Result<Self, PlaylistError> {
        let old_song = playlist
            .song(index)
            .cloned()
            .ok_or(PlaylistError::OutOfRange { index, len: playlist.len() })?;
        Ok(Transaction::EditSong { index, old_song, new_song })
    }

    pub fn move_song(from: usize, to: usize) -> Self {
        Transaction::MoveSong { from, to }
    }

    /// Short label for logs and toolbar captions (song numbers are 1-based)
    pub fn description(&self) -> String {
        match self {
            Transaction::AddSong => "Add Song".to_string(),
            Transaction::RemoveSong { index, .. } => format!("Remove Song {}", index + 1),
            Transaction::EditSong { index, .. } => format!("Edit Song {}", index + 1),
            Transaction::MoveSong { from, to } => format!("Move Song {} → {}", from + 1, to + 1),
        }
    }

    pub fn do_transaction(&mut self, playlist: &mut Playlist) -> Result<(), PlaylistError> {
        match self {
            Transaction::AddSong => {
                playlist.add_song();
                Ok(())
            }
            Transaction::RemoveSong { index, removed_song } => {
                *removed_song = Some(playlist.remove_song(*index)?);
                Ok(())
            }
            Transaction::EditSong { index, new_song, .. } => {
                playlist.edit_song(*index, new_song.clone())
            }
            Transaction::MoveSong { from, to } => playlist.move_song(*from, *to),
        }
    }

    pub fn undo_transaction(&mut self, playlist: &mut Playlist) -> Result<(), PlaylistError> {
        match self {
            Transaction::AddSong => {
                // Drops whatever is last; assumes nothing was appended out of band
                let last = playlist
                    .len()
                    .checked_sub(1)
                    .ok_or(PlaylistError::OutOfRange { index: 0, len: 0 })?;
                playlist.remove_song(last).map(|_| ())
            }
            Transaction::RemoveSong { index, removed_song } => match removed_song {
                Some(song) => playlist.insert_song(*index, song.clone()),
                // never executed, nothing to put back
                None => Ok(()),
            },
            Transaction::EditSong { index, old_song, .. } => {
                playlist.edit_song(*index, old_song.clone())
            }
            Transaction::MoveSong { from, to } => playlist.move_song(*to, *from),
        }
    }
}
