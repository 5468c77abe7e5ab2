use serde::{Deserialize, Serialize};

use super::error::PlaylistError;
use super::song::Song;

/// A named, ordered list of songs.
///
/// The mutators here are the only way transactions touch a playlist. None of
/// them carries undo state of its own; a failed call leaves the songs as they were.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: u64,
    pub name: String,
    songs: Vec<Song>,
}

impl Playlist {
    pub fn new(id: u64, name: impl Into<String>, songs: Vec<Song>) -> Self {
        Self {
            id,
            name: name.into(),
            songs,
        }
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn song(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<(), PlaylistError> {
        if index < self.songs.len() {
            Ok(())
        } else {
            Err(PlaylistError::OutOfRange { index, len: self.songs.len() })
        }
    }

    /// Append the default song template
    pub fn add_song(&mut self) {
        self.songs.push(Song::default());
    }

    /// Remove and return the song at index
    pub fn remove_song(&mut self, index: usize) -> Result<Song, PlaylistError> {
        self.check_index(index)?;
        Ok(self.songs.remove(index))
    }

    /// Insert a song so that it ends up at index (index == len appends)
    pub fn insert_song(&mut self, index: usize, song: Song) -> Result<(), PlaylistError> {
        if index > self.songs.len() {
            return Err(PlaylistError::OutOfRange { index, len: self.songs.len() });
        }
        self.songs.insert(index, song);
        Ok(())
    }

    /// Replace the song at index in place
    pub fn edit_song(&mut self, index: usize, song: Song) -> Result<(), PlaylistError> {
        self.check_index(index)?;
        self.songs[index] = song;
        Ok(())
    }

    /// Take the song at `from` out and reinsert it at `to`
    pub fn move_song(&mut self, from: usize, to: usize) -> Result<(), PlaylistError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }
        let song = self.songs.remove(from);
        self.songs.insert(to, song);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_playlist(titles: &[&str]) -> Playlist {
        Playlist::new(
            1,
            "test",
            titles.iter().map(|t| Song::new(*t, "artist", "id")).collect(),
        )
    }

    fn titles(playlist: &Playlist) -> Vec<&str> {
        playlist.songs().iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_add_song_appends_template() {
        let mut playlist = make_playlist(&["A"]);
        playlist.add_song();
        assert_eq!(playlist.len(), 2);
        assert_eq!(playlist.song(1), Some(&Song::default()));
    }

    #[test]
    fn test_remove_song() {
        let mut playlist = make_playlist(&["A", "B", "C"]);
        let removed = playlist.remove_song(1).unwrap();
        assert_eq!(removed.title, "B");
        assert_eq!(titles(&playlist), vec!["A", "C"]);
    }

    #[test]
    fn test_remove_song_out_of_range() {
        let mut playlist = make_playlist(&["A"]);
        assert_eq!(
            playlist.remove_song(1),
            Err(PlaylistError::OutOfRange { index: 1, len: 1 })
        );
        assert_eq!(titles(&playlist), vec!["A"]);
    }

    #[test]
    fn test_insert_song_at_end() {
        let mut playlist = make_playlist(&["A"]);
        playlist.insert_song(1, Song::new("B", "", "")).unwrap();
        assert_eq!(titles(&playlist), vec!["A", "B"]);
        assert!(playlist.insert_song(5, Song::default()).is_err());
    }

    #[test]
    fn test_edit_song() {
        let mut playlist = make_playlist(&["A", "B"]);
        playlist.edit_song(0, Song::new("X", "", "")).unwrap();
        assert_eq!(titles(&playlist), vec!["X", "B"]);
        assert!(playlist.edit_song(2, Song::default()).is_err());
        assert_eq!(titles(&playlist), vec!["X", "B"]);
    }

    #[test]
    fn test_move_song_forward_and_back() {
        let mut playlist = make_playlist(&["A", "B", "C"]);
        playlist.move_song(0, 2).unwrap();
        assert_eq!(titles(&playlist), vec!["B", "C", "A"]);
        playlist.move_song(2, 0).unwrap();
        assert_eq!(titles(&playlist), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_move_song_same_index_is_noop() {
        let mut playlist = make_playlist(&["A", "B"]);
        playlist.move_song(1, 1).unwrap();
        assert_eq!(titles(&playlist), vec!["A", "B"]);
    }

    #[test]
    fn test_move_song_invalid_target_leaves_list() {
        let mut playlist = make_playlist(&["A", "B"]);
        assert!(playlist.move_song(0, 2).is_err());
        assert_eq!(titles(&playlist), vec!["A", "B"]);
    }
}
