use std::io::{self, Write};

use tracing::warn;
use unicode_width::UnicodeWidthStr;

use crate::playlist::Playlist;

/// What the edit toolbar should currently allow
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolbarState {
    pub has_list: bool,
    pub can_undo: bool,
    pub can_redo: bool,
    pub undo_label: Option<String>,
    pub redo_label: Option<String>,
}

/// Render collaborator driven by the model after every change
pub trait PlaylistView {
    /// Redraw the sidebar of playlist names
    fn refresh_lists(&mut self, lists: &[Playlist], current: Option<u64>);
    /// Redraw the song cards of the loaded playlist
    fn refresh_playlist(&mut self, playlist: &Playlist);
    /// Nothing is loaded any more
    fn clear_playlist(&mut self);
    fn update_toolbar(&mut self, state: &ToolbarState);
}

/// Pad `s` with spaces to `width` display columns
fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    let mut out = s.to_string();
    out.push_str(&" ".repeat(width.saturating_sub(w)));
    out
}

/// Plain text view that writes to any `Write` (stdout for the binary)
pub struct TextView<W: Write> {
    out: W,
}

impl<W: Write> TextView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[allow(dead_code)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_lists(&mut self, lists: &[Playlist], current: Option<u64>) -> io::Result<()> {
        writeln!(self.out, "Playlists:")?;
        if lists.is_empty() {
            writeln!(self.out, "  (none)")?;
        }
        for list in lists {
            let marker = if Some(list.id) == current { '*' } else { ' ' };
            writeln!(self.out, " {} [{}] {} ({} songs)", marker, list.id, list.name, list.len())?;
        }
        Ok(())
    }

    fn write_playlist(&mut self, playlist: &Playlist) -> io::Result<()> {
        writeln!(self.out, "== {} ==", playlist.name)?;
        if playlist.is_empty() {
            return writeln!(self.out, "  (empty)");
        }

        let num_width = playlist.len().to_string().len();
        let title_width = playlist
            .songs()
            .iter()
            .map(|s| UnicodeWidthStr::width(s.title.as_str()))
            .max()
            .unwrap_or(0);
        let artist_width = playlist
            .songs()
            .iter()
            .map(|s| UnicodeWidthStr::width(s.artist.as_str()))
            .max()
            .unwrap_or(0);

        for (i, song) in playlist.songs().iter().enumerate() {
            writeln!(
                self.out,
                " {:>num_width$}. {}  by {}  {}",
                i + 1,
                pad(&song.title, title_width),
                pad(&song.artist, artist_width),
                song.youtube_url(),
                num_width = num_width,
            )?;
        }
        Ok(())
    }

    fn write_toolbar(&mut self, state: &ToolbarState) -> io::Result<()> {
        if !state.has_list {
            return writeln!(self.out, "[no playlist loaded]");
        }
        let undo = match (&state.undo_label, state.can_undo) {
            (Some(label), true) => format!("undo: {}", label),
            _ => "undo: -".to_string(),
        };
        let redo = match (&state.redo_label, state.can_redo) {
            (Some(label), true) => format!("redo: {}", label),
            _ => "redo: -".to_string(),
        };
        writeln!(self.out, "[{}] [{}]", undo, redo)?;
        self.out.flush()
    }
}

impl<W: Write> PlaylistView for TextView<W> {
    fn refresh_lists(&mut self, lists: &[Playlist], current: Option<u64>) {
        if let Err(e) = self.write_lists(lists, current) {
            warn!(error = %e, "failed to render playlist names");
        }
    }

    fn refresh_playlist(&mut self, playlist: &Playlist) {
        if let Err(e) = self.write_playlist(playlist) {
            warn!(error = %e, playlist = playlist.id, "failed to render playlist");
        }
    }

    fn clear_playlist(&mut self) {
        if let Err(e) = writeln!(self.out, "(playlist closed)") {
            warn!(error = %e, "failed to render");
        }
    }

    fn update_toolbar(&mut self, state: &ToolbarState) {
        if let Err(e) = self.write_toolbar(state) {
            warn!(error = %e, "failed to render toolbar");
        }
    }
}
