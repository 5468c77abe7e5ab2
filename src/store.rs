use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::playlist::Playlist;

/// On-disk layout of the playlist library
#[derive(Debug, Default, Serialize, Deserialize)]
struct Library {
    lists: Vec<Playlist>,
}

/// Saves and restores every playlist as one JSON document.
/// Without a path nothing is persisted.
pub struct PlaylistStore {
    pub path: Option<PathBuf>,
}

impl PlaylistStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn in_memory() -> Self {
        Self { path: None }
    }

    pub fn file_name(&self) -> String {
        self.path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()
    }

    /// Load all playlists; a missing file is an empty library
    pub fn load(&self) -> io::Result<Vec<Playlist>> {
        let path = match &self.path {
            Some(path) => path,
            None => return Ok(Vec::new()),
        };
        if !path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(path)?);
        let library: Library = serde_json::from_reader(reader)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(library.lists)
    }

    pub fn save(&self, lists: &[Playlist]) -> io::Result<()> {
        let path = match &self.path {
            Some(path) => path,
            None => return Ok(()),
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let library = Library { lists: lists.to_vec() };
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &library)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        writer.flush()
    }
}
