use serde::{Deserialize, Serialize};

/// A single song card in a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub artist: String,
    #[serde(rename = "youTubeId")]
    pub you_tube_id: String,
}

impl Song {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, you_tube_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            you_tube_id: you_tube_id.into(),
        }
    }

    pub fn youtube_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.you_tube_id)
    }
}

/// The template appended by "add song"
impl Default for Song {
    fn default() -> Self {
        Self::new("Untitled", "???", "dQw4w9WgXcQ")
    }
}
