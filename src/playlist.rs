pub mod song;
pub mod playlist;
pub mod error;

pub use error::PlaylistError;
pub use playlist::Playlist;
pub use song::Song;
