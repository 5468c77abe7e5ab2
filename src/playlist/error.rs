use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaylistError {
    #[error("song index {index} out of range (playlist has {len} songs)")]
    OutOfRange { index: usize, len: usize },
    #[error("no playlist with id {0}")]
    UnknownList(u64),
    #[error("no playlist loaded")]
    NoListLoaded,
    #[error("no playlist ids left")]
    IdsExhausted,
}
