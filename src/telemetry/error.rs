use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("track file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("invalid track in {file}: {message}")]
    InvalidTrack { file: String, message: String },
}
