//! Hand a generated clip to the platform's audio player.
//!
//! No decoding happens in-process: the OS default handler for the file type
//! (or URL) plays the clip with its own transport controls.

use std::path::PathBuf;

use thiserror::Error;

use crate::tts::AudioLocation;

#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The clip was deleted (or never written) before the user pressed play.
    #[error("audio file not found: {}", .0.display())]
    Missing(PathBuf),

    /// The OS refused to launch a handler.
    #[error("could not launch audio player: {0}")]
    Launch(#[from] std::io::Error),
}

/// Open `location` in the default player without blocking the caller.
pub fn open_audio(location: &AudioLocation) -> Result<(), PlaybackError> {
    match location {
        AudioLocation::File(path) => {
            if !path.exists() {
                return Err(PlaybackError::Missing(path.clone()));
            }
            log::info!("playback: opening {}", path.display());
            open::that_detached(path)?;
        }
        AudioLocation::Url(url) => {
            log::info!("playback: opening {url}");
            open::that_detached(url)?;
        }
    }
    Ok(())
}
