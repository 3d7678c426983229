//! Error types for lumguard operations.
//!
//! The controller talks to four kinds of host collaborators, and each one
//! has its own failure type:
//!
//! - [`DeviceError`] - the display settings store (read/write gain)
//! - [`InputError`] - the action/binding system
//! - [`GraphicsError`] - the compositor frame used for luminance sampling
//! - [`CueError`] - audio feedback
//!
//! The first three are fatal: they mean the host runtime is unusable and the
//! controller must stop after running shutdown recovery. They convert into
//! the umbrella [`ControlError`] with `?`. [`CueError`] has no conversion
//! into [`ControlError`]; callers log it and move on.
//!
//! # Usage
//!
//! ```rust
//! use lumguard_core::{ControlError, DeviceError, Result};
//!
//! fn read_gain(reachable: bool) -> Result<f32> {
//!     if !reachable {
//!         return Err(DeviceError::Unreachable("settings store offline".into()).into());
//!     }
//!     Ok(1.0)
//! }
//!
//! let err = read_gain(false).unwrap_err();
//! assert!(matches!(err, ControlError::Device(_)));
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`ControlError`] as the error type.
pub type Result<T> = std::result::Result<T, ControlError>;

/// Failure of the display gain settings store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeviceError {
    /// The settings store could not be reached at all.
    #[error("display settings unreachable: {0}")]
    Unreachable(String),

    /// Reading the current gain failed.
    #[error("failed to get display brightness: {0}")]
    Read(String),

    /// Writing a new gain failed.
    #[error("failed to set display brightness to {gain:.3}: {reason}")]
    Write {
        /// Perceptual gain that was being written
        gain: f32,
        /// Failure reason reported by the store
        reason: String,
    },
}

/// Failure of the input action system.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// The action has no valid binding.
    #[error("invalid binding for action {action}: {reason}")]
    InvalidBinding {
        /// Action name
        action: &'static str,
        /// Failure reason
        reason: String,
    },

    /// Updating the action state for this tick failed.
    #[error("failed to update action state: {0}")]
    Update(String),
}

/// Failure while acquiring or reducing a frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphicsError {
    /// The shared frame resource could not be locked.
    #[error("failed to lock shared frame for {eye} eye: {reason}")]
    LockFailed {
        /// Eye name
        eye: &'static str,
        /// Failure reason
        reason: String,
    },

    /// Frame buffer dimensions are unusable.
    #[error("invalid frame dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Frame width
        width: u32,
        /// Frame height
        height: u32,
        /// Why the dimensions were rejected
        reason: String,
    },
}

/// Failure to play an audio cue. Never fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CueError {
    /// No sound asset is configured or it could not be found.
    #[error("missing sound asset for cue {cue}: {path}")]
    MissingAsset {
        /// Cue name
        cue: &'static str,
        /// Configured asset path
        path: String,
    },

    /// The audio backend refused to play.
    #[error("failed to play cue {cue}: {reason}")]
    Playback {
        /// Cue name
        cue: &'static str,
        /// Failure reason
        reason: String,
    },
}

/// Configuration loading and saving errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or written.
    #[error("failed to access configuration <{path}>: {source}")]
    Io {
        /// Configuration path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// JSON was malformed.
    #[error("failed to parse configuration <{path}>: {source}")]
    Parse {
        /// Configuration path
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },
}

/// Fatal controller error.
///
/// Every variant terminates the run; the caller still performs shutdown
/// recovery before exiting.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    /// Display settings store failure.
    #[error(transparent)]
    Device(#[from] DeviceError),

    /// Input system failure.
    #[error(transparent)]
    Input(#[from] InputError),

    /// Frame acquisition failure.
    #[error(transparent)]
    Graphics(#[from] GraphicsError),
}

impl ControlError {
    /// Short category name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Device(_) => "device",
            Self::Input(_) => "input",
            Self::Graphics(_) => "graphics",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_error_conversion() {
        let err: ControlError = DeviceError::Read("timeout".into()).into();
        assert_eq!(err.kind(), "device");
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_write_error_message() {
        let err = DeviceError::Write {
            gain: 0.5,
            reason: "locked".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("0.500"));
        assert!(msg.contains("locked"));
    }

    #[test]
    fn test_graphics_error_kind() {
        let err: ControlError = GraphicsError::LockFailed {
            eye: "left",
            reason: "busy".into(),
        }
        .into();
        assert_eq!(err.kind(), "graphics");
        assert!(err.to_string().contains("left"));
    }

    #[test]
    fn test_input_error_kind() {
        let err: ControlError = InputError::InvalidBinding {
            action: "toggle_reset",
            reason: "no binding".into(),
        }
        .into();
        assert_eq!(err.kind(), "input");
        assert!(err.to_string().contains("toggle_reset"));
    }

    #[test]
    fn test_cue_error_display() {
        let err = CueError::MissingAsset {
            cue: "activate",
            path: "activate.wav".into(),
        };
        assert!(err.to_string().contains("activate.wav"));
    }
}
