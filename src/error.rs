use std::fmt;

use crate::texture::{ColorMode, TextureId};

/// Errors raised while building or driving the engine.
#[derive(Debug)]
pub enum EngineError {
    /// Image has the wrong side length, colour mode or byte count.
    TextureFormat {
        expected_size: u32,
        width: u32,
        height: u32,
        expected_mode: ColorMode,
        mode: ColorMode,
        detail: Option<String>,
    },
    /// A texture set was assembled without this identifier.
    MissingTexture(TextureId),
    /// Sprite marker without a rendering rule.
    UnknownSpriteKind(char),
    /// Map cell references a wall id that has no texture.
    UnknownWallId(u8),
    /// Map text could not be turned into a grid.
    MapFormat(String),
    /// Normalising a zero-length vector.
    DegenerateVector,
    /// Render configuration outside its valid range.
    InvalidConfig(String),
    /// Reading an asset from disk failed.
    Io(std::io::Error),
    /// An image file could not be decoded.
    Decode(image::ImageError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::TextureFormat {
                expected_size,
                width,
                height,
                expected_mode,
                mode,
                detail,
            } => {
                write!(
                    f,
                    "texture must be {expected_size}x{expected_size} {expected_mode:?}, got {width}x{height} {mode:?}"
                )?;
                if let Some(detail) = detail {
                    write!(f, " ({detail})")?;
                }
                Ok(())
            }
            EngineError::MissingTexture(id) => write!(f, "texture set has no {id:?} texture"),
            EngineError::UnknownSpriteKind(c) => write!(f, "unknown sprite kind '{c}'"),
            EngineError::UnknownWallId(id) => write!(f, "no texture for wall id {id}"),
            EngineError::MapFormat(msg) => write!(f, "bad map: {msg}"),
            EngineError::DegenerateVector => write!(f, "cannot normalize a zero-length vector"),
            EngineError::InvalidConfig(msg) => write!(f, "invalid render config: {msg}"),
            EngineError::Io(e) => write!(f, "IO error: {e}"),
            EngineError::Decode(e) => write!(f, "image decode error: {e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Io(e) => Some(e),
            EngineError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Io(e)
    }
}

impl From<image::ImageError> for EngineError {
    fn from(e: image::ImageError) -> Self {
        EngineError::Decode(e)
    }
}
