//! Error types for asset loading and configuration.
//!
//! The render pipeline itself never fails; these errors only come out of
//! engine construction.

use std::fmt;

/// Failure while building the model roster or the background patterns.
#[derive(Debug)]
pub enum LoadError {
    /// An embedded OBJ asset could not be parsed.
    Obj { name: &'static str, source: tobj::LoadError },
    /// An embedded pattern image could not be decoded.
    Image { name: &'static str, source: image::ImageError },
    /// A pattern image is not `PATTERN_SIZE` x `PATTERN_SIZE`.
    PatternSize { name: &'static str, width: u32, height: u32 },
    /// A model violates one of its structural invariants.
    InvalidModel { name: String, reason: ModelFault },
}

/// The invariant a model broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelFault {
    NoFaces,
    TooManyVertices(usize),
    TooManyPolygons(usize),
    IndexOutOfRange { face: usize, index: u32 },
    CoordinateRange { vertex: usize, value: i32 },
    MixedArity { face: usize, arity: u32 },
    UnsupportedArity(u32),
    ColorCount { colors: usize, faces: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    EmptyScreen,
    ScreenTooLarge { width: u32, height: u32 },
    BandHeight { band_height: u32, height: u32 },
    NoStars,
    StarSpeed(i32),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Obj { name, source } => write!(f, "failed to parse model {name}: {source}"),
            LoadError::Image { name, source } => {
                write!(f, "failed to decode pattern {name}: {source}")
            }
            LoadError::PatternSize {
                name,
                width,
                height,
            } => write!(f, "pattern {name} is {width}x{height}, expected 32x32"),
            LoadError::InvalidModel { name, reason } => {
                write!(f, "model {name} is invalid: {reason}")
            }
        }
    }
}

impl fmt::Display for ModelFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelFault::NoFaces => write!(f, "no faces"),
            ModelFault::TooManyVertices(n) => write!(f, "{n} vertices exceeds capacity"),
            ModelFault::TooManyPolygons(n) => write!(f, "{n} polygons exceeds capacity"),
            ModelFault::IndexOutOfRange { face, index } => {
                write!(f, "face {face} references missing vertex {index}")
            }
            ModelFault::CoordinateRange { vertex, value } => {
                write!(f, "vertex {vertex} coordinate {value} is outside the fixed-point range")
            }
            ModelFault::MixedArity { face, arity } => {
                write!(f, "face {face} has {arity} vertices, model arity differs")
            }
            ModelFault::UnsupportedArity(arity) => {
                write!(f, "{arity}-sided faces are not supported")
            }
            ModelFault::ColorCount { colors, faces } => {
                write!(f, "{colors} colors for {faces} faces")
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyScreen => write!(f, "screen has zero area"),
            ConfigError::ScreenTooLarge { width, height } => {
                write!(f, "screen {width}x{height} exceeds the fixed-point range")
            }
            ConfigError::BandHeight {
                band_height,
                height,
            } => write!(f, "band height {band_height} must be in 1..={height}"),
            ConfigError::NoStars => write!(f, "starfield needs at least one star"),
            ConfigError::StarSpeed(speed) => write!(f, "star speed {speed} must be positive"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Obj { source, .. } => Some(source),
            LoadError::Image { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl std::error::Error for ModelFault {}

impl std::error::Error for ConfigError {}

/// Anything that can stop [`Engine`](crate::Engine) construction.
#[derive(Debug)]
pub enum EngineError {
    Config(ConfigError),
    Load(LoadError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Config(e) => write!(f, "invalid configuration: {e}"),
            EngineError::Load(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Config(e) => Some(e),
            EngineError::Load(e) => Some(e),
        }
    }
}

impl From<ConfigError> for EngineError {
    fn from(e: ConfigError) -> Self {
        EngineError::Config(e)
    }
}

impl From<LoadError> for EngineError {
    fn from(e: LoadError) -> Self {
        EngineError::Load(e)
    }
}
