//! Error type shared by the surface engine, camera and configuration layer.

/// Errors raised when configuration or per-frame inputs are unusable
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum WaveError {
    #[error("invalid grid dimension: {0}")]
    InvalidDimension(String),

    #[error("invalid zoom {0}: zoom must be finite and greater than zero")]
    InvalidZoom(f32),

    #[error("invalid wave parameter: {0}")]
    InvalidWaveParameter(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),
}

impl WaveError {
    pub fn dimension<T: ToString>(msg: T) -> Self {
        WaveError::InvalidDimension(msg.to_string())
    }

    pub fn wave_parameter<T: ToString>(msg: T) -> Self {
        WaveError::InvalidWaveParameter(msg.to_string())
    }

    pub fn color<T: ToString>(msg: T) -> Self {
        WaveError::InvalidColor(msg.to_string())
    }
}
