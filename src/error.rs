//! Ошибки генератора карт
//!
//! Домен — чистые вычисления, поэтому настоящих ошибок немного: неверные размеры карты
//! и неверные настройки. Всё остальное (вырожденный диапазон шума, недобор рек) обрабатывается
//! внутри конвейера без ошибки.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapGenError {
    /// Ширина или высота карты равна нулю
    #[error("invalid map dimensions {width}x{height}: both must be greater than zero")]
    InvalidDimension { width: u32, height: u32 },

    #[error("unknown strategy '{0}' (expected default, centered or distributed)")]
    UnknownStrategy(String),

    /// Пустой диапазон количества рек `[min_count, max_count)`
    #[error("invalid river count range [{min_count}, {max_count})")]
    InvalidRiverSettings { min_count: usize, max_count: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to create image buffer {width}x{height}")]
    ImageBuffer { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, MapGenError>;
