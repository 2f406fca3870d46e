// src/config.rs
//! Конфигурация генерации карты
//!
//! Этот модуль определяет все параметры, управляющие процедурной генерацией:
//! - Стратегии формирования рельефа (обычная, центральный континент, распределённые континенты)
//! - Константы шума и пороги классификации для каждой стратегии
//! - Параметры рек и океанской кромки
//!
//! Параметры запуска поддерживают загрузку из TOML-файлов.

use crate::error::{MapGenError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Стратегия формирования рельефа
///
/// Определяет, как строится поле высот и какими порогами оно режется на типы местности.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Strategy {
    /// Многооктавный шум без масок
    #[default]
    Default,
    /// Один материк в центре карты: радиальная маска прижимает высоты к нулю у краёв
    CenteredContinents,
    /// Неровные континенты по всей карте за счёт искажения координат (domain warping)
    DistributedContinents,
}

impl Strategy {
    /// Возвращает константы шума и пороги для данной стратегии.
    ///
    /// Пороги подобраны под распределение высот своей стратегии и между стратегиями
    /// не взаимозаменяемы.
    ///
    /// # Примеры
    /// ```
    /// use tilemap_gen::config::{Shaping, Strategy};
    /// let settings = Strategy::DistributedContinents.settings();
    /// assert_eq!(settings.elevation.octaves, 6);
    /// assert!(matches!(settings.elevation.shaping, Shaping::Warped { .. }));
    /// ```
    #[must_use]
    pub fn settings(self) -> StrategySettings {
        match self {
            Strategy::Default => StrategySettings {
                elevation: ElevationSettings {
                    frequency: 0.04,
                    amplitude: 1.0,
                    octaves: 5,
                    shaping: Shaping::Plain,
                },
                thresholds: Thresholds {
                    ocean: 0.4,
                    land: 0.6,
                },
            },
            Strategy::CenteredContinents => StrategySettings {
                elevation: ElevationSettings {
                    frequency: 0.03,
                    amplitude: 1.0,
                    octaves: 5,
                    shaping: Shaping::Radial,
                },
                // Маска уводит края к нулю, поэтому океанский порог ниже, чем у обычной стратегии
                thresholds: Thresholds {
                    ocean: 0.35,
                    land: 0.65,
                },
            },
            Strategy::DistributedContinents => StrategySettings {
                elevation: ElevationSettings {
                    frequency: 0.015,
                    amplitude: 1.0,
                    octaves: 6,
                    shaping: Shaping::Warped { amount: 40.0 },
                },
                thresholds: Thresholds {
                    ocean: 0.58,
                    land: 0.75,
                },
            },
        }
    }
}

impl FromStr for Strategy {
    type Err = MapGenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Strategy::Default),
            "centered" | "centered-continents" | "centeredcontinents" => {
                Ok(Strategy::CenteredContinents)
            }
            "distributed" | "distributed-continents" | "distributedcontinents" => {
                Ok(Strategy::DistributedContinents)
            }
            _ => Err(MapGenError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Способ формирования поля высот
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shaping {
    /// Координаты выборки совпадают с координатами клетки
    Plain,
    /// После нормализации высота умножается на `1 - d²`, где `d` — расстояние до центра
    Radial,
    /// Координаты выборки смещаются шумом, умноженным на `amount` (в клетках)
    Warped { amount: f32 },
}

/// Параметры многооктавного шума
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationSettings {
    /// Частота первой октавы; каждая следующая удваивает её
    pub frequency: f32,
    /// Амплитуда первой октавы; каждая следующая делит её пополам
    pub amplitude: f32,
    pub octaves: u32,
    pub shaping: Shaping,
}

/// Пороги классификации: `< ocean` — океан, `< land` — суша, иначе горы
///
/// Инвариант: `ocean <= land`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub ocean: f32,
    pub land: f32,
}

/// Полный набор констант одной стратегии
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategySettings {
    pub elevation: ElevationSettings,
    pub thresholds: Thresholds,
}

/// Настройки рек
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiverSettings {
    /// Нижняя граница (включительно) случайного числа рек
    #[serde(default = "default_min_count")]
    pub min_count: usize,

    /// Верхняя граница (исключительно) случайного числа рек
    #[serde(default = "default_max_count")]
    pub max_count: usize,

    /// Сколько раз пытаться найти горный исток, прежде чем сдаться
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Максимальная длина одной реки в шагах
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

fn default_min_count() -> usize {
    100
}
fn default_max_count() -> usize {
    300
}
fn default_max_attempts() -> usize {
    3000
}
fn default_max_length() -> usize {
    200
}

impl RiverSettings {
    pub fn validate(&self) -> Result<()> {
        if self.min_count >= self.max_count {
            return Err(MapGenError::InvalidRiverSettings {
                min_count: self.min_count,
                max_count: self.max_count,
            });
        }
        Ok(())
    }
}

impl Default for RiverSettings {
    fn default() -> Self {
        Self {
            min_count: 100,
            max_count: 300,
            max_attempts: 3000,
            max_length: 200,
        }
    }
}

/// Основные параметры генерации карты
///
/// Полная конфигурация для генерации одной карты. Поддерживает загрузку из TOML-файлов.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapGenerationParams {
    /// Сид генератора (любое значение, включая отрицательные)
    pub seed: i64,

    /// Ширина карты в тайлах (по умолчанию 126)
    #[serde(default = "default_width")]
    pub width: u32,

    /// Высота карты в тайлах (по умолчанию 126)
    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default)]
    pub strategy: Strategy,

    /// Ширина океанской кромки в тайлах (0 = без кромки)
    #[serde(default = "default_border_width")]
    pub border_width: u32,

    #[serde(default)]
    pub rivers: RiverSettings,
}

impl MapGenerationParams {
    /// Загружает параметры из TOML-файла
    ///
    /// # Пример
    /// ```toml
    /// # map.toml
    /// seed = 42
    /// width = 256
    /// height = 128
    /// strategy = "DistributedContinents"
    ///
    /// [rivers]
    /// max_length = 150
    /// ```
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let params: Self = toml::from_str(contents)?;
        Ok(params)
    }
}

fn default_width() -> u32 {
    126
}
fn default_height() -> u32 {
    126
}
fn default_border_width() -> u32 {
    5
}

impl Default for MapGenerationParams {
    fn default() -> Self {
        Self {
            seed: 0,
            width: 126,
            height: 126,
            strategy: Strategy::Default,
            border_width: 5,
            rivers: RiverSettings::default(),
        }
    }
}
