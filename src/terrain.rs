use crate::config::Thresholds;
use serde::{Deserialize, Serialize};

/// Тип местности тайла
///
/// Порядок вариантов нужен только для отрисовки, генерация сравнивает типы на равенство.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum TerrainType {
    #[default]
    Ocean,
    Land,
    Mountain,
    River,
}

impl TerrainType {
    pub const ALL: [TerrainType; 4] = [
        TerrainType::Ocean,
        TerrainType::Land,
        TerrainType::Mountain,
        TerrainType::River,
    ];

    pub fn to_rgb(&self) -> [u8; 3] {
        match self {
            TerrainType::Ocean => [0, 0, 255],
            TerrainType::Land => [0, 128, 0],
            TerrainType::Mountain => [128, 128, 128],
            TerrainType::River => [0, 255, 255],
        }
    }

    /// Суша, по которой может пройти река
    #[inline]
    pub fn is_carvable(self) -> bool {
        matches!(self, TerrainType::Land | TerrainType::Mountain)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Tile {
    #[serde(rename = "type")]
    pub terrain: TerrainType,
    pub elevation: f32,
}

impl Tile {
    /// Тайл с типом, определённым по высоте
    pub fn classified(elevation: f32, thresholds: &Thresholds) -> Self {
        Self {
            terrain: classify(elevation, thresholds),
            elevation,
        }
    }
}

/// Назначает тип местности по нормализованной высоте
///
/// `< ocean` — океан, `< land` — суша, всё остальное — горы. Реки классификатор
/// не создаёт, их прокладывает отдельный проход.
#[must_use]
pub fn classify(elevation: f32, thresholds: &Thresholds) -> TerrainType {
    if elevation < thresholds.ocean {
        TerrainType::Ocean
    } else if elevation < thresholds.land {
        TerrainType::Land
    } else {
        TerrainType::Mountain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Strategy;

    #[test]
    fn default_thresholds() {
        let t = Strategy::Default.settings().thresholds;
        assert_eq!(classify(0.0, &t), TerrainType::Ocean);
        assert_eq!(classify(0.39, &t), TerrainType::Ocean);
        assert_eq!(classify(0.4, &t), TerrainType::Land);
        assert_eq!(classify(0.59, &t), TerrainType::Land);
        assert_eq!(classify(0.6, &t), TerrainType::Mountain);
        assert_eq!(classify(1.0, &t), TerrainType::Mountain);
    }

    #[test]
    fn distributed_thresholds() {
        let t = Strategy::DistributedContinents.settings().thresholds;
        assert_eq!(classify(0.57, &t), TerrainType::Ocean);
        assert_eq!(classify(0.58, &t), TerrainType::Land);
        assert_eq!(classify(0.75, &t), TerrainType::Mountain);
    }

    #[test]
    fn centered_thresholds_have_a_land_band() {
        let t = Strategy::CenteredContinents.settings().thresholds;
        assert_eq!(classify(0.2, &t), TerrainType::Ocean);
        assert_eq!(classify(0.5, &t), TerrainType::Land);
        assert_eq!(classify(0.66, &t), TerrainType::Mountain);
    }

    #[test]
    fn classification_is_monotonic_in_elevation() {
        let t = Strategy::Default.settings().thresholds;
        let mut previous = TerrainType::Ocean;
        for step in 0..=100 {
            let current = classify(step as f32 / 100.0, &t);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn only_land_and_mountain_are_carvable() {
        assert!(TerrainType::Land.is_carvable());
        assert!(TerrainType::Mountain.is_carvable());
        assert!(!TerrainType::Ocean.is_carvable());
        assert!(!TerrainType::River.is_carvable());
    }
}
