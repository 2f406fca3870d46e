use crate::config::{ElevationSettings, Shaping};
use crate::error::{MapGenError, Result};
use crate::noise::{NoiseField, WARP_DECORRELATION_OFFSET};
use image::{ImageBuffer, Luma};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::path::Path;

/// Высота, которую получает вся карта, если шум не дал никакого разброса
pub const FLAT_ELEVATION: f32 = 0.5;

/// Двумерная карта высот: после нормализации значения от 0.0 (дно) до 1.0 (вершины)
#[derive(Debug, Clone)]
pub struct Heightmap {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f32>,
}

impl Heightmap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; (width as usize) * (height as usize)],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.data[(y as usize) * (self.width as usize) + x as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        self.data[(y as usize) * (self.width as usize) + x as usize] = value;
    }

    /// Минимум и максимум по всей карте
    pub fn extremes(&self) -> (f32, f32) {
        let min = self.data.iter().fold(f32::INFINITY, |a, &b| a.min(b));
        let max = self.data.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
        (min, max)
    }

    /// Линейно переводит значения в `[0, 1]`: минимум карты в 0, максимум в 1.
    ///
    /// Если разброса нет (`max == min`), вся карта получает [`FLAT_ELEVATION`]
    /// и возвращается `false`.
    pub fn normalize(&mut self) -> bool {
        let (min_h, max_h) = self.extremes();
        if max_h > min_h {
            let range = max_h - min_h;
            for h in &mut self.data {
                *h = (*h - min_h) / range;
            }
            true
        } else {
            tracing::warn!(min_h, max_h, "degenerate elevation range, using flat elevation");
            self.data.fill(FLAT_ELEVATION);
            false
        }
    }

    /// Радиальная маска: умножает высоту на `1 - d²`, где `d` — расстояние до центра карты,
    /// нормированное по половине каждой стороны и ограниченное единицей.
    ///
    /// Множитель лежит в `[0, 1]`, поэтому нормализованная карта остаётся в `[0, 1]`.
    pub fn apply_radial_mask(&mut self) {
        let width = self.width as usize;
        let center_x = (self.width as f32 - 1.0) / 2.0;
        let center_y = (self.height as f32 - 1.0) / 2.0;
        let half_w = self.width as f32 / 2.0;
        let half_h = self.height as f32 / 2.0;

        for (i, h) in self.data.iter_mut().enumerate() {
            let dx = ((i % width) as f32 - center_x) / half_w;
            let dy = ((i / width) as f32 - center_y) / half_h;
            let d = (dx * dx + dy * dy).sqrt().min(1.0);
            *h *= 1.0 - d * d;
        }
    }

    pub fn to_grayscale_image(&self) -> Vec<u8> {
        #[cfg(feature = "parallel")]
        let pixels = self.data.par_iter();
        #[cfg(not(feature = "parallel"))]
        let pixels = self.data.iter();

        pixels.map(|&v| (v.clamp(0.0, 1.0) * 255.0) as u8).collect()
    }

    pub fn save_as_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let img: ImageBuffer<Luma<u8>, Vec<u8>> =
            ImageBuffer::from_raw(self.width, self.height, self.to_grayscale_image()).ok_or(
                MapGenError::ImageBuffer {
                    width: self.width,
                    height: self.height,
                },
            )?;
        img.save(path)?;
        Ok(())
    }
}

/// Сырой многооктавный шум без нормализации
///
/// Каждая октава удваивает частоту и делит амплитуду пополам. Для `Shaping::Warped`
/// координаты выборки каждой октавы смещаются двумя дополнительными выборками шума
/// на той же частоте.
pub fn synthesize_elevation(
    width: u32,
    height: u32,
    settings: &ElevationSettings,
    noise: &NoiseField,
) -> Heightmap {
    let warp = match settings.shaping {
        Shaping::Warped { amount } => Some(amount),
        Shaping::Plain | Shaping::Radial => None,
    };
    let total = (width as usize) * (height as usize);
    let w = width as usize;

    let cell = |i: usize| {
        let x = (i % w) as f32;
        let y = (i / w) as f32;

        let mut frequency = settings.frequency;
        let mut amplitude = settings.amplitude;
        let mut value = 0.0;

        for _ in 0..settings.octaves {
            let (sx, sy) = match warp {
                Some(amount) => {
                    let offset_x = noise.sample(x, y, frequency) * amount;
                    let offset_y =
                        noise.sample(x, y + WARP_DECORRELATION_OFFSET, frequency) * amount;
                    (x + offset_x, y + offset_y)
                }
                None => (x, y),
            };
            value += noise.sample(sx, sy, frequency) * amplitude;
            frequency *= 2.0;
            amplitude *= 0.5;
        }
        value
    };

    #[cfg(feature = "parallel")]
    let data: Vec<f32> = (0..total).into_par_iter().map(cell).collect();
    #[cfg(not(feature = "parallel"))]
    let data: Vec<f32> = (0..total).map(cell).collect();

    Heightmap {
        width,
        height,
        data,
    }
}

/// Генерирует нормализованную карту высот для заданных настроек
pub fn generate_heightmap(
    width: u32,
    height: u32,
    settings: &ElevationSettings,
    noise: &NoiseField,
) -> Heightmap {
    let mut heightmap = synthesize_elevation(width, height, settings, noise);

    let (min_h, max_h) = heightmap.extremes();
    tracing::debug!(min_h, max_h, octaves = settings.octaves, "raw elevation synthesized");

    heightmap.normalize();

    if matches!(settings.shaping, Shaping::Radial) {
        heightmap.apply_radial_mask();
    }

    heightmap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Strategy;

    fn all_strategies() -> [Strategy; 3] {
        [
            Strategy::Default,
            Strategy::CenteredContinents,
            Strategy::DistributedContinents,
        ]
    }

    #[test]
    fn normalized_elevation_spans_unit_range() {
        let noise = NoiseField::new(11);
        let settings = Strategy::Default.settings().elevation;
        let map = generate_heightmap(64, 48, &settings, &noise);

        let (min_h, max_h) = map.extremes();
        assert_eq!(min_h, 0.0);
        assert_eq!(max_h, 1.0);
    }

    #[test]
    fn every_strategy_stays_in_unit_range() {
        let noise = NoiseField::new(2024);
        for strategy in all_strategies() {
            let settings = strategy.settings().elevation;
            let map = generate_heightmap(50, 30, &settings, &noise);
            assert!(
                map.data.iter().all(|h| (0.0..=1.0).contains(h)),
                "{strategy:?} produced out-of-range elevation"
            );
        }
    }

    #[test]
    fn zero_octaves_falls_back_to_flat() {
        let noise = NoiseField::new(1);
        let mut settings = Strategy::Default.settings().elevation;
        settings.octaves = 0;
        let map = generate_heightmap(8, 8, &settings, &noise);
        assert!(map.data.iter().all(|&h| h == FLAT_ELEVATION));
    }

    #[test]
    fn zero_amplitude_falls_back_to_flat() {
        let noise = NoiseField::new(1);
        let mut settings = Strategy::DistributedContinents.settings().elevation;
        settings.amplitude = 0.0;
        let map = generate_heightmap(8, 8, &settings, &noise);
        assert!(map.data.iter().all(|h| !h.is_nan()));
        assert!(map.data.iter().all(|&h| h == FLAT_ELEVATION));
    }

    #[test]
    fn radial_mask_zeroes_corners_and_keeps_center() {
        let mut map = Heightmap::new(9, 9);
        map.data.fill(1.0);
        map.apply_radial_mask();

        assert_eq!(map.get(0, 0), 0.0);
        assert_eq!(map.get(8, 8), 0.0);
        assert_eq!(map.get(4, 4), 1.0);
        assert!(map.get(2, 4) < map.get(3, 4));
    }

    #[test]
    fn warping_changes_the_field() {
        let noise = NoiseField::new(5);
        let mut plain = Strategy::DistributedContinents.settings().elevation;
        let warped = plain;
        plain.shaping = Shaping::Plain;

        let a = synthesize_elevation(32, 32, &plain, &noise);
        let b = synthesize_elevation(32, 32, &warped, &noise);
        assert_ne!(a.data, b.data);
    }

    #[test]
    fn grayscale_has_one_byte_per_cell() {
        let mut map = Heightmap::new(4, 3);
        map.set(1, 2, 1.0);
        let pixels = map.to_grayscale_image();
        assert_eq!(pixels.len(), 12);
        assert_eq!(pixels[2 * 4 + 1], 255);
        assert_eq!(pixels[0], 0);
    }
}
