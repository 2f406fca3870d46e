// src/generator.rs
//! Генератор карты: владеет сеткой и единственным источником случайности
//! и прогоняет этапы в фиксированном порядке:
//!
//! 1. шум → нормализованные высоты (с маской или искажением по стратегии)
//! 2. классификация высот в типы местности
//! 3. реки
//! 4. океанская кромка
//!
//! Все случайные числа берутся из одного `ChaCha8Rng`, засеянного при создании, в порядке
//! вызовов. Поэтому одинаковые `(width, height, seed, strategy)` дают побитово одинаковую карту.
//!
//! Поддерживаемый сценарий — одна карта на экземпляр. Повторный вызов [`MapGenerator::generate_map`]
//! перезаписывает ту же сетку, но продолжает уже сдвинутый поток случайных чисел, так что
//! результат второго вызова не совпадёт с картой свежего генератора с тем же сидом.

use crate::border::shape_border;
use crate::config::{MapGenerationParams, RiverSettings, Strategy, StrategySettings};
use crate::error::{MapGenError, Result};
use crate::grid::TerrainGrid;
use crate::heightmap::{Heightmap, generate_heightmap};
use crate::noise::NoiseField;
use crate::rivers::{RiverReport, carve_rivers};
use crate::terrain::Tile;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct MapGenerator {
    grid: TerrainGrid,
    rng: ChaCha8Rng,
    noise: NoiseField,
    river_count: usize,
    border_width: u32,
    rivers: RiverSettings,
    report: Option<RiverReport>,
}

impl MapGenerator {
    /// Генератор с настройками рек и кромки по умолчанию
    pub fn new(width: u32, height: u32, seed: i64) -> Result<Self> {
        Self::from_params(&MapGenerationParams {
            seed,
            width,
            height,
            ..MapGenerationParams::default()
        })
    }

    /// Создаёт генератор: выделяет сетку, засевает источник случайности
    /// и сразу тянет из него количество рек.
    pub fn from_params(params: &MapGenerationParams) -> Result<Self> {
        if params.width == 0 || params.height == 0 {
            return Err(MapGenError::InvalidDimension {
                width: params.width,
                height: params.height,
            });
        }
        params.rivers.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(params.seed as u64);
        let river_count = rng.gen_range(params.rivers.min_count..params.rivers.max_count);

        Ok(Self {
            grid: TerrainGrid::new(params.width, params.height),
            rng,
            noise: NoiseField::new(params.seed),
            river_count,
            border_width: params.border_width,
            rivers: params.rivers.clone(),
            report: None,
        })
    }

    /// Генерирует карту по константам стратегии
    pub fn generate_map(&mut self, strategy: Strategy) -> &TerrainGrid {
        tracing::debug!(?strategy, "generating map");
        self.generate_map_with(&strategy.settings())
    }

    /// Генерирует карту по произвольному набору констант
    pub fn generate_map_with(&mut self, settings: &StrategySettings) -> &TerrainGrid {
        let (width, height) = (self.grid.width, self.grid.height);

        let heightmap = generate_heightmap(width, height, &settings.elevation, &self.noise);
        for (tile, &elevation) in self.grid.tiles_mut().iter_mut().zip(&heightmap.data) {
            *tile = Tile::classified(elevation, &settings.thresholds);
        }

        let report = carve_rivers(&mut self.grid, self.river_count, &self.rivers, &mut self.rng);
        shape_border(&mut self.grid, self.border_width, &mut self.rng);

        let census = self.grid.census();
        tracing::info!(
            width,
            height,
            ocean = census.ocean,
            land = census.land,
            mountain = census.mountain,
            river = census.river,
            rivers_carved = report.carved,
            rivers_requested = report.requested,
            "map generated"
        );

        self.report = Some(report);
        &self.grid
    }

    pub fn grid(&self) -> &TerrainGrid {
        &self.grid
    }

    pub fn into_grid(self) -> TerrainGrid {
        self.grid
    }

    /// Сколько рек генератор пытается проложить (выбрано при создании)
    pub fn river_count(&self) -> usize {
        self.river_count
    }

    /// Отчёт о реках последнего запуска
    pub fn river_report(&self) -> Option<&RiverReport> {
        self.report.as_ref()
    }

    /// Карта высот текущей сетки (для превью)
    pub fn heightmap(&self) -> Heightmap {
        Heightmap {
            width: self.grid.width,
            height: self.grid.height,
            data: self.grid.tiles().iter().map(|t| t.elevation).collect(),
        }
    }
}
