// src/grid.rs
//! Сетка тайлов — результат генерации
//!
//! Плотный массив `width × height`, индекс вычисляется как `y * width + x`.
//! Размеры фиксируются при создании и дальше не меняются.
//!
//! Кроме доступа к тайлам, модуль умеет:
//! - считать количество тайлов каждого типа ([`TerrainCensus`])
//! - рисовать карту в PNG, где каждый тайл — квадрат `tile_size × tile_size`

use crate::error::{MapGenError, Result};
use crate::terrain::{TerrainType, Tile};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainGrid {
    pub width: u32,
    pub height: u32,
    tiles: Vec<Tile>,
}

/// Количество тайлов каждого типа
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainCensus {
    pub ocean: usize,
    pub land: usize,
    pub mountain: usize,
    pub river: usize,
}

impl TerrainCensus {
    pub fn get(&self, terrain: TerrainType) -> usize {
        match terrain {
            TerrainType::Ocean => self.ocean,
            TerrainType::Land => self.land,
            TerrainType::Mountain => self.mountain,
            TerrainType::River => self.river,
        }
    }

    pub fn total(&self) -> usize {
        self.ocean + self.land + self.mountain + self.river
    }
}

impl TerrainGrid {
    /// Создаёт сетку, заполненную тайлами по умолчанию (океан, высота 0)
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::default(); (width as usize) * (height as usize)],
        }
    }

    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    /// Тайл по координатам; паникует за пределами сетки
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> &Tile {
        &self.tiles[self.index(x, y)]
    }

    #[inline]
    pub fn get_mut(&mut self, x: u32, y: u32) -> &mut Tile {
        let idx = self.index(x, y);
        &mut self.tiles[idx]
    }

    /// Тайл по координатам или `None` за пределами сетки
    pub fn tile(&self, x: i64, y: i64) -> Option<&Tile> {
        if self.in_bounds(x, y) {
            Some(self.get(x as u32, y as u32))
        } else {
            None
        }
    }

    /// Перезаписывает тип одного тайла после генерации (правки во время игры).
    ///
    /// Возвращает `false`, если координаты вне сетки. Генератор этим методом не пользуется.
    pub fn set_terrain(&mut self, x: u32, y: u32, terrain: TerrainType) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.get_mut(x, y).terrain = terrain;
        true
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    pub fn census(&self) -> TerrainCensus {
        let mut census = TerrainCensus::default();
        for tile in &self.tiles {
            match tile.terrain {
                TerrainType::Ocean => census.ocean += 1,
                TerrainType::Land => census.land += 1,
                TerrainType::Mountain => census.mountain += 1,
                TerrainType::River => census.river += 1,
            }
        }
        census
    }

    /// Рисует карту: каждый тайл — залитый квадрат `tile_size × tile_size` своего цвета
    pub fn render(&self, tile_size: u32) -> RgbaImage {
        let size = tile_size.max(1);
        let mut img = RgbaImage::new(self.width * size, self.height * size);

        for y in 0..self.height {
            for x in 0..self.width {
                let [r, g, b] = self.get(x, y).terrain.to_rgb();
                draw_filled_rect_mut(
                    &mut img,
                    Rect::at((x * size) as i32, (y * size) as i32).of_size(size, size),
                    Rgba([r, g, b, 255]),
                );
            }
        }
        img
    }

    pub fn save_as_png(&self, path: impl AsRef<Path>, tile_size: u32) -> Result<()> {
        if self.tiles.is_empty() {
            return Err(MapGenError::ImageBuffer {
                width: self.width,
                height: self.height,
            });
        }
        self.render(tile_size).save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_row_major() {
        let grid = TerrainGrid::new(5, 3);
        assert_eq!(grid.index(0, 0), 0);
        assert_eq!(grid.index(4, 0), 4);
        assert_eq!(grid.index(0, 1), 5);
        assert_eq!(grid.index(4, 2), 14);
        assert_eq!(grid.tiles().len(), 15);
    }

    #[test]
    fn tile_lookup_is_bounds_checked() {
        let grid = TerrainGrid::new(4, 4);
        assert!(grid.tile(0, 0).is_some());
        assert!(grid.tile(3, 3).is_some());
        assert!(grid.tile(-1, 0).is_none());
        assert!(grid.tile(4, 0).is_none());
        assert!(grid.tile(0, 4).is_none());
    }

    #[test]
    fn set_terrain_edits_one_tile() {
        let mut grid = TerrainGrid::new(3, 3);
        assert!(grid.set_terrain(1, 2, TerrainType::Mountain));
        assert!(!grid.set_terrain(3, 0, TerrainType::Mountain));

        assert_eq!(grid.get(1, 2).terrain, TerrainType::Mountain);
        let census = grid.census();
        assert_eq!(census.mountain, 1);
        assert_eq!(census.ocean, 8);
        assert_eq!(census.total(), 9);
    }

    #[test]
    fn render_scales_tiles() {
        let mut grid = TerrainGrid::new(2, 1);
        grid.set_terrain(1, 0, TerrainType::River);

        let img = grid.render(3);
        assert_eq!(img.dimensions(), (6, 3));
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(img.get_pixel(5, 2).0, [0, 255, 255, 255]);
    }

    #[test]
    fn serializes_terrain_as_type_field() {
        let grid = TerrainGrid::new(1, 1);
        let json = serde_json::to_string(&grid).unwrap();
        assert!(json.contains("\"type\":\"Ocean\""));
    }
}
