use crate::grid::TerrainGrid;
use crate::terrain::TerrainType;
use rand::Rng;

/// Расстояние от клетки до ближайшего края карты
#[inline]
pub fn distance_to_edge(x: u32, y: u32, width: u32, height: u32) -> u32 {
    x.min(width - 1 - x).min(y).min(height - 1 - y)
}

/// Вероятность превращения клетки в океан: 1 на самом краю, линейно до 0
/// у внутренней границы кромки и 0 дальше от края.
#[inline]
pub fn ocean_probability(distance: u32, border_width: u32) -> f32 {
    if distance >= border_width {
        0.0
    } else {
        (border_width - distance) as f32 / border_width as f32
    }
}

/// Океанская кромка: клетки у края карты случайно становятся океаном,
/// тем вероятнее, чем ближе к краю.
///
/// Работает после рек и может перезаписать русла у края.
/// Случайное число тянется только для клеток внутри кромки.
pub fn shape_border<R: Rng>(grid: &mut TerrainGrid, border_width: u32, rng: &mut R) -> usize {
    if border_width == 0 {
        return 0;
    }

    let (width, height) = (grid.width, grid.height);
    let mut converted = 0;

    for y in 0..height {
        for x in 0..width {
            let probability = ocean_probability(distance_to_edge(x, y, width, height), border_width);
            if probability <= 0.0 {
                continue;
            }

            if rng.gen_range(0.0_f32..1.0) < probability {
                let tile = grid.get_mut(x, y);
                if tile.terrain != TerrainType::Ocean {
                    tile.terrain = TerrainType::Ocean;
                    converted += 1;
                }
            }
        }
    }

    tracing::debug!(border_width, converted, "ocean border shaped");
    converted
}
