use crate::config::RiverSettings;
use crate::grid::TerrainGrid;
use crate::terrain::TerrainType;
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;

const DIRECTIONS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Чем закончилась прокладка одной реки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiverOutcome {
    /// Дошла до океана
    ReachedOcean,
    /// Нет соседа ниже текущей клетки
    LocalMinimum,
    /// Упёрлась в `max_length`
    TooLong,
}

#[derive(Debug, Clone, Serialize)]
pub struct RiverPath {
    /// Пройденные клетки от истока; при `ReachedOcean` последняя клетка — океан
    pub cells: Vec<(u32, u32)>,
    pub outcome: RiverOutcome,
}

/// Итог прохода рек
///
/// `carved` может оказаться меньше `requested`: если попытки кончились раньше,
/// карта просто получает меньше рек.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RiverReport {
    pub requested: usize,
    pub carved: usize,
    pub attempts: usize,
    /// Все реки, начатые с горных клеток, включая неудачные
    pub rivers: Vec<RiverPath>,
}

/// Прокладывает реки: случайные горные истоки, спуск по самому крутому склону
pub fn carve_rivers<R: Rng>(
    grid: &mut TerrainGrid,
    river_count: usize,
    settings: &RiverSettings,
    rng: &mut R,
) -> RiverReport {
    let mut report = RiverReport {
        requested: river_count,
        ..RiverReport::default()
    };
    if grid.tiles().is_empty() {
        return report;
    }

    while report.attempts < settings.max_attempts && report.carved < river_count {
        report.attempts += 1;

        let x = rng.gen_range(0..grid.width);
        let y = rng.gen_range(0..grid.height);
        if grid.get(x, y).terrain != TerrainType::Mountain {
            continue;
        }

        let river = grow_river(grid, x, y, settings.max_length);
        if river.outcome == RiverOutcome::ReachedOcean {
            report.carved += 1;
        }
        report.rivers.push(river);
    }

    tracing::debug!(
        requested = report.requested,
        carved = report.carved,
        attempts = report.attempts,
        started = report.rivers.len(),
        "rivers carved"
    );
    report
}

/// Ведёт одну реку от `(start_x, start_y)` вниз по склону.
///
/// Суша и горы на пути превращаются в реку ещё до проверки исхода, поэтому
/// даже не дошедшая до океана река оставляет русло.
pub fn grow_river(
    grid: &mut TerrainGrid,
    start_x: u32,
    start_y: u32,
    max_length: usize,
) -> RiverPath {
    let mut cells = Vec::new();
    let mut visited = HashSet::new();
    let (mut x, mut y) = (start_x, start_y);
    let mut length = 0;

    loop {
        cells.push((x, y));

        let tile = grid.get_mut(x, y);
        if tile.terrain.is_carvable() {
            tile.terrain = TerrainType::River;
        } else if tile.terrain == TerrainType::Ocean {
            return RiverPath {
                cells,
                outcome: RiverOutcome::ReachedOcean,
            };
        }

        visited.insert((x, y));

        let Some((next_x, next_y)) = lowest_neighbor(grid, x, y, &visited) else {
            return RiverPath {
                cells,
                outcome: RiverOutcome::LocalMinimum,
            };
        };

        x = next_x;
        y = next_y;
        length += 1;
        if length >= max_length {
            return RiverPath {
                cells,
                outcome: RiverOutcome::TooLong,
            };
        }
    }
}

/// Самый низкий непосещённый сосед из 8, строго ниже текущей клетки
fn lowest_neighbor(
    grid: &TerrainGrid,
    x: u32,
    y: u32,
    visited: &HashSet<(u32, u32)>,
) -> Option<(u32, u32)> {
    let mut min_elevation = grid.get(x, y).elevation;
    let mut lowest = None;

    for &(dx, dy) in &DIRECTIONS {
        let nx = i64::from(x) + dx;
        let ny = i64::from(y) + dy;
        if !grid.in_bounds(nx, ny) {
            continue;
        }
        let (nx, ny) = (nx as u32, ny as u32);
        if visited.contains(&(nx, ny)) {
            continue;
        }

        let elevation = grid.get(nx, ny).elevation;
        if elevation < min_elevation {
            min_elevation = elevation;
            lowest = Some((nx, ny));
        }
    }
    lowest
}
