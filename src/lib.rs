pub mod border;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod heightmap;
pub mod noise;
pub mod rivers;
pub mod terrain;

pub use config::{MapGenerationParams, RiverSettings, Strategy, StrategySettings};
pub use error::{MapGenError, Result};
pub use generator::MapGenerator;
pub use grid::{TerrainCensus, TerrainGrid};
pub use heightmap::{Heightmap, generate_heightmap};
pub use rivers::{RiverOutcome, RiverReport};
pub use terrain::{TerrainType, Tile};
