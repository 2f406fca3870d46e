use clap::Parser;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tilemap_gen::{
    MapGenerationParams, MapGenerator, RiverReport, Strategy, TerrainCensus, TerrainGrid,
};
use tracing_subscriber::EnvFilter;

/// Генератор тайловых карт
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ширина карты в тайлах (перекрывает конфиг)
    #[arg(long)]
    width: Option<u32>,

    /// Высота карты в тайлах (перекрывает конфиг)
    #[arg(long)]
    height: Option<u32>,

    /// Сид генератора (перекрывает конфиг)
    #[arg(short, long, allow_hyphen_values = true)]
    seed: Option<i64>,

    /// Стратегия: default, centered, distributed
    #[arg(long)]
    strategy: Option<Strategy>,

    /// Ширина океанской кромки в тайлах
    #[arg(long)]
    border_width: Option<u32>,

    /// Путь для сохранения карты (по умолчанию: ./map.png)
    #[arg(short, long, default_value = "map.png")]
    output: PathBuf,

    /// Размер тайла в пикселях на превью
    #[arg(long, default_value_t = 4)]
    tile_size: u32,

    /// Дополнительно сохранить карту высот в оттенках серого
    #[arg(long)]
    heightmap: Option<PathBuf>,

    /// Дополнительно выгрузить сетку и статистику в JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Serialize)]
struct MapExport<'a> {
    seed: i64,
    strategy: Strategy,
    census: TerrainCensus,
    rivers: Option<&'a RiverReport>,
    grid: &'a TerrainGrid,
}

fn main() -> tilemap_gen::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut params = match &cli.config {
        Some(path) => {
            println!("Загрузка конфигурации из {}...", path.display());
            MapGenerationParams::from_toml_file(path)?
        }
        None => MapGenerationParams::default(),
    };
    if let Some(width) = cli.width {
        params.width = width;
    }
    if let Some(height) = cli.height {
        params.height = height;
    }
    if let Some(seed) = cli.seed {
        params.seed = seed;
    }
    if let Some(strategy) = cli.strategy {
        params.strategy = strategy;
    }
    if let Some(border_width) = cli.border_width {
        params.border_width = border_width;
    }

    println!(
        "Генерация карты {}×{} (сид {}, стратегия {:?})...",
        params.width, params.height, params.seed, params.strategy
    );
    let mut generator = MapGenerator::from_params(&params)?;
    generator.generate_map(params.strategy);

    println!("Сохранение в {}", cli.output.display());
    generator.grid().save_as_png(&cli.output, cli.tile_size)?;

    if let Some(path) = &cli.heightmap {
        println!("Сохранение карты высот в {}", path.display());
        generator.heightmap().save_as_png(path)?;
    }

    if let Some(path) = &cli.json {
        println!("Выгрузка JSON в {}", path.display());
        let export = MapExport {
            seed: params.seed,
            strategy: params.strategy,
            census: generator.grid().census(),
            rivers: generator.river_report(),
            grid: generator.grid(),
        };
        serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), &export)?;
    }

    if let Some(report) = generator.river_report() {
        println!(
            "\nГотово! Рек до океана: {} из {} (попыток: {}).",
            report.carved, report.requested, report.attempts
        );
    }
    Ok(())
}
