//! World generator binary - pre-generates a square of chunks to disk.
//!
//! Usage: cargo run --release --bin generate_world -- [OPTIONS]
//!
//! Options:
//!   --radius <CHUNKS>   Chunk radius around the origin (default: 4)
//!   --seed <SEED>       World seed (default: from config, 12345)
//!   --config <PATH>     Generation config JSON (default: built-in palette)
//!   --min-layer <Y>     Lowest chunk layer (default: -1)
//!   --max-layer <Y>     Highest chunk layer (default: 1)
//!   --name <NAME>       World name / output directory (default: "demo")
//!   --jobs <N>          Max parallel chunk builds (default: 4)
//!
//! Output structure:
//!   worlds/<name>/
//!     manifest.json       # Config, block counts and chunk list
//!     chunks/
//!       chunk_0_0_0.bin   # x-major u16 little-endian block codes
//!       ...

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde_json::json;

use skyvox::core::{AIR, Error, Result};
use skyvox::generation::{GenerationConfig, GenerationPipeline};
use skyvox::voxel::chunk::{ChunkCoord, ChunkData, CHUNK_SIZE};

fn main() {
    skyvox::core::logging::init();

    if let Err(e) = run() {
        log::error!("World generation failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let radius = parse_i32_arg(&args, "--radius").unwrap_or(4);
    let min_layer = parse_i32_arg(&args, "--min-layer").unwrap_or(-1);
    let max_layer = parse_i32_arg(&args, "--max-layer").unwrap_or(1);
    let name = parse_str_arg(&args, "--name").unwrap_or_else(|| "demo".to_string());
    let jobs = parse_usize_arg(&args, "--jobs").unwrap_or(4);

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => GenerationConfig::load_sync(Path::new(&path))?,
        None => GenerationConfig::default(),
    };
    if let Some(seed) = parse_u32_arg(&args, "--seed") {
        config.cloud_noise.seed = seed;
    }

    if radius < 0 || min_layer > max_layer {
        return Err(Error::Config(format!(
            "invalid region: radius {}, layers {}..={}",
            radius, min_layer, max_layer
        )));
    }

    // Limit rayon's thread pool to cap peak memory usage
    rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build_global()
        .map_err(|e| Error::Config(format!("thread pool: {}", e)))?;

    let output_dir = PathBuf::from(format!("worlds/{}", name));
    let chunk_dir = output_dir.join("chunks");
    std::fs::create_dir_all(&chunk_dir)?;

    println!("=== Skyvox World Generator ===");
    println!("World:  {}", name);
    println!("Radius: {} chunks, layers {}..={}", radius, min_layer, max_layer);
    println!("Seed:   {}", config.seed());
    println!("Clouds: y {}..={}, cutoff {}",
        config.clouds.cloud_level, config.clouds.cloud_altitude, config.clouds.cutoff);
    println!("Jobs:   {} parallel", jobs);
    println!("Output: {}", output_dir.display());
    println!();

    let pipeline = GenerationPipeline::new(&config)?;

    let start = Instant::now();
    let chunks = pipeline.generate_region(ChunkCoord::new(0, 0, 0), radius, min_layer..=max_layer);
    let elapsed = start.elapsed();

    let mut totals: BTreeMap<u16, usize> = BTreeMap::new();
    let mut written = Vec::new();
    let mut bytes = 0usize;

    for (coord, data) in &chunks {
        for &cell in data.cells() {
            *totals.entry(cell).or_insert(0) += 1;
        }
        if data.is_empty() {
            continue;
        }
        let encoded = encode_chunk(data);
        bytes += encoded.len();
        let chunk_file = chunk_dir.join(format!("chunk_{}_{}_{}.bin", coord.x, coord.y, coord.z));
        std::fs::write(&chunk_file, &encoded)?;
        written.push(*coord);
    }

    println!("Generated {} chunks in {:.2}s ({:.0} chunks/sec)",
        chunks.len(), elapsed.as_secs_f64(),
        chunks.len() as f64 / elapsed.as_secs_f64().max(f64::EPSILON));

    let block_counts: BTreeMap<String, usize> = totals
        .iter()
        .map(|(&id, &count)| {
            let label = if id == AIR {
                "air".to_string()
            } else {
                pipeline
                    .registry()
                    .block_material(id)
                    .map(|m| m.name.clone())
                    .unwrap_or_else(|| format!("block_{}", id))
            };
            (label, count)
        })
        .collect();

    for (label, count) in &block_counts {
        println!("  {:<8} {}", label, count);
    }

    let manifest = json!({
        "name": name,
        "version": 1,
        "chunk_size": CHUNK_SIZE,
        "radius": radius,
        "layers": [min_layer, max_layer],
        "config": config,
        "block_counts": block_counts,
        "total_bytes": bytes,
        "chunks": written.iter().map(|c| json!({"x": c.x, "y": c.y, "z": c.z})).collect::<Vec<_>>(),
    });

    let manifest_path = output_dir.join("manifest.json");
    std::fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;

    println!();
    println!("=== Generation Complete ===");
    println!("Chunks: {} with blocks (of {} generated)", written.len(), chunks.len());
    println!("Size:   {:.1} KB on disk", bytes as f64 / 1024.0);
    println!("Output: {}", output_dir.display());

    Ok(())
}

fn encode_chunk(data: &ChunkData) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.cells().len() * 2);
    for &cell in data.cells() {
        out.extend_from_slice(&cell.to_le_bytes());
    }
    out
}

fn parse_i32_arg(args: &[String], flag: &str) -> Option<i32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
