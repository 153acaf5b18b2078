use anyhow::{Context, Result};
use hoi4conv_core::state::ProvinceId;
use hoi4conv_core::{AdjacencyGraph, ConversionConfig, ConversionInputs, WorldState};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Everything one conversion run reads: the imported world, province
/// adjacencies and the source-side data.
#[derive(Debug, Deserialize)]
pub struct WorldSnapshot {
    pub world: WorldState,
    #[serde(default)]
    pub adjacencies: Vec<(ProvinceId, ProvinceId)>,
    #[serde(default)]
    pub inputs: ConversionInputs,
}

pub fn load_snapshot(path: &Path) -> Result<(WorldState, AdjacencyGraph, ConversionInputs)> {
    log::info!("Loading world snapshot from {:?}", path);
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let snapshot: WorldSnapshot = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse world snapshot {}", path.display()))?;

    let mut world = snapshot.world;
    // Registries are keyed by tag; the embedded tag is optional in the file
    for (tag, country) in world.countries.iter_mut() {
        if country.tag.is_empty() {
            country.tag = tag.clone();
        }
    }

    let graph = AdjacencyGraph::from_edges(snapshot.adjacencies);
    log::info!(
        "Loaded {} countries, {} states, {} provinces ({} in adjacency graph)",
        world.countries.len(),
        world.states.len(),
        world.provinces.len(),
        graph.province_count()
    );

    Ok((world, graph, snapshot.inputs))
}

/// Load conversion settings, falling back to defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<ConversionConfig> {
    let Some(path) = path else {
        log::info!("No config given, using defaults");
        return Ok(ConversionConfig::default());
    };

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let config: ConversionConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    log::debug!("Config: {:?}", config);
    Ok(config)
}
