use crate::config::ConversionConfig;
use crate::error::ConversionError;
use crate::graph::AdjacencyGraph;
use crate::mapping::CountryMapping;
use crate::state::{Industry, WorldState};
use crate::systems::{self, ResourceMap, SourceAgreement};
use serde::{Deserialize, Serialize};

/// Source-side data the conversion needs besides the target world itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionInputs {
    pub country_mapping: CountryMapping,
    pub agreements: Vec<SourceAgreement>,
    /// Source great powers, highest ranked first.
    pub great_powers: Vec<String>,
    pub resources: ResourceMap,
}

/// Headline numbers of a finished conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub landed_countries: usize,
    pub industry: Industry,
    pub factions: usize,
    pub agreements: usize,
}

/// Run every conversion step over `world` in dependency order.
///
/// Only degenerate configuration aborts; everything else is logged and
/// skipped so that a result is always produced.
pub fn convert_world(
    world: &mut WorldState,
    graph: &AdjacencyGraph,
    inputs: &ConversionInputs,
    config: &ConversionConfig,
) -> Result<ConversionSummary, ConversionError> {
    config.validate()?;

    let landed = systems::convert_industry(world, config)?;
    systems::convert_resources(world, &inputs.resources);
    systems::reconcile_strategic_regions(world);

    if inputs.country_mapping.is_empty() {
        log::warn!("Country mapping is empty; no source agreement or great power will resolve");
    } else {
        log::debug!("Mapping {} source countries", inputs.country_mapping.len());
    }
    systems::convert_diplomacy(world, &inputs.agreements, &inputs.country_mapping, config);

    if inputs.great_powers.is_empty() {
        log::debug!("No source great powers given; keeping {:?}", world.great_powers);
    } else {
        systems::determine_great_powers(world, &inputs.great_powers, &inputs.country_mapping);
    }

    systems::convert_air_bases(world, config);
    systems::station_air_forces(world, graph);
    systems::station_navies(world, graph);
    systems::create_factions(world);

    let summary = ConversionSummary {
        landed_countries: landed.len(),
        industry: systems::industry::world_industry(world),
        factions: world.factions.len(),
        agreements: world.agreements.len(),
    };
    log::info!(
        "Converted {} landed countries: {} factories, {} factions, {} agreements",
        summary.landed_countries,
        summary.industry.total(),
        summary.factions,
        summary.agreements
    );

    Ok(summary)
}
