//! Navy basing.

use crate::graph::AdjacencyGraph;
use crate::state::{ProvinceId, WorldState};
use tracing::instrument;

/// Whether a province is water for basing purposes.
///
/// Provinces missing from the registry but present in the adjacency graph are
/// sea zones: only land provinces are imported.
fn is_sea(world: &WorldState, province: ProvinceId) -> bool {
    world
        .provinces
        .get(&province)
        .map_or(true, |p| p.is_sea)
}

/// Candidates that can host a fleet.
///
/// Candidates with a naval base are preferred. If none has one, every sea zone
/// bordering a candidate is offered instead; a candidate with no sea
/// neighbour contributes nothing.
pub fn port_location_candidates(
    world: &WorldState,
    graph: &AdjacencyGraph,
    candidates: &[ProvinceId],
) -> Vec<ProvinceId> {
    let ports: Vec<ProvinceId> = candidates
        .iter()
        .copied()
        .filter(|p| world.provinces.get(p).is_some_and(|p| p.has_naval_base()))
        .collect();
    if !ports.is_empty() {
        return ports;
    }

    let mut sea_zones = Vec::new();
    for &candidate in candidates {
        for neighbor in graph.neighbors(candidate) {
            if is_sea(world, neighbor) && !sea_zones.contains(&neighbor) {
                sea_zones.push(neighbor);
            }
        }
    }
    sea_zones
}

/// Base every country's navy near its capital.
///
/// Candidates are the capital state's provinces, or every owned province if
/// the country has no capital.
#[instrument(skip_all, name = "navies")]
pub fn station_navies(world: &mut WorldState, graph: &AdjacencyGraph) {
    log::info!("Converting navies");

    let mut locations = Vec::new();
    for (tag, country) in &world.countries {
        let capital = country
            .capital_state
            .and_then(|id| world.states.get(&id));
        let candidates: Vec<ProvinceId> = match capital {
            Some(capital) => capital.provinces.clone(),
            None => country
                .states
                .iter()
                .filter_map(|id| world.states.get(id))
                .flat_map(|state| state.provinces.iter().copied())
                .collect(),
        };
        if candidates.is_empty() {
            continue;
        }

        let location = port_location_candidates(world, graph, &candidates)
            .first()
            .copied();
        if location.is_none() {
            log::debug!("{} has no port or coastal province", tag);
        }
        locations.push((tag.clone(), location));
    }

    for (tag, location) in locations {
        if let Some(country) = world.countries.get_mut(&tag) {
            country.navy_base_location = location;
        }
    }
}
