//! Air base allocation and air force basing.
//!
//! Air base levels are granted per state (industry, infrastructure, capitals,
//! great-power capitals) and recorded on the state's first province, where
//! the target game places the airfield. Air forces are then based at the
//! nearest owned airfield to their capital.

use crate::config::ConversionConfig;
use crate::graph::AdjacencyGraph;
use crate::state::{ProvinceId, StateId, StateRegion, WorldState};
use game_pathfinding::BreadthFirst;
use tracing::instrument;

impl StateRegion {
    /// Raise the air base level, saturating at `max_level`.
    pub fn add_air_base(&mut self, levels: u32, max_level: u32) {
        self.air_base = self.air_base.saturating_add(levels).min(max_level);
    }
}

#[instrument(skip_all, name = "air_bases")]
pub fn convert_air_bases(world: &mut WorldState, config: &ConversionConfig) {
    log::info!("Converting air bases");

    add_basic_air_bases(world, config);
    add_capital_air_bases(world, config);
    add_great_power_air_bases(world, config);
    sync_air_bases_to_provinces(world);
}

/// One level per `factories_per_air_base` factories, plus one for good infrastructure.
pub fn add_basic_air_bases(world: &mut WorldState, config: &ConversionConfig) {
    let max = config.max_air_base_level;
    for state in world.states.values_mut() {
        let factories = state.civilian_factories + state.military_factories;
        state.add_air_base(factories / config.factories_per_air_base.max(1), max);

        if state.infrastructure > config.air_base_infrastructure_threshold {
            state.add_air_base(1, max);
        }
    }
}

pub fn add_capital_air_bases(world: &mut WorldState, config: &ConversionConfig) {
    let capitals: Vec<StateId> = world
        .countries
        .values()
        .filter_map(|country| country.capital_state)
        .collect();
    add_to_states(world, &capitals, config.capital_air_base_bonus, config);
}

pub fn add_great_power_air_bases(world: &mut WorldState, config: &ConversionConfig) {
    let capitals: Vec<StateId> = world
        .great_powers
        .iter()
        .filter_map(|tag| world.countries.get(tag))
        .filter_map(|country| country.capital_state)
        .collect();
    add_to_states(world, &capitals, config.great_power_air_base_bonus, config);
}

fn add_to_states(
    world: &mut WorldState,
    state_ids: &[StateId],
    levels: u32,
    config: &ConversionConfig,
) {
    for state_id in state_ids {
        match world.states.get_mut(state_id) {
            Some(state) => state.add_air_base(levels, config.max_air_base_level),
            None => log::warn!("Capital state {} does not exist", state_id),
        }
    }
}

/// Record each state's air base level on its first province.
pub fn sync_air_bases_to_provinces(world: &mut WorldState) {
    for state in world.states.values() {
        let Some(first) = state.provinces.first() else {
            continue;
        };
        if let Some(province) = world.provinces.get_mut(first) {
            province.air_base = state.air_base;
        }
    }
}

/// Nearest province to `start` owned by `owner` that has an air base.
pub fn find_air_location(
    world: &WorldState,
    graph: &AdjacencyGraph,
    start: ProvinceId,
    owner: &str,
) -> Option<ProvinceId> {
    BreadthFirst::find_nearest(graph, start, world, |province, world: &WorldState| {
        world
            .provinces
            .get(&province)
            .is_some_and(|p| p.owner.as_deref() == Some(owner) && p.air_base > 0)
    })
}

/// Base every country's air force at the airfield nearest its capital.
#[instrument(skip_all, name = "air_forces")]
pub fn station_air_forces(world: &mut WorldState, graph: &AdjacencyGraph) {
    let locations: Vec<(String, Option<ProvinceId>)> = world
        .countries
        .iter()
        .filter_map(|(tag, country)| {
            let capital = country.capital_province?;
            Some((tag.clone(), find_air_location(world, graph, capital, tag)))
        })
        .collect();

    for (tag, location) in locations {
        if location.is_none() {
            log::debug!("{} has no reachable air base", tag);
        }
        if let Some(country) = world.countries.get_mut(&tag) {
            country.air_base_location = location;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CountryState;
    use crate::testing::WorldStateBuilder;

    #[test]
    fn test_basic_air_bases() {
        let mut world = WorldStateBuilder::new()
            .with_country("GER")
            .with_state_region(StateRegion {
                id: 1,
                owner: "GER".to_string(),
                provinces: vec![1],
                civilian_factories: 5,
                military_factories: 4,
                infrastructure: 6,
                ..Default::default()
            })
            .with_state_region(StateRegion {
                id: 2,
                owner: "GER".to_string(),
                provinces: vec![2],
                civilian_factories: 3,
                infrastructure: 5,
                ..Default::default()
            })
            .build();

        add_basic_air_bases(&mut world, &ConversionConfig::default());

        // 9 / 4 = 2, +1 for infrastructure 6
        assert_eq!(world.states[&1].air_base, 3);
        // 3 / 4 = 0, infrastructure 5 is not above the threshold
        assert_eq!(world.states[&2].air_base, 0);
    }

    #[test]
    fn test_capital_bonuses_stack_and_cap() {
        let mut world = WorldStateBuilder::new()
            .with_country_state(
                "GER",
                CountryState {
                    capital_state: Some(1),
                    ..Default::default()
                },
            )
            .with_great_power("GER")
            .with_state_region(StateRegion {
                id: 1,
                owner: "GER".to_string(),
                provinces: vec![7, 8],
                civilian_factories: 12,
                ..Default::default()
            })
            .with_province(7, Some("GER"))
            .build();

        convert_air_bases(&mut world, &ConversionConfig::default());

        // 3 + 5 + 5 capped at 10
        assert_eq!(world.states[&1].air_base, 10);
        assert_eq!(world.provinces[&7].air_base, 10);
    }

    fn airfield_world() -> (WorldState, AdjacencyGraph) {
        // 1 - 2 - 3 - 4, GER owns all, airfield at 4 and at 5 (owned by POL)
        let mut world = WorldStateBuilder::new()
            .with_country_state(
                "GER",
                CountryState {
                    capital_province: Some(1),
                    ..Default::default()
                },
            )
            .with_country_state(
                "POL",
                CountryState {
                    capital_province: Some(6),
                    ..Default::default()
                },
            )
            .with_province(1, Some("GER"))
            .with_province(2, Some("GER"))
            .with_province(3, Some("GER"))
            .with_province(4, Some("GER"))
            .with_province(5, Some("POL"))
            .with_province(6, Some("POL"))
            .build();
        world.provinces.get_mut(&4).unwrap().air_base = 2;
        world.provinces.get_mut(&5).unwrap().air_base = 1;
        let graph = AdjacencyGraph::from_edges([(1, 2), (2, 3), (3, 4), (1, 5)]);
        (world, graph)
    }

    #[test]
    fn test_air_location_skips_foreign_airfields() {
        let (world, graph) = airfield_world();
        // Province 5 is closer but Polish
        assert_eq!(find_air_location(&world, &graph, 1, "GER"), Some(4));
        assert_eq!(find_air_location(&world, &graph, 1, "POL"), Some(5));
    }

    #[test]
    fn test_station_air_forces() {
        let (mut world, graph) = airfield_world();

        station_air_forces(&mut world, &graph);

        assert_eq!(world.countries["GER"].air_base_location, Some(4));
        // Province 6 is isolated, nothing reachable
        assert_eq!(world.countries["POL"].air_base_location, None);
    }
}
