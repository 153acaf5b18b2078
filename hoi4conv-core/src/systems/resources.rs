//! Strategic resource conversion.

use crate::state::{ProvinceId, WorldState};
use std::collections::BTreeMap;
use tracing::instrument;

/// Resource yields per province, e.g. `{ 42: { "oil": 4.0 } }`.
pub type ResourceMap = BTreeMap<ProvinceId, BTreeMap<String, f64>>;

/// Sum province resource yields into the states that contain them.
#[instrument(skip_all, name = "resources")]
pub fn convert_resources(world: &mut WorldState, resource_map: &ResourceMap) {
    log::info!("Converting resources");

    for state in world.states.values_mut() {
        for province in &state.provinces {
            let Some(resources) = resource_map.get(province) else {
                continue;
            };
            for (resource, amount) in resources {
                *state.resources.entry(resource.clone()).or_insert(0.0) += amount;
            }
        }
    }
}
