//! Strategic region reconciliation.
//!
//! States are built from source provinces and routinely straddle the target
//! game's strategic region borders. Each state is moved wholesale into the
//! strategic region that holds most of its provinces; provinces no state
//! claimed go back to the region they started in.

use crate::state::{ProvinceId, StateId, StrategicRegionId, WorldState};
use std::collections::BTreeMap;
use tracing::instrument;

/// Province → strategic region membership before reconciliation.
pub type ProvinceRegionMap = BTreeMap<ProvinceId, StrategicRegionId>;

/// Snapshot current membership. A province listed by several regions is
/// credited to the lowest region id.
pub fn province_to_region_map(world: &WorldState) -> ProvinceRegionMap {
    let mut mapping = ProvinceRegionMap::new();
    for (&region_id, region) in &world.strategic_regions {
        for &province in &region.provinces {
            if let Some(&existing) = mapping.get(&province) {
                log::debug!(
                    "Province {} listed in strategic regions {} and {}; keeping {}",
                    province,
                    existing,
                    region_id,
                    existing
                );
                continue;
            }
            mapping.insert(province, region_id);
        }
    }
    mapping
}

/// Reassign every state to its majority strategic region.
#[instrument(skip_all, name = "strategic_regions")]
pub fn reconcile_strategic_regions(world: &mut WorldState) {
    log::info!("Converting strategic regions");

    let mapping = province_to_region_map(world);
    for region in world.strategic_regions.values_mut() {
        region.provinces.clear();
    }

    assign_with_mapping(world, mapping);
}

/// Assign states and leftover provinces using an explicit pre-import mapping.
///
/// Region memberships are only added to, so callers reconciling from scratch
/// must clear them first.
pub fn assign_with_mapping(world: &mut WorldState, mut mapping: ProvinceRegionMap) {
    for (&state_id, state) in world.states.iter_mut() {
        let mut votes: Vec<(StrategicRegionId, usize)> = Vec::new();
        let mut consulted: Vec<(ProvinceId, StrategicRegionId)> = Vec::new();

        for &province in &state.provinces {
            let Some(region_id) = mapping.remove(&province) else {
                log::warn!("Province {} had no original strategic region", province);
                continue;
            };
            consulted.push((province, region_id));
            match votes.iter_mut().find(|(id, _)| *id == region_id) {
                Some((_, count)) => *count += 1,
                None => votes.push((region_id, 1)),
            }
        }

        let winner = most_represented(&votes);
        let region = winner.and_then(|id| world.strategic_regions.get_mut(&id));
        let Some(region) = region else {
            warn_unassigned(state_id, winner);
            state.strategic_region = None;
            // Let the leftover pass return these to where they came from
            mapping.extend(consulted);
            continue;
        };

        region.provinces.extend(state.provinces.iter().copied());
        state.strategic_region = Some(region.id);
    }

    for (province, region_id) in mapping {
        match world.strategic_regions.get_mut(&region_id) {
            Some(region) => {
                region.provinces.insert(province);
            }
            None => log::warn!(
                "Strategic region {} was not in the list of regions; dropping province {}",
                region_id,
                province
            ),
        }
    }
}

/// Region with the most votes. Ties go to the region seen first.
fn most_represented(votes: &[(StrategicRegionId, usize)]) -> Option<StrategicRegionId> {
    let mut best: Option<(StrategicRegionId, usize)> = None;
    for &(region_id, count) in votes {
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((region_id, count)),
        }
    }
    best.map(|(region_id, _)| region_id)
}

fn warn_unassigned(state_id: StateId, winner: Option<StrategicRegionId>) {
    match winner {
        Some(region_id) => log::warn!(
            "Strategic region {} was not in the list of regions; state {} left unassigned",
            region_id,
            state_id
        ),
        None => log::warn!(
            "State {} has no province in any strategic region; left unassigned",
            state_id
        ),
    }
}
