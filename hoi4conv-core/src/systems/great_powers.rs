use crate::mapping::CountryMapping;
use crate::state::WorldState;

/// Map the source great-power ranking onto converted countries.
///
/// Source great powers that were not converted are dropped; the rest keep
/// their source ranking as faction priority order.
pub fn determine_great_powers(
    world: &mut WorldState,
    source_great_powers: &[String],
    mapping: &CountryMapping,
) {
    world.great_powers.clear();
    for country in world.countries.values_mut() {
        country.great_power = false;
    }

    for source_tag in source_great_powers {
        let Some(tag) = mapping.target_tag(source_tag) else {
            log::warn!("Great power {} has no target tag", source_tag);
            continue;
        };
        let Some(country) = world.countries.get_mut(tag) else {
            log::warn!("Great power {} was not converted", tag);
            continue;
        };
        // Two source powers merged into one target tag
        if country.great_power {
            continue;
        }
        country.great_power = true;
        world.great_powers.push(tag.clone());
    }

    log::info!("Great powers: {}", world.great_powers.join(", "));
}
