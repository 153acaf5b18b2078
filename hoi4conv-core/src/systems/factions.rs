//! Faction formation.
//!
//! Great powers, in priority order, each found a faction and pull in their
//! direct allies when either:
//! - the ally sits in this great power's sphere of influence, or
//! - the ally is in nobody's sphere and the two governments are compatible
//!   (see [`Government::allows_faction_with`]).
//!
//! This is a single greedy pass. An ally rejected by one great power is never
//! reconsidered by it, and an ally already taken is never moved.
//!
//! [`Government::allows_faction_with`]: crate::government::Government::allows_faction_with

use crate::state::{Faction, Tag, WorldState};
use tracing::instrument;

/// The great power (first in priority order) leading `tag`'s sphere, if any.
pub fn sphere_leader(world: &WorldState, tag: &str) -> Option<Tag> {
    world
        .great_powers
        .iter()
        .find(|great_power| {
            world
                .countries
                .get(great_power.as_str())
                .and_then(|gp| gp.relations.get(tag))
                .is_some_and(|relation| relation.sphere_leader)
        })
        .cloned()
}

/// Whether `leader`'s faction may admit `ally`.
pub fn may_join_faction(world: &WorldState, leader: &str, ally: &str) -> bool {
    let (Some(leader_country), Some(ally_country)) =
        (world.countries.get(leader), world.countries.get(ally))
    else {
        return false;
    };

    match sphere_leader(world, ally) {
        Some(sphere_leader) => sphere_leader == leader,
        None => leader_country
            .government
            .allows_faction_with(ally_country.government),
    }
}

/// Build factions for every great power not already in one.
#[instrument(skip_all, name = "factions")]
pub fn create_factions(world: &mut WorldState) {
    log::info!("Creating factions");

    let great_powers = world.great_powers.clone();
    for leader in great_powers {
        let Some(leader_country) = world.countries.get(&leader) else {
            log::warn!("Great power {} does not exist; no faction created", leader);
            continue;
        };
        if leader_country.is_in_faction() {
            continue;
        }

        let mut members = vec![leader.clone()];
        for ally in &leader_country.allies {
            let Some(ally_country) = world.countries.get(ally) else {
                log::warn!("{} has ally {}, which does not exist", leader, ally);
                continue;
            };
            if ally_country.is_in_faction() || members.contains(ally) {
                continue;
            }
            if may_join_faction(world, &leader, ally) {
                members.push(ally.clone());
            } else {
                log::debug!(
                    "{} ({}) declined to join {} ({})",
                    ally,
                    ally_country.government,
                    leader,
                    leader_country.government
                );
            }
        }

        let faction_id = world.factions.len();
        for member in &members {
            if let Some(country) = world.countries.get_mut(member) {
                country.faction = Some(faction_id);
            }
        }
        log::info!("Faction of {}: {}", leader, members.join(", "));
        world.factions.push(Faction { leader, members });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::government::Government;
    use crate::state::Relation;
    use crate::testing::WorldStateBuilder;
    use std::collections::BTreeSet;

    fn sphere() -> Relation {
        Relation {
            sphere_leader: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_shared_ally_goes_to_compatible_great_power_only() {
        let mut world = WorldStateBuilder::new()
            .with_country("AAA")
            .with_country("BBB")
            .with_country("CCC")
            .with_government("AAA", Government::Democratic)
            .with_government("BBB", Government::Communism)
            .with_government("CCC", Government::Democratic)
            .with_alliance("AAA", "CCC")
            .with_alliance("BBB", "CCC")
            .with_great_power("AAA")
            .with_great_power("BBB")
            .build();

        create_factions(&mut world);

        assert_eq!(
            world.factions,
            vec![
                Faction {
                    leader: "AAA".to_string(),
                    members: vec!["AAA".to_string(), "CCC".to_string()],
                },
                Faction {
                    leader: "BBB".to_string(),
                    members: vec!["BBB".to_string()],
                },
            ]
        );
        assert_eq!(world.countries["CCC"].faction, Some(0));
        assert_eq!(world.faction_of("BBB").map(|f| f.leader.as_str()), Some("BBB"));
    }

    #[test]
    fn test_first_great_power_takes_shared_ally() {
        let mut world = WorldStateBuilder::new()
            .with_country("AAA")
            .with_country("BBB")
            .with_country("CCC")
            .with_alliance("AAA", "CCC")
            .with_alliance("BBB", "CCC")
            .with_great_power("BBB")
            .with_great_power("AAA")
            .build();

        create_factions(&mut world);

        assert_eq!(world.factions[0].leader, "BBB");
        assert_eq!(world.factions[0].members, vec!["BBB", "CCC"]);
        assert_eq!(world.factions[1].members, vec!["AAA"]);
    }

    #[test]
    fn test_sphere_overrides_government() {
        let mut world = WorldStateBuilder::new()
            .with_country("ENG")
            .with_country("RUS")
            .with_country("PER")
            .with_government("ENG", Government::Democratic)
            .with_government("RUS", Government::AbsoluteMonarchy)
            .with_government("PER", Government::Fascism)
            .with_alliance("ENG", "PER")
            .with_alliance("RUS", "PER")
            .with_relation("RUS", "PER", sphere())
            .with_great_power("ENG")
            .with_great_power("RUS")
            .build();

        assert_eq!(sphere_leader(&world, "PER").as_deref(), Some("RUS"));
        create_factions(&mut world);

        // ENG may not take a country in RUS's sphere
        assert_eq!(world.factions[0].members, vec!["ENG"]);
        assert_eq!(world.factions[1].members, vec!["RUS", "PER"]);
    }

    #[test]
    fn test_sphere_leader_admits_incompatible_government() {
        let world = WorldStateBuilder::new()
            .with_country("ENG")
            .with_country("SIA")
            .with_government("ENG", Government::Democratic)
            .with_government("SIA", Government::Communism)
            .with_relation("ENG", "SIA", sphere())
            .with_great_power("ENG")
            .build();

        assert!(may_join_faction(&world, "ENG", "SIA"));
    }

    #[test]
    fn test_great_power_already_in_faction_skipped() {
        let mut world = WorldStateBuilder::new()
            .with_country("ENG")
            .with_country("FRA")
            .with_alliance("ENG", "FRA")
            .with_great_power("ENG")
            .with_great_power("FRA")
            .build();

        create_factions(&mut world);

        assert_eq!(world.factions.len(), 1);
        assert_eq!(world.factions[0].members, vec!["ENG", "FRA"]);
    }

    #[test]
    fn test_missing_ally_is_skipped() {
        let mut world = WorldStateBuilder::new()
            .with_country("ENG")
            .with_great_power("ENG")
            .build();
        world
            .countries
            .get_mut("ENG")
            .unwrap()
            .allies
            .insert("GHO".to_string());

        create_factions(&mut world);

        assert_eq!(world.factions[0].members, vec!["ENG"]);
    }

    #[test]
    fn test_membership_is_disjoint() {
        let mut builder = WorldStateBuilder::new();
        let tags = ["AAA", "BBB", "CCC", "DDD", "EEE", "FFF"];
        for tag in tags {
            builder = builder.with_country(tag);
        }
        let mut world = builder
            .with_alliance("AAA", "CCC")
            .with_alliance("AAA", "DDD")
            .with_alliance("BBB", "CCC")
            .with_alliance("BBB", "EEE")
            .with_alliance("CCC", "FFF")
            .with_great_power("AAA")
            .with_great_power("BBB")
            .with_great_power("CCC")
            .build();

        create_factions(&mut world);

        let mut seen = BTreeSet::new();
        for faction in &world.factions {
            assert_eq!(faction.members[0], faction.leader);
            for member in &faction.members {
                assert!(seen.insert(member.clone()), "{member} in two factions");
            }
        }
    }
}
