//! Diplomacy conversion.
//!
//! Source alliances and vassalages are copied across with their direction
//! intact. Per-country relation records are then flattened into agreements:
//! a single `relation` agreement per unordered pair (lexicographic order),
//! plus directed `guarantee` and `sphere` agreements where flagged.

use crate::config::ConversionConfig;
use crate::mapping::CountryMapping;
use crate::state::{Agreement, AgreementType, Date, Tag, WorldState};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A diplomatic agreement as recorded in the source world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAgreement {
    /// Source tag of the first party (ally, overlord).
    pub country1: String,
    pub country2: String,
    /// Source agreement type, e.g. `alliance` or `vassal`.
    #[serde(rename = "type")]
    pub kind: String,
    pub start_date: Date,
}

#[instrument(skip_all, name = "diplomacy")]
pub fn convert_diplomacy(
    world: &mut WorldState,
    source: &[SourceAgreement],
    mapping: &CountryMapping,
    config: &ConversionConfig,
) {
    log::info!("Converting diplomacy");
    convert_agreements(world, source, mapping);
    convert_relations(world, config);
}

/// Copy source alliances and vassalages, and fill in ally sets.
pub fn convert_agreements(
    world: &mut WorldState,
    source: &[SourceAgreement],
    mapping: &CountryMapping,
) {
    for agreement in source {
        let kind = match agreement.kind.as_str() {
            "alliance" => AgreementType::Alliance,
            "vassal" => AgreementType::Vassal,
            other => {
                log::debug!(
                    "Skipping {} agreement between {} and {}",
                    other,
                    agreement.country1,
                    agreement.country2
                );
                continue;
            }
        };

        let Some(tag1) = target_country(world, mapping, &agreement.country1) else {
            continue;
        };
        let Some(tag2) = target_country(world, mapping, &agreement.country2) else {
            continue;
        };

        if kind == AgreementType::Alliance {
            if let Some(country) = world.countries.get_mut(&tag1) {
                country.allies.insert(tag2.clone());
            }
            if let Some(country) = world.countries.get_mut(&tag2) {
                country.allies.insert(tag1.clone());
            }
        }

        world.agreements.push(Agreement {
            country1: tag1,
            country2: tag2,
            kind,
            value: None,
            start_date: agreement.start_date,
        });
    }
}

/// Resolve a source tag to an existing target country, warning when it can't.
fn target_country(world: &WorldState, mapping: &CountryMapping, source_tag: &str) -> Option<Tag> {
    let Some(tag) = mapping.target_tag(source_tag) else {
        log::warn!(
            "Source country {} used in diplomatic agreement has no target tag",
            source_tag
        );
        return None;
    };
    if !world.countries.contains_key(tag) {
        log::warn!(
            "Country {} used in diplomatic agreement doesn't exist",
            tag
        );
        return None;
    }
    Some(tag.clone())
}

/// Flatten every country's relation records into agreements.
///
/// When both sides of a pair carry a record, the value comes from the side
/// whose tag sorts first.
pub fn convert_relations(world: &mut WorldState, config: &ConversionConfig) {
    let start_date = config.relation_start_date;
    let mut emitted: FxHashSet<(&str, &str)> = FxHashSet::default();
    let mut agreements = Vec::new();

    for (tag, country) in &world.countries {
        for (other, relation) in &country.relations {
            if other == tag {
                continue;
            }
            if !world.countries.contains_key(other) {
                log::warn!("{} has relations with {}, which doesn't exist", tag, other);
                continue;
            }

            let (country1, country2) = canonical_pair(tag, other);
            if emitted.insert((country1, country2)) {
                agreements.push(Agreement {
                    country1: country1.to_string(),
                    country2: country2.to_string(),
                    kind: AgreementType::Relation,
                    value: Some(relation.value),
                    start_date,
                });
            }

            if relation.guarantee {
                agreements.push(directed(tag, other, AgreementType::Guarantee, start_date));
            }
            if relation.sphere_leader {
                agreements.push(directed(tag, other, AgreementType::Sphere, start_date));
            }
        }
    }

    log::debug!("Converted {} relation agreements", agreements.len());
    world.agreements.extend(agreements);
}

/// Order a pair so that the same two countries always produce the same key.
fn canonical_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

fn directed(from: &str, to: &str, kind: AgreementType, start_date: Date) -> Agreement {
    Agreement {
        country1: from.to_string(),
        country2: to.to_string(),
        kind,
        value: None,
        start_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Relation;
    use crate::testing::WorldStateBuilder;

    fn relation(value: i32) -> Relation {
        Relation {
            value,
            ..Default::default()
        }
    }

    #[test]
    fn test_mirrored_relation_emitted_once() {
        let mut world = WorldStateBuilder::new()
            .with_country("BBB")
            .with_country("AAA")
            .with_relation("BBB", "AAA", relation(50))
            .with_relation("AAA", "BBB", relation(50))
            .build();

        convert_relations(&mut world, &ConversionConfig::default());

        let relations: Vec<_> = world.agreements_of(AgreementType::Relation).collect();
        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].country1, "AAA");
        assert_eq!(relations[0].country2, "BBB");
        assert_eq!(relations[0].value, Some(50));
        assert_eq!(relations[0].start_date, Date::new(1930, 1, 1));
    }

    #[test]
    fn test_disagreeing_mirror_takes_first_tag_value() {
        let mut world = WorldStateBuilder::new()
            .with_country("AAA")
            .with_country("BBB")
            .with_relation("BBB", "AAA", relation(-80))
            .with_relation("AAA", "BBB", relation(30))
            .build();

        convert_relations(&mut world, &ConversionConfig::default());

        let relations: Vec<_> = world.agreements_of(AgreementType::Relation).collect();
        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].country1, "AAA");
        assert_eq!(relations[0].country2, "BBB");
        assert_eq!(relations[0].value, Some(30));
    }

    #[test]
    fn test_one_sided_relation_is_still_canonical() {
        let mut world = WorldStateBuilder::new()
            .with_country("ZZZ")
            .with_country("AAA")
            .with_relation("ZZZ", "AAA", relation(-30))
            .build();

        convert_relations(&mut world, &ConversionConfig::default());

        assert_eq!(
            world.agreements,
            vec![Agreement {
                country1: "AAA".to_string(),
                country2: "ZZZ".to_string(),
                kind: AgreementType::Relation,
                value: Some(-30),
                start_date: Date::new(1930, 1, 1),
            }]
        );
    }

    #[test]
    fn test_guarantee_and_sphere_keep_direction() {
        let mut world = WorldStateBuilder::new()
            .with_country("ZZZ")
            .with_country("AAA")
            .with_relation(
                "ZZZ",
                "AAA",
                Relation {
                    value: 100,
                    guarantee: true,
                    sphere_leader: true,
                },
            )
            .with_relation("AAA", "ZZZ", relation(100))
            .build();

        convert_relations(&mut world, &ConversionConfig::default());

        assert_eq!(world.agreements_of(AgreementType::Relation).count(), 1);
        let guarantee: Vec<_> = world.agreements_of(AgreementType::Guarantee).collect();
        assert_eq!(guarantee.len(), 1);
        assert_eq!(guarantee[0].country1, "ZZZ");
        assert_eq!(guarantee[0].country2, "AAA");
        assert_eq!(guarantee[0].value, None);
        let sphere: Vec<_> = world.agreements_of(AgreementType::Sphere).collect();
        assert_eq!(sphere[0].country1, "ZZZ");
    }

    #[test]
    fn test_self_and_unknown_relations_skipped() {
        let mut world = WorldStateBuilder::new()
            .with_country("AAA")
            .with_relation("AAA", "AAA", relation(200))
            .with_relation("AAA", "GHO", relation(10))
            .build();

        convert_relations(&mut world, &ConversionConfig::default());
        assert!(world.agreements.is_empty());
    }

    #[test]
    fn test_alliance_builds_allies() {
        let mut world = WorldStateBuilder::new()
            .with_country("ENG")
            .with_country("POR")
            .build();
        let mapping: CountryMapping = [("ENG", "ENG"), ("POR", "POR")].into_iter().collect();
        let source = vec![SourceAgreement {
            country1: "ENG".to_string(),
            country2: "POR".to_string(),
            kind: "alliance".to_string(),
            start_date: Date::new(1836, 1, 1),
        }];

        convert_agreements(&mut world, &source, &mapping);

        assert!(world.countries["ENG"].allies.contains("POR"));
        assert!(world.countries["POR"].allies.contains("ENG"));
        assert_eq!(world.agreements[0].kind, AgreementType::Alliance);
        assert_eq!(world.agreements[0].start_date, Date::new(1836, 1, 1));
    }

    #[test]
    fn test_vassal_keeps_direction_without_allies() {
        let mut world = WorldStateBuilder::new()
            .with_country("GER")
            .with_country("BAV")
            .build();
        let mapping: CountryMapping = [("PRU", "GER"), ("BAV", "BAV")].into_iter().collect();
        let source = vec![SourceAgreement {
            country1: "PRU".to_string(),
            country2: "BAV".to_string(),
            kind: "vassal".to_string(),
            start_date: Date::new(1836, 1, 1),
        }];

        convert_agreements(&mut world, &source, &mapping);

        assert_eq!(world.agreements[0].country1, "GER");
        assert_eq!(world.agreements[0].country2, "BAV");
        assert!(world.countries["GER"].allies.is_empty());
    }

    #[test]
    fn test_unmapped_or_missing_countries_skipped() {
        let mut world = WorldStateBuilder::new().with_country("ENG").build();
        let mapping: CountryMapping = [("ENG", "ENG"), ("HAN", "HAN")].into_iter().collect();
        let source = vec![
            SourceAgreement {
                country1: "ENG".to_string(),
                country2: "REB".to_string(), // no mapping
                kind: "alliance".to_string(),
                start_date: Date::default(),
            },
            SourceAgreement {
                country1: "ENG".to_string(),
                country2: "HAN".to_string(), // mapped but not converted
                kind: "alliance".to_string(),
                start_date: Date::default(),
            },
            SourceAgreement {
                country1: "ENG".to_string(),
                country2: "ENG".to_string(),
                kind: "casus_belli".to_string(),
                start_date: Date::default(),
            },
        ];

        convert_agreements(&mut world, &source, &mapping);

        assert!(world.agreements.is_empty());
        assert!(world.countries["ENG"].allies.is_empty());
    }

    #[test]
    fn test_alliance_and_relation_coexist() {
        let mut world = WorldStateBuilder::new()
            .with_country("ENG")
            .with_country("POR")
            .with_relation("POR", "ENG", relation(150))
            .build();
        let mapping: CountryMapping = [("ENG", "ENG"), ("POR", "POR")].into_iter().collect();
        let source = vec![SourceAgreement {
            country1: "POR".to_string(),
            country2: "ENG".to_string(),
            kind: "alliance".to_string(),
            start_date: Date::new(1836, 1, 1),
        }];

        convert_diplomacy(&mut world, &source, &mapping, &ConversionConfig::default());

        let alliance: Vec<_> = world.agreements_of(AgreementType::Alliance).collect();
        assert_eq!(alliance[0].country1, "POR");
        let relation: Vec<_> = world.agreements_of(AgreementType::Relation).collect();
        assert_eq!(relation[0].country1, "ENG");
        assert_eq!(relation[0].value, Some(150));
    }
}
