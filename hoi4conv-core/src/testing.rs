use crate::government::Government;
use crate::state::{
    CountryState, ProvinceId, ProvinceState, Relation, StateId, StateRegion, StrategicRegion,
    StrategicRegionId, WorldState,
};

/// Fluent builder for small hand-made worlds in tests.
pub struct WorldStateBuilder {
    state: WorldState,
}

impl WorldStateBuilder {
    pub fn new() -> Self {
        Self {
            state: WorldState::default(),
        }
    }

    pub fn with_country(mut self, tag: &str) -> Self {
        self.state.countries.insert(
            tag.to_string(),
            CountryState {
                tag: tag.to_string(),
                ..Default::default()
            },
        );
        self
    }

    pub fn with_country_state(mut self, tag: &str, country: CountryState) -> Self {
        self.state.countries.insert(
            tag.to_string(),
            CountryState {
                tag: tag.to_string(),
                ..country
            },
        );
        self
    }

    /// Set the source-side employed worker count of an existing country.
    pub fn with_workers(mut self, tag: &str, employed_workers: u64) -> Self {
        if let Some(country) = self.state.countries.get_mut(tag) {
            country.employed_workers = employed_workers;
        }
        self
    }

    pub fn with_government(mut self, tag: &str, government: Government) -> Self {
        if let Some(country) = self.state.countries.get_mut(tag) {
            country.government = government;
        }
        self
    }

    pub fn with_province(mut self, id: ProvinceId, owner_tag: Option<&str>) -> Self {
        self.state.provinces.insert(
            id,
            ProvinceState {
                owner: owner_tag.map(|s| s.to_string()),
                ..Default::default()
            },
        );
        self
    }

    pub fn with_sea(mut self, id: ProvinceId) -> Self {
        self.state.provinces.insert(
            id,
            ProvinceState {
                is_sea: true,
                ..Default::default()
            },
        );
        self
    }

    /// Add a state owned by `owner` and claim the listed provinces for it.
    ///
    /// Provinces not yet present are created with the same owner.
    pub fn with_state(mut self, id: StateId, owner: &str, provinces: &[ProvinceId]) -> Self {
        for &province in provinces {
            let entry = self
                .state
                .provinces
                .entry(province)
                .or_insert_with(|| ProvinceState {
                    owner: Some(owner.to_string()),
                    ..Default::default()
                });
            entry.state = Some(id);
        }
        self.state.states.insert(
            id,
            StateRegion {
                id,
                owner: owner.to_string(),
                provinces: provinces.to_vec(),
                ..Default::default()
            },
        );
        self
    }

    pub fn with_state_region(mut self, region: StateRegion) -> Self {
        self.state.states.insert(region.id, region);
        self
    }

    pub fn with_strategic_region(mut self, id: StrategicRegionId, provinces: &[ProvinceId]) -> Self {
        self.state.strategic_regions.insert(
            id,
            StrategicRegion {
                id,
                name: format!("region_{}", id),
                provinces: provinces.iter().copied().collect(),
            },
        );
        self
    }

    /// Record `relation` on `from`'s side toward `to`.
    pub fn with_relation(mut self, from: &str, to: &str, relation: Relation) -> Self {
        if let Some(country) = self.state.countries.get_mut(from) {
            country.relations.insert(to.to_string(), relation);
        }
        self
    }

    /// Make two existing countries mutual allies.
    pub fn with_alliance(mut self, a: &str, b: &str) -> Self {
        if let Some(country) = self.state.countries.get_mut(a) {
            country.allies.insert(b.to_string());
        }
        if let Some(country) = self.state.countries.get_mut(b) {
            country.allies.insert(a.to_string());
        }
        self
    }

    /// Append to the great power list (priority order) and flag the country.
    pub fn with_great_power(mut self, tag: &str) -> Self {
        if let Some(country) = self.state.countries.get_mut(tag) {
            country.great_power = true;
        }
        self.state.great_powers.push(tag.to_string());
        self
    }

    pub fn build(self) -> WorldState {
        self.state
    }
}

impl Default for WorldStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let state = WorldStateBuilder::default()
            .with_country("SWE")
            .with_province(1, Some("SWE"))
            .with_province(2, None)
            .with_state(10, "SWE", &[1, 3])
            .build();

        assert_eq!(state.provinces[&1].owner.as_deref(), Some("SWE"));
        assert!(state.provinces[&2].owner.is_none());
        // Province 3 created by the state, province 1 re-parented
        assert_eq!(state.provinces[&3].state, Some(10));
        assert_eq!(state.provinces[&1].state, Some(10));
        assert_eq!(state.states[&10].provinces, vec![1, 3]);
    }

    #[test]
    fn test_alliance_is_mutual() {
        let state = WorldStateBuilder::new()
            .with_country("ENG")
            .with_country("POR")
            .with_alliance("ENG", "POR")
            .build();
        assert!(state.countries["ENG"].allies.contains("POR"));
        assert!(state.countries["POR"].allies.contains("ENG"));
    }
}
