use crate::government::Government;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// A specific date in history, serialized in the Paradox `Y.M.D` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Date {
    pub year: i32,
    pub month: u8, // 1-12
    pub day: u8,   // 1-31
}

impl Date {
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }
}

impl Default for Date {
    fn default() -> Self {
        Self::new(1936, 1, 1)
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.year, self.month, self.day)
    }
}

impl FromStr for Date {
    type Err = String;

    /// Parses the Paradox `Y.M.D` form, e.g. `1930.1.1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('.');
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(format!("Invalid date: {}. Expected Y.M.D", s));
        };

        let year = year
            .parse()
            .map_err(|_| format!("Invalid year in date: {}", s))?;
        let month: u8 = month
            .parse()
            .map_err(|_| format!("Invalid month in date: {}", s))?;
        let day: u8 = day
            .parse()
            .map_err(|_| format!("Invalid day in date: {}", s))?;

        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(format!("Date out of range: {}", s));
        }

        Ok(Self::new(year, month, day))
    }
}

impl TryFrom<String> for Date {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Date> for String {
    fn from(date: Date) -> Self {
        date.to_string()
    }
}

pub type Tag = String;
pub type ProvinceId = u32;
pub type StateId = u32;
pub type StrategicRegionId = u32;
/// Index into [`WorldState::factions`].
pub type FactionId = usize;

/// The target world, handed over by upstream aggregation and mutated in place
/// by the conversion systems.
///
/// Every registry is an ordered map so that iteration, and therefore every
/// order-dependent step (vote tie-breaks, faction formation, agreement
/// emission), is reproducible.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorldState {
    pub provinces: BTreeMap<ProvinceId, ProvinceState>,
    pub states: BTreeMap<StateId, StateRegion>,
    pub countries: BTreeMap<Tag, CountryState>,
    pub strategic_regions: BTreeMap<StrategicRegionId, StrategicRegion>,
    /// Great powers in priority order.
    #[serde(default)]
    pub great_powers: Vec<Tag>,
    #[serde(default)]
    pub factions: Vec<Faction>,
    #[serde(default)]
    pub agreements: Vec<Agreement>,
}

/// A single land or sea province.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProvinceState {
    pub owner: Option<Tag>,
    /// State this province was aggregated into.
    pub state: Option<StateId>,
    /// Naval base level (0 = no port).
    pub naval_base: u32,
    /// Air base level (0 = none).
    pub air_base: u32,
    pub is_sea: bool,
}

impl ProvinceState {
    pub fn has_naval_base(&self) -> bool {
        self.naval_base > 0
    }
}

/// An aggregated cluster of provinces with a single owner.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StateRegion {
    pub id: StateId,
    pub owner: Tag,
    /// Constituent provinces, in aggregation order.
    pub provinces: Vec<ProvinceId>,
    /// Employed industrial workers in the source provinces.
    pub employed_workers: f64,
    pub coastal: bool,
    pub infrastructure: u32,
    pub civilian_factories: u32,
    pub military_factories: u32,
    pub dockyards: u32,
    pub air_base: u32,
    pub resources: BTreeMap<String, f64>,
    pub strategic_region: Option<StrategicRegionId>,
}

impl StateRegion {
    pub fn total_factories(&self) -> u32 {
        self.civilian_factories + self.military_factories + self.dockyards
    }
}

/// National factory totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Industry {
    pub military_factories: u32,
    pub civilian_factories: u32,
    pub dockyards: u32,
}

impl Industry {
    pub fn total(&self) -> u32 {
        self.military_factories + self.civilian_factories + self.dockyards
    }
}

impl std::ops::AddAssign for Industry {
    fn add_assign(&mut self, rhs: Self) {
        self.military_factories += rhs.military_factories;
        self.civilian_factories += rhs.civilian_factories;
        self.dockyards += rhs.dockyards;
    }
}

/// One side's view of a bilateral relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Relation {
    /// Opinion value (-200..=200 in the source game).
    pub value: i32,
    /// The owner of this record guarantees the other country.
    pub guarantee: bool,
    /// The owner of this record leads the other country's sphere of influence.
    pub sphere_leader: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CountryState {
    pub tag: Tag,
    pub states: BTreeSet<StateId>,
    /// Employed industrial workers across the source country.
    pub employed_workers: u64,
    /// Factories per employed worker, set by industry conversion.
    pub industrial_ratio: Option<f64>,
    pub industry: Industry,
    pub government: Government,
    /// Relations keyed by the other country's tag.
    pub relations: BTreeMap<Tag, Relation>,
    pub allies: BTreeSet<Tag>,
    pub faction: Option<FactionId>,
    pub great_power: bool,
    pub capital_state: Option<StateId>,
    pub capital_province: Option<ProvinceId>,
    pub air_base_location: Option<ProvinceId>,
    pub navy_base_location: Option<ProvinceId>,
}

impl CountryState {
    pub fn is_in_faction(&self) -> bool {
        self.faction.is_some()
    }
}

/// Coarse geographic grouping used for operational partitioning.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StrategicRegion {
    pub id: StrategicRegionId,
    pub name: String,
    pub provinces: BTreeSet<ProvinceId>,
}

/// A great-power-led alliance bloc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faction {
    pub leader: Tag,
    /// Members in admission order, leader first.
    pub members: Vec<Tag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgreementType {
    Alliance,
    Vassal,
    Guarantee,
    Sphere,
    Relation,
}

impl std::fmt::Display for AgreementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AgreementType::Alliance => "alliance",
            AgreementType::Vassal => "vassal",
            AgreementType::Guarantee => "guarantee",
            AgreementType::Sphere => "sphere",
            AgreementType::Relation => "relation",
        };
        f.write_str(name)
    }
}

/// A diplomatic agreement record ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agreement {
    pub country1: Tag,
    pub country2: Tag,
    #[serde(rename = "type")]
    pub kind: AgreementType,
    /// Only set for [`AgreementType::Relation`].
    pub value: Option<i32>,
    pub start_date: Date,
}

impl WorldState {
    /// Country tags with at least one state.
    pub fn landed_countries(&self) -> Vec<Tag> {
        self.countries
            .iter()
            .filter(|(_, country)| !country.states.is_empty())
            .map(|(tag, _)| tag.clone())
            .collect()
    }

    /// Agreements of the given type.
    pub fn agreements_of(&self, kind: AgreementType) -> impl Iterator<Item = &Agreement> {
        self.agreements.iter().filter(move |a| a.kind == kind)
    }

    /// The faction a country belongs to, if any.
    pub fn faction_of(&self, tag: &str) -> Option<&Faction> {
        self.countries
            .get(tag)
            .and_then(|c| c.faction)
            .and_then(|id| self.factions.get(id))
    }
}
