//! World conversion systems, one module per aggregate step.

pub mod air_bases;
pub mod diplomacy;
pub mod factions;
pub mod great_powers;
pub mod industry;
pub mod naval_bases;
pub mod resources;
pub mod strategic_regions;

pub use air_bases::{convert_air_bases, find_air_location, station_air_forces};
pub use diplomacy::{convert_diplomacy, SourceAgreement};
pub use factions::create_factions;
pub use great_powers::determine_great_powers;
pub use industry::{convert_industry, write_industry_report};
pub use naval_bases::{port_location_candidates, station_navies};
pub use resources::{convert_resources, ResourceMap};
pub use strategic_regions::reconcile_strategic_regions;
