//! # HoI4 Conversion Core
//!
//! Deterministic world conversion from a Victoria 2 end state into a
//! Hearts of Iron IV start state.
//!
//! The converter takes an already-imported [`WorldState`] (countries, states,
//! provinces, strategic regions) plus the source-side data in
//! [`ConversionInputs`] and rewrites the world in place.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌───────────────────┐
//! │   industry   │──▶│  resources   │──▶│ strategic regions │
//! │ (normalize)  │   │ (per state)  │   │ (majority vote)   │
//! └──────────────┘   └──────────────┘   └─────────┬─────────┘
//!                                                 │
//! ┌──────────────┐   ┌──────────────┐   ┌─────────▼─────────┐
//! │   factions   │◀──│ air / navies │◀──│ diplomacy + GPs   │
//! │   (greedy)   │   │ (BFS basing) │   │ (canonical pairs) │
//! └──────────────┘   └──────────────┘   └───────────────────┘
//! ```
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`WorldState`] | Target world being converted (countries, states, regions) |
//! | [`ConversionConfig`] | Tunable constants (worker ratio, factory caps, air bases) |
//! | [`AdjacencyGraph`] | Province adjacency for reachability searches |
//! | [`Government`] | Ideology with the faction compatibility table |
//! | [`convert_world`] | Runs every step in dependency order |
//!
//! All registries are ordered maps, so two runs over the same input produce
//! identical output.

pub mod config;
pub mod convert;
pub mod error;
pub mod government;
pub mod graph;
pub mod mapping;
pub mod state;
pub mod systems;
pub mod testing;

pub use config::ConversionConfig;
pub use convert::{convert_world, ConversionInputs, ConversionSummary};
pub use error::ConversionError;
pub use government::Government;
pub use graph::AdjacencyGraph;
pub use mapping::CountryMapping;
pub use state::{
    Agreement, AgreementType, CountryState, Date, Faction, Industry, ProvinceState, Relation,
    StateRegion, StrategicRegion, WorldState,
};
