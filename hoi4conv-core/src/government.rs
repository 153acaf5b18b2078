//! Government types and faction compatibility.
//!
//! Whether a great power may bring an ally into its faction depends on the two
//! governments. The rule is a fixed table rather than a chain of conditionals
//! so that totality and symmetry can be checked directly.

use serde::{Deserialize, Serialize};

/// Target-world government label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Government {
    AbsoluteMonarchy,
    Democratic,
    PrussianConstitutionalism,
    HmsGovernment,
    Communism,
    Syndicalism,
    Fascism,
    /// Any label not listed above.
    #[default]
    Neutrality,
}

impl Government {
    pub const ALL: [Government; 8] = [
        Government::AbsoluteMonarchy,
        Government::Democratic,
        Government::PrussianConstitutionalism,
        Government::HmsGovernment,
        Government::Communism,
        Government::Syndicalism,
        Government::Fascism,
        Government::Neutrality,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Government::AbsoluteMonarchy => "absolute_monarchy",
            Government::Democratic => "democratic",
            Government::PrussianConstitutionalism => "prussian_constitutionalism",
            Government::HmsGovernment => "hms_government",
            Government::Communism => "communism",
            Government::Syndicalism => "syndicalism",
            Government::Fascism => "fascism",
            Government::Neutrality => "neutrality",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Whether a faction led by `self` may admit an ally governed by `ally`.
    pub fn allows_faction_with(self, ally: Government) -> bool {
        FACTION_COMPATIBILITY[self.index()][ally.index()]
    }
}

impl From<&str> for Government {
    fn from(name: &str) -> Self {
        Government::ALL
            .into_iter()
            .find(|g| g.as_str() == name)
            .unwrap_or(Government::Neutrality)
    }
}

impl From<String> for Government {
    fn from(name: String) -> Self {
        Government::from(name.as_str())
    }
}

impl From<Government> for String {
    fn from(government: Government) -> Self {
        government.as_str().to_string()
    }
}

impl std::fmt::Display for Government {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const T: bool = true;
const F: bool = false;

/// Rows: faction leader. Columns: prospective ally. Order matches [`Government::ALL`].
#[rustfmt::skip]
const FACTION_COMPATIBILITY: [[bool; 8]; 8] = [
    //          AbsM Dem  Prus HMS  Com  Synd Fasc Neut
    /* AbsM */ [T,   T,   T,   T,   F,   F,   T,   F],
    /* Dem  */ [T,   T,   T,   T,   F,   F,   F,   F],
    /* Prus */ [T,   T,   T,   T,   F,   F,   T,   F],
    /* HMS  */ [T,   T,   T,   T,   F,   F,   F,   F],
    /* Com  */ [F,   F,   F,   F,   T,   T,   F,   F],
    /* Synd */ [F,   F,   F,   F,   T,   T,   T,   F],
    /* Fasc */ [T,   F,   T,   F,   F,   T,   T,   F],
    /* Neut */ [F,   F,   F,   F,   F,   F,   F,   T],
];
