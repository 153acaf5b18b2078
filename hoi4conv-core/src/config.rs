use crate::error::ConversionError;
use crate::state::Date;
use serde::{Deserialize, Serialize};

/// Conversion tuning parameters.
///
/// Defaults reproduce the stock converter behaviour. Every field may be
/// omitted from a config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// How strongly national workforces are pulled toward the world mean.
    ///
    /// - `0.0`: no compression, factories proportional to workers
    /// - `1.0`: every country gets the mean workforce
    pub industrial_shape_factor: f64,
    /// How strongly world industry is calibrated toward the baseline.
    pub ic_factor: f64,
    /// Factories per employed worker before calibration.
    pub workers_to_factories: f64,
    /// World factory target before subtracting the landed-country count.
    pub world_factory_baseline: f64,
    pub max_factories_per_state: u32,
    /// Fraction of a state's factories built as military factories.
    pub military_factory_share: f64,
    /// Fraction of a coastal state's factories built as dockyards.
    pub dockyard_share: f64,

    /// Factories needed per basic air base level.
    pub factories_per_air_base: u32,
    /// Infrastructure above this grants one extra air base level.
    pub air_base_infrastructure_threshold: u32,
    pub capital_air_base_bonus: u32,
    pub great_power_air_base_bonus: u32,
    pub max_air_base_level: u32,

    /// Start date stamped on converted relations.
    pub relation_start_date: Date,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            industrial_shape_factor: 0.0,
            ic_factor: 0.0,
            workers_to_factories: 0.000019,
            world_factory_baseline: 1189.0,
            max_factories_per_state: 12,
            military_factory_share: 0.4,
            dockyard_share: 0.15,
            factories_per_air_base: 4,
            air_base_infrastructure_threshold: 5,
            capital_air_base_bonus: 5,
            great_power_air_base_bonus: 5,
            max_air_base_level: 10,
            relation_start_date: Date::new(1930, 1, 1),
        }
    }
}

impl ConversionConfig {
    /// Reject parameter combinations that would make the output meaningless.
    pub fn validate(&self) -> Result<(), ConversionError> {
        fn unit_range(field: &'static str, value: f64) -> Result<(), ConversionError> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConversionError::InvalidConfig {
                    field,
                    reason: format!("{} is outside [0, 1]", value),
                })
            }
        }

        unit_range("industrial_shape_factor", self.industrial_shape_factor)?;
        unit_range("ic_factor", self.ic_factor)?;
        unit_range("military_factory_share", self.military_factory_share)?;
        unit_range("dockyard_share", self.dockyard_share)?;

        if self.military_factory_share + self.dockyard_share > 1.0 {
            return Err(ConversionError::InvalidConfig {
                field: "dockyard_share",
                reason: "military and dockyard shares exceed 1".to_string(),
            });
        }
        if !(self.workers_to_factories > 0.0) {
            return Err(ConversionError::InvalidConfig {
                field: "workers_to_factories",
                reason: format!("{} must be positive", self.workers_to_factories),
            });
        }
        if self.factories_per_air_base == 0 {
            return Err(ConversionError::InvalidConfig {
                field: "factories_per_air_base",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
