//! Industrial capacity normalization.
//!
//! Source countries report employed industrial workers. Raw worker counts vary
//! by orders of magnitude between great and minor powers, so before they are
//! turned into factories the national figures are pulled toward the world mean
//! (shape factor) and the world total is pulled toward a fixed baseline
//! (IC factor):
//!
//! ```text
//! adjusted_i   = workers_i - shape × (workers_i - mean)
//! base         = Σ adjusted_i × workers_to_factories
//! calibrated   = base - ic × (base - (baseline - landed_count))
//! ratio_i      = adjusted_i × (calibrated / Σ adjusted) / workers_i
//! ```
//!
//! Each state then multiplies its own employed workers by its owner's ratio.

use crate::config::ConversionConfig;
use crate::error::ConversionError;
use crate::state::{Industry, StateRegion, Tag, WorldState};
use std::collections::BTreeMap;
use tracing::instrument;

/// Run the whole industry conversion. Returns the landed-country tags.
#[instrument(skip_all, name = "industry")]
pub fn convert_industry(
    world: &mut WorldState,
    config: &ConversionConfig,
) -> Result<Vec<Tag>, ConversionError> {
    log::info!("Converting industry");

    let landed = add_states_to_countries(world);
    let ratios = calculate_factory_worker_ratios(world, &landed, config)?;
    put_industry_in_states(world, &ratios, config);
    calculate_industry_in_countries(world);
    report_industry_levels(world);

    Ok(landed)
}

/// Attach every state to its owner. Returns countries owning at least one state.
pub fn add_states_to_countries(world: &mut WorldState) -> Vec<Tag> {
    for (&state_id, state) in &world.states {
        match world.countries.get_mut(&state.owner) {
            Some(owner) => {
                owner.states.insert(state_id);
            }
            None => log::debug!(
                "State {} is owned by {}, which was not converted",
                state_id,
                state.owner
            ),
        }
    }

    world.landed_countries()
}

/// Compute factories-per-worker for every landed country with workers.
///
/// Countries without employed workers get no entry; their states keep
/// whatever factories they already carry.
pub fn calculate_factory_worker_ratios(
    world: &WorldState,
    landed: &[Tag],
    config: &ConversionConfig,
) -> Result<BTreeMap<Tag, f64>, ConversionError> {
    let workers: BTreeMap<&Tag, f64> = landed
        .iter()
        .filter_map(|tag| {
            let country = world.countries.get(tag)?;
            (country.employed_workers > 0).then_some((tag, country.employed_workers as f64))
        })
        .collect();

    if workers.is_empty() {
        return Err(ConversionError::NoWorkforce);
    }

    let adjusted = adjust_workers(&workers, config.industrial_shape_factor);
    let total_adjusted: f64 = adjusted.values().sum();
    if total_adjusted.is_nan() || total_adjusted <= 0.0 {
        return Err(ConversionError::NoWorkforce);
    }

    let factories_per_worker =
        worldwide_factory_worker_ratio(total_adjusted, landed.len(), config);

    let ratios = adjusted
        .into_iter()
        .map(|(tag, adjusted_workers)| {
            let actual = workers[tag];
            let factories = adjusted_workers * factories_per_worker;
            (tag.clone(), (factories / actual).max(0.0))
        })
        .collect();

    Ok(ratios)
}

/// Compress each country's workforce toward the mean by `shape_factor`.
fn adjust_workers<'a>(
    workers: &BTreeMap<&'a Tag, f64>,
    shape_factor: f64,
) -> BTreeMap<&'a Tag, f64> {
    let total: f64 = workers.values().sum();
    let mean = total / workers.len() as f64;

    workers
        .iter()
        .map(|(&tag, &count)| {
            let delta = count - mean;
            (tag, count - shape_factor * delta)
        })
        .collect()
}

/// Calibrated world factories divided by total (adjusted) workers.
fn worldwide_factory_worker_ratio(
    total_adjusted: f64,
    landed_count: usize,
    config: &ConversionConfig,
) -> f64 {
    let base_industry = total_adjusted * config.workers_to_factories;
    let target_industry = config.world_factory_baseline - landed_count as f64;
    let delta_industry = base_industry - target_industry;
    let calibrated = base_industry - config.ic_factor * delta_industry;

    log::debug!(
        "World industry: base {:.1}, target {:.1}, calibrated {:.1}",
        base_industry,
        target_industry,
        calibrated
    );

    calibrated / total_adjusted
}

/// Apply each owner's ratio to its states and record it on the country.
pub fn put_industry_in_states(
    world: &mut WorldState,
    ratios: &BTreeMap<Tag, f64>,
    config: &ConversionConfig,
) {
    for (tag, &ratio) in ratios {
        if let Some(country) = world.countries.get_mut(tag) {
            country.industrial_ratio = Some(ratio);
        }
    }

    for state in world.states.values_mut() {
        let Some(&ratio) = ratios.get(&state.owner) else {
            continue;
        };
        state.convert_industry(ratio, config);
    }
}

impl StateRegion {
    /// Turn local workers into factories at `factories_per_worker`.
    ///
    /// The total is rounded and capped per state, then split into military
    /// factories, dockyards (coastal states only) and civilian factories.
    pub fn convert_industry(&mut self, factories_per_worker: f64, config: &ConversionConfig) {
        let raw = (self.employed_workers * factories_per_worker).round();
        let factories = if raw.is_finite() {
            raw.clamp(0.0, config.max_factories_per_state as f64) as u32
        } else {
            0
        };

        let military = ((factories as f64 * config.military_factory_share).round() as u32)
            .min(factories);
        let dockyards = if self.coastal {
            ((factories as f64 * config.dockyard_share).round() as u32).min(factories - military)
        } else {
            0
        };

        self.military_factories = military;
        self.dockyards = dockyards;
        self.civilian_factories = factories - military - dockyards;
    }

    pub fn industry(&self) -> Industry {
        Industry {
            military_factories: self.military_factories,
            civilian_factories: self.civilian_factories,
            dockyards: self.dockyards,
        }
    }
}

/// Recompute national totals from owned states.
pub fn calculate_industry_in_countries(world: &mut WorldState) {
    for country in world.countries.values_mut() {
        let mut industry = Industry::default();
        for state_id in &country.states {
            if let Some(state) = world.states.get(state_id) {
                industry += state.industry();
            }
        }
        country.industry = industry;
    }
}

/// Total factories over every state in the world.
pub fn world_industry(world: &WorldState) -> Industry {
    let mut industry = Industry::default();
    for state in world.states.values() {
        industry += state.industry();
    }
    industry
}

pub fn report_industry_levels(world: &WorldState) {
    let industry = world_industry(world);
    log::debug!("Total factories: {}", industry.total());
    log::debug!("\t{} military factories", industry.military_factories);
    log::debug!("\t{} civilian factories", industry.civilian_factories);
    log::debug!("\t{} dockyards", industry.dockyards);
}

/// Write per-country factory totals as CSV.
pub fn write_industry_report<W: std::io::Write>(
    world: &WorldState,
    writer: W,
) -> Result<(), csv::Error> {
    let mut report = csv::Writer::from_writer(writer);
    report.write_record([
        "tag",
        "military factories",
        "civilian factories",
        "dockyards",
        "total factories",
    ])?;

    for (tag, country) in &world.countries {
        let industry = country.industry;
        report.write_record([
            tag.clone(),
            industry.military_factories.to_string(),
            industry.civilian_factories.to_string(),
            industry.dockyards.to_string(),
            industry.total().to_string(),
        ])?;
    }

    report.flush()?;
    Ok(())
}
