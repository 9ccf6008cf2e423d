//! BAC estimation over the rolling drink session.
//!
//! This module implements the estimation rules:
//! - Rolling-window session selection (24 h by default)
//! - Per-drink Widmark concentration with linear elimination
//! - Linear superposition across drinks (no interaction modeled)

use crate::{config::ModelConfig, DrinkEvent, DrinkLog, Gender, Profile};
use chrono::{DateTime, Duration, Utc};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Select the drinks belonging to the current session
///
/// Returns the events with `datetime > now - window_hours`. The lower
/// boundary is strict: an event exactly `window_hours` old is excluded.
/// Output order is unspecified; callers sort as needed.
pub fn select_session(log: &DrinkLog, now: DateTime<Utc>, window_hours: i64) -> Vec<DrinkEvent> {
    let cutoff = now - Duration::hours(window_hours);
    log.events()
        .iter()
        .filter(|e| e.datetime > cutoff)
        .cloned()
        .collect()
}

/// Estimate the current blood-alcohol concentration in per-mille
///
/// Each drink contributes independently and the contributions sum:
/// 1. Widmark factor `r` from the profile gender
/// 2. Alcohol grams: `amount_ml * percentage * density / 100`
/// 3. Initial concentration: `grams / (weight_kg * r)`
/// 4. Linear elimination at `elimination_rate_per_hour` over the elapsed time
/// 5. Per-drink floor at zero before summing
///
/// Future-dated drinks yield negative elapsed hours, which inflates their
/// contribution; only the per-drink zero floor applies.
pub fn estimate_bac(
    session: &[DrinkEvent],
    profile: &Profile,
    now: DateTime<Utc>,
    model: &ModelConfig,
) -> f64 {
    let r = match profile.gender {
        Gender::Male => model.widmark_male,
        Gender::Female => model.widmark_female,
    };

    session
        .iter()
        .map(|drink| {
            let alcohol_grams = drink.amount_ml * drink.percentage * model.ethanol_density / 100.0;
            let initial = alcohol_grams / (profile.weight_kg * r);

            let elapsed_hours =
                (now - drink.datetime).num_milliseconds() as f64 / MILLIS_PER_HOUR;
            let eliminated = elapsed_hours * model.elimination_rate_per_hour;

            (initial - eliminated).max(0.0)
        })
        .sum()
}
