//! Lifetime aggregation, rank resolution and display classification.

use crate::{catalog::RankTier, config::ContainerConfig, DrinkLog};

/// Total milliliters of pure alcohol across the entire log
///
/// Unlike the BAC estimate this is not windowed: every recorded drink
/// counts. Non-decreasing under adds; decreases only on deletion.
pub fn total_alcohol_ml(log: &DrinkLog) -> f64 {
    log.events().iter().map(|e| e.pure_alcohol_ml()).sum()
}

/// Resolve the rank tier for a lifetime volume
///
/// Converts to liters and picks the first tier containing the value, in
/// ascending tier order. Falls back to the first tier if none match, which
/// is unreachable for a validated catalog; `tiers` must be non-empty.
pub fn resolve_rank(total_alcohol_ml: f64, tiers: &[RankTier]) -> &RankTier {
    let liters = total_alcohol_ml / 1000.0;
    tiers
        .iter()
        .find(|t| t.contains(liters))
        .unwrap_or(&tiers[0])
}

/// Lifetime volume expressed in equivalent reference containers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerEquivalents {
    pub beer_bottles: u64,
    pub vodka_bottles: u64,
}

/// Project the lifetime volume onto the two reference containers
pub fn container_equivalents(
    total_alcohol_ml: f64,
    containers: &ContainerConfig,
) -> ContainerEquivalents {
    ContainerEquivalents {
        beer_bottles: (total_alcohol_ml / containers.beer_bottle_alcohol_ml).floor() as u64,
        vodka_bottles: (total_alcohol_ml / containers.vodka_bottle_alcohol_ml).floor() as u64,
    }
}

/// Display classification of a BAC estimate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntoxicationLevel {
    Sober,
    Light,
    Moderate,
    Heavy,
    Critical,
}

impl IntoxicationLevel {
    /// Classify a per-mille BAC value
    pub fn from_bac(bac: f64) -> Self {
        if bac < 0.3 {
            IntoxicationLevel::Sober
        } else if bac < 0.5 {
            IntoxicationLevel::Light
        } else if bac < 1.0 {
            IntoxicationLevel::Moderate
        } else if bac < 2.0 {
            IntoxicationLevel::Heavy
        } else {
            IntoxicationLevel::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IntoxicationLevel::Sober => "Sober",
            IntoxicationLevel::Light => "Lightly intoxicated",
            IntoxicationLevel::Moderate => "Moderately intoxicated",
            IntoxicationLevel::Heavy => "Heavily intoxicated",
            IntoxicationLevel::Critical => "Critical",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_default_catalog;
    use chrono::{TimeZone, Utc};

    fn log_with(contributions: &[(f64, f64)]) -> DrinkLog {
        let mut log = DrinkLog::new();
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        for (amount, percentage) in contributions {
            log.add(*amount, *percentage, now, now);
        }
        log
    }

    #[test]
    fn test_total_of_empty_log() {
        assert_eq!(total_alcohol_ml(&DrinkLog::new()), 0.0);
    }

    #[test]
    fn test_total_is_additive() {
        let mut log = log_with(&[(500.0, 5.0), (150.0, 12.0)]);
        let before = total_alcohol_ml(&log);

        let now = Utc.timestamp_opt(1_700_100_000, 0).unwrap();
        log.add(50.0, 40.0, now, now);

        let after = total_alcohol_ml(&log);
        assert!((after - before - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_removal_decreases_total_by_exact_contribution() {
        let mut log = log_with(&[(500.0, 5.0), (150.0, 12.0), (50.0, 40.0)]);
        let before = total_alcohol_ml(&log);

        let victim = log.events()[1].clone();
        log.remove(victim.id).unwrap();

        let after = total_alcohol_ml(&log);
        assert!((before - after - victim.pure_alcohol_ml()).abs() < 1e-9);
    }

    #[test]
    fn test_novice_rank_for_small_volume() {
        // Contributions of 25 and 18 mL: 43 mL total, 0.043 L
        let log = log_with(&[(500.0, 5.0), (150.0, 12.0)]);
        let total = total_alcohol_ml(&log);
        assert!((total - 43.0).abs() < 1e-9);

        let catalog = build_default_catalog();
        let rank = resolve_rank(total, &catalog.tiers);
        assert_eq!(rank.name, "Novice");
    }

    #[test]
    fn test_rank_boundaries_are_half_open() {
        let catalog = build_default_catalog();

        assert_eq!(resolve_rank(4_999.0, &catalog.tiers).name, "Novice");
        assert_eq!(resolve_rank(5_000.0, &catalog.tiers).name, "Amateur");
        assert_eq!(resolve_rank(200_000.0, &catalog.tiers).name, "Legendary");
    }

    #[test]
    fn test_every_volume_maps_to_exactly_one_tier() {
        let catalog = build_default_catalog();

        // Pseudo-random sweep over [0, 400] liters
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        for _ in 0..1000 {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            let liters = (seed >> 11) as f64 / (1u64 << 53) as f64 * 400.0;

            let matching = catalog.tiers.iter().filter(|t| t.contains(liters)).count();
            assert_eq!(matching, 1, "volume {} liters matched {} tiers", liters, matching);
        }
    }

    #[test]
    fn test_container_equivalents_floor() {
        let containers = ContainerConfig::default();

        let eq = container_equivalents(43.0, &containers);
        assert_eq!(eq.beer_bottles, 1); // floor(43 / 25)
        assert_eq!(eq.vodka_bottles, 0); // floor(43 / 200)

        let eq = container_equivalents(400.0, &containers);
        assert_eq!(eq.beer_bottles, 16);
        assert_eq!(eq.vodka_bottles, 2);
    }

    #[test]
    fn test_intoxication_thresholds() {
        assert_eq!(IntoxicationLevel::from_bac(0.0), IntoxicationLevel::Sober);
        assert_eq!(IntoxicationLevel::from_bac(0.29), IntoxicationLevel::Sober);
        assert_eq!(IntoxicationLevel::from_bac(0.3), IntoxicationLevel::Light);
        assert_eq!(IntoxicationLevel::from_bac(0.5), IntoxicationLevel::Moderate);
        assert_eq!(IntoxicationLevel::from_bac(1.0), IntoxicationLevel::Heavy);
        assert_eq!(IntoxicationLevel::from_bac(2.0), IntoxicationLevel::Critical);
        assert_eq!(IntoxicationLevel::from_bac(3.5), IntoxicationLevel::Critical);
    }
}
