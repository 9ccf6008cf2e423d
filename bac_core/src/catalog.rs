//! Built-in rank tiers and drink presets.
//!
//! This module provides the static gamification table (lifetime-volume rank
//! tiers) and the quick-entry drink presets.

use once_cell::sync::Lazy;

/// A gamification rank, keyed on lifetime pure-alcohol volume in liters
///
/// Membership is half-open: `min_liters <= volume < max_liters`. The last
/// tier is unbounded (`f64::INFINITY`).
#[derive(Clone, Debug, PartialEq)]
pub struct RankTier {
    pub min_liters: f64,
    pub max_liters: f64,
    pub name: String,
    pub icon: String,
    /// Display theme hint for the presentation layer
    pub theme: String,
}

impl RankTier {
    /// Whether the given lifetime volume (liters) falls in this tier
    pub fn contains(&self, liters: f64) -> bool {
        liters >= self.min_liters && liters < self.max_liters
    }
}

/// A quick-entry preset for a common drink type
#[derive(Clone, Debug, PartialEq)]
pub struct DrinkPreset {
    pub name: String,
    pub amount_ml: f64,
    pub percentage: f64,
}

/// The complete static catalog: rank tiers and drink presets
#[derive(Clone, Debug)]
pub struct Catalog {
    /// Rank tiers, ascending; together they partition `[0, inf)`
    pub tiers: Vec<RankTier>,
    pub presets: Vec<DrinkPreset>,
}

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog with the built-in tiers and presets
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns
/// a cached reference. This function is retained for testing and custom
/// catalog creation.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

fn tier(min: f64, max: f64, name: &str, icon: &str, theme: &str) -> RankTier {
    RankTier {
        min_liters: min,
        max_liters: max,
        name: name.into(),
        icon: icon.into(),
        theme: theme.into(),
    }
}

fn preset(name: &str, amount_ml: f64, percentage: f64) -> DrinkPreset {
    DrinkPreset {
        name: name.into(),
        amount_ml,
        percentage,
    }
}

fn build_default_catalog_internal() -> Catalog {
    Catalog {
        tiers: vec![
            tier(0.0, 5.0, "Novice", "\u{1F331}", "green"),
            tier(5.0, 20.0, "Amateur", "\u{1F37A}", "cyan"),
            tier(20.0, 50.0, "Experienced", "\u{1F3AF}", "purple"),
            tier(50.0, 100.0, "Master of Sport", "\u{1F3C6}", "orange"),
            tier(100.0, 200.0, "Grandmaster", "\u{1F451}", "red"),
            tier(200.0, f64::INFINITY, "Legendary", "\u{26A1}", "gold"),
        ],
        presets: vec![
            preset("beer", 500.0, 5.0),
            preset("wine", 150.0, 12.0),
            preset("vodka", 50.0, 40.0),
        ],
    }
}

impl Catalog {
    /// Look up a preset by name, case-insensitively
    pub fn find_preset(&self, name: &str) -> Option<&DrinkPreset> {
        self.presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.tiers.is_empty() {
            errors.push("Catalog has no rank tiers".to_string());
            return errors;
        }

        if self.tiers[0].min_liters != 0.0 {
            errors.push(format!(
                "First tier must start at 0 liters, starts at {}",
                self.tiers[0].min_liters
            ));
        }

        for tier in &self.tiers {
            if tier.name.is_empty() {
                errors.push("Rank tier has empty name".to_string());
            }
            if tier.min_liters >= tier.max_liters {
                errors.push(format!(
                    "Rank tier '{}' has min {} >= max {}",
                    tier.name, tier.min_liters, tier.max_liters
                ));
            }
        }

        // Consecutive tiers must join exactly: no gaps, no overlaps
        for pair in self.tiers.windows(2) {
            if pair[0].max_liters != pair[1].min_liters {
                errors.push(format!(
                    "Tiers '{}' and '{}' do not partition cleanly ({} vs {})",
                    pair[0].name, pair[1].name, pair[0].max_liters, pair[1].min_liters
                ));
            }
        }

        if let Some(last) = self.tiers.last() {
            if last.max_liters.is_finite() {
                errors.push(format!(
                    "Last tier '{}' must be unbounded, has max {}",
                    last.name, last.max_liters
                ));
            }
        }

        for preset in &self.presets {
            if preset.name.is_empty() {
                errors.push("Drink preset has empty name".to_string());
            }
            if preset.amount_ml <= 0.0 {
                errors.push(format!(
                    "Preset '{}' has non-positive amount {}",
                    preset.name, preset.amount_ml
                ));
            }
            if !(0.0..=100.0).contains(&preset.percentage) {
                errors.push(format!(
                    "Preset '{}' has out-of-range strength {}",
                    preset.name, preset.percentage
                ));
            }
        }

        let mut names: Vec<&str> = self.presets.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        if names.len() != self.presets.len() {
            errors.push("Duplicate preset names".to_string());
        }

        errors
    }
}
