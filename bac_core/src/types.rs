//! Core domain types for the Litrbol consumption tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - The user profile feeding the BAC estimator
//! - Drink events and the append-only drink log

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Profile Types
// ============================================================================

/// Gender, used to select the Widmark body-water constant
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

/// Physiological parameters used by the BAC estimator
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub gender: Gender,
    pub weight_kg: f64,
    /// Recorded but not used by the current formula; retained for future
    /// height-aware body-water models.
    pub height_cm: f64,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            gender: Gender::Male,
            weight_kg: 75.0,
            height_cm: 175.0,
        }
    }
}

/// Partial profile edit; `None` fields keep their current value
#[derive(Clone, Copy, Debug, Default)]
pub struct ProfileUpdate {
    pub gender: Option<Gender>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
}

impl Profile {
    /// Apply a partial update in place, field by field
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(gender) = update.gender {
            self.gender = gender;
        }
        if let Some(weight_kg) = update.weight_kg {
            self.weight_kg = weight_kg;
        }
        if let Some(height_cm) = update.height_cm {
            self.height_cm = height_cm;
        }
    }
}

// ============================================================================
// Drink Log Types
// ============================================================================

/// A recorded drink event
///
/// Events are immutable once created; the only mutation the log supports is
/// full deletion by id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DrinkEvent {
    pub id: i64,
    pub amount_ml: f64,
    /// Alcohol by volume, in [0, 100]
    pub percentage: f64,
    /// May be backdated by the user; serialized as an RFC 3339 string
    pub datetime: DateTime<Utc>,
}

impl DrinkEvent {
    /// Milliliters of pure alcohol in this drink
    pub fn pure_alcohol_ml(&self) -> f64 {
        self.amount_ml * self.percentage / 100.0
    }
}

/// Insertion-ordered collection of drink events
///
/// Insertion order is irrelevant for computation; consumers re-sort by
/// `datetime` when order matters. Serializes as a bare JSON array.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DrinkLog {
    events: Vec<DrinkEvent>,
}

impl DrinkLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[DrinkEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append a drink event, assigning a creation-time id
    ///
    /// Ids derive from the creation clock in milliseconds and are bumped
    /// past the current maximum, so adds within the same millisecond stay
    /// unique and ids remain strictly monotonic.
    pub fn add(
        &mut self,
        amount_ml: f64,
        percentage: f64,
        datetime: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> i64 {
        let id = self.next_id(now);
        self.events.push(DrinkEvent {
            id,
            amount_ml,
            percentage,
            datetime,
        });
        id
    }

    /// Remove the event with the given id, preserving the relative order of
    /// all remaining events. Returns the removed event, or None if no event
    /// had that id.
    pub fn remove(&mut self, id: i64) -> Option<DrinkEvent> {
        let index = self.events.iter().position(|e| e.id == id)?;
        Some(self.events.remove(index))
    }

    fn next_id(&self, now: DateTime<Utc>) -> i64 {
        let stamp = now.timestamp_millis();
        match self.events.iter().map(|e| e.id).max() {
            Some(max) if stamp <= max => max + 1,
            _ => stamp,
        }
    }
}
