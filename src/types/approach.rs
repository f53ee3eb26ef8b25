//! Close-approach record
//!
//! A `CloseApproach` stores the designation of its NEO as a plain string until
//! the database links it; after that it also holds the NEO's handle.
//! [`LinkedApproach`] is the borrowed view handed to serializers, pairing an
//! approach with the NEO it was linked to.

use super::neo::{NearEarthObject, NeoId};
use super::time::format_calendar_time;
use chrono::{DateTime, Utc};
use std::fmt;

/// A close approach to Earth by an NEO
#[derive(Debug, Clone, PartialEq)]
pub struct CloseApproach {
    /// Designation of the approaching NEO (foreign key)
    designation: String,

    /// Time of closest approach, UTC, minute precision
    time: DateTime<Utc>,

    /// Nominal approach distance in astronomical units
    distance: f64,

    /// Velocity relative to Earth at closest approach, km/s
    velocity: f64,

    /// The NEO this approach belongs to, set by the linker
    neo: Option<NeoId>,
}

impl CloseApproach {
    /// Create an unlinked close approach
    pub fn new(
        designation: impl Into<String>,
        time: DateTime<Utc>,
        distance: f64,
        velocity: f64,
    ) -> Self {
        CloseApproach {
            designation: designation.into(),
            time,
            distance,
            velocity,
            neo: None,
        }
    }

    pub fn designation(&self) -> &str {
        &self.designation
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// Approach time in the canonical `YYYY-Mon-DD HH:MM` form
    pub fn time_str(&self) -> String {
        format_calendar_time(&self.time)
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Handle of the linked NEO, `None` if no NEO carries this designation
    pub fn neo(&self) -> Option<NeoId> {
        self.neo
    }

    pub fn is_linked(&self) -> bool {
        self.neo.is_some()
    }

    pub(crate) fn link(&mut self, neo: NeoId) {
        debug_assert!(self.neo.is_none(), "close approach linked twice");
        self.neo = Some(neo);
    }
}

/// A close approach together with the NEO it is linked to
#[derive(Debug, Clone, Copy)]
pub struct LinkedApproach<'a> {
    approach: &'a CloseApproach,
    neo: &'a NearEarthObject,
}

impl<'a> LinkedApproach<'a> {
    pub(crate) fn new(approach: &'a CloseApproach, neo: &'a NearEarthObject) -> Self {
        LinkedApproach { approach, neo }
    }

    pub fn approach(&self) -> &'a CloseApproach {
        self.approach
    }

    pub fn neo(&self) -> &'a NearEarthObject {
        self.neo
    }
}

impl fmt::Display for LinkedApproach<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "On {}, '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.approach.time_str(),
            self.neo.fullname(),
            self.approach.distance,
            self.approach.velocity
        )
    }
}
