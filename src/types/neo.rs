//! Near-Earth object record
//!
//! A `NearEarthObject` carries the identity and physical parameters of one
//! NEO. Its set of close approaches starts empty and is filled in exactly once
//! by [`NeoDatabase`](crate::core::NeoDatabase) while linking.

use std::fmt;

/// Handle of a NEO inside a [`NeoDatabase`](crate::core::NeoDatabase)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeoId(usize);

impl NeoId {
    pub(crate) fn new(index: usize) -> Self {
        NeoId(index)
    }

    /// Position of the NEO in load order
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle of a close approach inside a [`NeoDatabase`](crate::core::NeoDatabase)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApproachId(usize);

impl ApproachId {
    pub(crate) fn new(index: usize) -> Self {
        ApproachId(index)
    }

    /// Position of the approach in load order
    pub fn index(self) -> usize {
        self.0
    }
}

/// A near-Earth object
#[derive(Debug, Clone, PartialEq)]
pub struct NearEarthObject {
    /// Primary designation, the linking key
    designation: String,

    /// IAU name, absent for most objects
    ///
    /// Never `Some("")`: an empty source field means the object is unnamed.
    name: Option<String>,

    /// Diameter in kilometers, `None` when unknown
    diameter: Option<f64>,

    /// Whether the object is flagged as a Potentially Hazardous Asteroid
    hazardous: bool,

    /// Close approaches linked to this object
    approaches: Vec<ApproachId>,
}

impl NearEarthObject {
    /// Create an unlinked NEO
    ///
    /// An empty name is stored as absent, and a NaN diameter as unknown, so
    /// that neither sentinel leaks into the record.
    pub fn new(
        designation: impl Into<String>,
        name: Option<String>,
        diameter: Option<f64>,
        hazardous: bool,
    ) -> Self {
        NearEarthObject {
            designation: designation.into(),
            name: name.filter(|n| !n.is_empty()),
            diameter: diameter.filter(|d| !d.is_nan()),
            hazardous,
            approaches: Vec::new(),
        }
    }

    pub fn designation(&self) -> &str {
        &self.designation
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn diameter(&self) -> Option<f64> {
        self.diameter
    }

    pub fn hazardous(&self) -> bool {
        self.hazardous
    }

    /// Handles of the close approaches linked to this object
    pub fn approaches(&self) -> &[ApproachId] {
        &self.approaches
    }

    /// Designation and name together, e.g. `433 (Eros)`
    pub fn fullname(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", self.designation, name),
            None => self.designation.clone(),
        }
    }

    // Called once per approach by the linker, so no duplicate check is needed.
    pub(crate) fn add_approach(&mut self, id: ApproachId) {
        self.approaches.push(id);
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NEO {} ", self.fullname())?;
        match self.diameter {
            Some(diameter) => write!(f, "has a diameter of {:.3} km", diameter)?,
            None => f.write_str("has an unknown diameter")?,
        }
        if self.hazardous {
            f.write_str(" and is potentially hazardous.")
        } else {
            f.write_str(" and is not potentially hazardous.")
        }
    }
}
