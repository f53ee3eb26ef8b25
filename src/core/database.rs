//! NEO database and linker
//!
//! `NeoDatabase` owns every loaded NEO and close approach and links them in a
//! single pass at construction. Records refer to each other through
//! [`NeoId`] / [`ApproachId`] handles into the database's arenas rather than
//! through references, so the NEO ↔ approach cycle never turns into an
//! ownership cycle.
//!
//! # Linking
//!
//! 1. Index NEOs by designation. A repeated designation is a
//!    `DuplicateDesignation` error; the two records are never merged.
//! 2. For every approach, look up its designation. A hit links both sides;
//!    a miss leaves the approach unlinked, recorded in [`NeoDatabase::unlinked`]
//!    and reported as a warning.
//!
//! Linking is the only mutation. Once `new` returns, the database hands out
//! shared references only.

use crate::types::{
    ApproachId, CloseApproach, LinkedApproach, NearEarthObject, NeoError, NeoId,
};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Linked collection of NEOs and their close approaches
#[derive(Debug)]
pub struct NeoDatabase {
    neos: Vec<NearEarthObject>,
    approaches: Vec<CloseApproach>,
    by_designation: HashMap<String, NeoId>,
    by_name: HashMap<String, NeoId>,
    unlinked: Vec<ApproachId>,
}

impl NeoDatabase {
    /// Build the database and link every approach to its NEO
    ///
    /// # Arguments
    ///
    /// * `neos` - NEOs as loaded, in any order
    /// * `approaches` - Unlinked close approaches as loaded
    ///
    /// # Returns
    ///
    /// * `Ok(NeoDatabase)` - Linked database; unmatched approaches stay unlinked
    /// * `Err(NeoError::DuplicateDesignation)` - Two NEOs share a designation
    pub fn new(
        mut neos: Vec<NearEarthObject>,
        mut approaches: Vec<CloseApproach>,
    ) -> Result<Self, NeoError> {
        let mut by_designation = HashMap::with_capacity(neos.len());
        let mut by_name = HashMap::new();

        for (index, neo) in neos.iter().enumerate() {
            let id = NeoId::new(index);
            match by_designation.entry(neo.designation().to_string()) {
                Entry::Occupied(_) => {
                    return Err(NeoError::duplicate_designation(neo.designation()));
                }
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
            // Names are meant to be unique too, but a clash is not fatal: first one wins
            if let Some(name) = neo.name() {
                by_name.entry(name.to_string()).or_insert(id);
            }
        }

        let mut unlinked = Vec::new();
        for (index, approach) in approaches.iter_mut().enumerate() {
            let id = ApproachId::new(index);
            match by_designation.get(approach.designation()).copied() {
                Some(neo_id) => {
                    approach.link(neo_id);
                    neos[neo_id.index()].add_approach(id);
                }
                None => {
                    tracing::debug!(
                        designation = approach.designation(),
                        time = %approach.time_str(),
                        "close approach references an unknown NEO"
                    );
                    unlinked.push(id);
                }
            }
        }

        if !unlinked.is_empty() {
            tracing::warn!(
                count = unlinked.len(),
                "close approaches left unlinked: no NEO with a matching designation"
            );
        }
        tracing::info!(
            neos = neos.len(),
            approaches = approaches.len(),
            linked = approaches.len() - unlinked.len(),
            "linked close approaches to near-Earth objects"
        );

        Ok(NeoDatabase {
            neos,
            approaches,
            by_designation,
            by_name,
            unlinked,
        })
    }

    /// All NEOs in load order
    pub fn neos(&self) -> &[NearEarthObject] {
        &self.neos
    }

    /// All close approaches in load order, linked or not
    pub fn approaches(&self) -> &[CloseApproach] {
        &self.approaches
    }

    pub fn neo(&self, id: NeoId) -> Option<&NearEarthObject> {
        self.neos.get(id.index())
    }

    pub fn approach(&self, id: ApproachId) -> Option<&CloseApproach> {
        self.approaches.get(id.index())
    }

    /// Handle of the NEO with the given primary designation
    pub fn neo_id(&self, designation: &str) -> Option<NeoId> {
        self.by_designation.get(designation).copied()
    }

    /// Find a NEO by its primary designation
    pub fn get_neo_by_designation(&self, designation: &str) -> Option<&NearEarthObject> {
        self.neo_id(designation).and_then(|id| self.neo(id))
    }

    /// Find a NEO by its IAU name
    ///
    /// Matching is exact; unnamed NEOs can only be found by designation.
    pub fn get_neo_by_name(&self, name: &str) -> Option<&NearEarthObject> {
        self.by_name.get(name).and_then(|&id| self.neo(id))
    }

    /// Close approaches linked to a NEO
    pub fn approaches_of<'a>(
        &'a self,
        neo: &'a NearEarthObject,
    ) -> impl Iterator<Item = &'a CloseApproach> + 'a {
        neo.approaches()
            .iter()
            .filter_map(move |&id| self.approach(id))
    }

    /// NEO a close approach is linked to, if any
    pub fn neo_of(&self, approach: &CloseApproach) -> Option<&NearEarthObject> {
        approach.neo().and_then(|id| self.neo(id))
    }

    /// Linked close approaches in load order, each paired with its NEO
    ///
    /// Unlinked approaches are not yielded.
    pub fn linked_approaches(&self) -> impl Iterator<Item = LinkedApproach<'_>> + '_ {
        self.approaches.iter().filter_map(move |approach| {
            self.neo_of(approach)
                .map(|neo| LinkedApproach::new(approach, neo))
        })
    }

    /// Approaches whose designation matched no NEO
    pub fn unlinked(&self) -> &[ApproachId] {
        &self.unlinked
    }

    pub fn linked_count(&self) -> usize {
        self.approaches.len() - self.unlinked.len()
    }
}
