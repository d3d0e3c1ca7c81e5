//! Collection of unified persons keyed by identifier
//!
//! The document is ordered by identifier so that writing it twice from the
//! same inputs yields the same bytes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::person::Person;

/// The unified person document: one entry per person identifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnifiedDocument {
    persons: BTreeMap<String, Person>,
}

impl UnifiedDocument {
    /// Create an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a person
    pub fn insert(&mut self, id: String, person: Person) -> Option<Person> {
        self.persons.insert(id, person)
    }

    /// Look up a person
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Person> {
        self.persons.get(id)
    }

    /// Whether the document holds a person
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.persons.contains_key(id)
    }

    /// Number of persons
    #[must_use]
    pub fn len(&self) -> usize {
        self.persons.len()
    }

    /// Whether the document holds no persons
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Persons in identifier order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Person)> {
        self.persons.iter()
    }

    /// Keep only the persons matching `keep`, returning how many were removed
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&str, &Person) -> bool,
    {
        let before = self.persons.len();
        self.persons.retain(|id, person| keep(id, person));
        before - self.persons.len()
    }
}

impl FromIterator<(String, Person)> for UnifiedDocument {
    fn from_iter<I: IntoIterator<Item = (String, Person)>>(iter: I) -> Self {
        Self {
            persons: iter.into_iter().collect(),
        }
    }
}
