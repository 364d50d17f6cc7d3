//! Ordered list of raw study-minute entries.
//!
//! The editor holds what the user typed, not what will run: blank or invalid
//! entries are kept as `0.0` and only filtered out when a [`Plan`] is built.
//! It never becomes empty.
//!
//! [`Plan`]: super::Plan

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionList {
    entries: Vec<f64>,
}

impl Default for SectionList {
    fn default() -> Self {
        Self { entries: vec![0.0] }
    }
}

impl SectionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from saved values. An empty list still yields one blank entry.
    pub fn from_entries(entries: Vec<f64>) -> Self {
        let mut list = Self { entries };
        list.ensure_one();
        list
    }

    /// Parse raw user input the way a numeric form field does:
    /// anything unparsable or non-finite counts as `0`.
    pub fn parse_entry(raw: &str) -> f64 {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    pub fn entries(&self) -> &[f64] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry and return its 0-based index.
    pub fn add(&mut self, minutes: f64) -> usize {
        self.entries.push(sanitize(minutes));
        self.entries.len() - 1
    }

    /// # Errors
    /// Returns [`ValidationError::EntryOutOfBounds`] for a bad index.
    pub fn set(&mut self, index: usize, minutes: f64) -> Result<(), ValidationError> {
        let len = self.entries.len();
        let slot = self
            .entries
            .get_mut(index)
            .ok_or(ValidationError::EntryOutOfBounds { index, len })?;
        *slot = sanitize(minutes);
        Ok(())
    }

    /// Remove an entry; removing the last one leaves a single blank entry.
    ///
    /// # Errors
    /// Returns [`ValidationError::EntryOutOfBounds`] for a bad index.
    pub fn remove(&mut self, index: usize) -> Result<f64, ValidationError> {
        let len = self.entries.len();
        if index >= len {
            return Err(ValidationError::EntryOutOfBounds { index, len });
        }
        let removed = self.entries.remove(index);
        self.ensure_one();
        Ok(removed)
    }

    /// Back to a single blank entry.
    pub fn clear(&mut self) {
        self.entries = vec![0.0];
    }

    /// `Section 1`, `Section 2`, ... in entry order.
    pub fn labels(&self) -> Vec<String> {
        (1..=self.entries.len())
            .map(|n| format!("Section {n}"))
            .collect()
    }

    fn ensure_one(&mut self) {
        if self.entries.is_empty() {
            self.entries.push(0.0);
        }
    }
}

fn sanitize(minutes: f64) -> f64 {
    if minutes.is_finite() {
        minutes
    } else {
        0.0
    }
}
