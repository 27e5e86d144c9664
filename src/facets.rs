//! Facet extraction for the diet and period filter options.
//!
//! Values come straight from the records: there is no fixed vocabulary, so
//! the options are whatever the loaded catalog contains, in first-seen order.

use crate::catalog::{CatalogRecord, Facet, WILDCARD};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

impl Facet {
    /// The record's value for this facet.
    pub fn value_of<'r>(&self, record: &'r CatalogRecord) -> &'r str {
        match self {
            Facet::Diet => &record.diet,
            Facet::Period => &record.period,
        }
    }
}

/// Distinct values of `facet`, each once, in first-seen order.
pub fn unique_values<'a, I>(records: I, facet: Facet) -> Vec<String>
where
    I: IntoIterator<Item = &'a CatalogRecord>,
{
    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for record in records {
        let value = facet.value_of(record);
        if seen.insert(value) {
            values.push(value.to_string());
        }
    }
    values
}

/// Number of records per facet value, keyed deterministically.
pub fn facet_counts<'a, I>(records: I, facet: Facet) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a CatalogRecord>,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts
            .entry(facet.value_of(record).to_string())
            .or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
/// Options for both filter dropdowns.
pub struct FacetOptions {
    pub diets: Vec<String>,
    pub periods: Vec<String>,
}

impl FacetOptions {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a CatalogRecord>,
        I::IntoIter: Clone,
    {
        let iter = records.into_iter();
        Self {
            diets: unique_values(iter.clone(), Facet::Diet),
            periods: unique_values(iter, Facet::Period),
        }
    }

    pub fn values(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Diet => &self.diets,
            Facet::Period => &self.periods,
        }
    }

    /// Dropdown entries for `facet`: the wildcard first, then each value.
    pub fn choices(&self, facet: Facet) -> Vec<&str> {
        std::iter::once(WILDCARD)
            .chain(self.values(facet).iter().map(String::as_str))
            .collect()
    }
}
