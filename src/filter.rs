//! The catalog filter engine.
//!
//! `filter` is a pure function of the records and a `FilterState`: no hidden
//! state, no I/O, no failure mode. It returns borrowed records in the order
//! they were supplied, so the output of one pass can be fed into another and
//! the catalog itself is never touched.

use crate::catalog::{CatalogRecord, Facet, FacetFilter};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
/// The current query. Replaced wholesale on every input change.
pub struct FilterState {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub diet: FacetFilter,
    #[serde(default)]
    pub period: FacetFilter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
/// One user-adjustable input of `FilterState`.
pub enum FilterKind {
    Search,
    Diet,
    Period,
}

#[derive(Clone, Debug, Eq, PartialEq)]
/// A non-default input, rendered as a removable chip.
pub enum ActiveFilter {
    Search(String),
    Diet(String),
    Period(String),
}

impl FilterState {
    pub fn new(search_term: impl Into<String>, diet: FacetFilter, period: FacetFilter) -> Self {
        Self {
            search_term: search_term.into(),
            diet,
            period,
        }
    }

    pub fn with_search(self, search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            ..self
        }
    }

    pub fn with_diet(self, diet: impl Into<FacetFilter>) -> Self {
        Self {
            diet: diet.into(),
            ..self
        }
    }

    pub fn with_period(self, period: impl Into<FacetFilter>) -> Self {
        Self {
            period: period.into(),
            ..self
        }
    }

    /// Replace the constraint on one facet.
    pub fn with_facet(self, facet: Facet, value: impl Into<FacetFilter>) -> Self {
        match facet {
            Facet::Diet => self.with_diet(value),
            Facet::Period => self.with_period(value),
        }
    }

    /// Reset one input to its default.
    pub fn clear(self, kind: FilterKind) -> Self {
        match kind {
            FilterKind::Search => self.with_search(String::new()),
            FilterKind::Diet => self.with_diet(FacetFilter::All),
            FilterKind::Period => self.with_period(FacetFilter::All),
        }
    }

    /// True when every input is at its default and all records pass.
    pub fn is_unconstrained(&self) -> bool {
        self.search_term.is_empty() && self.diet.is_wildcard() && self.period.is_wildcard()
    }

    /// Non-default inputs in display order: search, diet, period.
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut active = Vec::new();
        if !self.search_term.is_empty() {
            active.push(ActiveFilter::Search(self.search_term.clone()));
        }
        if let FacetFilter::Exactly(diet) = &self.diet {
            active.push(ActiveFilter::Diet(diet.clone()));
        }
        if let FacetFilter::Exactly(period) = &self.period {
            active.push(ActiveFilter::Period(period.clone()));
        }
        active
    }

    /// Whether `record` passes all three predicates.
    pub fn matches(&self, record: &CatalogRecord) -> bool {
        Matcher::new(self).matches(record)
    }
}

impl ActiveFilter {
    pub fn kind(&self) -> FilterKind {
        match self {
            ActiveFilter::Search(_) => FilterKind::Search,
            ActiveFilter::Diet(_) => FilterKind::Diet,
            ActiveFilter::Period(_) => FilterKind::Period,
        }
    }
}

impl fmt::Display for ActiveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveFilter::Search(term) => write!(f, "Search: \"{term}\""),
            ActiveFilter::Diet(diet) => write!(f, "{}: {diet}", Facet::Diet.label()),
            ActiveFilter::Period(period) => write!(f, "{}: {period}", Facet::Period.label()),
        }
    }
}

impl FilterKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "search" => Some(FilterKind::Search),
            "diet" => Some(FilterKind::Diet),
            "period" => Some(FilterKind::Period),
            _ => None,
        }
    }
}

/// Per-pass view of a `FilterState` with the search needle lowercased once.
struct Matcher<'s> {
    needle: String,
    diet: &'s FacetFilter,
    period: &'s FacetFilter,
}

impl<'s> Matcher<'s> {
    fn new(state: &'s FilterState) -> Self {
        Self {
            needle: state.search_term.to_lowercase(),
            diet: &state.diet,
            period: &state.period,
        }
    }

    fn matches(&self, record: &CatalogRecord) -> bool {
        self.matches_search(record)
            && self.diet.accepts(&record.diet)
            && self.period.accepts(&record.period)
    }

    // An empty needle is a substring of everything.
    fn matches_search(&self, record: &CatalogRecord) -> bool {
        record.name.to_lowercase().contains(&self.needle)
            || record.description.to_lowercase().contains(&self.needle)
    }
}

/// Select the records that satisfy `state`, preserving input order.
///
/// Accepts anything that yields borrowed records: a `&Catalog`, a slice, or
/// the output of a previous pass (`prev.iter().copied()`).
pub fn filter<'a, I>(records: I, state: &FilterState) -> Vec<&'a CatalogRecord>
where
    I: IntoIterator<Item = &'a CatalogRecord>,
{
    let matcher = Matcher::new(state);
    records
        .into_iter()
        .filter(|record| matcher.matches(record))
        .collect()
}
