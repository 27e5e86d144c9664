use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Spelling of the wildcard filter value on the wire and in the CLI.
pub const WILDCARD: &str = "all";

/// Categorical record field used to derive filter options.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Facet {
    Diet,
    Period,
}

/// Constraint on one facet: the wildcard or one exact value.
///
/// Values are free text; no enum of diets or periods is imposed, so a value
/// that only differs in case is a different bucket.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum FacetFilter {
    #[default]
    All,
    Exactly(String),
}

impl Facet {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Diet => "diet",
            Facet::Period => "period",
        }
    }

    /// Human label used in filter chips and option headers.
    pub fn label(&self) -> &'static str {
        match self {
            Facet::Diet => "Diet",
            Facet::Period => "Period",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "diet" => Some(Facet::Diet),
            "period" => Some(Facet::Period),
            _ => None,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FacetFilter {
    pub fn as_str(&self) -> &str {
        match self {
            FacetFilter::All => WILDCARD,
            FacetFilter::Exactly(value) => value.as_str(),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, FacetFilter::All)
    }

    /// Exact, case-sensitive comparison; the wildcard accepts everything.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            FacetFilter::All => true,
            FacetFilter::Exactly(expected) => expected == value,
        }
    }

    pub fn parse(value: &str) -> Self {
        if value == WILDCARD {
            FacetFilter::All
        } else {
            FacetFilter::Exactly(value.to_string())
        }
    }
}

impl From<&str> for FacetFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl fmt::Display for FacetFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FacetFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FacetFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

impl Serialize for Facet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_round_trips_and_accepts_everything() {
        let parsed: FacetFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(parsed, FacetFilter::All);
        assert!(parsed.accepts("Carnivore"));
        assert!(parsed.accepts(""));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"all\"");
    }

    #[test]
    fn exact_value_is_case_sensitive() {
        let filter = FacetFilter::from("Carnivore");
        assert_eq!(filter, FacetFilter::Exactly("Carnivore".to_string()));
        assert!(filter.accepts("Carnivore"));
        assert!(!filter.accepts("carnivore"));
        assert!(!filter.accepts("Carnivore "));

        // Only the exact lowercase spelling is the wildcard.
        assert_eq!(
            FacetFilter::from("All"),
            FacetFilter::Exactly("All".to_string())
        );
    }

    #[test]
    fn facet_names_parse() {
        assert_eq!(Facet::parse("diet"), Some(Facet::Diet));
        assert_eq!(Facet::parse("period"), Some(Facet::Period));
        assert_eq!(Facet::parse("height"), None);
        assert_eq!(Facet::Period.to_string(), "period");
    }
}
