//! Ticket line items and their per-purchase aggregation.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ticketing_core::ValueObject;

/// Fare class of a ticket.
///
/// `Infant`, `Child` and `Adult` are the supported classes. Any other name is
/// carried as `Other` so it still counts toward the ticket total; pricing
/// treats it as free.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TicketCategory {
    Infant,
    Child,
    Adult,
    /// Unrecognized category name. Only built by parsing, so it never
    /// spells one of the known classes.
    Other(UnknownCategory),
}

/// Upper-cased name of a category outside INFANT/CHILD/ADULT.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnknownCategory(String);

impl UnknownCategory {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TicketCategory {
    pub fn name(&self) -> &str {
        match self {
            TicketCategory::Infant => "INFANT",
            TicketCategory::Child => "CHILD",
            TicketCategory::Adult => "ADULT",
            TicketCategory::Other(name) => name.as_str(),
        }
    }

    /// Whether a seat is allocated for tickets of this category.
    pub fn occupies_seat(&self) -> bool {
        !matches!(self, TicketCategory::Infant)
    }
}

impl From<&str> for TicketCategory {
    fn from(value: &str) -> Self {
        let name = value.trim().to_ascii_uppercase();
        match name.as_str() {
            "INFANT" => TicketCategory::Infant,
            "CHILD" => TicketCategory::Child,
            "ADULT" => TicketCategory::Adult,
            _ => TicketCategory::Other(UnknownCategory(name)),
        }
    }
}

impl From<String> for TicketCategory {
    fn from(value: String) -> Self {
        TicketCategory::from(value.as_str())
    }
}

impl From<TicketCategory> for String {
    fn from(value: TicketCategory) -> Self {
        match value {
            TicketCategory::Other(UnknownCategory(name)) => name,
            known => known.name().to_string(),
        }
    }
}

impl FromStr for TicketCategory {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TicketCategory::from(s))
    }
}

impl core::fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// One requested line item: a category and how many tickets of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketTypeRequest {
    category: TicketCategory,
    count: u32,
}

impl ValueObject for TicketTypeRequest {}

impl TicketTypeRequest {
    pub fn new(category: TicketCategory, count: u32) -> Self {
        Self { category, count }
    }

    pub fn category(&self) -> &TicketCategory {
        &self.category
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseTicketRequestError {
    #[error("expected CATEGORY:COUNT, got `{0}`")]
    MissingSeparator(String),

    #[error("empty ticket category in `{0}`")]
    EmptyCategory(String),

    #[error("invalid ticket count `{count}`: {reason}")]
    InvalidCount { count: String, reason: String },
}

/// Parses `CATEGORY:COUNT`, e.g. `ADULT:2` or `child:1`.
impl FromStr for TicketTypeRequest {
    type Err = ParseTicketRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (category, count) = s
            .split_once(':')
            .ok_or_else(|| ParseTicketRequestError::MissingSeparator(s.to_string()))?;

        if category.trim().is_empty() {
            return Err(ParseTicketRequestError::EmptyCategory(s.to_string()));
        }

        let count = count
            .trim()
            .parse::<u32>()
            .map_err(|e| ParseTicketRequestError::InvalidCount {
                count: count.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self::new(TicketCategory::from(category), count))
    }
}

/// Requested ticket counts for one purchase, keyed by category.
///
/// Only categories that appear in the requests are present. Built once per
/// purchase call and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TicketCountMap(BTreeMap<TicketCategory, u64>);

impl TicketCountMap {
    /// Fold line items into per-category totals. Same-category counts add up.
    pub fn aggregate<'a, I>(requests: I) -> Self
    where
        I: IntoIterator<Item = &'a TicketTypeRequest>,
    {
        let counts = requests.into_iter().fold(BTreeMap::new(), |mut acc, request| {
            let slot: &mut u64 = acc.entry(request.category().clone()).or_default();
            *slot = slot.saturating_add(u64::from(request.count()));
            acc
        });
        Self(counts)
    }

    /// Count for a category (0 when it was not requested).
    pub fn count(&self, category: &TicketCategory) -> u64 {
        self.0.get(category).copied().unwrap_or(0)
    }

    /// Ticket total: every requested ticket, whatever its category.
    pub fn total(&self) -> u64 {
        self.0.values().fold(0u64, |acc, n| acc.saturating_add(*n))
    }

    /// Seats to reserve: the ticket total without infants.
    pub fn reservation_total(&self) -> u64 {
        self.0
            .iter()
            .filter(|(category, _)| category.occupies_seat())
            .fold(0u64, |acc, (_, n)| acc.saturating_add(*n))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TicketCategory, u64)> {
        self.0.iter().map(|(category, n)| (category, *n))
    }
}

impl FromIterator<(TicketCategory, u64)> for TicketCountMap {
    fn from_iter<T: IntoIterator<Item = (TicketCategory, u64)>>(iter: T) -> Self {
        let counts = iter.into_iter().fold(BTreeMap::new(), |mut acc, (category, n)| {
            let slot: &mut u64 = acc.entry(category).or_default();
            *slot = slot.saturating_add(n);
            acc
        });
        Self(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(category: TicketCategory, count: u32) -> TicketTypeRequest {
        TicketTypeRequest::new(category, count)
    }

    #[test]
    fn category_names_are_case_insensitive() {
        assert_eq!(TicketCategory::from("adult"), TicketCategory::Adult);
        assert_eq!(TicketCategory::from(" Child "), TicketCategory::Child);
        assert_eq!(TicketCategory::from("INFANT"), TicketCategory::Infant);
        let teen = TicketCategory::from("teenager");
        assert!(matches!(teen, TicketCategory::Other(_)));
        assert_eq!(teen.name(), "TEENAGER");
    }

    #[test]
    fn category_serializes_as_its_name() {
        let json = serde_json::to_string(&TicketCategory::Child).unwrap();
        assert_eq!(json, "\"CHILD\"");

        let other: TicketCategory = serde_json::from_str("\"senior\"").unwrap();
        assert_eq!(other, TicketCategory::from("SENIOR"));
        assert_eq!(serde_json::to_string(&other).unwrap(), "\"SENIOR\"");
    }

    #[test]
    fn unknown_names_normalise_to_one_key() {
        let tickets = TicketCountMap::aggregate(&[
            req(TicketCategory::from("teen"), 2),
            req(TicketCategory::from(" TEEN "), 3),
            "Teen:1".parse().unwrap(),
        ]);
        assert_eq!(tickets.iter().count(), 1);
        assert_eq!(tickets.count(&TicketCategory::from("TEEN")), 6);
    }

    #[test]
    fn known_names_never_become_unknown() {
        for name in ["adult", "Child", " INFANT "] {
            assert!(!matches!(TicketCategory::from(name), TicketCategory::Other(_)));
        }
        for category in [
            TicketCategory::Infant,
            TicketCategory::Child,
            TicketCategory::Adult,
            TicketCategory::from("senior"),
        ] {
            let json = serde_json::to_string(&category).unwrap();
            let back: TicketCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(back, category);
        }
    }

    #[test]
    fn parses_line_item_from_text() {
        let parsed: TicketTypeRequest = "adult:3".parse().unwrap();
        assert_eq!(parsed, req(TicketCategory::Adult, 3));

        assert!(matches!(
            "ADULT".parse::<TicketTypeRequest>(),
            Err(ParseTicketRequestError::MissingSeparator(_))
        ));
        assert!(matches!(
            ":3".parse::<TicketTypeRequest>(),
            Err(ParseTicketRequestError::EmptyCategory(_))
        ));
        assert!(matches!(
            "CHILD:-1".parse::<TicketTypeRequest>(),
            Err(ParseTicketRequestError::InvalidCount { .. })
        ));
    }

    #[test]
    fn aggregation_sums_same_category() {
        let tickets = TicketCountMap::aggregate(&[
            req(TicketCategory::Adult, 2),
            req(TicketCategory::Adult, 1),
        ]);
        assert_eq!(tickets.count(&TicketCategory::Adult), 3);
        assert_eq!(tickets.iter().count(), 1);
    }

    #[test]
    fn aggregation_keeps_only_requested_categories() {
        let tickets = TicketCountMap::aggregate(&[req(TicketCategory::Child, 0)]);
        assert_eq!(tickets.iter().count(), 1);
        assert_eq!(tickets.count(&TicketCategory::Adult), 0);
        assert_eq!(tickets.total(), 0);

        let none: [TicketTypeRequest; 0] = [];
        assert!(TicketCountMap::aggregate(&none).is_empty());
    }

    #[test]
    fn reservation_total_excludes_infants() {
        let tickets = TicketCountMap::aggregate(&[
            req(TicketCategory::Adult, 3),
            req(TicketCategory::Child, 3),
            req(TicketCategory::Infant, 3),
        ]);
        assert_eq!(tickets.total(), 9);
        assert_eq!(tickets.reservation_total(), 6);
    }

    #[test]
    fn unrecognized_categories_count_toward_totals() {
        let tickets = TicketCountMap::aggregate(&[
            req(TicketCategory::Adult, 1),
            req(TicketCategory::from("TEENAGER"), 5),
        ]);
        assert_eq!(tickets.total(), 6);
        assert_eq!(tickets.reservation_total(), 6);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn category() -> impl Strategy<Value = TicketCategory> {
            prop_oneof![
                Just(TicketCategory::Infant),
                Just(TicketCategory::Child),
                Just(TicketCategory::Adult),
                "[A-Z]{3,8}".prop_map(TicketCategory::from),
            ]
        }

        proptest! {
            /// Property: aggregation preserves the sum of all line item counts.
            #[test]
            fn total_equals_sum_of_requests(
                items in prop::collection::vec((category(), 0u32..50), 0..20)
            ) {
                let requests: Vec<_> = items
                    .iter()
                    .map(|(c, n)| TicketTypeRequest::new(c.clone(), *n))
                    .collect();
                let expected: u64 = items.iter().map(|(_, n)| u64::from(*n)).sum();

                let tickets = TicketCountMap::aggregate(&requests);
                prop_assert_eq!(tickets.total(), expected);
            }

            /// Property: reservation total is the ticket total minus infants.
            #[test]
            fn reservation_total_is_total_minus_infants(
                items in prop::collection::vec((category(), 0u32..50), 0..20)
            ) {
                let requests: Vec<_> = items
                    .iter()
                    .map(|(c, n)| TicketTypeRequest::new(c.clone(), *n))
                    .collect();
                let tickets = TicketCountMap::aggregate(&requests);

                prop_assert_eq!(
                    tickets.reservation_total(),
                    tickets.total() - tickets.count(&TicketCategory::Infant)
                );
            }

            /// Property: request order does not change the aggregate.
            #[test]
            fn aggregation_ignores_order(
                items in prop::collection::vec((category(), 0u32..50), 0..20)
            ) {
                let requests: Vec<_> = items
                    .iter()
                    .map(|(c, n)| TicketTypeRequest::new(c.clone(), *n))
                    .collect();
                let mut reversed = requests.clone();
                reversed.reverse();

                prop_assert_eq!(
                    TicketCountMap::aggregate(&requests),
                    TicketCountMap::aggregate(&reversed)
                );
            }
        }
    }
}
