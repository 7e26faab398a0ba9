//! Faceted matching of person records against filter tokens.
//!
//! Within one category tokens combine with OR: a record matches when any of its keys equals
//! any selected key. Across categories the combination is described by [`POLICY_TABLE`].
//! Most categories stand alone and are ANDed together, but two pairs reference the same kind
//! of node from two relational roles (a person, who may also be someone's advisor; an
//! expertise topic, which may be offered or wanted). Those pairs pool their tokens and
//! match when either role does.

use std::collections::BTreeMap;

use crate::{
    record::PersonRecord,
    token::{Category, FilterToken},
};

/// How one or two categories take part in the overall match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// The category must match on its own.
    Each(Category),
    /// Tokens of both categories are pooled and checked against the record's keys in either
    /// category. The pair matches vacuously when neither has tokens.
    EitherRole(Category, Category),
}

/// The combination policy applied by [`FacetFilter::default`].
///
/// Every facet category appears exactly once.
pub const POLICY_TABLE: &[Policy] = &[
    Policy::EitherRole(Category::Person, Category::Advisor),
    Policy::Each(Category::Interest),
    Policy::Each(Category::Institute),
    Policy::Each(Category::Faculty),
    Policy::Each(Category::Department),
    Policy::Each(Category::Role),
    Policy::EitherRole(Category::Offered, Category::Wanted),
];

/// Returns true if `tokens` is empty or any record value equals any token key.
pub fn category_matches(tokens: &[&str], values: &[&str]) -> bool {
    tokens.is_empty() || values.iter().any(|value| tokens.contains(value))
}

/// Selected token keys grouped by category. Search tokens are dropped.
#[derive(Debug, Clone, Default)]
pub struct FacetSelection<'a> {
    /// Keys per category, in selection order.
    groups: BTreeMap<Category, Vec<&'a str>>,
}

impl<'a> FacetSelection<'a> {
    /// Groups referential tokens by category.
    pub fn from_tokens(tokens: &'a [FilterToken]) -> Self {
        let mut groups: BTreeMap<Category, Vec<&'a str>> = BTreeMap::new();
        for token in tokens.iter().filter(|t| !t.is_search()) {
            groups.entry(token.category()).or_default().push(token.key());
        }
        Self { groups }
    }

    /// Keys selected for a category.
    pub fn keys(&self, category: Category) -> &[&'a str] {
        self.groups.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether no referential tokens were selected.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Policy {
    /// Evaluates this policy entry for one record.
    pub fn matches(&self, selection: &FacetSelection<'_>, record: &PersonRecord) -> bool {
        match *self {
            Self::Each(category) => {
                category_matches(selection.keys(category), &record.keys(category))
            }
            Self::EitherRole(first, second) => {
                let pooled: Vec<&str> = selection
                    .keys(first)
                    .iter()
                    .chain(selection.keys(second))
                    .copied()
                    .collect();
                if pooled.is_empty() {
                    return true;
                }
                category_matches(&pooled, &record.keys(first))
                    || category_matches(&pooled, &record.keys(second))
            }
        }
    }
}

/// Filters person records by a token selection according to a policy table.
#[derive(Debug, Clone)]
pub struct FacetFilter {
    /// Policy entries, all of which must match.
    policies: Vec<Policy>,
}

impl Default for FacetFilter {
    fn default() -> Self {
        Self::with_policies(POLICY_TABLE.to_vec())
    }
}

impl FacetFilter {
    /// Creates a filter with a custom policy table.
    pub fn with_policies(policies: Vec<Policy>) -> Self {
        Self { policies }
    }

    /// The policy entries of this filter.
    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    /// Whether a single record satisfies every policy entry.
    pub fn matches(&self, selection: &FacetSelection<'_>, record: &PersonRecord) -> bool {
        self.policies
            .iter()
            .all(|policy| policy.matches(selection, record))
    }

    /// Returns the records matching `tokens`, in input order.
    ///
    /// With no referential tokens every record is returned.
    pub fn evaluate<'r>(
        &self,
        tokens: &[FilterToken],
        persons: &'r [PersonRecord],
    ) -> Vec<&'r PersonRecord> {
        let selection = FacetSelection::from_tokens(tokens);
        if selection.is_empty() {
            return persons.iter().collect();
        }
        persons
            .iter()
            .filter(|record| self.matches(&selection, record))
            .collect()
    }
}

/// Evaluates `tokens` against `persons` with the default policy table.
pub fn evaluate<'r>(tokens: &[FilterToken], persons: &'r [PersonRecord]) -> Vec<&'r PersonRecord> {
    FacetFilter::default().evaluate(tokens, persons)
}
