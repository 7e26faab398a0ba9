//! Filter tokens and their categories.
//!
//! A referential token is written `<prefix>-<key>`, where the four-character prefix names the
//! facet and the key is the primary key of the referenced node, e.g. `inst-12` for the
//! institute with pk `12`. Search tokens carry free text instead.

use std::{fmt, str::FromStr};

use crate::error::TokenError;

/// Separator between the category prefix and the key of a referential token.
pub const SEPARATOR: char = '-';

/// The facet a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// The person a record describes.
    Person,
    /// A person's advisors.
    Advisor,
    /// Research interests.
    Interest,
    /// Institute memberships.
    Institute,
    /// Faculty memberships.
    Faculty,
    /// Department memberships.
    Department,
    /// Roles held.
    Role,
    /// Expertise a person offers.
    Offered,
    /// Expertise a person wants.
    Wanted,
    /// Free-text search phrase.
    Search,
}

impl Category {
    /// All categories that filter on referenced nodes (everything except search).
    pub const FACETS: [Self; 9] = [
        Self::Person,
        Self::Advisor,
        Self::Interest,
        Self::Institute,
        Self::Faculty,
        Self::Department,
        Self::Role,
        Self::Offered,
        Self::Wanted,
    ];

    /// The token prefix for this category, or `None` for search.
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            Self::Person => Some("pers"),
            Self::Advisor => Some("advi"),
            Self::Interest => Some("inte"),
            Self::Institute => Some("inst"),
            Self::Faculty => Some("facu"),
            Self::Department => Some("depa"),
            Self::Role => Some("role"),
            Self::Offered => Some("offe"),
            Self::Wanted => Some("want"),
            Self::Search => None,
        }
    }

    /// Looks up the category for a token prefix.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::FACETS
            .into_iter()
            .find(|category| category.prefix() == Some(prefix))
    }

    /// Lower-case name of the category.
    pub fn name(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Advisor => "advisor",
            Self::Interest => "interest",
            Self::Institute => "institute",
            Self::Faculty => "faculty",
            Self::Department => "department",
            Self::Role => "role",
            Self::Offered => "offered",
            Self::Wanted => "wanted",
            Self::Search => "search",
        }
    }

    /// Heading under which tokens of this category are grouped in selection lists.
    pub fn group_label(self) -> &'static str {
        match self {
            Self::Person => "Persons",
            Self::Advisor => "Advisors",
            Self::Interest => "Interests",
            Self::Institute => "Institutes",
            Self::Faculty => "Faculties",
            Self::Department => "Departments",
            Self::Role => "Roles",
            Self::Offered => "Offered expertise",
            Self::Wanted => "Wanted expertise",
            Self::Search => "Search",
        }
    }

    /// Whether a selected token should be shown with its group label in front.
    ///
    /// Persons and advisors, and offered and wanted expertise, reference the same kinds of
    /// nodes, so their labels alone would be ambiguous.
    pub fn shows_group(self) -> bool {
        matches!(
            self,
            Self::Person | Self::Advisor | Self::Offered | Self::Wanted
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single filter or search selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterToken {
    /// The facet this token filters on.
    category: Category,
    /// The full token id (`inst-12`), or the phrase for search tokens.
    id: String,
}

impl FilterToken {
    /// Parses a referential token like `inst-12`.
    ///
    /// The category comes from the text before the first separator; everything after it is the
    /// key, so keys may themselves contain separators.
    pub fn parse(id: &str) -> Result<Self, TokenError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(TokenError::Empty);
        }

        let Some((prefix, key)) = id.split_once(SEPARATOR) else {
            return Err(TokenError::MissingKey {
                token: id.to_string(),
            });
        };
        if key.is_empty() {
            return Err(TokenError::MissingKey {
                token: id.to_string(),
            });
        }

        let category = Category::from_prefix(prefix).ok_or_else(|| TokenError::UnknownPrefix {
            prefix: prefix.to_string(),
            token: id.to_string(),
        })?;

        Ok(Self {
            category,
            id: id.to_string(),
        })
    }

    /// Creates a free-text search token.
    pub fn search(phrase: impl Into<String>) -> Self {
        Self {
            category: Category::Search,
            id: phrase.into(),
        }
    }

    /// Builds the referential token for a node of `category` with primary key `pk`.
    ///
    /// Returns `None` for [`Category::Search`], which has no prefix.
    pub fn for_node(category: Category, pk: &str) -> Option<Self> {
        let prefix = category.prefix()?;
        Some(Self {
            category,
            id: format!("{prefix}{SEPARATOR}{pk}"),
        })
    }

    /// The category of this token.
    pub fn category(&self) -> Category {
        self.category
    }

    /// The full token id, or the phrase for search tokens.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The referenced primary key (the part after the prefix), or the phrase for search tokens.
    pub fn key(&self) -> &str {
        if self.is_search() {
            return &self.id;
        }
        self.id
            .split_once(SEPARATOR)
            .map_or(self.id.as_str(), |(_, key)| key)
    }

    /// Whether this is a free-text search token.
    pub fn is_search(&self) -> bool {
        self.category == Category::Search
    }
}

impl FromStr for FilterToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FilterToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Splits a mixed token list into referential filters and search phrases.
pub fn partition_tokens(tokens: &[FilterToken]) -> (Vec<FilterToken>, Vec<String>) {
    let mut filters = Vec::new();
    let mut phrases = Vec::new();
    for token in tokens {
        if token.is_search() {
            phrases.push(token.id.clone());
        } else {
            filters.push(token.clone());
        }
    }
    (filters, phrases)
}
