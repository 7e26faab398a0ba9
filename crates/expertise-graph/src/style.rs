//! Node categories and their fixed styling.

use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// Border width given to the focus node.
pub const FOCUS_BORDER_WIDTH: u32 = 3;

/// The kind of node, taken from its graph label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeCategory {
    /// A person.
    Person,
    /// A research interest.
    ResearchInterest,
    /// An institute.
    Institute,
    /// A faculty.
    Faculty,
    /// A department.
    Department,
    /// A role.
    Role,
    /// An expertise topic, offered or wanted.
    Expertise,
}

impl NodeCategory {
    /// All categories, in table order.
    pub const ALL: [Self; 7] = [
        Self::Person,
        Self::ResearchInterest,
        Self::Institute,
        Self::Faculty,
        Self::Department,
        Self::Role,
        Self::Expertise,
    ];

    /// The graph label for this category.
    pub fn label(self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::ResearchInterest => "ResearchInterest",
            Self::Institute => "Institute",
            Self::Faculty => "Faculty",
            Self::Department => "Department",
            Self::Role => "Role",
            Self::Expertise => "Expertise",
        }
    }

    /// The fill and border colors for this category.
    pub fn color(self) -> NodeColor {
        let (background, border) = match self {
            Self::Person => ("#97C2FC", "#2B7CE9"),
            Self::ResearchInterest => ("#FFFF00", "#FFA500"),
            Self::Institute => ("#FB7E81", "#FA0A10"),
            Self::Faculty => ("#7BE141", "#41A906"),
            Self::Department => ("#EB7DF4", "#E129F0"),
            Self::Role => ("#AD85E4", "#7C29F0"),
            Self::Expertise => ("#C2FABC", "#74D66A"),
        };
        NodeColor { background, border }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a graph label is not a known node category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized node category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for NodeCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Fill and border color of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeColor {
    /// Fill color.
    pub background: &'static str,
    /// Border color.
    pub border: &'static str,
}

/// Visual style handed to the renderer. The default is the empty style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NodeStyle {
    /// Colors, when the category is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<NodeColor>,
    /// Border width override; set for the focus node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
}

impl NodeStyle {
    /// The style for a category; `None` yields the empty style.
    pub fn for_category(category: Option<NodeCategory>) -> Self {
        Self {
            color: category.map(NodeCategory::color),
            border_width: None,
        }
    }

    /// Returns this style with an emphasized border.
    pub fn emphasized(self, border_width: u32) -> Self {
        Self {
            border_width: Some(border_width),
            ..self
        }
    }

    /// Whether no styling is set.
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.border_width.is_none()
    }
}
