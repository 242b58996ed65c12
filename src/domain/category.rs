use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::ItemCode;

/// Product categories. Membership is decided by the code range table below,
/// not by arithmetic on the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Candies,
    Sodas,
    Snacks,
}

/// Code ranges owned by each category, in display order.
const CATEGORY_RANGES: [(Category, RangeInclusive<ItemCode>); 3] = [
    (Category::Candies, 100..=199),
    (Category::Sodas, 200..=299),
    (Category::Snacks, 300..=399),
];

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 3] = [Category::Candies, Category::Sodas, Category::Snacks];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Candies => "candies",
            Category::Sodas => "sodas",
            Category::Snacks => "snacks",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "candies" => Some(Category::Candies),
            "sodas" => Some(Category::Sodas),
            "snacks" => Some(Category::Snacks),
            _ => None,
        }
    }

    /// Heading used when the category is printed.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Candies => "Candies",
            Category::Sodas => "Sodas",
            Category::Snacks => "Snacks",
        }
    }

    /// Inclusive range of item codes belonging to this category.
    pub fn range(&self) -> RangeInclusive<ItemCode> {
        CATEGORY_RANGES
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, range)| range.clone())
            .unwrap_or(1..=0)
    }

    /// The category owning `code`, if any.
    pub fn for_code(code: ItemCode) -> Option<Self> {
        CATEGORY_RANGES
            .iter()
            .find(|(_, range)| range.contains(&code))
            .map(|(category, _)| *category)
    }

    pub fn contains(&self, code: ItemCode) -> bool {
        self.range().contains(&code)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
