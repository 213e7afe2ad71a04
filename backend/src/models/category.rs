//! Academic program categories inferred from event titles.
//!
//! Two counting rules coexist and must stay separate:
//!
//! - [`Category::classify`] is exclusive. It walks [`Category::PRIORITY`] and
//!   returns the first keyword found, falling back to [`Category::Other`].
//!   Room usage sub-counts are built on it.
//! - [`Category::mentioned_in`] is independent per category. A title can
//!   mention several programs and is counted once for each. The raw event
//!   count chart is built on it.
//!
//! Both rules compare case-insensitively.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Cpe,
    Mcpe,
    Isne,
    Other,
}

impl Category {
    /// Order in which keywords are tried by [`Category::classify`].
    ///
    /// `mcpe` contains `cpe`, so the longer keyword has to be tried first for
    /// the MCPE bucket to be reachable at all.
    pub const PRIORITY: [Category; 3] = [Category::Mcpe, Category::Cpe, Category::Isne];

    /// Every bucket, in table order.
    pub const ALL: [Category; 4] = [
        Category::Cpe,
        Category::Mcpe,
        Category::Isne,
        Category::Other,
    ];

    /// Lowercase keyword searched for in titles. `Other` has none.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Category::Cpe => Some("cpe"),
            Category::Mcpe => Some("mcpe"),
            Category::Isne => Some("isne"),
            Category::Other => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Cpe => "CPE",
            Category::Mcpe => "MCPE",
            Category::Isne => "ISNE",
            Category::Other => "OTHER",
        }
    }

    /// Exclusive classification used by room aggregation.
    pub fn classify(title: &str) -> Category {
        let title = title.to_lowercase();
        Self::PRIORITY
            .into_iter()
            .find(|category| category.keyword().is_some_and(|kw| title.contains(kw)))
            .unwrap_or(Category::Other)
    }

    /// Non-exclusive keyword test used by the raw event counts.
    ///
    /// Always false for `Other`.
    pub fn mentioned_in(self, title: &str) -> bool {
        match self.keyword() {
            Some(kw) => title.to_lowercase().contains(kw),
            None => false,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
