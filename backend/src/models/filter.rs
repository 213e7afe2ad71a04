use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{DashboardError, ErrorContext};

/// Toggleable title filters offered by the dashboard.
///
/// Each filter requires a literal, case-sensitive keyword in the event title.
/// Unlike [`crate::models::Category`] matching, no case folding happens here,
/// so `Room reservation` does not match `room reservation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FilterName {
    #[serde(rename = "cpe")]
    Cpe,
    #[serde(rename = "mcpe")]
    Mcpe,
    #[serde(rename = "isne")]
    Isne,
    #[serde(rename = "RoomReservation")]
    RoomReservation,
    #[serde(rename = "Xternalmcpe")]
    XternalMcpe,
    #[serde(rename = "XternalUndergrad")]
    XternalUndergrad,
}

impl FilterName {
    pub const ALL: [FilterName; 6] = [
        FilterName::Cpe,
        FilterName::Mcpe,
        FilterName::Isne,
        FilterName::RoomReservation,
        FilterName::XternalMcpe,
        FilterName::XternalUndergrad,
    ];

    /// Name used in requests and in the serialized filter map.
    pub fn name(self) -> &'static str {
        match self {
            FilterName::Cpe => "cpe",
            FilterName::Mcpe => "mcpe",
            FilterName::Isne => "isne",
            FilterName::RoomReservation => "RoomReservation",
            FilterName::XternalMcpe => "Xternalmcpe",
            FilterName::XternalUndergrad => "XternalUndergrad",
        }
    }

    /// Literal substring the title must contain.
    pub fn keyword(self) -> &'static str {
        match self {
            FilterName::Cpe => "cpe",
            FilterName::Mcpe => "mcpe",
            FilterName::Isne => "isne",
            FilterName::RoomReservation => "Room reservation",
            FilterName::XternalMcpe => "xternal mcpe",
            FilterName::XternalUndergrad => "xternal Undergrad",
        }
    }

    pub fn matches(self, title: &str) -> bool {
        title.contains(self.keyword())
    }
}

impl fmt::Display for FilterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterName {
    type Err = DashboardError;

    /// Filter names are matched ignoring ASCII case (`roomreservation` works).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DashboardError::InvalidRequest {
                message: format!("Unknown filter `{}`", wanted),
                context: ErrorContext::new("parse_filter").with_details(format!(
                    "expected one of {}",
                    Self::ALL.map(FilterName::name).join(", ")
                )),
            })
    }
}

/// Mapping filter name -> enabled flag. Active filters are AND-ed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    flags: BTreeMap<FilterName, bool>,
}

impl Default for FilterSet {
    /// Every filter present and switched off.
    fn default() -> Self {
        Self {
            flags: FilterName::ALL.into_iter().map(|f| (f, false)).collect(),
        }
    }
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter set with exactly the given filters enabled.
    pub fn with_active<I>(active: I) -> Self
    where
        I: IntoIterator<Item = FilterName>,
    {
        let mut set = Self::default();
        for name in active {
            set.set(name, true);
        }
        set
    }

    /// Parse a comma-separated list of filter names (`"cpe,RoomReservation"`).
    ///
    /// Blank entries are skipped; an unknown name is an error.
    pub fn parse_list(list: &str) -> Result<Self, DashboardError> {
        let names = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(FilterName::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_active(names))
    }

    pub fn set(&mut self, name: FilterName, enabled: bool) {
        self.flags.insert(name, enabled);
    }

    /// Flip one flag and return its new value.
    pub fn toggle(&mut self, name: FilterName) -> bool {
        let flag = self.flags.entry(name).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn is_active(&self, name: FilterName) -> bool {
        self.flags.get(&name).copied().unwrap_or(false)
    }

    pub fn active(&self) -> impl Iterator<Item = FilterName> + '_ {
        self.flags
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(name, _)| *name)
    }

    /// True when no filter is enabled.
    pub fn is_unrestricted(&self) -> bool {
        self.active().next().is_none()
    }

    /// Category stage of the filter engine.
    pub fn matches(&self, title: &str) -> bool {
        self.active().all(|name| name.matches(title))
    }
}
