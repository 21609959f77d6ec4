//! Core data models for the campus study spot map.

use serde::{Deserialize, Serialize};
use snafu::OptionExt;
use std::fmt;
use std::str::FromStr;

use crate::errors::{CampusError, InvalidStatusSnafu};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Status a user can report for a study spot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusValue {
    Vacant,
    #[serde(rename = "Little Busy")]
    LittleBusy,
    Busy,
}

impl StatusValue {
    pub const ALL: [StatusValue; 3] = [StatusValue::Vacant, StatusValue::LittleBusy, StatusValue::Busy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vacant => "Vacant",
            Self::LittleBusy => "Little Busy",
            Self::Busy => "Busy",
        }
    }

    /// Lowercased label with its first space turned into a hyphen.
    pub fn css_class(&self) -> String {
        self.as_str().to_lowercase().replacen(' ', "-", 1)
    }
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusValue {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .context(InvalidStatusSnafu { value: s })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StudySpot {
    pub id: &'static str,
    pub position: LatLon,
    pub name: &'static str,
    /// Written to the store the first time the app runs.
    pub default_status: StatusValue,
}

impl StudySpot {
    pub fn storage_key(&self) -> String {
        format!("{}Status", self.id)
    }

    pub fn panel_id(&self) -> String {
        format!("{}-status-update", self.id)
    }

    pub fn select_id(&self) -> String {
        format!("{}-status-select", self.id)
    }

    pub fn sidebar_id(&self) -> String {
        format!("{}-status", self.id)
    }
}

pub static STUDY_SPOTS: [StudySpot; 2] = [
    StudySpot {
        id: "library",
        position: LatLon::new(40.9153, -73.1230),
        name: "Frank Melville Jr. Memorial Library",
        default_status: StatusValue::Vacant,
    },
    StudySpot {
        id: "union",
        position: LatLon::new(40.917342, -73.122295),
        name: "Stony Brook Union",
        default_status: StatusValue::Busy,
    },
];

pub fn find_spot(id: &str) -> Option<&'static StudySpot> {
    STUDY_SPOTS.iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_class_derivation() {
        assert_eq!(StatusValue::Vacant.css_class(), "vacant");
        assert_eq!(StatusValue::LittleBusy.css_class(), "little-busy");
        assert_eq!(StatusValue::Busy.css_class(), "busy");
    }

    #[test]
    fn parses_only_enumerated_labels() {
        assert_eq!("Little Busy".parse::<StatusValue>().unwrap(), StatusValue::LittleBusy);
        assert_eq!("Busy".parse::<StatusValue>().unwrap(), StatusValue::Busy);
        assert!("busy".parse::<StatusValue>().is_err());
        assert!("Little-Busy".parse::<StatusValue>().is_err());
        assert!("".parse::<StatusValue>().is_err());
        let err = "Packed".parse::<StatusValue>().unwrap_err();
        assert!(matches!(err, CampusError::InvalidStatus { ref value } if value == "Packed"));
    }

    #[test]
    fn serde_uses_display_labels() {
        let json = serde_json::to_string(&StatusValue::LittleBusy).unwrap();
        assert_eq!(json, "\"Little Busy\"");
        let back: StatusValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StatusValue::LittleBusy);
    }

    #[test]
    fn spot_derived_identifiers() {
        let union = find_spot("union").unwrap();
        assert_eq!(union.storage_key(), "unionStatus");
        assert_eq!(union.panel_id(), "union-status-update");
        assert_eq!(union.select_id(), "union-status-select");
        assert_eq!(union.sidebar_id(), "union-status");
        assert!(find_spot("gym").is_none());
    }
}
