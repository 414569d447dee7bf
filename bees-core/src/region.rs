use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the whole-country region.
pub const UNITED_STATES: &str = "United States";

/// The 50 US states, alphabetical. Position + 1 is the state's [`RegionHandle`].
pub const US_STATES: [&str; 50] = [
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
];

/// A selectable map region: one state, or the whole country.
///
/// Any state name is accepted, since the dataset may carry groupings that are
/// not one of the 50 states. Those simply have no [`RegionHandle`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Region {
    UnitedStates,
    State(String),
}

/// Opaque handle the geometry collaborator uses to look up a region's
/// boundary, centroid and label. `0` is the whole country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RegionHandle(pub u16);

impl Region {
    /// Interpret a clicked region name.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if name == UNITED_STATES {
            Region::UnitedStates
        } else {
            Region::State(name.to_string())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Region::UnitedStates => UNITED_STATES,
            Region::State(name) => name,
        }
    }

    /// True if a record for `state` belongs to this region.
    ///
    /// The whole-country region takes every row.
    pub fn contains(&self, state: &str) -> bool {
        match self {
            Region::UnitedStates => true,
            Region::State(name) => name == state,
        }
    }

    pub fn handle(&self) -> Option<RegionHandle> {
        match self {
            Region::UnitedStates => Some(RegionHandle(0)),
            Region::State(name) => US_STATES
                .iter()
                .position(|state| state == name)
                .map(|i| RegionHandle(i as u16 + 1)),
        }
    }

    /// Every region with a handle: the country followed by the 50 states.
    pub fn all() -> Vec<Region> {
        std::iter::once(Region::UnitedStates)
            .chain(US_STATES.iter().map(|s| Region::State(s.to_string())))
            .collect()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Region {
    fn from(value: String) -> Self {
        Region::from_name(&value)
    }
}

impl From<Region> for String {
    fn from(value: Region) -> Self {
        value.name().to_string()
    }
}
