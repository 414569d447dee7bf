//! Static registry of the dataset's metric columns.
//!
//! Each metric is one numeric column of the colony dataset. The registry maps
//! the column id to its display label, description text and unit. The unit
//! decides how the heat map scales values: percentages are shown verbatim,
//! counts relative to the largest value in the current selection.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Id the metric selector uses for "nothing selected".
pub const NO_METRIC_ID: &str = "select_metrics";

/// Number of metric columns in the dataset.
pub const METRIC_COUNT: usize = 11;

/// Unit classification of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Count,
    Percentage,
}

/// One numeric column of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    NumColonies,
    MaxColonies,
    LostColonies,
    PercentLost,
    AddedColonies,
    RenovatedColonies,
    PercentRenovated,
    VarroaMites,
    OtherPestsAndParasites,
    Diseases,
    Pesticides,
}

/// Display metadata for a metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub unit: Unit,
}

const DESCRIPTORS: [MetricDescriptor; METRIC_COUNT] = [
    MetricDescriptor {
        id: "num_colonies",
        label: "Number of Colonies",
        description: "The number of colonies per quarter.",
        unit: Unit::Count,
    },
    MetricDescriptor {
        id: "max_colonies",
        label: "Maximum Colonies",
        description: "The maximum number of colonies per quarter.",
        unit: Unit::Count,
    },
    MetricDescriptor {
        id: "lost_colonies",
        label: "Lost Colonies",
        description: "The number of lost colonies per quarter.",
        unit: Unit::Count,
    },
    MetricDescriptor {
        id: "percent_lost",
        label: "Percent Lost",
        description: "The percentage of lost colonies per quarter.",
        unit: Unit::Percentage,
    },
    MetricDescriptor {
        id: "added_colonies",
        label: "Added Colonies",
        description: "The number of new colonies that were added.",
        unit: Unit::Count,
    },
    MetricDescriptor {
        id: "renovated_colonies",
        label: "Renovated Colonies",
        description: "The number of colonies renovated. Which means that the queen of the hive was replaced with a new queen, or new bees were added to the colony.",
        unit: Unit::Count,
    },
    MetricDescriptor {
        id: "percent_renovated",
        label: "Percent Renovated",
        description: "The percentage of colonies renovated. Which means that the queen of the hive was replaced with a new queen, or new bees were added to the colony.",
        unit: Unit::Percentage,
    },
    MetricDescriptor {
        id: "varroa_mites",
        label: "Varroa Mites",
        description: "The percentage of colonies affected by Varroa mites. Which is a type of pest responsible of many honey bee deaths today.",
        unit: Unit::Percentage,
    },
    MetricDescriptor {
        id: "other_pests_and_parasites",
        label: "Other Pests and Parasites",
        description: "The percentage of colonies affected by other pests and parasites that are not Varroa mites.",
        unit: Unit::Percentage,
    },
    MetricDescriptor {
        id: "diseases",
        label: "Diseases",
        description: "The percentage of colonies affected by diseases.",
        unit: Unit::Percentage,
    },
    MetricDescriptor {
        id: "pesticides",
        label: "Pesticides",
        description: "The percentage of colonies affected by pesticides.",
        unit: Unit::Percentage,
    },
];

impl Metric {
    /// Every metric, in dataset column order.
    pub const ALL: [Metric; METRIC_COUNT] = [
        Metric::NumColonies,
        Metric::MaxColonies,
        Metric::LostColonies,
        Metric::PercentLost,
        Metric::AddedColonies,
        Metric::RenovatedColonies,
        Metric::PercentRenovated,
        Metric::VarroaMites,
        Metric::OtherPestsAndParasites,
        Metric::Diseases,
        Metric::Pesticides,
    ];

    /// Position of this metric in [`Metric::ALL`] and in a record's value array.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn descriptor(self) -> &'static MetricDescriptor {
        &DESCRIPTORS[self.index()]
    }

    pub fn as_str(self) -> &'static str {
        self.descriptor().id
    }

    pub fn unit(self) -> Unit {
        self.descriptor().unit
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .iter()
            .copied()
            .find(|metric| metric.as_str() == s)
            .ok_or_else(|| Error::UnknownMetric(s.to_string()))
    }
}

/// Look up the descriptor registered for `metric_id`.
pub fn describe(metric_id: &str) -> Result<&'static MetricDescriptor, Error> {
    metric_id.parse::<Metric>().map(Metric::descriptor)
}

/// Unit of the metric registered for `metric_id`.
pub fn unit_of(metric_id: &str) -> Result<Unit, Error> {
    metric_id.parse::<Metric>().map(Metric::unit)
}

/// The value of the metric selector: a metric, or the "none selected" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricSelection {
    NoneSelected,
    Selected(Metric),
}

impl MetricSelection {
    /// Parse a selector id. The sentinel maps to `NoneSelected`; any other id
    /// must be registered.
    pub fn parse(id: &str) -> Result<Self, Error> {
        if id == NO_METRIC_ID {
            return Ok(MetricSelection::NoneSelected);
        }
        id.parse().map(MetricSelection::Selected)
    }

    pub fn metric(self) -> Option<Metric> {
        match self {
            MetricSelection::NoneSelected => None,
            MetricSelection::Selected(metric) => Some(metric),
        }
    }
}
