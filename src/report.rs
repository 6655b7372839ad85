//! Serializable insight-report model returned by the analyzer.
//!
//! Chart labels and data are positionally aligned and always equal in
//! length. Counts serialize as JSON integers and sums as JSON floats,
//! so the response distinguishes frequency charts from aggregation
//! charts the way consumers expect.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InsightReport {
    pub summary: Summary,
    pub top_items: Vec<TopItem>,
    pub charts: Charts,
    pub statistics: BTreeMap<String, NumericStats>,
}

/// Scalar dataset facts plus derived monetary totals/averages keyed by
/// `total_<column>` / `average_<column>`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Summary {
    pub total_rows: usize,
    pub total_columns: usize,
    pub columns: Vec<String>,
    #[serde(flatten)]
    pub monetary: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TopItem {
    pub name: String,
    pub count: usize,
}

/// The four chart slots of a report. Absent charts are omitted from
/// the serialized output entirely, never emitted as empty arrays.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Charts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_items: Option<Chart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Chart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<Chart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouped_analysis: Option<Chart>,
}

impl Charts {
    pub fn is_empty(&self) -> bool {
        self.top_items.is_none()
            && self.timeline.is_none()
            && self.distribution.is_none()
            && self.grouped_analysis.is_none()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Chart {
    pub labels: Vec<String>,
    pub data: Vec<ChartValue>,
    pub title: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ChartValue {
    Count(u64),
    Sum(f64),
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
}
