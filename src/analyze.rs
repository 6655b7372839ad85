//! The dataset analyzer: classifies columns and assembles the insight
//! report in one pass over an in-memory [`Dataset`].
//!
//! Every derived feature is best-effort. A feature whose inputs vanish
//! after dropping missing or unparseable values is omitted from the
//! report; nothing here fails the request. The analyzer is a pure
//! function of the dataset — no I/O, no shared state — and is safe to
//! call concurrently from any number of request handlers.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use itertools::{Itertools, MinMaxResult};
use log::debug;

use crate::{
    classify::{ColumnKind, classify_columns},
    data,
    dataset::Dataset,
    report::{Chart, ChartValue, Charts, InsightReport, NumericStats, Summary, TopItem},
};

const EARNINGS_KEYWORDS: &[&str] = &[
    "price", "total", "amount", "revenue", "earnings", "sales", "cost",
];
const TOP_ITEM_LIMIT: usize = 10;
const STATISTICS_COLUMN_LIMIT: usize = 5;
const HISTOGRAM_BINS: usize = 20;
const TIMELINE_DATE_LIMIT: usize = 30;

pub fn analyze(dataset: &Dataset) -> InsightReport {
    let kinds = classify_columns(dataset);
    let numeric = columns_of_kind(&kinds, ColumnKind::Numeric);
    let categorical = columns_of_kind(&kinds, ColumnKind::Text);
    let date_like = columns_of_kind(&kinds, ColumnKind::DateLike);
    debug!(
        "Classified {} column(s): {} numeric, {} categorical, {} date-like",
        kinds.len(),
        numeric.len(),
        categorical.len(),
        date_like.len()
    );

    let headers = dataset.headers();
    let mut summary = Summary {
        total_rows: dataset.row_count(),
        total_columns: dataset.column_count(),
        columns: headers.to_vec(),
        monetary: BTreeMap::new(),
    };

    for &column in &numeric {
        let name = headers[column].to_lowercase();
        if !EARNINGS_KEYWORDS.iter().any(|keyword| name.contains(keyword)) {
            continue;
        }
        let values = numeric_values(dataset, column);
        let sum: f64 = values.iter().sum();
        let mean = if values.is_empty() {
            0.0
        } else {
            sum / values.len() as f64
        };
        summary.monetary.insert(format!("total_{name}"), sum);
        summary.monetary.insert(format!("average_{name}"), mean);
    }

    let mut charts = Charts::default();
    let mut top_items = Vec::new();
    if let Some(&column) = categorical.first() {
        let counts = count_values(dataset, column);
        top_items = counts
            .iter()
            .take(TOP_ITEM_LIMIT)
            .map(|(name, count)| TopItem {
                name: name.clone(),
                count: *count,
            })
            .collect();
        if !top_items.is_empty() {
            charts.top_items = Some(Chart {
                labels: top_items.iter().map(|item| item.name.clone()).collect(),
                data: top_items
                    .iter()
                    .map(|item| ChartValue::Count(item.count as u64))
                    .collect(),
                title: format!("Top {}", headers[column]),
            });
        }
    }

    if let Some(&column) = date_like.first() {
        charts.timeline = timeline_chart(dataset, column, &headers[column]);
    }

    let mut statistics = BTreeMap::new();
    for &column in numeric.iter().take(STATISTICS_COLUMN_LIMIT) {
        let values = numeric_values(dataset, column);
        statistics.insert(headers[column].clone(), numeric_stats(&values));
    }

    if let Some(&column) = numeric.first() {
        let values = numeric_values(dataset, column);
        charts.distribution = distribution_chart(&values, &headers[column]);
    }

    if let (Some(&category), Some(&amount)) = (categorical.first(), numeric.first()) {
        charts.grouped_analysis =
            grouped_chart(dataset, category, amount, &headers[amount], &headers[category]);
    }

    InsightReport {
        summary,
        top_items,
        charts,
        statistics,
    }
}

fn columns_of_kind(kinds: &[ColumnKind], wanted: ColumnKind) -> Vec<usize> {
    kinds
        .iter()
        .enumerate()
        .filter(|(_, kind)| **kind == wanted)
        .map(|(index, _)| index)
        .collect()
}

/// Parsed non-missing values of a numeric column, in row order.
fn numeric_values(dataset: &Dataset, column: usize) -> Vec<f64> {
    dataset
        .column_values(column)
        .filter_map(data::parse_number)
        .collect()
}

/// Distinct non-missing values with occurrence counts, accumulated in
/// first-seen order, then stably sorted by descending count so ties
/// keep their first-seen order.
fn count_values(dataset: &Dataset, column: usize) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in dataset.column_values(column) {
        match counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                counts.insert(value.to_string(), 1);
                order.push(value.to_string());
            }
        }
    }
    let mut items: Vec<(String, usize)> = order
        .into_iter()
        .map(|value| {
            let count = counts[&value];
            (value, count)
        })
        .collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    items
}

/// Rows-per-calendar-date counts for the first date-like column,
/// ascending by date, truncated to the most recent dates.
fn timeline_chart(dataset: &Dataset, column: usize, name: &str) -> Option<Chart> {
    let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for value in dataset.column_values(column) {
        if let Some(date) = data::parse_date_value(value) {
            *counts.entry(date).or_insert(0) += 1;
        }
    }
    if counts.is_empty() {
        return None;
    }
    let entries: Vec<(NaiveDate, u64)> = counts.into_iter().collect();
    let skip = entries.len().saturating_sub(TIMELINE_DATE_LIMIT);
    let recent = &entries[skip..];
    Some(Chart {
        labels: recent
            .iter()
            .map(|(date, _)| date.format("%Y-%m-%d").to_string())
            .collect(),
        data: recent
            .iter()
            .map(|(_, count)| ChartValue::Count(*count))
            .collect(),
        title: format!("Activity Over Time ({name})"),
    })
}

fn numeric_stats(values: &[f64]) -> NumericStats {
    if values.is_empty() {
        return NumericStats {
            min: 0.0,
            max: 0.0,
            mean: 0.0,
            median: 0.0,
            std: 0.0,
        };
    }
    let count = values.len();
    let sum: f64 = values.iter().sum();
    let mean = sum / count as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    NumericStats {
        min,
        max,
        mean,
        median: median(values),
        std: std_dev(values, mean),
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len().is_multiple_of(2) {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Unbiased sample standard deviation; 0 with fewer than two values.
fn std_dev(values: &[f64], mean: f64) -> f64 {
    let count = values.len();
    if count < 2 {
        return 0.0;
    }
    let sum_squares: f64 = values.iter().map(|value| value * value).sum();
    let variance = (sum_squares - count as f64 * mean * mean) / (count as f64 - 1.0);
    variance.max(0.0).sqrt()
}

/// Equal-width histogram over the column's value range. A degenerate
/// range (all values equal) widens to one unit around the value; the
/// top edge is inclusive.
fn distribution_chart(values: &[f64], name: &str) -> Option<Chart> {
    let (min, max) = match values.iter().copied().minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => return None,
        MinMaxResult::OneElement(value) => (value, value),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    let (low, high) = if max > min {
        (min, max)
    } else {
        (min - 0.5, max + 0.5)
    };
    let width = (high - low) / HISTOGRAM_BINS as f64;
    let mut counts = vec![0u64; HISTOGRAM_BINS];
    for &value in values {
        let mut bin = ((value - low) / width) as usize;
        if bin >= HISTOGRAM_BINS {
            bin = HISTOGRAM_BINS - 1;
        }
        counts[bin] += 1;
    }
    Some(Chart {
        labels: (0..HISTOGRAM_BINS)
            .map(|bin| format!("{:.2}", low + width * bin as f64))
            .collect(),
        data: counts.into_iter().map(ChartValue::Count).collect(),
        title: format!("{name} Distribution"),
    })
}

/// Sums the numeric column per category value. Rows with a missing
/// category are excluded; rows with a missing amount contribute zero.
/// Groups accumulate in first-seen order, then sort stably by
/// descending sum so equal sums keep their first-seen order.
fn grouped_chart(
    dataset: &Dataset,
    category: usize,
    amount: usize,
    amount_name: &str,
    category_name: &str,
) -> Option<Chart> {
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, f64> = HashMap::new();
    for row in dataset.rows() {
        let Some(key) = row.get(category).and_then(|cell| cell.as_deref()) else {
            continue;
        };
        let value = row
            .get(amount)
            .and_then(|cell| cell.as_deref())
            .and_then(data::parse_number)
            .unwrap_or(0.0);
        match sums.get_mut(key) {
            Some(sum) => *sum += value,
            None => {
                sums.insert(key.to_string(), value);
                order.push(key.to_string());
            }
        }
    }
    if order.is_empty() {
        return None;
    }
    let mut groups: Vec<(String, f64)> = order
        .into_iter()
        .map(|key| {
            let sum = sums[&key];
            (key, sum)
        })
        .collect();
    groups.sort_by(|a, b| b.1.total_cmp(&a.1));
    groups.truncate(TOP_ITEM_LIMIT);
    Some(Chart {
        labels: groups.iter().map(|(key, _)| key.clone()).collect(),
        data: groups
            .iter()
            .map(|(_, sum)| ChartValue::Sum(*sum))
            .collect(),
        title: format!("{amount_name} by {category_name}"),
    })
}
