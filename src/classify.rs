//! Single-scan column classification.
//!
//! Each column is profiled once and tagged with a [`ColumnKind`]; the
//! pass is pure and independent of the aggregation steps so it can be
//! tested on its own. Kinds are derived at analysis time, never stored.
//!
//! Rules:
//! - `Numeric`: the dataset has at least one data row and every
//!   non-missing cell parses as a finite number. A column whose cells
//!   are all missing still counts as numeric, matching the native
//!   inference of loaders that give all-missing columns a float kind.
//! - `DateLike`: a non-numeric column where strictly more than half of
//!   the data rows parse as a calendar date or timestamp. Missing
//!   cells count toward the denominator, not the numerator.
//! - `Text`: everything else, including every column of an empty
//!   (header-only) dataset.

use crate::{data, dataset::Dataset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Text,
    DateLike,
}

#[derive(Debug, Clone, Copy, Default)]
struct ColumnProfile {
    non_missing: usize,
    numeric_matches: usize,
    date_matches: usize,
}

impl ColumnProfile {
    fn observe(&mut self, value: &str) {
        self.non_missing += 1;
        if data::parse_number(value).is_some() {
            self.numeric_matches += 1;
        }
        if data::parse_date_value(value).is_some() {
            self.date_matches += 1;
        }
    }

    fn decide(&self, row_count: usize) -> ColumnKind {
        if row_count == 0 {
            return ColumnKind::Text;
        }
        if self.numeric_matches == self.non_missing {
            return ColumnKind::Numeric;
        }
        // Strict majority of all rows, not just non-missing cells.
        if self.date_matches * 2 > row_count {
            return ColumnKind::DateLike;
        }
        ColumnKind::Text
    }
}

/// Classifies every column of the dataset in original column order.
pub fn classify_columns(dataset: &Dataset) -> Vec<ColumnKind> {
    let mut profiles = vec![ColumnProfile::default(); dataset.column_count()];
    for row in dataset.rows() {
        for (profile, cell) in profiles.iter_mut().zip(row) {
            if let Some(value) = cell.as_deref() {
                profile.observe(value);
            }
        }
    }
    profiles
        .iter()
        .map(|profile| profile.decide(dataset.row_count()))
        .collect()
}
