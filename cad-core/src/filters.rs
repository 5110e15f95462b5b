//! Filter values and the start/end year correction rule.
//!
//! Every panel owns a [`FilterState`]. Year changes never fail: when the
//! start year catches up with the end year, the end year is pushed forward
//! to `min(start + 1, MAX_YEAR)`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// First year the analytics service has data for.
pub const MIN_YEAR: u16 = 1990;

/// Last year the analytics service has data for.
pub const MAX_YEAR: u16 = 2023;

/// Indian states and union territories offered in the state selector.
pub const STATES: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
    "Chandigarh",
    "Dadra and Nagar Haveli and Daman and Diu",
    "Lakshadweep",
    "Puducherry",
    "Andaman and Nicobar Islands",
];

/// Errors from parsing filter values out of strings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFilterError {
    #[error("unknown table type: {0} (expected `by` or `against`)")]
    TableType(String),

    #[error("unknown column type: {0} (expected `a_aff_resolved` or `c_aff_resolved`)")]
    ColumnType(String),

    #[error("unknown panel: {0}")]
    Endpoint(String),

    #[error("year {0} is outside {MIN_YEAR}..={MAX_YEAR}")]
    Year(String),
}

/// Which of the two dataset orientations the backend aggregates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableType {
    #[default]
    By,
    Against,
}

impl TableType {
    pub const ALL: [TableType; 2] = [TableType::By, TableType::Against];

    /// Query-string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            TableType::By => "by",
            TableType::Against => "against",
        }
    }

    /// Label shown in the selector.
    pub fn label(&self) -> &'static str {
        match self {
            TableType::By => "By",
            TableType::Against => "Against",
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableType {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "by" => Ok(TableType::By),
            "against" => Ok(TableType::Against),
            other => Err(ParseFilterError::TableType(other.to_string())),
        }
    }
}

/// Which resolved-metric field the backend aggregation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    #[default]
    AAffResolved,
    CAffResolved,
}

impl ColumnType {
    pub const ALL: [ColumnType; 2] = [ColumnType::AAffResolved, ColumnType::CAffResolved];

    /// Query-string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::AAffResolved => "a_aff_resolved",
            ColumnType::CAffResolved => "c_aff_resolved",
        }
    }

    /// Label shown in the selector and in the word cloud title.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::AAffResolved => "Affected Resolved (A)",
            ColumnType::CAffResolved => "Affected Resolved (C)",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "a_aff_resolved" => Ok(ColumnType::AAffResolved),
            "c_aff_resolved" => Ok(ColumnType::CAffResolved),
            other => Err(ParseFilterError::ColumnType(other.to_string())),
        }
    }
}

/// A value/label pair handed to a dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Every year in the supported domain, oldest first.
pub fn year_options() -> Vec<SelectOption> {
    (MIN_YEAR..=MAX_YEAR)
        .map(|y| SelectOption::new(y.to_string(), y.to_string()))
        .collect()
}

/// Years selectable as a start year.
///
/// The last year is left out because no end year could follow it.
pub fn start_year_options() -> Vec<SelectOption> {
    year_options()
        .into_iter()
        .filter(|o| o.value != MAX_YEAR.to_string())
        .collect()
}

/// Years selectable as an end year: strictly after `start_year`.
pub fn end_year_options(start_year: u16) -> Vec<SelectOption> {
    (start_year.saturating_add(1).max(MIN_YEAR)..=MAX_YEAR)
        .map(|y| SelectOption::new(y.to_string(), y.to_string()))
        .collect()
}

pub fn state_options() -> Vec<SelectOption> {
    STATES.iter().map(|s| SelectOption::new(*s, *s)).collect()
}

pub fn table_type_options() -> Vec<SelectOption> {
    TableType::ALL
        .iter()
        .map(|t| SelectOption::new(t.as_str(), t.label()))
        .collect()
}

pub fn column_type_options() -> Vec<SelectOption> {
    ColumnType::ALL
        .iter()
        .map(|c| SelectOption::new(c.as_str(), c.label()))
        .collect()
}

/// Parse a year string and check it against the supported domain.
pub fn parse_year(s: &str) -> Result<u16, ParseFilterError> {
    s.trim()
        .parse::<u16>()
        .ok()
        .filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y))
        .ok_or_else(|| ParseFilterError::Year(s.to_string()))
}

/// End year after correction: unchanged when `start < end`, otherwise
/// `min(start + 1, MAX_YEAR)`.
pub fn correct_end_year(start_year: u16, end_year: u16) -> u16 {
    if start_year >= end_year {
        start_year.saturating_add(1).min(MAX_YEAR)
    } else {
        end_year
    }
}

/// Current filter values of one panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterState {
    pub start_year: u16,
    pub end_year: u16,
    pub state: String,
    pub table_type: TableType,
    pub column_type: ColumnType,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            start_year: 2020,
            end_year: MAX_YEAR,
            state: "Bihar".to_string(),
            table_type: TableType::By,
            column_type: ColumnType::AAffResolved,
        }
    }
}

impl FilterState {
    /// Set the start year, clamped into `MIN_YEAR..MAX_YEAR`, then correct
    /// the end year.
    pub fn set_start_year(&mut self, year: u16) {
        self.start_year = year.clamp(MIN_YEAR, MAX_YEAR - 1);
        self.correct();
    }

    /// Set the end year, clamped into the year domain, then correct it
    /// against the start year.
    pub fn set_end_year(&mut self, year: u16) {
        self.end_year = year.clamp(MIN_YEAR, MAX_YEAR);
        self.correct();
    }

    pub fn set_state(&mut self, state: impl Into<String>) {
        self.state = state.into();
    }

    pub fn set_table_type(&mut self, table_type: TableType) {
        self.table_type = table_type;
    }

    pub fn set_column_type(&mut self, column_type: ColumnType) {
        self.column_type = column_type;
    }

    fn correct(&mut self) {
        let corrected = correct_end_year(self.start_year, self.end_year);
        if corrected != self.end_year {
            log::debug!(
                "end year {} not after start year {}, corrected to {}",
                self.end_year,
                self.start_year,
                corrected
            );
            self.end_year = corrected;
        }
    }

    /// Whether `start_year < end_year` holds right now.
    pub fn is_range_valid(&self) -> bool {
        self.start_year < self.end_year
    }

    /// "2020-2023", used in panel titles.
    pub fn year_range_label(&self) -> String {
        format!("{}-{}", self.start_year, self.end_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_end_year_formula() {
        for start in MIN_YEAR..=MAX_YEAR {
            for end in MIN_YEAR..=start {
                let corrected = correct_end_year(start, end);
                assert_eq!(corrected, (start + 1).min(MAX_YEAR));
            }
        }
        assert_eq!(correct_end_year(2000, 2010), 2010);
    }

    #[test]
    fn test_filter_state_keeps_start_before_end() {
        let mut filters = FilterState::default();
        for start in MIN_YEAR..=MAX_YEAR {
            for end in MIN_YEAR..=MAX_YEAR {
                filters.set_end_year(end);
                filters.set_start_year(start);
                assert!(filters.is_range_valid(), "start {} end {}", start, end);
                filters.set_end_year(end);
                assert!(filters.is_range_valid(), "start {} end {}", start, end);
            }
        }
    }

    #[test]
    fn test_start_year_catching_up_pushes_end() {
        let mut filters = FilterState::default();
        filters.set_start_year(2023);
        assert_eq!(filters.start_year, 2022);
        assert_eq!(filters.end_year, 2023);

        filters.set_end_year(2010);
        assert_eq!(filters.end_year, 2023);

        filters.set_start_year(2005);
        filters.set_end_year(2008);
        filters.set_start_year(2010);
        assert_eq!(filters.end_year, 2011);
    }

    #[test]
    fn test_defaults() {
        let filters = FilterState::default();
        assert_eq!(filters.start_year, 2020);
        assert_eq!(filters.end_year, 2023);
        assert_eq!(filters.state, "Bihar");
        assert_eq!(filters.table_type, TableType::By);
        assert_eq!(filters.column_type, ColumnType::AAffResolved);
        assert_eq!(filters.year_range_label(), "2020-2023");
    }

    #[test]
    fn test_option_catalogues() {
        assert_eq!(year_options().len(), 34);
        assert_eq!(start_year_options().len(), 33);
        assert_eq!(STATES.len(), 36);

        let ends = end_year_options(2020);
        let values: Vec<&str> = ends.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["2021", "2022", "2023"]);
        assert!(end_year_options(MAX_YEAR).is_empty());

        assert_eq!(table_type_options()[1], SelectOption::new("against", "Against"));
        assert_eq!(column_type_options()[0].label, "Affected Resolved (A)");
    }

    #[test]
    fn test_parse_values() {
        assert_eq!("against".parse::<TableType>(), Ok(TableType::Against));
        assert_eq!("c_aff_resolved".parse::<ColumnType>(), Ok(ColumnType::CAffResolved));
        assert!("sideways".parse::<TableType>().is_err());
        assert_eq!(parse_year("1995"), Ok(1995));
        assert!(parse_year("1989").is_err());
        assert!(parse_year("abc").is_err());
    }
}
