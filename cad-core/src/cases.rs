//! Cases-per-state rows: response shape normalization and the ranked view.

use crate::error::FetchError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Label used for rows whose state is null.
pub const UNKNOWN_STATE: &str = "Unknown";

/// Wrapper keys the service may nest the rows under, checked in this order.
pub const WRAPPER_KEYS: [&str; 3] = ["data", "results", "cases"];

/// Case count for one state, as returned by `/api/cases_per_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasePerState {
    pub state: Option<String>,
    pub count: u64,
}

impl CasePerState {
    pub fn new(state: Option<&str>, count: u64) -> Self {
        Self {
            state: state.map(str::to_string),
            count,
        }
    }

    pub fn label(&self) -> &str {
        match self.state.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => UNKNOWN_STATE,
        }
    }
}

/// The shapes a cases-per-state payload can take.
#[derive(Debug, Clone, PartialEq)]
pub enum CasesShape {
    /// A bare JSON array
    Bare(Vec<Value>),
    /// An object holding the array under one of [`WRAPPER_KEYS`]
    Wrapped { key: &'static str, rows: Vec<Value> },
    /// Anything else
    Unrecognized(Value),
}

impl CasesShape {
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Array(rows) => CasesShape::Bare(rows),
            Value::Object(mut map) => {
                for key in WRAPPER_KEYS {
                    if matches!(map.get(key), Some(Value::Array(_))) {
                        if let Some(Value::Array(rows)) = map.remove(key) {
                            return CasesShape::Wrapped { key, rows };
                        }
                    }
                }
                CasesShape::Unrecognized(Value::Object(map))
            }
            other => CasesShape::Unrecognized(other),
        }
    }

    /// Deserialize the rows, or report an unrecognized shape.
    pub fn into_rows(self) -> Result<Vec<CasePerState>, FetchError> {
        let rows = match self {
            CasesShape::Bare(rows) => rows,
            CasesShape::Wrapped { key, rows } => {
                log::debug!("cases payload wrapped under `{}`", key);
                rows
            }
            CasesShape::Unrecognized(value) => {
                let summary = shape_summary(&value);
                log::warn!("cases payload matched no known shape: {}", summary);
                return Err(FetchError::UnexpectedShape(summary));
            }
        };
        rows.into_iter()
            .map(|row| serde_json::from_value::<CasePerState>(row).map_err(FetchError::from))
            .collect()
    }
}

fn shape_summary(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("object with keys [{}]", keys.join(", "))
        }
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Array(_) => "array".to_string(),
    }
}

/// Parse a response body into rows, accepting every known shape.
pub fn normalize_cases(body: &[u8]) -> Result<Vec<CasePerState>, FetchError> {
    let value: Value = serde_json::from_slice(body)?;
    CasesShape::classify(value).into_rows()
}

/// One row of the ranked table.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow {
    /// 1-based position after sorting
    pub rank: usize,
    pub label: String,
    pub count: u64,
    /// Share of the total, rounded to one decimal
    pub percentage: f64,
    /// Length relative to the largest count, 0..=100
    pub bar_width: f64,
}

impl RankedRow {
    pub fn rank_label(&self) -> String {
        format!("#{}", self.rank)
    }

    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.percentage)
    }

    pub fn bar_label(&self) -> String {
        format!("{:.0}%", self.bar_width)
    }

    pub fn count_label(&self) -> String {
        group_thousands(self.count)
    }
}

/// Rows sorted by count, descending, with derived columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedTable {
    pub rows: Vec<RankedRow>,
    pub total: u64,
}

impl RankedTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_label(&self) -> String {
        format!("Total cases: {}", group_thousands(self.total))
    }
}

/// Sort by count (stable for ties) and derive percentage and bar width.
pub fn rank_cases(cases: &[CasePerState]) -> RankedTable {
    let mut sorted: Vec<&CasePerState> = cases.iter().collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count));

    let total: u64 = sorted.iter().map(|c| c.count).sum();
    let max = sorted.first().map(|c| c.count).unwrap_or(0);

    let rows = sorted
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let (percentage, bar_width) = if total > 0 && max > 0 {
                let pct = c.count as f64 / total as f64 * 100.0;
                (
                    (pct * 10.0).round() / 10.0,
                    c.count as f64 / max as f64 * 100.0,
                )
            } else {
                (0.0, 0.0)
            };
            RankedRow {
                rank: i + 1,
                label: c.label().to_string(),
                count: c.count,
                percentage,
                bar_width,
            }
        })
        .collect();

    RankedTable { rows, total }
}

/// 1234567 -> "1,234,567"
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_known_shapes_normalize_the_same() {
        let expected = vec![CasePerState::new(Some("A"), 5)];
        let bodies = [
            json!([{"state": "A", "count": 5}]),
            json!({"data": [{"state": "A", "count": 5}]}),
            json!({"results": [{"state": "A", "count": 5}]}),
            json!({"cases": [{"state": "A", "count": 5}]}),
        ];
        for body in bodies {
            let bytes = serde_json::to_vec(&body).unwrap();
            assert_eq!(normalize_cases(&bytes).unwrap(), expected, "{}", body);
        }
    }

    #[test]
    fn test_wrapper_precedence_skips_non_arrays() {
        let value = json!({
            "data": "not rows",
            "results": [{"state": null, "count": 2}],
            "cases": [{"state": "B", "count": 9}],
        });
        match CasesShape::classify(value) {
            CasesShape::Wrapped { key, rows } => {
                assert_eq!(key, "results");
                assert_eq!(rows.len(), 1);
            }
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_unrecognized_shape_is_an_error() {
        let err = normalize_cases(br#"{"rows": []}"#).unwrap_err();
        assert_eq!(
            err,
            FetchError::UnexpectedShape("object with keys [rows]".to_string())
        );
        assert!(matches!(
            normalize_cases(b"42"),
            Err(FetchError::UnexpectedShape(_))
        ));
        assert!(matches!(normalize_cases(b"not json"), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_rank_cases() {
        let cases = vec![
            CasePerState::new(Some("X"), 30),
            CasePerState::new(Some("Y"), 10),
            CasePerState::new(Some("Z"), 60),
        ];
        let table = rank_cases(&cases);
        assert_eq!(table.total, 100);

        let labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Z", "X", "Y"]);

        let pcts: Vec<String> = table.rows.iter().map(|r| r.percentage_label()).collect();
        assert_eq!(pcts, vec!["60.0%", "30.0%", "10.0%"]);

        assert_eq!(table.rows[0].bar_width, 100.0);
        assert_eq!(table.rows[1].bar_width, 50.0);
        assert!((table.rows[2].bar_width - 16.666).abs() < 0.01);
        assert_eq!(table.rows[2].bar_label(), "17%");
        assert_eq!(table.rows[0].rank_label(), "#1");
    }

    #[test]
    fn test_rank_cases_zero_total() {
        let table = rank_cases(&[]);
        assert!(table.is_empty());
        assert_eq!(table.total, 0);

        let cases = vec![CasePerState::new(None, 0), CasePerState::new(Some("Q"), 0)];
        let table = rank_cases(&cases);
        assert_eq!(table.total, 0);
        for row in &table.rows {
            assert_eq!(row.percentage, 0.0);
            assert_eq!(row.bar_width, 0.0);
        }
        assert_eq!(table.rows[0].label, UNKNOWN_STATE);
    }

    #[test]
    fn test_ties_keep_source_order() {
        let cases = vec![
            CasePerState::new(Some("First"), 4),
            CasePerState::new(Some("Second"), 4),
            CasePerState::new(Some("Top"), 8),
        ];
        let table = rank_cases(&cases);
        let labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Top", "First", "Second"]);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        let table = rank_cases(&[CasePerState::new(Some("A"), 12345)]);
        assert_eq!(table.total_label(), "Total cases: 12,345");
    }
}
