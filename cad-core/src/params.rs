//! Endpoints and the per-panel projection of filter state into a request.
//!
//! A [`ParamBundle`] carries optional fields so that an incomplete bundle is
//! representable; [`Endpoint::request`] only yields an [`ArtifactRequest`]
//! when every field that endpoint needs is present and non-empty.

use crate::filters::{ColumnType, FilterState, ParseFilterError, TableType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an endpoint's body is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKind {
    /// Opaque image bytes
    Image,
    /// JSON rows of cases per state
    Json,
}

/// The six data sources of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    CdfLinePlot,
    CdfLinePlotByState,
    IndiaMap,
    WordCloud,
    StackedHistogram,
    CasesPerState,
}

/// Query parameter names, in the order each endpoint sends them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Table,
    State,
    StartYear,
    EndYear,
    Column,
}

impl Field {
    fn key(&self) -> &'static str {
        match self {
            Field::Table => "table",
            Field::State => "state",
            Field::StartYear => "start_year",
            Field::EndYear => "end_year",
            Field::Column => "column",
        }
    }
}

impl Endpoint {
    pub const ALL: [Endpoint; 6] = [
        Endpoint::CdfLinePlot,
        Endpoint::CdfLinePlotByState,
        Endpoint::IndiaMap,
        Endpoint::WordCloud,
        Endpoint::StackedHistogram,
        Endpoint::CasesPerState,
    ];

    /// Path on the analytics service.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::CdfLinePlot => "/cdf_lineplot",
            Endpoint::CdfLinePlotByState => "/api/cdf_lineplot_state",
            Endpoint::IndiaMap => "/api/india_map",
            Endpoint::WordCloud => "/api/wordcloud",
            Endpoint::StackedHistogram => "/stacked_histogram",
            Endpoint::CasesPerState => "/api/cases_per_state",
        }
    }

    /// Short name used on the command line and in file names.
    pub fn slug(&self) -> &'static str {
        match self {
            Endpoint::CdfLinePlot => "cdf-lineplot",
            Endpoint::CdfLinePlotByState => "cdf-lineplot-state",
            Endpoint::IndiaMap => "india-map",
            Endpoint::WordCloud => "wordcloud",
            Endpoint::StackedHistogram => "stacked-histogram",
            Endpoint::CasesPerState => "cases-per-state",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Endpoint::CdfLinePlot => "CDF Line Plot",
            Endpoint::CdfLinePlotByState => "CDF Line Plot by State",
            Endpoint::IndiaMap => "India Map",
            Endpoint::WordCloud => "Word Cloud",
            Endpoint::StackedHistogram => "Stacked Histogram",
            Endpoint::CasesPerState => "Cases Per State",
        }
    }

    pub fn response_kind(&self) -> ResponseKind {
        match self {
            Endpoint::CasesPerState => ResponseKind::Json,
            _ => ResponseKind::Image,
        }
    }

    fn fields(&self) -> &'static [Field] {
        use Field::*;
        match self {
            Endpoint::CdfLinePlot => &[Table, StartYear, EndYear, Column],
            Endpoint::CdfLinePlotByState => &[Table, State, StartYear, EndYear],
            Endpoint::IndiaMap => &[Table, StartYear, EndYear],
            Endpoint::WordCloud => &[Table, Column, StartYear, EndYear],
            Endpoint::StackedHistogram => &[Table, StartYear, EndYear, Column],
            Endpoint::CasesPerState => &[Table, StartYear, EndYear],
        }
    }

    /// Whether this endpoint's request depends on the selected column type.
    pub fn uses_column(&self) -> bool {
        self.fields().contains(&Field::Column)
    }

    /// Whether this endpoint's request depends on the selected state.
    pub fn uses_state(&self) -> bool {
        self.fields().contains(&Field::State)
    }

    /// Build the request for this endpoint, or `None` when any required
    /// field is missing, zero, or empty.
    pub fn request(&self, bundle: &ParamBundle) -> Option<ArtifactRequest> {
        let mut query = Vec::with_capacity(self.fields().len());
        for field in self.fields() {
            let value = match field {
                Field::Table => bundle.table_type.map(|t| t.as_str().to_string()),
                Field::State => bundle
                    .state
                    .as_ref()
                    .filter(|s| !s.trim().is_empty())
                    .cloned(),
                Field::StartYear => bundle.start_year.filter(|y| *y != 0).map(|y| y.to_string()),
                Field::EndYear => bundle.end_year.filter(|y| *y != 0).map(|y| y.to_string()),
                Field::Column => bundle.column_type.map(|c| c.as_str().to_string()),
            };
            query.push((field.key(), value?));
        }
        Some(ArtifactRequest {
            endpoint: *self,
            query,
        })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Endpoint {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Endpoint::ALL
            .iter()
            .find(|e| e.slug() == s.trim())
            .copied()
            .ok_or_else(|| ParseFilterError::Endpoint(s.to_string()))
    }
}

/// Request parameters, any of which may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParamBundle {
    pub start_year: Option<u16>,
    pub end_year: Option<u16>,
    pub table_type: Option<TableType>,
    pub column_type: Option<ColumnType>,
    pub state: Option<String>,
}

impl From<&FilterState> for ParamBundle {
    fn from(filters: &FilterState) -> Self {
        Self {
            start_year: Some(filters.start_year),
            end_year: Some(filters.end_year),
            table_type: Some(filters.table_type),
            column_type: Some(filters.column_type),
            state: Some(filters.state.clone()),
        }
    }
}

/// A fully specified GET request for one endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactRequest {
    pub endpoint: Endpoint,
    pub query: Vec<(&'static str, String)>,
}

impl ArtifactRequest {
    /// The encoded query string without the leading `?`.
    pub fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Full URL against `base_url`, which may be empty for same-origin.
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{}{}?{}",
            base_url.trim_end_matches('/'),
            self.endpoint.path(),
            self.query_string()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> ParamBundle {
        ParamBundle::from(&FilterState::default())
    }

    #[test]
    fn test_query_order_per_endpoint() {
        let b = bundle();
        assert_eq!(
            Endpoint::CdfLinePlot.request(&b).unwrap().query_string(),
            "table=by&start_year=2020&end_year=2023&column=a_aff_resolved"
        );
        assert_eq!(
            Endpoint::CdfLinePlotByState.request(&b).unwrap().query_string(),
            "table=by&state=Bihar&start_year=2020&end_year=2023"
        );
        assert_eq!(
            Endpoint::IndiaMap.request(&b).unwrap().query_string(),
            "table=by&start_year=2020&end_year=2023"
        );
        assert_eq!(
            Endpoint::WordCloud.request(&b).unwrap().query_string(),
            "table=by&column=a_aff_resolved&start_year=2020&end_year=2023"
        );
        assert_eq!(
            Endpoint::CasesPerState.request(&b).unwrap().url(""),
            "/api/cases_per_state?table=by&start_year=2020&end_year=2023"
        );
    }

    #[test]
    fn test_url_with_base_and_encoded_state() {
        let mut filters = FilterState::default();
        filters.set_state("Tamil Nadu");
        let req = Endpoint::CdfLinePlotByState
            .request(&ParamBundle::from(&filters))
            .unwrap();
        assert_eq!(
            req.url("https://example.org/"),
            "https://example.org/api/cdf_lineplot_state?table=by&state=Tamil%20Nadu&start_year=2020&end_year=2023"
        );
    }

    #[test]
    fn test_incomplete_bundle_yields_no_request() {
        let mut b = bundle();
        b.table_type = None;
        for endpoint in Endpoint::ALL {
            assert!(endpoint.request(&b).is_none(), "{}", endpoint);
        }

        let mut b = bundle();
        b.start_year = Some(0);
        assert!(Endpoint::IndiaMap.request(&b).is_none());

        let mut b = bundle();
        b.state = Some(String::new());
        assert!(Endpoint::CdfLinePlotByState.request(&b).is_none());
        // Fields an endpoint does not send are not required
        assert!(Endpoint::IndiaMap.request(&b).is_some());

        let mut b = bundle();
        b.column_type = None;
        assert!(Endpoint::WordCloud.request(&b).is_none());
        assert!(Endpoint::CasesPerState.request(&b).is_some());
    }

    #[test]
    fn test_endpoint_slugs_round_trip() {
        for endpoint in Endpoint::ALL {
            assert_eq!(endpoint.slug().parse::<Endpoint>(), Ok(endpoint));
        }
        assert!("pie-chart".parse::<Endpoint>().is_err());
        assert_eq!(Endpoint::CasesPerState.response_kind(), ResponseKind::Json);
        assert_eq!(Endpoint::WordCloud.response_kind(), ResponseKind::Image);
        assert!(Endpoint::StackedHistogram.uses_column());
        assert!(!Endpoint::IndiaMap.uses_column());
        assert!(Endpoint::CdfLinePlotByState.uses_state());
    }
}
