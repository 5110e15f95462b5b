//! Filter controls of one panel and its fetch policy.

use crate::filters::{ColumnType, FilterState, TableType};
use crate::params::{Endpoint, ParamBundle};

/// How a panel decides when to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Fetch only after an explicit "Generate"; any filter change disarms.
    Manual,
    /// Fetch whenever the (debounced) filters settle.
    Auto,
}

/// A panel's own filters plus whether it is armed to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelControls {
    filters: FilterState,
    policy: FetchPolicy,
    armed: bool,
}

impl PanelControls {
    pub fn new(policy: FetchPolicy) -> Self {
        Self::with_filters(policy, FilterState::default())
    }

    pub fn with_filters(policy: FetchPolicy, filters: FilterState) -> Self {
        Self {
            filters,
            policy,
            armed: false,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn policy(&self) -> FetchPolicy {
        self.policy
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Apply a filter change; a manual panel returns to idle.
    pub fn edit(&mut self, change: impl FnOnce(&mut FilterState)) {
        change(&mut self.filters);
        if self.policy == FetchPolicy::Manual {
            self.armed = false;
        }
    }

    pub fn set_start_year(&mut self, year: u16) {
        self.edit(|f| f.set_start_year(year));
    }

    pub fn set_end_year(&mut self, year: u16) {
        self.edit(|f| f.set_end_year(year));
    }

    pub fn set_state(&mut self, state: String) {
        self.edit(|f| f.set_state(state));
    }

    pub fn set_table_type(&mut self, table_type: TableType) {
        self.edit(|f| f.set_table_type(table_type));
    }

    pub fn set_column_type(&mut self, column_type: ColumnType) {
        self.edit(|f| f.set_column_type(column_type));
    }

    /// Whether the "Generate" button is enabled.
    pub fn can_generate(&self, loading: bool) -> bool {
        self.policy == FetchPolicy::Manual && !loading && self.filters.is_range_valid()
    }

    /// Arm a manual panel. Returns whether it was armed.
    pub fn generate(&mut self) -> bool {
        if self.policy == FetchPolicy::Manual && self.filters.is_range_valid() {
            self.armed = true;
        }
        self.armed
    }

    /// Parameters the panel should currently fetch with, or `None` for idle.
    pub fn bundle(&self) -> Option<ParamBundle> {
        match self.policy {
            FetchPolicy::Auto => Some(ParamBundle::from(&self.filters)),
            FetchPolicy::Manual if self.armed => Some(ParamBundle::from(&self.filters)),
            FetchPolicy::Manual => None,
        }
    }

    /// Panel heading, e.g. `Word Cloud - Affected Resolved (A) (2020-2023)`.
    pub fn title(&self, endpoint: Endpoint) -> String {
        let range = self.filters.year_range_label();
        if endpoint == Endpoint::WordCloud {
            format!("{} - {} ({})", endpoint.title(), self.filters.column_type.label(), range)
        } else {
            format!("{} ({})", endpoint.title(), range)
        }
    }
}
