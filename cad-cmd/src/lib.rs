//! Command implementations for the case analytics CLI.
//!
//! Fetches the same artifacts as the dashboard panels: images are written
//! to disk, the cases-per-state list is printed as a ranked table.

use cad_core::config::DashboardConfig;
use cad_core::filters::{parse_year, ColumnType, FilterState, TableType};
use cad_core::Endpoint;
use clap::{Args, Subcommand};
use std::path::PathBuf;

pub mod fetch;
pub mod options;

#[derive(Subcommand)]
pub enum Command {
    /// Fetch one panel: an image to a file, or the ranked cases table
    Fetch {
        /// Panel slug, e.g. `india-map` or `cases-per-state`
        panel: Endpoint,

        #[command(flatten)]
        filters: FilterArgs,

        /// Output path for image panels (default: `<panel>.<ext>`)
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,

        /// Analytics service base URL (overrides CAD_API_BASE_URL)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Fetch all six panels into a directory; failures don't stop the rest
    Snapshot {
        /// Directory to write into (created if missing)
        #[arg(short = 'd', long, default_value = "snapshot")]
        out_dir: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// Analytics service base URL (overrides CAD_API_BASE_URL)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Print the years, states, table types and columns the panels accept
    Options,
}

/// Filter flags shared by `fetch` and `snapshot`.
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    #[arg(long, default_value = "2020", value_parser = parse_year)]
    pub start_year: u16,

    #[arg(long, default_value = "2023", value_parser = parse_year)]
    pub end_year: u16,

    /// `by` or `against`
    #[arg(long, default_value = "by")]
    pub table: TableType,

    /// `a_aff_resolved` or `c_aff_resolved`
    #[arg(long, default_value = "a_aff_resolved")]
    pub column: ColumnType,

    #[arg(long, default_value = "Bihar")]
    pub state: String,
}

impl FilterArgs {
    /// Apply the flags the way the dashboard would, including the end year
    /// correction.
    pub fn to_filters(&self) -> FilterState {
        let mut filters = FilterState::default();
        filters.set_start_year(self.start_year);
        filters.set_end_year(self.end_year);
        filters.set_table_type(self.table);
        filters.set_column_type(self.column);
        filters.set_state(self.state.clone());

        if filters.start_year != self.start_year || filters.end_year != self.end_year {
            log::warn!(
                "Year range {}-{} adjusted to {}",
                self.start_year,
                self.end_year,
                filters.year_range_label()
            );
        }
        filters
    }
}

fn config_for(base_url: Option<String>) -> DashboardConfig {
    let config = DashboardConfig::from_env();
    match base_url {
        Some(url) => config.with_base_url(url),
        None => config,
    }
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Fetch {
            panel,
            filters,
            out,
            base_url,
        } => {
            let config = config_for(base_url);
            fetch::run_fetch(&config, panel, &filters.to_filters(), out).await
        }
        Command::Snapshot {
            out_dir,
            filters,
            base_url,
        } => {
            let config = config_for(base_url);
            fetch::run_snapshot(&config, &filters.to_filters(), &out_dir).await
        }
        Command::Options => {
            print!("{}", options::render_options());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(start_year: u16, end_year: u16) -> FilterArgs {
        FilterArgs {
            start_year,
            end_year,
            table: TableType::Against,
            column: ColumnType::CAffResolved,
            state: "Kerala".to_string(),
        }
    }

    #[test]
    fn test_filter_args_apply_correction() {
        let filters = args(2010, 2005).to_filters();
        assert_eq!(filters.start_year, 2010);
        assert_eq!(filters.end_year, 2011);
        assert_eq!(filters.table_type, TableType::Against);
        assert_eq!(filters.column_type, ColumnType::CAffResolved);
        assert_eq!(filters.state, "Kerala");
    }

    #[test]
    fn test_filter_args_keep_valid_range() {
        let filters = args(1995, 2000).to_filters();
        assert_eq!(filters.year_range_label(), "1995-2000");
    }
}
