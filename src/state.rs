use std::path::{Path, PathBuf};

use crate::data::aggregate::AggregateRecord;
use crate::data::charts::{columns, summary_table, ChartSet};
use crate::data::loader::load_file;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// View selection
// ---------------------------------------------------------------------------

/// What the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Charts,
    Table,
}

/// Grouping column of the table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableGroup {
    Country,
    Industry,
    Tool,
}

impl TableGroup {
    pub const ALL: [TableGroup; 3] = [TableGroup::Country, TableGroup::Industry, TableGroup::Tool];

    pub fn column(self) -> &'static str {
        match self {
            TableGroup::Country => columns::COUNTRY,
            TableGroup::Industry => columns::INDUSTRY,
            TableGroup::Tool => columns::TOP_TOOL,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TableGroup::Country => "Country",
            TableGroup::Industry => "Industry",
            TableGroup::Tool => "Tool",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file loads).
    pub dataset: Option<Dataset>,

    /// Chart data derived from `dataset` (cached per load).
    pub charts: Option<ChartSet>,

    /// File the dataset came from.
    pub source_path: Option<PathBuf>,

    pub view: View,

    pub table_group: TableGroup,

    /// Aggregates for the table view (cached per load and grouping).
    pub table: Vec<AggregateRecord>,

    /// Plot height for every chart.
    pub chart_height: f32,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            charts: None,
            source_path: None,
            view: View::Charts,
            table_group: TableGroup::Country,
            table: Vec::new(),
            chart_height: 320.0,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and derive every chart from it.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.charts = Some(ChartSet::from_dataset(&dataset));
        self.table = summary_table(&dataset.rows, self.table_group.column());
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Load `path`. On failure the previous dataset stays and the error is
    /// reported in the status line.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                self.set_dataset(dataset);
                self.source_path = Some(path.to_path_buf());
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Re-read the current source file.
    pub fn reload(&mut self) {
        if let Some(path) = self.source_path.clone() {
            self.load_path(&path);
        }
    }

    /// Switch the table grouping and recompute its aggregates.
    pub fn set_table_group(&mut self, group: TableGroup) {
        self.table_group = group;
        if let Some(ds) = &self.dataset {
            self.table = summary_table(&ds.rows, group.column());
        }
    }
}
