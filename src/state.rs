use std::sync::Arc;

use soy_pdi::config::DataArgs;
use soy_pdi::data::filter::HistoryTable;
use soy_pdi::severity::{estimate_all, SeverityReport, WeatherInputs};
use soy_pdi::{DataStore, Dataset};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Where the current dataset came from.
    pub source: DataArgs,

    /// Loader for `source`; reopening the same file reuses its cache.
    store: Option<DataStore>,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<Dataset>>,

    /// Variety column chosen in the dropdown.
    pub selected_variety: Option<String>,

    /// Slider values.
    pub inputs: WeatherInputs,

    /// Estimates for `inputs` (cached).
    pub report: SeverityReport,

    /// Historical rows for the selected variety (cached).
    pub history: HistoryTable,

    /// Mean PDI per SMW for the selected variety (cached).
    pub weekly: Vec<(i64, f64)>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(source: DataArgs) -> Self {
        let inputs = WeatherInputs::default();
        Self {
            source,
            store: None,
            dataset: None,
            selected_variety: None,
            inputs,
            report: estimate_all(inputs),
            history: HistoryTable::default(),
            weekly: Vec::new(),
            status_message: None,
        }
    }

    /// Load `source` and make it the active dataset. On failure the previous
    /// dataset and store stay and the error is shown in the status line.
    pub fn open(&mut self, source: DataArgs) {
        let same_file = self
            .store
            .as_ref()
            .is_some_and(|s| s.path() == source.data.as_path());
        let store = match self.store.take() {
            Some(store) if same_file => store,
            previous => {
                self.store = previous;
                source.store()
            }
        };

        match source.load(&store) {
            Ok(dataset) => {
                self.store = Some(store);
                self.source = source;
                self.set_dataset(dataset);
            }
            Err(e) => {
                if same_file {
                    self.store = Some(store);
                }
                log::error!("Failed to load {}: {e}", source.data.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and select its first variety.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        let keep = self
            .selected_variety
            .take()
            .filter(|v| dataset.variety_index(v).is_ok());
        self.selected_variety = keep.or_else(|| {
            dataset
                .list_varieties()
                .first()
                .map(|v| v.column_name().to_string())
        });
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refresh_history();
    }

    /// Switch the variety and rebuild the table and chart data.
    pub fn select_variety(&mut self, variety: String) {
        self.selected_variety = Some(variety);
        self.refresh_history();
    }

    /// Recompute the cached estimates after a slider change.
    pub fn set_inputs(&mut self, inputs: WeatherInputs) {
        self.inputs = inputs;
        self.report = estimate_all(inputs);
    }

    fn refresh_history(&mut self) {
        self.history = HistoryTable::default();
        self.weekly.clear();
        let (Some(ds), Some(variety)) = (&self.dataset, &self.selected_variety) else {
            return;
        };
        match ds.variety_history(variety) {
            Ok(views) => {
                self.history = views.table;
                self.weekly = views.weekly;
            }
            Err(e) => {
                log::warn!("{e}");
                self.status_message = Some(e.to_string());
            }
        }
    }
}
