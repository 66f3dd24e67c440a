use std::path::Path;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::aggregate::{site_summaries, success_pie, PieChart, SiteSummary};
use crate::data::correlate::{payload_scatter, ScatterChart};
use crate::data::filter::{filtered_indices, FilterState, PayloadRange, SiteSelection};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Reactive wiring: which outputs depend on which inputs
// ---------------------------------------------------------------------------

/// Input controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPort {
    SiteDropdown,
    PayloadSlider,
}

/// Chart outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputPort {
    SuccessPie,
    PayloadScatter,
}

/// Each output and the inputs it is computed from.
const BINDINGS: [(OutputPort, &[InputPort]); 2] = [
    (OutputPort::SuccessPie, &[InputPort::SiteDropdown]),
    (
        OutputPort::PayloadScatter,
        &[InputPort::SiteDropdown, InputPort::PayloadSlider],
    ),
];

/// Outputs that must be recomputed when `input` changes.
pub fn outputs_for(input: InputPort) -> Vec<OutputPort> {
    BINDINGS
        .iter()
        .filter(|(_, inputs)| inputs.contains(&input))
        .map(|(output, _)| *output)
        .collect()
}

/// A new value for one input control.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    Site(SiteSelection),
    Payload(PayloadRange),
}

impl FilterChange {
    pub fn port(&self) -> InputPort {
        match self {
            FilterChange::Site(_) => InputPort::SiteDropdown,
            FilterChange::Payload(_) => InputPort::PayloadSlider,
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<LaunchDataset>,

    /// Current dropdown and slider values.
    pub filters: FilterState,

    /// Latest output of each chart.
    pub pie: PieChart,
    pub scatter: ScatterChart,

    /// Indices of records inside the scatter scope (cached for the table).
    pub visible_indices: Vec<usize>,

    pub site_summaries: Vec<SiteSummary>,

    /// Colours for booster categories, shared by the scatter and the table.
    pub booster_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    pub show_table: bool,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let filters = FilterState {
            site: SiteSelection::All,
            payload: config.payload_slider.full_range(),
        };
        Self {
            config,
            dataset: None,
            filters,
            pie: PieChart::default(),
            scatter: ScatterChart::default(),
            visible_indices: Vec::new(),
            site_summaries: Vec::new(),
            booster_colors: ColorMap::default(),
            status_message: None,
            show_table: false,
        }
    }

    /// Ingest a newly loaded dataset, reset filters and recompute every chart.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.filters = FilterState::initial(&dataset, self.config.payload_slider.full_range());
        self.booster_colors = ColorMap::new(dataset.booster_categories().iter().cloned());
        self.site_summaries = site_summaries(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;

        self.recompute(OutputPort::SuccessPie);
        self.recompute(OutputPort::PayloadScatter);
    }

    /// Load a file and make it the current dataset. Failures are reported in
    /// the status bar and leave the current dataset in place.
    pub fn load_path(&mut self, path: &Path) {
        match crate::data::loader::load_file(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Apply a control change and recompute the outputs bound to that
    /// control. Returns the outputs that were recomputed; a change to the
    /// current value recomputes nothing.
    pub fn apply(&mut self, change: FilterChange) -> Vec<OutputPort> {
        let port = change.port();
        let changed = match change {
            FilterChange::Site(site) => {
                let changed = self.filters.site != site;
                self.filters.site = site;
                changed
            }
            FilterChange::Payload(range) => {
                let changed = self.filters.payload != range;
                self.filters.payload = range;
                changed
            }
        };
        if !changed {
            return Vec::new();
        }

        let outputs = outputs_for(port);
        for &output in &outputs {
            self.recompute(output);
        }
        outputs
    }

    fn recompute(&mut self, output: OutputPort) {
        let Some(ds) = &self.dataset else {
            return;
        };
        match output {
            OutputPort::SuccessPie => {
                self.pie = success_pie(ds, &self.filters.site);
                log::debug!("pie: {} slices for {}", self.pie.slices.len(), self.filters.site);
            }
            OutputPort::PayloadScatter => {
                self.scatter = payload_scatter(ds, &self.filters);
                self.visible_indices = filtered_indices(ds, &self.filters);
                log::debug!(
                    "scatter: {} points for {} in [{}, {}] kg",
                    self.scatter.point_count(),
                    self.filters.site,
                    self.filters.payload.lo,
                    self.filters.payload.hi
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::sample_dataset;

    fn loaded_state() -> AppState {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(sample_dataset());
        state
    }

    #[test]
    fn test_bindings() {
        assert_eq!(
            outputs_for(InputPort::SiteDropdown),
            vec![OutputPort::SuccessPie, OutputPort::PayloadScatter]
        );
        assert_eq!(
            outputs_for(InputPort::PayloadSlider),
            vec![OutputPort::PayloadScatter]
        );
    }

    #[test]
    fn test_empty_state_has_no_charts() {
        let mut state = AppState::new(DashboardConfig::default());
        assert_eq!(state.filters.payload, PayloadRange::new(0.0, 10000.0));
        state.apply(FilterChange::Site(SiteSelection::Site("KSC LC-39A".into())));
        assert!(state.pie.slices.is_empty());
        assert_eq!(state.scatter.point_count(), 0);
    }

    #[test]
    fn test_set_dataset_computes_initial_charts() {
        let state = loaded_state();
        assert_eq!(state.filters.payload, PayloadRange::new(0.0, 9600.0));
        assert_eq!(state.pie.total(), 12);
        assert_eq!(state.scatter.point_count(), 12);
        assert_eq!(state.visible_indices.len(), 12);
        assert_eq!(state.site_summaries.len(), 4);
    }

    #[test]
    fn test_site_change_updates_both_charts() {
        let mut state = loaded_state();
        let outputs = state.apply(FilterChange::Site(SiteSelection::Site("VAFB SLC-4E".into())));
        assert_eq!(outputs.len(), 2);
        assert_eq!(state.pie.total(), 2);
        assert_eq!(state.scatter.point_count(), 2);
        assert_eq!(state.visible_indices, vec![3, 5]);
    }

    #[test]
    fn test_payload_change_leaves_pie_alone() {
        let mut state = loaded_state();
        let pie_before = state.pie.clone();
        let outputs = state.apply(FilterChange::Payload(PayloadRange::new(2000.0, 5000.0)));
        assert_eq!(outputs, vec![OutputPort::PayloadScatter]);
        assert_eq!(state.pie, pie_before);
        assert_eq!(state.scatter.point_count(), 5);
    }

    #[test]
    fn test_unchanged_value_recomputes_nothing() {
        let mut state = loaded_state();
        let current = state.filters.payload;
        assert!(state.apply(FilterChange::Payload(current)).is_empty());
        assert!(state.apply(FilterChange::Site(SiteSelection::All)).is_empty());
    }

    #[test]
    fn test_failed_load_keeps_dataset() {
        let mut state = loaded_state();
        state.load_path(Path::new("does/not/exist.csv"));
        assert!(state.status_message.is_some());
        assert_eq!(state.dataset.as_ref().map(LaunchDataset::len), Some(12));
    }

    #[test]
    fn test_malformed_file_reports_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launches.csv");
        std::fs::write(&path, "Flight Number,Launch Site,class\n1,KSC LC-39A,1\n").unwrap();

        let mut state = loaded_state();
        state.load_path(&path);
        let msg = state.status_message.as_deref().unwrap_or_default();
        assert!(msg.contains("missing column 'Payload Mass (kg)'"), "{msg}");
        assert_eq!(state.dataset.as_ref().map(LaunchDataset::len), Some(12));
        assert_eq!(state.pie.total(), 12);
    }
}
