use chrono::NaiveDate;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::export::export_csv;
use crate::data::fetch::{DataSource, LoadResult};
use crate::data::filter::{filtered_indices, FilterChip, FilterCriteria};
use crate::data::model::{ProductDataset, ProductRecord};

/// Message shown in place of the dashboard when loading fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load data";

// ---------------------------------------------------------------------------
// Load lifecycle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// A worker is fetching and parsing.
    Loading,
    /// The last load succeeded.
    Ready,
    /// The last load failed; the dashboard is not rendered.
    Failed(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    pub load_status: LoadStatus,

    /// Loaded dataset (None until the first successful load).
    pub dataset: Option<ProductDataset>,

    /// Where `dataset` came from.
    pub source: Option<DataSource>,

    /// Rows dropped by the parser during the last load.
    pub skipped_rows: usize,

    pub filters: FilterCriteria,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Badge colour per platform.
    pub color_map: ColorMap,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            load_status: LoadStatus::Loading,
            dataset: None,
            source: None,
            skipped_rows: 0,
            filters: FilterCriteria::default(),
            visible_indices: Vec::new(),
            color_map: ColorMap::default(),
            status_message: None,
        }
    }

    /// Mark a load as in flight.
    pub fn begin_load(&mut self) {
        self.load_status = LoadStatus::Loading;
        self.status_message = None;
    }

    /// Apply the outcome of a worker load.
    pub fn finish_load(&mut self, result: LoadResult) {
        match result {
            Ok(loaded) => {
                self.skipped_rows = loaded.skipped_rows;
                self.status_message = (loaded.skipped_rows > 0)
                    .then(|| format!("{} malformed row(s) skipped", loaded.skipped_rows));
                self.source = Some(loaded.source);
                self.set_dataset(loaded.dataset);
            }
            Err(e) => {
                log::error!("Error fetching data: {:#}", anyhow::Error::new(e));
                self.fail_load();
            }
        }
    }

    /// Stop rendering the dashboard and show the generic failure message.
    pub fn fail_load(&mut self) {
        self.load_status = LoadStatus::Failed(LOAD_FAILED_MESSAGE.to_string());
    }

    /// Ingest a newly loaded dataset and reset filters.
    pub fn set_dataset(&mut self, dataset: ProductDataset) {
        self.filters.clear();
        self.visible_indices = (0..dataset.len()).collect();
        self.color_map = ColorMap::new(&dataset.unique_platforms);
        self.dataset = Some(dataset);
        self.load_status = LoadStatus::Ready;
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.filters);
        }
    }

    pub fn set_brand(&mut self, brand: Option<String>) {
        self.filters.brand = brand;
        self.refilter();
    }

    pub fn toggle_platform(&mut self, platform: &str) {
        self.filters.toggle_platform(platform);
        self.refilter();
    }

    pub fn set_pin_code(&mut self, pin_code: &str) {
        self.filters.pin_code = pin_code.to_string();
        self.refilter();
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.filters.date = date;
        self.refilter();
    }

    pub fn remove_filter(&mut self, chip: &FilterChip) {
        self.filters.remove(chip);
        self.refilter();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.refilter();
    }

    /// Total number of loaded records.
    pub fn total_count(&self) -> usize {
        self.dataset.as_ref().map_or(0, ProductDataset::len)
    }

    /// Records passing the filters, in file order.
    pub fn visible_records(&self) -> impl Iterator<Item = &ProductRecord> + '_ {
        let records = self.dataset.as_ref().map(|ds| &ds.records);
        self.visible_indices
            .iter()
            .filter_map(move |&i| records.and_then(|r| r.get(i)))
    }

    /// The rows the table renders: the visible records up to the row limit.
    pub fn table_rows(&self) -> Vec<&ProductRecord> {
        self.visible_records()
            .take(self.config.table_row_limit)
            .collect()
    }

    /// Whether the table is hiding visible records beyond the row limit.
    pub fn is_truncated(&self) -> bool {
        self.visible_indices.len() > self.config.table_row_limit
    }

    /// `Showing X of Y results`.
    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} results",
            self.visible_indices.len(),
            self.total_count()
        )
    }

    /// CSV text of everything currently visible (not just the table rows).
    pub fn export_visible(&self) -> String {
        export_csv(self.visible_records())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::data::fetch::{LoadError, LoadedData};

    fn listing(id: f64, brand: &str, source: &str) -> ProductRecord {
        ProductRecord {
            product_id: id,
            product_name: format!("Item {id}"),
            brand: brand.to_string(),
            source: source.to_string(),
            ..Default::default()
        }
    }

    fn loaded(records: Vec<ProductRecord>, skipped_rows: usize) -> LoadResult {
        Ok(LoadedData {
            source: DataSource::File(PathBuf::from("listings.csv")),
            dataset: ProductDataset::from_records(records),
            skipped_rows,
        })
    }

    fn ready_state(n: usize) -> AppState {
        let mut state = AppState::new(DashboardConfig::default());
        let records = (0..n)
            .map(|i| {
                let source = if i % 2 == 0 { "zepto" } else { "blinkit" };
                listing(i as f64, "Amul", source)
            })
            .collect();
        state.finish_load(loaded(records, 0));
        state
    }

    #[test]
    fn successful_load_shows_everything() {
        let state = ready_state(4);
        assert_eq!(state.load_status, LoadStatus::Ready);
        assert_eq!(state.visible_indices, vec![0, 1, 2, 3]);
        assert_eq!(state.summary(), "Showing 4 of 4 results");
        assert!(state.status_message.is_none());
    }

    #[test]
    fn skipped_rows_are_surfaced() {
        let mut state = AppState::new(DashboardConfig::default());
        state.finish_load(loaded(vec![listing(1.0, "Amul", "zepto")], 3));

        assert_eq!(state.skipped_rows, 3);
        assert_eq!(
            state.status_message.as_deref(),
            Some("3 malformed row(s) skipped")
        );
    }

    #[test]
    fn failed_load_keeps_generic_message() {
        let mut state = AppState::new(DashboardConfig::default());
        state.finish_load(Err(LoadError::Status {
            url: "https://example.invalid/data.csv".into(),
            status: 404,
        }));

        assert_eq!(
            state.load_status,
            LoadStatus::Failed(LOAD_FAILED_MESSAGE.to_string())
        );
        assert!(state.dataset.is_none());
    }

    #[test]
    fn filter_changes_update_visible_rows() {
        let mut state = ready_state(4);

        state.toggle_platform("blinkit");
        assert_eq!(state.visible_indices, vec![1, 3]);

        state.set_brand(Some("Tata".into()));
        assert!(state.visible_indices.is_empty());
        assert_eq!(
            state.export_visible(),
            "Product Name,PIN Code,Platform,Price,MRP,Discount %,Position,Rating,Date"
        );

        state.clear_filters();
        assert_eq!(state.visible_indices.len(), 4);
    }

    #[test]
    fn table_is_capped_but_export_is_not() {
        let state = ready_state(150);

        assert_eq!(state.table_rows().len(), 100);
        assert!(state.is_truncated());
        assert_eq!(state.export_visible().lines().count(), 151);
    }

    #[test]
    fn reload_resets_filters() {
        let mut state = ready_state(4);
        state.set_pin_code("560");
        assert!(state.filters.is_active());

        state.begin_load();
        assert_eq!(state.load_status, LoadStatus::Loading);
        state.finish_load(loaded(vec![listing(9.0, "Tata", "zepto")], 0));

        assert!(!state.filters.is_active());
        assert_eq!(state.visible_indices, vec![0]);
    }
}
