use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::{ProductDataset, ProductRecord};

/// Listing dates are stored as `yyyy-mm-dd` text.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// The active predicates narrowing the displayed dataset.
///
/// Every criterion is optional: `None`, an empty set or an empty string
/// means "match all". Active criteria are ANDed together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Exact brand match.
    pub brand: Option<String>,
    /// Selected platforms (`source` column); a record passes if its
    /// platform is any of them.
    pub platforms: BTreeSet<String>,
    /// Substring the record's PIN code must contain.
    pub pin_code: String,
    /// Exact listing date.
    pub date: Option<NaiveDate>,
}

impl FilterCriteria {
    /// Whether any predicate is set.
    pub fn is_active(&self) -> bool {
        self.brand.is_some()
            || !self.platforms.is_empty()
            || !self.pin_code.is_empty()
            || self.date.is_some()
    }

    /// Reset every predicate to "match all".
    pub fn clear(&mut self) {
        *self = FilterCriteria::default();
    }

    /// Add `platform` to the selection, or remove it if already selected.
    pub fn toggle_platform(&mut self, platform: &str) {
        if !self.platforms.remove(platform) {
            self.platforms.insert(platform.to_string());
        }
    }

    /// Test one record against all active predicates.
    pub fn matches(&self, record: &ProductRecord) -> bool {
        let brand_match = self
            .brand
            .as_deref()
            .map_or(true, |brand| record.brand == brand);
        let platform_match =
            self.platforms.is_empty() || self.platforms.contains(&record.source);
        let pin_match = self.pin_code.is_empty() || record.pin_code.contains(&self.pin_code);
        let date_match = self
            .date
            .map_or(true, |d| record.date == d.format(DATE_FORMAT).to_string());

        brand_match && platform_match && pin_match && date_match
    }

    /// Labels for the active-filter chips, in display order.
    pub fn describe(&self) -> Vec<FilterChip> {
        let mut chips = Vec::new();
        if let Some(brand) = &self.brand {
            chips.push(FilterChip::Brand(format!("Brand: {brand}")));
        }
        for platform in &self.platforms {
            chips.push(FilterChip::Platform(platform.clone()));
        }
        if !self.pin_code.is_empty() {
            chips.push(FilterChip::PinCode(format!("PIN: {}", self.pin_code)));
        }
        if let Some(d) = self.date {
            chips.push(FilterChip::Date(format!("Date: {}", d.format("%b %d, %Y"))));
        }
        chips
    }

    /// Drop the predicate a chip stands for.
    pub fn remove(&mut self, chip: &FilterChip) {
        match chip {
            FilterChip::Brand(_) => self.brand = None,
            FilterChip::Platform(p) => {
                self.platforms.remove(p);
            }
            FilterChip::PinCode(_) => self.pin_code.clear(),
            FilterChip::Date(_) => self.date = None,
        }
    }
}

/// One removable badge in the active-filter strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChip {
    Brand(String),
    Platform(String),
    PinCode(String),
    Date(String),
}

impl FilterChip {
    pub fn label(&self) -> &str {
        match self {
            FilterChip::Brand(s)
            | FilterChip::Platform(s)
            | FilterChip::PinCode(s)
            | FilterChip::Date(s) => s,
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of records that pass all active criteria, in file order.
pub fn filtered_indices(dataset: &ProductDataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| criteria.matches(rec))
        .map(|(i, _)| i)
        .collect()
}
