use std::fmt;

use super::model::{LaunchDataset, LaunchRecord};

/// Dropdown value meaning "no site restriction".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Site selection
// ---------------------------------------------------------------------------

/// Which launch site the dropdown currently selects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Interpret a dropdown value; `"ALL"` means every site.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// The dropdown value this selection corresponds to.
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES,
            SiteSelection::Site(s) => s,
        }
    }

    /// Whether `record` was launched from the selected site.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => record.launch_site == *s,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Inclusive payload mass window in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub lo: f64,
    pub hi: f64,
}

impl PayloadRange {
    pub fn new(lo: f64, hi: f64) -> Self {
        PayloadRange { lo, hi }
    }

    /// The observed payload span of `dataset`, or `fallback` if it is empty.
    pub fn observed(dataset: &LaunchDataset, fallback: PayloadRange) -> Self {
        dataset
            .payload_bounds()
            .map(|(lo, hi)| PayloadRange { lo, hi })
            .unwrap_or(fallback)
    }

    /// `lo <= mass <= hi`. An inverted range contains nothing.
    pub fn contains(&self, mass: f64) -> bool {
        self.lo <= mass && mass <= self.hi
    }
}

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// Current value of both input controls.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

impl FilterState {
    /// All sites, payload window spanning the whole dataset.
    pub fn initial(dataset: &LaunchDataset, fallback: PayloadRange) -> Self {
        FilterState {
            site: SiteSelection::All,
            payload: PayloadRange::observed(dataset, fallback),
        }
    }

    pub fn accepts(&self, record: &LaunchRecord) -> bool {
        self.payload.contains(record.payload_mass_kg) && self.site.matches(record)
    }
}

/// Records that pass both the payload window and the site selection, in
/// dataset order. Records are borrowed, never copied or altered.
pub fn filtered_records<'a>(
    dataset: &'a LaunchDataset,
    filters: &'a FilterState,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    dataset.records().iter().filter(move |rec| filters.accepts(rec))
}

/// Indices of records passing the current filters (used by the record table).
pub fn filtered_indices(dataset: &LaunchDataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| filters.accepts(rec))
        .map(|(i, _)| i)
        .collect()
}
