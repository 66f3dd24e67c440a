use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Mission outcome as encoded by the `class` column (1 = success, 0 = failure).
///
/// Variant order matches the numeric class, so sorting puts `Failure` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Decode a raw class value. Only exact 0 and 1 are accepted.
    pub fn from_class(class: f64) -> Option<Self> {
        if class == 1.0 {
            Some(Outcome::Success)
        } else if class == 0.0 {
            Some(Outcome::Failure)
        } else {
            None
        }
    }

    /// Numeric class, used as the scatter y coordinate.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Success => 1,
            Outcome::Failure => 0,
        }
    }

    /// Label used for pie slices.
    pub fn tag(self) -> &'static str {
        match self {
            Outcome::Success => "Success",
            Outcome::Failure => "Failure",
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the launch table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub flight_number: i64,
    pub launch_site: String,
    /// Payload mass in kilograms.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed column summaries.
///
/// Never mutated after construction; the query functions only borrow it.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    sites: BTreeSet<String>,
    booster_categories: BTreeSet<String>,
    payload_bounds: Option<(f64, f64)>,
}

impl LaunchDataset {
    /// Build the column summaries from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites = BTreeSet::new();
        let mut booster_categories = BTreeSet::new();
        let mut payload_bounds: Option<(f64, f64)> = None;

        for rec in &records {
            sites.insert(rec.launch_site.clone());
            booster_categories.insert(rec.booster_version_category.clone());
            let m = rec.payload_mass_kg;
            payload_bounds = Some(match payload_bounds {
                Some((lo, hi)) => (lo.min(m), hi.max(m)),
                None => (m, m),
            });
        }

        LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_bounds,
        }
    }

    /// All records in file order.
    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Distinct launch sites, sorted.
    pub fn sites(&self) -> &BTreeSet<String> {
        &self.sites
    }

    /// Distinct booster version categories, sorted.
    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    /// Observed (min, max) payload mass; `None` for an empty dataset.
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        self.payload_bounds
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    fn rec(flight: i64, site: &str, payload: f64, class: u8, booster: &str) -> LaunchRecord {
        LaunchRecord {
            flight_number: flight,
            launch_site: site.to_string(),
            payload_mass_kg: payload,
            outcome: if class == 1 {
                Outcome::Success
            } else {
                Outcome::Failure
            },
            booster_version_category: booster.to_string(),
        }
    }

    /// Twelve launches over four sites. `CCAFS SLC-40` only has successes.
    pub(crate) fn sample_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            rec(1, "CCAFS LC-40", 0.0, 0, "v1.0"),
            rec(2, "CCAFS LC-40", 525.0, 0, "v1.0"),
            rec(3, "CCAFS LC-40", 677.0, 1, "v1.0"),
            rec(4, "VAFB SLC-4E", 500.0, 0, "v1.1"),
            rec(5, "CCAFS LC-40", 3170.0, 1, "v1.1"),
            rec(6, "VAFB SLC-4E", 9600.0, 1, "FT"),
            rec(7, "KSC LC-39A", 2490.0, 1, "FT"),
            rec(8, "KSC LC-39A", 5300.0, 0, "FT"),
            rec(9, "CCAFS SLC-40", 4200.0, 1, "FT"),
            rec(10, "KSC LC-39A", 6070.0, 1, "B4"),
            rec(11, "CCAFS SLC-40", 2205.0, 1, "B4"),
            rec(12, "KSC LC-39A", 3600.0, 1, "B5"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::sample_dataset;
    use super::*;

    #[test]
    fn test_outcome_from_class() {
        assert_eq!(Outcome::from_class(1.0), Some(Outcome::Success));
        assert_eq!(Outcome::from_class(0.0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_class(0.5), None);
        assert_eq!(Outcome::from_class(2.0), None);
        assert!(Outcome::Failure < Outcome::Success);
    }

    #[test]
    fn test_dataset_summaries() {
        let ds = sample_dataset();
        assert_eq!(ds.len(), 12);
        assert_eq!(
            ds.sites().iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"]
        );
        assert_eq!(ds.booster_categories().len(), 5);
        assert_eq!(ds.payload_bounds(), Some((0.0, 9600.0)));
    }

    #[test]
    fn test_empty_dataset_has_no_bounds() {
        let ds = LaunchDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.payload_bounds(), None);
        assert!(ds.sites().is_empty());
    }
}
