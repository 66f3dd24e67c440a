use std::collections::BTreeMap;

use super::filter::SiteSelection;
use super::model::{LaunchDataset, Outcome};

// ---------------------------------------------------------------------------
// Pie chart description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
}

/// What the success pie should show. Rendering lives in `ui::charts`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    /// Sum of all slice values.
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// Build the success pie for the current site selection.
///
/// * `All` → one slice per launch site, sized by its number of launches.
/// * `Site(s)` → `Failure` / `Success` counts for `s`; outcomes with no
///   launches are omitted, so a single-outcome site gives a single slice and
///   an unknown site gives no slices.
pub fn success_pie(dataset: &LaunchDataset, site: &SiteSelection) -> PieChart {
    match site {
        SiteSelection::All => {
            let mut per_site: BTreeMap<&str, usize> = BTreeMap::new();
            for rec in dataset.records() {
                *per_site.entry(rec.launch_site.as_str()).or_default() += 1;
            }
            PieChart {
                title: "All Launch Site Successes".to_string(),
                slices: per_site
                    .into_iter()
                    .map(|(label, value)| PieSlice {
                        label: label.to_string(),
                        value,
                    })
                    .collect(),
            }
        }
        SiteSelection::Site(name) => {
            let mut per_outcome: BTreeMap<Outcome, usize> = BTreeMap::new();
            for rec in dataset.records().iter().filter(|r| r.launch_site == *name) {
                *per_outcome.entry(rec.outcome).or_default() += 1;
            }
            PieChart {
                title: format!("{name} Launch Site Success / Failure Rate"),
                slices: per_outcome
                    .into_iter()
                    .map(|(outcome, value)| PieSlice {
                        label: outcome.tag().to_string(),
                        value,
                    })
                    .collect(),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Per-site summary table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SiteSummary {
    pub site: String,
    pub launches: usize,
    pub successes: usize,
}

impl SiteSummary {
    /// Fraction of launches that succeeded, in `[0, 1]`.
    pub fn success_rate(&self) -> f64 {
        if self.launches == 0 {
            0.0
        } else {
            self.successes as f64 / self.launches as f64
        }
    }
}

/// Launch and success counts for every site, ordered by site name.
pub fn site_summaries(dataset: &LaunchDataset) -> Vec<SiteSummary> {
    let mut by_site: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for rec in dataset.records() {
        let entry = by_site.entry(rec.launch_site.as_str()).or_default();
        entry.0 += 1;
        if rec.outcome.is_success() {
            entry.1 += 1;
        }
    }
    by_site
        .into_iter()
        .map(|(site, (launches, successes))| SiteSummary {
            site: site.to_string(),
            launches,
            successes,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::sample_dataset;

    fn site(s: &str) -> SiteSelection {
        SiteSelection::Site(s.to_string())
    }

    #[test]
    fn test_all_sites_counts_every_launch() {
        let ds = sample_dataset();
        let pie = success_pie(&ds, &SiteSelection::All);
        assert_eq!(pie.title, "All Launch Site Successes");
        assert_eq!(pie.total(), ds.len());
        let labels: Vec<_> = pie.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"]
        );
        let values: Vec<_> = pie.slices.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![4, 2, 4, 2]);
    }

    #[test]
    fn test_single_site_splits_by_outcome() {
        let ds = sample_dataset();
        let pie = success_pie(&ds, &site("KSC LC-39A"));
        assert_eq!(pie.title, "KSC LC-39A Launch Site Success / Failure Rate");
        assert_eq!(
            pie.slices,
            vec![
                PieSlice { label: "Failure".into(), value: 1 },
                PieSlice { label: "Success".into(), value: 3 },
            ]
        );
    }

    #[test]
    fn test_site_sum_matches_site_record_count() {
        let ds = sample_dataset();
        for name in ds.sites() {
            let expected = ds.records().iter().filter(|r| r.launch_site == *name).count();
            assert_eq!(success_pie(&ds, &site(name)).total(), expected, "{name}");
        }
    }

    #[test]
    fn test_single_outcome_site_gives_one_slice() {
        let ds = sample_dataset();
        let pie = success_pie(&ds, &site("CCAFS SLC-40"));
        assert_eq!(pie.slices, vec![PieSlice { label: "Success".into(), value: 2 }]);
    }

    #[test]
    fn test_unknown_site_gives_empty_pie() {
        let ds = sample_dataset();
        let pie = success_pie(&ds, &site("Boca Chica"));
        assert!(pie.slices.is_empty());
        assert_eq!(pie.total(), 0);
    }

    #[test]
    fn test_site_summaries() {
        let ds = sample_dataset();
        let summaries = site_summaries(&ds);
        assert_eq!(summaries.len(), 4);
        let lc40 = &summaries[0];
        assert_eq!(lc40.site, "CCAFS LC-40");
        assert_eq!((lc40.launches, lc40.successes), (4, 2));
        assert!((lc40.success_rate() - 0.5).abs() < 1e-12);
        assert!((summaries[1].success_rate() - 1.0).abs() < 1e-12);
    }
}
