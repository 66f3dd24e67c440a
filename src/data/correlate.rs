use std::collections::BTreeMap;

use super::filter::{filtered_records, FilterState, SiteSelection};
use super::model::{LaunchDataset, Outcome};

// ---------------------------------------------------------------------------
// Scatter chart description
// ---------------------------------------------------------------------------

/// One launch placed on the payload / outcome plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub flight_number: i64,
}

impl ScatterPoint {
    pub fn as_xy(&self) -> [f64; 2] {
        [self.payload_mass_kg, f64::from(self.outcome.class())]
    }
}

/// All points sharing one booster version category (one colour).
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub category: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScatterChart {
    pub title: String,
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn points(&self) -> impl Iterator<Item = &ScatterPoint> {
        self.series.iter().flat_map(|s| s.points.iter())
    }
}

/// Payload vs. outcome for every launch inside the current filters.
///
/// Series are ordered by booster category; points keep dataset order.
pub fn payload_scatter(dataset: &LaunchDataset, filters: &FilterState) -> ScatterChart {
    let mut by_category: BTreeMap<&str, Vec<ScatterPoint>> = BTreeMap::new();
    for rec in filtered_records(dataset, filters) {
        by_category
            .entry(rec.booster_version_category.as_str())
            .or_default()
            .push(ScatterPoint {
                payload_mass_kg: rec.payload_mass_kg,
                outcome: rec.outcome,
                flight_number: rec.flight_number,
            });
    }

    let title = match &filters.site {
        SiteSelection::All => "Correlation between Payload and Success for all Sites".to_string(),
        SiteSelection::Site(s) => format!("Correlation between Payload and Success for {s} Site"),
    };

    ScatterChart {
        title,
        series: by_category
            .into_iter()
            .map(|(category, points)| ScatterSeries {
                category: category.to_string(),
                points,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::PayloadRange;
    use crate::data::model::fixtures::sample_dataset;

    fn filters(site: SiteSelection, lo: f64, hi: f64) -> FilterState {
        FilterState {
            site,
            payload: PayloadRange::new(lo, hi),
        }
    }

    fn flights(chart: &ScatterChart) -> Vec<i64> {
        let mut v: Vec<i64> = chart.points().map(|p| p.flight_number).collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_full_range_keeps_everything() {
        let ds = sample_dataset();
        let chart = payload_scatter(&ds, &filters(SiteSelection::All, 0.0, 10000.0));
        assert_eq!(chart.title, "Correlation between Payload and Success for all Sites");
        assert_eq!(chart.point_count(), ds.len());
        let cats: Vec<_> = chart.series.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(cats, vec!["B4", "B5", "FT", "v1.0", "v1.1"]);
    }

    #[test]
    fn test_points_stay_within_range() {
        let ds = sample_dataset();
        for (lo, hi) in [(0.0, 0.0), (500.0, 3170.0), (2000.0, 6000.0), (9000.0, 10000.0)] {
            let chart = payload_scatter(&ds, &filters(SiteSelection::All, lo, hi));
            assert!(chart
                .points()
                .all(|p| lo <= p.payload_mass_kg && p.payload_mass_kg <= hi));
        }
        let edge = payload_scatter(&ds, &filters(SiteSelection::All, 500.0, 677.0));
        assert_eq!(flights(&edge), vec![2, 3, 4]);
    }

    #[test]
    fn test_narrowing_never_adds_points() {
        let ds = sample_dataset();
        let wide = payload_scatter(&ds, &filters(SiteSelection::All, 0.0, 8000.0));
        let narrow = payload_scatter(&ds, &filters(SiteSelection::All, 1000.0, 5000.0));
        let wide_flights = flights(&wide);
        assert!(flights(&narrow).iter().all(|f| wide_flights.contains(f)));
        assert!(narrow.point_count() < wide.point_count());
    }

    #[test]
    fn test_site_restricts_points() {
        let ds = sample_dataset();
        let site = SiteSelection::Site("VAFB SLC-4E".to_string());
        let chart = payload_scatter(&ds, &filters(site, 0.0, 10000.0));
        assert_eq!(chart.title, "Correlation between Payload and Success for VAFB SLC-4E Site");
        assert_eq!(flights(&chart), vec![4, 6]);
        let xy: Vec<_> = chart.points().map(ScatterPoint::as_xy).collect();
        assert!(xy.contains(&[500.0, 0.0]));
        assert!(xy.contains(&[9600.0, 1.0]));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let ds = sample_dataset();
        let chart = payload_scatter(&ds, &filters(SiteSelection::All, 6000.0, 1000.0));
        assert_eq!(chart.point_count(), 0);
        assert!(chart.series.is_empty());
    }

    #[test]
    fn test_same_input_same_output() {
        let ds = sample_dataset();
        let f = filters(SiteSelection::Site("KSC LC-39A".into()), 2000.0, 7000.0);
        assert_eq!(payload_scatter(&ds, &f), payload_scatter(&ds, &f));
    }
}
