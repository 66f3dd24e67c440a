//! Writes a synthetic `spacex_launch_dash.csv` so the dashboard can be run
//! without the real dataset.

use anyhow::{Context, Result};

use launch_dashboard::data::loader::{
    COL_BOOSTER_CATEGORY, COL_CLASS, COL_FLIGHT_NUMBER, COL_LAUNCH_SITE, COL_PAYLOAD_MASS,
};

const OUTPUT_PATH: &str = "spacex_launch_dash.csv";

/// Booster generations: (category, first flight, success probability, max payload kg).
const ERAS: [(&str, u32, f64, f64); 5] = [
    ("v1.0", 1, 0.2, 700.0),
    ("v1.1", 6, 0.35, 4500.0),
    ("FT", 21, 0.75, 9600.0),
    ("B4", 45, 0.8, 9600.0),
    ("B5", 53, 0.9, 9600.0),
];

const TOTAL_FLIGHTS: u32 = 56;

/// Small deterministic PRNG (splitmix64), good enough for sample data.
struct SplitMix(u64);

impl SplitMix {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn era_for(flight: u32) -> (&'static str, f64, f64) {
    let (cat, _, p, max) = ERAS
        .iter()
        .rev()
        .find(|(_, first, _, _)| flight >= *first)
        .copied()
        .unwrap_or(ERAS[0]);
    (cat, p, max)
}

fn site_for(flight: u32, rng: &mut SplitMix) -> &'static str {
    if flight <= 26 {
        return if rng.next_f64() < 0.85 { "CCAFS LC-40" } else { "VAFB SLC-4E" };
    }
    match rng.next_u64() % 10 {
        0..=4 => "KSC LC-39A",
        5..=7 => "CCAFS SLC-40",
        _ => "VAFB SLC-4E",
    }
}

fn main() -> Result<()> {
    let mut rng = SplitMix(42);
    let mut writer = csv::Writer::from_path(OUTPUT_PATH)
        .with_context(|| format!("creating {OUTPUT_PATH}"))?;

    writer.write_record([
        "Unnamed: 0",
        COL_FLIGHT_NUMBER,
        COL_LAUNCH_SITE,
        COL_CLASS,
        COL_PAYLOAD_MASS,
        "Booster Version",
        COL_BOOSTER_CATEGORY,
    ])?;

    for flight in 1..=TOTAL_FLIGHTS {
        let (category, p_success, max_payload) = era_for(flight);
        let site = site_for(flight, &mut rng);
        let payload = (rng.next_f64() * max_payload).round();
        let class = u8::from(rng.next_f64() < p_success);
        let booster = format!("F9 {category} B{}", 1000 + flight);

        writer.write_record([
            (flight - 1).to_string(),
            flight.to_string(),
            site.to_string(),
            class.to_string(),
            format!("{payload:.1}"),
            booster,
            category.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {TOTAL_FLIGHTS} launches to {OUTPUT_PATH}");
    Ok(())
}
