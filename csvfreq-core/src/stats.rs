use serde::{Deserialize, Serialize};

use crate::freq::RankedEntry;

#[derive(Debug, Clone, Copy, Default)]
pub struct StatsOptions {
    pub percentage: bool,
    pub cumulative: bool,
}

/// One output row: a ranked entry plus the derived fields its flags request.
/// The cumulative-percentage field exists only when both flags are set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsRow {
    pub value: String,
    pub frequency: u64,
    pub cumulative_frequency: Option<u64>,
    pub percentage: Option<f64>,
    pub cumulative_percentage: Option<f64>,
}

/// Walk the ranked sequence once, deriving cumulative and percentage fields.
/// The cumulative counter is incremented before each row is emitted, so it is
/// inclusive of the current entry. A total of 0 defines all percentages as 0
/// rather than dividing. No rounding happens here.
pub fn derive_stats(ranked: &[RankedEntry], total: u64, opts: &StatsOptions) -> Vec<StatsRow> {
    let pct = |n: u64| {
        if total > 0 {
            100.0 * n as f64 / total as f64
        } else {
            0.0
        }
    };
    let mut cumulative = 0u64;
    ranked
        .iter()
        .map(|entry| {
            cumulative += entry.count;
            StatsRow {
                value: entry.value.clone(),
                frequency: entry.count,
                cumulative_frequency: opts.cumulative.then_some(cumulative),
                percentage: opts.percentage.then(|| pct(entry.count)),
                cumulative_percentage: (opts.cumulative && opts.percentage)
                    .then(|| pct(cumulative)),
            }
        })
        .collect()
}

/// Header row for one column's table, in the same conditional order as the
/// row fields.
pub fn header_row(column_name: &str, opts: &StatsOptions) -> Vec<String> {
    let mut headers = vec![column_name.to_owned(), "Frequency".to_owned()];
    if opts.cumulative {
        headers.push("Cumulative Frequency".to_owned());
    }
    if opts.percentage {
        headers.push("Percentage".to_owned());
    }
    if opts.cumulative && opts.percentage {
        headers.push("Cumulative Percentage".to_owned());
    }
    headers
}
