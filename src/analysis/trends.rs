//! Sentiment aggregation: monthly means and a score histogram.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeMap;

/// Mean sentiment for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySentiment {
    /// Last day of the month, the bucket's label.
    pub month_end: NaiveDate,
    /// `None` for months with no records between populated months.
    pub mean: Option<f64>,
    pub count: usize,
}

/// Bucket `(timestamp, score)` pairs by calendar month.
///
/// Every month from the earliest to the latest populated one is present,
/// in order. An empty input gives an empty series.
pub fn monthly_sentiment(points: &[(NaiveDateTime, f64)]) -> Vec<MonthlySentiment> {
    let mut buckets: BTreeMap<(i32, u32), (f64, usize)> = BTreeMap::new();
    for (at, score) in points {
        let entry = buckets.entry((at.year(), at.month())).or_insert((0.0, 0));
        entry.0 += score;
        entry.1 += 1;
    }

    let (Some(first), Some(last)) = (
        buckets.keys().next().copied(),
        buckets.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    let mut series = Vec::new();
    let mut cursor = first;
    loop {
        let (sum, count) = buckets.get(&cursor).copied().unwrap_or((0.0, 0));
        if let Some(month_end) = month_end(cursor.0, cursor.1) {
            series.push(MonthlySentiment {
                month_end,
                mean: (count > 0).then(|| sum / count as f64),
                count,
            });
        }
        if cursor == last {
            break;
        }
        cursor = next_month(cursor);
    }
    series
}

fn next_month((year, month): (i32, u32)) -> (i32, u32) {
    if month == 12 { (year + 1, 1) } else { (year, month + 1) }
}

fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = next_month((year, month));
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

/// One equal-width histogram bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Summary of a set of sentiment scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentDistribution {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub bins: Vec<HistogramBin>,
}

/// Mean plus an equal-width histogram over `[min, max]`.
///
/// The last bin is closed on the right. When every score is equal the range
/// is widened to `[x - 0.5, x + 0.5]`. Returns `None` for no scores or zero
/// bins.
pub fn distribution(scores: &[f64], bins: usize) -> Option<SentimentDistribution> {
    if scores.is_empty() || bins == 0 {
        return None;
    }
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;

    let (lo, hi) = if min == max { (min - 0.5, max + 0.5) } else { (min, max) };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &s in scores {
        let idx = (((s - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + width * i as f64,
            upper: lo + width * (i + 1) as f64,
            count,
        })
        .collect();

    Some(SentimentDistribution {
        count: scores.len(),
        mean,
        min,
        max,
        bins,
    })
}
