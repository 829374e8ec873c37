//! Frecency scoring for saved and recent searches.
//!
//! Frecency combines frequency (how often) and recency (how recently) into a
//! single score in `[0, 1]`. Both components are normalized separately and
//! multiplied together with equal weight:
//!
//! ```text
//! usage   = (1 + t) / (1 + e^(-k × (count - z))) - t
//! recency = 2^(-age_days / half_life)
//! score   = usage × recency
//! ```
//!
//! With a 14-day half-life, a search last run 14 days ago has half the recency
//! weight of one run today. Usages aren't tracked individually, so they never
//! expire; only the last-used timestamp decays.

use std::time::{SystemTime, UNIX_EPOCH};

/// Half-life in days for the recency decay.
const HALF_LIFE_DAYS: f64 = 14.0;

/// Sigmoid midpoint for the usage curve.
const USAGE_MIDPOINT: f64 = 0.4;

/// Sigmoid steepness for the usage curve.
const USAGE_STEEPNESS: f64 = 0.5;

/// Asymptote offset for the usage curve.
const USAGE_OFFSET: f64 = 0.9;

const MILLIS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;

/// Current time as Unix milliseconds.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Calculate the frecency score for a search at the current time.
pub fn frecency(usage_count: u32, last_used_millis: u64) -> f64 {
    frecency_at(usage_count, last_used_millis, now_millis())
}

/// Calculate the frecency score relative to an explicit `now`.
///
/// Only meaningful for relative ordering within a single ranking pass; the
/// score is not normalized across a candidate set.
pub fn frecency_at(usage_count: u32, last_used_millis: u64, now_millis: u64) -> f64 {
    normalize_usage(usage_count) * normalize_recency(last_used_millis, now_millis)
}

/// Sigmoid normalization of the usage count. After ~10 uses it's all the same.
///
/// The raw curve dips slightly below zero at a count of zero, so it is clamped
/// to keep the combined score inside `[0, 1]`.
fn normalize_usage(count: u32) -> f64 {
    let count = count as f64;
    let curve = (1.0 + USAGE_OFFSET)
        / (1.0 + (-USAGE_STEEPNESS * (count - USAGE_MIDPOINT)).exp())
        - USAGE_OFFSET;
    curve.clamp(0.0, 1.0)
}

/// Exponential decay based on the age of the last usage.
///
/// Timestamps in the future are treated as age zero.
fn normalize_recency(last_used_millis: u64, now_millis: u64) -> f64 {
    let age_days = now_millis.saturating_sub(last_used_millis) as f64 / MILLIS_PER_DAY;
    2f64.powf(-age_days / HALF_LIFE_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: u64 = 86_400_000;
    const NOW: u64 = 1_700_000_000_000;

    #[test]
    fn test_recency_half_life() {
        assert!((normalize_recency(NOW, NOW) - 1.0).abs() < 1e-12);
        assert!((normalize_recency(NOW - 14 * DAY, NOW) - 0.5).abs() < 1e-12);
        assert!((normalize_recency(NOW - 28 * DAY, NOW) - 0.25).abs() < 1e-12);
        assert!(normalize_recency(0, NOW) >= 0.0);
    }

    #[test]
    fn test_future_timestamp_is_fresh() {
        assert_eq!(normalize_recency(NOW + DAY, NOW), 1.0);
    }

    #[test]
    fn test_usage_curve_shape() {
        assert_eq!(normalize_usage(0), 0.0);

        let one = normalize_usage(1);
        assert!(one > 0.1 && one < 0.3, "usage at one: {}", one);

        let ten = normalize_usage(10);
        assert!(ten > 0.95 && ten <= 1.0, "usage at ten: {}", ten);

        let hundred = normalize_usage(100);
        assert!(hundred <= 1.0);
        assert!(hundred - ten < 0.02);
    }

    #[test]
    fn test_more_usage_never_lowers_score() {
        let last_used = NOW - 3 * DAY;
        for count in 0..50 {
            let a = frecency_at(count, last_used, NOW);
            let b = frecency_at(count + 1, last_used, NOW);
            assert!(b >= a, "count {} -> {}: {} < {}", count, count + 1, b, a);
        }
    }

    #[test]
    fn test_older_usage_scores_lower() {
        let recent = frecency_at(5, NOW, NOW);
        let two_weeks = frecency_at(5, NOW - 14 * DAY, NOW);
        let two_months = frecency_at(5, NOW - 60 * DAY, NOW);

        assert!(recent > two_weeks);
        assert!(two_weeks > two_months);
        assert!((two_weeks / recent - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_score_in_unit_range() {
        for count in [0, 1, 5, 10, 1000] {
            for age in [0, DAY, 30 * DAY, 365 * DAY] {
                let score = frecency_at(count, NOW - age, NOW);
                assert!((0.0..=1.0).contains(&score), "score {}", score);
            }
        }
    }
}
