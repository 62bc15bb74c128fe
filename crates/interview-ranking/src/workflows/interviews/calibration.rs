use std::collections::BTreeMap;

use tracing::debug;

use super::domain::{Dimension, DimensionCalibration, RaterCalibration, RaterId, RawRating};

/// Mean assumed for a dimension with fewer than two samples.
pub const NEUTRAL_MEAN: f64 = 50.0;
/// Spread assumed for thin or zero-variance histories.
pub const NEUTRAL_STD_DEV: f64 = 1.0;

/// Compute every rater's per-dimension mean and sample standard deviation.
///
/// Each rater in `ratings` receives exactly one entry. Dimensions are calibrated
/// independently, so a partial rating still contributes its present values.
pub fn compute_calibrations(ratings: &[RawRating]) -> BTreeMap<RaterId, RaterCalibration> {
    let mut by_rater: BTreeMap<&RaterId, Vec<&RawRating>> = BTreeMap::new();
    for rating in ratings {
        by_rater.entry(&rating.rater_id).or_default().push(rating);
    }

    by_rater
        .into_iter()
        .map(|(rater_id, history)| {
            let [d1, d2, d3] = Dimension::ALL.map(|dimension| {
                let values: Vec<f64> = history
                    .iter()
                    .filter_map(|rating| rating.value(dimension))
                    .collect();
                let calibration = calibrate(&values);
                if calibration.sample_count < 2 {
                    debug!(
                        rater = %rater_id.0,
                        dimension = dimension.label(),
                        samples = calibration.sample_count,
                        "thin rater history, neutral calibration applied"
                    );
                }
                calibration
            });
            (rater_id.clone(), RaterCalibration { d1, d2, d3 })
        })
        .collect()
}

/// Calibrate one dimension from the values a rater actually gave.
pub fn calibrate(values: &[f64]) -> DimensionCalibration {
    let sample_count = values.len();
    if sample_count < 2 {
        return DimensionCalibration {
            mean: NEUTRAL_MEAN,
            std_dev: NEUTRAL_STD_DEV,
            sample_count,
        };
    }

    let n = sample_count as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std_dev = variance.sqrt();

    // Identical scores keep the rater's own mean but not a zero spread.
    let std_dev = if std_dev == 0.0 || !std_dev.is_finite() {
        debug!(samples = sample_count, mean, "zero-variance history, unit spread applied");
        NEUTRAL_STD_DEV
    } else {
        std_dev
    };

    DimensionCalibration {
        mean,
        std_dev,
        sample_count,
    }
}
