use std::collections::BTreeMap;

use tracing::warn;

use super::calibration::NEUTRAL_MEAN;
use super::domain::{
    sum_complete, Dimension, DimensionCalibration, NormalizedRating, RaterCalibration, RaterId,
    RawRating,
};

/// Spread of the common scale, in points per standard deviation.
pub const SCALE_SPREAD: f64 = 15.0;
pub const SCALE_MIN: f64 = 0.0;
pub const SCALE_MAX: f64 = 100.0;

/// Rescale a raw value to the common 0-100 scale against a rater's calibration.
pub fn normalize_value(value: f64, calibration: &DimensionCalibration) -> f64 {
    let z = (value - calibration.mean) / calibration.std_dev;
    (NEUTRAL_MEAN + z * SCALE_SPREAD)
        .round()
        .clamp(SCALE_MIN, SCALE_MAX)
}

/// Normalize one rating. Without a calibration the raw values pass through unchanged.
pub fn normalize(rating: &RawRating, calibration: Option<&RaterCalibration>) -> NormalizedRating {
    let raw = Dimension::ALL.map(|dimension| rating.value(dimension));
    let normalized = match calibration {
        Some(calibration) => {
            let mut out = [None; 3];
            for (slot, dimension) in out.iter_mut().zip(Dimension::ALL) {
                *slot = rating
                    .value(dimension)
                    .map(|value| normalize_value(value, calibration.dimension(dimension)));
            }
            out
        }
        None => raw,
    };

    NormalizedRating {
        candidate_id: rating.candidate_id.clone(),
        rater_id: rating.rater_id.clone(),
        rater_name: rating.rater_name.clone(),
        exclude_flag: rating.exclude_flag,
        raw_d1: raw[0],
        raw_d2: raw[1],
        raw_d3: raw[2],
        normalized_d1: normalized[0],
        normalized_d2: normalized[1],
        normalized_d3: normalized[2],
        raw_total: sum_complete(raw),
        normalized_total: sum_complete(normalized),
    }
}

/// Normalize every rating against the calibration of its own rater, preserving input order.
pub fn normalize_all(
    ratings: &[RawRating],
    calibrations: &BTreeMap<RaterId, RaterCalibration>,
) -> Vec<NormalizedRating> {
    ratings
        .iter()
        .map(|rating| {
            let calibration = calibrations.get(&rating.rater_id);
            if calibration.is_none() {
                warn!(
                    rater = %rating.rater_id.0,
                    candidate = %rating.candidate_id.0,
                    "no calibration for rater, raw scores used as normalized"
                );
            }
            normalize(rating, calibration)
        })
        .collect()
}
