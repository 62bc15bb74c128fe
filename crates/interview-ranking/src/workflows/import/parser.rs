use super::mapping::{exclusion_for_role, parse_flag};
use super::normalizer::clean_identifier;
use super::RatingImportError;
use crate::workflows::interviews::RawRating;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use tracing::{debug, warn};

pub(crate) fn parse_ratings<R: Read>(reader: R) -> Result<Vec<RawRating>, RatingImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut ratings = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|position| position.line())
            .unwrap_or(index as u64 + 2);
        let row: RatingRow = record.deserialize(Some(&headers))?;

        let candidate_id = clean_identifier(&row.candidate_id);
        let rater_id = clean_identifier(&row.rater_id);
        if candidate_id.is_empty() || rater_id.is_empty() {
            debug!(line, "skipping rating row without candidate or rater id");
            continue;
        }

        let d1 = parse_score(row.d1.as_deref(), line, "D1")?;
        let d2 = parse_score(row.d2.as_deref(), line, "D2")?;
        let d3 = parse_score(row.d3.as_deref(), line, "D3")?;

        let mut rating = RawRating::new(candidate_id, rater_id, d1, d2, d3);
        if let Some(name) = row.rater_name.as_deref().map(clean_identifier) {
            rating = rating.with_rater_name(name);
        }
        if let Some(flag) = exclude_flag(&row, line) {
            rating = rating.with_exclude_flag(flag);
        }
        ratings.push(rating);
    }

    Ok(ratings)
}

#[derive(Debug, Deserialize)]
struct RatingRow {
    #[serde(rename = "Candidate ID")]
    candidate_id: String,
    #[serde(rename = "Rater ID")]
    rater_id: String,
    #[serde(rename = "Rater Name", default, deserialize_with = "empty_string_as_none")]
    rater_name: Option<String>,
    #[serde(rename = "Rater Role", default, deserialize_with = "empty_string_as_none")]
    rater_role: Option<String>,
    #[serde(rename = "D1", default, deserialize_with = "empty_string_as_none")]
    d1: Option<String>,
    #[serde(rename = "D2", default, deserialize_with = "empty_string_as_none")]
    d2: Option<String>,
    #[serde(rename = "D3", default, deserialize_with = "empty_string_as_none")]
    d3: Option<String>,
    #[serde(rename = "Exclude", default, deserialize_with = "empty_string_as_none")]
    exclude: Option<String>,
}

fn exclude_flag(row: &RatingRow, line: u64) -> Option<bool> {
    if let Some(raw) = row.exclude.as_deref() {
        match parse_flag(raw) {
            Some(flag) => return Some(flag),
            None => warn!(line, value = raw, "unrecognised exclude flag, using rater role"),
        }
    }
    row.rater_role.as_deref().and_then(exclusion_for_role)
}

fn parse_score(
    value: Option<&str>,
    line: u64,
    column: &'static str,
) -> Result<Option<f64>, RatingImportError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(score) if score.is_finite() => Ok(Some(score)),
        _ => Err(RatingImportError::InvalidScore {
            row: line,
            column,
            value: raw.to_string(),
        }),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
