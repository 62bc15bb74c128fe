//! CSV import of interview rating exports.

mod mapping;
mod normalizer;
mod parser;

use crate::workflows::interviews::RawRating;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug)]
pub enum RatingImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidScore {
        row: u64,
        column: &'static str,
        value: String,
    },
}

impl std::fmt::Display for RatingImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatingImportError::Io(err) => write!(f, "failed to read rating export: {}", err),
            RatingImportError::Csv(err) => write!(f, "invalid rating CSV data: {}", err),
            RatingImportError::InvalidScore { row, column, value } => write!(
                f,
                "line {}: {} value '{}' is not a number",
                row, column, value
            ),
        }
    }
}

impl std::error::Error for RatingImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RatingImportError::Io(err) => Some(err),
            RatingImportError::Csv(err) => Some(err),
            RatingImportError::InvalidScore { .. } => None,
        }
    }
}

impl From<std::io::Error> for RatingImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RatingImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads raw ratings from a spreadsheet export.
pub struct RatingCsvImporter;

impl RatingCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawRating>, RatingImportError> {
        let file = std::fs::File::open(path.as_ref())?;
        let ratings = Self::from_reader(file)?;
        info!(
            path = %path.as_ref().display(),
            ratings = ratings.len(),
            "imported interview ratings"
        );
        Ok(ratings)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RawRating>, RatingImportError> {
        parser::parse_ratings(reader)
    }
}
