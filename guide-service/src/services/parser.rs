//! Strict decoding of model replies.

use crate::models::TouristInfo;
use thiserror::Error;

/// The model answered, but not with a usable `TouristInfo`.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Model returned an empty reply")]
    Empty,

    #[error("Model reply is not valid TouristInfo JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Model reply has no place name")]
    MissingPlace,
}

/// Decode the raw completion text. No fence stripping or partial recovery.
pub fn parse_tourist_info(raw: &str) -> Result<TouristInfo, ParseError> {
    if raw.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let info: TouristInfo = serde_json::from_str(raw)?;

    if info.place.trim().is_empty() {
        return Err(ParseError::MissingPlace);
    }

    Ok(info)
}
