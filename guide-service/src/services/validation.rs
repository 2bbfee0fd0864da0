//! Request validation for the guide endpoints.
//!
//! Validation happens before any prompt is built, so a rejected request never
//! reaches the model provider.

use std::borrow::Cow;
use std::num::IntErrorKind;
use thiserror::Error;
use validator::Validate;

pub const MIN_COUNT: i64 = 1;
pub const MAX_COUNT: i64 = 10;
pub const DEFAULT_COUNT: i64 = 2;

const PLACE_REQUIRED: &str = "Le paramètre ville_ou_pays est requis.";
const COUNT_OUT_OF_RANGE: &str = "Le nombre d'endroits doit être entre 1 et 10.";
const COUNT_NOT_INTEGER: &str = "Le nombre d'endroits doit être un entier.";
const MALFORMED_PARAMETERS: &str = "Les paramètres de la requête sont invalides.";

/// A rejected request, carrying the reason shown to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ValidationError {
    pub reason: String,
}

impl ValidationError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Parameters that could not be decoded at all (bad encoding, repeated keys).
    pub fn malformed() -> Self {
        Self::new(MALFORMED_PARAMETERS)
    }
}

/// A place/count pair that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct GuideRequest {
    #[validate(custom(function = "not_blank"))]
    pub place: String,

    #[validate(range(min = 1, max = 10, message = "Le nombre d'endroits doit être entre 1 et 10."))]
    pub count: i64,
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new("blank");
        err.message = Some(Cow::Borrowed(PLACE_REQUIRED));
        return Err(err);
    }
    Ok(())
}

/// Validate a place and count. The place is returned untrimmed.
///
/// When both values are invalid the place error wins.
pub fn validate(place: &str, count: i64) -> Result<GuideRequest, ValidationError> {
    let request = GuideRequest {
        place: place.to_string(),
        count,
    };

    match request.validate() {
        Ok(()) => Ok(request),
        Err(errors) => {
            let fields = errors.field_errors();
            let reason = ["place", "count"]
                .iter()
                .filter_map(|field| fields.get(*field))
                .flat_map(|errs| errs.iter())
                .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| errors.to_string());
            Err(ValidationError::new(reason))
        }
    }
}

/// Validate a place whose count may already have failed to parse.
///
/// A blank place is reported before any count problem.
pub fn validate_parsed(
    place: &str,
    count: Result<i64, ValidationError>,
) -> Result<GuideRequest, ValidationError> {
    not_blank(place).map_err(|_| ValidationError::new(PLACE_REQUIRED))?;
    validate(place, count?)
}

/// Parse a raw count taken from the path or the `nb` query parameter.
pub fn parse_count(raw: &str) -> Result<i64, ValidationError> {
    raw.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ValidationError::new(COUNT_OUT_OF_RANGE)
        }
        _ => ValidationError::new(COUNT_NOT_INTEGER),
    })
}
