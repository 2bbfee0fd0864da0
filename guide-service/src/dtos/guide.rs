use serde::Deserialize;

/// Query string of `GET /api/guide/lieu/:place`.
///
/// `nb` stays raw text so a non-numeric value can be reported with the same
/// JSON error body as every other validation failure.
#[derive(Debug, Default, Deserialize)]
pub struct CountQuery {
    pub nb: Option<String>,
}
