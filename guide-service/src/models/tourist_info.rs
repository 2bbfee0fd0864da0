use serde::{Deserialize, Serialize};

/// Travel summary for one place, as produced by the model.
///
/// Field names on the wire are the French keys the model is instructed to
/// emit and that clients consume unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouristInfo {
    /// City or country the summary is about.
    #[serde(rename = "ville_ou_pays")]
    pub place: String,

    /// Main attractions, in the order the model listed them.
    #[serde(rename = "endroits_a_visiter")]
    pub attractions: Vec<String>,

    /// Free-form average meal price, currency included (e.g. "25 EUR").
    #[serde(rename = "prix_moyen_repas")]
    pub average_meal_price: String,
}
