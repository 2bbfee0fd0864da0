//! Prompt templates for the tourist guide.

use crate::services::validation::GuideRequest;
use serde_json::{json, Value};

/// Role and output contract sent as the model's system instruction.
pub const SYSTEM_INSTRUCTION: &str = r#"Tu es un guide touristique expert.
Pour chaque ville ou pays demandé, tu dois fournir :
1. Les principaux endroits à visiter (selon le nombre demandé)
2. Le prix moyen d'un repas dans la devise du pays

N'utilise pas Markdown.

Ta réponse DOIT être strictement au format JSON suivant :
{
  "ville_ou_pays": "nom de la ville ou du pays",
  "endroits_a_visiter": ["endroit 1", "endroit 2", ...],
  "prix_moyen_repas": "<prix> <devise du pays>"
}

Ne retourne RIEN d'autre que ce JSON pur, sans backticks ni formatting."#;

/// System and user text for one completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

pub fn build_prompt(request: &GuideRequest) -> Prompt {
    Prompt {
        system: SYSTEM_INSTRUCTION.to_string(),
        user: format!(
            "Indique les {} principaux endroits à visiter à/en {} et le prix moyen d'un repas.",
            request.count, request.place
        ),
    }
}

/// Structured-output schema matching [`crate::models::TouristInfo`].
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "ville_ou_pays": { "type": "STRING" },
            "endroits_a_visiter": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "prix_moyen_repas": { "type": "STRING" }
        },
        "required": ["ville_ou_pays", "endroits_a_visiter", "prix_moyen_repas"],
        "propertyOrdering": ["ville_ou_pays", "endroits_a_visiter", "prix_moyen_repas"]
    })
}
