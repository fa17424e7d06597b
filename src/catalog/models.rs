use crate::catalog::consts::IMAGERY_PLACEHOLDER;
use crate::geo::models::LatLng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundDefinition {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, alias = "mapillaryImageId")]
    pub imagery_ref: String,
    pub answer: LatLng,
    #[serde(alias = "gpt")]
    pub opponent_guess: LatLng,
}

impl RoundDefinition {
    pub fn has_imagery(&self) -> bool {
        let imagery_ref = self.imagery_ref.trim();
        !imagery_ref.is_empty() && imagery_ref != IMAGERY_PLACEHOLDER
    }

    /// Whether the backfill should ask the imagery provider for this entry.
    pub fn needs_imagery(&self) -> bool {
        !self.has_imagery() && self.answer.is_valid()
    }

    /// `None` while the imagery reference is missing or still the placeholder.
    pub fn imagery(&self) -> Option<&str> {
        self.has_imagery().then_some(self.imagery_ref.as_str())
    }
}

/// On-disk layout of a catalog dataset.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    pub locations: Vec<RoundDefinition>,
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub generation: u64,
    pub rounds: Vec<RoundDefinition>,
    pub backfill_started: bool,
}

impl Catalog {
    pub fn unresolved_count(&self) -> usize {
        self.rounds.iter().filter(|round| !round.has_imagery()).count()
    }
}
