use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStatusResponse {
    pub error: bool,
    pub generation: u64,
    pub round_count: usize,
    pub unresolved_imagery: usize,
}
