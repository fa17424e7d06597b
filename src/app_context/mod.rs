use crate::catalog::backfill::BackfillHandle;
use crate::catalog::loader::CatalogSources;
use crate::catalog::store::CatalogStore;
use crate::imagery::rate_limit::ImageryGuard;
use crate::imagery::ImageryLookup;
use crate::storage::interface::IGameStorage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext<GS: IGameStorage> {
    pub games: GS,
    pub catalog: CatalogStore,
    pub catalog_sources: CatalogSources,
    pub backfill: BackfillHandle,
    pub imagery: Arc<dyn ImageryLookup>,
    pub imagery_guard: ImageryGuard,
    /// Token handed to the panorama viewer. `None` when not configured.
    pub access_token: Option<String>,
    pub http_client: reqwest::Client,
}

pub struct RequestContext {
    pub game_id: String,
    pub client_ip: String,
}
