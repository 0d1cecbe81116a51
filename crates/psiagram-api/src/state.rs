//! Application state shared by all handlers.
//!
//! External clients are built once at startup and injected here; handlers only
//! see the pipeline services.

use psiagram_core::Config;
use psiagram_detection::LabelDetector;
use psiagram_services::{
    AdjudicationService, PostComposer, RelocationService, UploadStagingService,
};
use psiagram_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub staging: UploadStagingService,
    pub adjudication: AdjudicationService,
    pub relocation: RelocationService,
    pub posts: PostComposer,
    /// Whether a content store bucket is configured
    pub storage_configured: bool,
}

impl AppState {
    /// Wire the pipeline services around the given clients. `storage` is `None`
    /// when no bucket is configured.
    pub fn new(
        config: Config,
        storage: Option<Arc<dyn Storage>>,
        detector: Arc<dyn LabelDetector>,
    ) -> Self {
        let staging = UploadStagingService::new(storage.clone(), &config);
        let adjudication = AdjudicationService::new(storage.clone(), detector, &config);
        let relocation = RelocationService::new(storage.clone());
        let posts = PostComposer::new(relocation.clone());

        Self {
            storage_configured: storage.is_some(),
            config,
            staging,
            adjudication,
            relocation,
            posts,
        }
    }
}
