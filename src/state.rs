use crate::infrastructure::media::Transcoder;
use crate::infrastructure::storage::RemoteStorage;
use crate::infrastructure::storage::local::LocalStorage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub local: LocalStorage,
    pub remote: Arc<dyn RemoteStorage>,
    pub transcoder: Arc<dyn Transcoder>,
}

impl AppState {
    pub fn new(
        local: LocalStorage,
        remote: Arc<dyn RemoteStorage>,
        transcoder: Arc<dyn Transcoder>,
    ) -> Self {
        Self {
            local,
            remote,
            transcoder,
        }
    }
}
