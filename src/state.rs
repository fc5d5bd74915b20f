use std::sync::Arc;

use crate::database::profile_store::ProfileStore;

#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileStore>,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(profiles: Arc<dyn ProfileStore>, jwt_secret: impl Into<Arc<str>>) -> Self {
        AppState {
            profiles,
            jwt_secret: jwt_secret.into(),
        }
    }
}
