//! Posts domain state

use std::sync::Arc;

use pressroom_categories::CategoryGateway;

use crate::service::VersioningService;

/// Application state for the Posts domain
///
/// The gateway sits next to the engine because response mapping resolves
/// category ids to display names at read time.
#[derive(Clone)]
pub struct PostsState {
    pub service: Arc<VersioningService>,
    pub gateway: Arc<dyn CategoryGateway>,
}
