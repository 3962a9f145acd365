//! Categories domain state

use std::sync::Arc;

use crate::gateway::CategoryDeletionListener;
use crate::repository::CategoryRepository;

/// Application state for the Categories domain
///
/// `listeners` is notified after a category row has been deleted so that
/// referencing domains can reconcile their current versions.
#[derive(Clone)]
pub struct CategoriesState {
    pub repo: CategoryRepository,
    pub listeners: Vec<Arc<dyn CategoryDeletionListener>>,
}
