use std::sync::Arc;

use petclinic_core::services::OwnerService;

use crate::views::Views;

#[derive(Clone)]
pub struct AppState {
    pub owners: Arc<OwnerService>,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(owners: OwnerService, views: Views) -> Self {
        Self {
            owners: Arc::new(owners),
            views: Arc::new(views),
        }
    }
}
