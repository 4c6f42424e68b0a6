use std::sync::Arc;

use crate::investigation::Investigator;

pub type SharedState = Arc<AppState>;

#[derive(Clone)]
pub struct AppState {
    pub investigator: Arc<Investigator>,
}

impl AppState {
    pub fn new(investigator: Investigator) -> Self {
        Self {
            investigator: Arc::new(investigator),
        }
    }
}
