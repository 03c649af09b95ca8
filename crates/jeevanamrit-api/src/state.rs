use std::collections::HashMap;
use std::sync::Arc;

use jeevanamrit_instruments::Instrument;
use jeevanamrit_intake::session::IntakeSession;
use jeevanamrit_storage::profiles::ProfileStore;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    /// Every instrument the API can describe.
    pub instruments: Arc<Vec<Arc<dyn Instrument>>>,
    /// The instrument new intake sessions use.
    pub intake_instrument: Arc<dyn Instrument>,
    /// One live intake session per user.
    pub sessions: Arc<Mutex<HashMap<Uuid, IntakeSession>>>,
    pub redirect_to: Arc<str>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        instruments: Vec<Arc<dyn Instrument>>,
        intake_instrument: Arc<dyn Instrument>,
        redirect_to: &str,
    ) -> Self {
        Self {
            store,
            instruments: Arc::new(instruments),
            intake_instrument,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            redirect_to: Arc::from(redirect_to),
        }
    }

    pub fn instrument(&self, id: &str) -> Option<Arc<dyn Instrument>> {
        self.instruments.iter().find(|i| i.id() == id).cloned()
    }
}
