use crate::client::AnalysisClient;
use crate::session::WidgetSession;
use crate::storage::JsonFileStore;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<WidgetSession<JsonFileStore>>>,
    pub client: AnalysisClient,
    in_flight: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(store: JsonFileStore, client: AnalysisClient) -> Self {
        Self {
            session: Arc::new(Mutex::new(WidgetSession::new(store))),
            client,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Claims the single analysis slot, or `None` while another is running.
    pub fn try_begin_submission(&self) -> Option<SubmitGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitGuard {
                flag: Arc::clone(&self.in_flight),
            })
    }
}

/// Releases the analysis slot when dropped.
pub struct SubmitGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
