//! Shared application state.
//!
//! One `AppState` is built at startup, wrapped in `Arc`, and handed to
//! the router and to spawned verification tasks. The store connection
//! sits behind an async mutex: handlers lock it for the duration of a
//! repository call and never across a simulated-latency await.

use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::{Mutex, MutexGuard};

use crate::digilocker::{DocumentSource, SimulatedDigiLocker};
use crate::verify::{SimulatedVerifier, Verifier};

pub struct AppState {
    store: Mutex<Connection>,
    verifier: Arc<dyn Verifier>,
    locker: Arc<dyn DocumentSource>,
}

impl AppState {
    pub fn new(
        store: Connection,
        verifier: Arc<dyn Verifier>,
        locker: Arc<dyn DocumentSource>,
    ) -> Self {
        Self {
            store: Mutex::new(store),
            verifier,
            locker,
        }
    }

    /// Production wiring: simulated verifier and DigiLocker with their
    /// default latencies.
    pub fn with_simulators(store: Connection) -> Self {
        Self::new(
            store,
            Arc::new(SimulatedVerifier::default()),
            Arc::new(SimulatedDigiLocker::default()),
        )
    }

    /// Lock the store connection.
    pub async fn store(&self) -> MutexGuard<'_, Connection> {
        self.store.lock().await
    }

    pub fn verifier(&self) -> Arc<dyn Verifier> {
        Arc::clone(&self.verifier)
    }

    pub fn locker(&self) -> Arc<dyn DocumentSource> {
        Arc::clone(&self.locker)
    }
}
