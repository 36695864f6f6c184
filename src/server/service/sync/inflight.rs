//! At-most-one-fetch-per-key mutual exclusion.
//!
//! A mutex-guarded map from [`ResourceKey`] to a watch channel carrying the
//! eventual outcome. The first caller for a key becomes the leader and holds a
//! [`FetchTicket`]; concurrent callers become followers and await the leader's
//! published outcome. Lookup and insert happen in one critical section, which
//! is the whole point: splitting them into two lock acquisitions reintroduces
//! the duplicate-fetch race this type exists to prevent.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::server::{error::sync::SyncError, service::sync::key::ResourceKey};

/// Shared result of one fetch attempt: `Ok(fetched)` or a cloneable error.
pub type SyncOutcome = Result<bool, SyncError>;

type InFlightMap = Arc<Mutex<HashMap<ResourceKey, watch::Receiver<Option<SyncOutcome>>>>>;

#[derive(Default)]
pub struct InFlightRegistry {
    inflight: InFlightMap,
}

pub enum Acquired {
    Leader(FetchTicket),
    Follower(Follower),
}

/// Exclusive right to perform the upstream fetch for one key.
///
/// Dropping the ticket without calling [`FetchTicket::complete`] publishes an
/// aborted outcome and removes the key, so a later call can retry no matter
/// how the leader's task exits.
pub struct FetchTicket {
    key: ResourceKey,
    map: InFlightMap,
    tx: watch::Sender<Option<SyncOutcome>>,
    started_at: DateTime<Utc>,
    completed: bool,
}

/// A caller awaiting another caller's in-flight fetch for the same key.
pub struct Follower {
    key: ResourceKey,
    rx: watch::Receiver<Option<SyncOutcome>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomic check-and-insert: returns a leader ticket if no fetch for `key`
    /// is in flight, otherwise a follower handle on the existing one.
    pub fn acquire_or_join(&self, key: ResourceKey) -> Acquired {
        let mut map = self.inflight.lock().expect("in-flight registry lock poisoned");

        if let Some(rx) = map.get(&key) {
            return Acquired::Follower(Follower {
                key,
                rx: rx.clone(),
            });
        }

        let (tx, rx) = watch::channel(None);
        map.insert(key.clone(), rx);

        Acquired::Leader(FetchTicket {
            key,
            map: Arc::clone(&self.inflight),
            tx,
            started_at: Utc::now(),
            completed: false,
        })
    }

    /// Number of fetches currently in flight.
    pub fn len(&self) -> usize {
        self.inflight
            .lock()
            .expect("in-flight registry lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FetchTicket {
    pub fn key(&self) -> &ResourceKey {
        &self.key
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Publishes the outcome to all followers and releases the key.
    pub fn complete(mut self, outcome: SyncOutcome) {
        self.publish(outcome);
    }

    fn publish(&mut self, outcome: SyncOutcome) {
        if self.completed {
            return;
        }
        self.completed = true;

        // Remove before publishing so a caller arriving after the outcome is
        // visible starts a fresh fetch instead of joining a finished one.
        self.map
            .lock()
            .expect("in-flight registry lock poisoned")
            .remove(&self.key);

        let _ = self.tx.send(Some(outcome));
    }
}

impl Drop for FetchTicket {
    fn drop(&mut self) {
        self.publish(Err(SyncError::Aborted {
            key: self.key.to_string(),
        }));
    }
}

impl Follower {
    /// Waits for the leader's published outcome.
    pub async fn outcome(mut self) -> SyncOutcome {
        match self.rx.wait_for(|outcome| outcome.is_some()).await {
            Ok(outcome) => outcome
                .clone()
                .unwrap_or_else(|| unreachable!("wait_for guarantees a published outcome")),
            // The ticket's Drop publishes before the sender goes away, so a
            // closed channel without an outcome means the leader panicked
            // between the two; treat it as aborted.
            Err(_) => Err(SyncError::Aborted {
                key: self.key.to_string(),
            }),
        }
    }
}
