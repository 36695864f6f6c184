//! Best-effort Valkey cache wrapper.
//!
//! Read-through JSON caching for the list endpoints plus targeted pattern
//! invalidation after a sync. The cache is strictly optional: when no
//! `VALKEY_URL` is configured the wrapper is constructed disabled and every
//! operation is a logged no-op, so dev and test environments need no Valkey.
//! Cache failures are logged and swallowed; cache incoherence is tolerable,
//! failing a request over it is not.

pub mod keys;
mod lua;


use fred::prelude::*;
use serde::{Serialize, de::DeserializeOwned};
use tracing;

use lua::INVALIDATE_PATTERN_SCRIPT;

#[cfg(test)]
type InvalidationLog = std::sync::Arc<std::sync::Mutex<Vec<String>>>;

#[derive(Clone)]
pub struct Cache {
    pool: Option<Pool>,
    #[cfg(test)]
    invalidations: Option<InvalidationLog>,
}

impl Cache {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool: Some(pool),
            #[cfg(test)]
            invalidations: None,
        }
    }

    /// A cache that ignores every operation.
    pub fn disabled() -> Self {
        Self {
            pool: None,
            #[cfg(test)]
            invalidations: None,
        }
    }

    /// A disabled cache that records every invalidation pattern it is asked
    /// to apply, so tests can assert on targeted invalidation.
    #[cfg(test)]
    pub fn recording() -> (Self, InvalidationLog) {
        let log = InvalidationLog::default();
        let cache = Self {
            pool: None,
            invalidations: Some(log.clone()),
        };
        (cache, log)
    }

    pub fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    /// Best-effort read; any miss, decode failure, or transport error is `None`.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let pool = self.pool.as_ref()?;

        let value: Option<String> = match pool.get(key).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, "cache read failed: {err}");
                return None;
            }
        };

        let value = value?;
        match serde_json::from_str(&value) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                tracing::warn!(key, "cache entry failed to decode, ignoring: {err}");
                None
            }
        }
    }

    /// Best-effort write with a per-key-family TTL.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T, ttl_secs: i64) {
        let Some(pool) = self.pool.as_ref() else {
            return;
        };

        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(err) => {
                tracing::warn!(key, "failed to encode cache value: {err}");
                return;
            }
        };

        if let Err(err) = pool
            .set::<(), _, _>(key, encoded, Some(Expiration::EX(ttl_secs)), None, false)
            .await
        {
            tracing::warn!(key, "cache write failed: {err}");
        }
    }

    /// Deletes every key matching `pattern` in one atomic server-side pass.
    ///
    /// Returns the number of keys removed. A disabled cache reports zero.
    pub async fn invalidate_pattern(&self, pattern: &str) -> Result<i64, Error> {
        #[cfg(test)]
        if let Some(log) = &self.invalidations {
            log.lock()
                .expect("invalidation log lock poisoned")
                .push(pattern.to_string());
        }

        let Some(pool) = self.pool.as_ref() else {
            tracing::debug!(pattern, "cache disabled, skipping invalidation");
            return Ok(0);
        };

        let removed: i64 = pool
            .eval(
                INVALIDATE_PATTERN_SCRIPT,
                Vec::<String>::new(),
                vec![pattern.to_string()],
            )
            .await?;

        tracing::debug!(pattern, removed, "invalidated cache keys");
        Ok(removed)
    }
}
