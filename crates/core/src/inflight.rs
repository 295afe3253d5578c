//! Supersession of in-flight requests.
//!
//! Without cancellation, a slow stale response can overwrite newer local
//! state. Here every request runs under a per-key handle: beginning a new
//! request for the same key cancels the prior one before dispatch, and a
//! cancelled request reports [`GatewayError::Superseded`] instead of
//! clobbering anything.

use std::future::Future;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tokio_util::sync::CancellationToken;

use crate::error::GatewayError;

/// Per-key request handles. Keys are typically entity ids, with one extra
/// key reserved for whole-collection loads.
#[derive(Debug)]
pub struct InflightRegistry<K: Eq + Hash + Copy> {
    tokens: FxHashMap<K, CancellationToken>,
}

impl<K: Eq + Hash + Copy> Default for InflightRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Copy> InflightRegistry<K> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            tokens: FxHashMap::default(),
        }
    }

    /// Begin a request for `key`, cancelling any prior request for it.
    ///
    /// The returned token is passed to [`guarded`]; the borrow on the
    /// registry ends here, so a later event can supersede the request
    /// while it is still in flight.
    pub fn begin(&mut self, key: K) -> CancellationToken {
        if let Some(prior) = self.tokens.get(&key) {
            prior.cancel();
        }
        let token = CancellationToken::new();
        self.tokens.insert(key, token.clone());
        token
    }

    /// Cancel the in-flight request for `key`, if any.
    pub fn cancel(&mut self, key: K) {
        if let Some(token) = self.tokens.remove(&key) {
            token.cancel();
        }
    }

    /// Cancel everything. Used on unmount.
    pub fn cancel_all(&mut self) {
        for token in self.tokens.values() {
            token.cancel();
        }
        self.tokens.clear();
    }
}

/// Run a gateway call under a request handle.
///
/// # Errors
///
/// [`GatewayError::Superseded`] when the handle is cancelled before the
/// call resolves; otherwise the call's own result.
pub async fn guarded<T>(
    token: CancellationToken,
    fut: impl Future<Output = Result<T, GatewayError>>,
) -> Result<T, GatewayError> {
    match token.run_until_cancelled(fut).await {
        Some(result) => result,
        None => Err(GatewayError::Superseded),
    }
}
