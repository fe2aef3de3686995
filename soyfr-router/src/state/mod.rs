//! Reactive state cells.
//!
//! `Entity<T>` wraps a value behind an `Arc<RwLock<T>>` and notifies
//! subscribers through a `watch` channel after every update. The dispatcher
//! keeps the current route in one of these so a rendering layer can react to
//! route changes without polling.

use std::sync::{Arc, RwLock};
use tokio::sync::watch;

/// Shared, observable state cell.
pub struct Entity<T: Send + Sync> {
    inner: Arc<RwLock<T>>,
    tx: watch::Sender<()>,
}

impl<T: Send + Sync> Entity<T> {
    /// Create a new entity with the given initial value.
    pub fn new(value: T) -> Self {
        let (tx, _) = watch::channel(());
        Self {
            inner: Arc::new(RwLock::new(value)),
            tx,
        }
    }

    /// Update the inner value using a closure and notify subscribers.
    pub fn update<F, R>(&self, f: F) -> crate::Result<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut guard = self.inner.write().map_err(|_| crate::Error::LockPoisoned)?;
        let res = f(&mut *guard);
        drop(guard);
        let _ = self.tx.send(());
        Ok(res)
    }

    /// Read the inner value using a closure.
    pub fn read<F, R>(&self, f: F) -> crate::Result<R>
    where
        F: FnOnce(&T) -> R,
    {
        let guard = self.inner.read().map_err(|_| crate::Error::LockPoisoned)?;
        Ok(f(&*guard))
    }

    /// Subscribe to changes of this entity.
    ///
    /// The receiver is marked changed once per `update` call, whether or not
    /// the value actually differs.
    pub fn subscribe(&self) -> watch::Receiver<()> {
        self.tx.subscribe()
    }
}

impl<T: Send + Sync> Clone for Entity<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            tx: watch::Sender::clone(&self.tx),
        }
    }
}

impl<T: Send + Sync + std::fmt::Debug> std::fmt::Debug for Entity<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("Entity");
        match self.inner.read() {
            Ok(guard) => s.field("value", &*guard),
            Err(_) => s.field("value", &"<poisoned>"),
        };
        s.finish()
    }
}
