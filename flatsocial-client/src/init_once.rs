//! A cell that runs one asynchronous initializer at a time and caches its success.

use futures::future::{BoxFuture, FutureExt, Shared, TryFutureExt};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type PendingInit<T, E> = Shared<BoxFuture<'static, Result<Arc<T>, E>>>;

enum Slot<T, E> {
    Empty,
    Pending(PendingInit<T, E>),
    Ready(Arc<T>),
}

/// Concurrent callers of [`InitOnce::get_or_try_init`] all await the same attempt. A failed
/// attempt reaches every one of them and leaves the cell empty for the next caller.
pub struct InitOnce<T, E> {
    slot: Mutex<Slot<T, E>>,
}

impl<T, E> Default for InitOnce<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> InitOnce<T, E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Slot::Empty),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot<T, E>> {
        // The slot is only ever replaced wholesale, so a poisoned lock still holds a valid state.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn get(&self) -> Option<Arc<T>> {
        match &*self.lock() {
            Slot::Ready(value) => Some(Arc::clone(value)),
            Slot::Empty | Slot::Pending(_) => None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(&*self.lock(), Slot::Pending(_))
    }
}

impl<T, E> InitOnce<T, E>
where
    T: Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub async fn get_or_try_init<F, Fut>(&self, init: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let pending = {
            let mut slot = self.lock();
            match &*slot {
                Slot::Ready(value) => return Ok(Arc::clone(value)),
                Slot::Pending(pending) => pending.clone(),
                Slot::Empty => {
                    let pending = init().map_ok(Arc::new).boxed().shared();
                    *slot = Slot::Pending(pending.clone());
                    pending
                }
            }
        };

        let result = pending.clone().await;

        let mut slot = self.lock();
        if matches!(&*slot, Slot::Pending(current) if current.ptr_eq(&pending)) {
            *slot = match &result {
                Ok(value) => Slot::Ready(Arc::clone(value)),
                Err(_) => Slot::Empty,
            };
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use crate::init_once::InitOnce;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use tokio::sync::Notify;

    #[tokio::test]
    async fn concurrent_callers_share_one_attempt() {
        let cell = Arc::new(InitOnce::<String, String>::new());
        let attempts = Arc::new(AtomicUsize::new(0));
        let release = Arc::new(Notify::new());

        let init = |attempts: Arc<AtomicUsize>, release: Arc<Notify>| {
            move || async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                release.notified().await;
                Ok::<_, String>("ready".to_owned())
            }
        };

        let first = tokio::spawn({
            let cell = Arc::clone(&cell);
            let init = init(Arc::clone(&attempts), Arc::clone(&release));
            async move { cell.get_or_try_init(init).await }
        });
        let second = tokio::spawn({
            let cell = Arc::clone(&cell);
            let init = init(Arc::clone(&attempts), Arc::clone(&release));
            async move { cell.get_or_try_init(init).await }
        });

        while !cell.is_pending() {
            tokio::task::yield_now().await;
        }
        release.notify_one();

        let first = first.await.unwrap().unwrap();
        let second = second.await.unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert_eq!(cell.get().as_deref().map(String::as_str), Some("ready"));
    }

    #[tokio::test]
    async fn failure_clears_the_cell() {
        let cell = InitOnce::<u32, String>::new();

        let failed = cell
            .get_or_try_init(|| async { Err("unreachable node".to_owned()) })
            .await;
        assert_eq!(failed, Err("unreachable node".to_owned()));
        assert!(cell.get().is_none());
        assert!(!cell.is_pending());

        let value = cell.get_or_try_init(|| async { Ok(7) }).await.unwrap();
        assert_eq!(*value, 7);

        let cached = cell
            .get_or_try_init(|| async { Err("not called".to_owned()) })
            .await
            .unwrap();
        assert!(Arc::ptr_eq(&value, &cached));
    }
}
