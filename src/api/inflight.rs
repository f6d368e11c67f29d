use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};

use super::ApiError;

type SharedRequest<V> = Shared<BoxFuture<'static, Result<V, ApiError>>>;

/// Keyed table of requests currently on the wire. A second caller asking for
/// the same key while the first is pending awaits the same future; the entry
/// is dropped as soon as it settles, so the next call goes out fresh.
pub struct InFlight<V: Clone> {
    table: Arc<Mutex<HashMap<String, SharedRequest<V>>>>,
}

impl<V: Clone> Clone for InFlight<V> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<V: Clone> Default for InFlight<V> {
    fn default() -> Self {
        Self {
            table: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<V> InFlight<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub async fn run<F, Fut>(&self, key: &str, make: F) -> Result<V, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, ApiError>> + Send + 'static,
    {
        let request = {
            let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
            match table.get(key) {
                Some(pending) => {
                    log::debug!("joining in-flight request {}", key);
                    pending.clone()
                }
                None => {
                    let owner = Arc::clone(&self.table);
                    let owned_key = key.to_string();
                    let fut = make();
                    let shared = async move {
                        let out = fut.await;
                        owner
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .remove(&owned_key);
                        out
                    }
                    .boxed()
                    .shared();
                    table.insert(key.to_string(), shared.clone());
                    shared
                }
            }
        };
        request.await
    }

    pub fn pending(&self) -> usize {
        self.table.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    fn counted(
        calls: &Arc<AtomicUsize>,
        gate: &Arc<Notify>,
        value: u32,
    ) -> impl FnOnce() -> BoxFuture<'static, Result<u32, ApiError>> {
        let calls = Arc::clone(calls);
        let gate = Arc::clone(gate);
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                gate.notified().await;
                Ok(value)
            }
            .boxed()
        }
    }

    #[tokio::test]
    async fn identical_keys_share_one_request() {
        let table = InFlight::<u32>::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let gate = Arc::new(Notify::new());

        let (a, b, ()) = tokio::join!(
            table.run("projects", counted(&calls, &gate, 1)),
            table.run("projects", counted(&calls, &gate, 2)),
            async {
                tokio::task::yield_now().await;
                gate.notify_one();
            }
        );

        assert_eq!(a, Ok(1));
        assert_eq!(b, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(table.pending(), 0);
    }

    #[tokio::test]
    async fn settled_request_is_not_reused() {
        let table = InFlight::<u32>::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let gate = Arc::new(Notify::new());

        gate.notify_one();
        assert_eq!(table.run("users/me", counted(&calls, &gate, 1)).await, Ok(1));
        gate.notify_one();
        assert_eq!(table.run("users/me", counted(&calls, &gate, 2)).await, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn different_keys_do_not_share() {
        let table = InFlight::<u32>::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let gate = Arc::new(Notify::new());

        let (a, b, ()) = tokio::join!(
            table.run("projects/1", counted(&calls, &gate, 1)),
            table.run("projects/2", counted(&calls, &gate, 2)),
            async {
                tokio::task::yield_now().await;
                gate.notify_one();
                gate.notify_one();
            }
        );

        assert_eq!((a, b), (Ok(1), Ok(2)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn settled_on_first_poll_leaves_the_table() {
        let table = InFlight::<u32>::default();
        let (a, b) = tokio::join!(
            table.run("tasks/project/9", || async { Err(ApiError::Unauthorized) }),
            table.run("tasks/project/9", || async { Ok(5) }),
        );
        assert_eq!(a, Err(ApiError::Unauthorized));
        assert_eq!(b, Ok(5));
    }
}
