// Handle shared by every component: the service that owns the state and a
// rendered snapshot of that state.
use std::future::Future;

use client::{AppState, InventoryService};
use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq)]
pub struct Ui {
    service: Signal<InventoryService>,
    pub view: Signal<AppState>,
}

impl Ui {
    pub fn new(service: Signal<InventoryService>, view: Signal<AppState>) -> Self {
        Self { service, view }
    }

    /// Runs `action` on the service, then re-renders from a fresh snapshot.
    /// The view is also synced once the action first waits on the store, so
    /// in-flight flags show up before the request finishes. Failures are
    /// already turned into notices by the service.
    pub fn run<F, Fut>(self, action: F)
    where
        F: FnOnce(InventoryService) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let service = self.service.peek().clone();
        let mut view = self.view;
        spawn(async move {
            drive(action(service.clone()), self.sync()).await;
            view.set(service.snapshot().await);
        });
    }

    /// Expires old notices and the undo offer.
    pub async fn tick(self) {
        let service = self.service.peek().clone();
        service.tick().await;
        self.sync().await;
    }

    /// Re-renders only when the state actually changed.
    pub async fn sync(self) {
        let service = self.service.peek().clone();
        let snapshot = service.snapshot().await;
        let mut view = self.view;
        if *view.peek() != snapshot {
            view.set(snapshot);
        }
    }
}

/// Polls `action` until it first suspends, runs `on_pending`, then finishes
/// `action`. `on_pending` is skipped when the action completes right away.
pub async fn drive<A, P>(action: A, on_pending: P)
where
    A: Future<Output = ()>,
    P: Future<Output = ()>,
{
    tokio::pin!(action);
    let finished = tokio::select! {
        biased;
        _ = &mut action => true,
        _ = tokio::task::yield_now() => false,
    };
    if !finished {
        on_pending.await;
        action.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::Notify;

    #[tokio::test]
    async fn test_pending_hook_sees_in_flight_flag() {
        let in_flight = Arc::new(AtomicBool::new(false));
        let seen = Arc::new(AtomicBool::new(false));
        let gate = Arc::new(Notify::new());

        let action = {
            let (in_flight, gate) = (in_flight.clone(), gate.clone());
            async move {
                in_flight.store(true, Ordering::SeqCst);
                gate.notified().await;
                in_flight.store(false, Ordering::SeqCst);
            }
        };
        let on_pending = {
            let (in_flight, seen, gate) = (in_flight.clone(), seen.clone(), gate.clone());
            async move {
                seen.store(in_flight.load(Ordering::SeqCst), Ordering::SeqCst);
                gate.notify_one();
            }
        };

        drive(action, on_pending).await;
        assert!(seen.load(Ordering::SeqCst));
        assert!(!in_flight.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_ready_action_skips_pending_hook() {
        let called = Arc::new(AtomicBool::new(false));
        let on_pending = {
            let called = called.clone();
            async move { called.store(true, Ordering::SeqCst) }
        };
        drive(async {}, on_pending).await;
        assert!(!called.load(Ordering::SeqCst));
    }
}
