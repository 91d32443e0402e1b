//! Cancellable search-input debounce.
//!
//! Each submitted value resets the single pending timer; only the value that
//! survives the delay without being superseded is emitted for fetching.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;

/// Default settle time before a search input triggers a fetch.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(600);

/// Sending half: feed it every keystroke/value as it happens.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Debouncer<T> {
    /// Returns false once the debounce task has shut down.
    pub fn submit(&self, value: T) -> bool {
        self.tx.send(value).is_ok()
    }
}

/// Spawn the debounce task. Values read from the returned receiver are the
/// survivors; a burst of submissions inside `delay` yields only its last one.
pub fn debounce<T: Send + 'static>(delay: Duration) -> (Debouncer<T>, mpsc::UnboundedReceiver<T>) {
    let (in_tx, mut in_rx) = mpsc::unbounded_channel::<T>();
    let (out_tx, out_rx) = mpsc::unbounded_channel::<T>();

    tokio::spawn(async move {
        while let Some(mut pending) = in_rx.recv().await {
            loop {
                tokio::select! {
                    next = in_rx.recv() => match next {
                        // A newer submission supersedes the pending one and
                        // restarts the timer.
                        Some(value) => pending = value,
                        None => {
                            let _ = out_tx.send(pending);
                            return;
                        }
                    },
                    () = sleep(delay) => {
                        let _ = out_tx.send(pending);
                        break;
                    }
                }
            }
        }
    });

    (Debouncer { tx: in_tx }, out_rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn burst_collapses_to_the_last_value() {
        let (debouncer, mut out) = debounce::<&str>(Duration::from_millis(30));

        debouncer.submit("M");
        debouncer.submit("Mu");
        debouncer.submit("Mumbai");

        assert_eq!(out.recv().await, Some("Mumbai"));

        // Nothing else was pending.
        sleep(Duration::from_millis(60)).await;
        assert!(out.try_recv().is_err());
    }

    #[tokio::test]
    async fn values_spaced_beyond_the_delay_all_survive() {
        let (debouncer, mut out) = debounce::<&str>(Duration::from_millis(20));

        debouncer.submit("Delhi");
        assert_eq!(out.recv().await, Some("Delhi"));

        debouncer.submit("Mumbai");
        assert_eq!(out.recv().await, Some("Mumbai"));
    }

    #[tokio::test]
    async fn dropping_the_handle_flushes_the_pending_value() {
        let (debouncer, mut out) = debounce::<&str>(Duration::from_secs(60));

        debouncer.submit("Chennai");
        drop(debouncer);

        assert_eq!(out.recv().await, Some("Chennai"));
        assert_eq!(out.recv().await, None);
    }
}
