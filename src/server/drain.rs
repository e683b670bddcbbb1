// Shutdown drain module
// Waits for in-flight connections once the listener has been closed

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Wait until `conn_counter` reaches zero or `grace` elapses.
///
/// Connection tasks are told to finish through the shutdown signal; this only
/// bounds how long the process waits for them. Returns the number of
/// connections still open when the wait ended.
pub async fn drain_connections(conn_counter: &AtomicUsize, grace: Duration) -> usize {
    let deadline = Instant::now() + grace;

    loop {
        let active = conn_counter.load(Ordering::SeqCst);
        if active == 0 || Instant::now() >= deadline {
            return active;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_idle_server_drains_immediately() {
        let counter = AtomicUsize::new(0);
        assert_eq!(drain_connections(&counter, Duration::from_secs(5)).await, 0);
    }

    #[tokio::test]
    async fn test_waits_for_connection_to_finish() {
        let counter = Arc::new(AtomicUsize::new(1));
        let finishing = Arc::clone(&counter);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            finishing.fetch_sub(1, Ordering::SeqCst);
        });

        assert_eq!(drain_connections(&counter, Duration::from_secs(5)).await, 0);
    }

    #[tokio::test]
    async fn test_gives_up_after_grace_period() {
        let counter = AtomicUsize::new(2);
        let started = Instant::now();
        assert_eq!(drain_connections(&counter, Duration::from_millis(50)).await, 2);
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
