//! Periodic unlock polling for the payment screen.

use std::time::Duration;

use tokio::task::JoinHandle;

use super::controller::Controller;

/// How often the payment screen re-asks the scoring API for the unlock.
pub const POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Cancellable periodic unlock check, bound to the payment screen: started
/// on entry, stopped on every exit path.
#[derive(Default)]
pub struct UnlockPoller {
    handle: Option<JoinHandle<()>>,
}

impl UnlockPoller {
    /// Start polling: one check immediately, then on a fixed interval. Any
    /// previous task is cancelled first.
    pub fn start(&mut self, controller: Controller) {
        self.stop();
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(POLL_INTERVAL);
            loop {
                // The first tick completes immediately.
                interval.tick().await;
                controller.check_unlock(false).await;
            }
        }));
    }

    /// Cancel the polling task if one is running.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    #[allow(dead_code)]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for UnlockPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
