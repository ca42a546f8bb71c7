//! Background jobs polled from the GUI thread.
//!
//! Each job runs on its own thread with a current-thread Tokio runtime and
//! reports once over a std channel. Dropping the job before it finishes
//! discards the result: the worker's send fails and is ignored.

use anyhow::{anyhow, Result};
use std::future::Future;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use tokio::runtime::Builder;

/// Helper struct for async jobs - polls a background task
pub struct AsyncJob<T> {
    receiver: Option<Receiver<T>>,
}

impl<T: Send + 'static> AsyncJob<T> {
    /// Run the future built by `builder` on a fresh worker thread
    pub fn spawn<FutBuilder, Fut>(builder: FutBuilder) -> Self
    where
        FutBuilder: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = T> + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => {
                    let output = runtime.block_on(builder());
                    // Receiver may be gone if the widget was torn down
                    let _ = tx.send(output);
                }
                Err(e) => tracing::error!("Failed to create async runtime: {}", e),
            }
        });
        Self::new(rx)
    }
}

impl<T> AsyncJob<T> {
    /// Create a new async job with the given receiver
    pub fn new(receiver: Receiver<T>) -> Self {
        Self {
            receiver: Some(receiver),
        }
    }

    /// Poll the job for completion
    /// Returns Some(result) if the job has completed, None if still running
    pub fn poll(&mut self) -> Option<Result<T>> {
        if let Some(rx) = &self.receiver {
            match rx.try_recv() {
                Ok(res) => {
                    self.receiver = None;
                    return Some(Ok(res));
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    self.receiver = None;
                    return Some(Err(anyhow!("Worker task disconnected")));
                }
            }
        }
        None
    }

    /// Check if the job is still running
    pub fn is_running(&self) -> bool {
        self.receiver.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for<T>(job: &mut AsyncJob<T>) -> Result<T> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(res) = job.poll() {
                return res;
            }
            assert!(Instant::now() < deadline, "job did not finish");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_job_reports_output() {
        let mut job = AsyncJob::spawn(|| async { 40 + 2 });
        assert_eq!(wait_for(&mut job).unwrap(), 42);
        assert!(!job.is_running());
        assert!(job.poll().is_none());
    }

    #[test]
    fn test_disconnected_worker_is_an_error() {
        let (tx, rx) = mpsc::channel::<u32>();
        drop(tx);
        let mut job = AsyncJob::new(rx);
        let err = job.poll().unwrap().unwrap_err();
        assert!(err.to_string().contains("disconnected"));
    }

    #[test]
    fn test_dropping_pending_job_is_silent() {
        let job = AsyncJob::spawn(|| async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            "late"
        });
        assert!(job.is_running());
        drop(job);
        // Worker finishes after the receiver is gone; nothing may panic
        thread::sleep(Duration::from_millis(150));
    }
}
