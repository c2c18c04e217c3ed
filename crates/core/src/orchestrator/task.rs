use std::future::Future;
use tokio::task::{JoinError, JoinHandle};

use crate::error::{Error, Result};

/// A background build, run or debug dispatched by the orchestrator.
///
/// Its failures have already been reported to the user by the time
/// [`TaskHandle::join`] returns them.
#[derive(Debug)]
pub struct TaskHandle {
    name: &'static str,
    handle: JoinHandle<Result<()>>,
}

impl TaskHandle {
    pub(crate) fn spawn<F>(name: &'static str, future: F) -> Self
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        tracing::debug!("Dispatching {name} task");
        Self {
            name,
            handle: tokio::spawn(future),
        }
    }

    pub async fn join(self) -> Result<()> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(Error::Runtime(join_failure(&format!("{} task", self.name), e))),
        }
    }
}

/// Run `future` on its own task so that a panic inside it comes back as an
/// error the caller can report, instead of unwinding through the caller.
pub(crate) async fn catch_panic<T, F>(what: &str, future: F) -> Result<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T>> + Send + 'static,
{
    match tokio::spawn(future).await {
        Ok(result) => result,
        Err(e) => Err(Error::Runtime(join_failure(what, e))),
    }
}

fn join_failure(what: &str, error: JoinError) -> String {
    if !error.is_panic() {
        return format!("{what} was cancelled");
    }
    let payload = error.into_panic();
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("{what} panicked: {message}")
}

/// Runs the wrapped action when dropped, including during unwinding.
pub(crate) struct Deferred<F: FnOnce()> {
    action: Option<F>,
}

impl<F: FnOnce()> Deferred<F> {
    pub(crate) fn new(action: F) -> Self {
        Self {
            action: Some(action),
        }
    }
}

impl<F: FnOnce()> Drop for Deferred<F> {
    fn drop(&mut self) {
        if let Some(action) = self.action.take() {
            action();
        }
    }
}
