//! Forward steps with registered compensations.
//!
//! When a step fails, every compensation registered so far runs once, in
//! reverse registration order. A failing compensation is logged and does
//! not replace the step's error.

use std::future::Future;

use futures::future::BoxFuture;
use tracing::{debug, error, warn};

use rolehub_core::error::AppError;
use rolehub_core::result::AppResult;

type Compensation = Box<dyn FnOnce() -> BoxFuture<'static, AppResult<()>> + Send>;

/// A multi-step flow that can be rolled back.
pub struct Saga {
    name: &'static str,
    compensations: Vec<(&'static str, Compensation)>,
}

impl std::fmt::Debug for Saga {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Saga")
            .field("name", &self.name)
            .field("pending_compensations", &self.compensations.len())
            .finish()
    }
}

impl Saga {
    /// Start a saga.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            compensations: Vec::new(),
        }
    }

    /// Register the undo action for a step that has committed.
    pub fn register_compensation<F, Fut>(&mut self, label: &'static str, undo: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = AppResult<()>> + Send + 'static,
    {
        self.compensations
            .push((label, Box::new(move || Box::pin(undo()))));
    }

    /// Run a forward step. On failure the saga unwinds before the error is
    /// returned.
    pub async fn step<T, Fut>(&mut self, label: &'static str, action: Fut) -> AppResult<T>
    where
        Fut: Future<Output = AppResult<T>>,
    {
        match action.await {
            Ok(value) => {
                debug!(saga = self.name, step = label, "Saga step committed");
                Ok(value)
            }
            Err(err) => {
                warn!(
                    saga = self.name,
                    step = label,
                    error = %err,
                    "Saga step failed, compensating"
                );
                self.unwind().await;
                Err(err)
            }
        }
    }

    /// Finish successfully, discarding the compensations.
    pub fn complete(mut self) {
        debug!(saga = self.name, "Saga completed");
        self.compensations.clear();
    }

    /// Number of compensations that would run on failure.
    pub fn pending(&self) -> usize {
        self.compensations.len()
    }

    async fn unwind(&mut self) {
        while let Some((label, undo)) = self.compensations.pop() {
            match undo().await {
                Ok(()) => warn!(saga = self.name, compensation = label, "Compensation applied"),
                Err(err) => log_compensation_failure(self.name, label, &err),
            }
        }
    }
}

fn log_compensation_failure(saga: &str, label: &str, err: &AppError) {
    error!(
        saga = saga,
        compensation = label,
        error = %err,
        "Compensation failed; manual cleanup may be required"
    );
}
