// Per-request transaction lifecycle
use crate::error::{ConfiguratorError, Result};
use configurator_storage::{ConfiguratorStorage, RequestContext, StorageFactory, TxOptions};
use error_common::{log_error, ErrorContext};
use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxMode {
    /// Pure loads
    ReadOnly,
    /// Anything that mutates
    ReadWrite,
}

impl TxMode {
    pub fn options(self) -> TxOptions {
        match self {
            TxMode::ReadOnly => TxOptions::read_only(),
            TxMode::ReadWrite => TxOptions::read_write(),
        }
    }
}

/// Opens one storage transaction per request and ends it exactly once.
///
/// ```ignore
/// let ids = orchestrator
///     .execute(&ctx, TxMode::ReadOnly, "list_network_ids", |store| {
///         Box::pin(async move {
///             let networks = store.load_all_networks(&NetworkLoadCriteria::default()).await?;
///             Ok::<_, ConfiguratorError>(networks.into_iter().map(|n| n.id).collect::<Vec<_>>())
///         })
///     })
///     .await?;
/// ```
#[derive(Clone)]
pub struct TransactionOrchestrator {
    factory: Arc<dyn StorageFactory>,
}

impl TransactionOrchestrator {
    pub fn new(factory: Arc<dyn StorageFactory>) -> Self {
        Self { factory }
    }

    /// Open a transaction. Failure is returned as is, there is nothing to
    /// roll back.
    pub async fn begin(
        &self,
        ctx: &RequestContext,
        mode: TxMode,
        operation: &'static str,
    ) -> Result<TxScope> {
        let store = self
            .factory
            .start_transaction(ctx, mode.options())
            .await
            .map_err(|source| {
                let error = ConfiguratorError::TransactionOpen(source);
                log_error(&error_context(ctx.request_id, operation), &error);
                error
            })?;

        debug!(request_id = %ctx.request_id, operation, ?mode, "Opened transaction");
        Ok(TxScope {
            store,
            request_id: ctx.request_id,
            operation,
            finished: false,
        })
    }

    /// Run `handler` inside a fresh transaction: commit on success, roll back
    /// on error.
    #[tracing::instrument(
        skip_all,
        fields(
            request_id = %ctx.request_id,
            operation = operation,
            caller = ctx.caller.as_deref().unwrap_or("")
        )
    )]
    pub async fn execute<T, F>(
        &self,
        ctx: &RequestContext,
        mode: TxMode,
        operation: &'static str,
        handler: F,
    ) -> Result<T>
    where
        T: Send,
        F: for<'a> FnOnce(&'a mut dyn ConfiguratorStorage) -> BoxFuture<'a, Result<T>> + Send,
    {
        let mut scope = self.begin(ctx, mode, operation).await?;
        let outcome = handler(scope.store_mut()).await;
        scope.finish(outcome).await
    }
}

impl std::fmt::Debug for TransactionOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionOrchestrator").finish_non_exhaustive()
    }
}

/// An open transaction owned by one request.
///
/// [`finish`](Self::finish) consumes the scope and issues the single commit or
/// rollback. A scope dropped unfinished (cancelled request) is only logged; the
/// backend discards the transaction when it is dropped.
pub struct TxScope {
    store: Box<dyn ConfiguratorStorage>,
    request_id: Uuid,
    operation: &'static str,
    finished: bool,
}

impl TxScope {
    pub fn store_mut(&mut self) -> &mut dyn ConfiguratorStorage {
        self.store.as_mut()
    }

    /// Commit if `outcome` is `Ok`, roll back otherwise.
    ///
    /// A commit failure becomes the request's error. A rollback failure is
    /// logged and the original error is returned.
    pub async fn finish<T>(mut self, outcome: Result<T>) -> Result<T> {
        match outcome {
            Ok(value) => {
                let committed = self.store.commit().await;
                self.finished = true;
                match committed {
                    Ok(()) => {
                        info!(request_id = %self.request_id, operation = self.operation, "Committed transaction");
                        Ok(value)
                    }
                    Err(source) => {
                        let error = ConfiguratorError::Commit(source);
                        log_error(&error_context(self.request_id, self.operation), &error);
                        Err(error)
                    }
                }
            }
            Err(error) => {
                warn!(
                    request_id = %self.request_id,
                    operation = self.operation,
                    error = %error,
                    "Rolling back transaction"
                );
                let rolled_back = self.store.rollback().await;
                self.finished = true;
                if let Err(rollback_error) = rolled_back {
                    let ctx = error_context(self.request_id, self.operation)
                        .add_context("phase", "rollback")
                        .add_context("original_error", error.to_string());
                    log_error(&ctx, &rollback_error);
                }
                Err(error)
            }
        }
    }
}

impl Drop for TxScope {
    fn drop(&mut self) {
        if !self.finished {
            warn!(
                request_id = %self.request_id,
                operation = self.operation,
                "Transaction dropped without commit or rollback"
            );
        }
    }
}

fn error_context(request_id: Uuid, operation: &str) -> ErrorContext {
    ErrorContext::new()
        .with_request_id(request_id)
        .with_operation(operation)
}
