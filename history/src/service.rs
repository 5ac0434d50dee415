//! Top-level history orchestration.

use std::sync::Arc;

use suiscope_classifier::classify_all;
use suiscope_rpc::{HttpTransport, LedgerQueryClient, RpcTransport};
use suiscope_types::{AccountId, ClassifiedTransaction, Endpoint};

use crate::config::{ConfigError, HistoryConfig};
use crate::error::{EndpointFailure, HistoryError};
use crate::resolver::EndpointResolver;
use crate::status::{HistoryStatus, StatusObserver, TracingObserver};

/// A classified history plus how it was obtained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryReport {
    pub endpoint: Endpoint,
    /// Number of digests the lookup returned.
    pub requested: usize,
    /// Digests dropped because their detail had no usable payload.
    pub omitted: usize,
    /// Endpoints that failed before `endpoint` answered.
    pub failures: Vec<EndpointFailure>,
    /// Classified transactions, in digest order (newest first).
    pub transactions: Vec<ClassifiedTransaction>,
}

/// Resolves and classifies the transaction history of an account.
pub struct TransactionHistoryService<T> {
    resolver: EndpointResolver<T>,
    observer: Arc<dyn StatusObserver>,
}

impl TransactionHistoryService<HttpTransport> {
    /// Build a service that talks HTTP to the configured endpoints.
    pub fn connect(config: &HistoryConfig) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(config.transport_options())
            .map_err(|e| ConfigError::Transport(e.to_string()))?;
        Self::from_config(config, transport)
    }
}

impl<T: RpcTransport> TransactionHistoryService<T> {
    pub fn new(resolver: EndpointResolver<T>) -> Self {
        Self {
            resolver,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Build a service over `transport` from a validated configuration.
    pub fn from_config(config: &HistoryConfig, transport: T) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = LedgerQueryClient::new(transport).with_direction(config.direction);
        let resolver = EndpointResolver::new(client, config.endpoint_list()?, config.limit);
        Ok(Self::new(resolver))
    }

    /// Replace the progress observer (defaults to [`TracingObserver`]).
    pub fn with_observer(mut self, observer: Arc<dyn StatusObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn resolver(&self) -> &EndpointResolver<T> {
        &self.resolver
    }

    /// The account's most recent transactions, classified, newest first.
    ///
    /// Transactions whose details could not be fetched are left out, so the
    /// result can be shorter than the digest list.
    pub async fn get_history(
        &self,
        account: &AccountId,
    ) -> Result<Vec<ClassifiedTransaction>, HistoryError> {
        Ok(self.get_history_report(account).await?.transactions)
    }

    /// Like [`get_history`](Self::get_history), with resolution metadata.
    pub async fn get_history_report(
        &self,
        account: &AccountId,
    ) -> Result<HistoryReport, HistoryError> {
        let resolution = self.resolver.resolve(account, self.observer.as_ref()).await?;
        let omitted = resolution.omitted();
        if omitted > 0 {
            tracing::warn!(
                endpoint = %resolution.endpoint.url,
                omitted,
                requested = resolution.requested,
                "some transaction details were unavailable"
            );
        }

        let transactions = classify_all(&resolution.details, account);
        self.observer.on_status(&HistoryStatus::Completed {
            classified: transactions.len(),
            omitted,
        });

        Ok(HistoryReport {
            endpoint: resolution.endpoint,
            requested: resolution.requested,
            omitted,
            failures: resolution.failures,
            transactions,
        })
    }
}
