//! Ordered endpoint fallback.
//!
//! Endpoints are tried strictly one at a time, in list order. The first
//! endpoint whose digest lookup and detail fetch both succeed wins; later
//! endpoints are never contacted. There is no retry against the same
//! endpoint and no racing, which keeps the number of outstanding requests
//! at one and avoids amplifying rate limits.

use suiscope_rpc::{DigestLookup, LedgerQueryClient, QueryError, RpcTransport};
use suiscope_types::{AccountId, Endpoint, TransactionDetail};

use crate::error::{EndpointFailure, HistoryError, QueryStage};
use crate::status::{HistoryStatus, StatusObserver};

/// The outcome of a successful resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// The endpoint that answered both queries.
    pub endpoint: Endpoint,
    /// Number of digests the lookup returned.
    pub requested: usize,
    /// Fetched details, in digest order. Digests without a usable payload
    /// are omitted.
    pub details: Vec<TransactionDetail>,
    /// Failures recorded on the endpoints tried before the winner.
    pub failures: Vec<EndpointFailure>,
}

impl Resolution {
    /// Digests whose detail could not be fetched.
    pub fn omitted(&self) -> usize {
        self.requested.saturating_sub(self.details.len())
    }
}

enum Attempt {
    Empty,
    Fetched {
        requested: usize,
        details: Vec<TransactionDetail>,
    },
}

pub struct EndpointResolver<T> {
    client: LedgerQueryClient<T>,
    endpoints: Vec<Endpoint>,
    limit: usize,
}

impl<T: RpcTransport> EndpointResolver<T> {
    pub fn new(client: LedgerQueryClient<T>, endpoints: Vec<Endpoint>, limit: usize) -> Self {
        Self {
            client,
            endpoints,
            limit,
        }
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn client(&self) -> &LedgerQueryClient<T> {
        &self.client
    }

    /// Walk the endpoint list until one endpoint serves the full query
    /// sequence for `account`.
    ///
    /// A valid empty digest lookup ends the walk with
    /// [`HistoryError::EmptyHistory`]; the detail fetch is not attempted.
    pub async fn resolve(
        &self,
        account: &AccountId,
        observer: &dyn StatusObserver,
    ) -> Result<Resolution, HistoryError> {
        let mut failures = Vec::new();

        for endpoint in &self.endpoints {
            observer.on_status(&HistoryStatus::QueryingEndpoint {
                endpoint: endpoint.clone(),
            });

            match self.attempt(endpoint, account, observer).await {
                Ok(Attempt::Empty) => {
                    tracing::info!(endpoint = %endpoint.url, account = %account, "empty history");
                    return Err(HistoryError::EmptyHistory {
                        account: account.clone(),
                    });
                }
                Ok(Attempt::Fetched { requested, details }) => {
                    tracing::info!(
                        endpoint = %endpoint.url,
                        requested,
                        fetched = details.len(),
                        skipped_endpoints = failures.len(),
                        "resolved transaction history"
                    );
                    return Ok(Resolution {
                        endpoint: endpoint.clone(),
                        requested,
                        details,
                        failures,
                    });
                }
                Err(failure) => {
                    tracing::warn!(
                        endpoint = %endpoint.url,
                        stage = %failure.stage,
                        error = %failure.error,
                        "endpoint failed, trying next"
                    );
                    observer.on_status(&HistoryStatus::EndpointFailed {
                        endpoint: endpoint.clone(),
                        reason: failure.error.to_string(),
                    });
                    failures.push(failure);
                }
            }
        }

        tracing::error!(attempted = failures.len(), "all ledger endpoints exhausted");
        Err(HistoryError::AllEndpointsExhausted { failures })
    }

    async fn attempt(
        &self,
        endpoint: &Endpoint,
        account: &AccountId,
        observer: &dyn StatusObserver,
    ) -> Result<Attempt, EndpointFailure> {
        let fail = |stage: QueryStage| {
            move |error: QueryError| EndpointFailure {
                endpoint: endpoint.clone(),
                stage,
                error,
            }
        };

        let digests = match self
            .client
            .list_transaction_digests(endpoint, account, self.limit)
            .await
            .map_err(fail(QueryStage::DigestLookup))?
        {
            DigestLookup::Empty => return Ok(Attempt::Empty),
            DigestLookup::Found(digests) => digests,
        };

        observer.on_status(&HistoryStatus::FetchingDetails {
            endpoint: endpoint.clone(),
            count: digests.len(),
        });

        let slots = self
            .client
            .fetch_transaction_details(endpoint, &digests)
            .await
            .map_err(fail(QueryStage::DetailFetch))?;

        Ok(Attempt::Fetched {
            requested: digests.len(),
            details: slots.into_iter().flatten().collect(),
        })
    }
}
