//! Progress reporting.
//!
//! The core never owns a presentation surface; it reports what it is doing
//! through a [`StatusObserver`] supplied by the caller.

use std::fmt;

use suiscope_types::Endpoint;

/// A progress event emitted while resolving a history request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryStatus {
    QueryingEndpoint { endpoint: Endpoint },
    EndpointFailed { endpoint: Endpoint, reason: String },
    FetchingDetails { endpoint: Endpoint, count: usize },
    Completed { classified: usize, omitted: usize },
}

impl fmt::Display for HistoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueryingEndpoint { endpoint } => {
                write!(f, "querying {}", endpoint.url)
            }
            Self::EndpointFailed { endpoint, reason } => {
                write!(f, "{} failed: {reason}; trying next endpoint", endpoint.url)
            }
            Self::FetchingDetails { endpoint, count } => {
                write!(f, "fetching {count} transactions from {}", endpoint.url)
            }
            Self::Completed {
                classified,
                omitted: 0,
            } => write!(f, "loaded {classified} transactions"),
            Self::Completed {
                classified,
                omitted,
            } => write!(
                f,
                "loaded {classified} transactions ({omitted} unavailable)"
            ),
        }
    }
}

/// Receives progress events. Implemented for any `Fn(&HistoryStatus)`.
pub trait StatusObserver: Send + Sync {
    fn on_status(&self, status: &HistoryStatus);
}

impl<F> StatusObserver for F
where
    F: Fn(&HistoryStatus) + Send + Sync,
{
    fn on_status(&self, status: &HistoryStatus) {
        self(status)
    }
}

/// Forwards progress events to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl StatusObserver for TracingObserver {
    fn on_status(&self, status: &HistoryStatus) {
        match status {
            HistoryStatus::EndpointFailed { .. } => tracing::warn!("{status}"),
            _ => tracing::info!("{status}"),
        }
    }
}

/// Discards progress events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl StatusObserver for NullObserver {
    fn on_status(&self, _status: &HistoryStatus) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn closures_are_observers() {
        let seen = Mutex::new(Vec::new());
        let observer = |status: &HistoryStatus| seen.lock().unwrap().push(status.to_string());
        observer.on_status(&HistoryStatus::Completed {
            classified: 3,
            omitted: 0,
        });
        assert_eq!(*seen.lock().unwrap(), vec!["loaded 3 transactions"]);
    }

    #[test]
    fn completed_mentions_unavailable_entries() {
        let status = HistoryStatus::Completed {
            classified: 47,
            omitted: 3,
        };
        assert_eq!(status.to_string(), "loaded 47 transactions (3 unavailable)");
    }
}
