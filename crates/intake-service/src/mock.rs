//! Deterministic model service for tests and offline sessions

use crate::error::ServiceError;
use intake_domain::traits::ModelService;
use intake_domain::{AssumptionSet, ModelOutputs};
use std::future::{ready, Future};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock model service returning canned outputs
///
/// Returns a pre-configured answer without any network calls. Clones share
/// their call counter and request log.
///
/// # Examples
///
/// ```
/// use intake_service::MockModelService;
///
/// let service = MockModelService::with_metrics([("irr", 0.12), ("dscr", 1.4)]);
/// assert_eq!(service.call_count(), 0);
///
/// let failing = MockModelService::failing("Invalid value for rent.");
/// assert_eq!(failing.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockModelService {
    outcome: Result<ModelOutputs, String>,
    call_count: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<AssumptionSet>>>,
}

impl MockModelService {
    /// Always answer with `outputs`
    pub fn new(outputs: ModelOutputs) -> Self {
        Self {
            outcome: Ok(outputs),
            call_count: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Always answer with the given headline metrics
    pub fn with_metrics<'a>(metrics: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let metrics = metrics
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        Self::new(ModelOutputs {
            metrics,
            document: "{}".to_string(),
        })
    }

    /// Always reject with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            ..Self::default()
        }
    }

    /// Get the number of times compute was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }

    /// The assumption set of the most recent call
    pub fn last_request(&self) -> Option<AssumptionSet> {
        self.last_request.lock().ok().and_then(|guard| guard.clone())
    }
}

impl Default for MockModelService {
    fn default() -> Self {
        Self::new(ModelOutputs::default())
    }
}

impl ModelService for MockModelService {
    type Error = ServiceError;

    fn compute(
        &self,
        assumptions: &AssumptionSet,
    ) -> impl Future<Output = Result<ModelOutputs, Self::Error>> + Send {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(assumptions.clone());
        }
        ready(self.outcome.clone().map_err(ServiceError::Rejected))
    }
}
