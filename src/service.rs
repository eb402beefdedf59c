use serde_json::Value;
use tracing::{error, info, warn};

use crate::form::{FormController, PredictionRequest};
use crate::history::{HistoryEntry, HistoryStore};
use crate::predictor::{PredictionClient, PredictionError, PredictionResult};
use crate::storage::{KeyValueStore, StorageError};

/// Why a submit produced no new estimate. Displays as the banner text.
#[derive(Debug, thiserror::Error)]
pub enum SubmitFailure {
    #[error(transparent)]
    Blocked(#[from] crate::form::SubmitError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

/// Top-level state: the form, the latest estimate and the history.
pub struct EstimatorService<S> {
    client: PredictionClient,
    form: FormController,
    history: HistoryStore<S>,
    prediction: Option<PredictionResult>,
}

impl<S: KeyValueStore> EstimatorService<S> {
    pub fn new(client: PredictionClient, store: S) -> Self {
        Self {
            client,
            form: FormController::new(),
            history: HistoryStore::load(store),
            prediction: None,
        }
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormController {
        &mut self.form
    }

    pub fn history(&self) -> &HistoryStore<S> {
        &self.history
    }

    /// The estimate from the last successful submit in this session.
    pub fn prediction(&self) -> Option<&PredictionResult> {
        self.prediction.as_ref()
    }

    /// Validates, requests a prediction and records it.
    ///
    /// On failure the message is left in the form's banner and the previous
    /// prediction and history are untouched.
    pub async fn submit(&mut self) -> Result<PredictionResult, SubmitFailure> {
        let request = self.form.begin_submit()?;

        match self.client.predict(&request).await {
            Ok(result) => {
                self.form.finish_submit(None);
                self.on_prediction(result, request);
                Ok(result)
            }
            Err(e) => {
                warn!(error = %e, "Prediction request failed");
                self.form.finish_submit(Some(e.to_string()));
                Err(e.into())
            }
        }
    }

    fn on_prediction(&mut self, result: PredictionResult, request: PredictionRequest) {
        info!(price = result.predicted_price, "Prediction succeeded");
        self.prediction = Some(result);

        // history write failures are logged, the estimate stands
        if let Err(e) = self.history.record(&result, request) {
            error!(error = %e, "Failed to persist prediction history");
        }
    }

    /// Puts a stored entry's input back into the form.
    pub fn load_history_entry(&mut self, id: i64) -> Option<&HistoryEntry> {
        let entry = self.history.get(id)?;
        self.form.load_entry(entry);
        Some(entry)
    }

    pub fn clear_history(&mut self) -> Result<(), StorageError> {
        self.history.clear()
    }

    pub async fn health(&self) -> Result<Value, PredictionError> {
        self.client.check_health().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{Field, SubmitError};
    use crate::history::HISTORY_KEY;
    use crate::predictor::client::test_server::{closed_address, serve_once};
    use crate::storage::MemoryStore;

    fn service_at(url: &str) -> EstimatorService<MemoryStore> {
        EstimatorService::new(PredictionClient::new(url, None).unwrap(), MemoryStore::new())
    }

    fn fill(service: &mut EstimatorService<MemoryStore>) {
        let form = service.form_mut();
        form.set_field(Field::GrLivArea, "1500");
        form.set_field(Field::FirstFlrSF, "1000");
        form.set_field(Field::SecondFlrSF, "500");
        form.set_field(Field::LotArea, "8000");
    }

    #[tokio::test]
    async fn successful_submit_records_history() {
        let (url, _server) = serve_once(200, r#"{"predicted_price": 210000}"#).await;
        let mut service = service_at(&url);
        fill(&mut service);

        let result = service.submit().await.unwrap();
        assert_eq!(result.predicted_price, 210_000.0);
        assert_eq!(service.prediction(), Some(&result));
        assert_eq!(service.history().len(), 1);
        assert_eq!(service.history().latest().unwrap().input.second_flr_sf, Some(500));
        assert!(service.history().store().contains_key(HISTORY_KEY));
        assert!(!service.form().is_loading());
        assert_eq!(service.form().banner(), None);
    }

    #[tokio::test]
    async fn failed_submit_keeps_previous_state() {
        let (url, _server) = serve_once(200, r#"{"predicted_price": 150000}"#).await;
        let mut service = service_at(&url);
        fill(&mut service);
        service.submit().await.unwrap();

        service.client = PredictionClient::new(&closed_address().await, None).unwrap();
        let err = service.submit().await.unwrap_err();

        assert!(matches!(err, SubmitFailure::Prediction(PredictionError::Unreachable(_))));
        assert_eq!(
            service.form().banner(),
            Some("Unable to connect to server. Please ensure the backend is running.")
        );
        assert_eq!(service.prediction().map(|p| p.predicted_price), Some(150_000.0));
        assert_eq!(service.history().len(), 1);
        assert!(!service.form().is_loading());
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_service() {
        let url = closed_address().await;
        let mut service = service_at(&url);

        let err = service.submit().await.unwrap_err();
        assert!(matches!(err, SubmitFailure::Blocked(SubmitError::MissingFields(_))));
        assert!(service.history().is_empty());
    }

    #[tokio::test]
    async fn history_entry_can_be_reloaded_and_cleared() {
        let (url, _server) = serve_once(200, r#"{"predicted_price": 99000}"#).await;
        let mut service = service_at(&url);
        fill(&mut service);
        service.submit().await.unwrap();
        let id = service.history().latest().unwrap().id;

        service.form_mut().set_field(Field::LotArea, "");
        assert!(service.load_history_entry(id).is_some());
        assert_eq!(service.form().value(Field::LotArea), "8000");
        assert!(service.load_history_entry(id + 1).is_none());

        service.clear_history().unwrap();
        assert!(service.history().is_empty());
        assert!(!service.history().store().contains_key(HISTORY_KEY));
    }
}
