use thiserror::Error;
use tracing::debug;

use super::models::{Field, FormData, Touched};
use super::payload::PredictionRequest;
use crate::history::HistoryEntry;
use crate::validation::{validate_all_fields, ValidationErrors};

/// Reasons a submission does not reach the prediction service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please fix validation errors before submitting")]
    Invalid(ValidationErrors),

    #[error("Please fill in all mandatory fields: {}", join_fields(.0))]
    MissingFields(Vec<Field>),

    #[error("A prediction is already in progress")]
    Busy,
}

fn join_fields(fields: &[Field]) -> String {
    fields.iter().map(Field::as_str).collect::<Vec<_>>().join(", ")
}

/// Form state: values, touched fields, current errors, loading flag and the
/// error banner. Errors are recomputed after every change.
#[derive(Debug, Clone)]
pub struct FormController {
    data: FormData,
    touched: Touched,
    errors: ValidationErrors,
    loading: bool,
    banner: Option<String>,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    pub fn new() -> Self {
        Self::with_data(FormData::default())
    }

    pub fn with_data(data: FormData) -> Self {
        let errors = validate_all_fields(&data);
        Self {
            data,
            touched: Touched::new(),
            errors,
            loading: false,
            banner: None,
        }
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn value(&self, field: Field) -> &str {
        self.data.get(field)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn touched(&self) -> &Touched {
        &self.touched
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Stores a new value, marks the field touched and re-validates.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.data.set(field, value);
        self.touched.insert(field);
        self.revalidate();
    }

    /// Marks a field touched without changing it (focus lost).
    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
    }

    /// The field's error, shown only once the user has touched it.
    pub fn visible_error(&self, field: Field) -> Option<&str> {
        if !self.touched.contains(&field) {
            return None;
        }
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_field_invalid(&self, field: Field) -> bool {
        self.visible_error(field).is_some()
    }

    /// Mandatory fields that are still empty, in form order.
    pub fn missing_mandatory(&self) -> Vec<Field> {
        Field::MANDATORY
            .iter()
            .copied()
            .filter(|f| !self.data.is_set(*f))
            .collect()
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && self.errors.is_empty() && self.missing_mandatory().is_empty()
    }

    /// Starts a submission.
    ///
    /// Every field becomes touched so all errors show. On success the form is
    /// in the loading state until [`FormController::finish_submit`] is called.
    pub fn begin_submit(&mut self) -> Result<PredictionRequest, SubmitError> {
        if self.loading {
            return Err(SubmitError::Busy);
        }

        self.banner = None;
        self.touched.extend(Field::ALL);

        let outcome = if !self.errors.is_empty() {
            Err(SubmitError::Invalid(self.errors.clone()))
        } else {
            let missing = self.missing_mandatory();
            if missing.is_empty() {
                Ok(PredictionRequest::from_form(&self.data))
            } else {
                Err(SubmitError::MissingFields(missing))
            }
        };

        match &outcome {
            Ok(_) => self.loading = true,
            Err(e) => {
                debug!(error = %e, "Submission blocked");
                self.banner = Some(e.to_string());
            }
        }
        outcome
    }

    /// Ends a submission. A failure message goes to the banner.
    pub fn finish_submit(&mut self, failure: Option<String>) {
        self.loading = false;
        self.banner = failure;
    }

    pub fn dismiss_error(&mut self) {
        self.banner = None;
    }

    /// Refills the form from a stored prediction's input.
    pub fn load_entry(&mut self, entry: &HistoryEntry) {
        self.data = entry.input.to_form();
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.errors = validate_all_fields(&self.data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormController {
        let mut form = FormController::new();
        form.set_field(Field::GrLivArea, "1500");
        form.set_field(Field::FirstFlrSF, "1500");
        form.set_field(Field::LotArea, "8000");
        form
    }

    #[test]
    fn errors_only_visible_when_touched() {
        let mut data = FormData::default();
        data.set(Field::Neighborhood, "Nowhere");
        let mut form = FormController::with_data(data);

        assert!(form.errors().contains_key(&Field::Neighborhood));
        assert_eq!(form.visible_error(Field::Neighborhood), None);

        form.touch(Field::Neighborhood);
        assert_eq!(form.visible_error(Field::Neighborhood), Some("Invalid neighborhood selected"));
        assert!(form.is_field_invalid(Field::Neighborhood));
    }

    #[test]
    fn every_change_revalidates() {
        let mut form = filled();
        assert!(form.errors().is_empty());

        form.set_field(Field::LotArea, "1000");
        assert!(form.visible_error(Field::LotArea).is_some());

        form.set_field(Field::LotArea, "9000");
        assert_eq!(form.visible_error(Field::LotArea), None);
    }

    #[test]
    fn submit_blocked_by_validation_errors() {
        let mut form = filled();
        form.set_field(Field::GarageArea, "1200");
        form.set_field(Field::GarageCars, "2");

        let err = form.begin_submit().unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(_)));
        assert_eq!(form.banner(), Some("Please fix validation errors before submitting"));
        assert!(!form.is_loading());
    }

    #[test]
    fn submit_blocked_by_missing_fields() {
        let mut form = FormController::new();
        let err = form.begin_submit().unwrap_err();

        assert_eq!(
            err,
            SubmitError::MissingFields(vec![Field::GrLivArea, Field::FirstFlrSF, Field::LotArea])
        );
        assert_eq!(
            form.banner(),
            Some("Please fill in all mandatory fields: GrLivArea, FirstFlrSF, LotArea")
        );
        assert_eq!(form.touched().len(), Field::ALL.len());
    }

    #[test]
    fn successful_begin_sets_loading_and_blocks_resubmit() {
        let mut form = filled();
        let request = form.begin_submit().unwrap();

        assert_eq!(request.first_flr_sf, Some(1500));
        assert_eq!(request.second_flr_sf, None);
        assert!(form.is_loading());
        assert!(!form.can_submit());
        assert_eq!(form.begin_submit(), Err(SubmitError::Busy));

        form.finish_submit(Some("Prediction failed".to_string()));
        assert!(!form.is_loading());
        assert_eq!(form.banner(), Some("Prediction failed"));

        form.dismiss_error();
        assert_eq!(form.banner(), None);
        assert!(form.can_submit());
    }

    #[test]
    fn submitted_payload_nulls_optional_numbers_and_aliases_floors() {
        let mut form = FormController::new();
        for field in Field::ALL.iter().filter(|f| !f.is_mandatory()) {
            form.set_field(*field, "");
        }
        form.set_field(Field::GrLivArea, "1200");
        form.set_field(Field::FirstFlrSF, "1200");
        form.set_field(Field::LotArea, "9000");

        let wire = form.begin_submit().unwrap().to_wire().unwrap();
        for field in Field::INTEGER.iter().filter(|f| !f.is_mandatory()) {
            let key = match field {
                Field::SecondFlrSF => "2ndFlrSF",
                other => other.as_str(),
            };
            assert!(wire[key].is_null(), "{key} should be null");
        }
        assert_eq!(wire["1stFlrSF"], serde_json::Value::from(1200));
        assert!(wire.get("FirstFlrSF").is_none());
        assert!(wire.get("SecondFlrSF").is_none());
        assert_eq!(wire["Electrical"], serde_json::Value::Null);
    }

    #[test]
    fn load_entry_restores_input() {
        let mut form = filled();
        let request = form.begin_submit().unwrap();
        form.finish_submit(None);

        let entry = HistoryEntry {
            id: 1,
            timestamp: "2024-01-01T00:00:00.000Z".to_string(),
            input: request,
            prediction: 150_000.0,
        };

        let mut fresh = FormController::new();
        fresh.load_entry(&entry);
        assert_eq!(fresh.value(Field::LotArea), "8000");
        assert_eq!(fresh.value(Field::Neighborhood), "NAmes");
        assert!(fresh.errors().is_empty());
    }
}
