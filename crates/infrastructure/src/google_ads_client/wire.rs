//! JSON shapes of the Google Ads REST interface.

use serde::Deserialize;
use updatemate_core::{UpstreamFieldError, UpstreamRejection};
use updatemate_domain::ChangeEvent;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListAccessibleCustomersResponse {
    #[serde(default)]
    pub(super) resource_names: Vec<String>,
}

/// One element of a `searchStream` response array.
///
/// A stream that fails midway ends with an error element instead of a batch.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum SearchStreamItem {
    Failure(ErrorEnvelope),
    Batch(SearchStreamBatch),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SearchStreamBatch {
    #[serde(default)]
    pub(super) results: Vec<GoogleAdsRow>,
    #[serde(default)]
    pub(super) request_id: Option<String>,
}

impl SearchStreamBatch {
    pub(super) fn into_events(self) -> impl Iterator<Item = ChangeEvent> {
        self.results
            .into_iter()
            .filter_map(|row| row.change_event)
            .map(ChangeEventRow::into_event)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GoogleAdsRow {
    #[serde(default)]
    change_event: Option<ChangeEventRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChangeEventRow {
    #[serde(default)]
    change_date_time: String,
    #[serde(default)]
    user_email: String,
    #[serde(default)]
    client_type: String,
    #[serde(default)]
    change_resource_type: String,
    #[serde(default)]
    change_resource_name: String,
}

impl ChangeEventRow {
    fn into_event(self) -> ChangeEvent {
        ChangeEvent::new(
            self.change_date_time,
            self.user_email,
            self.client_type,
            self.change_resource_type,
            self.change_resource_name,
        )
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelope {
    error: ApiStatus,
}

#[derive(Debug, Deserialize)]
struct ApiStatus {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    #[serde(default)]
    errors: Vec<GoogleAdsError>,
    #[serde(default)]
    request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleAdsError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    location: Option<ErrorLocation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorLocation {
    #[serde(default)]
    field_path_elements: Vec<FieldPathElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldPathElement {
    field_name: String,
    #[serde(default)]
    index: Option<i64>,
}

impl ErrorLocation {
    fn field_path(&self) -> Option<String> {
        if self.field_path_elements.is_empty() {
            return None;
        }

        let segments: Vec<String> = self
            .field_path_elements
            .iter()
            .map(|element| match element.index {
                Some(index) => format!("{}[{index}]", element.field_name),
                None => element.field_name.clone(),
            })
            .collect();

        Some(segments.join("."))
    }
}

impl ErrorEnvelope {
    pub(super) fn into_rejection(self) -> UpstreamRejection {
        let request_id = self
            .error
            .details
            .iter()
            .find_map(|detail| detail.request_id.clone());

        let mut errors: Vec<UpstreamFieldError> = self
            .error
            .details
            .iter()
            .flat_map(|detail| detail.errors.iter())
            .map(|error| {
                UpstreamFieldError::new(
                    error
                        .message
                        .clone()
                        .unwrap_or_else(|| "unspecified error".to_owned()),
                    error.location.as_ref().and_then(ErrorLocation::field_path),
                )
            })
            .collect();

        if errors.is_empty() {
            errors.push(UpstreamFieldError::new(
                self.error
                    .message
                    .unwrap_or_else(|| "unspecified error".to_owned()),
                None,
            ));
        }

        UpstreamRejection::new(request_id, errors)
    }
}

/// Error payloads arrive either bare or, from streaming calls, inside an array.
///
/// `Streamed` is tried first: serde would otherwise read a one-element array
/// as the fields of a bare envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Streamed(Vec<ErrorEnvelope>),
    Single(ErrorEnvelope),
}

/// Decodes a platform error envelope, if the body carries one.
pub(super) fn failure_from_body(body: &str) -> Option<UpstreamRejection> {
    let envelope = match serde_json::from_str::<ErrorBody>(body).ok()? {
        ErrorBody::Streamed(envelopes) => envelopes.into_iter().next()?,
        ErrorBody::Single(envelope) => envelope,
    };

    Some(envelope.into_rejection())
}

pub(super) fn rejection_from_body(status: reqwest::StatusCode, body: &str) -> UpstreamRejection {
    failure_from_body(body).unwrap_or_else(|| {
        let detail = body.trim();
        let message = if detail.is_empty() {
            format!("HTTP {status}")
        } else {
            format!("HTTP {status}: {detail}")
        };
        UpstreamRejection::new(None, vec![UpstreamFieldError::new(message, None)])
    })
}
