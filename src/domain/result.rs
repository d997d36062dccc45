//! Uniform result envelope for Sloth responses.
//!
//! Every facade call that obtains a response returns an [`ApiResult`],
//! whatever the status code. Callers branch on [`ApiResult::success`]
//! instead of matching on errors for remote failures.

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::AppError;
use super::traits::RawResponse;

/// Summary of an API response, with the decoded payload on success
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult<T = ()> {
    message: String,
    success: bool,
    #[serde(serialize_with = "serialize_status")]
    status_code: StatusCode,
    data: T,
}

/// Envelope for responses whose body is not of interest
pub type ApiStatus = ApiResult<()>;

fn serialize_status<S: serde::Serializer>(
    status: &StatusCode,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

impl<T> ApiResult<T> {
    /// Reason phrase of the response, empty when the server sent none
    pub fn message(&self) -> &str {
        &self.message
    }

    /// True iff the status code is 2xx
    pub fn success(&self) -> bool {
        self.success
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    /// Decoded payload; the type's default value unless `success()`
    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn into_data(self) -> T {
        self.data
    }

    /// Drop the payload, keeping status and message
    pub fn into_status(self) -> ApiStatus {
        ApiResult {
            message: self.message,
            success: self.success,
            status_code: self.status_code,
            data: (),
        }
    }
}

impl<T: DeserializeOwned + Default> ApiResult<T> {
    /// Map a raw response into an envelope.
    ///
    /// The body is decoded only for 2xx responses. An empty success body is
    /// decoded as JSON `null`, which yields `None` for optional payloads.
    /// Error bodies are never parsed, so an HTML error page from a proxy
    /// cannot fail the call.
    pub fn from_response(response: RawResponse) -> Result<Self, AppError> {
        let success = response.status.is_success();
        let data = if success {
            decode_body(&response.body)?
        } else {
            T::default()
        };

        Ok(Self {
            message: response.reason.unwrap_or_default(),
            success,
            status_code: response.status,
            data,
        })
    }
}

impl ApiStatus {
    /// Map a raw response into an envelope without touching the body
    pub fn from_status(response: &RawResponse) -> Self {
        Self {
            message: response.reason.clone().unwrap_or_default(),
            success: response.status.is_success(),
            status_code: response.status,
            data: (),
        }
    }
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        body
    };
    serde_json::from_slice(body).map_err(|e| AppError::Deserialization(e.to_string()))
}
