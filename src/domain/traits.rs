//! Domain traits defining contracts for external systems.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;

use super::error::AppError;
use super::result::ApiResult;
use super::types::{CreateTransactionViewModel, Transaction};

/// HTTP verbs used by the Sloth API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single outgoing request, relative to the configured base URL
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Path segments appended to the base URL, each percent-encoded on its own
    pub segments: Vec<String>,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn get<I, S>(segments: I, headers: HeaderMap) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: HttpMethod::Get,
            segments: segments.into_iter().map(Into::into).collect(),
            headers,
            body: None,
        }
    }

    #[must_use]
    pub fn post<I, S>(segments: I, headers: HeaderMap, body: serde_json::Value) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method: HttpMethod::Post,
            segments: segments.into_iter().map(Into::into).collect(),
            headers,
            body: Some(body),
        }
    }

    /// Slash-joined path, for logging
    pub fn path(&self) -> String {
        self.segments.join("/")
    }
}

/// Status line and fully-read body of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub reason: Option<String>,
    pub body: Vec<u8>,
}

/// Transport collaborator that performs one HTTP exchange.
///
/// Implementations return `Ok` for every response the server sends,
/// whatever its status, and `Err` only when no response was obtained.
#[async_trait]
pub trait SlothTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, AppError>;
}

/// Public operations of the Sloth API.
///
/// Responses with a payload map to an [`ApiResult<T>`]; remote failures are
/// returned as envelopes with `success() == false`, never as errors.
#[async_trait]
pub trait TransactionClient: Send + Sync {
    /// Fetch the most recent transactions (the service returns at most one)
    async fn get_top1_transactions(&self) -> Result<ApiResult<Vec<Transaction>>, AppError>;

    /// Fetch a transaction by its unique id
    async fn get_transaction_by_id(
        &self,
        transaction_id: &str,
    ) -> Result<ApiResult<Option<Transaction>>, AppError>;

    /// Fetch a transaction by the tracking number its payment processor assigned
    async fn get_transaction_by_processor_id(
        &self,
        processor_tracking_number: &str,
    ) -> Result<ApiResult<Option<Transaction>>, AppError>;

    /// Fetch all transactions carrying a KFS tracking number
    async fn get_transactions_by_kfs_tracking_number(
        &self,
        kfs_tracking_number: &str,
    ) -> Result<ApiResult<Vec<Transaction>>, AppError>;

    /// Ask the service whether a chart-of-accounts string is valid
    async fn validate_chart_of_accounts(&self, coa_string: &str)
    -> Result<ApiResult<bool>, AppError>;

    /// Request creation of a transaction
    async fn create_transaction(
        &self,
        transaction: &CreateTransactionViewModel,
    ) -> Result<ApiResult<Option<Transaction>>, AppError>;

    /// Alias of [`get_transactions_by_kfs_tracking_number`](Self::get_transactions_by_kfs_tracking_number)
    async fn get_transactions_by_kfs_key(
        &self,
        kfs_key: &str,
    ) -> Result<ApiResult<Vec<Transaction>>, AppError> {
        self.get_transactions_by_kfs_tracking_number(kfs_key).await
    }

    /// Alias of [`validate_chart_of_accounts`](Self::validate_chart_of_accounts)
    async fn validate_financial_segment_string(
        &self,
        segment_string: &str,
    ) -> Result<ApiResult<bool>, AppError> {
        self.validate_chart_of_accounts(segment_string).await
    }
}
