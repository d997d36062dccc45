//! Client facade over the Sloth API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::config::SlothApiClientOptions;
use crate::domain::{
    ApiRequest, ApiResult, AppError, ConfigError, CreateTransactionViewModel, SlothTransport,
    Transaction, TransactionClient, ValidationError,
};
use crate::infra::HttpSlothTransport;

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "X-API-Key";

const TRANSACTIONS: &str = "transactions";

/// Primary entry point for the Sloth API.
///
/// Cheap to clone; clones share the transport. The API key header is fixed
/// at construction and attached to every request.
#[derive(Clone)]
pub struct SlothApiClient {
    transport: Arc<dyn SlothTransport>,
    headers: HeaderMap,
}

impl std::fmt::Debug for SlothApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlothApiClient").finish_non_exhaustive()
    }
}

impl SlothApiClient {
    /// Build a client that talks HTTP to `options.base_url`
    pub fn new(options: SlothApiClientOptions) -> Result<Self, AppError> {
        options.validate()?;
        let transport = HttpSlothTransport::from_options(&options)?;
        info!(base_url = %transport.base_url(), "Sloth API client created");
        Self::with_transport(Arc::new(transport), &options)
    }

    /// Build a client over any transport (mocks, custom HTTP stacks)
    pub fn with_transport(
        transport: Arc<dyn SlothTransport>,
        options: &SlothApiClientOptions,
    ) -> Result<Self, AppError> {
        options.validate()?;

        let mut key = HeaderValue::from_str(options.api_key.expose_secret())
            .map_err(|_| ConfigError::InvalidApiKey)?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("x-api-key"), key);

        Ok(Self { transport, headers })
    }

    async fn get<T>(&self, segments: &[&str]) -> Result<ApiResult<T>, AppError>
    where
        T: DeserializeOwned + Default,
    {
        let request = ApiRequest::get(segments.iter().copied(), self.headers.clone());
        self.execute(request).await
    }

    async fn execute<T>(&self, request: ApiRequest) -> Result<ApiResult<T>, AppError>
    where
        T: DeserializeOwned + Default,
    {
        let path = request.path();
        let response = self.transport.send(request).await?;
        let result = ApiResult::from_response(response)?;

        if result.success() {
            debug!(path = %path, status = %result.status_code(), "Sloth API call succeeded");
        } else {
            warn!(
                path = %path,
                status = %result.status_code(),
                message = %result.message(),
                "Sloth API call returned a failure status"
            );
        }

        Ok(result)
    }
}

fn require(name: &'static str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        warn!(argument = name, "Rejected blank argument");
        return Err(AppError::invalid_argument(name, format!("{name} required")));
    }
    Ok(())
}

#[async_trait]
impl TransactionClient for SlothApiClient {
    #[instrument(skip(self))]
    async fn get_top1_transactions(&self) -> Result<ApiResult<Vec<Transaction>>, AppError> {
        self.get(&[TRANSACTIONS]).await
    }

    #[instrument(skip(self))]
    async fn get_transaction_by_id(
        &self,
        transaction_id: &str,
    ) -> Result<ApiResult<Option<Transaction>>, AppError> {
        require("transaction_id", transaction_id)?;
        self.get(&[TRANSACTIONS, transaction_id]).await
    }

    #[instrument(skip(self))]
    async fn get_transaction_by_processor_id(
        &self,
        processor_tracking_number: &str,
    ) -> Result<ApiResult<Option<Transaction>>, AppError> {
        require("processor_tracking_number", processor_tracking_number)?;
        self.get(&[TRANSACTIONS, "processor", processor_tracking_number])
            .await
    }

    #[instrument(skip(self))]
    async fn get_transactions_by_kfs_tracking_number(
        &self,
        kfs_tracking_number: &str,
    ) -> Result<ApiResult<Vec<Transaction>>, AppError> {
        require("kfs_tracking_number", kfs_tracking_number)?;
        self.get(&[TRANSACTIONS, "kfskey", kfs_tracking_number])
            .await
    }

    #[instrument(skip(self))]
    async fn validate_chart_of_accounts(
        &self,
        coa_string: &str,
    ) -> Result<ApiResult<bool>, AppError> {
        require("coa_string", coa_string)?;
        self.get(&[TRANSACTIONS, "validate", coa_string]).await
    }

    #[instrument(
        skip(self, transaction),
        fields(transfers = transaction.transfers.len())
    )]
    async fn create_transaction(
        &self,
        transaction: &CreateTransactionViewModel,
    ) -> Result<ApiResult<Option<Transaction>>, AppError> {
        // Field constraints only; debit/credit balance is left to the service
        transaction.validate().map_err(|e| {
            warn!(error = %e, "Transaction payload failed validation");
            AppError::Validation(ValidationError::from(e))
        })?;

        let body =
            serde_json::to_value(transaction).map_err(|e| AppError::Serialization(e.to_string()))?;

        info!("Submitting new transaction");
        let request = ApiRequest::post([TRANSACTIONS], self.headers.clone(), body);
        self.execute(request).await
    }
}
