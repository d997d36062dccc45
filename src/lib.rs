//! Typed client for the Sloth financial transaction API.
//!
//! Every operation returns an [`ApiResult`]: a non-2xx response from the
//! service is data (`success() == false`), not an error. Errors are reserved
//! for bad local input, bad configuration, and transport faults that leave
//! no response to inspect.

pub mod app;
pub mod config;
pub mod domain;
pub mod infra;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use app::{API_KEY_HEADER, SlothApiClient};
pub use config::SlothApiClientOptions;
pub use domain::{
    ApiResult, ApiStatus, AppError, CreateTransactionViewModel, CreateTransferViewModel,
    CreditDebit, MetadataEntry, Transaction, TransactionClient, TransactionMetadata, Transfer,
};
