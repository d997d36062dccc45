//! Domain layer containing core business types, traits, and error definitions.

pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ConfigError, TransportError, ValidationError};
pub use result::{ApiResult, ApiStatus};
pub use traits::{ApiRequest, HttpMethod, RawResponse, SlothTransport, TransactionClient};
pub use types::{
    CreateTransactionViewModel, CreateTransferViewModel, CreditDebit, MAX_TRANSFER_AMOUNT,
    MIN_TRANSFER_AMOUNT, MetadataEntry, Transaction, TransactionMetadata, Transfer,
};
