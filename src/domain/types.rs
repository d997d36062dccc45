//! Domain types with validation support.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::error::ValidationError;

/// Smallest amount a single transfer may carry
pub const MIN_TRANSFER_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Largest amount a single transfer may carry
pub const MAX_TRANSFER_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Accepts RFC 3339 timestamps and offset-less ones, which are taken as UTC
fn deserialize_date_time<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date_time(&raw).map_err(serde::de::Error::custom)
}

fn deserialize_optional_date_time<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => parse_date_time(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

fn parse_date_time(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid date-time '{raw}': {e}"))
}

/// Unset text columns come back as `null`
fn deserialize_null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn validate_amount(amount: &Decimal) -> Result<(), validator::ValidationError> {
    if *amount < MIN_TRANSFER_AMOUNT || *amount > MAX_TRANSFER_AMOUNT {
        let mut err = validator::ValidationError::new("range");
        err.message = Some("Amount must be between 0.01 and 1000000000".into());
        return Err(err);
    }
    Ok(())
}

fn validate_document_number(value: &str) -> Result<(), validator::ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    if value.len() > 14 {
        let mut err = validator::ValidationError::new("length");
        err.message = Some("Document number must be at most 14 characters".into());
        return Err(err);
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        let mut err = validator::ValidationError::new("regex");
        err.message = Some("Document number may only contain A-Z and 0-9".into());
        return Err(err);
    }
    Ok(())
}

fn validate_kfs_tracking_number(value: &str) -> Result<(), validator::ValidationError> {
    if value.chars().count() > 10 {
        let mut err = validator::ValidationError::new("length");
        err.message = Some("KFS tracking number must be at most 10 characters".into());
        return Err(err);
    }
    Ok(())
}

/// Debit or credit side of a transfer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CreditDebit {
    Credit,
    Debit,
}

impl CreditDebit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "Credit",
            Self::Debit => "Debit",
        }
    }
}

impl std::str::FromStr for CreditDebit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Credit" | "credit" | "C" => Ok(Self::Credit),
            "Debit" | "debit" | "D" => Ok(Self::Debit),
            _ => Err(format!("Invalid transfer direction: {}", s)),
        }
    }
}

impl std::fmt::Display for CreditDebit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One debit or credit leg of a transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub id: String,
    /// Full chart-of-accounts string, validated only by the service
    #[validate(length(min = 1, message = "Financial segment string is required"))]
    pub financial_segment_string: String,
    #[validate(custom(function = "validate_amount"))]
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Shown in reporting, so kept short
    #[validate(length(min = 1, max = 40, message = "Description must be 1-40 characters"))]
    pub description: String,
    pub direction: CreditDebit,
    /// Left to the service when absent; it defaults to the posting day
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub accounting_date: Option<DateTime<Utc>>,
    #[validate(length(min = 1, max = 8, message = "Reference id must be 1-8 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
}

/// Free-form name/value pair attached to a transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMetadata {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub transaction_id: String,
    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "Value is required"))]
    pub value: String,
}

impl TransactionMetadata {
    #[must_use]
    pub fn new(
        transaction_id: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            transaction_id: transaction_id.into(),
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A financial transaction as recorded by Sloth
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub description: String,
    // Changed only through set_status so status history can hook in later
    #[validate(length(max = 20, message = "Status must be at most 20 characters"))]
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    status: String,
    #[validate(length(max = 128, message = "Merchant tracking number must be at most 128 characters"))]
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub merchant_tracking_number: String,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub merchant_tracking_url: String,
    #[validate(length(max = 128, message = "Processor tracking number must be at most 128 characters"))]
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub processor_tracking_number: String,
    /// Unique per origination code; the file must balance per document number
    #[validate(custom(function = "validate_document_number"))]
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub document_number: String,
    /// Equivalent to the KFS organization document number
    #[validate(custom(function = "validate_kfs_tracking_number"))]
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub kfs_tracking_number: String,
    #[serde(deserialize_with = "deserialize_date_time")]
    pub transaction_date: DateTime<Utc>,
    #[validate(nested)]
    #[serde(default)]
    pub transfers: Vec<Transfer>,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub scrubber_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reversal_of_transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reversal_transaction_id: Option<String>,
    #[validate(nested)]
    #[serde(default)]
    pub metadata: Vec<TransactionMetadata>,
}

impl Transaction {
    #[must_use]
    pub fn new(description: impl Into<String>, transaction_date: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            description: description.into(),
            status: String::new(),
            merchant_tracking_number: String::new(),
            merchant_tracking_url: String::new(),
            processor_tracking_number: String::new(),
            document_number: String::new(),
            kfs_tracking_number: String::new(),
            transaction_date,
            transfers: Vec::new(),
            scrubber_id: String::new(),
            reversal_of_transaction_id: None,
            reversal_transaction_id: None,
            metadata: Vec::new(),
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Move the transaction to a new status
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Id of the transaction this one reverses
    pub fn reversal_of_transaction_id(&self) -> Option<&str> {
        self.reversal_of_transaction_id.as_deref()
    }

    /// Id of the transaction that reverses this one
    pub fn reversal_transaction_id(&self) -> Option<&str> {
        self.reversal_transaction_id.as_deref()
    }

    pub fn is_reversal(&self) -> bool {
        self.reversal_of_transaction_id
            .as_deref()
            .is_some_and(|id| !id.is_empty())
    }

    pub fn has_reversal(&self) -> bool {
        self.reversal_transaction_id
            .as_deref()
            .is_some_and(|id| !id.is_empty())
    }

    /// Link `reversal` as the transaction reversing `self`.
    ///
    /// Both sides are updated together or not at all. Each transaction has at
    /// most one reversal and reverses at most one transaction, so linking
    /// fails if either side is already paired with a different transaction.
    /// Re-linking an existing pair is a no-op.
    pub fn add_reversal_transaction(
        &mut self,
        reversal: &mut Transaction,
    ) -> Result<(), ValidationError> {
        if self.id == reversal.id {
            return Err(ValidationError::InvalidField {
                field: "reversal_transaction_id".to_string(),
                message: "a transaction cannot reverse itself".to_string(),
            });
        }

        match self.reversal_transaction_id.as_deref() {
            Some(existing) if existing != reversal.id => {
                return Err(ValidationError::InvalidField {
                    field: "reversal_transaction_id".to_string(),
                    message: format!("transaction {} already reversed by {}", self.id, existing),
                });
            }
            _ => {}
        }

        match reversal.reversal_of_transaction_id.as_deref() {
            Some(existing) if existing != self.id => {
                return Err(ValidationError::InvalidField {
                    field: "reversal_of_transaction_id".to_string(),
                    message: format!("transaction {} already reverses {}", reversal.id, existing),
                });
            }
            _ => {}
        }

        self.reversal_transaction_id = Some(reversal.id.clone());
        reversal.reversal_of_transaction_id = Some(self.id.clone());
        Ok(())
    }
}

/// Name/value pair submitted with a new transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MetadataEntry {
    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "Value is required"))]
    pub value: String,
}

impl MetadataEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Payload for creating one transfer of a new transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransferViewModel {
    #[validate(custom(function = "validate_amount"))]
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[validate(length(min = 1, message = "Financial segment string is required"))]
    pub financial_segment_string: String,
    #[validate(length(min = 1, max = 40, message = "Description must be 1-40 characters"))]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub accounting_date: Option<DateTime<Utc>>,
    pub direction: CreditDebit,
    #[validate(length(min = 1, max = 8, message = "Reference id must be 1-8 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
}

impl CreateTransferViewModel {
    #[must_use]
    pub fn new(
        financial_segment_string: impl Into<String>,
        amount: Decimal,
        description: impl Into<String>,
        direction: CreditDebit,
    ) -> Self {
        Self {
            amount,
            financial_segment_string: financial_segment_string.into(),
            description: description.into(),
            accounting_date: None,
            direction,
            reference_id: None,
        }
    }

    #[must_use]
    pub fn with_accounting_date(mut self, accounting_date: DateTime<Utc>) -> Self {
        self.accounting_date = Some(accounting_date);
        self
    }

    #[must_use]
    pub fn with_reference_id(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = Some(reference_id.into());
        self
    }
}

/// Payload for creating a transaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionViewModel {
    /// Skip the approval queue on the service side
    #[serde(default)]
    pub auto_approve: bool,
    #[serde(default)]
    pub validate_financial_segment_strings: bool,
    #[validate(length(max = 128, message = "Merchant tracking number must be at most 128 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_tracking_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_tracking_url: Option<String>,
    #[validate(length(max = 128, message = "Processor tracking number must be at most 128 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processor_tracking_number: Option<String>,
    #[validate(length(min = 1, max = 10, message = "KFS tracking number must be 1-10 characters"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kfs_tracking_number: Option<String>,
    pub transaction_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(default)]
    pub description: String,
    #[validate(nested)]
    #[serde(default)]
    pub transfers: Vec<CreateTransferViewModel>,
    #[validate(nested)]
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

impl CreateTransactionViewModel {
    #[must_use]
    pub fn new(description: impl Into<String>, transaction_date: DateTime<Utc>) -> Self {
        Self {
            auto_approve: false,
            validate_financial_segment_strings: false,
            merchant_tracking_number: None,
            merchant_tracking_url: None,
            processor_tracking_number: None,
            kfs_tracking_number: None,
            transaction_date,
            source: None,
            source_type: None,
            description: description.into(),
            transfers: Vec::new(),
            metadata: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_transfer(mut self, transfer: CreateTransferViewModel) -> Self {
        self.transfers.push(transfer);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, entry: MetadataEntry) -> Self {
        self.metadata.push(entry);
        self
    }

    /// Sum of all debit legs
    pub fn debit_total(&self) -> Decimal {
        self.total_for(CreditDebit::Debit)
    }

    /// Sum of all credit legs
    pub fn credit_total(&self) -> Decimal {
        self.total_for(CreditDebit::Credit)
    }

    /// Whether the transfers would satisfy the service's balance rule:
    /// at least one debit, at least one credit, and equal totals.
    ///
    /// Informational only. The client never rejects an unbalanced payload.
    pub fn is_balanced(&self) -> bool {
        let has_debit = self
            .transfers
            .iter()
            .any(|t| t.direction == CreditDebit::Debit);
        let has_credit = self
            .transfers
            .iter()
            .any(|t| t.direction == CreditDebit::Credit);
        has_debit && has_credit && self.debit_total() == self.credit_total()
    }

    fn total_for(&self, direction: CreditDebit) -> Decimal {
        self.transfers
            .iter()
            .filter(|t| t.direction == direction)
            .map(|t| t.amount)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn leg(amount: &str, direction: CreditDebit) -> CreateTransferViewModel {
        CreateTransferViewModel::new(
            "3110-13U02-ADNO003-410001-00-000-0000000000-000000-0000-000000-000000",
            Decimal::from_str(amount).unwrap(),
            "Moving some money",
            direction,
        )
    }

    #[test]
    fn test_credit_debit_display_and_parsing() {
        for (direction, string) in [(CreditDebit::Credit, "Credit"), (CreditDebit::Debit, "Debit")] {
            assert_eq!(direction.as_str(), string);
            assert_eq!(direction.to_string(), string);
            assert_eq!(CreditDebit::from_str(string).unwrap(), direction);
        }
        assert!(CreditDebit::from_str("sideways").is_err());
    }

    #[test]
    fn test_add_reversal_links_both_sides() {
        let mut original = Transaction::new("original", date());
        let mut reversal = Transaction::new("reversal", date());

        assert!(!original.has_reversal());
        assert!(!reversal.is_reversal());

        original.add_reversal_transaction(&mut reversal).unwrap();

        assert_eq!(original.reversal_transaction_id(), Some(reversal.id.as_str()));
        assert_eq!(reversal.reversal_of_transaction_id(), Some(original.id.as_str()));
        assert!(original.has_reversal());
        assert!(reversal.is_reversal());
        assert!(!original.is_reversal());
        assert!(!reversal.has_reversal());
    }

    #[test]
    fn test_add_reversal_same_pair_is_idempotent() {
        let mut original = Transaction::new("original", date());
        let mut reversal = Transaction::new("reversal", date());

        original.add_reversal_transaction(&mut reversal).unwrap();
        original.add_reversal_transaction(&mut reversal).unwrap();

        assert_eq!(original.reversal_transaction_id(), Some(reversal.id.as_str()));
    }

    #[test]
    fn test_add_reversal_rejects_second_reversal_without_partial_link() {
        let mut original = Transaction::new("original", date());
        let mut first = Transaction::new("first", date());
        let mut second = Transaction::new("second", date());

        original.add_reversal_transaction(&mut first).unwrap();
        let result = original.add_reversal_transaction(&mut second);

        assert!(matches!(result, Err(ValidationError::InvalidField { .. })));
        assert_eq!(original.reversal_transaction_id(), Some(first.id.as_str()));
        assert!(!second.is_reversal());
    }

    #[test]
    fn test_add_reversal_rejects_reversal_already_reversing_another() {
        let mut a = Transaction::new("a", date());
        let mut b = Transaction::new("b", date());
        let mut reversal = Transaction::new("reversal", date());

        a.add_reversal_transaction(&mut reversal).unwrap();
        let result = b.add_reversal_transaction(&mut reversal);

        assert!(result.is_err());
        assert!(!b.has_reversal());
        assert_eq!(reversal.reversal_of_transaction_id(), Some(a.id.as_str()));
    }

    #[test]
    fn test_add_reversal_rejects_self_reference() {
        let mut a = Transaction::new("a", date());
        let mut copy = a.clone();

        assert!(a.add_reversal_transaction(&mut copy).is_err());
        assert!(!a.has_reversal());
        assert!(!copy.is_reversal());
    }

    #[test]
    fn test_status_changes_only_through_set_status() {
        let mut tx = Transaction::new("t", date());
        assert_eq!(tx.status(), "");
        tx.set_status("Completed");
        assert_eq!(tx.status(), "Completed");
    }

    #[test]
    fn test_transaction_field_constraints() {
        let mut tx = Transaction::new("t", date());
        assert!(tx.validate().is_ok());

        tx.document_number = "ABC123".to_string();
        assert!(tx.validate().is_ok());

        tx.document_number = "abc123".to_string();
        assert!(tx.validate().is_err());

        tx.document_number = "A".repeat(15);
        assert!(tx.validate().is_err());

        tx.document_number = String::new();
        tx.kfs_tracking_number = "This tracking number is too long".to_string();
        assert!(tx.validate().is_err());

        tx.kfs_tracking_number = String::new();
        tx.set_status("x".repeat(21));
        assert!(tx.validate().is_err());
    }

    #[test]
    fn test_transfer_amount_bounds() {
        assert!(leg("0.01", CreditDebit::Debit).validate().is_ok());
        assert!(leg("1000000000", CreditDebit::Debit).validate().is_ok());
        assert!(leg("0.00", CreditDebit::Debit).validate().is_err());
        assert!(leg("-5", CreditDebit::Debit).validate().is_err());
        assert!(leg("1000000000.01", CreditDebit::Debit).validate().is_err());
    }

    #[test]
    fn test_transfer_description_and_reference_limits() {
        let mut transfer = leg("10", CreditDebit::Credit);
        transfer.description = "x".repeat(41);
        assert!(transfer.validate().is_err());

        let transfer = leg("10", CreditDebit::Credit).with_reference_id("123456789");
        assert!(transfer.validate().is_err());

        let transfer = leg("10", CreditDebit::Credit).with_reference_id("");
        assert!(transfer.validate().is_err());

        let transfer = leg("10", CreditDebit::Credit).with_reference_id("REF1");
        assert!(transfer.validate().is_ok());
    }

    #[test]
    fn test_create_transaction_nested_validation() {
        let model = CreateTransactionViewModel::new("d", date())
            .with_transfer(leg("10", CreditDebit::Debit))
            .with_metadata(MetadataEntry::new("", "value"));
        assert!(model.validate().is_err());

        let mut model = CreateTransactionViewModel::new("d", date());
        model.kfs_tracking_number =
            Some("This tracking number is too long and should fail".to_string());
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_balance_helpers() {
        let balanced = CreateTransactionViewModel::new("d", date())
            .with_transfer(leg("100.00", CreditDebit::Debit))
            .with_transfer(leg("60.00", CreditDebit::Credit))
            .with_transfer(leg("40.00", CreditDebit::Credit));
        assert_eq!(balanced.debit_total(), Decimal::from(100));
        assert_eq!(balanced.credit_total(), Decimal::from(100));
        assert!(balanced.is_balanced());

        let debit_only = CreateTransactionViewModel::new("d", date())
            .with_transfer(leg("100.00", CreditDebit::Debit));
        assert!(!debit_only.is_balanced());

        let uneven = CreateTransactionViewModel::new("d", date())
            .with_transfer(leg("100.00", CreditDebit::Debit))
            .with_transfer(leg("99.99", CreditDebit::Credit));
        assert!(!uneven.is_balanced());
    }

    #[test]
    fn test_transaction_deserializes_service_payload() {
        let json = r#"{
            "id": "tx-1",
            "description": "Lab fees",
            "status": "Completed",
            "processorTrackingNumber": "P-42",
            "kfsTrackingNumber": "KFS1",
            "transactionDate": "2024-03-01T12:00:00Z",
            "reversalOfTransactionId": "tx-0",
            "transfers": [{
                "id": "tr-1",
                "financialSegmentString": "3110-13U02",
                "amount": 100.25,
                "description": "Moving some money",
                "direction": "Debit"
            }],
            "metadata": [{"name": "source", "value": "test"}],
            "unknownField": 7
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.id, "tx-1");
        assert_eq!(tx.status(), "Completed");
        assert!(tx.is_reversal());
        assert!(!tx.has_reversal());
        assert_eq!(tx.transfers[0].amount, Decimal::from_str("100.25").unwrap());
        assert_eq!(tx.transfers[0].direction, CreditDebit::Debit);
        assert!(tx.transfers[0].accounting_date.is_none());
        assert!(!tx.metadata[0].id.is_empty());
    }

    #[test]
    fn test_create_transfer_serializes_camel_case_without_accounting_date() {
        let json = serde_json::to_value(leg("12.50", CreditDebit::Credit)).unwrap();
        assert_eq!(json["amount"], serde_json::json!(12.5));
        assert_eq!(json["direction"], "Credit");
        assert!(json.get("financialSegmentString").is_some());
        assert!(json.get("accountingDate").is_none());
        assert!(json.get("referenceId").is_none());
    }

    #[test]
    fn test_transaction_accepts_offsetless_dates_as_utc() {
        let json = r#"{
            "id": "tx-1",
            "transactionDate": "2024-03-01T12:00:00",
            "transfers": [{
                "financialSegmentString": "3110-13U02-ADNO003-410001",
                "amount": 12.5,
                "description": "Lab fees",
                "direction": "Debit",
                "accountingDate": "2024-03-02T08:30:00.1234567"
            }]
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(tx.transaction_date, date());
        let accounting = tx.transfers[0].accounting_date.unwrap();
        assert_eq!(accounting.date_naive().to_string(), "2024-03-02");
    }

    #[test]
    fn test_transaction_dates_with_offset_are_normalized() {
        let json = r#"{"id": "tx-1", "transactionDate": "2024-03-01T04:00:00-08:00"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.transaction_date, date());
    }

    #[test]
    fn test_transaction_rejects_garbage_date() {
        let json = r#"{"id": "tx-1", "transactionDate": "yesterday"}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn test_transaction_null_text_columns_become_empty() {
        let json = r#"{
            "id": "tx-1",
            "description": null,
            "status": null,
            "merchantTrackingNumber": null,
            "processorTrackingNumber": null,
            "documentNumber": null,
            "kfsTrackingNumber": null,
            "scrubberId": null,
            "reversalTransactionId": null,
            "transactionDate": "2024-03-01T12:00:00Z",
            "transfers": [{
                "id": null,
                "financialSegmentString": "3110-13U02-ADNO003-410001",
                "amount": 1,
                "description": "Lab fees",
                "direction": "Credit",
                "accountingDate": null
            }]
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(tx.description, "");
        assert_eq!(tx.status(), "");
        assert_eq!(tx.document_number, "");
        assert_eq!(tx.kfs_tracking_number, "");
        assert_eq!(tx.scrubber_id, "");
        assert!(!tx.has_reversal());
        assert_eq!(tx.transfers[0].id, "");
        assert!(tx.transfers[0].accounting_date.is_none());
    }
}
