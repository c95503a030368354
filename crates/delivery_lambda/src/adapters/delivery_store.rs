use delivery_core::contract::DeliveryRecord;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    CorruptRecord(String),
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "storage_unavailable",
            Self::CorruptRecord(_) => "corrupt_record",
        }
    }
}

/// Backing table for delivery records.
///
/// `put_record` overwrites any record stored under the same `delivery_id`.
/// `scan_records` returns every stored record in store order.
pub trait DeliveryStore: Send + Sync {
    fn put_record(&self, record: &DeliveryRecord) -> Result<(), StoreError>;

    fn scan_records(&self) -> Result<Vec<DeliveryRecord>, StoreError>;
}
