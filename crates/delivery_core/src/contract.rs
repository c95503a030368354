use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const STATUS_PENDING: &str = "pending";
pub const CREATED_MESSAGE: &str = "Delivery request created successfully";

pub const DELIVERY_ID_FIELD: &str = "delivery_id";
pub const RECIPIENT_NAME_FIELD: &str = "recipient_name";
pub const DELIVERY_ADDRESS_FIELD: &str = "delivery_address";
pub const STATUS_FIELD: &str = "status";

/// A single row of the deliveries table, keyed by `delivery_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeliveryRecord {
    pub delivery_id: String,
    pub recipient_name: String,
    pub delivery_address: String,
    pub status: String,
}

/// Body accepted by the create handler. Extra fields are ignored and the
/// status is never taken from the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateDeliveryRequest {
    pub delivery_id: String,
    pub recipient_name: String,
    pub delivery_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateDeliveryResponse {
    pub message: String,
}

impl CreateDeliveryResponse {
    pub fn created() -> Self {
        Self {
            message: CREATED_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Turns a parsed request into the record that gets written.
///
/// Field values are stored exactly as supplied. The only check beyond field
/// presence is that `delivery_id` is not the empty string, which the table
/// rejects as a key attribute.
pub fn pending_record(request: CreateDeliveryRequest) -> Result<DeliveryRecord, ValidationError> {
    if request.delivery_id.is_empty() {
        return Err(ValidationError::new("delivery_id cannot be empty"));
    }

    Ok(DeliveryRecord {
        delivery_id: request.delivery_id,
        recipient_name: request.recipient_name,
        delivery_address: request.delivery_address,
        status: STATUS_PENDING.to_string(),
    })
}
