use delivery_core::contract::{pending_record, CreateDeliveryRequest, CreateDeliveryResponse};
use serde_json::Value;
use tracing::{error, info};

use crate::adapters::delivery_store::DeliveryStore;
use crate::config::ConfigError;
use crate::handlers::response::{
    misconfiguration_response, normalize_apigw_event, store_error_response, success_response,
    validation_error_response, ApiGatewayResponse,
};

/// Writes the delivery in the event body with a `pending` status.
///
/// `store` is `Err` when the table could not be configured at cold start; the
/// request is still validated first so caller errors surface as 400.
pub fn handle_create_event(
    event: Value,
    store: Result<&dyn DeliveryStore, &ConfigError>,
) -> ApiGatewayResponse {
    let payload = match normalize_apigw_event(event) {
        Ok(value) => value,
        Err(message) => return validation_error_response(&message),
    };

    let request = match serde_json::from_value::<CreateDeliveryRequest>(payload) {
        Ok(value) => value,
        Err(error) => return validation_error_response(&format!("Malformed request: {error}")),
    };

    let record = match pending_record(request) {
        Ok(value) => value,
        Err(error) => return validation_error_response(error.message()),
    };

    let store = match store {
        Ok(value) => value,
        Err(error) => return misconfiguration_response(error),
    };

    if let Err(store_error) = store.put_record(&record) {
        error!(
            component = "create_handler",
            event = "delivery_write_failed",
            delivery_id = %record.delivery_id,
            error = %store_error,
        );
        return store_error_response(&store_error);
    }

    info!(
        component = "create_handler",
        event = "delivery_created",
        delivery_id = %record.delivery_id,
    );
    success_response(200, CreateDeliveryResponse::created())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use delivery_core::contract::DeliveryRecord;
    use serde_json::json;

    use super::*;
    use crate::adapters::delivery_store::StoreError;

    struct RecordingStore {
        records: Mutex<BTreeMap<String, DeliveryRecord>>,
        fail_writes: bool,
    }

    impl RecordingStore {
        fn new() -> Self {
            Self {
                records: Mutex::new(BTreeMap::new()),
                fail_writes: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Self::new()
            }
        }

        fn record(&self, delivery_id: &str) -> Option<DeliveryRecord> {
            self.records
                .lock()
                .expect("poisoned mutex")
                .get(delivery_id)
                .cloned()
        }

        fn len(&self) -> usize {
            self.records.lock().expect("poisoned mutex").len()
        }
    }

    impl DeliveryStore for RecordingStore {
        fn put_record(&self, record: &DeliveryRecord) -> Result<(), StoreError> {
            if self.fail_writes {
                return Err(StoreError::Unavailable("table is throttled".to_string()));
            }
            self.records
                .lock()
                .expect("poisoned mutex")
                .insert(record.delivery_id.clone(), record.clone());
            Ok(())
        }

        fn scan_records(&self) -> Result<Vec<DeliveryRecord>, StoreError> {
            Ok(self
                .records
                .lock()
                .expect("poisoned mutex")
                .values()
                .cloned()
                .collect())
        }
    }

    fn body(response: &ApiGatewayResponse) -> Value {
        serde_json::from_str(&response.body).expect("body should parse")
    }

    fn create_event(payload: Value) -> Value {
        json!({ "body": payload.to_string() })
    }

    #[test]
    fn stores_pending_record_and_confirms() {
        let store = RecordingStore::new();
        let response = handle_create_event(
            create_event(json!({
                "delivery_id": "D1",
                "recipient_name": "Alice",
                "delivery_address": "123 Main St"
            })),
            Ok(&store),
        );

        assert_eq!(response.status_code, 200);
        assert_eq!(
            body(&response),
            json!({"message": "Delivery request created successfully"})
        );
        assert_eq!(
            store.record("D1"),
            Some(DeliveryRecord {
                delivery_id: "D1".to_string(),
                recipient_name: "Alice".to_string(),
                delivery_address: "123 Main St".to_string(),
                status: "pending".to_string(),
            })
        );
    }

    #[test]
    fn overwrites_existing_record_with_same_id() {
        let store = RecordingStore::new();
        store
            .put_record(&DeliveryRecord {
                delivery_id: "D1".to_string(),
                recipient_name: "Old".to_string(),
                delivery_address: "Old Rd".to_string(),
                status: "delivered".to_string(),
            })
            .expect("seed should succeed");

        let response = handle_create_event(
            create_event(json!({
                "delivery_id": "D1",
                "recipient_name": "Alice",
                "delivery_address": "123 Main St"
            })),
            Ok(&store),
        );

        assert_eq!(response.status_code, 200);
        let stored = store.record("D1").expect("record should exist");
        assert_eq!(stored.recipient_name, "Alice");
        assert_eq!(stored.status, "pending");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn rejects_missing_field_without_writing() {
        let store = RecordingStore::new();
        let response = handle_create_event(
            create_event(json!({"delivery_id": "D1", "recipient_name": "Alice"})),
            Ok(&store),
        );

        assert_eq!(response.status_code, 400);
        assert_eq!(body(&response)["error"], "validation_error");
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn rejects_malformed_json_body() {
        let store = RecordingStore::new();
        let response = handle_create_event(json!({"body": "{not json"}), Ok(&store));

        assert_eq!(response.status_code, 400);
        assert!(body(&response)["message"]
            .as_str()
            .expect("message should be a string")
            .starts_with("Malformed JSON body"));
    }

    #[test]
    fn surfaces_store_failure_as_bad_gateway() {
        let store = RecordingStore::failing();
        let response = handle_create_event(
            create_event(json!({
                "delivery_id": "D1",
                "recipient_name": "Alice",
                "delivery_address": "123 Main St"
            })),
            Ok(&store),
        );

        assert_eq!(response.status_code, 502);
        assert_eq!(body(&response)["error"], "storage_unavailable");
    }

    #[test]
    fn validates_before_reporting_missing_table() {
        let config_error = ConfigError::MissingVariable("DELIVERY_TABLE_NAME");

        let invalid = handle_create_event(create_event(json!({})), Err(&config_error));
        assert_eq!(invalid.status_code, 400);

        let valid = handle_create_event(
            create_event(json!({
                "delivery_id": "D1",
                "recipient_name": "Alice",
                "delivery_address": "123 Main St"
            })),
            Err(&config_error),
        );
        assert_eq!(valid.status_code, 500);
        assert_eq!(
            body(&valid),
            json!({
                "error": "misconfiguration",
                "message": "DELIVERY_TABLE_NAME must be configured",
            })
        );
    }
}
