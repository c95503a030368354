use tracing::{debug, error, info};

use crate::adapters::delivery_store::DeliveryStore;
use crate::config::ConfigError;
use crate::handlers::response::{
    misconfiguration_response, store_error_response, success_response, ApiGatewayResponse,
};

/// Returns every stored delivery as a JSON array. The event is not inspected.
pub fn handle_list_event(store: Result<&dyn DeliveryStore, &ConfigError>) -> ApiGatewayResponse {
    let store = match store {
        Ok(value) => value,
        Err(error) => return misconfiguration_response(error),
    };

    let records = match store.scan_records() {
        Ok(value) => value,
        Err(store_error) => {
            error!(
                component = "list_handler",
                event = "delivery_scan_failed",
                error = %store_error,
            );
            return store_error_response(&store_error);
        }
    };

    info!(
        component = "list_handler",
        event = "deliveries_listed",
        count = records.len(),
    );
    debug!(
        component = "list_handler",
        event = "deliveries_dumped",
        items = ?records,
    );

    success_response(200, &records)
}
