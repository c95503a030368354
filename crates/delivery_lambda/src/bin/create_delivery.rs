use delivery_lambda::adapters::delivery_store::DeliveryStore;
use delivery_lambda::adapters::dynamodb::DynamoDbDeliveryStore;
use delivery_lambda::config::DeliveryConfig;
use delivery_lambda::handlers::create::handle_create_event;
use delivery_lambda::handlers::response::ApiGatewayResponse;
use delivery_lambda::telemetry::init_tracing;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_dynamodb::Client::new(&aws_config);
    let store = DeliveryConfig::from_env()
        .map(|config| DynamoDbDeliveryStore::new(client, config.table_name))
        .inspect(|store| {
            info!(
                component = "create_delivery",
                event = "store_configured",
                table_name = store.table_name(),
            );
        })
        .inspect_err(|config_error| {
            error!(
                component = "create_delivery",
                event = "config_invalid",
                error = %config_error,
            );
        });
    let store = store.as_ref().map(|value| value as &dyn DeliveryStore);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<ApiGatewayResponse, Error>(handle_create_event(event.payload, store))
    }))
    .await
}
