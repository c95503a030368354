use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::adapters::delivery_store::StoreError;
use crate::config::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// Extracts the JSON request payload from an API Gateway proxy event.
///
/// A string `body` is parsed as JSON, an object `body` is taken as-is and an
/// event without a `body` key is treated as the payload itself.
pub fn normalize_apigw_event(event: Value) -> Result<Value, String> {
    let Some(object) = event.as_object() else {
        return Err("Request payload must be a JSON object".to_string());
    };

    let Some(body) = object.get("body") else {
        return Ok(event);
    };

    match body {
        Value::Null => Ok(json!({})),
        Value::Object(_) => Ok(body.clone()),
        Value::String(text) => {
            serde_json::from_str(text).map_err(|error| format!("Malformed JSON body: {error}"))
        }
        _ => Err("Request body must be a JSON object".to_string()),
    }
}

pub fn validation_error_response(message: &str) -> ApiGatewayResponse {
    error_response(
        400,
        json!({
            "error": "validation_error",
            "message": message,
        }),
    )
}

pub fn store_error_response(error: &StoreError) -> ApiGatewayResponse {
    error_response(
        502,
        json!({
            "error": error.code(),
            "message": error.to_string(),
        }),
    )
}

pub fn misconfiguration_response(error: &ConfigError) -> ApiGatewayResponse {
    error_response(
        500,
        json!({
            "error": "misconfiguration",
            "message": error.to_string(),
        }),
    )
}

pub fn success_response(status_code: u16, payload: impl Serialize) -> ApiGatewayResponse {
    match serde_json::to_string(&payload) {
        Ok(body) => ApiGatewayResponse {
            status_code,
            headers: json_headers(),
            body,
        },
        Err(error) => error_response(
            500,
            json!({
                "error": "serialization_error",
                "message": error.to_string(),
            }),
        ),
    }
}

pub fn error_response(status_code: u16, payload: Value) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json_headers(),
        body: payload.to_string(),
    }
}

fn json_headers() -> Value {
    json!({"Content-Type": "application/json"})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_body_is_parsed_as_json() {
        let payload = normalize_apigw_event(json!({"body": "{\"delivery_id\":\"D1\"}"}))
            .expect("event should normalize");
        assert_eq!(payload, json!({"delivery_id": "D1"}));
    }

    #[test]
    fn event_without_body_is_the_payload() {
        let event = json!({"delivery_id": "D1"});
        let payload = normalize_apigw_event(event.clone()).expect("event should normalize");
        assert_eq!(payload, event);
    }

    #[test]
    fn null_body_becomes_empty_object() {
        let payload =
            normalize_apigw_event(json!({"body": null})).expect("event should normalize");
        assert_eq!(payload, json!({}));
    }

    #[test]
    fn rejects_non_json_body_and_non_object_events() {
        let malformed = normalize_apigw_event(json!({"body": "not json"}))
            .expect_err("event should fail");
        assert!(malformed.starts_with("Malformed JSON body"));

        assert!(normalize_apigw_event(json!(["body"])).is_err());
        assert!(normalize_apigw_event(json!({"body": 12})).is_err());
    }

    #[test]
    fn response_serializes_api_gateway_shape() {
        let response = success_response(200, json!({"message": "ok"}));
        let value = serde_json::to_value(&response).expect("response should serialize");

        assert_eq!(
            value,
            json!({
                "statusCode": 200,
                "headers": {"Content-Type": "application/json"},
                "body": "{\"message\":\"ok\"}",
            })
        );
    }

    #[test]
    fn store_errors_map_to_bad_gateway() {
        let response =
            store_error_response(&StoreError::Unavailable("connection reset".to_string()));
        let body: Value = serde_json::from_str(&response.body).expect("body should parse");

        assert_eq!(response.status_code, 502);
        assert_eq!(body["error"], "storage_unavailable");
        assert_eq!(body["message"], "connection reset");
    }
}
