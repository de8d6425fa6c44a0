//! Integration tests for the Orders tools and the toolkit dispatcher

use httpmock::prelude::*;
use paypal_agent_toolkit::orders::{
    CaptureOrderParameters, CreateOrderParameters, OrderIdParameters, build_order_payload,
    capture_order, create_order, get_order_details,
};
use paypal_agent_toolkit::{Configuration, PayPalClient, PayPalError, PayPalToolkit};
use serde_json::{Value, json};

fn client_for(server: &MockServer) -> PayPalClient {
    PayPalClient::builder()
        .access_token("orders-token")
        .base_url(server.base_url())
        .build()
}

fn captured_order(id: &str) -> Value {
    json!({
        "id": id,
        "status": "COMPLETED",
        "purchase_units": [{
            "reference_id": "default",
            "payments": {
                "captures": [{
                    "id": "3C679366HH908993F",
                    "status": "COMPLETED",
                    "amount": {"currency_code": "USD", "value": "100.00"}
                }]
            }
        }]
    })
}

#[tokio::test]
async fn test_create_order_posts_payload() {
    let params: CreateOrderParameters = serde_json::from_value(json!({
        "currency_code": "USD",
        "items": [{"name": "Hoodie", "item_cost": 40.0, "quantity": 2, "tax_percent": 10.0}],
        "shipping_cost": 12.0,
        "return_url": "https://shop.example.com/return"
    }))
    .unwrap();
    let expected = build_order_payload(&params).unwrap();
    assert_eq!(expected["purchase_units"][0]["amount"]["value"], "100.00");

    let server = MockServer::start();
    let create_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v2/checkout/orders")
            .header("authorization", "Bearer orders-token")
            .json_body(expected.clone());
        then.status(201).json_body(json!({
            "id": "5O190127TN364715T",
            "status": "PAYER_ACTION_REQUIRED",
            "links": [{"rel": "payer-action", "href": "https://www.sandbox.paypal.com/checkoutnow?token=5O190127TN364715T"}]
        }));
    });

    let order = create_order(&client_for(&server), &params).await.unwrap();

    create_mock.assert_calls(1);
    assert_eq!(order["id"], "5O190127TN364715T");
}

#[tokio::test]
async fn test_create_order_rejects_before_request() {
    let server = MockServer::start();
    let create_mock = server.mock(|when, then| {
        when.method(POST).path("/v2/checkout/orders");
        then.status(201).json_body(json!({}));
    });

    let params: CreateOrderParameters =
        serde_json::from_value(json!({"currency_code": "USD", "items": []})).unwrap();
    let err = create_order(&client_for(&server), &params).await.unwrap_err();

    assert!(matches!(err, PayPalError::InvalidParameters(_)));
    create_mock.assert_calls(0);
}

#[tokio::test]
async fn test_capture_order_summary() {
    let server = MockServer::start();
    let capture_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v2/checkout/orders/5O190127TN364715T/capture")
            .header("authorization", "Bearer orders-token");
        then.status(201)
            .json_body(captured_order("5O190127TN364715T"));
    });

    let params = CaptureOrderParameters {
        order_id: "5O190127TN364715T".to_string(),
    };
    let summary = capture_order(&client_for(&server), &params).await.unwrap();

    capture_mock.assert_calls(1);
    assert_eq!(summary.status.as_deref(), Some("COMPLETED"));
    assert_eq!(summary.amount, "USD 100.00");
    assert!(summary.message.contains("5O190127TN364715T"));
}

#[tokio::test]
async fn test_get_order_details_without_capture() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/checkout/orders/8F783829JA718493L");
        then.status(200)
            .json_body(json!({"id": "8F783829JA718493L", "status": "APPROVED"}));
    });

    let params = OrderIdParameters {
        order_id: "8F783829JA718493L".to_string(),
    };
    let summary = get_order_details(&client_for(&server), &params)
        .await
        .unwrap();

    assert_eq!(summary.status.as_deref(), Some("APPROVED"));
    assert_eq!(summary.amount, "N/A");
    assert_eq!(summary.raw["id"], "8F783829JA718493L");
}

#[tokio::test]
async fn test_capture_unprocessable_order() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/v2/checkout/orders/5O190127TN364715T/capture");
        then.status(422).json_body(json!({
            "name": "UNPROCESSABLE_ENTITY",
            "details": [{"issue": "ORDER_NOT_APPROVED"}],
            "message": "The requested action could not be performed, semantically incorrect, or failed business validation."
        }));
    });

    let params = CaptureOrderParameters {
        order_id: "5O190127TN364715T".to_string(),
    };
    let err = capture_order(&client_for(&server), &params)
        .await
        .unwrap_err();

    assert!(matches!(err, PayPalError::Api { status: 422, .. }));
}

// ============================================================================
// Toolkit
// ============================================================================

#[tokio::test]
async fn test_toolkit_runs_enabled_tool() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/v2/checkout/orders/5O190127TN364715T/capture");
        then.status(201)
            .json_body(captured_order("5O190127TN364715T"));
    });

    let configuration = Configuration::new().with_action("orders", "capture", true);
    let toolkit = PayPalToolkit::from_client(client_for(&server), &configuration);

    let output = toolkit
        .run("orders.capture", r#"{"order_id": "5O190127TN364715T"}"#)
        .await
        .unwrap();
    let output: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(output["status"], "COMPLETED");
    assert_eq!(output["amount"], "USD 100.00");
}

#[tokio::test]
async fn test_toolkit_disabled_tool_makes_no_request() {
    let server = MockServer::start();
    let create_mock = server.mock(|when, then| {
        when.method(POST).path("/v2/checkout/orders");
        then.status(201).json_body(json!({"id": "X"}));
    });

    let configuration = Configuration::new().with_action("orders", "create", false);
    let toolkit = PayPalToolkit::from_client(client_for(&server), &configuration);

    let err = toolkit
        .run(
            "orders.create",
            r#"{"currency_code": "USD", "items": [{"name": "Hoodie", "item_cost": 1.0}]}"#,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, PayPalError::ToolNotFound(_)));
    create_mock.assert_calls(0);
}
