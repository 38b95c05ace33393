//! HTTP service tests against a mock `/math/add` endpoint.
//!
//! Covers the three wire shapes, the uniform failure mapping and a full
//! session round-trip.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use addcalc::prelude::*;
use httpmock::Method::{GET, POST};
use httpmock::MockServer;
use serde_json::json;

fn scripted_ids(keys: &'static [&'static str]) -> impl FnMut() -> String {
    let mut next = keys.iter().cycle();
    move || next.next().copied().unwrap_or("zz").to_string()
}

fn service(server: &MockServer) -> HttpArithmetic {
    HttpArithmetic::new(format!("{}/math/add", server.base_url()))
}

// ===== Wire shape tests =====

#[tokio::test]
async fn path_params_hit_positional_url() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/math/add/2/3");
        then.status(200).json_body(json!({"result": 5}));
    });

    let request = shape("2+3", Method::PathParams, &mut scripted_ids(&["ab"])).unwrap();
    let value = service(&server).add(&request).await.unwrap();

    mock.assert_calls(1);
    assert_eq!(value.to_string(), "5");
}

#[tokio::test]
async fn path_params_carry_negative_operands() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/math/add/-2/3.5");
        then.status(200).json_body(json!({"result": 1.5}));
    });

    let request = shape("(-2)+3.5", Method::PathParams, &mut scripted_ids(&["ab"])).unwrap();
    let value = service(&server).add(&request).await.unwrap();

    mock.assert_calls(1);
    assert_eq!(value.to_string(), "1.5");
}

#[tokio::test]
async fn query_params_use_drawn_keys() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/math/add")
            .query_param("ab", "1")
            .query_param("cd", "-2")
            .query_param("ef", "3");
        then.status(200).json_body(json!({"result": 2}));
    });

    let mut ids = scripted_ids(&["ab", "cd", "ef"]);
    let request = shape("1+(-2)+3", Method::QueryParams, &mut ids).unwrap();
    let value = service(&server).add(&request).await.unwrap();

    mock.assert_calls(1);
    assert_eq!(value.to_string(), "2");
}

#[tokio::test]
async fn form_post_sends_multipart_fields() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/math/add/")
            .body_includes("name=\"ab\"")
            .body_includes("name=\"cd\"");
        then.status(200).json_body(json!({"result": 9}));
    });

    let request = shape("4+5", Method::FormPost, &mut scripted_ids(&["ab", "cd"])).unwrap();
    let value = service(&server).add(&request).await.unwrap();

    mock.assert_calls(1);
    assert_eq!(value.to_string(), "9");
}

#[tokio::test]
async fn quoted_result_is_accepted() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/math/add/1/1");
        then.status(200).json_body(json!({"result": "2"}));
    });

    let request = shape("1+1", Method::PathParams, &mut scripted_ids(&["ab"])).unwrap();
    let value = service(&server).add(&request).await.unwrap();
    assert_eq!(value, ResultValue::Text("2".into()));
}

// ===== Failure mapping tests =====

#[tokio::test]
async fn server_error_maps_to_remote_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/math/add/2/3");
        then.status(500).body("boom");
    });

    let request = shape("2+3", Method::PathParams, &mut scripted_ids(&["ab"])).unwrap();
    let err = service(&server).add(&request).await.unwrap_err();
    assert_eq!(err, CalcError::RemoteComputationFailed);
}

#[tokio::test]
async fn missing_result_field_maps_to_remote_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/math/add/2/3");
        then.status(200).json_body(json!({"sum": 5}));
    });

    let request = shape("2+3", Method::PathParams, &mut scripted_ids(&["ab"])).unwrap();
    let err = service(&server).add(&request).await.unwrap_err();
    assert_eq!(err, CalcError::RemoteComputationFailed);
}

#[tokio::test]
async fn invalid_json_maps_to_remote_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/math/add/");
        then.status(200).body("not json");
    });

    let request = shape("2+3", Method::FormPost, &mut scripted_ids(&["ab", "cd"])).unwrap();
    let err = service(&server).add(&request).await.unwrap_err();
    assert_eq!(err, CalcError::RemoteComputationFailed);
}

// ===== Session round-trip tests =====

#[tokio::test]
async fn session_shows_remote_sum() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/math/add/2/3");
        then.status(200).json_body(json!({"result": 5}));
    });

    let config = CalcConfig::new().with_endpoint(format!("{}/math/add", server.base_url()));
    let client = HttpArithmetic::from_config(&config);
    let mut session = Session::new(config);
    for key in [Key::Digit(2), Key::Plus, Key::Digit(3), Key::Equals] {
        session.press(key);
    }
    let method = session.menu().and_then(|menu| menu.choose(0)).unwrap();
    session
        .compute(method, &client, &mut RandomIds::seeded(1))
        .await
        .unwrap();

    mock.assert_calls(1);
    assert_eq!(session.state().equation(), "2+3=5");
    assert!(session.state().error().is_none());
    assert!(!session.is_loading());
}

#[tokio::test]
async fn session_keeps_equation_on_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/math/add");
        then.status(503);
    });

    let config = CalcConfig::new().with_endpoint(format!("{}/math/add", server.base_url()));
    let client = HttpArithmetic::from_config(&config);
    let mut session = Session::new(config);
    for key in [Key::Digit(2), Key::Plus, Key::Digit(3)] {
        session.press(key);
    }
    session
        .compute(Method::QueryParams, &client, &mut RandomIds::seeded(1))
        .await
        .unwrap();

    assert_eq!(session.state().equation(), "2+3");
    assert_eq!(session.state().error(), Some(FAILURE_MESSAGE));
    assert!(session.state().showing_result());
}
