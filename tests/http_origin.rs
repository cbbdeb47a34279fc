//! HTTP origin resolution against mock backends.

use origin_shim::edge::{BodyEncoding, HeaderEntry, RequestBody, RequestDescriptor};
use origin_shim::origin::OriginKind;
use origin_shim::Origin;

mod common;

#[tokio::test]
async fn forwards_request_and_translates_response() {
    let (addr, mut requests) = common::start_recording_backend(common::raw_response(
        "200 OK",
        &[("Content-Type", "text/plain"), ("X-Upstream", "yes")],
        b"hello",
    ))
    .await;

    let origin = Origin::new(format!("http://{}", addr));
    assert_eq!(origin.kind(), &OriginKind::Http);

    let mut request = RequestDescriptor::new("GET", "/a/b?x=1");
    request.headers.insert(
        "x-multi".into(),
        vec![HeaderEntry::value("first"), HeaderEntry::value("second")],
    );
    request
        .headers
        .insert("connection".into(), vec![HeaderEntry::value("keep-alive")]);

    let response = origin.retrieve(&request).await;

    assert_eq!(response.status, "200");
    assert_eq!(response.body_encoding, BodyEncoding::Text);
    assert_eq!(response.body, "hello");
    assert_eq!(response.header("content-type"), Some("text/plain"));
    assert_eq!(response.header("x-upstream"), Some("yes"));

    let captured = requests.recv().await.unwrap();
    assert_eq!(captured.request_line(), "GET /a/b?x=1 HTTP/1.1");
    assert_eq!(captured.header_values("x-multi"), vec!["first"]);
    assert_eq!(captured.header_values("connection"), vec!["Close"]);
}

#[tokio::test]
async fn gzip_responses_are_base64() {
    let gzip_bytes = [0x1f, 0x8b, 0x08, 0x00, 0xff, 0xfe];
    let (addr, _requests) = common::start_recording_backend(common::raw_response(
        "200 OK",
        &[("Content-Encoding", "gzip")],
        &gzip_bytes,
    ))
    .await;

    let origin = Origin::new(format!("http://{}", addr));
    let response = origin.retrieve(&RequestDescriptor::new("GET", "/bundle.js")).await;

    assert_eq!(response.body_encoding, BodyEncoding::Base64);
    assert_eq!(response.body, "H4sIAP/+");
}

#[tokio::test]
async fn forwards_post_body() {
    let (addr, mut requests) =
        common::start_recording_backend(common::raw_response("201 Created", &[], b"")).await;

    let origin = Origin::new(format!("http://{}", addr));
    let mut request = RequestDescriptor::new("POST", "/submit");
    request.body = Some(RequestBody::from_bytes(b"{\"name\":\"shim\"}"));

    let response = origin.retrieve(&request).await;
    assert_eq!(response.status, "201");

    let captured = requests.recv().await.unwrap();
    assert_eq!(captured.request_line(), "POST /submit HTTP/1.1");
    assert_eq!(captured.body, b"{\"name\":\"shim\"}");
}

#[tokio::test]
async fn base64_request_bodies_are_decoded() {
    let (addr, mut requests) =
        common::start_recording_backend(common::raw_response("200 OK", &[], b"")).await;

    let origin = Origin::new(format!("http://{}", addr));
    let mut request = RequestDescriptor::new("POST", "/upload");
    request.body = Some(RequestBody {
        data: "AP8=".into(),
        encoding: BodyEncoding::Base64,
    });

    origin.retrieve(&request).await;

    let captured = requests.recv().await.unwrap();
    assert_eq!(captured.body, vec![0x00, 0xff]);
}

#[tokio::test]
async fn upstream_errors_pass_through() {
    let (addr, _requests) = common::start_recording_backend(common::raw_response(
        "404 Not Found",
        &[("Set-Cookie", "a=1"), ("Set-Cookie", "b=2")],
        b"missing",
    ))
    .await;

    let origin = Origin::new(format!("http://{}", addr));
    let response = origin.retrieve(&RequestDescriptor::new("GET", "/nope")).await;

    assert_eq!(response.status, "404");
    assert_eq!(response.body, "missing");
    let cookies: Vec<&str> = response.headers["set-cookie"]
        .iter()
        .map(|entry| entry.value.as_str())
        .collect();
    assert_eq!(cookies, vec!["a=1", "b=2"]);
}

#[tokio::test]
async fn refused_connection_is_a_500_response() {
    let addr = common::refused_addr().await;
    let origin = Origin::new(format!("http://{}", addr));

    let response = origin.retrieve(&RequestDescriptor::new("GET", "/")).await;

    assert_eq!(response.status, "500");
    assert_eq!(
        response.status_description.as_deref(),
        Some("Internal Server Error")
    );
    assert_eq!(response.header("content-type"), Some("application/json"));
    let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["code"], 500);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn resolve_surfaces_transport_errors() {
    let addr = common::refused_addr().await;
    let origin = Origin::new(format!("http://{}", addr));

    let err = origin
        .resolve(&RequestDescriptor::new("GET", "/"))
        .await
        .unwrap_err();
    assert!(!err.is_classified());
}

#[tokio::test]
async fn redirects_are_returned_not_followed() {
    let (target, mut target_requests) =
        common::start_recording_backend(common::raw_response("200 OK", &[], b"landed")).await;
    let location = format!("http://{}/landing", target);
    let (addr, mut requests) = common::start_recording_backend(common::raw_response(
        "302 Found",
        &[("Location", location.as_str())],
        b"",
    ))
    .await;

    let origin = Origin::new(format!("http://{}", addr));
    let response = origin.retrieve(&RequestDescriptor::new("GET", "/old")).await;

    assert_eq!(response.status, "302");
    assert_eq!(response.header("location"), Some(location.as_str()));
    assert_eq!(response.body, "");

    let captured = requests.recv().await.unwrap();
    assert_eq!(captured.request_line(), "GET /old HTTP/1.1");
    assert!(target_requests.try_recv().is_err());
}
