use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

use fractal_forge_connector::{HttpHelper, HttpRequest, ReqwestHelper};
use reqwest::Method;
use serde_json::json;

/// Spin up a one-shot HTTP server on a random port, handing back the base URL
/// and a channel that yields the raw request bytes it saw.
fn one_shot_server(status_line: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to random port");
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buffer = [0; 4096];
        let n = stream.read(&mut buffer).unwrap();
        tx.send(String::from_utf8_lossy(&buffer[..n]).to_string()).unwrap();

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
    });

    (format!("http://127.0.0.1:{}", port), rx)
}

#[tokio::test]
async fn get_sends_bearer_header_and_query_string() {
    let (base, seen) = one_shot_server("200 OK", r#"[{"id":1}]"#);

    let helper = ReqwestHelper::new();
    let mut qs = HashMap::new();
    qs.insert("force".to_string(), json!(true));

    let response = helper
        .request(HttpRequest {
            method: Method::GET,
            uri: format!("{}/customers", base),
            headers: vec![("Authorization".to_string(), "Bearer secret-key".to_string())],
            qs,
            body: None,
        })
        .await
        .expect("request failed");

    assert_eq!(response, json!([{"id": 1}]));

    let raw = seen.recv().unwrap().to_lowercase();
    assert!(raw.starts_with("get /customers?force=true"), "raw: {}", raw);
    assert!(raw.contains("authorization: bearer secret-key"), "raw: {}", raw);
}

#[tokio::test]
async fn non_2xx_maps_to_http_error_with_payload() {
    let (base, _seen) = one_shot_server("422 Unprocessable Entity", r#"{"detail":"name is required"}"#);

    let helper = ReqwestHelper::new();
    let err = helper
        .request(HttpRequest {
            method: Method::POST,
            uri: format!("{}/customers", base),
            headers: vec![],
            qs: HashMap::new(),
            body: Some(json!({})),
        })
        .await
        .unwrap_err();

    assert_eq!(err.status, Some(422));
    assert_eq!(err.payload, Some(json!({"detail": "name is required"})));
}

#[tokio::test]
async fn non_json_success_body_falls_back_to_string() {
    let (base, _seen) = one_shot_server("200 OK", "pong");

    let helper = ReqwestHelper::new();
    let response = helper
        .request(HttpRequest {
            method: Method::GET,
            uri: format!("{}/ping", base),
            headers: vec![],
            qs: HashMap::new(),
            body: None,
        })
        .await
        .unwrap();

    assert_eq!(response, json!("pong"));
}
