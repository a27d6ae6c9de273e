//! End-to-end tests over a real listener.

use std::time::Duration;

use serde_json::{json, Value};
use tokio::net::TcpListener;

use segment_router::{HttpServer, SegmentConfig, Shutdown};

mod common;

#[tokio::test]
async fn test_serves_until_shutdown() {
    let (segment, controllers) = common::sample_segment();
    let entry_points = segment.activate(&controllers).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(SegmentConfig::default(), entry_points);
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap();

    let res = client
        .get(format!("http://{addr}/api/things/5"))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "application/json");
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "param": "5" }));

    let res = client
        .post(format!("http://{addr}/api/outcomes/echo"))
        .json(&json!({ "n": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "n": 1 }));

    let res = client
        .get(format!("http://{addr}/api/outcomes/redirect"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 307);
    assert_eq!(res.headers()["location"], "/api/things/special");

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_concurrent_requests() {
    let (segment, controllers) = common::sample_segment();
    let entry_points = segment.activate(&controllers).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(SegmentConfig::default(), entry_points);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move { server.run(listener, server_shutdown).await });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let mut tasks = Vec::new();
    for i in 0..32 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            let res = client
                .get(format!("http://{addr}/api/things/{i}"))
                .send()
                .await
                .unwrap();
            res.json::<Value>().await.unwrap()
        }));
    }

    for (i, task) in tasks.into_iter().enumerate() {
        assert_eq!(task.await.unwrap(), json!({ "param": i.to_string() }));
    }

    shutdown.trigger();
}
