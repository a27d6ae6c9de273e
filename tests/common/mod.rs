//! Shared fixtures for integration tests.

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use segment_router::{
    ControllerId, EntryPoints, HttpException, HttpServer, PathParams, Segment,
    SegmentConfig,
};

/// Controllers exercising every dispatch outcome, all activated.
#[allow(dead_code)]
pub fn sample_segment() -> (std::sync::Arc<Segment>, Vec<ControllerId>) {
    let segment = Segment::new();

    let root = segment
        .controller("RootController")
        .get("", |_req, _params| async { Ok::<_, HttpException>(json!({ "root": true })) })
        .id();

    let params = segment
        .controller("ParamsController")
        .prefix("/things/")
        .get(":id", |_req, params: PathParams| async move {
            Ok::<_, HttpException>(json!({ "param": params.get("id") }))
        })
        .get("special", |_req, _params| async { Ok::<_, HttpException>(json!({ "literal": true })) })
        .get(":a/items/:b", |_req, params: PathParams| async move {
            Ok::<_, HttpException>(json!({ "a": params.get("a"), "b": params.get("b") }))
        })
        .id();

    let outcomes = segment
        .controller("OutcomeController")
        .prefix("outcomes")
        .get("forbidden", |_req, _params| async {
            Err::<Value, _>(HttpException::forbidden("nope"))
        })
        .get("redirect", |_req, _params| async {
            Err::<Value, _>(HttpException::redirect("/api/things/special"))
        })
        .get("empty", |_req, _params| async { Ok::<_, HttpException>(()) })
        .post("echo", |req: Request<Body>, _params| async move {
            let bytes = axum::body::to_bytes(req.into_body(), usize::MAX)
                .await
                .map_err(|e| HttpException::bad_request(e.to_string()))?;
            let value: Value = serde_json::from_slice(&bytes)
                .map_err(|e| HttpException::bad_request(e.to_string()))?;
            Ok::<_, HttpException>(value)
        })
        .get("dup/:x/:x", |_req, _params| async { Ok::<_, HttpException>(()) })
        .id();

    (segment, vec![root, params, outcomes])
}

/// Router for `sample_segment` mounted at the default `/api`.
#[allow(dead_code)]
pub fn sample_router() -> Router {
    let (segment, controllers) = sample_segment();
    let entry_points = segment.activate(&controllers).unwrap();
    router_for(SegmentConfig::default(), entry_points)
}

#[allow(dead_code)]
pub fn router_for(config: SegmentConfig, entry_points: EntryPoints) -> Router {
    HttpServer::new(config, entry_points).router()
}

/// Send one request through the router and collect status, headers and body.
#[allow(dead_code)]
pub async fn send(router: Router, method: Method, uri: &str, body: Body) -> (StatusCode, HeaderMap, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, bytes.to_vec())
}

/// `send` with an empty body, parsing the response as JSON.
#[allow(dead_code)]
pub async fn send_json(router: Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let (status, _, bytes) = send(router, method, uri, Body::empty()).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}
