//! Demo controllers served by the binary.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use segment_router::{ControllerId, HttpException, PathParams, Reply, Segment};

#[derive(Debug, Clone, Serialize)]
struct User {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct NewUser {
    name: String,
}

/// In-memory users, shared by the users controller's handlers.
#[derive(Default)]
struct UserStore {
    users: DashMap<u64, User>,
    next_id: AtomicU64,
}

impl UserStore {
    fn seeded() -> Self {
        let store = Self::default();
        store.insert("ada".to_string());
        store
    }

    fn insert(&self, name: String) -> User {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let user = User { id, name };
        self.users.insert(id, user.clone());
        user
    }

    fn get(&self, id: u64) -> Result<User, HttpException> {
        self.users
            .get(&id)
            .map(|u| u.value().clone())
            .ok_or_else(|| HttpException::not_found(format!("User {id} not found")))
    }

    fn list(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by_key(|u| u.id);
        users
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(request: Request<Body>) -> Result<T, HttpException> {
    let bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .map_err(|e| HttpException::bad_request(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| HttpException::bad_request(e.to_string()))
}

/// Register the demo controllers and return the ids to activate.
pub fn register(segment: &Segment, mount_path: &str) -> Vec<ControllerId> {
    let store = Arc::new(UserStore::seeded());

    let status = segment
        .controller("StatusController")
        .get("", |_req, _params| async {
            Ok::<_, HttpException>(json!({
                "status": "ok",
                "version": env!("CARGO_PKG_VERSION"),
            }))
        })
        .id();

    let list = Arc::clone(&store);
    let me = Arc::clone(&store);
    let show = Arc::clone(&store);
    let create = Arc::clone(&store);
    let remove = Arc::clone(&store);
    let users = segment
        .controller("UsersController")
        .prefix("users")
        .get("", move |_req, _params| {
            let store = Arc::clone(&list);
            async move { Reply::json(&store.list()) }
        })
        .get("me", move |_req, _params| {
            let store = Arc::clone(&me);
            async move { Reply::json(&store.get(1)?) }
        })
        .get(":id", move |_req, params: PathParams| {
            let store = Arc::clone(&show);
            async move { Reply::json(&store.get(params.parse("id")?)?) }
        })
        .post("", move |req, _params| {
            let store = Arc::clone(&create);
            async move {
                let new_user: NewUser = read_json(req).await?;
                if new_user.name.trim().is_empty() {
                    return Err(HttpException::bad_request("name must not be empty"));
                }
                Reply::json(&store.insert(new_user.name))
            }
        })
        .delete(":id", move |_req, params: PathParams| {
            let store = Arc::clone(&remove);
            async move {
                let id: u64 = params.parse("id")?;
                store
                    .users
                    .remove(&id)
                    .map(|_| ())
                    .ok_or_else(|| HttpException::not_found(format!("User {id} not found")))
            }
        })
        .id();

    let users_location = format!("{}/users", mount_path.trim_end_matches('/'));
    let legacy = segment
        .controller("LegacyController")
        .prefix("legacy")
        .get("users", move |_req, _params| {
            let location = users_location.clone();
            async move { Err::<Value, _>(HttpException::redirect(location)) }
        })
        .get("teapot", |_req, _params| async {
            Err::<Value, _>(HttpException::new(StatusCode::IM_A_TEAPOT, "short and stout"))
        })
        .id();

    vec![status, users, legacy]
}
