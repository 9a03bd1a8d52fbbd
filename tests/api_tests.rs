use serde_json::{json, Value};
use tokio::sync::oneshot;

use devconnector::storage::Storage;
use devconnector::web::{router::build_router, state};

async fn start_server() -> (String, oneshot::Sender<()>) {
    let storage = Storage::open_in_memory().expect("in-memory storage");
    let app = build_router(state::shared(storage));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind server");
    let addr = listener.local_addr().expect("server addr");
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server = axum::serve(listener, app).with_graceful_shutdown(async {
        let _ = shutdown_rx.await;
    });
    tokio::spawn(async move {
        let _ = server.await;
    });

    (format!("http://{}", addr), shutdown_tx)
}

/// Issue a request and return the status with the decoded body. Non-JSON
/// bodies come back as a JSON string.
fn call(method: &str, url: &str, token: Option<&str>, body: Option<Value>) -> (u16, Value) {
    let mut req = ureq::request(method, url);
    if let Some(token) = token {
        req = req.set("Authorization", &format!("Bearer {token}"));
    }
    let result = match body {
        Some(body) => req
            .set("Content-Type", "application/json")
            .send_string(&body.to_string()),
        None => req.call(),
    };
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(e) => panic!("{method} {url} failed: {e}"),
    };
    let status = response.status();
    let text = response.into_string().expect("response body");
    let value = serde_json::from_str(&text).unwrap_or(Value::String(text));
    (status, value)
}

fn register(base_url: &str, name: &str) -> (String, String) {
    let (status, body) = call(
        "POST",
        &format!("{base_url}/api/users/register"),
        None,
        Some(json!({ "name": name, "email": format!("{}@example.com", name.to_lowercase()) })),
    );
    assert_eq!(status, 200, "register failed: {body}");
    (
        body["user"]["id"].as_str().expect("user id").to_string(),
        body["token"].as_str().expect("token").to_string(),
    )
}

#[tokio::test]
async fn smoke_routes_respond() {
    let (base_url, shutdown_tx) = start_server().await;

    tokio::task::spawn_blocking(move || {
        for (path, msg) in [
            ("/api/users/test", "Users Works!"),
            ("/api/profile/test", "Profile Works!"),
            ("/api/posts/test", "Posts Works!"),
        ] {
            let (status, body) = call("GET", &format!("{base_url}{path}"), None, None);
            assert_eq!(status, 200);
            assert_eq!(body["msg"], msg);
        }

        let (status, body) = call("GET", &format!("{base_url}/api/health"), None, None);
        assert_eq!(status, 200);
        assert_eq!(body["status"], "ok");

        let (status, _) = call("GET", &format!("{base_url}/"), None, None);
        assert_eq!(status, 200);
    })
    .await
    .expect("blocking task");

    let _ = shutdown_tx.send(());
}

#[tokio::test]
async fn registration_and_identity() {
    let (base_url, shutdown_tx) = start_server().await;

    tokio::task::spawn_blocking(move || {
        let (user_id, token) = register(&base_url, "Alice");

        let (status, body) = call(
            "GET",
            &format!("{base_url}/api/users/current"),
            Some(&token),
            None,
        );
        assert_eq!(status, 200);
        assert_eq!(body["id"], user_id.as_str());
        assert_eq!(body["name"], "Alice");

        let (status, body) = call(
            "GET",
            &format!("{base_url}/api/users/current"),
            Some("not-a-token"),
            None,
        );
        assert_eq!(status, 401);
        assert_eq!(body["unauthenticated"], "Unauthorized");

        let (status, body) = call(
            "POST",
            &format!("{base_url}/api/users/register"),
            None,
            Some(json!({ "name": "Alice Again", "email": "alice@example.com" })),
        );
        assert_eq!(status, 409);
        assert!(body["email"].is_string());

        let (status, body) = call(
            "POST",
            &format!("{base_url}/api/users/register"),
            None,
            Some(json!({ "name": "A", "email": "nope" })),
        );
        assert_eq!(status, 400);
        assert!(body["name"].is_string());
        assert!(body["email"].is_string());
    })
    .await
    .expect("blocking task");

    let _ = shutdown_tx.send(());
}

#[tokio::test]
async fn profile_lifecycle() {
    let (base_url, shutdown_tx) = start_server().await;

    tokio::task::spawn_blocking(move || {
        let profile_url = format!("{base_url}/api/profile");
        let (alice_id, alice) = register(&base_url, "Alice");
        let (_, bob) = register(&base_url, "Bob");

        let (status, _) = call("GET", &profile_url, None, None);
        assert_eq!(status, 401);

        let (status, body) = call("GET", &profile_url, Some(&alice), None);
        assert_eq!(status, 404);
        assert_eq!(body["noprofile"], "There is no profile for this user");

        let (status, body) = call("POST", &profile_url, Some(&alice), Some(json!({})));
        assert_eq!(status, 400);
        assert_eq!(body["handle"], "Profile handle is required");
        assert!(body["status"].is_string());
        assert!(body["skills"].is_string());

        let (status, body) = call(
            "POST",
            &profile_url,
            Some(&alice),
            Some(json!({
                "handle": "alice",
                "status": "Developer",
                "skills": "rust,sql,http",
                "company": "Acme",
                "twitter": "https://twitter.com/alice"
            })),
        );
        assert_eq!(status, 200, "create failed: {body}");
        assert_eq!(body["skills"], json!(["rust", "sql", "http"]));
        assert_eq!(body["user"]["name"], "Alice");
        assert_eq!(body["social"]["twitter"], "https://twitter.com/alice");
        assert!(body.get("bio").is_none());

        // Sparse update: omitted fields keep their values.
        let (status, body) = call(
            "POST",
            &profile_url,
            Some(&alice),
            Some(json!({ "handle": "alice", "status": "Lead", "skills": "rust", "bio": "hi" })),
        );
        assert_eq!(status, 200);
        assert_eq!(body["status"], "Lead");
        assert_eq!(body["company"], "Acme");
        assert_eq!(body["bio"], "hi");
        assert_eq!(body["social"]["twitter"], "https://twitter.com/alice");

        // Handle collision on create.
        let (status, body) = call(
            "POST",
            &profile_url,
            Some(&bob),
            Some(json!({ "handle": "alice", "status": "Dev", "skills": "go" })),
        );
        assert_eq!(status, 409);
        assert_eq!(body["handle"], "That handle already exists");

        let (status, body) = call(
            "GET",
            &format!("{base_url}/api/profile/handle/alice"),
            Some(&bob),
            None,
        );
        assert_eq!(status, 200);
        assert_eq!(body["user"]["id"], alice_id.as_str());

        let (status, _) = call(
            "GET",
            &format!("{base_url}/api/profile/user/{alice_id}"),
            Some(&bob),
            None,
        );
        assert_eq!(status, 200);

        let (status, body) = call(
            "GET",
            &format!("{base_url}/api/profile/all"),
            Some(&bob),
            None,
        );
        assert_eq!(status, 200);
        assert_eq!(body.as_array().map(Vec::len), Some(1));

        // Experience entries are prepended.
        let experience_url = format!("{profile_url}/experience");
        let (status, first) = call(
            "POST",
            &experience_url,
            Some(&alice),
            Some(json!({ "title": "Intern", "company": "Acme", "from": "2019-01-01", "to": "2019-06-30" })),
        );
        assert_eq!(status, 200);
        let first_id = first["experience"][0]["id"].as_str().unwrap().to_string();

        let (status, body) = call(
            "POST",
            &experience_url,
            Some(&alice),
            Some(json!({ "title": "Engineer", "company": "Initech", "from": "2020-01-01", "current": true })),
        );
        assert_eq!(status, 200);
        assert_eq!(body["experience"][0]["title"], "Engineer");
        assert_eq!(body["experience"][1]["id"], first_id.as_str());

        let (status, body) = call(
            "POST",
            &experience_url,
            Some(&alice),
            Some(json!({ "title": "No dates" })),
        );
        assert_eq!(status, 400);
        assert!(body["company"].is_string());
        assert!(body["from"].is_string());

        let (status, body) = call(
            "DELETE",
            &format!("{experience_url}/{first_id}"),
            Some(&alice),
            None,
        );
        assert_eq!(status, 200);
        assert_eq!(body["experience"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["experience"][0]["title"], "Engineer");

        let (status, body) = call(
            "POST",
            &format!("{profile_url}/education"),
            Some(&alice),
            Some(json!({
                "school": "State U",
                "degree": "BSc",
                "fieldofstudy": "CS",
                "from": "2014-09-01",
                "to": "2018-06-01"
            })),
        );
        assert_eq!(status, 200);
        let edu_id = body["education"][0]["id"].as_str().unwrap().to_string();

        // A second education entry goes first; the earlier one keeps its id.
        let (status, body) = call(
            "POST",
            &format!("{profile_url}/education"),
            Some(&alice),
            Some(json!({
                "school": "Tech Institute",
                "degree": "MSc",
                "fieldofstudy": "CS",
                "from": "2018-09-01",
                "current": true
            })),
        );
        assert_eq!(status, 200);
        assert_eq!(body["education"][0]["school"], "Tech Institute");
        assert_eq!(body["education"][1]["id"], edu_id.as_str());
        let newer_id = body["education"][0]["id"].as_str().unwrap().to_string();

        let (status, body) = call(
            "DELETE",
            &format!("{profile_url}/education/{edu_id}"),
            Some(&alice),
            None,
        );
        assert_eq!(status, 200);
        assert_eq!(body["education"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["education"][0]["id"], newer_id.as_str());

        // Bob can't touch Alice's entries.
        let (status, _) = call(
            "POST",
            &experience_url,
            Some(&bob),
            Some(json!({ "title": "Dev", "company": "Co", "from": "2020-01-01" })),
        );
        assert_eq!(status, 404);

        let (status, body) = call("DELETE", &profile_url, Some(&alice), None);
        assert_eq!(status, 200);
        assert_eq!(body["success"], true);

        let (status, _) = call("GET", &profile_url, Some(&alice), None);
        assert_eq!(status, 401);
    })
    .await
    .expect("blocking task");

    let _ = shutdown_tx.send(());
}

#[tokio::test]
async fn post_interactions() {
    let (base_url, shutdown_tx) = start_server().await;

    tokio::task::spawn_blocking(move || {
        let posts_url = format!("{base_url}/api/posts");
        let (alice_id, alice) = register(&base_url, "Alice");
        let (bob_id, bob) = register(&base_url, "Bob");

        let (status, body) = call("GET", &posts_url, None, None);
        assert_eq!(status, 200);
        assert_eq!(body, json!([]));

        let (status, _) = call(
            "POST",
            &posts_url,
            None,
            Some(json!({ "text": "no token, no post" })),
        );
        assert_eq!(status, 401);

        let (status, body) = call("POST", &posts_url, Some(&alice), Some(json!({ "text": "hi" })));
        assert_eq!(status, 400);
        assert_eq!(body["text"], "Post must be between 10 and 300 characters");

        let (status, first) = call(
            "POST",
            &posts_url,
            Some(&alice),
            Some(json!({ "text": "my very first post" })),
        );
        assert_eq!(status, 200);
        assert_eq!(first["user"], alice_id.as_str());
        assert_eq!(first["name"], "Alice");
        let first_id = first["id"].as_str().unwrap().to_string();

        let (status, second) = call(
            "POST",
            &posts_url,
            Some(&bob),
            Some(json!({ "text": "bob chimes in here" })),
        );
        assert_eq!(status, 200);
        let second_id = second["id"].as_str().unwrap().to_string();

        let (_, body) = call("GET", &posts_url, None, None);
        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec![second_id.as_str(), first_id.as_str()]);

        let (status, body) = call("GET", &format!("{posts_url}/missing"), None, None);
        assert_eq!(status, 404);
        assert_eq!(body["nopostfound"], "No post found with that ID");

        // Like toggles.
        let like_url = format!("{posts_url}/like/{first_id}");
        let unlike_url = format!("{posts_url}/unlike/{first_id}");

        let (status, body) = call("POST", &like_url, Some(&bob), None);
        assert_eq!(status, 200);
        assert_eq!(body["likes"], json!([{ "user": bob_id }]));

        let (status, body) = call("POST", &like_url, Some(&bob), None);
        assert_eq!(status, 400);
        assert_eq!(body["alreadyliked"], "User already liked this post");

        let (status, body) = call("POST", &unlike_url, Some(&alice), None);
        assert_eq!(status, 400);
        assert_eq!(body["notliked"], "You have not yet liked this post");

        let (status, body) = call("POST", &unlike_url, Some(&bob), None);
        assert_eq!(status, 200);
        assert_eq!(body["likes"], json!([]));

        let (status, _) = call("POST", &format!("{posts_url}/like/missing"), Some(&bob), None);
        assert_eq!(status, 404);

        // Comments.
        let (status, body) = call(
            "POST",
            &format!("{posts_url}/comment/{first_id}"),
            Some(&bob),
            Some(json!({ "text": "nice post, alice" })),
        );
        assert_eq!(status, 200);
        assert_eq!(body["comments"][0]["name"], "Bob");
        let comment_id = body["comments"][0]["id"].as_str().unwrap().to_string();

        let comment_url = format!("{posts_url}/comment/{first_id}/{comment_id}");
        let (status, body) = call("DELETE", &comment_url, Some(&alice), None);
        assert_eq!(status, 401);
        assert_eq!(body["notauthorized"], "User not authorized");

        let (status, body) = call("DELETE", &comment_url, Some(&bob), None);
        assert_eq!(status, 200);
        assert_eq!(body["comments"], json!([]));

        // Only the owner deletes.
        let post_url = format!("{posts_url}/{first_id}");
        let (status, _) = call("DELETE", &post_url, Some(&bob), None);
        assert_eq!(status, 401);

        let (status, body) = call("GET", &post_url, None, None);
        assert_eq!(status, 200);
        assert_eq!(body["id"], first_id.as_str());

        let (status, body) = call("DELETE", &post_url, Some(&alice), None);
        assert_eq!(status, 200);
        assert_eq!(body["success"], true);

        let (status, _) = call("GET", &post_url, None, None);
        assert_eq!(status, 404);
    })
    .await
    .expect("blocking task");

    let _ = shutdown_tx.send(());
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let (base_url, shutdown_tx) = start_server().await;

    tokio::task::spawn_blocking(move || {
        let (_, token) = register(&base_url, "Alice");
        let result = ureq::post(&format!("{base_url}/api/posts"))
            .set("Authorization", &format!("Bearer {token}"))
            .set("Content-Type", "application/json")
            .send_string("{not json");
        match result {
            Err(ureq::Error::Status(code, _)) => assert_eq!(code, 400),
            other => panic!("expected 400, got {:?}", other.map(|r| r.status())),
        }
    })
    .await
    .expect("blocking task");

    let _ = shutdown_tx.send(());
}
