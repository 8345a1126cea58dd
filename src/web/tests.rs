use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use super::server::router;
use super::state::AppState;
use crate::store::MemoryStore;

fn app() -> Router {
    let state = AppState::new(Arc::new(MemoryStore::new()), "player-registry");
    router(Arc::new(state))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn create(app: &Router, name: &str, experience: u32) -> Value {
    let body = format!(
        r#"{{"name":"{}","title":"Wanderer","race":"ELF","profession":"DRUID",
            "experience":"{}","birthday":"1200000000000","banned":"false"}}"#,
        name, experience
    );
    let (status, bytes) = send(app, Method::POST, "/rest/players", Some(&body)).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_create_then_get() {
    let app = app();
    let created = create(&app, "Arwen", 1000).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["level"], 4);
    assert_eq!(created["untilNextLevel"], 500);
    assert_eq!(created["birthday"], 1_200_000_000_000i64);
    assert_eq!(created["banned"], false);

    let (status, bytes) = send(&app, Method::GET, "/rest/players/1", None).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_accepts_json_literals_and_bans_by_default() {
    let app = app();
    let body = r#"{"name":"Elrond","title":"Lord","race":"ELF","profession":"SORCERER",
                   "experience":0,"birthday":946684800000}"#;
    let (status, bytes) = send(&app, Method::POST, "/rest/players", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    let created: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(created["banned"], true);
    assert_eq!(created["level"], 0);
}

#[tokio::test]
async fn test_invalid_create_is_bare_400() {
    let app = app();
    let body = r#"{"name":"Celebrimbor!!","title":"Smith","race":"ELF",
                   "profession":"WARRIOR","experience":"1","birthday":"1200000000000"}"#;
    let (status, bytes) = send(&app, Method::POST, "/rest/players", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(bytes.is_empty());

    let (status, _) = send(&app, Method::POST, "/rest/players", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_body_must_be_an_object_with_whole_experience() {
    let app = app();
    let array = r#"["Gimli","Lord","DWARF","WARRIOR","10","1200000000000","false"]"#;
    let (status, _) = send(&app, Method::POST, "/rest/players", Some(array)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let fractional = r#"{"name":"Gimli","title":"Lord","race":"DWARF","profession":"WARRIOR",
                         "experience":1000.0,"birthday":1200000000000}"#;
    let (status, _) = send(&app, Method::POST, "/rest/players", Some(fractional)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    create(&app, "Gloin", 10).await;
    let (status, _) = send(&app, Method::POST, "/rest/players/1", Some(r#"{"experience":2.5}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::POST, "/rest/players/1", Some(r#"["Gloin"]"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, bytes) = send(&app, Method::GET, "/rest/players/count", None).await;
    assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), 1);
}

#[tokio::test]
async fn test_get_id_errors() {
    let app = app();
    for bad in ["0", "-5", "abc"] {
        let (status, _) = send(&app, Method::GET, &format!("/rest/players/{}", bad), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "id {}", bad);
    }
    let (status, _) = send(&app, Method::GET, "/rest/players/999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete() {
    let app = app();
    create(&app, "Haldir", 10).await;

    let (status, bytes) = send(&app, Method::DELETE, "/rest/players/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.is_empty());

    let (status, _) = send(&app, Method::DELETE, "/rest/players/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update() {
    let app = app();
    let created = create(&app, "Celeborn", 10).await;

    let (status, bytes) = send(&app, Method::POST, "/rest/players/1", Some("{}")).await;
    assert_eq!(status, StatusCode::OK);
    let unchanged: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(unchanged, created);

    let patch = r#"{"title":"Lord of Lothlorien","experience":"300","banned":"true"}"#;
    let (status, bytes) = send(&app, Method::POST, "/rest/players/1", Some(patch)).await;
    assert_eq!(status, StatusCode::OK);
    let updated: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(updated["name"], "Celeborn");
    assert_eq!(updated["title"], "Lord of Lothlorien");
    assert_eq!(updated["level"], 2);
    assert_eq!(updated["banned"], true);

    let (status, _) = send(&app, Method::POST, "/rest/players/1", Some(r#"{"race":"ENT"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::POST, "/rest/players/77", Some("{}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_and_count() {
    let app = app();
    for (name, exp) in [("Glorfindel", 50), ("Gildor", 100), ("Lindir", 200), ("Erestor", 500)] {
        create(&app, name, exp).await;
    }

    let (status, bytes) = send(
        &app,
        Method::GET,
        "/rest/players?minExperience=100&maxExperience=200&unknown=1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<Value> = serde_json::from_slice(&bytes).unwrap();
    let names: Vec<&str> = listed.iter().filter_map(|p| p["name"].as_str()).collect();
    assert_eq!(names, vec!["Gildor", "Lindir"]);

    let (status, bytes) = send(&app, Method::GET, "/rest/players/count?name=l", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), 2);

    let (_, bytes) = send(
        &app,
        Method::GET,
        "/rest/players?order=EXPERIENCE&pageNumber=1&pageSize=2",
        None,
    )
    .await;
    let page: Vec<Value> = serde_json::from_slice(&bytes).unwrap();
    let names: Vec<&str> = page.iter().filter_map(|p| p["name"].as_str()).collect();
    assert_eq!(names, vec!["Lindir", "Erestor"]);

    let (status, _) = send(&app, Method::GET, "/rest/players?pageSize=big", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let (status, bytes) = send(&app(), Method::GET, "/rest/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["service"], "player-registry");
}
