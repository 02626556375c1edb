#![cfg(feature = "http_api")]

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tower::util::ServiceExt;
use workforce_tool::seed::seed_workforce;
use workforce_tool::task::Task;
use workforce_tool::{http_api, Workforce};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn new_router(workforce: Workforce) -> axum::Router {
    let state = http_api::AppState::new(workforce);
    http_api::router(state)
}

fn seeded_router() -> axum::Router {
    new_router(seed_workforce(d(2023, 6, 1)))
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&value).unwrap()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn state_returns_the_whole_snapshot_without_passwords() {
    let app = seeded_router();
    let (status, state) = send(&app, "GET", "/state", None).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(state["users"].as_array().unwrap().len(), 5);
    assert_eq!(state["averias"].as_array().unwrap().len(), 1);
    assert_eq!(state["obras"].as_array().unwrap().len(), 1);
    assert_eq!(state["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(state["cronograma"][0]["id"], "timeline-t1");
    for user in state["users"].as_array().unwrap() {
        assert!(user.get("password").is_none());
    }
}

#[tokio::test]
async fn login_accepts_known_users_and_rejects_strangers() {
    let app = seeded_router();

    let (status, user) = send(
        &app,
        "POST",
        "/login",
        Some(json!({ "username": "admin", "password": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["role"], "MASTER");
    assert!(user.get("password").is_none());

    let (status, body) = send(
        &app,
        "POST",
        "/login",
        Some(json!({ "username": "nobody", "password": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn task_lifecycle_with_advisory_conflicts() {
    let app = seeded_router();

    // A task for Juan on the empty obra project
    let mut task = Task::new("tA", "p2", "Cableado nave", d(2024, 1, 1), 40.0);
    task.assigned_user_ids = vec!["u2".to_string()];
    let (status, created) = send(
        &app,
        "POST",
        "/projects/p2/tasks",
        Some(serde_json::to_value(&task).unwrap()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["conflicts"], json!([]));
    assert_eq!(created["project"]["tasks"][0]["endDate"], "2024-01-05");

    // Overlapping second task for the same worker: saved, but flagged
    let mut clash = Task::new("tB", "p2", "Cuadro eléctrico", d(2024, 1, 5), 8.0);
    clash.assigned_user_ids = vec!["u2".to_string()];
    let (status, created) = send(
        &app,
        "POST",
        "/projects/p2/tasks",
        Some(serde_json::to_value(&clash).unwrap()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["conflicts"], json!(["Juan Electricista"]));
    assert_eq!(created["project"]["tasks"].as_array().unwrap().len(), 2);

    // Rescheduling clear of the clash empties the warning list
    let mut moved = clash.clone();
    moved.start_date = d(2024, 1, 8);
    let (status, updated) = send(
        &app,
        "PUT",
        "/projects/p2/tasks/tB",
        Some(serde_json::to_value(&moved).unwrap()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["conflicts"], json!([]));

    // Delete and confirm the timeline follows
    let (status, project) = send(&app, "DELETE", "/projects/p2/tasks/tB", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(project["tasks"].as_array().unwrap().len(), 1);

    let (_, timeline) = send(&app, "GET", "/cronograma", None).await;
    assert!(
        timeline
            .as_array()
            .unwrap()
            .iter()
            .all(|entry| entry["taskId"] != "tB")
    );
}

#[tokio::test]
async fn status_route_enforces_the_transition_table() {
    let app = seeded_router();

    let (status, task) = send(
        &app,
        "PUT",
        "/projects/p1/tasks/t1/status",
        Some(json!({ "status": "Completado", "role": "OPERARIO" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task["status"], "Completado");

    let (status, body) = send(
        &app,
        "PUT",
        "/projects/p1/tasks/t1/status",
        Some(json!({ "status": "Revisado", "role": "OPERARIO" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    let (status, task) = send(
        &app,
        "PUT",
        "/projects/p1/tasks/t1/status",
        Some(json!({ "status": "Revisado", "role": "MASTER" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task["status"], "Revisado");
}

#[tokio::test]
async fn project_crud_and_missing_ids() {
    let app = seeded_router();

    let (status, project) = send(
        &app,
        "POST",
        "/projects",
        Some(json!({
            "id": "p3",
            "name": "Ampliación Taller",
            "client": "ACME",
            "type": "Obra",
            "tasks": []
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(project["type"], "Obra");

    let (status, updated) = send(
        &app,
        "PUT",
        "/projects/p3",
        Some(json!({
            "id": "p3",
            "name": "Ampliación Taller Norte",
            "client": "ACME",
            "type": "Obra",
            "tasks": []
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Ampliación Taller Norte");

    let (status, _) = send(&app, "DELETE", "/projects/p3", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "DELETE", "/projects/p3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn material_requests_flow_through_the_warehouse() {
    let app = seeded_router();

    let (status, request) = send(
        &app,
        "POST",
        "/materials",
        Some(json!({
            "id": "m1",
            "taskId": "t1",
            "projectId": "p1",
            "requestedByUserId": "u2",
            "items": ["fusibles", "cable 2.5mm"],
            "status": "Pendiente",
            "createdAt": "2023-06-01T08:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(request["status"], "Pendiente");

    let (status, request) = send(
        &app,
        "PUT",
        "/materials/m1",
        Some(json!({
            "id": "m1",
            "taskId": "t1",
            "projectId": "p1",
            "requestedByUserId": "u2",
            "items": ["fusibles", "cable 2.5mm"],
            "status": "En Preparación",
            "createdAt": "2023-06-01T08:00:00Z",
            "handledByUserId": "u4"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(request["status"], "En Preparación");
    assert_eq!(request["handledByUserId"], "u4");
}

#[tokio::test]
async fn user_management_round_trip() {
    let app = seeded_router();

    let (status, user) = send(
        &app,
        "POST",
        "/users",
        Some(json!({
            "id": "u6",
            "name": "Carla Camionera",
            "username": "carla",
            "password": "secreto",
            "role": "OPERARIO",
            "specialty": "Camionero"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(user.get("password").is_none());

    let (status, logged_in) = send(
        &app,
        "POST",
        "/login",
        Some(json!({ "username": "carla", "password": "secreto" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logged_in["specialty"], "Camionero");

    let (status, _) = send(&app, "DELETE", "/users/u6", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", "/users/u6", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
