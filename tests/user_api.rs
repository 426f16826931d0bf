mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use task_manager_backend::routes;
use task_manager_backend::store::{task_store, user_store};

macro_rules! app {
    ($pool:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($pool.clone()))
                .configure(routes::routes::user_configure),
        )
        .await
    };
}

#[actix_web::test]
async fn create_and_fetch_user() {
    let pool = common::test_pool().await;
    let app = app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({ "name": "Alice" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["name"], json!("Alice"));
    assert_eq!(created["version"], json!(0));

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", created["id"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], json!("Alice"));
    assert_eq!(body["tasks"].as_array().expect("tasks").len(), 0);
}

#[actix_web::test]
async fn create_user_requires_name() {
    let pool = common::test_pool().await;
    let app = app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"].as_array().expect("errors").len(), 1);
}

#[actix_web::test]
async fn list_users_includes_their_tasks() {
    let pool = common::test_pool().await;
    let alice = user_store::create(&pool, "Alice").await.unwrap();
    user_store::create(&pool, "Bob").await.unwrap();
    task_store::create(&pool, "A", "a", "En cours", Some(alice.id)).await.unwrap();
    let app = app!(pool);

    let req = test::TestRequest::get().uri("/api/users").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let users = body.as_array().expect("user array");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["tasks"].as_array().expect("tasks").len(), 1);
    assert_eq!(users[1]["tasks"].as_array().expect("tasks").len(), 0);
}

#[actix_web::test]
async fn update_user_id_mismatch_fails_before_persistence() {
    let pool = common::test_pool().await;
    let user = user_store::create(&pool, "Alice").await.unwrap();
    let app = app!(pool);

    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{}", user.id))
        .set_json(json!({ "id": user.id + 1, "name": "Bob", "version": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("User ID mismatch"));

    let stored = user_store::get(&pool, user.id).await.unwrap();
    assert_eq!(stored.name, "Alice");
}

#[actix_web::test]
async fn update_user_bumps_version() {
    let pool = common::test_pool().await;
    let user = user_store::create(&pool, "Alice").await.unwrap();
    let app = app!(pool);

    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{}", user.id))
        .set_json(json!({ "id": user.id, "name": "Alicia", "version": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let stored = user_store::get(&pool, user.id).await.unwrap();
    assert_eq!(stored.name, "Alicia");
    assert_eq!(stored.version, 1);
}

#[actix_web::test]
async fn stale_version_is_a_conflict_not_a_not_found() {
    let pool = common::test_pool().await;
    let user = user_store::create(&pool, "Alice").await.unwrap();
    user_store::update(&pool, user.id, "Alicia", 0).await.unwrap();
    let app = app!(pool);

    // Replays the version read before the first update.
    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{}", user.id))
        .set_json(json!({ "id": user.id, "name": "Alice encore", "version": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let stored = user_store::get(&pool, user.id).await.unwrap();
    assert_eq!(stored.name, "Alicia");
}

#[actix_web::test]
async fn update_missing_user_is_not_found() {
    let pool = common::test_pool().await;
    let app = app!(pool);

    let req = test::TestRequest::put()
        .uri("/api/users/7")
        .set_json(json!({ "id": 7, "name": "Bob", "version": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user_id"], json!(7));
}

#[actix_web::test]
async fn delete_user_unassigns_their_tasks() {
    let pool = common::test_pool().await;
    let user = user_store::create(&pool, "Alice").await.unwrap();
    let task = task_store::create(&pool, "A", "a", "En cours", Some(user.id)).await.unwrap();
    let app = app!(pool);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/users/{}", user.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let stored = task_store::get(&pool, task.id).await.unwrap();
    assert_eq!(stored.user_id, None);

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", user.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_missing_user_is_not_found() {
    let pool = common::test_pool().await;
    let app = app!(pool);

    let req = test::TestRequest::delete().uri("/api/users/12").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user_id"], json!(12));
}
