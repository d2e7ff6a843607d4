mod common;

use actix_web::{http::StatusCode, test};
use chrono::{Duration, Local};
use serde_json::{json, Value};

use task_api::utils::datetime::format_datetime;

fn names(body: &Value) -> Vec<String> {
    body["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
async fn test_create_user_with_defaults() {
    let db = common::setup_db().await;
    let app = init_app!(db);

    let (status, body) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"name": "Jane Smith", "email": "jane@example.com"}))
    );

    assert_eq!(status, StatusCode::CREATED);
    let user = &body["user"];
    assert_eq!(user["name"], "Jane Smith");
    assert_eq!(user["username"], "Jane Smith");
    assert_eq!(user["role"], "ROLE_USER");
    assert_eq!(user["avatar"], "default.png");
    assert_eq!(user["createdAt"].as_str().unwrap().len(), 19);
    assert!(user.get("passwordHash").is_none());
    assert!(user.get("password_hash").is_none());
}

#[actix_web::test]
async fn test_create_user_requires_name_and_email() {
    let db = common::setup_db().await;
    let app = init_app!(db);

    let (status, body) = call_json!(
        app,
        test::TestRequest::post().uri("/api/users").set_json(json!({}))
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "email is required, name is required");
}

#[actix_web::test]
async fn test_duplicate_email_is_conflict() {
    let db = common::setup_db().await;
    let app = init_app!(db);

    let payload = json!({"name": "John Doe", "email": "john@example.com"});
    let (status, _) = call_json!(
        app,
        test::TestRequest::post().uri("/api/users").set_json(&payload)
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"name": "Johnny", "email": "john@example.com"}))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);
    assert_eq!(body["message"], "A user with this email already exists");
}

#[actix_web::test]
async fn test_update_and_delete_user() {
    let db = common::setup_db().await;
    let app = init_app!(db);

    let (_, body) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"name": "John Doe", "email": "john@example.com"}))
    );
    let id = body["user"]["id"].as_i64().unwrap();

    let (status, body) = call_json!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/users/{}", id))
            .set_json(json!({"email": "john.doe@example.com"}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "John Doe");
    assert_eq!(body["user"]["email"], "john.doe@example.com");

    let (status, body) = call_json!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/users/{}", id))
            .set_json(json!({}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid data");

    let (status, body) = call_json!(
        app,
        test::TestRequest::delete().uri(&format!("/api/users/{}", id))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("User with ID {} deleted successfully", id));

    let (status, body) = call_json!(
        app,
        test::TestRequest::get().uri(&format!("/api/users/{}", id))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("User with ID {} not found", id));
}

#[actix_web::test]
async fn test_delete_user_still_assigned_is_conflict() {
    let db = common::setup_db().await;
    let app = init_app!(db);

    let (_, body) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"name": "John Doe", "email": "john@example.com"}))
    );
    let id = body["user"]["id"].as_i64().unwrap();

    let (status, _) = call_json!(
        app,
        test::TestRequest::post()
            .uri("/api/tasks")
            .set_json(json!({"title": "Assignée", "assignedTo": id}))
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call_json!(
        app,
        test::TestRequest::delete().uri(&format!("/api/users/{}", id))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);
}

#[actix_web::test]
async fn test_search_users_by_name() {
    let db = common::setup_db().await;
    let app = init_app!(db);

    for (name, email) in [
        ("John Doe", "john@example.com"),
        ("Jane Smith", "jane@example.com"),
        ("Johanna Berg", "johanna@example.com"),
    ] {
        call_json!(
            app,
            test::TestRequest::post()
                .uri("/api/users")
                .set_json(json!({"name": name, "email": email}))
        );
    }

    let (status, body) = call_json!(app, test::TestRequest::get().uri("/api/users/search/Joh"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Joh");
    assert_eq!(names(&body), vec!["Johanna Berg", "John Doe"]);

    let (_, body) = call_json!(app, test::TestRequest::get().uri("/api/users"));
    assert_eq!(body["users"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn test_users_with_overdue_tasks() {
    let db = common::setup_db().await;
    let app = init_app!(db);

    let mut ids = Vec::new();
    for (name, email) in [
        ("John Doe", "john@example.com"),
        ("Jane Smith", "jane@example.com"),
        ("Admin User", "admin@example.com"),
    ] {
        let (_, body) = call_json!(
            app,
            test::TestRequest::post()
                .uri("/api/users")
                .set_json(json!({"name": name, "email": email}))
        );
        ids.push(body["user"]["id"].as_i64().unwrap());
    }

    let yesterday = format_datetime(&(Local::now().naive_local() - Duration::days(1)));
    let next_week = format_datetime(&(Local::now().naive_local() + Duration::days(7)));

    // John: deux tâches en retard (une seule ligne attendue), Jane: terminée, Admin: à venir
    for (title, due, status, assignee) in [
        ("Retard 1", &yesterday, "à faire", ids[0]),
        ("Retard 2", &yesterday, "en cours", ids[0]),
        ("Finie", &yesterday, "COMPLETED", ids[1]),
        ("Plus tard", &next_week, "à faire", ids[2]),
    ] {
        let (status_code, _) = call_json!(
            app,
            test::TestRequest::post().uri("/api/tasks").set_json(json!({
                "title": title,
                "dueDate": due,
                "status": status,
                "assignedTo": assignee
            }))
        );
        assert_eq!(status_code, StatusCode::CREATED);
    }

    let (status, body) = call_json!(
        app,
        test::TestRequest::get().uri("/api/users/overdue-tasks")
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["John Doe"]);
}
