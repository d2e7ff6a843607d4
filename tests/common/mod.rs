#![allow(dead_code)]

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use task_api::db;
use task_api::utils::jwt::AuthSettings;

/// Peu d'itérations PBKDF2 pour garder les tests rapides
pub const TEST_ITERATIONS: u32 = 1_000;

pub fn auth_settings() -> AuthSettings {
    AuthSettings {
        jwt_secret: "test-secret".to_string(),
        token_ttl_hours: 24,
        password_iterations: TEST_ITERATIONS,
    }
}

/// Base SQLite en mémoire: une seule connexion, sinon chaque connexion voit sa propre base
pub async fn setup_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opt).await.expect("sqlite connection");
    db::sync_schema(&db).await.expect("schema creation");
    db
}

#[macro_export]
macro_rules! init_app {
    ($db:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($db.clone()))
                .app_data(actix_web::web::Data::new($crate::common::auth_settings()))
                .configure(task_api::routes::configure_routes),
        )
        .await
    };
}

/// Envoie une requête JSON et renvoie (status, corps)
#[macro_export]
macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        let response = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = response.status();
        let bytes = actix_web::test::read_body(response).await;
        let body: serde_json::Value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, body)
    }};
}
