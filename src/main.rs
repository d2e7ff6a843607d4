use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use task_api::config::AppConfig;
use task_api::{db, routes, seed};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    // RUST_LOG prioritaire, sinon LOG_LEVEL (SeaORM/sqlx limités aux warnings)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},sqlx=warn,sea_orm=warn", config.log_level))
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
    config.warn_if_insecure();

    info!("🔌 Connecting to database...");
    let db = db::establish_connection(&config).await.map_err(|e| {
        error!("Failed to connect to database: {}", e);
        std::io::Error::other(e.to_string())
    })?;
    info!("✅ Database connected!");

    db::sync_schema(&db)
        .await
        .map_err(|e| std::io::Error::other(format!("Schema creation failed: {}", e)))?;

    if config.seed_demo_data {
        seed::seed_demo_data(&db, config.password_iterations)
            .await
            .map_err(|e| std::io::Error::other(format!("Demo data seeding failed: {}", e)))?;
    }

    let auth_settings = config.auth_settings();
    let bind_address = (config.server_host.clone(), config.server_port);

    info!("🚀 Starting server on http://{}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(auth_settings.clone()))
            .configure(routes::configure_routes)
    })
    .bind(bind_address)?
    .run()
    .await
}
