mod api;
mod database;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let mongo_uri =
        env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

    log::info!("🚀 Starting Account Service...");
    log::info!("📊 Database: {}", mongo_uri);

    // Initialize MongoDB connection, shared by all requests for the
    // lifetime of the process
    let db = database::MongoDB::new(&mongo_uri)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db);

    log::info!("✅ MongoDB connected successfully");
    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::permissive();

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi),
            )
            // Root banner & health check
            .route("/", web::get().to(api::health::root))
            .route("/health", web::get().to(api::health::health_check))
            // User endpoints
            .route("/users", web::post().to(api::users::register))
            .route("/users", web::get().to(api::users::list_users))
            .route("/login", web::post().to(api::users::login))
            .route("/users/block", web::post().to(api::users::block_users))
            .route("/users/unblock", web::post().to(api::users::unblock_users))
            .route("/users/delete", web::post().to(api::users::delete_users))
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
