mod config;
mod core;
mod middleware;
mod modules;

use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use config::Config;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use middleware::RequestId;
use modules::categories::repositories::CategoryRepository;
use modules::categories::services::CategoryService;
use modules::customers::repositories::CustomerRepository;
use modules::customers::services::CustomerService;
use modules::discounts::repositories::DiscountRepository;
use modules::discounts::services::DiscountService;
use modules::duplicatas::repositories::MySqlDuplicataRepository;
use modules::duplicatas::services::{CommissionService, DuplicataService};
use modules::orders::repositories::OrderRepository;
use modules::orders::services::OrderService;
use modules::products::repositories::ProductRepository;
use modules::products::services::ProductService;
use modules::reports::repositories::ReportRepository;
use modules::reports::services::ReportService;
use modules::transport::repositories::TransportRepository;
use modules::transport::services::TransportService;
use modules::users::repositories::UserRepository;
use modules::users::services::UserService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "distriplast=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting Distriplast Sales Management Backend");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    // Repositories
    let order_repo = Arc::new(OrderRepository::new(db_pool.clone()));
    let duplicata_repo = Arc::new(MySqlDuplicataRepository::new(db_pool.clone()));
    let customer_repo = Arc::new(CustomerRepository::new(db_pool.clone()));
    let product_repo = Arc::new(ProductRepository::new(db_pool.clone()));
    let category_repo = Arc::new(CategoryRepository::new(db_pool.clone()));
    let transport_repo = Arc::new(TransportRepository::new(db_pool.clone()));
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let discount_repo = Arc::new(DiscountRepository::new(db_pool.clone()));
    let report_repo = Arc::new(ReportRepository::new(db_pool.clone()));

    // Services
    let discount_service = Arc::new(DiscountService::new(
        discount_repo,
        Duration::from_secs(config.app.settings_cache_ttl_secs),
    ));
    let commission_service = Arc::new(CommissionService::new(
        duplicata_repo.clone(),
        order_repo.clone(),
    ));
    let order_service = Arc::new(OrderService::new(
        order_repo.clone(),
        discount_service.clone(),
        commission_service.clone(),
    ));
    let duplicata_service = Arc::new(DuplicataService::new(
        duplicata_repo,
        order_repo,
        commission_service,
    ));
    let customer_service = Arc::new(CustomerService::new(customer_repo));
    let product_service = Arc::new(ProductService::new(product_repo));
    let category_service = Arc::new(CategoryService::new(category_repo));
    let transport_service = Arc::new(TransportService::new(transport_repo));
    let user_service = Arc::new(UserService::new(user_repo));
    let report_service = Arc::new(ReportService::new(report_repo));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestId)
            .wrap(cors)
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(order_service.clone()))
            .app_data(web::Data::new(duplicata_service.clone()))
            .app_data(web::Data::new(customer_service.clone()))
            .app_data(web::Data::new(product_service.clone()))
            .app_data(web::Data::new(category_service.clone()))
            .app_data(web::Data::new(transport_service.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(discount_service.clone()))
            .app_data(web::Data::new(report_service.clone()))
            // Nested duplicata routes share the /orders prefix; actix scopes
            // do not backtrack, so the more specific scope registers first.
            .configure(modules::duplicatas::controllers::configure)
            .configure(modules::orders::controllers::configure)
            .configure(modules::customers::controllers::configure)
            .configure(modules::products::controllers::configure)
            .configure(modules::categories::controllers::configure)
            .configure(modules::transport::controllers::configure)
            .configure(modules::users::controllers::configure)
            .configure(modules::discounts::controllers::configure)
            .configure(modules::reports::controllers::configure)
            .route("/health", web::get().to(health_check))
            .route("/", web::get().to(index))
    })
    .workers(workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "distriplast"
    }))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "Distriplast Sales Management Backend",
        "version": "0.1.0",
        "status": "running"
    }))
}
