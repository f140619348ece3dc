use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;
use std::sync::Arc;

use tasktracker::auth::{AuthMiddleware, PasswordHasher, TokenManager};
use tasktracker::config::Config;
use tasktracker::repository::{PgTaskRepository, PgUserRepository};
use tasktracker::routes::{self, health};
use tasktracker::services::{QueueNotifier, Services, TaskService, UserService};

/// Capacity of the in-process notification queue.
const NOTIFICATION_QUEUE_CAPACITY: usize = 256;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    // Fatal misconfiguration aborts startup; it is never handled per-request.
    let token_manager =
        TokenManager::new(&config.jwt_secret).expect("JWT_SECRET must not be empty");
    let hasher = PasswordHasher::new(config.password_salt.clone());
    let notifier = QueueNotifier::start(NOTIFICATION_QUEUE_CAPACITY);

    let services = web::Data::new(Services {
        users: UserService::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            hasher,
            token_manager.clone(),
            notifier,
            config.access_token_ttl,
            config.refresh_token_ttl,
        ),
        tasks: TaskService::new(Arc::new(PgTaskRepository::new(pool))),
    });
    let token_manager = web::Data::new(token_manager);

    log::info!("Starting server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(services.clone())
            .app_data(token_manager.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
