use actix_web::{middleware::Logger, web, App, HttpServer};
use chrono::Local;
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use mtrade_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::create_cors,
    services::*,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    let config = Config::from_toml().expect("Failed to load configuration file");

    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // Services are built once and shared through web::Data, which clones the
    // inner Arc per worker.
    let pagination = config.pagination.clone();
    let partner_service = web::Data::new(PartnerService::new(pool.clone(), pagination.clone()));
    let request_service = web::Data::new(RequestService::new(pool.clone(), pagination.clone()));
    let payment_service = web::Data::new(PaymentService::new(pool.clone(), pagination.clone()));
    let promo_code_service =
        web::Data::new(PromoCodeService::new(pool.clone(), pagination.clone()));
    let visitor_service = web::Data::new(VisitorService::new(pool.clone(), pagination.clone()));
    let button_service = web::Data::new(ButtonService::new(pool.clone(), pagination.clone()));
    let notification_service =
        web::Data::new(NotificationService::new(pool.clone(), pagination.clone()));

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(partner_service.clone())
            .app_data(request_service.clone())
            .app_data(payment_service.clone())
            .app_data(promo_code_service.clone())
            .app_data(visitor_service.clone())
            .app_data(button_service.clone())
            .app_data(notification_service.clone())
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::partner_config)
                    .configure(handlers::request_config)
                    .configure(handlers::payment_config)
                    .configure(handlers::promo_code_config)
                    .configure(handlers::visitor_config)
                    .configure(handlers::button_config)
                    .configure(handlers::notification_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
