use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use taskpilot::auth::AuthMiddleware;
use taskpilot::config::{AgentConfig, Config};
use taskpilot::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let agent_config = AgentConfig::from_env();

    let pool = taskpilot::db::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    taskpilot::db::init_schema(&pool)
        .await
        .expect("Failed to initialize database schema");

    // One HTTP client shared by all chat requests.
    let http_client = reqwest::Client::new();

    log::info!("Starting taskpilot server at {}", config.server_url());
    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(http_client.clone()))
            .app_data(web::Data::new(agent_config.clone()))
            // Middleware runs in reverse registration order: CORS first,
            // then logging, path normalization (so /todos/ matches /todos),
            // and token verification last.
            .wrap(AuthMiddleware)
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .service(routes::health::health)
            .configure(routes::config)
    })
    .bind(bind_addr)?
    .run()
    .await
}
