use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use examsight_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .expect("failed to initialize application state");

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(handlers::auth_handler::login)
            .service(handlers::auth_handler::register)
            .service(handlers::user_handler::get_users)
            .service(handlers::health_handler::health_check)
            .service(handlers::analysis_handler::analyze)
            .service(handlers::analysis_handler::generate)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
