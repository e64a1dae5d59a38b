use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::io;

use todo_api::{
    auth::{Passwords, TokenService},
    config::Config,
    db, routes,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(io::Error::other)?;

    let pool = db::connect(&config).await.map_err(|e| {
        log::error!("failed to connect to database: {}", e);
        io::Error::other(e)
    })?;

    if config.init_schema {
        db::init_schema(&pool).await.map_err(|e| {
            log::error!("failed to initialize schema: {}", e);
            io::Error::other(e)
        })?;
        log::info!("database schema is up to date");
    }

    let passwords = Passwords::new(config.bcrypt_cost).map_err(|e| io::Error::other(e.to_string()))?;
    let tokens = TokenService::new(config.jwt_secret.as_bytes(), config.token_ttl());

    let pool = web::Data::new(pool);
    let passwords = web::Data::new(passwords);
    let tokens = web::Data::new(tokens);

    log::info!("starting todo-api at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(pool.clone())
            .app_data(passwords.clone())
            .app_data(tokens.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
