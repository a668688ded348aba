use std::io;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

mod auth;
mod config;
mod dashboard;
mod db;
mod error;
mod models;
mod routes;
mod task_filter;
mod validation;
mod visibility;

use config::Config;

fn startup_error<E: std::fmt::Display>(context: &str, err: E) -> io::Error {
    error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| startup_error("Invalid configuration", e))?;

    let pool = db::create_pool(&config)
        .await
        .map_err(|e| startup_error("Failed to create pool", e))?;
    db::init_schema(&pool)
        .await
        .map_err(|e| startup_error("Failed to initialise schema", e))?;

    let server_address = config.server_address.clone();
    info!("Server running at http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config.clone()))
            .configure(routes::routes::dashboard_configure)
            .configure(routes::routes::accounts_configure)
            .configure(routes::routes::project_view_configure)
            .configure(routes::routes::task_view_configure)
    })
    .bind(server_address)?
    .run()
    .await
}
