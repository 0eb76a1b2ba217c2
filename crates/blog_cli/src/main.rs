//! `blogd`: HTTP server entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging, migrate the database once.
//! - Serve the blog routes until shutdown.

mod config;

use actix_web::{middleware, web, App, HttpServer};
use blog_core::db::open_db;
use blog_core::init_logging;
use blog_http::SessionFactory;
use config::CommandLine;
use log::info;
use std::error::Error;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cwd = std::env::current_dir()?;
    let config = CommandLine::parse_args().resolve(&cwd);

    init_logging(config.log_level, &config.log_dir)?;

    // Fail fast on an unreadable or too-new database instead of on first request.
    drop(open_db(&config.db_path)?);

    info!(
        "event=server_start module=cli status=ok bind={} db_path={} version={}",
        config.bind,
        config.db_path.display(),
        blog_core::core_version()
    );

    let sessions = web::Data::new(SessionFactory::new(config.db_path.clone()));
    HttpServer::new(move || {
        App::new()
            .app_data(sessions.clone())
            .wrap(middleware::Logger::default())
            .configure(blog_http::configure)
    })
    .bind(config.bind)?
    .run()
    .await?;

    info!("event=server_stop module=cli status=ok");
    Ok(())
}
