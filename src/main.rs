use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::*;
use log::{info, warn};
use std::sync::Arc;

mod api;
mod query;
mod settings;
mod store;

use crate::api::AppState;
use crate::query::QueryService;
use crate::settings::Settings;
use crate::store::QuestionStore;

fn init_logging() {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let settings = Settings::from_env().context("Could not read settings")?;

    // Decks are read once, before serving. Edits on disk need a restart.
    let store = QuestionStore::load_from_directory(&settings.loader, &settings.resources_dir)
        .context("Could not load question decks")?;
    if store.is_empty() {
        warn!("No questions found in {:?}", settings.resources_dir);
    }

    let state = web::Data::new(AppState {
        queries: QueryService::new(Arc::new(store)),
        static_dir: settings.static_dir.clone(),
    });

    info!(
        "Listening on http://{}:{}",
        settings.bind_address, settings.port
    );
    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(Logger::default())
            .configure(|cfg| api::configure(cfg, state))
    })
    .bind((settings.bind_address.as_str(), settings.port))
    .with_context(|| {
        format!(
            "Could not bind to {}:{}",
            settings.bind_address, settings.port
        )
    })?
    .run()
    .await?;

    Ok(())
}
