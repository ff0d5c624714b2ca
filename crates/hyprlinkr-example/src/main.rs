//! Hyprlinkr example service.
//!
//! Loads the route table from `hyprlinkr.toml` (or the file named by
//! `HYPRLINKR_CONFIG`), routes a request for the API root and prints the
//! home resource with its links as JSON. Every link is then parsed back
//! into the action it addresses.
//!
//! ```text
//! cargo run -p hyprlinkr-example
//! HYPRLINKR__LOGGING__FORMAT=json cargo run -p hyprlinkr-example
//! ```

mod controllers;
mod resources;

use std::env;
use std::sync::Arc;

use anyhow::Context;
use hyprlinkr::{ResourceLinkParser, RouteLinker};
use hyprlinkr_config::{ConfigLoader, HyprlinkrConfig};
use hyprlinkr_core::{ApiConfiguration, ControllerRegistry, Request};
use tracing::{info, warn};

use crate::controllers::{HomeController, OrdersController, SearchController};
use crate::resources::HomeResource;

const DEFAULT_CONFIG: &str = include_str!("../hyprlinkr.toml");
const BASE_URI: &str = "http://localhost:8080/";

fn load_config() -> anyhow::Result<HyprlinkrConfig> {
    let loader = ConfigLoader::new().with_dotenv()?;
    let loader = match env::var("HYPRLINKR_CONFIG") {
        Ok(path) => loader
            .with_file(&path)
            .with_context(|| format!("loading configuration from {path}"))?,
        Err(_) => loader.with_string(DEFAULT_CONFIG, "toml")?,
    };
    Ok(loader.with_env_prefix("HYPRLINKR").load()?)
}

fn registry() -> ControllerRegistry {
    let mut registry = ControllerRegistry::new();
    registry
        .register::<HomeController>()
        .register::<OrdersController>()
        .register::<SearchController>();
    registry
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    hyprlinkr_telemetry::init_logging(&config.logging)?;

    let configuration = Arc::new(ApiConfiguration::new(config.route_table()?, registry()));
    let request = Request::parse(BASE_URI, Arc::clone(&configuration))?.route();
    info!(uri = BASE_URI, routed = request.route_data().is_some(), "handling request");

    let linker = RouteLinker::from_config(request.clone(), &config.linker)?;
    let home = HomeResource::for_request(&request, &linker)?;

    let orders = linker
        .get_uri_async::<OrdersController, _>(|c| c.get_page(3))
        .await?;
    info!(uri = %orders, "computed link asynchronously");

    println!("{}", serde_json::to_string_pretty(&home)?);

    let parser = ResourceLinkParser::new(configuration);
    for link in &home.links {
        let uri = link.href.parse()?;
        match parser.parse(&uri) {
            Ok(context) => info!(
                rel = %link.rel,
                controller = context.controller().type_name(),
                action = context.action().name(),
                arguments = %serde_json::Value::Object(context.arguments().clone().into_iter().collect()),
                "link resolves"
            ),
            Err(e) => warn!(rel = %link.rel, error = %e, "link does not resolve"),
        }
    }

    Ok(())
}
