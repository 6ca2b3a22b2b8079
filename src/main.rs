use anyhow::Context;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod model;
mod registry;
mod service;

use config::Environment;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    std::panic::set_hook(Box::new(tracing_panic::panic_hook));

    let environment = Environment::new_or_prod();
    init_tracing(environment);

    let config = config::Config::from_env().context("missing environment variables")?;
    api::setup_and_serve(config).await?;
    Ok(())
}

fn init_tracing(environment: Environment) {
    match environment {
        Environment::Local => {
            tracing_subscriber::fmt()
                .with_ansi(true)
                .with_env_filter(EnvFilter::from_default_env())
                .with_file(true)
                .with_line_number(true)
                .pretty()
                .init();
        }
        Environment::Production | Environment::Develop => {
            tracing_subscriber::fmt()
                .with_ansi(false)
                .with_env_filter(EnvFilter::from_default_env())
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .flatten_event(true)
                .init();
        }
    }
}
