use clap::Parser;
use stillcut_api::cli::Args;

// Use mimalloc as the global allocator; decode/resize churn through large
// short-lived buffers on every render.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // .env first so clap's env fallbacks can see it
    dotenvy::dotenv().ok();
    let config = Args::parse().into_config();

    let (_state, router) = stillcut_api::setup::initialize_app(config.clone()).await?;

    stillcut_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
