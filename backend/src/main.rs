use std::sync::Arc;

use clap::Parser;
use maritime_backend::{
    AppState, config::Args, create_router, error::LoadError, loader, models::RouteCollection,
    store::RouteStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "maritime_backend=debug,backend=debug,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let store = Arc::new(RouteStore::new());

    match load_initial(&args).await {
        Ok(collection) => store.replace(collection),
        Err(err) => {
            tracing::warn!("starting without routes, initial load failed: {err}");
        }
    }

    let app = create_router(AppState { store });

    tracing::info!("starting backend on http://{}", args.bind);
    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .expect("bind listener");
    axum::serve(listener, app).await.expect("serve");
}

async fn load_initial(args: &Args) -> Result<RouteCollection, LoadError> {
    match &args.routes_url {
        Some(url) => loader::load_from_url(url, args.fetch_timeout()).await,
        None => {
            tracing::info!("loading routes from {:?}", args.routes);
            loader::load_from_file(&args.routes)
        }
    }
}
