use std::{net::SocketAddr, path::PathBuf};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::AppState;
use service::posts::PostStore;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_and_validate()?;
    let posts_file = PathBuf::from(&cfg.storage.posts_file);

    // 文章存储（文件持久化 data/blog_posts.json），父目录不存在时自动创建
    let store = PostStore::new(&posts_file).await?;
    info!(path = %posts_file.display(), "post store ready");

    let state = AppState::new(store);
    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = cfg.bind_addr().parse()?;
    info!(%addr, "starting blog server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
