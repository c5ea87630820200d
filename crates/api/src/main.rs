use tasklane_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tasklane_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });

    let config = AppConfig::load()?;
    let app = tasklane_api::app::build_app(config, jwt_secret);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
