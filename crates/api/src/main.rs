use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    salesbridge_observability::init();

    let addr = std::env::var("SALES_API_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string());
    let app = salesbridge_api::app::build_app(salesbridge_api::app::services::env_source());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
