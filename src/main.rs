use clap::Parser;
use idea_validator::{
    AppState, app,
    config::Args,
    gemini::GeminiClient,
    rate_limit::RateLimiter,
    validator::IdeaValidator,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // .env first so RUST_LOG and the clap env fallbacks can come from it
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let gemini = GeminiClient::with_timeout(
        args.gemini_api_key.clone(),
        args.gemini_base_url.clone(),
        args.model.clone(),
        args.upstream_timeout(),
    )
    .expect("Failed to build HTTP client");
    let endpoint = gemini.endpoint();

    // usage counts live in this process only, empty at startup
    let state = Arc::new(AppState::new(
        RateLimiter::in_memory(args.rate_limit),
        IdeaValidator::new(Arc::new(gemini)),
    ));

    let router = app(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    tracing::info!("Validator running on http://localhost:{}", args.port);
    tracing::info!("Forwarding to {}", endpoint);
    tracing::info!(
        "Rate limit: {} validations per client per process lifetime",
        args.rate_limit
    );
    tracing::warn!(
        "Client keys come from X-Forwarded-For and can be spoofed; \
         the limit is a demo throttle, not an access control"
    );

    axum::serve(listener, router).await.expect("Failed to start server");
}
