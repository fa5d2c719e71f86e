use portfolio_feedback::domain::feedback::{FeedState, FeedbackStore, FeedbackView};
use portfolio_feedback::infrastructure::config::{Config, LogFormat};
use portfolio_feedback::infrastructure::db::{check_connection, client};
use portfolio_feedback::infrastructure::repositories::FeedbackRepository;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting portfolio feedback service");

    // Unconfigured environments degrade instead of failing: the rest of the
    // site keeps working, feedback just reports itself unavailable.
    if !config.is_configured() {
        tracing::warn!(
            "Feedback data service is not configured (SERVICE_ENDPOINT_URL / SERVICE_CREDENTIAL); \
             the feedback feature is unavailable"
        );
        return Ok(());
    }

    let pool = client(&config)?;
    check_connection(&pool).await?;
    tracing::info!("Data service connection verified");

    let repository = Arc::new(FeedbackRepository::new(pool));
    let store: Arc<dyn FeedbackStore> = repository.clone();
    let mut view = FeedbackView::new(store, config.feed_limit as usize);

    view.load().await;
    match view.feed_state() {
        FeedState::Loaded if view.feed().is_empty() => {
            tracing::info!("No feedback yet");
        }
        FeedState::Loaded => {
            for entry in view.feed().entries() {
                tracing::info!(
                    name = entry.display_name(),
                    rating = ?entry.rating,
                    created_at = %entry.created_at,
                    "{}",
                    entry.message
                );
            }
        }
        FeedState::LoadFailed(notice) => tracing::warn!("{notice}"),
        FeedState::Loading => {}
    }

    let mut subscription = repository.subscribe_inserts().await?;
    tracing::info!("Subscribed to feedback inserts");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            entry = subscription.next() => match entry {
                Some(entry) => {
                    if view.apply_push(entry.clone()) {
                        tracing::info!(
                            name = entry.display_name(),
                            rating = ?entry.rating,
                            "New feedback: {}",
                            entry.message
                        );
                    }
                }
                None => break,
            },
        }
    }

    subscription.cancel();
    tracing::info!("Shutting down");

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "portfolio_feedback=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "portfolio_feedback=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
