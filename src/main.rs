use std::sync::Arc;

use phishguard::chat::Dispatcher;
use phishguard::classifier::ProcessClassifier;
use phishguard::config::ServiceConfig;
use phishguard::http::{AppState, api_routes};
use phishguard::predict::Predictor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServiceConfig::from_env();

    eprintln!("🛡  Phishguard v{}", env!("CARGO_PKG_VERSION"));
    eprintln!(
        "   Classifier: {} {}",
        config.classifier_program, config.classifier_script
    );
    match config.classifier_timeout {
        Some(t) => eprintln!("   Classifier timeout: {}s", t.as_secs()),
        None => eprintln!("   Classifier timeout: none"),
    }
    eprintln!("   Predict API: http://0.0.0.0:{}/api/predict", config.port);
    eprintln!("   Chat API: http://0.0.0.0:{}/api/chat", config.port);
    eprintln!("   CORS origin: {}\n", config.allowed_origin);

    let mut classifier = ProcessClassifier::new(
        config.classifier_program.clone(),
        vec![config.classifier_script.clone()],
    );
    if let Some(timeout) = config.classifier_timeout {
        classifier = classifier.with_timeout(timeout);
    }

    let state = AppState {
        predictor: Arc::new(Predictor::new(Arc::new(classifier))),
        dispatcher: Arc::new(Dispatcher::with_default_rules()),
    };

    let app = api_routes(state, &config.allowed_origin);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "Phishguard server started");
    axum::serve(listener, app).await?;

    Ok(())
}
