//! Gramin Sahayak server binary.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gramin_sahayak::adapters::classifier::{
    HttpClassifier, HttpClassifierConfig, LinearModelClassifier,
};
use gramin_sahayak::adapters::delivery::{
    DisabledSpeechSynthesizer, HttpSpeechConfig, HttpSpeechSynthesizer, LibreTranslateConfig,
    LibreTranslateTranslator, LogTransport, NoopTranslator,
};
use gramin_sahayak::adapters::http::{create_app, IntakeAppState, LoanAppState};
use gramin_sahayak::adapters::storage::{InMemoryPreferenceStore, InMemorySessionStore};
use gramin_sahayak::application::{IntakeContext, ReplyDispatcher, UserLocks};
use gramin_sahayak::config::{AppConfig, ClassifierBackend, ClassifierConfig, DeliveryConfig, LogFormat};
use gramin_sahayak::domain::decision::DecisionPipeline;
use gramin_sahayak::domain::foundation::Timestamp;
use gramin_sahayak::ports::{Classifier, SpeechSynthesizer, Translator};

/// How often long-abandoned sessions and unused user locks are swept.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server.log_level, config.server.log_format);
    config.validate()?;

    let classifier = build_classifier(&config.classifier)?;
    let info = classifier.describe();
    info!(backend = %info.backend, location = %info.location, "Classifier configured");
    if !classifier.is_available().await {
        warn!("Classifier not available at startup; eligibility requests will fail until it is");
    }
    let pipeline = DecisionPipeline::new(classifier);

    let ctx = IntakeContext::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(InMemoryPreferenceStore::new()),
        UserLocks::new(),
        config.intake.settings(),
    );
    let dispatcher = ReplyDispatcher::new(
        build_translator(&config.delivery)?,
        build_speech(&config.delivery)?,
        Arc::new(LogTransport),
    );

    let sweeper = ctx.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            if let Err(err) = sweeper.sweep(&Timestamp::now()).await {
                warn!(error = %err, "Session sweep failed");
            }
        }
    });

    let app = create_app(
        IntakeAppState::new(ctx, pipeline.clone(), dispatcher),
        LoanAppState::new(pipeline),
        &config.server,
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(filter: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn build_classifier(config: &ClassifierConfig) -> Result<Arc<dyn Classifier>, Box<dyn Error>> {
    Ok(match config.backend {
        ClassifierBackend::Http => Arc::new(HttpClassifier::new(
            HttpClassifierConfig::new(config.url.clone())
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries),
        )?),
        ClassifierBackend::LinearModel => Arc::new(LinearModelClassifier::load(&config.model_path)),
    })
}

fn build_translator(config: &DeliveryConfig) -> Result<Arc<dyn Translator>, Box<dyn Error>> {
    let Some(url) = config.translation_url.as_ref().filter(|_| config.has_translation()) else {
        info!("No translation service configured; non-native locales get English");
        return Ok(Arc::new(NoopTranslator));
    };

    let mut translator_config = LibreTranslateConfig::new(url.clone());
    if let Some(key) = &config.translation_api_key {
        translator_config = translator_config.with_api_key(key.expose_secret().clone());
    }
    Ok(Arc::new(LibreTranslateTranslator::new(translator_config)?))
}

fn build_speech(config: &DeliveryConfig) -> Result<Arc<dyn SpeechSynthesizer>, Box<dyn Error>> {
    let Some(url) = config.speech_service() else {
        info!("Speech disabled; results are sent as text only");
        return Ok(Arc::new(DisabledSpeechSynthesizer));
    };

    info!(url = %url, "Speech synthesis enabled");
    Ok(Arc::new(HttpSpeechSynthesizer::new(
        HttpSpeechConfig::new(url).with_timeout(config.speech_timeout()),
    )?))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
