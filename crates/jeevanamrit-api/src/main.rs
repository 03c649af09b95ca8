use std::sync::Arc;

use jeevanamrit_instruments::bank::load_bank;
use jeevanamrit_instruments::{Instrument, all_instruments};
use jeevanamrit_storage::profiles::{MemoryProfileStore, ProfileStore, S3ProfileStore};
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod error;
mod middleware;
mod routes;
mod state;

use config::{ServiceConfig, StoreBackend};
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = ServiceConfig::from_env()?;

    let store: Arc<dyn ProfileStore> = match config.store {
        StoreBackend::S3 => {
            let s3 = match config.region.as_deref() {
                Some(region) => jeevanamrit_storage::client::build_client_with_region(region).await,
                None => jeevanamrit_storage::client::build_client().await,
            };
            Arc::new(S3ProfileStore::new(s3, config.bucket.clone()))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory profile store; profiles are lost on restart");
            Arc::new(MemoryProfileStore::new())
        }
    };

    let mut instruments: Vec<Arc<dyn Instrument>> =
        all_instruments().into_iter().map(Arc::from).collect();

    let intake_instrument = match &config.question_bank {
        Some(path) => {
            let configured: Arc<dyn Instrument> = Arc::new(load_bank(path)?);
            instruments.retain(|i| i.id() != configured.id());
            instruments.push(configured.clone());
            configured
        }
        None => instruments
            .iter()
            .find(|i| i.id() == "prakriti")
            .cloned()
            .ok_or_else(|| eyre::eyre!("prakriti instrument is not registered"))?,
    };

    tracing::info!(
        store = ?config.store,
        bucket = %config.bucket,
        instrument = %intake_instrument.id(),
        questions = intake_instrument.bank().len(),
        "starting intake api"
    );

    let state = AppState::new(store, instruments, intake_instrument, &config.redirect_to);
    let app = app::router(state);

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
