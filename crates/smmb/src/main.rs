use std::sync::Arc;

use smmb_core::{
    config::Config,
    router::CommandRouter,
    smm::{HttpSmmClient, SmmApi},
    store::{JsonFileUserStore, UserStore},
};

#[tokio::main]
async fn main() -> Result<(), smmb_core::Error> {
    smmb_core::logging::init("smmb")?;

    let cfg = Arc::new(Config::load()?);

    let store: Arc<dyn UserStore> = Arc::new(JsonFileUserStore::new(cfg.users_file.clone()));
    let api: Arc<dyn SmmApi> = Arc::new(HttpSmmClient::new(
        cfg.smm_api_url.clone(),
        cfg.smm_api_timeout,
    )?);
    let router = Arc::new(CommandRouter::new(store, api));

    smmb_telegram::router::run_polling(cfg, router)
        .await
        .map_err(|e| smmb_core::Error::External(format!("telegram bot failed: {e}")))?;

    tracing::info!("smmb stopped");
    Ok(())
}
