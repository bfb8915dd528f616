use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::middleware::AdminAuth;
use crate::config::get_config;
use crate::services::{AbbreviationService, seed_if_empty};
use crate::storage::{EntryStore, SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub service: Arc<AbbreviationService>,
    pub admin_auth: AdminAuth,
}

/// 建立存储、写入示例数据并构造服务
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::shared()
        .await
        .context("Failed to create storage backend")?;
    info!(
        "Using storage backend: {}",
        storage.backend_config().storage_type
    );

    let config = get_config();
    if config.database.seed_sample_data {
        let inserted = seed_if_empty(storage.as_ref())
            .await
            .context("Failed to seed sample data")?;
        if inserted > 0 {
            info!("Inserted {} sample abbreviations", inserted);
        }
    }

    let admin_auth = AdminAuth::from_config();
    if !admin_auth.is_enabled() {
        warn!(
            "api.admin_token is empty: admin listing, update and delete are open to every client"
        );
    }

    let store: Arc<dyn EntryStore> = storage.clone();
    let service = Arc::new(AbbreviationService::new(store));

    info!("Pre-startup completed in {:?}", start_time.elapsed());

    Ok(StartupContext {
        storage,
        service,
        admin_auth,
    })
}
