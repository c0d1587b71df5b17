use std::{net::SocketAddr, sync::Arc};

use derive_more::Deref;
use tokio::net::TcpListener;
use tower_cookies::Key;
use tracing::info;

use crate::{config::AppConfig, model::ModelManager, templ_manager::TemplateManager, Result};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    /// Connects to the database described by the config and binds the listener.
    pub async fn build_from_config(config: &AppConfig) -> Result<Self> {
        let mm = ModelManager::init(config).await?;
        Self::build_with_model(config, mm).await
    }

    /// Builds the `App` around an already constructed `ModelManager`.
    pub async fn build_with_model(config: &AppConfig, model_mgr: ModelManager) -> Result<Self> {
        let tm = TemplateManager::init();
        let cookie_key = config.net_config.cookie_key()?;

        let app_state = AppState::new(model_mgr, tm, cookie_key);

        let addr = SocketAddr::from((config.net_config.host, config.net_config.app_port));
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        Ok(App::new(app_state, listener))
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }
}

pub struct InternalState {
    pub model_mgr: ModelManager,
    pub templ_mgr: TemplateManager,
    /// Signs the flash cookies.
    pub cookie_key: Key,
}

/// Application state containing all global data.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(model_mgr: ModelManager, templ_mgr: TemplateManager, cookie_key: Key) -> Self {
        AppState(Arc::new(InternalState {
            model_mgr,
            templ_mgr,
            cookie_key,
        }))
    }
}
