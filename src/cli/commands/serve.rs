use anyhow::Result;
use chrono::NaiveDate;
use model::BusinessType;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::config::{initialize_app_state, load_settings};
use crate::router::create_router;

pub async fn serve(
    bind_address: &str,
    settings_path: Option<&str>,
    business_type: BusinessType,
    today: Option<NaiveDate>,
) -> Result<()> {
    trace!("Entering serve function");
    info!("Demandcast application starting up");
    debug!("Bind address: {}", bind_address);
    debug!("Settings file: {:?}", settings_path);

    // Load settings and build the dashboard session
    trace!("Initializing application state");
    let state = match load_settings(settings_path)
        .and_then(|settings| initialize_app_state(settings, business_type, today))
    {
        Ok(state) => {
            debug!("Application state initialized successfully");
            state
        }
        Err(e) => {
            error!("Failed to initialize application state: {:#}", e);
            return Err(e);
        }
    };

    // Create router
    trace!("Creating application router");
    let app = create_router(state);
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("Demandcast API server running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    trace!("Starting axum server");
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
