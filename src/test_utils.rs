#[cfg(test)]
pub mod test_utils {
    use crate::config::initialize_app_state;
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use chrono::NaiveDate;
    use compute::ForecastSettings;
    use model::BusinessType;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// "Today" of every test session: the ninth day has no actuals yet.
    pub fn test_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 8).unwrap()
    }

    /// Create AppState for testing with default settings and a fixed today
    pub fn setup_test_app_state() -> AppState {
        initialize_app_state(ForecastSettings::default(), BusinessType::Convenience, Some(test_today()))
            .expect("Failed to create test app state")
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub fn setup_test_app() -> Router {
        let _guard = init_test_tracing();
        create_router(setup_test_app_state())
    }

    /// Create axum app sharing `state`, so tests can inspect it afterwards
    pub fn setup_test_app_with_state(state: AppState) -> Router {
        let _guard = init_test_tracing();
        create_router(state)
    }
}
