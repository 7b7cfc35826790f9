use std::sync::Arc;

use crate::sheets::RowAppender;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Where submitted jobs end up. `SheetsClient` in production.
    pub appender: Arc<dyn RowAppender>,
}
