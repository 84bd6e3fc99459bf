use std::sync::Arc;

use breeze::responder::Responder;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub responder: Arc<dyn Responder>,
}

impl AppState {
    pub fn new(responder: Box<dyn Responder>) -> Self {
        Self {
            responder: Arc::from(responder),
        }
    }
}
