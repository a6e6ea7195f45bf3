use std::sync::Arc;

use crate::zoom::SignatureGenerator;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub signer: Arc<SignatureGenerator>,
}

impl AppState {
    pub fn new(signer: SignatureGenerator) -> Self {
        Self {
            signer: Arc::new(signer),
        }
    }
}
