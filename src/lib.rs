pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod security;
pub mod state;
pub mod zoom;

pub use config::Config;
pub use error::{AppError, Result, ValidationError};
pub use state::AppState;
pub use zoom::SignatureGenerator;
