//! Zoom Meeting SDK credentials.

pub mod signature;

pub use signature::SignatureGenerator;
