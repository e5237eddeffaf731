//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `classifier` - Eligibility models (HTTP sidecar, JSON linear model, mock)
//! - `delivery` - Translation, speech and reply transports
//! - `storage` - In-memory session and preference stores
//! - `http` - Axum REST endpoints

pub mod classifier;
pub mod delivery;
pub mod http;
pub mod storage;
