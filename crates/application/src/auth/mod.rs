//! Authentication module for the Prospect client.
//!
//! This module provides:
//! - An expiry-aware token cache keyed by account
//! - The token provider with its silent-then-interactive fallback
//! - The session state machine and its controller

mod session;
mod token_cache;
mod token_provider;

pub use session::{SessionController, SessionState};
pub use token_cache::TokenCache;
pub use token_provider::TokenProvider;
