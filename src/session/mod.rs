//! Token-based session handling
//!
//! - [`store`]      -- durable storage of the single bearer token
//! - [`identity`]   -- local, unverified decoding of the token payload
//! - [`controller`] -- login/signup/logout and the published session state

pub mod controller;
pub mod identity;
pub mod store;

pub use controller::{Session, SessionController};
pub use identity::Identity;
pub use store::{FileSessionStore, KeyringSessionStore, MemorySessionStore, SessionStore};
