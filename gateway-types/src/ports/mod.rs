//! Port traits (interfaces for adapters).
//!
//! These are the contracts the dispatch pipeline depends on. Concrete
//! provider clients, order stores, and URL resolvers live in adapter
//! crates or in the host application.

mod client;
mod provider;
mod store;
mod urls;

pub use client::{ProviderClient, ProviderRequest};
pub use provider::Provider;
pub use store::OrderStore;
pub use urls::UrlResolver;
