//! idpsync Core - Declarative model and shared types for identity-provider sync

pub mod credentials;
pub mod error;
pub mod ids;

#[cfg(test)]
mod tests;

pub use credentials::*;
pub use error::*;
pub use ids::*;
