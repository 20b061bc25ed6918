//! Token domain - token metadata catalog

mod token_registry;

pub use token_registry::TokenRegistry;
