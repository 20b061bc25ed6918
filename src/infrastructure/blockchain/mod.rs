//! Node-facing adapters for an Ethereum-compatible chain

pub mod broadcaster;
pub mod contracts;
pub mod pair_reader;
pub mod provider;
pub mod token_list;

pub use broadcaster::RpcBroadcaster;
pub use pair_reader::RpcReserveReader;
pub use provider::connect;
pub use token_list::TokenListLoader;
