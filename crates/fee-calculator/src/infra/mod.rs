pub mod balances;
pub mod cli;
pub mod config;

pub use balances::{InMemoryPools, PoolBalances};
