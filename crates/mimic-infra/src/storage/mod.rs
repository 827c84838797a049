//! Memory persistence adapters.

pub mod json_exchange;

pub use json_exchange::JsonExchangeRepository;
