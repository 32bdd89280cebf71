//! Interface adapters - inbound protocols

pub mod http;
