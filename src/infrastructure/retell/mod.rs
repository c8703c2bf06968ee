//! Retell API adapter

mod client;

pub use client::RetellClient;
