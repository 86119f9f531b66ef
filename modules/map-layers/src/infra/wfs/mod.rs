mod client;

pub use client::WfsClient;
