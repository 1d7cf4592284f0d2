//! Gateway facade and builder.

mod builder;
mod client;

pub use builder::{ClickUp, ClickUpBuilder};
pub use client::ClickUpGateway;
