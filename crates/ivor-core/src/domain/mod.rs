//! Domain types shared by the gateway and the monitor.

pub mod chat;

pub use chat::{ChatContext, ChatRequest, OrchestratedReply, merge_routing_metadata};
