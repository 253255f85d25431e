//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that execution, wallet, RPC and P2P call

pub mod inbound;
