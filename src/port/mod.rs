//! Ports to external capabilities.

pub mod outbound;
