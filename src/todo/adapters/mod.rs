//! Adapter implementations for the list and task repository ports.

pub mod memory;
pub mod postgres;
