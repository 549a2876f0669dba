//! Core building block: the `processor` that transforms input and forwards
//! results to the configured cloud client. Consumed by the high-level `api` module.
pub mod processor;
