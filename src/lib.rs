//! Skinscope — patient-facing skin observation report service.
//!
//! Pipeline: image intake validation → analysis gateway (one of three
//! configured strategies) → ephemeral report store → renderer. The
//! output is an observation summary, explicitly not a diagnosis.

pub mod api;
pub mod config;
pub mod gateway;
pub mod i18n;
pub mod intake;
pub mod models;
pub mod render;
pub mod store;
