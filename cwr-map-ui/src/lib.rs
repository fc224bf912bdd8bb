//! Shared Dioxus components and browser glue for the CWR reservoir map.
//!
//! This crate provides:
//! - `fetch`: text downloads through the browser's `fetch`
//! - `state`: Reactive AppState with Dioxus Signals, and render command dispatch
//! - `components`: RSX components (map canvas, tooltip, header, load status)

pub mod components;
pub mod fetch;
pub mod state;
