//! `stockroom-api` — HTTP binding for the warehouse service.

pub mod app;
