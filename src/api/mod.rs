mod data_controller;
mod engine;
mod engine_config;
mod engine_init;
mod render_coordinator;
mod snap_resolver;

pub use engine::BarChartEngine;
pub use engine_config::BarChartEngineConfig;
