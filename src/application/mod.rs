pub mod chart_component;
pub mod config;

pub use chart_component::{ChartComponent, ChartObserver, ChartPhase, LoggingObserver, UpdateOutcome};
pub use config::ChartConfig;
