pub mod ratio_graph;
#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

pub use ratio_graph::RatioGraph;
#[cfg(target_arch = "wasm32")]
pub use wasm_api::{RatioGraphHandle, mount_ratio_graph};
