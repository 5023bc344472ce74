//! Chart aggregate: schema, rows and the ports to the visualization widget.

pub mod repositories;
pub mod services;
pub mod value_objects;

pub use repositories::*;
pub use services::*;
pub use value_objects::*;
