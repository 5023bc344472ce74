pub mod feed;
pub mod perspective;
pub mod services;
