pub mod config;
pub mod constants;
pub mod estimate;
pub mod geo;
pub mod map;
pub mod projection;
