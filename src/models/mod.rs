pub mod config;
pub mod load_state;
pub mod shot;

pub use config::{BridgeConfig, CROSS_ORIGIN_ISOLATION_HEADERS, locate_file};
pub use load_state::{LoadState, Remedy, StatusMessage};
pub use shot::{ParameterRange, ShotField, ShotParameters};
