pub mod config;
pub mod constants;
pub mod shared;
pub mod state;
