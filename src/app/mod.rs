pub mod actions;
mod app;
pub mod events;
pub mod flow;
pub mod headless;
pub mod prompt_builder;

pub use app::App;
