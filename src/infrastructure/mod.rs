pub mod config;
pub mod temp_files;

pub use config::{LaunchConfig, RunnerMarkers};
pub use temp_files::TempFileRegistry;
