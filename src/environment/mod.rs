pub mod argument_builder;
pub mod custom_args;
pub mod launch_spec;
pub mod module_settings;
pub mod runtime_environment;

pub use argument_builder::{escape_class_path_file_content, ClasspathArgumentBuilder};
pub use custom_args::CustomArgumentsFile;
pub use launch_spec::ProcessLaunchSpec;
pub use module_settings::ModuleSettings;
pub use runtime_environment::RuntimeEnvironment;
