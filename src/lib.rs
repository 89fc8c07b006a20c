// 核心模块
pub mod classpath;
pub mod cli;
pub mod core;
pub mod environment;
pub mod error;
pub mod infrastructure;
pub mod jdk;
pub mod utils;

// 重新导出常用类型
pub use classpath::{locate_artifact, ArtifactLookup, ClasspathSet};
pub use self::core::{DiagnosticLevel, DiagnosticsSink, EventQueue, MemorySink, NamedTask, TracingSink};
pub use environment::{ClasspathArgumentBuilder, ModuleSettings, ProcessLaunchSpec, RuntimeEnvironment};
pub use error::{LaunchError, LaunchResult};
pub use infrastructure::{LaunchConfig, RunnerMarkers, TempFileRegistry};
pub use jdk::{JdkRelease, JdkVersionProbe};
// 使用命名空间导入常量，避免冲突
pub use self::core::constants as app_constants;
