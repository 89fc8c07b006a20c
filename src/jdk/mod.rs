pub mod home;
pub mod version_probe;

pub use home::{detect_java_home, java_executable};
pub use version_probe::{JdkRelease, JdkVersionProbe};
