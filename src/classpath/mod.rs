pub mod classpath_set;
pub mod locator;

pub use classpath_set::ClasspathSet;
pub use locator::{locate_artifact, ArtifactLookup};
