pub mod constants;
pub mod diagnostics;
pub mod events;

pub use diagnostics::{DiagnosticLevel, DiagnosticsSink, MemorySink, TracingSink};
pub use events::{EventQueue, NamedTask, SerialEventQueue};
