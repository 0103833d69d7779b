// Section List Store + Drag Reorder Controller.
// Every list operation is a pure function over a slice and returns a new Vec.
// Sessions own the canonical list; handlers swap it in after each operation.

pub mod defaults;
pub mod drag;
pub mod handlers;
pub mod store;

pub use defaults::default_sections;
pub use store::ResumeSection;
