//! Workflow engines: the per-content editorial state machine and the
//! magazine assembly/publication sequence.

mod content;
mod magazine;

pub use content::ContentWorkflow;
pub use magazine::MagazineAssembler;
