pub mod engine;
pub mod outcome;
pub mod qualitative;

pub use engine::{Interpreter, FALLBACK_GROUP};
pub use outcome::{DetailedFinding, GroupedInterpretations, InterpretationGroup, InterpretationItem};
