pub mod resolution_chain;
pub mod similarity_gate;

pub use resolution_chain::{NamePolicy, ResolutionChain, StepOutcome};
pub use similarity_gate::{
    DiceCoefficientStrategy, SimilarityGate, SimilarityStrategy, SIMILARITY_THRESHOLD,
};
