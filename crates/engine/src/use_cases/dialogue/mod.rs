//! NPC dialogue pipeline.
//!
//! One player utterance addressed to one character flows through:
//!
//! 1. [`safety::SafetyFilter`] - block-list check, absolute precedence
//! 2. [`classifier::IntentClassifier`] - what the reply must accomplish
//! 3. [`router::TurnRouter`] - scripted or generated
//! 4. [`canonical::CanonicalResponder`] or [`generative::GenerativeResponder`]
//! 5. [`finalize`] - whitespace compaction and per-character text rules
//!
//! [`gateway::DialogueGateway`] runs the whole thing and never fails: every
//! path ends in a non-empty reply.

pub mod canonical;
pub mod clamp;
pub mod classifier;
pub mod context;
pub mod fallback;
pub mod finalize;
pub mod gateway;
pub mod generative;
pub mod router;
pub mod safety;


pub use canonical::{CanonicalReply, CanonicalResponder};
pub use classifier::IntentClassifier;
pub use gateway::DialogueGateway;
pub use generative::GenerativeResponder;
pub use router::TurnRouter;
pub use safety::SafetyFilter;
