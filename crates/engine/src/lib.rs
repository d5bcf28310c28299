//! Parley engine library.
//!
//! Routes player utterances addressed to NPCs through the dialogue pipeline.
//!
//! ## Structure
//!
//! - `use_cases/` - the dialogue pipeline
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `dialogue_context` - wire DTOs for the generation backend
//! - `app` - Application composition

pub mod app;
pub mod dialogue_context;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
