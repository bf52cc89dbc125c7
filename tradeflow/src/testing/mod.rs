//! Test fixtures and harnesses.

mod fixtures;

pub use fixtures::{entity_actor, sample_documents, submitter_actor, EngineHarness};
