pub(crate) mod commands;
mod coordinator;

pub use coordinator::{GenerationCoordinator, GeneratorSnapshot};
