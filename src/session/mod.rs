pub mod bootstrap;
pub mod controller;
pub mod engine;

pub use bootstrap::{BootstrapOutcome, bootstrap};
pub use controller::Session;
pub use engine::{LocalTranscript, Status, StreamingEngine};
