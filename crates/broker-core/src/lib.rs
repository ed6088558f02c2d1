pub mod actor;

pub use actor::{AdmissionEngine, EngineCommand, EngineError, EngineHandle, RequestOutcome, PUBDELAY};
