pub mod error;
pub mod state;

pub use error::{QueueError, Result};
pub use state::{Admission, AdmissionState};
