pub mod process;
pub mod resource;

pub use process::{ExecutorError, ProcessOutput, ProcessRunner};
pub use resource::{ContentFetcher, InMemoryFetcher, ResourceError};
