// * Operations: logging setup shared by the binary and tests

pub mod telemetry;

pub use telemetry::{env_filter, init_tracing};
