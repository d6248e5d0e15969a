pub mod batch;
pub mod generator;
pub mod processor;
pub mod prompt;
pub mod response;
pub mod runner;

pub use batch::{run_batch, BatchReport};
pub use generator::{GenerationError, OpenAiTitleGenerator, TitleGenerator};
pub use processor::{DocumentProcessor, ProcessOutcome};
pub use response::{parse_title_response, ParseError, TitleSuggestion};
pub use runner::{Runner, RunnerError};
