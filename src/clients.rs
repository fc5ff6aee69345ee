pub mod azure_openai;
mod text_generation;

pub use azure_openai::{AzureOpenAiClient, TextGenerationConfig};
pub use text_generation::{GenerationError, TextGenerator};
