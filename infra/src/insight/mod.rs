//! Audit summary generation

pub mod openai;

pub use openai::OpenAiInsightClient;
