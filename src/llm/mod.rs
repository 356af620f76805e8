//! LLM module for recap
//!
//! Turns transcripts into summary candidates through a hosted text-completion API.

mod client;
mod gemini;
mod openai;
mod prompts;
mod summarizer;

pub use client::{build_provider, ChatMessage, CompletionRequest, LlmProvider, Role};
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
pub use prompts::build_summary_messages;
pub use summarizer::{strip_code_fences, LlmSummarizer, DEFAULT_TEMPERATURE};
