//! gapforge: converts LLM gap-fill responses into OLAT import blocks.
//!
//! This library recovers a structured list of fill-in-the-blank exercise
//! items from a raw language-model response (tolerating markdown fences,
//! leading prose, trailing commas and truncated arrays) and renders it
//! into the tab-delimited FIB and Inlinechoice text formats.

// Core modules
pub mod cli;
pub mod decode;
pub mod error;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use decode::{decode, BlankItem, DecodeOutcome, ItemBatch, SkippedItem, GAP_MARKER};
pub use error::{DecodeError, SkipReason};
pub use pipeline::{transform, TransformOutput};
pub use render::{render, RenderedDocument};
