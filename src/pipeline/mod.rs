//! End-to-end transform: raw model response in, export document out.

use crate::decode::{decode, SkippedItem};
use crate::error::DecodeError;
use crate::render::render;

/// Result of a full transform, including per-item skip diagnostics so
/// callers can surface them however they like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// Combined export document: Inlinechoice section, `---`, FIB section.
    pub document: String,
    /// The FIB section on its own.
    pub fib_text: String,
    /// The Inlinechoice section on its own.
    pub inline_choice_text: String,
    /// Number of items that made it into the rendered output.
    pub item_count: usize,
    /// Items dropped during decoding, in batch order.
    pub skipped: Vec<SkippedItem>,
}

/// Decodes `raw` and renders both encodings.
///
/// `seed` fixes the distractor shuffle for reproducible output; `None`
/// uses OS randomness. Decode failures are terminal; item-level problems
/// come back in [`TransformOutput::skipped`].
pub fn transform(raw: &str, seed: Option<u64>) -> Result<TransformOutput, DecodeError> {
    let outcome = decode(raw)?;
    let rendered = render(&outcome.batch, seed);

    Ok(TransformOutput {
        document: rendered.to_document(),
        fib_text: rendered.fib_text,
        inline_choice_text: rendered.inline_choice_text,
        item_count: outcome.batch.len(),
        skipped: outcome.skipped,
    })
}
