//! Dual-format renderer for decoded gap-fill batches.
//!
//! Each [`BlankItem`] is rendered once per encoding: a FIB block where the
//! learner types the missing word and an Inlinechoice block where the
//! learner picks it from a shuffled option list. Blocks keep input order
//! and are joined with blank lines; the combined export document is the
//! Inlinechoice section, a `---` separator line, then the FIB section.
//!
//! Distractor shuffling is the only nondeterminism. It runs on a ChaCha8
//! generator so a fixed seed reproduces byte-identical output.

pub mod fib;
pub mod inline_choice;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::decode::{BlankItem, GAP_MARKER};

pub use fib::render_fib_block;
pub use inline_choice::render_inline_choice_block;

/// Answer emitted when a gap marker has no matching entry in `blanks`.
/// Kept visible in the output so a human editor can fix it downstream.
pub const MISSING_ANSWER: &str = "CORRECT_ANSWER_UNDEFINED";

/// The two rendered sections, one per encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub fib_text: String,
    pub inline_choice_text: String,
}

impl RenderedDocument {
    /// Combined export document: Inlinechoice first, then FIB, separated
    /// by a `---` line.
    pub fn to_document(&self) -> String {
        format!("{}\n---\n{}", self.inline_choice_text, self.fib_text)
    }
}

/// Renders a batch into both encodings.
///
/// With `seed` set the distractor order is reproducible; otherwise the
/// generator is seeded from the OS.
pub fn render(batch: &[BlankItem], seed: Option<u64>) -> RenderedDocument {
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    };
    render_with_rng(batch, &mut rng)
}

/// Renders a batch using a caller-supplied random source.
pub fn render_with_rng<R: Rng + ?Sized>(batch: &[BlankItem], rng: &mut R) -> RenderedDocument {
    let fib_blocks: Vec<String> = batch.iter().map(render_fib_block).collect();
    let ic_blocks: Vec<String> = batch
        .iter()
        .map(|item| render_inline_choice_block(item, rng))
        .collect();

    RenderedDocument {
        fib_text: replace_sharp_s(&fib_blocks.join("\n\n")),
        inline_choice_text: replace_sharp_s(&ic_blocks.join("\n\n")),
    }
}

/// Replaces every `ß` with `ss`.
///
/// The downstream import format's character set does not carry the
/// eszett; the rule applies uniformly regardless of content language.
pub fn replace_sharp_s(text: &str) -> String {
    text.replace('ß', "ss")
}

/// Marks each blank in `text` with [`GAP_MARKER`] (first remaining
/// occurrence only, one replacement per entry, in list order), then
/// splits on the marker into trimmed segments.
///
/// One more segment comes back than gaps in the marked text. Blanks that
/// never occur in `text` simply produce no gap.
pub(crate) fn split_on_gaps(text: &str, blanks: &[String]) -> Vec<String> {
    let mut marked = text.to_string();
    for blank in blanks {
        marked = marked.replacen(blank.as_str(), GAP_MARKER, 1);
    }
    marked
        .split(GAP_MARKER)
        .map(|segment| segment.trim().to_string())
        .collect()
}
