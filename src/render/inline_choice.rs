//! Inlinechoice block rendering.

use rand::prelude::*;

use crate::decode::BlankItem;

use super::{split_on_gaps, MISSING_ANSWER};

const IC_TITLE: &str = "Wörter einordnen";
const IC_QUESTION: &str = "✏✏Wählen Sie die richtigen Wörter.✏✏";

/// Options offered when an item has neither blanks nor distractors.
const FALLBACK_OPTIONS: &str = "OPTION_A|OPTION_B";

/// Renders one item as a tab-delimited Inlinechoice block.
///
/// The option set is the concatenation of `blanks` and
/// `wrong_substitutes`, shuffled once per item. Every gap line repeats
/// the full pipe-joined set, then names the correct answer for that gap
/// and closes with a `|` delimiter token:
///
/// ```text
/// Type      Inlinechoice
/// Title     Wörter einordnen
/// Question  <fixed prompt>
/// Points    <number of blanks, at least 1>
/// Text      <segment>
/// 1         <opt|opt|...>    <correct>    |
/// ...
/// ```
///
/// A gap without a matching `blanks` entry degrades to
/// [`MISSING_ANSWER`]; an empty option set degrades to
/// [`FALLBACK_OPTIONS`].
pub fn render_inline_choice_block<R: Rng + ?Sized>(item: &BlankItem, rng: &mut R) -> String {
    let segments = split_on_gaps(&item.text, &item.blanks);
    let gaps = segments.len() - 1;
    let points = item.blanks.len().max(1);

    let mut options: Vec<&str> = item
        .blanks
        .iter()
        .chain(item.wrong_substitutes.iter())
        .map(String::as_str)
        .collect();
    options.shuffle(rng);

    let options_line = if options.is_empty() {
        FALLBACK_OPTIONS.to_string()
    } else {
        options.join("|")
    };

    let mut lines = vec![
        "Type\tInlinechoice".to_string(),
        format!("Title\t{IC_TITLE}"),
        format!("Question\t{IC_QUESTION}"),
        format!("Points\t{points}"),
    ];

    for (index, segment) in segments.iter().enumerate() {
        lines.push(format!("Text\t{segment}"));
        if index < gaps {
            let correct = item
                .blanks
                .get(index)
                .map(String::as_str)
                .unwrap_or(MISSING_ANSWER);
            lines.push(format!("1\t{options_line}\t{correct}\t|"));
        }
    }

    lines.join("\n")
}
