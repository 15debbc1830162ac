//! Fill-in-blank (FIB) block rendering.

use crate::decode::BlankItem;

use super::{split_on_gaps, MISSING_ANSWER};

/// Fixed localized block title.
const FIB_TITLE: &str = "✏✏Vervollständigen Sie die Lücken mit dem korrekten Begriff.✏✏";

/// Renders one item as a tab-delimited FIB block.
///
/// Layout, one field per tab:
///
/// ```text
/// Type    FIB
/// Title   <fixed title>
/// Points  <number of blanks, at least 1>
/// Text    <segment>
/// 1       <answer>    20
/// ...
/// ```
///
/// Every segment boundary gets a companion answer line; a gap without a
/// matching `blanks` entry degrades to [`MISSING_ANSWER`] instead of
/// failing the item.
pub fn render_fib_block(item: &BlankItem) -> String {
    let segments = split_on_gaps(&item.text, &item.blanks);
    let gaps = segments.len() - 1;
    // Floor of 1 so a degraded item never becomes a zero-point block.
    let points = item.blanks.len().max(1);

    let mut lines = vec![
        "Type\tFIB".to_string(),
        format!("Title\t{FIB_TITLE}"),
        format!("Points\t{points}"),
    ];

    for (index, segment) in segments.iter().enumerate() {
        lines.push(format!("Text\t{segment}"));
        if index < gaps {
            let answer = item
                .blanks
                .get(index)
                .map(String::as_str)
                .unwrap_or(MISSING_ANSWER);
            lines.push(format!("1\t{answer}\t20"));
        }
    }

    lines.join("\n")
}
