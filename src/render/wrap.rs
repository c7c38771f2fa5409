//! Word wrapping for captions

use crate::constants::{EMPTY_PROMPT_PLACEHOLDER, WRAP_COLUMNS};

/// Greedily wraps `prompt` at [`WRAP_COLUMNS`] characters.
///
/// Each whitespace character (newlines and tabs included) becomes one space,
/// so runs of spaces inside a line survive. Words are split on ASCII spaces
/// only, and words longer than a line are broken. Blank input yields no lines.
pub fn wrap_prompt(prompt: &str) -> Vec<String> {
    let flattened: String = prompt
        .trim()
        .chars()
        .map(|ch| if ch.is_whitespace() { ' ' } else { ch })
        .collect();
    if flattened.is_empty() {
        return Vec::new();
    }
    let options = textwrap::Options::new(WRAP_COLUMNS)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
        .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit)
        .break_words(true);
    textwrap::wrap(&flattened, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// The lines drawn onto the canvas, never empty.
pub fn caption_lines(prompt: &str) -> Vec<String> {
    let lines = wrap_prompt(prompt);
    if lines.is_empty() {
        return vec![EMPTY_PROMPT_PLACEHOLDER.to_string()];
    }
    lines
}
