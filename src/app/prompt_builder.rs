//! Prompt assembly: the fixed instruction block followed by the selection.

use dm_base::config::PROMPTS;
use dm_base::constants::{MAX_TOKENS, NOT_CODE_REPLY};
use dm_base::state::Selection;

/// Render the demystify prompt for a selection.
///
/// Pure: the same selection always yields the same bytes. The selection is
/// appended after placeholder substitution, so it is never altered, even if
/// it happens to contain `{max_tokens}`.
pub fn build_prompt(selection: &Selection) -> String {
    let instructions = PROMPTS
        .demystify
        .template
        .replace("{max_tokens}", &MAX_TOKENS.to_string())
        .replace("{not_code_reply}", NOT_CODE_REPLY);

    format!("{}\n{}\n", instructions, selection.as_str())
}
