use murmur_schema::ConversationTurn;

/// How many stored turns are pulled into the context window. Bounding
/// happens here, by row count; the assembled prompt itself is never
/// truncated.
pub const HISTORY_WINDOW: usize = 10;

/// Renders the style line, the historical turns, and the new input into
/// one prompt. Pure and synchronous.
pub fn assemble_prompt(style: &str, history: &[ConversationTurn], input: &str) -> String {
    let mut prompt = String::with_capacity(
        style.len() + input.len() + history.iter().map(|t| t.message.len() + 8).sum::<usize>() + 8,
    );
    prompt.push_str(style);
    prompt.push('\n');
    for turn in history {
        prompt.push_str(turn.role.display_name());
        prompt.push_str(": ");
        prompt.push_str(&turn.message);
        prompt.push('\n');
    }
    prompt.push_str("User: ");
    prompt.push_str(input);
    prompt
}
