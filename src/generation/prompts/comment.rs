// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use super::{attribute_lines, relationship_lines};
use crate::generation::context::CommentContext;

const REPLY_TARGET_MARKER: &str = "[Reply target]";

/// Build the in-thread comment prompt
pub fn comment_prompt(ctx: &CommentContext) -> String {
    let relationships = relationship_lines(&ctx.character);
    let relationship_block = if relationships.is_empty() {
        String::new()
    } else {
        format!("Relationships:\n{}\n", relationships)
    };

    format!(
        r#"You are a creative actor. Play the character below and write a comment on the journal entry.

Character you play: {name}

{attributes}
{relationship_block}Journal entry:
{journal}

{thread}Important instructions:
1. Keep the character's personality and point of view.
2. React to the journal entry in an exploratory, meaningful way.
3. If there are existing comments, follow the flow of the conversation.
4. Keep it concise, about 100-200 characters.
5. Deepen the relationship between the characters.

Comment:"#,
        name = ctx.character.name,
        attributes = attribute_lines(&ctx.character),
        relationship_block = relationship_block,
        journal = ctx.journal_body.trim(),
        thread = thread_block(ctx),
    )
}

/// Existing comments in order; the reply target, if present, is marked.
fn thread_block(ctx: &CommentContext) -> String {
    if ctx.thread.is_empty() {
        return String::new();
    }

    let mut block = String::from("Existing comments:\n");
    for comment in &ctx.thread {
        let is_target = match (&ctx.reply_to, &comment.id) {
            (Some(target), Some(id)) => target == id,
            _ => false,
        };
        let bullet = if is_target { REPLY_TARGET_MARKER } else { "-" };
        block.push_str(bullet);
        block.push(' ');
        block.push_str(comment.content.trim());
        block.push('\n');
    }
    block.push('\n');
    block
}
