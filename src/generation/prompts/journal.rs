// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use super::{attribute_lines, relationship_lines};
use crate::generation::context::JournalContext;

/// Literal every journal entry opens with
pub const JOURNAL_OPENING: &str = "Dear Diary";

/// Build the diary entry prompt
pub fn journal_prompt(ctx: &JournalContext) -> String {
    let relationships = relationship_lines(&ctx.character);
    let relationship_block = if relationships.is_empty() {
        String::new()
    } else {
        format!("Relationships:\n{}\n", relationships)
    };

    format!(
        r#"You are a highly creative actor. Stay in character as the person below and write a diary entry about the given theme.

Character name: {name}

{attributes}
{relationship_block}Theme: {theme}

Important instructions:
1. Begin the entry with "{opening}".
2. Write in the first person and dig into the character's inner thoughts and feelings.
3. Describe personal experiences and impressions connected to the theme in detail.
4. Stay consistent with the character's personality and background above.
5. Aim for 500-800 characters.

Diary entry:"#,
        name = ctx.character.name,
        attributes = attribute_lines(&ctx.character),
        relationship_block = relationship_block,
        theme = ctx.theme.trim(),
        opening = JOURNAL_OPENING,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::context::Character;

    fn context(character: Character) -> JournalContext {
        JournalContext {
            character,
            theme: "The first snow".to_string(),
        }
    }

    #[test]
    fn test_journal_prompt_contents() {
        let mut character = Character::new("Mira")
            .with_attribute("personality", "Stubborn and warm")
            .with_attribute("backstory", "Grew up on the coast")
            .with_relationship(Some("c2"), "her brother");
        character.relationships[0].target_character_name = Some("Tomas".to_string());

        let prompt = journal_prompt(&context(character));

        assert!(prompt.contains("Character name: Mira"));
        assert!(prompt.contains("Personality: Stubborn and warm\nBackstory: Grew up on the coast\n"));
        assert!(prompt.contains("Relationships:\n- Tomas: her brother\n"));
        assert!(prompt.contains("Theme: The first snow"));
        assert!(prompt.contains("Begin the entry with \"Dear Diary\""));
        assert!(prompt.contains("500-800 characters"));
        assert!(prompt.ends_with("Diary entry:"));
    }

    #[test]
    fn test_relationship_block_omitted_when_empty() {
        let prompt = journal_prompt(&context(Character::new("Mira")));
        assert!(!prompt.contains("Relationships:"));
    }

    #[test]
    fn test_journal_prompt_is_deterministic() {
        let ctx = context(Character::new("Mira").with_attribute("description", "tall"));
        assert_eq!(journal_prompt(&ctx), journal_prompt(&ctx));
    }
}
