// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Prompt builders, one per generation kind
//!
//! All builders are pure and deterministic for a given context.

mod comment;
mod discovery;
mod journal;

pub use comment::comment_prompt;
pub use discovery::discovery_prompt;
pub use journal::{journal_prompt, JOURNAL_OPENING};

use super::context::Character;

/// One `Label: text` line per recognized attribute, in record order.
pub(crate) fn attribute_lines(character: &Character) -> String {
    character
        .attributes
        .iter()
        .filter_map(|attr| {
            attr.recognized_kind()
                .map(|kind| format!("{}: {}\n", kind.label(), attr.text.trim()))
        })
        .collect()
}

/// One `- Name: description` line per relationship. Empty when the
/// character has none.
pub(crate) fn relationship_lines(character: &Character) -> String {
    character
        .relationships
        .iter()
        .map(|rel| match rel.target_character_name.as_deref() {
            Some(name) => format!("- {}: {}\n", name, rel.description.trim()),
            None => format!("- {}\n", rel.description.trim()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_lines_skip_unknown_kinds() {
        let character = Character::new("Mira")
            .with_attribute("description", "A lighthouse keeper")
            .with_attribute("shoeSize", "42")
            .with_attribute("currentStatus", "snowed in");

        assert_eq!(
            attribute_lines(&character),
            "Description: A lighthouse keeper\nCurrent status: snowed in\n"
        );
    }

    #[test]
    fn test_relationship_lines() {
        let mut character = Character::new("Mira")
            .with_relationship(Some("c2"), "her brother")
            .with_relationship(None, "an old debt");
        character.relationships[0].target_character_name = Some("Tomas".to_string());

        assert_eq!(
            relationship_lines(&character),
            "- Tomas: her brother\n- an old debt\n"
        );
        assert_eq!(relationship_lines(&Character::new("Solo")), "");
    }
}
