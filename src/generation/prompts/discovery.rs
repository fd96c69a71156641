// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use super::attribute_lines;
use crate::generation::context::DiscoveryContext;

/// Number of characters the discovery prompt asks for
pub const DISCOVERY_COUNT: usize = 3;

/// Build the related-character discovery prompt
pub fn discovery_prompt(ctx: &DiscoveryContext) -> String {
    let name = &ctx.character.name;
    format!(
        r#"You are a professional story writer. Create {count} new characters connected to the character below.

Existing character: {name}

{attributes}
Relationship phrase: {phrase}

Instructions:
1. Based on the relationship phrase, create {count} distinct characters who each have a strong connection to {name}.
2. Give every character their own personality, background and motivation.
3. Describe the relationship with {name} in both directions.
4. Make the characters creative and interesting.

Respond with a single JSON object in exactly this format:

{{
  "characters": [
    {{
      "name": "Character name",
      "introduction": "Short introduction of the character (50-100 characters)",
      "backstory": "Background of the character (100-200 characters)",
      "relationship_to_subject": "How this character relates to {name} (50-100 characters)",
      "relationship_from_subject": "How {name} sees this character (50-100 characters)"
    }}
  ]
}}

The "characters" array must contain exactly {count} entries.

JSON output:"#,
        count = DISCOVERY_COUNT,
        name = name,
        attributes = attribute_lines(&ctx.character),
        phrase = ctx.relationship_phrase.trim(),
    )
}
