// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Response post-processing
//!
//! Coerces free-form model output into the shape each generation kind
//! promises: journals always open with the diary greeting, comments are
//! trimmed, and discovery output becomes a list of proposals. Unparseable
//! discovery output degrades to a single placeholder proposal.

use serde::Deserialize;
use serde_json::Value;

use super::context::StructuredProposal;
use super::prompts::JOURNAL_OPENING;

/// Prefix added to journal text that lacks the opening
pub const JOURNAL_PREFIX: &str = "Dear Diary,\n\n";

/// Ensure a journal entry opens with the diary greeting. Text that already
/// does (ignoring leading whitespace) is returned unchanged.
pub fn journal_postprocess(text: &str) -> String {
    if text.trim_start().starts_with(JOURNAL_OPENING) {
        text.to_string()
    } else {
        format!("{}{}", JOURNAL_PREFIX, text)
    }
}

pub fn comment_postprocess(text: &str) -> String {
    text.trim().to_string()
}

/// Result of interpreting discovery output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    /// A JSON object was found; its `characters` (possibly empty)
    Parsed(Vec<StructuredProposal>),
    /// Nothing usable was found
    Fallback(StructuredProposal),
}

impl DiscoveryOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, DiscoveryOutcome::Fallback(_))
    }

    pub fn into_proposals(self) -> Vec<StructuredProposal> {
        match self {
            DiscoveryOutcome::Parsed(proposals) => proposals,
            DiscoveryOutcome::Fallback(proposal) => vec![proposal],
        }
    }
}

#[derive(Deserialize)]
struct DiscoveryPayload {
    #[serde(default)]
    characters: Vec<StructuredProposal>,
}

/// Extract the proposals embedded in raw discovery output.
pub fn discovery_postprocess(text: &str, seed_name: &str) -> DiscoveryOutcome {
    let Some(object) = first_json_object(text) else {
        tracing::warn!(
            response_len = text.len(),
            "no JSON object in discovery output, using fallback proposal"
        );
        return DiscoveryOutcome::Fallback(fallback_proposal(seed_name));
    };

    match serde_json::from_value::<DiscoveryPayload>(object) {
        Ok(payload) => DiscoveryOutcome::Parsed(payload.characters),
        Err(e) => {
            tracing::warn!(error = %e, "discovery characters malformed, using fallback proposal");
            DiscoveryOutcome::Fallback(fallback_proposal(seed_name))
        }
    }
}

/// Placeholder proposal returned when discovery output cannot be used.
pub fn fallback_proposal(seed_name: &str) -> StructuredProposal {
    StructuredProposal {
        name: "New Character".to_string(),
        introduction: "A newly discovered character.".to_string(),
        backstory: "Background yet to be written.".to_string(),
        relationship_from_subject: format!("How {} sees this character", seed_name),
        relationship_to_subject: format!("Relationship with {}", seed_name),
    }
}

/// First balanced `{...}` region that parses as a JSON object.
///
/// Candidates are tried left to right. A balanced region that fails to
/// parse is skipped as a whole so objects nested inside it are not picked
/// up on their own.
fn first_json_object(text: &str) -> Option<Value> {
    let bytes = text.as_bytes();
    let mut start = 0;

    while let Some(offset) = bytes[start..].iter().position(|&b| b == b'{') {
        let open = start + offset;
        match balanced_end(bytes, open) {
            Some(end) => {
                if let Ok(value @ Value::Object(_)) = serde_json::from_str(&text[open..end]) {
                    return Some(value);
                }
                start = end;
            }
            None => start = open + 1,
        }
    }
    None
}

/// Byte index one past the `}` closing the `{` at `open`, honoring JSON
/// strings and escapes.
fn balanced_end(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}
