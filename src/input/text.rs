use std::collections::HashMap;

use crate::model::policy::ShapingPolicy;

const TERMINAL_PUNCT: &[char] = &['。', '．', '！', '？', '!', '?', '.'];

/// Cheap structural measurements of a description, taken once per request.
#[derive(Debug, Clone, PartialEq)]
pub struct TextProfile {
    /// Unicode scalar values after trimming.
    pub char_len: usize,
    pub letter_chars: usize,
    pub script_chars: usize,
    pub has_terminal_punct: bool,
    /// Occurrences of the most frequent non-whitespace character.
    pub dominant_count: usize,
    /// `dominant_count` over all non-whitespace characters.
    pub dominant_share: f64,
}

impl TextProfile {
    pub fn measure(text: &str) -> Self {
        let trimmed = text.trim();
        let mut char_len = 0usize;
        let mut letter_chars = 0usize;
        let mut script_chars = 0usize;
        let mut has_terminal_punct = false;
        let mut visible = 0usize;
        let mut counts: HashMap<char, usize> = HashMap::new();

        for ch in trimmed.chars() {
            char_len += 1;
            if ch.is_alphabetic() {
                letter_chars += 1;
            }
            if is_japanese_script(ch) {
                script_chars += 1;
            }
            if TERMINAL_PUNCT.contains(&ch) {
                has_terminal_punct = true;
            }
            if !ch.is_whitespace() {
                visible += 1;
                *counts.entry(ch).or_insert(0) += 1;
            }
        }

        let dominant_count = counts.values().copied().max().unwrap_or(0);
        let dominant_share = if visible == 0 {
            0.0
        } else {
            dominant_count as f64 / visible as f64
        };

        Self {
            char_len,
            letter_chars,
            script_chars,
            has_terminal_punct,
            dominant_count,
            dominant_share,
        }
    }

    /// Long enough for the score floor to apply.
    pub fn is_substantial(&self, policy: &ShapingPolicy) -> bool {
        self.char_len >= policy.substantial_min_chars
    }

    /// Local structure check: no letters at all, or one character making up
    /// most of the text. A single-character text counts as fully dominated.
    pub fn looks_uninterpretable(&self, policy: &ShapingPolicy) -> bool {
        if self.letter_chars == 0 {
            return true;
        }
        self.dominant_share >= policy.repeat_dominance_ratio
    }

    /// The LLM flag is only honoured for short texts; either signal suffices.
    pub fn is_uninterpretable(&self, llm_flag: bool, policy: &ShapingPolicy) -> bool {
        let flagged = llm_flag && self.char_len < policy.llm_flag_trust_max_chars;
        flagged || self.looks_uninterpretable(policy)
    }

    /// Eligibility for the high-score tiers.
    pub fn passes_gate(&self, policy: &ShapingPolicy) -> bool {
        self.char_len >= policy.gate_min_chars
            && self.script_chars >= policy.gate_min_script_chars
            && (self.has_terminal_punct || !policy.gate_requires_terminal_punct)
    }
}

pub fn is_japanese_script(ch: char) -> bool {
    matches!(
        ch,
        '\u{3040}'..='\u{309F}'
            | '\u{30A0}'..='\u{30FF}'
            | '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{FF66}'..='\u{FF9F}'
    )
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/text.rs"]
mod tests;
