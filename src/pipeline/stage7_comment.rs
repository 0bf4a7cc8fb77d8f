use crate::model::policy::ShapingPolicy;
use crate::model::score::round1_tenths;
use crate::model::verdict::ToneBucket;

pub const UNINTERPRETABLE_COMMENT: &str = "入力された文章から一貫した意味や内容を読み取ることができませんでした。そのため、評価は低くなります。内容や意図が伝わるように、もう少し具体的に書き直してみてください。";

pub const ELLIPSIS: char = '…';

const SENTENCE_ENDS: &[char] = &['。', '．', '！', '？', '!', '?', '.'];
const CLAUSE_BREAKS: &[char] = &['、', '，', ',', '\n'];

pub fn tone_bucket(total_tenths: i32, policy: &ShapingPolicy) -> ToneBucket {
    if total_tenths <= round1_tenths(policy.harsh_max_total) {
        ToneBucket::Harsh
    } else if total_tenths <= round1_tenths(policy.neutral_max_total) {
        ToneBucket::Neutral
    } else {
        ToneBucket::Effusive
    }
}

pub fn max_chars(bucket: ToneBucket, policy: &ShapingPolicy) -> usize {
    match bucket {
        ToneBucket::Harsh => policy.harsh_max_chars,
        ToneBucket::Neutral => policy.neutral_max_chars,
        ToneBucket::Effusive => policy.effusive_max_chars,
    }
}

pub fn run_comment(raw: &str, total_tenths: i32, policy: &ShapingPolicy) -> (String, ToneBucket) {
    let bucket = tone_bucket(total_tenths, policy);
    (truncate_at_boundary(raw, max_chars(bucket, policy)), bucket)
}

/// Cuts `text` to at most `max` characters including the trailing ellipsis.
/// Prefers a sentence end, then a clause break, in the back half of the
/// window; falls back to a hard cut.
pub fn truncate_at_boundary(text: &str, max: usize) -> String {
    let trimmed = text.trim();
    let chars = trimmed.chars().collect::<Vec<_>>();
    if chars.len() <= max {
        return trimmed.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let window = max - 1;
    let half = window / 2;
    let last_in = |set: &[char]| {
        chars[..window]
            .iter()
            .rposition(|c| set.contains(c))
            .filter(|&i| i + 1 > half)
    };

    let cut = if let Some(i) = last_in(SENTENCE_ENDS) {
        i + 1
    } else if let Some(i) = last_in(CLAUSE_BREAKS) {
        // the clause mark itself is replaced by the ellipsis
        i
    } else {
        window
    };

    let mut out = chars[..cut].iter().collect::<String>();
    let kept = out.trim_end().len();
    out.truncate(kept);
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage7_comment.rs"]
mod tests;
