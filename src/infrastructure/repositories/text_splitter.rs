use regex::Regex;
use std::sync::LazyLock;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?]+\s+)").expect("sentence pattern is valid"));

/// Split text into parts of at most `max_len` bytes, preferring sentence
/// boundaries. Text without usable boundaries is cut on char boundaries.
pub fn split_into_parts(text: &str, max_len: usize) -> Vec<String> {
    if text.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut last_end = 0;

    let push_piece = |piece: &str, current: &mut String, parts: &mut Vec<String>| {
        if !current.is_empty() && current.len() + piece.len() > max_len {
            push_trimmed(current, parts);
        }
        if piece.len() > max_len {
            for chunk in split_on_chars(piece, max_len) {
                parts.push(chunk);
            }
        } else {
            current.push_str(piece);
        }
    };

    for mat in SENTENCE_END.find_iter(text) {
        push_piece(&text[last_end..mat.end()], &mut current, &mut parts);
        last_end = mat.end();
    }

    // Remaining text after the last sentence boundary
    if last_end < text.len() {
        push_piece(&text[last_end..], &mut current, &mut parts);
    }

    push_trimmed(&mut current, &mut parts);

    parts
}

fn push_trimmed(current: &mut String, parts: &mut Vec<String>) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
    current.clear();
}

fn split_on_chars(text: &str, max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    for c in text.chars() {
        if chunk.len() + c.len_utf8() > max_len {
            chunks.push(std::mem::take(&mut chunk));
        }
        chunk.push(c);
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}
