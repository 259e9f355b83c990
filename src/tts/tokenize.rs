//! Text chunking for the Translate speech endpoint, which rejects long `q` values.

use unicode_segmentation::UnicodeSegmentation;

/// Longest chunk, in characters, sent in one request.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Preferred split points. Includes the Devanagari danda used by Hindi and Marathi prompts.
const PUNCTUATION: &[char] = &[
    '.', ',', '!', '?', ';', ':', '।', '॥', '¿', '¡', '—', '…', '(', ')', '[', ']', '«', '»', '\n',
];

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Splits after the last punctuation mark inside the window, else before the
/// last whitespace, else at the last grapheme boundary inside the window, so a
/// consonant is never separated from its vowel sign. Chunks with nothing pronounceable
/// are dropped.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut rest = text.trim();

    while !rest.is_empty() {
        let limit = match rest.char_indices().nth(max_chars) {
            Some((idx, _)) => idx,
            None => {
                push_chunk(&mut chunks, rest);
                break;
            }
        };
        let window = &rest[..limit];
        let cut = window
            .char_indices()
            .rev()
            .find(|(_, c)| PUNCTUATION.contains(c))
            .map(|(i, c)| i + c.len_utf8())
            .or_else(|| {
                window
                    .char_indices()
                    .rev()
                    .find(|(_, c)| c.is_whitespace())
                    .map(|(i, _)| i)
            })
            .filter(|&i| i > 0)
            .unwrap_or_else(|| grapheme_floor(rest, limit));

        let (head, tail) = rest.split_at(cut);
        push_chunk(&mut chunks, head);
        rest = tail.trim_start();
    }

    chunks
}

/// Largest grapheme boundary at or below byte offset `limit`. A single
/// grapheme wider than the window is kept whole.
fn grapheme_floor(text: &str, limit: usize) -> usize {
    let mut cut = 0;
    for (idx, grapheme) in text.grapheme_indices(true) {
        let end = idx + grapheme.len();
        if end > limit {
            break;
        }
        cut = end;
    }
    if cut == 0 {
        text.graphemes(true).next().map(str::len).unwrap_or(limit)
    } else {
        cut
    }
}

fn push_chunk(chunks: &mut Vec<String>, chunk: &str) {
    let chunk = chunk.trim();
    if chunk.chars().any(char::is_alphanumeric) {
        chunks.push(chunk.to_string());
    }
}
