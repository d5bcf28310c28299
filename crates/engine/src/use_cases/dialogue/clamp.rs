//! Reply budget enforcement: sentences first, then characters.

/// Clamped text and whether anything was cut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clamped {
    pub text: String,
    pub truncated: bool,
}

const TERMINALS: [char; 3] = ['.', '!', '?'];
const CLOSERS: [char; 4] = ['"', '\'', ')', '\u{201d}'];

/// Collapse every whitespace run to one space and trim.
pub fn compact_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether the text already ends a sentence (closing quotes allowed).
pub fn ends_with_terminal(text: &str) -> bool {
    text.trim_end()
        .trim_end_matches(CLOSERS)
        .ends_with(TERMINALS)
}

/// Split into sentences. A sentence ends at a run of terminal punctuation
/// (plus closing quotes) followed by whitespace or the end of text.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !TERMINALS.contains(&c) {
            continue;
        }
        while let Some(&(_, next)) = chars.peek() {
            if TERMINALS.contains(&next) || CLOSERS.contains(&next) {
                chars.next();
            } else {
                break;
            }
        }
        let end = chars.peek().map_or(text.len(), |&(i, _)| i);
        let at_boundary = chars.peek().map_or(true, |&(_, next)| next.is_whitespace());
        if at_boundary {
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}

/// Fit `text` into `max_sentences` and `max_chars`, ending on terminal
/// punctuation. Empty input stays empty.
pub fn clamp_reply(text: &str, max_sentences: usize, max_chars: usize) -> Clamped {
    let compacted = compact_whitespace(text);
    if compacted.is_empty() || max_chars == 0 {
        return Clamped {
            text: String::new(),
            truncated: !compacted.is_empty(),
        };
    }

    let sentences = split_sentences(&compacted);
    let mut truncated = sentences.len() > max_sentences.max(1);
    let mut out = sentences
        .into_iter()
        .take(max_sentences.max(1))
        .collect::<Vec<_>>()
        .join(" ");

    if out.chars().count() > max_chars {
        truncated = true;
        out = cut_to_chars(&out, max_chars);
    }

    if !ends_with_terminal(&out) {
        let body = trim_dangling(&out);
        // No room left for the closing period.
        if body.chars().count() >= max_chars {
            truncated = true;
            out = cut_to_chars(body, max_chars);
        } else {
            out = body.to_string();
        }
        if !ends_with_terminal(&out) {
            out = close_sentence(out, max_chars);
        }
    }

    Clamped {
        text: out,
        truncated,
    }
}

/// Cut to at most `max_chars`, preferring the last whole sentence, then the
/// last word boundary. Leaves room for a closing period.
fn cut_to_chars(text: &str, max_chars: usize) -> String {
    let byte_limit = text
        .char_indices()
        .nth(max_chars)
        .map_or(text.len(), |(i, _)| i);
    let head = &text[..byte_limit];

    let whole: Vec<&str> = split_sentences(head)
        .into_iter()
        .filter(|s| ends_with_terminal(s))
        .collect();
    // A trailing fragment is never terminal, so `whole` is a prefix.
    if !whole.is_empty() {
        return whole.join(" ");
    }

    let room = max_chars.saturating_sub(1).max(1);
    let room_limit = text
        .char_indices()
        .nth(room)
        .map_or(text.len(), |(i, _)| i);
    let head = &text[..room_limit];
    let cut = match head.rfind(char::is_whitespace) {
        Some(i) if i > 0 => &head[..i],
        _ => head,
    };
    cut.trim_end_matches(|c: char| !c.is_alphanumeric())
        .to_string()
}

fn trim_dangling(text: &str) -> &str {
    text.trim_end_matches(|c: char| matches!(c, ',' | ';' | ':' | '-') || c.is_whitespace())
}

/// Append a period. Only a one-character budget has to give up its last
/// character for it.
fn close_sentence(text: String, max_chars: usize) -> String {
    let mut text = trim_dangling(&text).to_string();
    if text.is_empty() {
        return ".".to_string();
    }
    if text.chars().count() >= max_chars {
        text.pop();
    }
    text.push('.');
    text
}
