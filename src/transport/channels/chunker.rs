//! Reply wrapping for platform message-length limits.
//!
//! Text is cut at the widest boundary that fits: paragraph, line, sentence,
//! word and finally single characters. Whitespace at a cut is dropped so
//! chunks never start or end with the separator they were split on.

fn char_count(text: &str) -> usize {
    text.chars().count()
}

#[derive(Clone, Copy, Debug)]
enum Boundary {
    Paragraph,
    Line,
    Sentence,
    Word,
}

impl Boundary {
    const ORDER: [Self; 4] = [Self::Paragraph, Self::Line, Self::Sentence, Self::Word];

    /// Byte offsets where a piece may end, each just past the separator.
    fn cut_points(self, text: &str) -> Vec<usize> {
        match self {
            Self::Paragraph => ends_after(text, "\n\n"),
            Self::Line => ends_after(text, "\n"),
            Self::Word => ends_after(text, " "),
            Self::Sentence => text
                .char_indices()
                .zip(text.chars().skip(1))
                .filter(|((_, c), next)| matches!(c, '.' | '!' | '?') && *next == ' ')
                .map(|((i, c), _)| i + c.len_utf8() + 1)
                .collect(),
        }
    }
}

fn ends_after(text: &str, separator: &str) -> Vec<usize> {
    text.match_indices(separator)
        .map(|(i, sep)| i + sep.len())
        .collect()
}

fn pieces(text: &str, boundary: Boundary) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    for end in boundary.cut_points(text) {
        if end > start {
            out.push(&text[start..end]);
            start = end;
        }
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

fn split_chars(text: &str, max_chars: usize, out: &mut Vec<String>) {
    let chars: Vec<char> = text.chars().collect();
    out.extend(chars.chunks(max_chars).map(|c| c.iter().collect::<String>()));
}

fn flush(current: &mut String, out: &mut Vec<String>) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
    current.clear();
}

fn wrap_at(text: &str, max_chars: usize, level: usize, out: &mut Vec<String>) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if char_count(text) <= max_chars {
        out.push(text.to_string());
        return;
    }
    let Some(boundary) = Boundary::ORDER.get(level).copied() else {
        split_chars(text, max_chars, out);
        return;
    };

    let mut current = String::new();
    for piece in pieces(text, boundary) {
        if char_count(piece.trim()) > max_chars {
            flush(&mut current, out);
            wrap_at(piece, max_chars, level + 1, out);
        } else if char_count(current.trim_start()) + char_count(piece.trim_end()) <= max_chars {
            current.push_str(piece);
        } else {
            flush(&mut current, out);
            current.push_str(piece);
        }
    }
    flush(&mut current, out);
}

/// Split `text` into chunks of at most `max_chars` characters.
#[must_use]
pub fn wrap_reply(text: &str, max_chars: usize) -> Vec<String> {
    if max_chars == 0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    wrap_at(text, max_chars, 0, &mut out);
    out
}
