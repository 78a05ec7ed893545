//! String-literal escaping for embedded Python source
//!
//! Opaque payloads are copied into notebook cells. A raw newline inside a
//! quoted literal (typically a `print("...")` that was itself stored inside a
//! string) would split the literal across lines and break the cell, so every
//! raw newline found inside a string literal is rewritten as `\n`.
//!
//! The rewrite is idempotent: escaped output contains no raw newline inside
//! any literal, and `\n` is read back as an escape sequence, so a second pass
//! is a no-op.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    Comment,
    Str { quote: char, triple: bool, escape: bool },
}

/// Re-escape raw newlines inside Python string literals
///
/// Line endings are normalised to `\n` first. Comments are copied verbatim
/// (quotes inside them do not open a literal).
pub fn escape_string_literals(src: &str) -> String {
    if src.is_empty() {
        return String::new();
    }
    let normalized = src.replace("\r\n", "\n").replace('\r', "\n");
    let chars: Vec<char> = normalized.chars().collect();
    let n = chars.len();
    let mut out = String::with_capacity(normalized.len());
    let mut state = State::Code;
    let mut i = 0;

    let is_triple = |i: usize, q: char| i + 2 < n && chars[i + 1] == q && chars[i + 2] == q;

    while i < n {
        let ch = chars[i];
        match state {
            State::Comment => {
                out.push(ch);
                if ch == '\n' {
                    state = State::Code;
                }
                i += 1;
            }
            State::Str {
                quote,
                triple,
                escape,
            } => {
                if escape {
                    out.push(ch);
                    state = State::Str {
                        quote,
                        triple,
                        escape: false,
                    };
                    i += 1;
                } else if ch == '\\' {
                    out.push(ch);
                    state = State::Str {
                        quote,
                        triple,
                        escape: true,
                    };
                    i += 1;
                } else if ch == '\n' {
                    out.push_str("\\n");
                    i += 1;
                } else if ch == quote && (!triple || is_triple(i, quote)) {
                    let width = if triple { 3 } else { 1 };
                    out.extend(std::iter::repeat(quote).take(width));
                    state = State::Code;
                    i += width;
                } else {
                    out.push(ch);
                    i += 1;
                }
            }
            State::Code => match ch {
                '#' => {
                    out.push(ch);
                    state = State::Comment;
                    i += 1;
                }
                '\'' | '"' => {
                    let triple = is_triple(i, ch);
                    let width = if triple { 3 } else { 1 };
                    out.extend(std::iter::repeat(ch).take(width));
                    state = State::Str {
                        quote: ch,
                        triple,
                        escape: false,
                    };
                    i += width;
                }
                _ => {
                    out.push(ch);
                    i += 1;
                }
            },
        }
    }
    out
}
