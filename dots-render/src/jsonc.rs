//! JSONC cleanup: comments and trailing commas are removed outside of string
//! literals so the result can be fed to a strict JSON parser.

/// Tracks whether the scanner is inside a double-quoted string literal.
#[derive(Debug, Default)]
struct StringState {
    in_string: bool,
    escaped: bool,
}

impl StringState {
    /// Feed the next character. Returns true if it belongs to a string
    /// literal, quotes included.
    fn feed(&mut self, c: char) -> bool {
        if self.in_string {
            if self.escaped {
                self.escaped = false;
            } else if c == '\\' {
                self.escaped = true;
            } else if c == '"' {
                self.in_string = false;
            }
            true
        } else if c == '"' {
            self.in_string = true;
            true
        } else {
            false
        }
    }
}

/// Remove `//` line comments and `/* */` block comments.
///
/// The newline ending a line comment is kept. An unterminated block comment
/// runs to the end of input.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = StringState::default();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if state.feed(c) {
            out.push(c);
            continue;
        }

        if c == '/' {
            match chars.peek() {
                Some('/') => {
                    while chars.next_if(|&n| n != '\n' && n != '\r').is_some() {}
                    continue;
                }
                Some('*') => {
                    chars.next();
                    let mut prev = None;
                    for n in chars.by_ref() {
                        if prev == Some('*') && n == '/' {
                            break;
                        }
                        prev = Some(n);
                    }
                    continue;
                }
                _ => {}
            }
        }

        out.push(c);
    }
    out
}

/// Remove commas whose next non-whitespace character closes an object or
/// array.
pub fn remove_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = StringState::default();

    for (idx, c) in text.char_indices() {
        if !state.feed(c) && c == ',' {
            let rest = text[idx + c.len_utf8()..].trim_start();
            if rest.starts_with(['}', ']']) {
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Turn JSONC into plain JSON text.
pub fn to_json(text: &str) -> String {
    remove_trailing_commas(&strip_comments(text))
}
