// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Tokenizer for `.htex` sources.
//!
//! [`Scanner`] splits a byte stream into literal text runs, tag-open
//! fragments (`<!method`), whitespace-delimited tag arguments, and a
//! synthetic closing token for `>`. Two constructs that share the `<!`
//! sigil are deliberately *not* tags:
//!
//! - `<!doctype ...>` (any case mix) stays literal text, since doctype
//!   declarations are valid leading HTML.
//! - HTML comments `<!-- ... -->` are either swallowed entirely (the
//!   default) or folded into the surrounding text run when comments are
//!   kept. An unterminated comment drops everything after `<!--`.
//!
//! The scanner is incremental: it consumes the buffer from the front and
//! reports [`Scan::More`] when a decision cannot be made at the end of a
//! partial buffer. State lives in three flags (`inside_tag`,
//! `inside_comment`, `closing_tag`) carried across calls.

/// One token produced by the [`Scanner`], borrowing from the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'t> {
    /// A literal text run, emitted verbatim at render time.
    Text(&'t [u8]),
    /// A tag-open fragment including the sigil, e.g. `<!method`.
    TagOpen(&'t [u8]),
    /// One whitespace- or `>`-delimited tag argument word.
    TagArg(&'t [u8]),
    /// The synthetic token for the `>` closing a tag.
    TagClose,
}

/// Result of one [`Scanner::next`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan<'t> {
    /// A complete token; `consumed` bytes are done with and must be dropped
    /// from the front of the buffer before the next call.
    Token {
        /// Number of bytes consumed from the front of the buffer.
        consumed: usize,
        /// The token, borrowing from the consumed region or just past it.
        token: Token<'t>,
    },
    /// `consumed` bytes were swallowed without producing a token (discarded
    /// comment data); drop them and call again.
    Skip {
        /// Number of bytes consumed from the front of the buffer.
        consumed: usize,
    },
    /// No decision could be made at the end of the buffer; call again with
    /// more data appended. Nothing was consumed.
    More,
    /// All input has been consumed.
    Done,
}

/// Stateful `.htex` tokenizer.
#[derive(Debug, Clone)]
pub struct Scanner {
    keep_comments: bool,
    inside_tag: bool,
    inside_comment: bool,
    closing_tag: bool,
}

impl Scanner {
    /// Creates a scanner. With `keep_comments`, `<!-- ... -->` is folded
    /// into the surrounding text instead of being discarded.
    pub fn new(keep_comments: bool) -> Self {
        Self {
            keep_comments,
            inside_tag: false,
            inside_comment: false,
            closing_tag: false,
        }
    }

    /// Scans the next token from `data`.
    ///
    /// `data` must start where the previous call left off (drop `consumed`
    /// bytes from the front between calls). `at_eof` marks `data` as the
    /// final buffer; with `at_eof` false the scanner may answer
    /// [`Scan::More`] to request a longer buffer instead of guessing.
    pub fn next<'t>(&mut self, data: &'t [u8], at_eof: bool) -> Scan<'t> {
        // A pending synthetic close wins over everything else.
        if self.closing_tag {
            self.closing_tag = false;
            return Scan::Token {
                consumed: 1,
                token: Token::TagClose,
            };
        }
        if self.inside_comment {
            return self.scan_comment(data, at_eof);
        }
        if self.inside_tag {
            return self.scan_arg(data, at_eof);
        }
        self.scan_text(data, at_eof)
    }

    /// Swallows a discarded comment. The buffer starts at (or inside) the
    /// comment; everything through `-->` is consumed without a token.
    fn scan_comment<'t>(&mut self, data: &'t [u8], at_eof: bool) -> Scan<'t> {
        match find_comment_end(data) {
            Some(end) => {
                self.inside_comment = false;
                Scan::Skip { consumed: end }
            }
            None if at_eof => {
                // Unterminated comment: the remainder is silently dropped.
                self.inside_comment = false;
                if data.is_empty() {
                    Scan::Done
                } else {
                    Scan::Skip {
                        consumed: data.len(),
                    }
                }
            }
            None => {
                // Keep the last two bytes; `-->` may straddle the edge.
                if data.len() <= 2 {
                    Scan::More
                } else {
                    Scan::Skip {
                        consumed: data.len() - 2,
                    }
                }
            }
        }
    }

    /// Scans one argument inside a tag. Whitespace ends the argument
    /// (consuming the whole run), `>` ends the tag.
    fn scan_arg<'t>(&mut self, data: &'t [u8], at_eof: bool) -> Scan<'t> {
        let mut i = 0;
        while i < data.len() {
            match data[i] {
                b' ' | b'\r' | b'\n' => {
                    let j = i;
                    while i < data.len() && matches!(data[i], b' ' | b'\r' | b'\n') {
                        i += 1;
                    }
                    if i == data.len() && !at_eof {
                        // The whitespace run may continue past the buffer.
                        return Scan::More;
                    }
                    return Scan::Token {
                        consumed: i,
                        token: Token::TagArg(&data[..j]),
                    };
                }
                b'>' => {
                    self.inside_tag = false;
                    self.closing_tag = true;
                    return Scan::Token {
                        consumed: i,
                        token: Token::TagArg(&data[..i]),
                    };
                }
                _ => i += 1,
            }
        }
        if !at_eof {
            return Scan::More;
        }
        // Truncated tag: flush the remainder as a final argument.
        self.inside_tag = false;
        if data.is_empty() {
            Scan::Done
        } else {
            Scan::Token {
                consumed: data.len(),
                token: Token::TagArg(data),
            }
        }
    }

    /// Scans literal text up to the next tag or comment start.
    fn scan_text<'t>(&mut self, data: &'t [u8], at_eof: bool) -> Scan<'t> {
        let mut i = 0;
        while i < data.len() {
            if data[i] != b'<' {
                i += 1;
                continue;
            }
            if i + 1 >= data.len() {
                if at_eof {
                    // A trailing `<` is plain text.
                    break;
                }
                return Scan::More;
            }
            if data[i + 1] != b'!' {
                i += 1;
                continue;
            }
            let rest = &data[i + 2..];
            if rest.is_empty() {
                if at_eof {
                    // A trailing `<!` is plain text.
                    break;
                }
                return Scan::More;
            }
            if rest.starts_with(b"--") {
                if self.keep_comments {
                    // The whole comment becomes part of this text run.
                    match find_comment_end(&data[i..]) {
                        Some(end) => {
                            i += end;
                            continue;
                        }
                        None if at_eof => {
                            i = data.len();
                            continue;
                        }
                        None => return Scan::More,
                    }
                }
                self.inside_comment = true;
                if i > 0 {
                    return Scan::Token {
                        consumed: i,
                        token: Token::Text(&data[..i]),
                    };
                }
                return self.scan_comment(data, at_eof);
            }
            // 7-byte lookahead to rule out `<!doctype`.
            if rest.len() < DOCTYPE.len() && !at_eof {
                return Scan::More;
            }
            if starts_with_doctype(rest) || rest[0] == b' ' || rest[0] == b'>' {
                // Doctype declarations and `<!` without a tag name stay text.
                i += 1;
                continue;
            }
            if i > 0 {
                return Scan::Token {
                    consumed: i,
                    token: Token::Text(&data[..i]),
                };
            }
            return self.scan_tag_name(data, at_eof);
        }
        if !at_eof {
            return Scan::More;
        }
        if data.is_empty() {
            Scan::Done
        } else {
            Scan::Token {
                consumed: data.len(),
                token: Token::Text(data),
            }
        }
    }

    /// Scans the tag name at the head of the buffer (`data` starts with
    /// `<!`). The name runs to the first whitespace (consumed, excluded
    /// from the token) or `>` (left for the synthetic close).
    fn scan_tag_name<'t>(&mut self, data: &'t [u8], at_eof: bool) -> Scan<'t> {
        for j in 2..data.len() {
            match data[j] {
                b' ' | b'\r' | b'\n' => {
                    self.inside_tag = true;
                    return Scan::Token {
                        consumed: j + 1,
                        token: Token::TagOpen(&data[..j]),
                    };
                }
                b'>' => {
                    self.closing_tag = true;
                    return Scan::Token {
                        consumed: j,
                        token: Token::TagOpen(&data[..j]),
                    };
                }
                _ => {}
            }
        }
        if !at_eof {
            return Scan::More;
        }
        // Truncated tag at end of input.
        Scan::Token {
            consumed: data.len(),
            token: Token::TagOpen(data),
        }
    }
}

const DOCTYPE: &[u8] = b"doctype";

fn starts_with_doctype(rest: &[u8]) -> bool {
    rest.len() >= DOCTYPE.len() && rest[..DOCTYPE.len()].eq_ignore_ascii_case(DOCTYPE)
}

/// Returns the offset just past the first `-->` in `data`, if present.
fn find_comment_end(data: &[u8]) -> Option<usize> {
    data.windows(3).position(|w| w == b"-->").map(|p| p + 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Owned token for assertions.
    #[derive(Debug, PartialEq, Eq)]
    enum Tok {
        Text(String),
        Open(String),
        Arg(String),
        Close,
    }

    fn tokenize(input: &str, keep_comments: bool) -> Vec<Tok> {
        let mut scanner = Scanner::new(keep_comments);
        let data = input.as_bytes();
        let mut pos = 0;
        let mut out = Vec::new();
        loop {
            match scanner.next(&data[pos..], true) {
                Scan::Token { consumed, token } => {
                    pos += consumed;
                    let owned = |b: &[u8]| String::from_utf8_lossy(b).into_owned();
                    out.push(match token {
                        Token::Text(t) => Tok::Text(owned(t)),
                        Token::TagOpen(t) => Tok::Open(owned(t)),
                        Token::TagArg(t) => Tok::Arg(owned(t)),
                        Token::TagClose => Tok::Close,
                    });
                }
                Scan::Skip { consumed } => pos += consumed,
                Scan::More => panic!("More with at_eof"),
                Scan::Done => return out,
            }
        }
    }

    #[test]
    fn test_plain_text_passthrough() {
        assert_eq!(tokenize("", false), vec![]);
        assert_eq!(tokenize("hello <b>world</b>", false), vec![Tok::Text("hello <b>world</b>".into())]);
        assert_eq!(tokenize("a<", false), vec![Tok::Text("a<".into())]);
        assert_eq!(tokenize("a<!", false), vec![Tok::Text("a<!".into())]);
    }

    #[test]
    fn test_tag_with_argument() {
        assert_eq!(
            tokenize("a<!get x>b", false),
            vec![
                Tok::Text("a".into()),
                Tok::Open("<!get".into()),
                Tok::Arg("x".into()),
                Tok::Close,
                Tok::Text("b".into()),
            ]
        );
    }

    #[test]
    fn test_tag_without_arguments() {
        assert_eq!(
            tokenize("<!content>b", false),
            vec![Tok::Open("<!content".into()), Tok::Close, Tok::Text("b".into())]
        );
    }

    #[test]
    fn test_extra_whitespace_between_arguments() {
        // A doubled separator yields an empty argument word.
        assert_eq!(
            tokenize("<!set  x y>", false),
            vec![
                Tok::Open("<!set".into()),
                Tok::Arg("".into()),
                Tok::Arg("x".into()),
                Tok::Arg("y".into()),
                Tok::Close,
            ]
        );
    }

    #[test]
    fn test_doctype_is_text() {
        assert_eq!(
            tokenize("a<!DOCTYPE html>b<!DocType html>c", false),
            vec![Tok::Text("a<!DOCTYPE html>b<!DocType html>c".into())]
        );
        assert_eq!(
            tokenize("a<!doctype html", false),
            vec![Tok::Text("a<!doctype html".into())]
        );
    }

    #[test]
    fn test_comment_discarded() {
        assert_eq!(
            tokenize("a<!-- c -->b", false),
            vec![Tok::Text("a".into()), Tok::Text("b".into())]
        );
        assert_eq!(tokenize("a<!-->b", false), vec![Tok::Text("a".into()), Tok::Text("b".into())]);
        assert_eq!(tokenize("a<!--", false), vec![Tok::Text("a".into())]);
        assert_eq!(tokenize("<!-- c -->", false), vec![] as Vec<Tok>);
    }

    #[test]
    fn test_comment_kept_folds_into_text() {
        assert_eq!(
            tokenize("a<!-- c -->b", true),
            vec![Tok::Text("a<!-- c -->b".into())]
        );
        assert_eq!(tokenize("a<!-->b", true), vec![Tok::Text("a<!-->b".into())]);
        assert_eq!(
            tokenize("abcd<!-- c --", true),
            vec![Tok::Text("abcd<!-- c --".into())]
        );
    }

    #[test]
    fn test_kept_comment_before_tag() {
        assert_eq!(
            tokenize("a<!-- c --><!url>", true),
            vec![
                Tok::Text("a<!-- c -->".into()),
                Tok::Open("<!url".into()),
                Tok::Close,
            ]
        );
    }

    #[test]
    fn test_truncated_tag_flushes_at_eof() {
        assert_eq!(
            tokenize("a<!get x", false),
            vec![
                Tok::Text("a".into()),
                Tok::Open("<!get".into()),
                Tok::Arg("x".into()),
            ]
        );
    }

    #[test]
    fn test_partial_buffer_requests_more() {
        let mut scanner = Scanner::new(false);
        // Undecidable: text may continue, `<!do` may become `<!doctype`.
        assert_eq!(scanner.next(b"abc", false), Scan::More);
        assert_eq!(scanner.next(b"abc<!do", false), Scan::More);
        // Decidable once a tag start is complete.
        match scanner.next(b"abc<!get x>", false) {
            Scan::Token { consumed, token } => {
                assert_eq!(consumed, 3);
                assert_eq!(token, Token::Text(b"abc"));
            }
            other => panic!("unexpected scan: {:?}", other),
        }
    }

    #[test]
    fn test_synthetic_close_has_priority() {
        let mut scanner = Scanner::new(false);
        let data = b"<!url>x";
        let mut pos = 0;
        match scanner.next(&data[pos..], true) {
            Scan::Token { consumed, token } => {
                assert_eq!(token, Token::TagOpen(b"<!url"));
                pos += consumed;
            }
            other => panic!("unexpected scan: {:?}", other),
        }
        match scanner.next(&data[pos..], true) {
            Scan::Token { consumed, token } => {
                assert_eq!(token, Token::TagClose);
                assert_eq!(consumed, 1);
            }
            other => panic!("unexpected scan: {:?}", other),
        }
    }
}
