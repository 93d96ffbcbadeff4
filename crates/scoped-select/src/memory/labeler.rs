//! Scope labels derived from a [`LanguageConfig`].
//!
//! This is a single-pass scanner, not a parser: it recognizes comments, quoted strings (with
//! backslash escapes), `{ }` blocks and function bodies, which is all the scope-aware
//! resolvers look at.

use crate::region::Region;
use crate::scope_label::{count_matching, scope_matches_selector};
use scoped_select_lang::LanguageConfig;
use std::cmp::Reverse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScopeSpan {
    pub(crate) scope: String,
    pub(crate) region: Region,
}

/// Scope spans of a buffer, outermost first at any position.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScopeLabels {
    base_scope: String,
    len: usize,
    spans: Vec<ScopeSpan>,
}

impl ScopeLabels {
    pub(crate) fn build(text: &str, language: &LanguageConfig) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let mut scanner = Scanner {
            chars: &chars,
            language,
            suffix: language
                .base_scope
                .rsplit('.')
                .next()
                .unwrap_or_default()
                .to_string(),
            spans: Vec::new(),
        };
        scanner.scan();

        let mut spans = scanner.spans;
        spans.sort_by_key(|span| (span.region.begin(), Reverse(span.region.end())));
        Self {
            base_scope: language.base_scope.clone(),
            len: chars.len(),
            spans,
        }
    }

    fn spans_at(&self, pos: usize) -> impl Iterator<Item = &ScopeSpan> {
        self.spans
            .iter()
            .take_while(move |span| span.region.begin() <= pos)
            .filter(move |span| pos < span.region.end())
    }

    pub(crate) fn scope_name(&self, pos: usize) -> String {
        let mut name = self.base_scope.clone();
        for span in self.spans_at(pos) {
            name.push(' ');
            name.push_str(&span.scope);
        }
        name
    }

    pub(crate) fn block_depth(&self, pos: usize) -> usize {
        self.spans_at(pos)
            .map(|span| count_matching(&span.scope, "meta.block"))
            .sum()
    }

    pub(crate) fn find_by_selector(&self, selector: &str) -> Vec<Region> {
        if scope_matches_selector(&self.base_scope, selector) {
            return vec![Region::new(0, self.len)];
        }
        self.spans
            .iter()
            .filter(|span| scope_matches_selector(&span.scope, selector))
            .map(|span| span.region)
            .collect()
    }
}

fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

struct Scanner<'a> {
    chars: &'a [char],
    language: &'a LanguageConfig,
    suffix: String,
    spans: Vec<ScopeSpan>,
}

impl Scanner<'_> {
    fn push(&mut self, scope: &str, begin: usize, end: usize) {
        let scope = if self.suffix.is_empty() {
            scope.to_string()
        } else {
            format!("{}.{}", scope, self.suffix)
        };
        self.spans.push(ScopeSpan {
            scope,
            region: Region::new(begin, end),
        });
    }

    fn starts_with(&self, pos: usize, token: &str) -> bool {
        let mut i = pos;
        for ch in token.chars() {
            if self.chars.get(i) != Some(&ch) {
                return false;
            }
            i += 1;
        }
        true
    }

    fn find_token(&self, from: usize, token: &str) -> Option<usize> {
        (from..self.chars.len()).find(|&i| self.starts_with(i, token))
    }

    fn scan(&mut self) {
        let len = self.chars.len();
        let line_comment = self.language.comments.line_token().map(str::to_string);
        let block_comment = self
            .language
            .comments
            .block_tokens()
            .map(|(start, end)| (start.to_string(), end.to_string()));

        // (open brace, start of the function that owns the block)
        let mut open_blocks: Vec<(usize, Option<usize>)> = Vec::new();
        let mut pending_function: Option<usize> = None;
        let mut i = 0;

        while i < len {
            if let Some(token) = line_comment.as_deref() {
                if self.starts_with(i, token) {
                    let end = (i..len).find(|&j| self.chars[j] == '\n').unwrap_or(len);
                    self.push("comment.line", i, end);
                    i = end;
                    continue;
                }
            }

            if let Some((start, end)) = block_comment.as_ref() {
                if self.starts_with(i, start) {
                    let body = i + start.chars().count();
                    let stop = self
                        .find_token(body, end)
                        .map(|pos| pos + end.chars().count())
                        .unwrap_or(len);
                    self.push("comment.block", i, stop);
                    i = stop;
                    continue;
                }
            }

            let ch = self.chars[i];
            if self.language.string_quotes.contains(&ch) {
                let end = self.string_end(i, ch);
                let scope = match ch {
                    '"' => "string.quoted.double",
                    '\'' => "string.quoted.single",
                    '`' => "string.quoted.backtick",
                    _ => "string.quoted.other",
                };
                self.push(scope, i, end);
                i = end;
                continue;
            }

            if ch == self.language.block_open {
                open_blocks.push((i, pending_function.take()));
            } else if ch == self.language.block_close {
                if let Some((open, function)) = open_blocks.pop() {
                    self.push("meta.block", open, i + 1);
                    if let Some(start) = function {
                        self.push("meta.function", start, i + 1);
                    }
                }
                pending_function = None;
            } else if ch == ';' {
                pending_function = None;
            } else if is_word_char(ch) {
                let start = i;
                while i < len && is_word_char(self.chars[i]) {
                    i += 1;
                }
                let word: String = self.chars[start..i].iter().collect();
                if self.language.is_function_keyword(&word) {
                    pending_function = Some(start);
                }
                continue;
            }
            i += 1;
        }

        // Unterminated blocks run to the end of the buffer.
        while let Some((open, function)) = open_blocks.pop() {
            self.push("meta.block", open, len);
            if let Some(start) = function {
                self.push("meta.function", start, len);
            }
        }
    }

    fn string_end(&self, open: usize, quote: char) -> usize {
        let len = self.chars.len();
        let mut j = open + 1;
        while j < len {
            match self.chars[j] {
                '\\' => j += 2,
                ch if ch == quote => return j + 1,
                _ => j += 1,
            }
        }
        len
    }
}
