#![warn(missing_docs)]
//! `scoped-select-lang` - data-driven language configuration helpers for `scoped-select`.
//!
//! This crate intentionally stays lightweight and does **not** depend on any parsing or
//! highlighting system. It describes just enough of a language (comment tokens, string quotes,
//! block braces, function keywords) for a host to derive comment/string/block scope labels.

/// Comment tokens for a given language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentConfig {
    /// Line comment token (e.g. `//`, `#`).
    pub line: Option<String>,
    /// Block comment start token (e.g. `/*`).
    pub block_start: Option<String>,
    /// Block comment end token (e.g. `*/`).
    pub block_end: Option<String>,
}

impl CommentConfig {
    /// Create a config that supports only line comments.
    pub fn line(token: impl Into<String>) -> Self {
        Self {
            line: Some(token.into()),
            block_start: None,
            block_end: None,
        }
    }

    /// Create a config that supports both line and block comments.
    pub fn line_and_block(
        line: impl Into<String>,
        block_start: impl Into<String>,
        block_end: impl Into<String>,
    ) -> Self {
        Self {
            line: Some(line.into()),
            block_start: Some(block_start.into()),
            block_end: Some(block_end.into()),
        }
    }

    /// The line comment token, if one is configured and non-empty.
    pub fn line_token(&self) -> Option<&str> {
        self.line.as_deref().filter(|s| !s.is_empty())
    }

    /// The block comment tokens, if both are configured and non-empty.
    pub fn block_tokens(&self) -> Option<(&str, &str)> {
        let start = self.block_start.as_deref().filter(|s| !s.is_empty())?;
        let end = self.block_end.as_deref().filter(|s| !s.is_empty())?;
        Some((start, end))
    }
}

/// Everything a host needs to label comments, strings, blocks and functions in a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Human-readable language name.
    pub name: String,
    /// Base scope applied to every position (e.g. `source.rust`).
    pub base_scope: String,
    /// Comment tokens.
    pub comments: CommentConfig,
    /// Characters that open and close a string literal.
    pub string_quotes: Vec<char>,
    /// Block delimiters, usually `{` and `}`.
    pub block_open: char,
    /// See [`LanguageConfig::block_open`].
    pub block_close: char,
    /// Keywords that introduce a function whose body is the next block.
    pub function_keywords: Vec<String>,
}

impl LanguageConfig {
    /// Plain text: no comments, strings, or functions. Braces still form blocks.
    pub fn plain_text() -> Self {
        Self {
            name: "Plain Text".to_string(),
            base_scope: "text.plain".to_string(),
            comments: CommentConfig::default(),
            string_quotes: Vec::new(),
            block_open: '{',
            block_close: '}',
            function_keywords: Vec::new(),
        }
    }

    /// Rust.
    pub fn rust() -> Self {
        Self {
            name: "Rust".to_string(),
            base_scope: "source.rust".to_string(),
            comments: CommentConfig::line_and_block("//", "/*", "*/"),
            string_quotes: vec!['"'],
            block_open: '{',
            block_close: '}',
            function_keywords: vec!["fn".to_string()],
        }
    }

    /// JavaScript.
    pub fn javascript() -> Self {
        Self {
            name: "JavaScript".to_string(),
            base_scope: "source.js".to_string(),
            comments: CommentConfig::line_and_block("//", "/*", "*/"),
            string_quotes: vec!['"', '\'', '`'],
            block_open: '{',
            block_close: '}',
            function_keywords: vec!["function".to_string()],
        }
    }

    /// A shell-like language with `#` comments.
    pub fn shell() -> Self {
        Self {
            name: "Shell".to_string(),
            base_scope: "source.shell".to_string(),
            comments: CommentConfig::line("#"),
            string_quotes: vec!['"', '\''],
            block_open: '{',
            block_close: '}',
            function_keywords: vec!["function".to_string()],
        }
    }

    /// Returns `true` if `word` introduces a function.
    pub fn is_function_keyword(&self, word: &str) -> bool {
        self.function_keywords.iter().any(|k| k == word)
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self::plain_text()
    }
}
