//! Text substitution rules: parse rule files into the line and text filters.
//!
//! One rule per line:
//!
//! ```text
//! scope type "match" "replacement"
//! ```
//!
//! - `scope`: `line` (each output line) or `text` (the whole text, once)
//! - `type`: `word` (literal replace-all) or `regex` (replacement expands `$1`, `${name}`)
//! - strings are double-quoted with backslash escapes, or back-quoted raw strings
//! - `//` and `/* */` comments, blank lines ignored

use anyhow::{Context, Result};
use log::debug;
use regex::bytes::{NoExpand, Regex};
use std::path::PathBuf;

use crate::error::OcrError;

/// One compiled substitution.
pub type Rule = Box<dyn Fn(&[u8]) -> Vec<u8> + Send + Sync>;

/// Compiled rules. Empty (identity) by default.
#[derive(Default)]
pub struct Filters {
    line_rules: Vec<Rule>,
    text_rules: Vec<Rule>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and compile rule files in order.
    pub fn load(paths: &[PathBuf]) -> Result<Self> {
        let mut filters = Self::new();
        for path in paths {
            let src = std::fs::read_to_string(path)
                .with_context(|| format!("read rule file {}", path.display()))?;
            filters.add(&src, &path.display().to_string())?;
        }
        debug!(
            "Loaded {} line rules, {} text rules",
            filters.line_rules.len(),
            filters.text_rules.len()
        );
        Ok(filters)
    }

    /// Compile the rules in `src` and append them. `name` is used in error messages.
    pub fn add(&mut self, src: &str, name: &str) -> Result<(), OcrError> {
        RuleParser::new(src, name).parse_into(self)
    }

    pub fn line_rule_count(&self) -> usize {
        self.line_rules.len()
    }

    pub fn text_rule_count(&self) -> usize {
        self.text_rules.len()
    }

    pub fn apply_line(&self, line: &[u8]) -> Vec<u8> {
        apply_all(&self.line_rules, line)
    }

    pub fn apply_text(&self, text: &[u8]) -> Vec<u8> {
        apply_all(&self.text_rules, text)
    }
}

fn apply_all(rules: &[Rule], input: &[u8]) -> Vec<u8> {
    rules
        .iter()
        .fold(input.to_vec(), |acc, rule| rule(&acc))
}

fn word_rule(word: &[u8], subst: Vec<u8>) -> Result<Rule, regex::Error> {
    let re = Regex::new(&byte_pattern(word, true))?;
    Ok(Box::new(move |s: &[u8]| {
        re.replace_all(s, NoExpand(&subst)).into_owned()
    }))
}

fn regex_rule(re: Regex, subst: Vec<u8>) -> Rule {
    Box::new(move |s: &[u8]| re.replace_all(s, subst.as_slice()).into_owned())
}

/// Regex source for `bytes`. Bytes that are not valid UTF-8 become `(?-u:\xHH)` so they
/// match themselves; with `literal`, the valid text is escaped too.
fn byte_pattern(bytes: &[u8], literal: bool) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        if literal {
            out.push_str(&regex::escape(chunk.valid()));
        } else {
            out.push_str(chunk.valid());
        }
        for b in chunk.invalid() {
            out.push_str(&format!("(?-u:\\x{:02X})", b));
        }
    }
    out
}

// ---- Tokenizer ----

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Ident(String),
    /// String literal as written, quotes included.
    Str(String),
    Newline,
    Other(char),
    Eof,
}

impl Token {
    fn text(&self) -> String {
        match self {
            Token::Ident(s) | Token::Str(s) => s.clone(),
            Token::Newline => "\n".to_string(),
            Token::Other(c) => c.to_string(),
            Token::Eof => String::new(),
        }
    }
}

struct RuleParser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    name: &'a str,
    line: usize,
    /// Line on which the most recent token started.
    token_line: usize,
}

impl<'a> RuleParser<'a> {
    fn new(src: &'a str, name: &'a str) -> Self {
        Self {
            chars: src.chars().peekable(),
            name,
            line: 1,
            token_line: 1,
        }
    }

    fn error(&self, message: impl Into<String>) -> OcrError {
        OcrError::Rule {
            file: self.name.to_string(),
            line: self.token_line,
            message: message.into(),
        }
    }

    fn invalid_token(&self, expected: &str, found: &Token) -> OcrError {
        self.error(format!("Expected {}, but found {:?}", expected, found.text()))
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn skip_line_comment(&mut self) {
        // Leave the newline in place; it still ends the rule.
        while let Some(&c) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), OcrError> {
        let mut prev = '\0';
        while let Some(c) = self.bump() {
            if prev == '*' && c == '/' {
                return Ok(());
            }
            prev = c;
        }
        Err(self.error("comment not terminated"))
    }

    fn scan_string(&mut self, quote: char) -> Result<Token, OcrError> {
        let mut raw = String::from(quote);
        let mut escaped = false;
        loop {
            let c = match self.chars.peek() {
                Some(&c) => c,
                None => return Err(self.error("literal not terminated")),
            };
            if quote == '"' && c == '\n' {
                return Err(self.error("literal not terminated"));
            }
            self.bump();
            raw.push(c);
            if quote == '"' && !escaped && c == '\\' {
                escaped = true;
                continue;
            }
            if c == quote && !escaped {
                return Ok(Token::Str(raw));
            }
            escaped = false;
        }
    }

    fn next_token(&mut self) -> Result<Token, OcrError> {
        loop {
            self.token_line = self.line;
            let c = match self.chars.peek() {
                Some(&c) => c,
                None => return Ok(Token::Eof),
            };
            match c {
                ' ' | '\t' | '\r' => {
                    self.bump();
                }
                '\n' => {
                    self.bump();
                    return Ok(Token::Newline);
                }
                '/' => {
                    self.bump();
                    match self.chars.peek() {
                        Some('/') => self.skip_line_comment(),
                        Some('*') => {
                            self.bump();
                            self.skip_block_comment()?;
                        }
                        _ => return Ok(Token::Other('/')),
                    }
                }
                '"' | '`' => {
                    self.bump();
                    return self.scan_string(c);
                }
                c if c.is_alphabetic() || c == '_' => {
                    let mut ident = String::new();
                    while let Some(&c) = self.chars.peek() {
                        if !(c.is_alphanumeric() || c == '_') {
                            break;
                        }
                        ident.push(c);
                        self.bump();
                    }
                    return Ok(Token::Ident(ident));
                }
                other => {
                    self.bump();
                    return Ok(Token::Other(other));
                }
            }
        }
    }

    fn skip_newlines(&mut self) -> Result<Token, OcrError> {
        loop {
            let t = self.next_token()?;
            if t != Token::Newline {
                return Ok(t);
            }
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<String, OcrError> {
        match self.next_token()? {
            Token::Ident(s) => Ok(s),
            other => Err(self.invalid_token(what, &other)),
        }
    }

    fn expect_string(&mut self, what: &str) -> Result<String, OcrError> {
        match self.next_token()? {
            Token::Str(s) => Ok(s),
            other => Err(self.invalid_token(what, &other)),
        }
    }

    fn parse_into(mut self, filters: &mut Filters) -> Result<(), OcrError> {
        let mut t = self.skip_newlines()?;
        while t != Token::Eof {
            let scope = match t {
                Token::Ident(s) => s,
                other => return Err(self.invalid_token("rule scope", &other)),
            };
            let rule_type = self.expect_ident("rule type")?;

            let raw = self.expect_string("regular expression or word string")?;
            let pattern = unquote(&raw).map_err(|e| {
                self.error(format!("Regular expression or word string: {}", e))
            })?;
            if pattern.is_empty() {
                return Err(self.error("Regular expression or word cannot be empty"));
            }

            let raw = self.expect_string("substitution string")?;
            let subst = unquote(&raw)
                .map_err(|e| self.error(format!("Invalid substitution string: {}", e)))?;

            let rule = match rule_type.as_str() {
                "word" => word_rule(&pattern, subst).map_err(|e| self.error(e.to_string()))?,
                "regex" => {
                    let re = Regex::new(&byte_pattern(&pattern, false))
                        .map_err(|e| self.error(e.to_string()))?;
                    regex_rule(re, subst)
                }
                _ => return Err(self.error(format!("Unknown rule type: {}", rule_type))),
            };
            match scope.as_str() {
                "line" => filters.line_rules.push(rule),
                "text" => filters.text_rules.push(rule),
                _ => return Err(self.error(format!("Unknown rule scope: {}", scope))),
            }

            t = match self.next_token()? {
                Token::Eof => Token::Eof,
                Token::Newline => self.skip_newlines()?,
                other => return Err(self.invalid_token("newline", &other)),
            };
        }
        Ok(())
    }
}

/// Decode a string literal as written (`"..."` with escapes, or `` `...` `` raw).
/// `\xHH` and octal `\NNN` produce a raw byte; `\u` and `\U` produce UTF-8.
pub fn unquote(raw: &str) -> Result<Vec<u8>, &'static str> {
    if let Some(body) = raw.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
        return Ok(body.replace('\r', "").into_bytes());
    }
    let body = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or("invalid syntax")?;

    let mut out = Vec::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            push_char(&mut out, c);
            continue;
        }
        let esc = chars.next().ok_or("invalid syntax")?;
        let decoded = match esc {
            'a' => '\x07',
            'b' => '\x08',
            'f' => '\x0c',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\x0b',
            '\\' => '\\',
            '"' => '"',
            'x' => {
                out.push(byte_escape(&mut chars, esc, 16, 2)?);
                continue;
            }
            '0'..='7' => {
                out.push(byte_escape(&mut chars, esc, 8, 3)?);
                continue;
            }
            'u' => hex_char(&mut chars, 4)?,
            'U' => hex_char(&mut chars, 8)?,
            _ => return Err("invalid syntax"),
        };
        push_char(&mut out, decoded);
    }
    Ok(out)
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

/// `\xHH` (after the `x`) or `\NNN` (starting at `first`); the value must fit in a byte.
fn byte_escape(
    chars: &mut std::str::Chars<'_>,
    first: char,
    radix: u32,
    digits: usize,
) -> Result<u8, &'static str> {
    let (mut v, rest) = match first.to_digit(radix) {
        Some(d) if radix == 8 => (d, digits - 1),
        _ => (0, digits),
    };
    for _ in 0..rest {
        let d = chars
            .next()
            .and_then(|c| c.to_digit(radix))
            .ok_or("invalid syntax")?;
        v = v * radix + d;
    }
    u8::try_from(v).map_err(|_| "invalid syntax")
}

fn hex_char(chars: &mut std::str::Chars<'_>, digits: usize) -> Result<char, &'static str> {
    let mut v = 0u32;
    for _ in 0..digits {
        let d = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or("invalid syntax")?;
        v = v * 16 + d;
    }
    char::from_u32(v).ok_or("invalid syntax")
}
