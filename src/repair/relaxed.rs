//! Relaxed JSON parser for the aggressive repair stage
//!
//! Accepts a superset of JSON: unquoted identifier keys, single-quoted
//! strings, trailing commas, and `//` / `/* */` comments. This is a plain
//! recursive-descent parser producing `serde_json::Value` - the input is
//! never evaluated as code.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Error from relaxed parsing, with the character offset of the failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("relaxed parse error at offset {offset}: {message}")]
pub struct RelaxedParseError {
    /// Character offset where parsing failed
    pub offset: usize,
    /// What went wrong
    pub message: String,
}

/// Parse relaxed JSON text into a strict JSON value
pub fn parse_relaxed(text: &str) -> Result<Value, RelaxedParseError> {
    let mut parser = Parser {
        input: text.chars().collect(),
        pos: 0,
    };
    parser.skip_trivia()?;
    let value = parser.parse_value()?;
    parser.skip_trivia()?;
    if parser.pos < parser.input.len() {
        return Err(parser.error("trailing characters after value"));
    }
    Ok(value)
}

struct Parser {
    input: Vec<char>,
    pos: usize,
}

impl Parser {
    fn error(&self, message: impl Into<String>) -> RelaxedParseError {
        RelaxedParseError {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn expect(&mut self, expected: char) -> Result<(), RelaxedParseError> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    /// Skip whitespace and `//` / `/* */` comments
    fn skip_trivia(&mut self) -> Result<(), RelaxedParseError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.pos += 1;
                }
                Some('/') => match self.input.get(self.pos + 1) {
                    Some('/') => {
                        while let Some(c) = self.peek() {
                            if c == '\n' {
                                break;
                            }
                            self.pos += 1;
                        }
                    }
                    Some('*') => {
                        self.pos += 2;
                        loop {
                            match self.peek() {
                                Some('*') if self.input.get(self.pos + 1) == Some(&'/') => {
                                    self.pos += 2;
                                    break;
                                }
                                Some(_) => self.pos += 1,
                                None => return Err(self.error("unterminated block comment")),
                            }
                        }
                    }
                    _ => break,
                },
                _ => break,
            }
        }
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Value, RelaxedParseError> {
        match self.peek() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some(q @ ('"' | '\'')) => {
                self.pos += 1;
                self.parse_string(q).map(Value::String)
            }
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                self.parse_number()
            }
            Some(c) if is_identifier_start(c) => {
                let word = self.parse_identifier();
                match word.as_str() {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" => Ok(Value::Null),
                    other => Err(self.error(format!("unexpected identifier '{other}'"))),
                }
            }
            Some(c) => Err(self.error(format!("unexpected character '{c}'"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_object(&mut self) -> Result<Value, RelaxedParseError> {
        self.expect('{')?;
        let mut map = Map::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some('}') => {
                    self.pos += 1;
                    return Ok(Value::Object(map));
                }
                None => return Err(self.error("unterminated object")),
                _ => {}
            }

            let key = self.parse_key()?;
            self.skip_trivia()?;
            self.expect(':')?;
            self.skip_trivia()?;
            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                }
                Some('}') => {}
                Some(c) => return Err(self.error(format!("expected ',' or '}}', found '{c}'"))),
                None => return Err(self.error("unterminated object")),
            }
        }
    }

    fn parse_array(&mut self) -> Result<Value, RelaxedParseError> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(']') => {
                    self.pos += 1;
                    return Ok(Value::Array(items));
                }
                None => return Err(self.error("unterminated array")),
                _ => {}
            }

            items.push(self.parse_value()?);

            self.skip_trivia()?;
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                }
                Some(']') => {}
                Some(c) => return Err(self.error(format!("expected ',' or ']', found '{c}'"))),
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn parse_key(&mut self) -> Result<String, RelaxedParseError> {
        match self.peek() {
            Some(q @ ('"' | '\'')) => {
                self.pos += 1;
                self.parse_string(q)
            }
            Some(c) if is_identifier_start(c) => Ok(self.parse_identifier()),
            Some(c) => Err(self.error(format!("invalid object key starting with '{c}'"))),
            None => Err(self.error("unterminated object")),
        }
    }

    fn parse_identifier(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if is_identifier_continue(c) {
                word.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        word
    }

    /// Parse a string body after the opening quote has been consumed.
    ///
    /// Unknown escapes resolve to the escaped character itself.
    fn parse_string(&mut self, quote: char) -> Result<String, RelaxedParseError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    None => return Err(self.error("unterminated escape sequence")),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('b') => out.push('\u{0008}'),
                    Some('f') => out.push('\u{000C}'),
                    Some('u') => out.push(self.parse_unicode_escape()?),
                    Some(other) => out.push(other),
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn parse_unicode_escape(&mut self) -> Result<char, RelaxedParseError> {
        let high = self.parse_hex4()?;
        // surrogate pair: a high surrogate must be followed by \uDC00..DFFF
        if (0xD800..=0xDBFF).contains(&high) {
            if self.peek() == Some('\\') && self.input.get(self.pos + 1) == Some(&'u') {
                self.pos += 2;
                let low = self.parse_hex4()?;
                if (0xDC00..=0xDFFF).contains(&low) {
                    let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                    return char::from_u32(combined)
                        .ok_or_else(|| self.error("invalid surrogate pair"));
                }
            }
            return Err(self.error("unpaired surrogate in unicode escape"));
        }
        char::from_u32(high).ok_or_else(|| self.error("invalid unicode escape"))
    }

    fn parse_hex4(&mut self) -> Result<u32, RelaxedParseError> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error("invalid unicode escape"))?;
            code = code * 16 + digit;
        }
        Ok(code)
    }

    fn parse_number(&mut self) -> Result<Value, RelaxedParseError> {
        let start = self.pos;
        let mut token = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                token.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }

        let unsigned = token.strip_prefix('+').unwrap_or(&token);
        if !unsigned.contains(['.', 'e', 'E'])
            && let Ok(n) = unsigned.parse::<i64>()
        {
            return Ok(Value::Number(Number::from(n)));
        }

        let parsed: f64 = unsigned.parse().map_err(|_| RelaxedParseError {
            offset: start,
            message: format!("invalid number '{token}'"),
        })?;
        Number::from_f64(parsed)
            .map(Value::Number)
            .ok_or_else(|| RelaxedParseError {
                offset: start,
                message: format!("non-finite number '{token}'"),
            })
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_strict_json() {
        let value = parse_relaxed(r#"{"a": [1, 2.5, true, null], "b": "text"}"#).unwrap();
        assert_eq!(value, json!({"a": [1, 2.5, true, null], "b": "text"}));
    }

    #[test]
    fn test_parse_unquoted_keys() {
        let value = parse_relaxed("{name: \"Alice\", age: 30}").unwrap();
        assert_eq!(value, json!({"name": "Alice", "age": 30}));
    }

    #[test]
    fn test_parse_single_quotes_with_apostrophe() {
        let value = parse_relaxed(r"{note: 'it\'s fine'}").unwrap();
        assert_eq!(value, json!({"note": "it's fine"}));
    }

    #[test]
    fn test_parse_trailing_commas() {
        let value = parse_relaxed("[1, 2, 3,]").unwrap();
        assert_eq!(value, json!([1, 2, 3]));
        let value = parse_relaxed("{a: 1,}").unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_parse_comments() {
        let value = parse_relaxed("// header\n{a: /* inline */ 1}").unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_parse_number_forms() {
        assert_eq!(parse_relaxed("+5").unwrap(), json!(5));
        assert_eq!(parse_relaxed("-0.25").unwrap(), json!(-0.25));
        assert_eq!(parse_relaxed("1e3").unwrap(), json!(1000.0));
    }

    #[test]
    fn test_parse_unicode_escape() {
        assert_eq!(parse_relaxed("\"\\u0041\"").unwrap(), json!("A"));
        // surrogate pair combines into one scalar
        assert_eq!(parse_relaxed("\"\\uD83D\\uDE00\"").unwrap(), json!("😀"));
        // unpaired high surrogate is rejected
        assert!(parse_relaxed("\"\\uD83D\"").is_err());
    }

    #[test]
    fn test_reject_bare_word() {
        let err = parse_relaxed("hello world").unwrap_err();
        assert!(err.message.contains("hello"));
    }

    #[test]
    fn test_reject_trailing_garbage() {
        assert!(parse_relaxed("{} {}").is_err());
    }

    #[test]
    fn test_reject_unterminated() {
        assert!(parse_relaxed("{a: 1").is_err());
        assert!(parse_relaxed("'open").is_err());
        assert!(parse_relaxed("/* comment").is_err());
    }
}
