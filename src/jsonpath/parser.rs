//! Path expression parser.

use super::ast::{JsonPath, PathStep};
use super::error::{ParseError, ParseErrorKind};

/// Recursive-descent parser for path expression strings.
///
/// Grammar:
///
/// ```text
/// path        := "$" step*
/// step        := dotStep | bracketStep
/// dotStep     := "." identifier arraySub?
/// bracketStep := "[" quotedString "]" arraySub?
/// arraySub    := "[" (integer | "*") "]"
/// ```
///
/// `$.a.b` and `$['a']['b']` compile to identical steps.
pub struct Parser {
    input: String,
    position: usize,
}

impl Parser {
    fn new(expression: &str) -> Self {
        Self {
            input: expression.trim().to_string(),
            position: 0,
        }
    }

    /// Parses an expression string into a [`JsonPath`].
    pub fn parse(expression: &str) -> Result<JsonPath, ParseError> {
        let mut parser = Parser::new(expression);
        parser
            .parse_path()
            .map_err(|kind| ParseError::new(expression, kind))
    }

    fn parse_path(&mut self) -> Result<JsonPath, ParseErrorKind> {
        if self.peek() != Some('$') {
            return Err(ParseErrorKind::InvalidSyntax {
                message: "path expression must start with '$'".to_string(),
            });
        }
        self.next();

        let mut steps = Vec::new();
        loop {
            match self.peek() {
                Some('.') => {
                    self.next();
                    let name = self.parse_identifier()?;
                    steps.push(PathStep::Field(name));
                    self.parse_array_sub(&mut steps)?;
                }
                Some('[') => {
                    let name = self.parse_bracket_string()?;
                    steps.push(PathStep::Field(name));
                    self.parse_array_sub(&mut steps)?;
                }
                Some(ch) => {
                    return Err(ParseErrorKind::UnexpectedToken {
                        position: self.position,
                        found: ch.to_string(),
                        expected: "'.' or '['".to_string(),
                    });
                }
                None => break,
            }
        }

        Ok(JsonPath::new(steps))
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.next();
            } else {
                break;
            }
        }
    }

    /// Expects a specific character and advances, or returns an error.
    fn expect(&mut self, expected: char) -> Result<(), ParseErrorKind> {
        let position = self.position;
        match self.next() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(ParseErrorKind::UnexpectedToken {
                position,
                found: ch.to_string(),
                expected: format!("'{}'", expected),
            }),
            None => Err(ParseErrorKind::UnexpectedEnd {
                expected: format!("'{}'", expected),
            }),
        }
    }

    /// Parses a field name after a dot.
    fn parse_identifier(&mut self) -> Result<String, ParseErrorKind> {
        let mut name = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' || ch == '-' {
                name.push(ch);
                self.next();
            } else {
                break;
            }
        }
        if name.is_empty() {
            Err(ParseErrorKind::InvalidSyntax {
                message: "expected field name after '.'".to_string(),
            })
        } else {
            Ok(name)
        }
    }

    /// Parses a bracketed field name: `['key']` or `["key"]`. The quotes
    /// are stripped verbatim, no escape processing.
    fn parse_bracket_string(&mut self) -> Result<String, ParseErrorKind> {
        self.expect('[')?;
        self.skip_whitespace();

        let quote = match self.peek() {
            Some(q @ ('\'' | '"')) => {
                self.next();
                q
            }
            Some(ch) => {
                return Err(ParseErrorKind::UnexpectedToken {
                    position: self.position,
                    found: ch.to_string(),
                    expected: "quoted field name".to_string(),
                });
            }
            None => {
                return Err(ParseErrorKind::UnexpectedEnd {
                    expected: "quoted field name".to_string(),
                });
            }
        };

        let mut name = String::new();
        loop {
            match self.next() {
                Some(ch) if ch == quote => break,
                Some(ch) => name.push(ch),
                None => {
                    return Err(ParseErrorKind::UnexpectedEnd {
                        expected: format!("closing quote '{}'", quote),
                    });
                }
            }
        }

        self.skip_whitespace();
        self.expect(']')?;
        Ok(name)
    }

    /// Parses an optional array subscript after a field step: `[n]` or
    /// `[*]`. A bracket opening a quoted string belongs to the next field
    /// step instead, so the bracket content decides with one lookahead.
    fn parse_array_sub(&mut self, steps: &mut Vec<PathStep>) -> Result<(), ParseErrorKind> {
        if self.peek() != Some('[') {
            return Ok(());
        }

        let saved = self.position;
        self.next();
        self.skip_whitespace();
        if matches!(self.peek(), Some('\'') | Some('"')) {
            self.position = saved;
            return Ok(());
        }

        match self.peek() {
            Some('*') => {
                self.next();
                steps.push(PathStep::Wildcard);
            }
            Some('0'..='9') => {
                let index = self.parse_index()?;
                steps.push(PathStep::Index(index));
            }
            Some(ch) => {
                return Err(ParseErrorKind::UnexpectedToken {
                    position: self.position,
                    found: ch.to_string(),
                    expected: "array index or '*'".to_string(),
                });
            }
            None => {
                return Err(ParseErrorKind::UnexpectedEnd {
                    expected: "array index or '*'".to_string(),
                });
            }
        }

        self.skip_whitespace();
        self.expect(']')?;
        Ok(())
    }

    /// Parses a non-negative array index.
    fn parse_index(&mut self) -> Result<usize, ParseErrorKind> {
        let mut digits = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.next();
            } else {
                break;
            }
        }
        digits
            .parse::<usize>()
            .map_err(|_| ParseErrorKind::InvalidSyntax {
                message: format!("invalid array index: {}", digits),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root_only() {
        let path = Parser::parse("$").unwrap();
        assert!(path.steps.is_empty());
    }

    #[test]
    fn test_parse_dot_field() {
        let path = Parser::parse("$.store").unwrap();
        assert_eq!(path.steps, vec![PathStep::Field("store".to_string())]);
    }

    #[test]
    fn test_parse_nested_fields() {
        let path = Parser::parse("$.store.book").unwrap();
        assert_eq!(
            path.steps,
            vec![
                PathStep::Field("store".to_string()),
                PathStep::Field("book".to_string()),
            ]
        );
    }

    #[test]
    fn test_dot_and_bracket_forms_compile_identically() {
        let dotted = Parser::parse("$.a.b").unwrap();
        let bracketed = Parser::parse("$['a']['b']").unwrap();
        assert_eq!(dotted, bracketed);

        let dotted = Parser::parse("$.a[0]").unwrap();
        let bracketed = Parser::parse("$['a'][0]").unwrap();
        assert_eq!(dotted, bracketed);
    }

    #[test]
    fn test_parse_double_quoted_field() {
        let path = Parser::parse("$[\"a\"]").unwrap();
        assert_eq!(path.steps, vec![PathStep::Field("a".to_string())]);
    }

    #[test]
    fn test_parse_array_index() {
        let path = Parser::parse("$.items[2]").unwrap();
        assert_eq!(
            path.steps,
            vec![PathStep::Field("items".to_string()), PathStep::Index(2)]
        );
    }

    #[test]
    fn test_parse_wildcard() {
        let path = Parser::parse("$.items[*]").unwrap();
        assert_eq!(
            path.steps,
            vec![PathStep::Field("items".to_string()), PathStep::Wildcard]
        );
    }

    #[test]
    fn test_parse_subscript_then_field() {
        let path = Parser::parse("$.items[*].name").unwrap();
        assert_eq!(
            path.steps,
            vec![
                PathStep::Field("items".to_string()),
                PathStep::Wildcard,
                PathStep::Field("name".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_bracket_chain_with_subscript() {
        let path = Parser::parse("$['struct']['struct_array'][2]['string_element']").unwrap();
        assert_eq!(
            path.steps,
            vec![
                PathStep::Field("struct".to_string()),
                PathStep::Field("struct_array".to_string()),
                PathStep::Index(2),
                PathStep::Field("string_element".to_string()),
            ]
        );
    }

    #[test]
    fn test_quotes_stripped_without_escape_processing() {
        let path = Parser::parse("$['a\\b']").unwrap();
        assert_eq!(path.steps, vec![PathStep::Field("a\\b".to_string())]);
    }

    #[test]
    fn test_parse_empty_fails() {
        assert!(Parser::parse("").is_err());
    }

    #[test]
    fn test_parse_missing_root_fails() {
        assert!(Parser::parse("store.book").is_err());
        assert!(Parser::parse("foo.foo.foo").is_err());
    }

    #[test]
    fn test_parse_garbage_after_root_fails() {
        let err = Parser::parse("$foo").unwrap_err();
        assert_eq!(err.expression, "$foo");
        assert!(matches!(
            err.kind,
            ParseErrorKind::UnexpectedToken { position: 1, .. }
        ));
    }

    #[test]
    fn test_parse_negative_index_fails() {
        assert!(Parser::parse("$.items[-1]").is_err());
    }

    #[test]
    fn test_parse_unterminated_quote_fails() {
        let err = Parser::parse("$['a").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedEnd { .. }));
    }

    #[test]
    fn test_parse_unbalanced_bracket_fails() {
        assert!(Parser::parse("$.items[0").is_err());
        assert!(Parser::parse("$['a'").is_err());
    }

    #[test]
    fn test_parse_trailing_dot_fails() {
        assert!(Parser::parse("$.").is_err());
    }

    #[test]
    fn test_parse_unquoted_bracket_name_fails() {
        assert!(Parser::parse("$[store]").is_err());
    }
}
