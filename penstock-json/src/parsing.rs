//! Recursive-descent JSON parsers over the token stream.
//!
//! Three entry points share one parser:
//!
//!     parse                 strict, tree only
//!     parse_with_pointers   strict, tree + JSON-Pointer offset map
//!     parse_lenient         tolerates comments and trailing commas
//!
//! Strict and lenient are separate named functions on purpose: which policy a
//! caller uses is part of its contract. The workspace scanner indexes with
//! the lenient parser (hand-edited files often carry comments); everything
//! that needs precise source ranges parses strictly.
//!
//! Scalar decoding (string unescaping including `\uXXXX` and surrogate
//! pairs, number range checks) is delegated to serde_json on the token
//! slice, so the value semantics are exactly serde_json's.

use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::lexing::{tokenize, Span};
use crate::pointer::{escape_token, PointerEntry, PointerMap};
use crate::tokens::Token;

/// Strict parse result carrying per-node source offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub tree: Value,
    pub pointers: PointerMap,
}

/// Strict parse to a value tree.
pub fn parse(source: &str) -> Result<Value, ParseError> {
    Parser::new(source, false, false)?
        .parse_document()
        .map(|(tree, _)| tree)
}

/// Strict parse to a value tree plus a pointer map for every node.
pub fn parse_with_pointers(source: &str) -> Result<ParsedDocument, ParseError> {
    Parser::new(source, false, true)?
        .parse_document()
        .map(|(tree, pointers)| ParsedDocument { tree, pointers })
}

/// Lenient parse: comments are dropped and one trailing comma per container
/// is accepted. No pointer map; lenient callers never need ranges.
pub fn parse_lenient(source: &str) -> Result<Value, ParseError> {
    Parser::new(source, true, false)?
        .parse_document()
        .map(|(tree, _)| tree)
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<(Token, Span)>,
    pos: usize,
    lenient: bool,
    pointers: Option<PointerMap>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, lenient: bool, want_pointers: bool) -> Result<Self, ParseError> {
        let mut tokens = tokenize(source)?;
        if lenient {
            tokens.retain(|(token, _)| !token.is_comment());
        } else if let Some((_, span)) = tokens.iter().find(|(token, _)| token.is_comment()) {
            return Err(ParseError::syntax("comments are not allowed", span.start));
        }
        Ok(Self {
            source,
            tokens,
            pos: 0,
            lenient,
            pointers: want_pointers.then(PointerMap::default),
        })
    }

    fn parse_document(mut self) -> Result<(Value, PointerMap), ParseError> {
        let mut pointer = String::new();
        let (value, _) = self.parse_value(&mut pointer, None)?;
        if let Some((_, span)) = self.tokens.get(self.pos) {
            return Err(ParseError::syntax(
                "trailing characters after the document root",
                span.start,
            ));
        }
        Ok((value, self.pointers.unwrap_or_default()))
    }

    fn parse_value(
        &mut self,
        pointer: &mut String,
        key: Option<Span>,
    ) -> Result<(Value, Span), ParseError> {
        let (token, span) = self.next_token()?;
        let (value, span) = match token {
            Token::Null => (Value::Null, span),
            Token::True => (Value::Bool(true), span),
            Token::False => (Value::Bool(false), span),
            Token::String | Token::Number => {
                let value = serde_json::from_str(&self.source[span.clone()])
                    .map_err(|err| ParseError::syntax(err.to_string(), span.start))?;
                (value, span)
            }
            Token::LBrace => self.parse_object(pointer, span)?,
            Token::LBracket => self.parse_array(pointer, span)?,
            other => {
                return Err(ParseError::syntax(
                    format!("expected a value, found {}", other.describe()),
                    span.start,
                ))
            }
        };
        self.record(pointer, key, &span);
        Ok((value, span))
    }

    fn parse_object(
        &mut self,
        pointer: &mut String,
        open: Span,
    ) -> Result<(Value, Span), ParseError> {
        let mut members = Map::new();
        if let Some(close) = self.eat(&Token::RBrace) {
            return Ok((Value::Object(members), open.start..close.end));
        }
        loop {
            let (token, key_span) = self.next_token()?;
            if token != Token::String {
                return Err(ParseError::syntax(
                    format!("expected a string key, found {}", token.describe()),
                    key_span.start,
                ));
            }
            let key: String = serde_json::from_str(&self.source[key_span.clone()])
                .map_err(|err| ParseError::syntax(err.to_string(), key_span.start))?;
            self.expect(&Token::Colon, "expected ':' after object key")?;

            let base = pointer.len();
            pointer.push('/');
            pointer.push_str(&escape_token(&key));
            let (value, _) = self.parse_value(pointer, Some(key_span))?;
            pointer.truncate(base);

            // Duplicate keys: last occurrence wins, in tree and pointer map.
            members.insert(key, value);

            let (token, span) = self.next_token()?;
            match token {
                Token::Comma => {
                    if let Some(close) = self.eat(&Token::RBrace) {
                        if self.lenient {
                            return Ok((Value::Object(members), open.start..close.end));
                        }
                        return Err(ParseError::syntax("trailing comma in object", span.start));
                    }
                }
                Token::RBrace => return Ok((Value::Object(members), open.start..span.end)),
                other => {
                    return Err(ParseError::syntax(
                        format!("expected ',' or '}}' in object, found {}", other.describe()),
                        span.start,
                    ))
                }
            }
        }
    }

    fn parse_array(
        &mut self,
        pointer: &mut String,
        open: Span,
    ) -> Result<(Value, Span), ParseError> {
        let mut elements = Vec::new();
        if let Some(close) = self.eat(&Token::RBracket) {
            return Ok((Value::Array(elements), open.start..close.end));
        }
        loop {
            let base = pointer.len();
            pointer.push('/');
            pointer.push_str(&elements.len().to_string());
            let (value, _) = self.parse_value(pointer, None)?;
            pointer.truncate(base);
            elements.push(value);

            let (token, span) = self.next_token()?;
            match token {
                Token::Comma => {
                    if let Some(close) = self.eat(&Token::RBracket) {
                        if self.lenient {
                            return Ok((Value::Array(elements), open.start..close.end));
                        }
                        return Err(ParseError::syntax("trailing comma in array", span.start));
                    }
                }
                Token::RBracket => return Ok((Value::Array(elements), open.start..span.end)),
                other => {
                    return Err(ParseError::syntax(
                        format!("expected ',' or ']' in array, found {}", other.describe()),
                        span.start,
                    ))
                }
            }
        }
    }

    fn next_token(&mut self) -> Result<(Token, Span), ParseError> {
        let entry = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(ParseError::UnexpectedEnd {
                offset: self.source.len(),
            })?;
        self.pos += 1;
        Ok(entry)
    }

    fn eat(&mut self, expected: &Token) -> Option<Span> {
        match self.tokens.get(self.pos) {
            Some((token, span)) if token == expected => {
                let span = span.clone();
                self.pos += 1;
                Some(span)
            }
            _ => None,
        }
    }

    fn expect(&mut self, expected: &Token, message: &str) -> Result<Span, ParseError> {
        match self.next_token()? {
            (token, span) if token == *expected => Ok(span),
            (_, span) => Err(ParseError::syntax(message, span.start)),
        }
    }

    fn record(&mut self, pointer: &str, key: Option<Span>, value: &Span) {
        if let Some(map) = self.pointers.as_mut() {
            map.insert(
                pointer.to_string(),
                PointerEntry {
                    key,
                    value: value.clone(),
                },
            );
        }
    }
}
