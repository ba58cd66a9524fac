//! Token definitions for the JSON lexer.
//!
//! Tokens are defined with the logos derive macro. Whitespace is skipped at
//! the lexer level; comments are NOT — they are real tokens, and whether they
//! are accepted is a parser decision. The strict parser rejects them, the
//! lenient parser drops them. Keeping that choice out of the lexer makes the
//! tolerance policy visible and testable on its own.

use logos::Logos;

/// All tokens the JSON lexer can produce.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,

    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    /// A string literal including its quotes. Escape sequences are matched
    /// but not validated here; decoding happens in the parser.
    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    /// A number literal covering the full JSON number grammar.
    #[regex(r"-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    // Comment forms tolerated by the lenient parser only.
    #[regex(r"//[^\n]*")]
    LineComment,
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,
}

impl Token {
    /// Check if this token is a comment form.
    pub fn is_comment(&self) -> bool {
        matches!(self, Token::LineComment | Token::BlockComment)
    }

    /// Short human-readable description used in parse error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Token::LBrace => "'{'",
            Token::RBrace => "'}'",
            Token::LBracket => "'['",
            Token::RBracket => "']'",
            Token::Colon => "':'",
            Token::Comma => "','",
            Token::True => "'true'",
            Token::False => "'false'",
            Token::Null => "'null'",
            Token::String => "a string",
            Token::Number => "a number",
            Token::LineComment | Token::BlockComment => "a comment",
        }
    }
}
