//! Tokenization entry point.
//!
//! Raw tokenization with the logos lexer, returning tokens paired with their
//! byte spans. Unlike a forgiving lexer, an unrecognized character is an
//! error here: everything downstream assumes the token stream covers real
//! JSON input, and silently dropping bad input would let the parsers build a
//! tree that does not correspond to the source text.

use logos::Logos;

use crate::error::ParseError;
use crate::tokens::Token;

/// Byte span of a token within the source text.
pub type Span = std::ops::Range<usize>;

/// Tokenize source text with location information.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>, ParseError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                return Err(ParseError::Lex {
                    offset: lexer.span().start,
                })
            }
        }
    }

    Ok(tokens)
}
