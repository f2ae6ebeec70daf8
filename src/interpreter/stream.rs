use crate::error::Result;
use crate::lexer::{Lexer, Token};

/// Lazily lexed tokens kept in an arena so loop bodies can be replayed.
///
/// Tokens are pulled from the lexer only when the cursor runs past the end
/// of the arena; `rewind` moves the cursor back to a recorded position.
#[derive(Debug)]
pub struct TokenStream<'a> {
    lexer: Lexer<'a>,
    tokens: Vec<Token>,
    cursor: usize,
    exhausted: bool,
}

impl<'a> TokenStream<'a> {
    pub fn new(lexer: Lexer<'a>) -> TokenStream<'a> {
        TokenStream {
            lexer,
            tokens: vec![],
            cursor: 0,
            exhausted: false,
        }
    }

    /// Returns `Token::End` forever once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token> {
        if let Some(token) = self.tokens.get(self.cursor) {
            self.cursor += 1;
            return Ok(token.clone());
        }

        if self.exhausted {
            return Ok(Token::End);
        }

        let token = self.lexer.next_token()?;
        if token == Token::End {
            self.exhausted = true;
        } else {
            self.tokens.push(token.clone());
            self.cursor += 1;
        }

        Ok(token)
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn rewind(&mut self, position: usize) {
        debug_assert!(position <= self.tokens.len());
        self.cursor = position;
    }
}
