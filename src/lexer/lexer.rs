use crate::config::KeywordPolicy;
use crate::error::{Error, Result};
use crate::lexer::token::{Keyword, Token};

use std::iter::Iterator;

/// Lexes raw source bytes. The source has no declared encoding, so only
/// ASCII is given meaning and every other byte is literal text.
#[derive(Debug)]
pub struct Lexer<'a> {
    input: &'a [u8],
    current: usize,
    policy: KeywordPolicy,
}

fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b'\x0B' | b'\x0C')
}

impl<'a> Lexer<'a> {
    pub fn new<S>(input: &'a S) -> Lexer<'a>
    where
        S: AsRef<[u8]> + ?Sized,
    {
        Lexer::with_policy(input, KeywordPolicy::default())
    }

    pub fn with_policy<S>(input: &'a S, policy: KeywordPolicy) -> Lexer<'a>
    where
        S: AsRef<[u8]> + ?Sized,
    {
        Lexer {
            input: input.as_ref(),
            current: 0,
            policy,
        }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.get(self.current).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek_byte().map_or(false, is_space) {
            self.current += 1;
        }
    }

    fn match_keyword(&self) -> Option<Keyword> {
        let rest = &self.input[self.current..];

        Keyword::ALL
            .iter()
            .copied()
            .find(|keyword| rest.starts_with(keyword.spelling()))
    }

    // one arbitrary byte followed by any run of ascii alphanumerics
    fn read_text(&mut self) -> &'a [u8] {
        let position = self.current;

        self.current += 1;
        while self
            .peek_byte()
            .map_or(false, |byte| byte.is_ascii_alphanumeric())
        {
            self.current += 1;
        }

        &self.input[position..self.current]
    }

    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();

        let byte = match self.peek_byte() {
            Some(byte) => byte,
            None => return Ok(Token::End),
        };

        let token = match byte {
            b'&' => Token::VarDecl,
            b':' => Token::VarAssign,
            b'+' => Token::Add,
            b'-' => Token::Sub,
            b'*' => Token::Mul,
            b'/' => Token::Div,
            b'%' => Token::Mod,
            _ => {
                if let Some(keyword) = self.match_keyword() {
                    self.current += keyword.spelling().len();
                    return Ok(keyword.token());
                }

                if self.policy == KeywordPolicy::Strict && Keyword::is_leading(byte) {
                    let offset = self.current;
                    return Err(Error::MalformedKeyword {
                        found: String::from_utf8_lossy(self.read_text()).into_owned(),
                        offset,
                    });
                }

                return Ok(Token::Text(self.read_text().to_vec()));
            }
        };

        self.current += 1;

        Ok(token)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(Token::End) => None,
            item => Some(item),
        }
    }
}
