use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    End,

    // Literal text, raw bytes of the source
    Text(Vec<u8>),

    // Operators
    VarDecl,
    VarAssign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Keywords
    If,
    Else,
    ElseIf,
    For,
    Import,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[rustfmt::skip]
        let pretty = match self {
            Token::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Token::End       => "end of input".to_string(),
            Token::VarDecl   => "&".to_string(),
            Token::VarAssign => ":".to_string(),
            Token::Add       => "+".to_string(),
            Token::Sub       => "-".to_string(),
            Token::Mul       => "*".to_string(),
            Token::Div       => "/".to_string(),
            Token::Mod       => "%".to_string(),
            Token::If        => "if".to_string(),
            Token::Else      => "else".to_string(),
            Token::ElseIf    => "elseif".to_string(),
            Token::For       => "for".to_string(),
            Token::Import    => "import".to_string(),
        };

        write!(f, "{}", pretty)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Keyword {
    If,
    Else,
    ElseIf,
    For,
    Import,
}

impl Keyword {
    /// Longest spelling first, so the first prefix match is the maximal munch.
    pub(crate) const ALL: [Keyword; 5] = [
        Keyword::ElseIf,
        Keyword::Import,
        Keyword::Else,
        Keyword::For,
        Keyword::If,
    ];

    pub(crate) fn spelling(self) -> &'static [u8] {
        match self {
            Keyword::If => b"if",
            Keyword::Else => b"else",
            Keyword::ElseIf => b"elseif",
            Keyword::For => b"for",
            Keyword::Import => b"import",
        }
    }

    pub(crate) fn token(self) -> Token {
        match self {
            Keyword::If => Token::If,
            Keyword::Else => Token::Else,
            Keyword::ElseIf => Token::ElseIf,
            Keyword::For => Token::For,
            Keyword::Import => Token::Import,
        }
    }

    pub(crate) fn is_leading(byte: u8) -> bool {
        Keyword::ALL
            .iter()
            .any(|keyword| keyword.spelling().first() == Some(&byte))
    }
}
