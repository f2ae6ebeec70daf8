use crate::extension::ExtensionError;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed declaration: expected a variable name after `&`, got `{0}`")]
    MalformedDeclaration(String),

    #[error("malformed assignment: expected a variable name after `:`, got `{0}`")]
    MalformedAssignment(String),

    #[error("malformed operand: expected a variable name after `{op}`, got `{found}`")]
    MalformedOperand { op: String, found: String },

    #[error("invalid integer literal: `{0}`")]
    InvalidIntegerLiteral(String),

    #[error("undeclared variable: `{0}`")]
    UndeclaredVariable(String),

    #[error("division by zero: `{op}{name} 0`")]
    DivideByZero { op: String, name: String },

    #[error("arithmetic overflow: `{op}{name} {operand}`")]
    ArithmeticOverflow {
        op: String,
        name: String,
        operand: i32,
    },

    #[error("missing `else`: reached end of input while looking for one")]
    MissingElse,

    #[error("malformed condition: expected a variable name after `{keyword}`, got `{found}`")]
    MalformedCondition { keyword: String, found: String },

    #[error("malformed for loop: {0}")]
    MalformedForLoop(String),

    #[error("malformed import: expected a module name after `import`, got `{0}`")]
    MalformedImport(String),

    #[error(transparent)]
    Extension(#[from] ExtensionError),

    #[error("malformed keyword at byte {offset}: `{found}`")]
    MalformedKeyword { found: String, offset: usize },

    #[error("nesting limit of {0} exceeded")]
    RecursionLimit(usize),

    #[error("iteration limit of {0} exceeded")]
    IterationLimit(u64),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot access `{}`: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedDeclaration,
    MalformedAssignment,
    MalformedOperand,
    InvalidIntegerLiteral,
    UndeclaredVariable,
    DivideByZero,
    ArithmeticOverflow,
    MissingElse,
    MalformedCondition,
    MalformedForLoop,
    MalformedImport,
    ExtensionNotFound,
    EntryPointMissing,
    ExtensionPanicked,
    MalformedKeyword,
    RecursionLimit,
    IterationLimit,
    Config,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedDeclaration(_) => ErrorKind::MalformedDeclaration,
            Error::MalformedAssignment(_) => ErrorKind::MalformedAssignment,
            Error::MalformedOperand { .. } => ErrorKind::MalformedOperand,
            Error::InvalidIntegerLiteral(_) => ErrorKind::InvalidIntegerLiteral,
            Error::UndeclaredVariable(_) => ErrorKind::UndeclaredVariable,
            Error::DivideByZero { .. } => ErrorKind::DivideByZero,
            Error::ArithmeticOverflow { .. } => ErrorKind::ArithmeticOverflow,
            Error::MissingElse => ErrorKind::MissingElse,
            Error::MalformedCondition { .. } => ErrorKind::MalformedCondition,
            Error::MalformedForLoop(_) => ErrorKind::MalformedForLoop,
            Error::MalformedImport(_) => ErrorKind::MalformedImport,
            Error::Extension(ExtensionError::NotFound { .. }) => ErrorKind::ExtensionNotFound,
            Error::Extension(ExtensionError::EntryPointMissing { .. }) => {
                ErrorKind::EntryPointMissing
            }
            Error::Extension(ExtensionError::Panicked { .. }) => ErrorKind::ExtensionPanicked,
            Error::MalformedKeyword { .. } => ErrorKind::MalformedKeyword,
            Error::RecursionLimit(_) => ErrorKind::RecursionLimit,
            Error::IterationLimit(_) => ErrorKind::IterationLimit,
            Error::Config(_) => ErrorKind::Config,
            Error::Io { .. } => ErrorKind::Io,
        }
    }

    /// Fatal errors end the whole run (including every enclosing `for`
    /// body); all others only abort the statement that raised them.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::MalformedKeyword
                | ErrorKind::RecursionLimit
                | ErrorKind::IterationLimit
                | ErrorKind::Config
                | ErrorKind::Io
        )
    }

    pub fn io<P>(path: P, source: io::Error) -> Error
    where
        P: Into<PathBuf>,
    {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub fn config<S>(msg: S) -> Error
    where
        S: Into<String>,
    {
        Error::Config(msg.into())
    }
}
