pub mod cli;
pub mod compiler;
pub mod config;
pub mod error;
pub mod extension;
pub mod interpreter;
pub mod lexer;
pub mod logging;
