mod compiler;

pub use compiler::{Compiler, Report, DEFAULT_DESTINATION, DEFAULT_SOURCE};
