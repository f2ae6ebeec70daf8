mod environment;
mod interpreter;
mod output;
mod stream;

pub use environment::{ArithOp, Environment};
pub use interpreter::{interpret, Context};
pub use output::Output;
pub use stream::TokenStream;
