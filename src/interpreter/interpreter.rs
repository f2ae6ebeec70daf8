use crate::config::Config;
use crate::error::{Error, Result};
use crate::extension::ExtensionLoader;
use crate::interpreter::environment::{ArithOp, Environment};
use crate::interpreter::output::Output;
use crate::interpreter::stream::TokenStream;
use crate::lexer::{Lexer, Token};

use std::str;

use tracing::{debug, error, info};

/// State owned by the caller of one interpretation run.
#[derive(Debug, Default)]
pub struct Context {
    pub env: Environment,
    pub output: Output,
    /// Statement-local errors, in the order they were reported.
    pub diagnostics: Vec<Error>,
}

impl Context {
    pub fn new() -> Context {
        Context::default()
    }
}

/// Interprets `source`, appending to `context.output` as it goes.
///
/// Statement-local errors are reported and collected in
/// `context.diagnostics`; the first fatal error ends the run and is returned.
/// Whatever was emitted before that stays in the output.
pub fn interpret<S, L>(
    source: &S,
    config: &Config,
    context: &mut Context,
    loader: &mut L,
) -> Result<()>
where
    S: AsRef<[u8]> + ?Sized,
    L: ExtensionLoader + ?Sized,
{
    let lexer = Lexer::with_policy(source, config.keywords);

    let mut run = Run {
        stream: TokenStream::new(lexer),
        config,
        context,
        loader,
        depth: 0,
        iterations: 0,
        started: false,
    };

    run.run_block()
}

/*
   Bodies have no terminator: the body of `if`, `elseif` and `for` is the
   whole rest of the token stream.

   `if x` with x != 0 therefore just carries on with the next token, and with
   x == 0 skips past the next `else`. `for` records where its body starts,
   rewinds to it for every iteration and runs it to the end of the stream, so
   only nested `for`s recurse.
*/
struct Run<'a, 'c, L: ?Sized> {
    stream: TokenStream<'a>,
    config: &'c Config,
    context: &'c mut Context,
    loader: &'c mut L,
    depth: usize,
    iterations: u64,
    started: bool,
}

impl<'a, 'c, L> Run<'a, 'c, L>
where
    L: ExtensionLoader + ?Sized,
{
    fn run_block(&mut self) -> Result<()> {
        loop {
            let token = self.stream.next_token()?;

            if !self.started && token != Token::End {
                info!("welcome to the taebaek compiler!");
                self.started = true;
            }

            #[rustfmt::skip]
            let result = match token {
                Token::End        => return Ok(()),
                Token::Text(text) => {
                    self.context.output.append(&text);
                    Ok(())
                }
                Token::VarDecl    => self.declaration(),
                Token::VarAssign  => self.assignment(),
                Token::Add        => self.arithmetic(ArithOp::Add),
                Token::Sub        => self.arithmetic(ArithOp::Sub),
                Token::Mul        => self.arithmetic(ArithOp::Mul),
                Token::Div        => self.arithmetic(ArithOp::Div),
                Token::Mod        => self.arithmetic(ArithOp::Mod),
                Token::If         => self.conditional(Token::If),
                Token::ElseIf     => self.conditional(Token::ElseIf),
                Token::Else       => self.skip_to_else(),
                Token::For        => self.for_loop(),
                Token::Import     => self.import(),
            };

            if let Err(err) = result {
                if err.is_fatal() {
                    return Err(err);
                }
                self.report(err);
            }
        }
    }

    fn report(&mut self, err: Error) {
        error!("{}", err);
        self.context.diagnostics.push(err);
    }

    fn expect_text<F>(&mut self, malformed: F) -> Result<Vec<u8>>
    where
        F: FnOnce(Token) -> Error,
    {
        match self.stream.next_token()? {
            Token::Text(text) => Ok(text),
            other => Err(malformed(other)),
        }
    }

    fn expect_integer<F>(&mut self, malformed: F) -> Result<i32>
    where
        F: Fn(String) -> Error,
    {
        let literal = self.expect_text(|token| malformed(token.to_string()))?;

        str::from_utf8(&literal)
            .ok()
            .and_then(|literal| literal.parse().ok())
            .ok_or_else(|| malformed(String::from_utf8_lossy(&literal).into_owned()))
    }

    // <&><name>
    fn declaration(&mut self) -> Result<()> {
        let name = self.expect_text(|found| Error::MalformedDeclaration(found.to_string()))?;

        debug!("declared `{}`", String::from_utf8_lossy(&name));
        self.context.env.declare(name);

        Ok(())
    }

    // <:><name><integer>
    fn assignment(&mut self) -> Result<()> {
        let name = self.expect_text(|found| Error::MalformedAssignment(found.to_string()))?;
        let value = self.expect_integer(Error::InvalidIntegerLiteral)?;

        self.context.env.assign(&name, value)
    }

    // <op><name><integer>
    fn arithmetic(&mut self, op: ArithOp) -> Result<()> {
        let name = self.expect_text(|found| Error::MalformedOperand {
            op: op.to_string(),
            found: found.to_string(),
        })?;
        let operand = self.expect_integer(Error::InvalidIntegerLiteral)?;

        self.context.env.arithmetic(op, &name, operand)?;

        Ok(())
    }

    // <if|elseif><name>
    fn conditional(&mut self, keyword: Token) -> Result<()> {
        let name = self.expect_text(|found| Error::MalformedCondition {
            keyword: keyword.to_string(),
            found: found.to_string(),
        })?;

        if self.context.env.lookup(&name)? != 0 {
            Ok(())
        } else {
            self.skip_to_else()
        }
    }

    fn skip_to_else(&mut self) -> Result<()> {
        loop {
            match self.stream.next_token()? {
                Token::Else => return Ok(()),
                Token::End => return Err(Error::MissingElse),
                _ => {}
            }
        }
    }

    // <for><name><:><integer><integer>
    fn for_loop(&mut self) -> Result<()> {
        let name = self.expect_text(|found| {
            Error::MalformedForLoop(format!("expected a loop variable, got `{}`", found))
        })?;

        match self.stream.next_token()? {
            Token::VarAssign => {}
            found => {
                return Err(Error::MalformedForLoop(format!(
                    "expected `:` after `{}`, got `{}`",
                    String::from_utf8_lossy(&name),
                    found
                )))
            }
        }

        let start = self.loop_bound("start")?;
        let end = self.loop_bound("end")?;

        // checked after the whole header is consumed, not right after the name
        self.context.env.lookup(&name)?;

        if start > end {
            debug!("empty range {}..={}, no iterations", start, end);
            return Ok(());
        }

        if self.depth >= self.config.max_depth {
            return Err(Error::RecursionLimit(self.config.max_depth));
        }

        let body = self.stream.position();

        self.depth += 1;
        let result = self.repeat(&name, start, end, body);
        self.depth -= 1;

        result
    }

    fn loop_bound(&mut self, which: &str) -> Result<i32> {
        self.expect_integer(|found| {
            Error::MalformedForLoop(format!(
                "expected an integer {} bound, got `{}`",
                which, found
            ))
        })
    }

    fn repeat(&mut self, name: &[u8], start: i32, end: i32, body: usize) -> Result<()> {
        for i in start..=end {
            self.iterations += 1;
            if self.iterations > self.config.max_iterations {
                return Err(Error::IterationLimit(self.config.max_iterations));
            }

            self.stream.rewind(body);
            self.context.env.assign(name, i)?;
            self.run_block()?;
        }

        Ok(())
    }

    // <import><name>
    fn import(&mut self) -> Result<()> {
        let name = self.expect_text(|found| Error::MalformedImport(found.to_string()))?;
        let name = str::from_utf8(&name)
            .map_err(|_| Error::MalformedImport(String::from_utf8_lossy(&name).into_owned()))?;

        self.loader.load(name)?;
        info!("imported `{}`", name);

        Ok(())
    }
}
