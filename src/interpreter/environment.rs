use crate::error::{Error, Result};

use std::collections::HashMap;
use std::fmt;

use itertools::Itertools;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl ArithOp {
    /// `None` on overflow or on a zero divisor.
    fn apply(self, lhs: i32, rhs: i32) -> Option<i32> {
        match self {
            ArithOp::Add => lhs.checked_add(rhs),
            ArithOp::Sub => lhs.checked_sub(rhs),
            ArithOp::Mul => lhs.checked_mul(rhs),
            ArithOp::Div => lhs.checked_div(rhs),
            ArithOp::Mod => lhs.checked_rem(rhs),
        }
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[rustfmt::skip]
        let symbol = match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Mod => "%",
        };

        write!(f, "{}", symbol)
    }
}

/// Variable names are raw source bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    map: HashMap<Vec<u8>, i32>,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let map = self
            .iter()
            .sorted()
            .map(|(name, value)| format!("{} -> {}", String::from_utf8_lossy(name), value))
            .join(", ");

        write!(f, "{{ {} }}", map)
    }
}

fn undeclared(name: &[u8]) -> Error {
    Error::UndeclaredVariable(String::from_utf8_lossy(name).into_owned())
}

impl Environment {
    pub fn empty() -> Environment {
        Environment {
            map: HashMap::new(),
        }
    }

    /// Declares `name`, resetting it to 0 if it already exists.
    pub fn declare(&mut self, name: impl AsRef<[u8]>) {
        self.map.insert(name.as_ref().to_vec(), 0);
    }

    pub fn get(&self, name: impl AsRef<[u8]>) -> Option<i32> {
        self.map.get(name.as_ref()).copied()
    }

    pub fn lookup(&self, name: impl AsRef<[u8]>) -> Result<i32> {
        let name = name.as_ref();

        self.get(name).ok_or_else(|| undeclared(name))
    }

    pub fn assign(&mut self, name: impl AsRef<[u8]>, value: i32) -> Result<()> {
        let name = name.as_ref();

        match self.map.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(undeclared(name)),
        }
    }

    /// Applies `op` to `name` in place. On error the variable keeps its value.
    pub fn arithmetic(&mut self, op: ArithOp, name: impl AsRef<[u8]>, operand: i32) -> Result<i32> {
        let name = name.as_ref();
        let current = self.lookup(name)?;

        let value = match op.apply(current, operand) {
            Some(value) => value,
            None if operand == 0 && matches!(op, ArithOp::Div | ArithOp::Mod) => {
                return Err(Error::DivideByZero {
                    op: op.to_string(),
                    name: String::from_utf8_lossy(name).into_owned(),
                })
            }
            None => {
                return Err(Error::ArithmeticOverflow {
                    op: op.to_string(),
                    name: String::from_utf8_lossy(name).into_owned(),
                    operand,
                })
            }
        };

        self.assign(name, value)?;

        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], i32)> + '_ {
        self.map.iter().map(|(name, value)| (name.as_slice(), *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::ErrorKind;

    use test_case::test_case;

    fn with(name: &str, value: i32) -> Environment {
        let mut env = Environment::empty();
        env.declare(name);
        env.assign(name, value).unwrap();
        env
    }

    #[test_case(ArithOp::Add,  7,  3,  10 ; "add"           )]
    #[test_case(ArithOp::Sub,  7,  3,   4 ; "sub"           )]
    #[test_case(ArithOp::Mul,  7,  3,  21 ; "mul"           )]
    #[test_case(ArithOp::Div,  7,  3,   2 ; "div"           )]
    #[test_case(ArithOp::Div, -7,  3,  -2 ; "div truncates" )]
    #[test_case(ArithOp::Mod,  7,  3,   1 ; "remainder"     )]
    #[test_case(ArithOp::Mod, -7,  3,  -1 ; "remainder truncates")]
    fn arithmetic(op: ArithOp, start: i32, operand: i32, expected: i32) {
        let mut env = with("x", start);

        assert_eq!(env.arithmetic(op, "x", operand).unwrap(), expected);
        assert_eq!(env.get("x"), Some(expected));
    }

    #[test_case(ArithOp::Div ; "division")]
    #[test_case(ArithOp::Mod ; "remainder")]
    fn divide_by_zero_leaves_the_variable(op: ArithOp) {
        let mut env = with("x", 9);
        let error = env.arithmetic(op, "x", 0).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::DivideByZero);
        assert_eq!(env.get("x"), Some(9));
    }

    #[test]
    fn overflow_leaves_the_variable() {
        let mut env = with("x", i32::MAX);
        let error = env.arithmetic(ArithOp::Add, "x", 1).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::ArithmeticOverflow);
        assert_eq!(env.get("x"), Some(i32::MAX));

        let mut env = with("x", i32::MIN);
        let error = env.arithmetic(ArithOp::Div, "x", -1).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ArithmeticOverflow);
    }

    #[test]
    fn undeclared() {
        let mut env = Environment::empty();

        let error = env.arithmetic(ArithOp::Add, "x", 1).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UndeclaredVariable);

        let error = env.assign("x", 1).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UndeclaredVariable);

        assert!(env.is_empty());
    }

    #[test]
    fn redeclaring_resets_to_zero() {
        let mut env = with("x", 42);
        env.declare("x");

        assert_eq!(env.get("x"), Some(0));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn display_is_sorted() {
        let mut env = with("b", 2);
        env.declare("a");

        assert_eq!(env.to_string(), "{ a -> 0, b -> 2 }");
    }

    #[test]
    fn names_are_raw_bytes() {
        let mut env = Environment::empty();
        env.declare(&b"n\xe9"[..]);
        env.assign(&b"n\xe9"[..], 5).unwrap();

        assert_eq!(env.get(&b"n\xe9"[..]), Some(5));
        assert_eq!(env.get("n\u{e9}"), None);
        assert_eq!(env.to_string(), "{ n\u{fffd} -> 5 }");
    }
}
