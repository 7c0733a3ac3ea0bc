//! Built-in formula functions and their arities.

use std::fmt;

use crate::error::FormulaError;

/// Allowed argument count of a function call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (qualifier, n) = match self {
            Arity::Exactly(n) => ("exactly", *n),
            Arity::AtLeast(n) => ("at least", *n),
        };
        let noun = if n == 1 { "argument" } else { "arguments" };
        write!(f, "{} {} {}", qualifier, n, noun)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    /// Greater of exactly two arguments
    Max,
    /// Lesser of exactly two arguments
    Min,
    /// Greatest of one or more arguments
    MMax,
    /// Least of one or more arguments
    MMin,
}

impl Function {
    pub fn from_name(name: &str) -> Option<Function> {
        match name {
            "max" => Some(Function::Max),
            "min" => Some(Function::Min),
            "mmax" => Some(Function::MMax),
            "mmin" => Some(Function::MMin),
            _ => None,
        }
    }

    /// Like [`Function::from_name`], failing with `UnknownFunction`.
    pub fn lookup(name: &str, position: usize) -> Result<Function, FormulaError> {
        Function::from_name(name).ok_or_else(|| FormulaError::UnknownFunction {
            name: name.to_string(),
            position,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Max => "max",
            Function::Min => "min",
            Function::MMax => "mmax",
            Function::MMin => "mmin",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Function::Max | Function::Min => Arity::Exactly(2),
            Function::MMax | Function::MMin => Arity::AtLeast(1),
        }
    }

    pub fn check_arity(self, got: usize, position: usize) -> Result<(), FormulaError> {
        let arity = self.arity();
        if arity.accepts(got) {
            Ok(())
        } else {
            Err(FormulaError::Arity {
                function: self.name().to_string(),
                arity,
                got,
                position,
            })
        }
    }
}
