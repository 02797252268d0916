pub mod automata;
pub mod ltl;
pub mod utils;

pub use automata::{Automaton, Options, Representation};

use ltl::Node;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Parse(ltl::parse::Error),
    Formula(ltl::Error),
    Build(automata::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "{e}"),
            Error::Formula(e) => write!(f, "{e}"),
            Error::Build(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(e) => Some(e),
            Error::Formula(e) => Some(e),
            Error::Build(e) => Some(e),
        }
    }
}

impl From<ltl::parse::Error> for Error {
    fn from(e: ltl::parse::Error) -> Self {
        Error::Parse(e)
    }
}

impl From<ltl::Error> for Error {
    fn from(e: ltl::Error) -> Self {
        Error::Formula(e)
    }
}

impl From<automata::Error> for Error {
    fn from(e: automata::Error) -> Self {
        Error::Build(e)
    }
}

/// Parses a prefix-notation formula and builds its generalized Büchi
/// automaton.
pub fn translate(input: &str) -> Result<Automaton, Error> {
    translate_with_options(input, Options::default())
}

pub fn translate_with_options(input: &str, options: Options) -> Result<Automaton, Error> {
    let root: Node = ltl::parse::parse(input)?;
    Ok(Automaton::with_options(root, options)?)
}
