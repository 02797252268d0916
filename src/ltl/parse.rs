use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0, u32 as uint},
    combinator::{all_consuming, map, map_res},
    sequence::{preceded, terminated},
    IResult, Parser,
};
use std::fmt;

use super::{Node, LTL};

/// Failure to read a textual formula; carries the unconsumed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub remaining: String,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.remaining.is_empty() {
            write!(f, "unexpected end of input while parsing formula")
        } else {
            write!(f, "cannot parse formula at `{}`", self.remaining)
        }
    }
}

impl std::error::Error for Error {}

fn one(input: &str) -> IResult<&str, Node> {
    map(tag("true"), |_| LTL::one()).parse(input)
}

fn atom(input: &str) -> IResult<&str, Node> {
    map(preceded(char('p'), uint), LTL::atom).parse(input)
}

fn negation(input: &str) -> IResult<&str, Node> {
    map_res(preceded(char('!'), formula), |inner| {
        LTL::negation(Some(inner))
    })
    .parse(input)
}

fn conjunction(input: &str) -> IResult<&str, Node> {
    map_res(preceded(char('^'), (formula, formula)), |(l, r)| {
        LTL::conjunction(Some(l), Some(r))
    })
    .parse(input)
}

fn next(input: &str) -> IResult<&str, Node> {
    map_res(preceded(char('X'), formula), |operand| {
        LTL::next(Some(operand))
    })
    .parse(input)
}

fn until(input: &str) -> IResult<&str, Node> {
    map_res(preceded(char('U'), (formula, formula)), |(l, r)| {
        LTL::until(Some(l), Some(r))
    })
    .parse(input)
}

fn formula(input: &str) -> IResult<&str, Node> {
    preceded(
        multispace0,
        alt((one, atom, negation, conjunction, next, until)),
    )
    .parse(input)
}

/// Parses a formula in prefix (Polish) notation, whitespace-separated:
/// `true`, `p<N>`, `! f`, `^ a b`, `X a`, `U a b`.
pub fn parse(input: &str) -> Result<Node, Error> {
    match all_consuming(terminated(formula, multispace0)).parse(input) {
        Ok((_, node)) => Ok(node),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(Error {
            remaining: e.input.to_string(),
        }),
        Err(nom::Err::Incomplete(_)) => Err(Error {
            remaining: String::new(),
        }),
    }
}
