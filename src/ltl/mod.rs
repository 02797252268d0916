#[cfg(feature = "generator")]
mod generator;
pub mod parse;

#[cfg(feature = "generator")]
pub use generator::generate_formula;

use serde::{Deserialize, Serialize};
use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// Shared handle to an immutable formula node. Formulas are built bottom-up,
/// so the node graph is a DAG and plain reference counting suffices.
pub type Node = Arc<LTL>;

/// Represents a Linear Temporal Logic (LTL) formula.
#[derive(Debug, Serialize, Deserialize)]
pub enum LTL {
    One,
    Atom(u32),
    Negation(Node),
    Conjunction(Node, Node),
    Next(Node),
    Until(Node, Node),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A constructor received an absent operand.
    MissingOperand(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingOperand(op) => write!(f, "missing operand for `{op}`"),
        }
    }
}

impl std::error::Error for Error {}

// Constructors
impl LTL {
    pub fn one() -> Node {
        Arc::new(LTL::One)
    }

    pub fn atom(index: u32) -> Node {
        Arc::new(LTL::Atom(index))
    }

    /// Negation never wraps another negation: `!!f` collapses to `f`.
    pub fn negation(inner: Option<Node>) -> Result<Node, Error> {
        let inner = inner.ok_or(Error::MissingOperand("!"))?;
        if let LTL::Negation(f) = &*inner {
            return Ok(f.clone());
        }
        Ok(Arc::new(LTL::Negation(inner)))
    }

    /// Applies the local rewrites `true ^ x -> x`, `x ^ true -> x`,
    /// `!true ^ x -> !true` (either side) and `x ^ x -> x` before
    /// allocating a node.
    pub fn conjunction(left: Option<Node>, right: Option<Node>) -> Result<Node, Error> {
        let left = left.ok_or(Error::MissingOperand("^"))?;
        let right = right.ok_or(Error::MissingOperand("^"))?;
        if matches!(&*left, LTL::One) {
            return Ok(right);
        }
        if matches!(&*right, LTL::One) {
            return Ok(left);
        }
        if is_negated_one(&left) || is_negated_one(&right) {
            return LTL::negation(Some(LTL::one()));
        }
        if left == right {
            return Ok(left);
        }
        Ok(Arc::new(LTL::Conjunction(left, right)))
    }

    pub fn next(operand: Option<Node>) -> Result<Node, Error> {
        let operand = operand.ok_or(Error::MissingOperand("X"))?;
        Ok(Arc::new(LTL::Next(operand)))
    }

    pub fn until(left: Option<Node>, right: Option<Node>) -> Result<Node, Error> {
        let left = left.ok_or(Error::MissingOperand("U"))?;
        let right = right.ok_or(Error::MissingOperand("U"))?;
        Ok(Arc::new(LTL::Until(left, right)))
    }

    /// Infallible complement: strips a negation or wraps one. The result is
    /// the structural negation of `node` and never a double negation.
    pub fn negated(node: &Node) -> Node {
        match &**node {
            LTL::Negation(inner) => inner.clone(),
            _ => Arc::new(LTL::Negation(node.clone())),
        }
    }
}

fn is_negated_one(node: &Node) -> bool {
    matches!(&**node, LTL::Negation(inner) if matches!(&**inner, LTL::One))
}

/// Structural equality: conjunction is commutative, until is not.
impl PartialEq for LTL {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LTL::One, LTL::One) => true,
            (LTL::Atom(a), LTL::Atom(b)) => a == b,
            (LTL::Negation(a), LTL::Negation(b)) => a == b,
            (LTL::Conjunction(a, b), LTL::Conjunction(c, d)) => {
                (a == c && b == d) || (a == d && b == c)
            }
            (LTL::Next(a), LTL::Next(b)) => a == b,
            (LTL::Until(a, b), LTL::Until(c, d)) => a == c && b == d,
            _ => false,
        }
    }
}

impl Eq for LTL {}

impl LTL {
    // Commutative combine for conjunction children, so that hashes agree
    // with the commutative equality above.
    fn structural_hash(&self) -> u64 {
        match self {
            LTL::One => 0x9e37_79b9,
            LTL::Atom(i) => 0x85eb_ca6b_u64.wrapping_mul(u64::from(*i).wrapping_add(1)),
            LTL::Negation(f) => f.structural_hash().rotate_left(17) ^ 0xc2b2_ae35,
            LTL::Conjunction(a, b) => a
                .structural_hash()
                .wrapping_add(b.structural_hash())
                .wrapping_mul(0x27d4_eb2f),
            LTL::Next(f) => f.structural_hash().rotate_left(31) ^ 0x1656_67b1,
            LTL::Until(a, b) => a
                .structural_hash()
                .wrapping_mul(0x9e37_79b9_7f4a_7c15)
                .wrapping_add(b.structural_hash())
                .rotate_left(7),
        }
    }
}

impl Hash for LTL {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}

/// Canonical prefix (Polish) text form; this is also the input grammar of
/// [`parse::parse`].
impl fmt::Display for LTL {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LTL::One => write!(f, "true"),
            LTL::Atom(i) => write!(f, "p{i}"),
            LTL::Negation(inner) => write!(f, "! {inner}"),
            LTL::Conjunction(a, b) => write!(f, "^ {a} {b}"),
            LTL::Next(a) => write!(f, "X {a}"),
            LTL::Until(a, b) => write!(f, "U {a} {b}"),
        }
    }
}
