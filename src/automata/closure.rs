use crate::{
    ltl::{Node, LTL},
    utils::{BitSet, Map},
};
use std::collections::BTreeSet;

use super::StateBits;

/// The closure of a formula: every distinct subformula reachable from the
/// root, in first-seen depth-first order. Negations are transparent: the
/// closure never stores a [`LTL::Negation`] node, only positive forms.
#[derive(Debug, Clone, Default)]
pub struct Closure {
    elements: Vec<Node>,
    positions: Map<Node, usize>,
    atoms: BTreeSet<u32>,
    until_count: usize,
}

impl Closure {
    pub fn new(root: &Node) -> Self {
        let mut closure = Self::default();
        closure.visit(root);
        closure
    }

    fn visit(&mut self, node: &Node) {
        match &**node {
            // negation is followed, not inserted
            LTL::Negation(inner) => {
                self.visit(inner);
                return;
            }
            LTL::One => {}
            LTL::Atom(index) => {
                self.atoms.insert(*index);
            }
            LTL::Conjunction(left, right) | LTL::Until(left, right) => {
                self.visit(left);
                self.visit(right);
            }
            LTL::Next(operand) => self.visit(operand),
        }
        self.insert(node);
    }

    fn insert(&mut self, node: &Node) {
        if self.positions.contains_key(node) {
            return;
        }
        if matches!(&**node, LTL::Until(_, _)) {
            self.until_count += 1;
        }
        self.positions.insert(node.clone(), self.elements.len());
        self.elements.push(node.clone());
    }

    pub fn elements(&self) -> &[Node] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Distinct atomic-proposition indices seen while building (the `AP`
    /// component of the automaton).
    pub fn atoms(&self) -> &BTreeSet<u32> {
        &self.atoms
    }

    /// Number of distinct until operators; one acceptance set exists per
    /// until, indexed in closure order.
    pub fn until_count(&self) -> usize {
        self.until_count
    }

    pub fn position(&self, node: &Node) -> Option<usize> {
        self.positions.get(node).copied()
    }

    /// Whether `node` is in the assignment `state`, with negation evaluated
    /// transparently: a negated node holds exactly when its positive form
    /// does not.
    pub fn holds(&self, state: StateBits, node: &Node) -> bool {
        match &**node {
            LTL::Negation(inner) => !self.holds(state, inner),
            _ => self
                .position(node)
                .is_some_and(|index| state.get(index as u32)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ltl::parse::parse;

    #[test]
    fn first_seen_depth_first_order() {
        let root = parse("U p0 p1").unwrap();
        let closure = Closure::new(&root);
        let texts: Vec<_> = closure.elements().iter().map(|n| n.to_string()).collect();
        assert_eq!(texts, ["p0", "p1", "U p0 p1"]);
        assert_eq!(closure.until_count(), 1);
        assert_eq!(closure.atoms().iter().copied().collect::<Vec<_>>(), [0, 1]);
    }

    #[test]
    fn negation_is_transparent() {
        let root = parse("! p0").unwrap();
        let closure = Closure::new(&root);
        let texts: Vec<_> = closure.elements().iter().map(|n| n.to_string()).collect();
        assert_eq!(texts, ["p0"]);
    }

    #[test]
    fn subformulas_appear_exactly_once() {
        // until does not collapse equal operands, unlike conjunction
        let root = parse("U p0 p0").unwrap();
        let closure = Closure::new(&root);
        let texts: Vec<_> = closure.elements().iter().map(|n| n.to_string()).collect();
        assert_eq!(texts, ["p0", "U p0 p0"]);

        let root = parse("^ X p0 U p0 p1").unwrap();
        let closure = Closure::new(&root);
        let texts: Vec<_> = closure.elements().iter().map(|n| n.to_string()).collect();
        assert_eq!(texts, ["p0", "X p0", "p1", "U p0 p1", "^ X p0 U p0 p1"]);
    }

    #[test]
    fn closure_is_idempotent_across_distinct_parses() {
        let first = Closure::new(&parse("^ X p0 U p0 p1").unwrap());
        let second = Closure::new(&parse("^ X p0 U p0 p1").unwrap());
        assert_eq!(first.elements(), second.elements());
    }

    #[test]
    fn holds_unwraps_negation() {
        let root = parse("X p0").unwrap();
        let closure = Closure::new(&root);
        // closure = [p0, X p0]; state 0b01 holds p0, not X p0
        let p0 = parse("p0").unwrap();
        let not_p0 = crate::ltl::LTL::negated(&p0);
        assert!(closure.holds(0b01, &p0));
        assert!(!closure.holds(0b01, &not_p0));
        assert!(!closure.holds(0b01, &root));
        assert!(closure.holds(0b10, &root));
    }
}
