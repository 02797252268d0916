use rayon::iter::{IntoParallelIterator, ParallelIterator};

use super::{closure::Closure, Error, StateBits};
use crate::{
    ltl::{Node, LTL},
    utils::implies,
};

/// Enumerates every atomic plurality (tableau state) over the closure: all
/// assignments choosing `closure[i]` or its negation per position, kept iff
/// every node is locally consistent. This is the exponential heart of the
/// construction; candidates are checked independently in parallel.
pub fn generate_states(closure: &Closure, limit: Option<usize>) -> Result<Vec<StateBits>, Error> {
    let width = closure.len();
    if width >= StateBits::BITS as usize {
        return Err(Error::ClosureTooLarge { len: width });
    }
    let candidates: StateBits = 1 << width;
    if let Some(limit) = limit {
        if candidates as u128 > limit as u128 {
            return Err(Error::CandidateLimit { candidates, limit });
        }
    }
    Ok((0..candidates)
        .into_par_iter()
        .filter(|&state| is_locally_consistent(closure, state))
        .collect())
}

pub fn is_locally_consistent(closure: &Closure, state: StateBits) -> bool {
    closure
        .elements()
        .iter()
        .all(|node| node_consistent(closure, state, node))
}

/// Local consistency of one node within an assignment, negation unwrapped
/// first. `Next` carries no local constraint; its obligation is deferred to
/// the transition rules.
pub fn node_consistent(closure: &Closure, state: StateBits, node: &Node) -> bool {
    match &**node {
        LTL::Negation(inner) => node_consistent(closure, state, inner),
        // rule 2: n = a ^ b holds exactly when both operands hold
        LTL::Conjunction(left, right) => {
            closure.holds(state, node)
                == (closure.holds(state, left) && closure.holds(state, right))
        }
        LTL::Until(left, right) => {
            let node_in = closure.holds(state, node);
            let left_in = closure.holds(state, left);
            let right_in = closure.holds(state, right);
            // rule 3: an unfulfilled until keeps its left operand alive
            // rule 4: a fulfilled right operand forces the until itself
            implies(node_in && !right_in, left_in) && implies(right_in, node_in)
        }
        LTL::One | LTL::Atom(_) | LTL::Next(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ltl::parse::parse;

    fn states_of(text: &str) -> (Closure, Vec<StateBits>) {
        let closure = Closure::new(&parse(text).unwrap());
        let states = generate_states(&closure, None).unwrap();
        (closure, states)
    }

    #[test]
    fn single_atom_yields_two_states() {
        let (_, states) = states_of("p0");
        assert_eq!(states, vec![0b0, 0b1]);
    }

    #[test]
    fn conjunction_value_is_forced() {
        // closure = [p0, p1, ^ p0 p1]; the conjunction bit is determined by
        // the operand bits, so exactly 4 of 8 candidates survive.
        let (closure, states) = states_of("^ p0 p1");
        assert_eq!(closure.len(), 3);
        assert_eq!(states, vec![0b000, 0b001, 0b010, 0b111]);
    }

    #[test]
    fn until_rules_filter_candidates() {
        // closure = [p0, p1, U p0 p1], bits in that order
        let (closure, states) = states_of("U p0 p1");
        assert_eq!(closure.len(), 3);
        assert_eq!(states, vec![0b000, 0b001, 0b101, 0b110, 0b111]);
        for &state in &states {
            assert!(is_locally_consistent(&closure, state));
        }
    }

    #[test]
    fn state_count_is_bounded_by_two_to_the_closure() {
        let (closure, states) = states_of("^ X p0 U p0 p1");
        assert!(states.len() <= 1 << closure.len());
    }

    #[test]
    fn candidate_limit_is_enforced() {
        let closure = Closure::new(&parse("^ X p0 U p0 p1").unwrap());
        assert!(matches!(
            generate_states(&closure, Some(4)),
            Err(Error::CandidateLimit {
                candidates: 32,
                limit: 4
            })
        ));
        assert!(generate_states(&closure, Some(32)).is_ok());
    }

    #[cfg(feature = "generator")]
    #[test]
    fn random_formulas_generate_only_consistent_states() {
        use crate::ltl::generate_formula;
        for _ in 0..30 {
            let root = generate_formula(4, 2);
            let closure = Closure::new(&root);
            let states = generate_states(&closure, None).unwrap();
            assert!(states.len() <= 1 << closure.len());
            for state in states {
                assert!(is_locally_consistent(&closure, state));
            }
        }
    }
}
