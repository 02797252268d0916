pub mod closure;
pub mod dot;
pub mod tableau;

pub use closure::Closure;

use log::debug;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use crate::{
    ltl::{Node, LTL},
    utils::implies,
};

/// A tableau state: one bit per closure position, set iff the positive form
/// of that closure element was chosen.
pub type StateBits = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The closure has more elements than a state bitmask can carry.
    ClosureTooLarge { len: usize },
    /// The candidate universe `2^|closure|` exceeds the configured cap.
    CandidateLimit { candidates: u64, limit: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ClosureTooLarge { len } => {
                write!(f, "closure has {len} elements, at most 63 are supported")
            }
            Error::CandidateLimit { candidates, limit } => write!(
                f,
                "tableau would enumerate {candidates} candidate states, over the limit of {limit}"
            ),
        }
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Caps the candidate universe `2^|closure|` before enumeration starts.
    pub state_limit: Option<usize>,
}

/// One row of the transition table: the atomic propositions true in the
/// source state, and the successor state indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub atoms: BTreeSet<u32>,
    pub successors: BTreeSet<usize>,
}

/// The automaton tuple `(A, AP, f, A_0, F)` consumed by renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Representation {
    /// Reachable state indices.
    pub states: BTreeSet<usize>,
    /// Atomic-proposition indices occurring in the formula.
    pub atoms: BTreeSet<u32>,
    /// Transition table, keyed by source state index.
    pub transitions: BTreeMap<usize, Transition>,
    /// Initial state indices.
    pub initial: BTreeSet<usize>,
    /// One acceptance set per until operator, in closure order. A run is
    /// accepting iff it visits every set infinitely often.
    pub accepting: Vec<BTreeSet<usize>>,
}

/// A nondeterministic generalized Büchi automaton built from one formula.
/// Everything is derived once, in construction order closure → tableau →
/// fixpoint, and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Automaton {
    root: Node,
    closure: Closure,
    states: Vec<StateBits>,
    representation: Representation,
}

impl Automaton {
    pub fn new(root: Node) -> Result<Self, Error> {
        Self::with_options(root, Options::default())
    }

    pub fn with_options(root: Node, options: Options) -> Result<Self, Error> {
        let closure = Closure::new(&root);
        debug!(
            "closure of `{root}`: {} elements, {} until operators, {} atoms",
            closure.len(),
            closure.until_count(),
            closure.atoms().len()
        );

        let states = tableau::generate_states(&closure, options.state_limit)?;
        debug!(
            "{} of {} candidate assignments are consistent",
            states.len(),
            1u64 << closure.len()
        );

        let initial: BTreeSet<usize> = states
            .iter()
            .enumerate()
            .filter(|(_, &state)| closure.holds(state, &root))
            .map(|(index, _)| index)
            .collect();

        let representation = build_reachable(&closure, &states, initial);
        debug!(
            "{} reachable states, {} with outgoing transitions",
            representation.states.len(),
            representation.transitions.len()
        );

        Ok(Self {
            root,
            closure,
            states,
            representation,
        })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn closure(&self) -> &Closure {
        &self.closure
    }

    /// The full tableau universe, including unreachable states.
    pub fn state_universe(&self) -> &[StateBits] {
        &self.states
    }

    pub fn representation(&self) -> &Representation {
        &self.representation
    }

    /// Materializes the full assignment of a tableau state: `closure[i]`
    /// where bit `i` is set, its negation where it is not.
    pub fn concrete_state(&self, index: usize) -> Vec<Node> {
        let state = self.states[index];
        self.closure
            .elements()
            .iter()
            .map(|node| {
                if self.closure.holds(state, node) {
                    node.clone()
                } else {
                    LTL::negated(node)
                }
            })
            .collect()
    }
}

/// Fixpoint reachability from the initial states. Each state index moves
/// unvisited → frontier → visited exactly once; the frontier pops the
/// smallest pending index first.
fn build_reachable(
    closure: &Closure,
    states: &[StateBits],
    initial: BTreeSet<usize>,
) -> Representation {
    let mut reachable = BTreeSet::new();
    let mut transitions = BTreeMap::new();
    let mut accepting = vec![BTreeSet::new(); closure.until_count()];
    let mut frontier = initial.clone();

    while let Some(s_index) = frontier.pop_first() {
        let s = states[s_index];
        reachable.insert(s_index);

        // rule Z1: state s belongs to F[i] iff the i-th until is either
        // unclaimed in s or already fulfilled by its right operand
        let mut until_ordinal = 0;
        for alpha in closure.elements() {
            if let LTL::Until(_, right) = &**alpha {
                if implies(closure.holds(s, alpha), closure.holds(s, right)) {
                    accepting[until_ordinal].insert(s_index);
                }
                until_ordinal += 1;
            }
        }

        // rules R1/R2 over every candidate successor
        let successors: BTreeSet<usize> = (0..states.len())
            .into_par_iter()
            .filter(|&sd_index| is_successor(closure, s, states[sd_index]))
            .collect();

        for &sd_index in &successors {
            if !reachable.contains(&sd_index) {
                frontier.insert(sd_index);
            }
        }

        if !successors.is_empty() {
            let atoms = closure
                .atoms()
                .iter()
                .copied()
                .filter(|&atom| closure.holds(s, &LTL::atom(atom)))
                .collect();
            let previous = transitions.insert(s_index, Transition { atoms, successors });
            assert!(
                previous.is_none(),
                "transition entry for state {s_index} written twice"
            );
        }
    }

    Representation {
        states: reachable,
        atoms: closure.atoms().clone(),
        transitions,
        initial,
        accepting,
    }
}

pub fn is_successor(closure: &Closure, s: StateBits, sd: StateBits) -> bool {
    closure
        .elements()
        .iter()
        .all(|node| transition_consistent(closure, s, sd, node))
}

/// Transition consistency of one node, negation unwrapped first.
fn transition_consistent(closure: &Closure, s: StateBits, sd: StateBits, node: &Node) -> bool {
    match &**node {
        LTL::Negation(inner) => transition_consistent(closure, s, sd, inner),
        // rule R1: X a in s = a in sd
        LTL::Next(operand) => closure.holds(s, node) == closure.holds(sd, operand),
        // rule R2: (a U b) in s = b in s OR (a in s AND (a U b) in sd)
        LTL::Until(left, right) => {
            closure.holds(s, node)
                == (closure.holds(s, right)
                    || (closure.holds(s, left) && closure.holds(sd, node)))
        }
        LTL::One | LTL::Atom(_) | LTL::Conjunction(_, _) => true,
    }
}
