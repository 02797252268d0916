use itertools::Itertools;

use super::Automaton;

fn node_label(index: usize) -> String {
    format!("a{index}")
}

/// One line per reachable state: `a<i> = {node; node; ...}`, the full
/// assignment behind the short node label.
pub fn state_explanations(automaton: &Automaton) -> Vec<String> {
    automaton
        .representation()
        .states
        .iter()
        .map(|&index| {
            let assignment = automaton
                .concrete_state(index)
                .iter()
                .map(|node| node.to_string())
                .join("; ");
            format!("{} = {{{assignment}}}", node_label(index))
        })
        .collect()
}

/// Renders the automaton as a Graphviz digraph: initial states filled,
/// accepting states doubled with their `F:{..}` set ordinals, edges labeled
/// with the atomic propositions true in the source state.
pub fn to_dot(automaton: &Automaton) -> String {
    let repr = automaton.representation();

    let mut dot = String::new();
    dot.push_str("digraph Automaton {\n");
    dot.push_str("    splines=\"polyline\";\n");
    dot.push_str("    rankdir=LR;\n");
    dot.push_str(&format!("    label=\"{}\";\n", automaton.root()));
    dot.push_str("    labelloc=\"t\";\n");
    dot.push_str("    fontsize=30;\n");
    dot.push_str("    fontcolor=gray;\n");

    for &index in &repr.states {
        let memberships = repr
            .accepting
            .iter()
            .enumerate()
            .filter(|(_, set)| set.contains(&index))
            .map(|(ordinal, _)| ordinal.to_string())
            .join(", ");
        let shape = if memberships.is_empty() {
            "circle"
        } else {
            "doublecircle"
        };
        let fill = if repr.initial.contains(&index) {
            ",fillcolor=bisque,style=filled"
        } else {
            ""
        };
        let finals = if memberships.is_empty() {
            String::new()
        } else {
            format!("\\nF:{{{memberships}}}")
        };
        dot.push_str(&format!(
            "    {index} [shape={shape}{fill},label=\"{}{finals}\"];\n",
            node_label(index)
        ));
    }

    for (&index, transition) in &repr.transitions {
        let targets = transition.successors.iter().join(",");
        let label = if transition.atoms.is_empty() {
            "[style=dotted,label=<&#8709;>]".to_string()
        } else {
            let atoms = transition.atoms.iter().map(|atom| format!("p{atom}")).join(",");
            format!("[label=\"\\{{{atoms}\\}}\"]")
        };
        dot.push_str(&format!("    {index} -> {{{targets}}} {label};\n"));
    }

    dot.push_str("}\n");
    dot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ltl::parse::parse;

    #[test]
    fn explanations_list_every_reachable_state() {
        let automaton = Automaton::new(parse("U p0 p1").unwrap()).unwrap();
        let explanations = state_explanations(&automaton);
        assert_eq!(
            explanations.len(),
            automaton.representation().states.len()
        );
        for line in &explanations {
            assert!(line.starts_with('a'));
            assert!(line.contains(" = {"));
        }
    }

    #[test]
    fn dot_output_shape() {
        let automaton = Automaton::new(parse("U p0 p1").unwrap()).unwrap();
        let dot = to_dot(&automaton);
        assert!(dot.starts_with("digraph Automaton {"));
        assert!(dot.contains("rankdir=LR"));
        assert!(dot.contains("label=\"U p0 p1\""));
        assert!(dot.contains("doublecircle"));
        assert!(dot.contains("fillcolor=bisque"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn empty_alphabet_edges_are_dotted() {
        // states where no atom holds still carry an edge, labeled with the
        // empty set
        let automaton = Automaton::new(parse("p0").unwrap()).unwrap();
        let dot = to_dot(&automaton);
        assert!(dot.contains("style=dotted"));
    }
}
