use super::{Node, LTL};
use rand::Rng;

fn generate_formula_rec(remaining_ops: usize, atom_count: usize, rng: &mut impl Rng) -> Node {
    if remaining_ops == 0 {
        let choice = rng.random_range(0..=atom_count);
        if choice == atom_count {
            LTL::one()
        } else {
            LTL::atom(choice as u32)
        }
    } else if rng.random_bool(0.4) || remaining_ops == 1 {
        let sub_formula = generate_formula_rec(remaining_ops - 1, atom_count, rng);
        if rng.random_bool(0.5) {
            LTL::negation(Some(sub_formula)).unwrap()
        } else {
            LTL::next(Some(sub_formula)).unwrap()
        }
    } else {
        let left_ops = rng.random_range(0..remaining_ops);
        let right_ops = remaining_ops - 1 - left_ops;

        let left = generate_formula_rec(left_ops, atom_count, rng);
        let right = generate_formula_rec(right_ops, atom_count, rng);

        if rng.random_bool(0.5) {
            LTL::conjunction(Some(left), Some(right)).unwrap()
        } else {
            LTL::until(Some(left), Some(right)).unwrap()
        }
    }
}

/// Generates a random well-formed formula with roughly `tree_size` operators
/// over atoms `p0..p<atom_count>`. Construction-time rewrites may shrink the
/// result below the requested size.
pub fn generate_formula(tree_size: usize, atom_count: usize) -> Node {
    let mut rng = rand::rng();
    generate_formula_rec(tree_size, atom_count, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well_formed(node: &Node) -> bool {
        match &**node {
            LTL::One | LTL::Atom(_) => true,
            LTL::Negation(inner) => {
                !matches!(&**inner, LTL::Negation(_)) && well_formed(inner)
            }
            LTL::Conjunction(a, b) | LTL::Until(a, b) => well_formed(a) && well_formed(b),
            LTL::Next(a) => well_formed(a),
        }
    }

    #[test]
    fn generated_formulas_are_well_formed() {
        for size in [0, 1, 3, 8, 15] {
            for _ in 0..20 {
                assert!(well_formed(&generate_formula(size, 3)));
            }
        }
    }
}
