//! Level Builder
//!
//! Produces every candidate tree with exactly `n` internal nodes from the
//! already computed levels `0..n`.
//!
//! ## Algorithm
//!
//! ```text
//! Unary[n]   = op(e)          for e in Level[n-1]
//! Binary[n]  = op(a, b)       for (i, j) in compositions(n-1, 2), a in Level[i], b in Level[j]
//! Ternary[n] = op(c, a, b)    for (i, j, k) in compositions(n-1, 3), ...
//! ```
//!
//! Each operand position receives the "most expensive" subtree exactly once
//! per composition, so no tree is produced twice. Mirrored shapes such as
//! `op(L1, L0)` and `op(L0, L1)` are both produced; picking one of them is
//! the filter's job.

use num_bigint::BigUint;

use crate::expr::Expr;
use crate::utils::compositions;
use crate::vocab::{Arity, Op, Vocabulary};

/// Builder for one level of the candidate space.
///
/// Borrows the finished lower levels read-only; `levels[i]` holds the
/// accepted trees with `i` internal nodes.
pub struct LevelBuilder<'a> {
    vocab: &'a Vocabulary,
    levels: &'a [Vec<Expr>],
}

impl<'a> LevelBuilder<'a> {
    pub fn new(vocab: &'a Vocabulary, levels: &'a [Vec<Expr>]) -> Self {
        LevelBuilder { vocab, levels }
    }

    /// Level 0: one leaf per variable, in vocabulary order.
    pub fn leaves(vocab: &Vocabulary) -> Vec<Expr> {
        vocab.variables().iter().map(|name| Expr::var(name.as_str())).collect()
    }

    /// Level the builder produces next.
    pub fn next_level(&self) -> usize {
        self.levels.len()
    }

    /// Build the unfiltered candidate list for the next level.
    ///
    /// # Panics
    ///
    /// Panics if there are no lower levels yet (use [`LevelBuilder::leaves`]
    /// for level 0).
    pub fn build(&self) -> Vec<Expr> {
        let n = self.next_level();
        assert!(n >= 1, "level 0 is built from the vocabulary");

        let mut result = Vec::new();
        self.build_unary(n, &mut result);
        self.build_binary(n, &mut result);
        self.build_ternary(n, &mut result);
        result
    }

    fn build_unary(&self, n: usize, out: &mut Vec<Expr>) {
        for &op in self.vocab.unary() {
            for node in &self.levels[n - 1] {
                out.push(Expr::unary(op, node.clone()));
            }
        }
    }

    fn build_binary(&self, n: usize, out: &mut Vec<Expr>) {
        for &op in self.vocab.binary() {
            for parts in compositions(n - 1, 2) {
                let (lefts, rights) = (&self.levels[parts[0]], &self.levels[parts[1]]);
                for left in lefts {
                    for right in rights {
                        out.push(Expr::binary(op, left.clone(), right.clone()));
                    }
                }
            }
        }
    }

    fn build_ternary(&self, n: usize, out: &mut Vec<Expr>) {
        for &op in self.vocab.ternary() {
            for parts in compositions(n - 1, 3) {
                let conds = &self.levels[parts[0]];
                let lefts = &self.levels[parts[1]];
                let rights = &self.levels[parts[2]];
                for cond in conds {
                    for left in lefts {
                        for right in rights {
                            out.push(Expr::ternary(op, cond.clone(), left.clone(), right.clone()));
                        }
                    }
                }
            }
        }
    }

    /// Exact number of trees [`build`][LevelBuilder::build] will produce.
    pub fn candidate_count(&self) -> BigUint {
        let n = self.next_level();
        let mut total = BigUint::from(0u32);
        for arity in [Arity::Unary, Arity::Binary, Arity::Ternary] {
            let ops = self.vocab.ops(arity).len();
            for parts in compositions(n - 1, arity.operands()) {
                let shapes = parts
                    .iter()
                    .fold(BigUint::from(1u32), |acc, &l| acc * self.levels[l].len());
                total += shapes * ops;
            }
        }
        total
    }

    /// Operator applications of `op` at the next level, in build order.
    pub fn build_op(&self, op: Op) -> Vec<Expr> {
        self.build().into_iter().filter(|e| e.is_op(op)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_one(vocab: &Vocabulary) -> Vec<Vec<Expr>> {
        let levels = vec![LevelBuilder::leaves(vocab)];
        let next = LevelBuilder::new(vocab, &levels).build();
        vec![levels.into_iter().next().unwrap(), next]
    }

    #[test]
    fn test_leaves() {
        let vocab = Vocabulary::default();
        let leaves = LevelBuilder::leaves(&vocab);
        assert_eq!(leaves, vec![Expr::var("x"), Expr::var("y"), Expr::var("c")]);
    }

    #[test]
    fn test_level_one_unfiltered() {
        let vocab = Vocabulary::default();
        let levels = level_one(&vocab);
        // 2·3 + 8·9 + 2·27
        assert_eq!(levels[1].len(), 132);
        assert!(levels[1].iter().all(|e| e.level() == 1));
        assert_eq!(levels[1][0], Expr::unary(Op::Neg, Expr::var("x")));
        assert_eq!(
            levels[1][6],
            Expr::binary(Op::Add, Expr::var("x"), Expr::var("x"))
        );
    }

    #[test]
    fn test_level_two_passes() {
        let vocab = Vocabulary::new(["x", "c"], "c", [Op::Neg], [Op::Sub], [Op::Ite]);
        let levels = level_one(&vocab);
        let builder = LevelBuilder::new(&vocab, &levels);
        assert_eq!(builder.next_level(), 2);

        let level2 = builder.build();
        assert!(level2.iter().all(|e| e.level() == 2));
        assert_eq!(BigUint::from(level2.len()), builder.candidate_count());

        // Both (1,0) and (0,1) passes are kept, larger operand on the left first.
        let subs = builder.build_op(Op::Sub);
        let n1 = levels[1].len();
        assert_eq!(subs.len(), 2 * n1 * 2);
        assert!(matches!(&subs[0], Expr::Binary(_, l, r) if l.level() == 1 && r.level() == 0));
        assert!(matches!(subs.last(), Some(Expr::Binary(_, l, r)) if l.level() == 0 && r.level() == 1));

        // Ternary: (1,0,0), (0,1,0), (0,0,1).
        let ites = builder.build_op(Op::Ite);
        assert_eq!(ites.len(), 3 * n1 * 2 * 2);
        assert!(matches!(&ites[0], Expr::Ternary(_, c, _, _) if c.level() == 1));
        assert!(matches!(ites.last(), Some(Expr::Ternary(_, _, _, r)) if r.level() == 1));
    }

    #[test]
    fn test_candidate_count_matches_unfiltered() {
        let vocab = Vocabulary::default();
        let levels = level_one(&vocab);
        let builder = LevelBuilder::new(&vocab, &levels);
        assert_eq!(builder.candidate_count(), vocab.unfiltered_count(2));
    }

    #[test]
    #[should_panic(expected = "level 0")]
    fn test_build_without_levels() {
        let vocab = Vocabulary::default();
        LevelBuilder::new(&vocab, &[]).build();
    }
}
