//! Redundancy Filters
//!
//! Syntactic rules that discard candidates known to be reducible, foldable,
//! or a mirrored duplicate of another candidate:
//!
//! - **Folding**: `-(-e)`, `~(~e)`, `op(c, c)`, `-c`
//! - **Absorption**: `-(a - b)` ≡ `b - a`, `-(a + b)` ≡ `-a - b`
//! - **Commutativity**: `x + y` ≡ `y + x` → keep the canonical order only
//! - **Combination**: `(a * b) % m` is covered by `MulMod`
//!
//! Every rule is its own predicate, so a leak in the candidate set can be
//! traced to a single rule. The rules only look at the shape near the root;
//! deeper rewrites (associativity, distributivity) are not detected.

use std::fmt;

use crate::expr::Expr;
use crate::vocab::{Op, Vocabulary};

/// A single redundancy rule.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rule {
    /// `-(-e)`
    DoubleNegation,
    /// `-(a - b)`
    NegatedDifference,
    /// `-(a + b)`
    NegatedSum,
    /// `~(~e)`
    DoubleComplement,
    /// Unary operator applied to the placeholder.
    UnaryOfConstant,
    /// `op(c, c)`
    ConstantPair,
    /// Two ordinary variables under anything but `+` or `*`.
    VariablePair,
    /// Commutative operator over leaves in non-canonical order.
    NonCanonicalOrder,
    /// `(a * b) % m` or `a % -m`.
    CombinableModulo,
    /// Ternary driven by the placeholder.
    ConstantCondition,
    /// `op(cond, t, t)`
    IdenticalBranches,
    /// `MulMod(m, a, m)`
    MulModConditionIsRight,
    /// `MulMod(m, a, -b)`
    MulModNegatedRight,
    /// `MulMod(y, x, b)` with `x < y`.
    MulModNonCanonicalOrder,
    /// `MulMod(m, c, c)`
    MulModConstantPair,
    /// Select whose condition is a select conditioned on itself.
    SelfNestedSelect,
}

impl Rule {
    pub const ALL: [Rule; 16] = [
        Rule::DoubleNegation,
        Rule::NegatedDifference,
        Rule::NegatedSum,
        Rule::DoubleComplement,
        Rule::UnaryOfConstant,
        Rule::ConstantPair,
        Rule::VariablePair,
        Rule::NonCanonicalOrder,
        Rule::CombinableModulo,
        Rule::ConstantCondition,
        Rule::IdenticalBranches,
        Rule::MulModConditionIsRight,
        Rule::MulModNegatedRight,
        Rule::MulModNonCanonicalOrder,
        Rule::MulModConstantPair,
        Rule::SelfNestedSelect,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Rule::DoubleNegation => "double-negation",
            Rule::NegatedDifference => "negated-difference",
            Rule::NegatedSum => "negated-sum",
            Rule::DoubleComplement => "double-complement",
            Rule::UnaryOfConstant => "unary-of-constant",
            Rule::ConstantPair => "constant-pair",
            Rule::VariablePair => "variable-pair",
            Rule::NonCanonicalOrder => "non-canonical-order",
            Rule::CombinableModulo => "combinable-modulo",
            Rule::ConstantCondition => "constant-condition",
            Rule::IdenticalBranches => "identical-branches",
            Rule::MulModConditionIsRight => "mulmod-condition-is-right",
            Rule::MulModNegatedRight => "mulmod-negated-right",
            Rule::MulModNonCanonicalOrder => "mulmod-non-canonical-order",
            Rule::MulModConstantPair => "mulmod-constant-pair",
            Rule::SelfNestedSelect => "self-nested-select",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The redundancy predicate over candidate trees.
///
/// Pure: the verdict depends on the tree and the vocabulary only.
pub struct Filters<'a> {
    vocab: &'a Vocabulary,
}

impl<'a> Filters<'a> {
    pub fn new(vocab: &'a Vocabulary) -> Self {
        Filters { vocab }
    }

    /// Whether `expr` should be discarded.
    pub fn is_redundant(&self, expr: &Expr) -> bool {
        self.rejecting_rule(expr).is_some()
    }

    /// First rule (in [`Rule::ALL`] order) that discards `expr`.
    pub fn rejecting_rule(&self, expr: &Expr) -> Option<Rule> {
        Rule::ALL.into_iter().find(|&rule| self.check(rule, expr))
    }

    /// Evaluate a single rule.
    pub fn check(&self, rule: Rule, expr: &Expr) -> bool {
        match rule {
            Rule::DoubleNegation => self.double_negation(expr),
            Rule::NegatedDifference => self.negated_difference(expr),
            Rule::NegatedSum => self.negated_sum(expr),
            Rule::DoubleComplement => self.double_complement(expr),
            Rule::UnaryOfConstant => self.unary_of_constant(expr),
            Rule::ConstantPair => self.constant_pair(expr),
            Rule::VariablePair => self.variable_pair(expr),
            Rule::NonCanonicalOrder => self.non_canonical_order(expr),
            Rule::CombinableModulo => self.combinable_modulo(expr),
            Rule::ConstantCondition => self.constant_condition(expr),
            Rule::IdenticalBranches => self.identical_branches(expr),
            Rule::MulModConditionIsRight => self.mulmod_condition_is_right(expr),
            Rule::MulModNegatedRight => self.mulmod_negated_right(expr),
            Rule::MulModNonCanonicalOrder => self.mulmod_non_canonical_order(expr),
            Rule::MulModConstantPair => self.mulmod_constant_pair(expr),
            Rule::SelfNestedSelect => self.self_nested_select(expr),
        }
    }

    /// Is `e` the placeholder leaf?
    pub fn is_constant(&self, e: &Expr) -> bool {
        e.var_name().is_some_and(|name| self.vocab.is_placeholder_name(name))
    }

    /// Is `e` an ordinary variable leaf?
    pub fn is_variable(&self, e: &Expr) -> bool {
        e.var_name().is_some_and(|name| !self.vocab.is_placeholder_name(name))
    }

    /// Leaf ordering used to keep one of each mirrored pair: ordinary
    /// variables by name, and every ordinary variable before the placeholder.
    fn leaves_in_order(&self, a: &Expr, b: &Expr) -> bool {
        match (a.var_name(), b.var_name()) {
            (Some(_), Some(_)) if self.is_constant(a) && self.is_variable(b) => false,
            (Some(x), Some(y)) if self.is_variable(a) && self.is_variable(b) => x <= y,
            _ => true,
        }
    }

    // ------------------------------------------------------------------
    // Unary
    // ------------------------------------------------------------------

    pub fn double_negation(&self, expr: &Expr) -> bool {
        matches!(expr, Expr::Unary(Op::Neg, e) if e.is_op(Op::Neg))
    }

    pub fn negated_difference(&self, expr: &Expr) -> bool {
        matches!(expr, Expr::Unary(Op::Neg, e) if e.is_op(Op::Sub))
    }

    pub fn negated_sum(&self, expr: &Expr) -> bool {
        matches!(expr, Expr::Unary(Op::Neg, e) if e.is_op(Op::Add))
    }

    pub fn double_complement(&self, expr: &Expr) -> bool {
        matches!(expr, Expr::Unary(Op::Not, e) if e.is_op(Op::Not))
    }

    /// `-c` and `~c` are just another constant.
    pub fn unary_of_constant(&self, expr: &Expr) -> bool {
        matches!(expr, Expr::Unary(_, e) if self.is_constant(e))
    }

    // ------------------------------------------------------------------
    // Binary
    // ------------------------------------------------------------------

    /// Both operands are the placeholder, so the node folds to a constant.
    pub fn constant_pair(&self, expr: &Expr) -> bool {
        matches!(expr, Expr::Binary(_, l, r) if self.is_constant(l) && self.is_constant(r))
    }

    /// Only `x + y` and `x * y` are kept as raw two-variable building blocks.
    pub fn variable_pair(&self, expr: &Expr) -> bool {
        matches!(
            expr,
            Expr::Binary(op, l, r)
                if self.is_variable(l) && self.is_variable(r) && !matches!(op, Op::Add | Op::Mul)
        )
    }

    pub fn non_canonical_order(&self, expr: &Expr) -> bool {
        matches!(
            expr,
            Expr::Binary(op, l, r)
                if op.is_commutative() && l.is_leaf() && r.is_leaf() && !self.leaves_in_order(l, r)
        )
    }

    /// `(a * b) % m` is `MulMod`, and `a % -m` only flips the divisor sign.
    pub fn combinable_modulo(&self, expr: &Expr) -> bool {
        matches!(expr, Expr::Binary(Op::Mod, l, r) if l.is_op(Op::Mul) || r.is_op(Op::Neg))
    }

    // ------------------------------------------------------------------
    // Ternary
    // ------------------------------------------------------------------

    pub fn constant_condition(&self, expr: &Expr) -> bool {
        matches!(expr, Expr::Ternary(_, cond, _, _) if self.is_constant(cond))
    }

    pub fn identical_branches(&self, expr: &Expr) -> bool {
        matches!(expr, Expr::Ternary(_, _, l, r) if l == r)
    }

    pub fn mulmod_condition_is_right(&self, expr: &Expr) -> bool {
        matches!(expr, Expr::Ternary(Op::MulMod, cond, _, r) if cond == r)
    }

    pub fn mulmod_negated_right(&self, expr: &Expr) -> bool {
        matches!(expr, Expr::Ternary(Op::MulMod, _, _, r) if r.is_op(Op::Neg))
    }

    pub fn mulmod_non_canonical_order(&self, expr: &Expr) -> bool {
        matches!(
            expr,
            Expr::Ternary(Op::MulMod, cond, l, _)
                if self.is_variable(cond) && self.is_variable(l) && !self.leaves_in_order(cond, l)
        )
    }

    pub fn mulmod_constant_pair(&self, expr: &Expr) -> bool {
        matches!(expr, Expr::Ternary(Op::MulMod, _, l, r) if self.is_constant(l) && self.is_constant(r))
    }

    /// A select used as its own condition. Finite trees never match; the rule
    /// stays so the vocabulary cannot smuggle such a shape in.
    pub fn self_nested_select(&self, expr: &Expr) -> bool {
        matches!(
            expr,
            Expr::Ternary(Op::Ite, cond, _, _)
                if matches!(&**cond, Expr::Ternary(Op::Ite, inner, _, _) if inner == cond)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::var("x")
    }

    fn y() -> Expr {
        Expr::var("y")
    }

    fn c() -> Expr {
        Expr::var("c")
    }

    fn neg(e: Expr) -> Expr {
        Expr::unary(Op::Neg, e)
    }

    fn bin(op: Op, l: Expr, r: Expr) -> Expr {
        Expr::binary(op, l, r)
    }

    fn tern(op: Op, cond: Expr, l: Expr, r: Expr) -> Expr {
        Expr::ternary(op, cond, l, r)
    }

    #[test]
    fn test_leaf_kinds() {
        let vocab = Vocabulary::default();
        let filters = Filters::new(&vocab);
        assert!(filters.is_constant(&c()));
        assert!(!filters.is_constant(&x()));
        assert!(filters.is_variable(&x()));
        assert!(!filters.is_variable(&c()));
        assert!(!filters.is_variable(&neg(x())));
    }

    #[test]
    fn test_unary_rules() {
        let vocab = Vocabulary::default();
        let filters = Filters::new(&vocab);

        assert!(filters.double_negation(&neg(neg(x()))));
        assert!(!filters.double_negation(&neg(x())));
        assert!(filters.negated_difference(&neg(bin(Op::Sub, x(), c()))));
        assert!(filters.negated_sum(&neg(bin(Op::Add, x(), y()))));
        assert!(!filters.negated_sum(&neg(bin(Op::Mul, x(), y()))));
        assert!(filters.double_complement(&Expr::unary(Op::Not, Expr::unary(Op::Not, x()))));
        assert!(!filters.double_complement(&Expr::unary(Op::Not, neg(x()))));
        assert!(filters.unary_of_constant(&neg(c())));
        assert!(filters.unary_of_constant(&Expr::unary(Op::Not, c())));
        assert!(!filters.unary_of_constant(&neg(x())));
    }

    #[test]
    fn test_constant_pair() {
        let vocab = Vocabulary::default();
        let filters = Filters::new(&vocab);
        for op in Op::ALL_BINARY {
            let e = bin(op, c(), c());
            assert!(filters.constant_pair(&e));
            assert_eq!(filters.rejecting_rule(&e), Some(Rule::ConstantPair));
        }
        assert!(!filters.constant_pair(&bin(Op::Add, x(), c())));
    }

    #[test]
    fn test_variable_pair() {
        let vocab = Vocabulary::default();
        let filters = Filters::new(&vocab);
        assert!(!filters.variable_pair(&bin(Op::Add, x(), y())));
        assert!(!filters.variable_pair(&bin(Op::Mul, x(), x())));
        assert!(filters.variable_pair(&bin(Op::Sub, x(), y())));
        assert!(filters.variable_pair(&bin(Op::Xor, x(), y())));
        assert!(!filters.variable_pair(&bin(Op::Sub, x(), c())));
    }

    #[test]
    fn test_non_canonical_order() {
        let vocab = Vocabulary::default();
        let filters = Filters::new(&vocab);
        for op in Op::COMMUTATIVE {
            assert!(!filters.non_canonical_order(&bin(op, x(), y())));
            assert!(filters.non_canonical_order(&bin(op, y(), x())));
            assert!(!filters.non_canonical_order(&bin(op, x(), c())));
            assert!(filters.non_canonical_order(&bin(op, c(), x())));
            assert!(!filters.non_canonical_order(&bin(op, x(), x())));
        }
        // Only leaves are ordered.
        assert!(!filters.non_canonical_order(&bin(Op::Add, neg(y()), x())));
        // Non-commutative operators keep both orders.
        assert!(!filters.non_canonical_order(&bin(Op::Sub, c(), x())));
        assert!(!filters.non_canonical_order(&bin(Op::Div, y(), x())));
    }

    #[test]
    fn test_combinable_modulo() {
        let vocab = Vocabulary::default();
        let filters = Filters::new(&vocab);
        assert!(filters.combinable_modulo(&bin(Op::Mod, bin(Op::Mul, x(), y()), c())));
        assert!(filters.combinable_modulo(&bin(Op::Mod, x(), neg(y()))));
        assert!(!filters.combinable_modulo(&bin(Op::Mod, neg(x()), y())));
        assert!(!filters.combinable_modulo(&bin(Op::Mod, x(), bin(Op::Mul, x(), y()))));
        assert!(!filters.combinable_modulo(&bin(Op::Div, bin(Op::Mul, x(), y()), c())));
    }

    #[test]
    fn test_ternary_rules() {
        let vocab = Vocabulary::default();
        let filters = Filters::new(&vocab);

        assert!(filters.constant_condition(&tern(Op::Ite, c(), x(), y())));
        assert!(filters.constant_condition(&tern(Op::MulMod, c(), x(), y())));
        assert!(!filters.constant_condition(&tern(Op::Ite, x(), c(), y())));

        assert!(filters.mulmod_condition_is_right(&tern(Op::MulMod, y(), x(), y())));
        assert!(!filters.mulmod_condition_is_right(&tern(Op::Ite, y(), x(), y())));

        assert!(filters.mulmod_negated_right(&tern(Op::MulMod, x(), y(), neg(x()))));
        assert!(!filters.mulmod_negated_right(&tern(Op::MulMod, x(), neg(y()), x())));

        assert!(filters.mulmod_non_canonical_order(&tern(Op::MulMod, y(), x(), c())));
        assert!(!filters.mulmod_non_canonical_order(&tern(Op::MulMod, x(), y(), c())));
        assert!(!filters.mulmod_non_canonical_order(&tern(Op::MulMod, x(), c(), y())));
        assert!(!filters.mulmod_non_canonical_order(&tern(Op::Ite, y(), x(), c())));

        assert!(filters.mulmod_constant_pair(&tern(Op::MulMod, x(), c(), c())));
        assert!(!filters.mulmod_constant_pair(&tern(Op::MulMod, x(), c(), y())));
    }

    #[test]
    fn test_identical_branches() {
        let vocab = Vocabulary::default();
        let filters = Filters::new(&vocab);
        let subtrees = [x(), c(), neg(y()), bin(Op::Add, x(), bin(Op::Mul, y(), c()))];
        for op in Op::ALL_TERNARY {
            for cond in [x(), y(), neg(x())] {
                for t in &subtrees {
                    let e = tern(op, cond.clone(), t.clone(), t.clone());
                    assert!(filters.identical_branches(&e));
                    assert!(filters.is_redundant(&e));
                }
            }
        }
        // Equality must hold all the way down.
        let a = bin(Op::Add, x(), bin(Op::Mul, y(), c()));
        let b = bin(Op::Add, x(), bin(Op::Mul, c(), y()));
        assert!(!filters.identical_branches(&tern(Op::Ite, x(), a, b)));
    }

    #[test]
    fn test_self_nested_select() {
        let vocab = Vocabulary::default();
        let filters = Filters::new(&vocab);
        let nested = tern(Op::Ite, tern(Op::Ite, x(), y(), c()), x(), y());
        assert!(!filters.self_nested_select(&nested));
        assert!(!filters.is_redundant(&nested));
    }

    #[test]
    fn test_rejecting_rule_order() {
        let vocab = Vocabulary::default();
        let filters = Filters::new(&vocab);
        assert_eq!(filters.rejecting_rule(&neg(neg(x()))), Some(Rule::DoubleNegation));
        assert_eq!(filters.rejecting_rule(&neg(c())), Some(Rule::UnaryOfConstant));
        assert_eq!(filters.rejecting_rule(&bin(Op::Sub, x(), y())), Some(Rule::VariablePair));
        assert_eq!(filters.rejecting_rule(&bin(Op::Add, y(), x())), Some(Rule::NonCanonicalOrder));
        // Both the condition and the branches match; the condition rule comes first.
        assert_eq!(filters.rejecting_rule(&tern(Op::Ite, c(), x(), x())), Some(Rule::ConstantCondition));
        assert_eq!(filters.rejecting_rule(&bin(Op::Add, x(), y())), None);
    }

    #[test]
    fn test_idempotent() {
        let vocab = Vocabulary::default();
        let filters = Filters::new(&vocab);
        let samples = [
            neg(x()),
            neg(neg(x())),
            bin(Op::Add, y(), x()),
            bin(Op::Add, x(), c()),
            tern(Op::MulMod, x(), y(), c()),
            tern(Op::Ite, x(), y(), y()),
        ];
        for e in &samples {
            assert_eq!(filters.is_redundant(e), filters.is_redundant(e));
            assert_eq!(filters.rejecting_rule(e), filters.rejecting_rule(e));
        }
    }

    #[test]
    fn test_rule_names() {
        let mut names: Vec<_> = Rule::ALL.iter().map(|r| r.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Rule::ALL.len());
        assert_eq!(Rule::IdenticalBranches.to_string(), "identical-branches");
    }
}
