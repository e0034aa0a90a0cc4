//! Expression trees.
//!
//! An [`Expr`] owns its children and is compared by value: two trees with the
//! same shape, operators and leaf names are equal no matter where they were
//! built.

use std::fmt;

use crate::vocab::{Arity, Op};

/// A bit-vector expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Named input slot.
    Var(String),
    Unary(Op, Box<Expr>),
    Binary(Op, Box<Expr>, Box<Expr>),
    /// Operands are `(cond, left, right)`.
    Ternary(Op, Box<Expr>, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    /// # Panics
    ///
    /// Panics if `op` is not a unary operator.
    pub fn unary(op: Op, node: Expr) -> Self {
        assert_eq!(op.arity(), Arity::Unary, "`{}` is not unary", op);
        Expr::Unary(op, Box::new(node))
    }

    /// # Panics
    ///
    /// Panics if `op` is not a binary operator.
    pub fn binary(op: Op, left: Expr, right: Expr) -> Self {
        assert_eq!(op.arity(), Arity::Binary, "`{}` is not binary", op);
        Expr::Binary(op, Box::new(left), Box::new(right))
    }

    /// # Panics
    ///
    /// Panics if `op` is not a ternary operator.
    pub fn ternary(op: Op, cond: Expr, left: Expr, right: Expr) -> Self {
        assert_eq!(op.arity(), Arity::Ternary, "`{}` is not ternary", op);
        Expr::Ternary(op, Box::new(cond), Box::new(left), Box::new(right))
    }

    /// Root operator, `None` for leaves.
    pub fn op(&self) -> Option<Op> {
        match self {
            Expr::Var(_) => None,
            Expr::Unary(op, _) | Expr::Binary(op, _, _) | Expr::Ternary(op, _, _, _) => Some(*op),
        }
    }

    /// Whether the root is an application of `op`.
    pub fn is_op(&self, op: Op) -> bool {
        self.op() == Some(op)
    }

    /// Leaf name, `None` for internal nodes.
    pub fn var_name(&self) -> Option<&str> {
        match self {
            Expr::Var(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Expr::Var(_))
    }

    /// Node budget of the tree: the number of internal (operator) nodes.
    pub fn level(&self) -> usize {
        match self {
            Expr::Var(_) => 0,
            Expr::Unary(_, e) => 1 + e.level(),
            Expr::Binary(_, l, r) => 1 + l.level() + r.level(),
            Expr::Ternary(_, c, l, r) => 1 + c.level() + l.level() + r.level(),
        }
    }

    /// Total number of nodes, leaves included.
    pub fn size(&self) -> usize {
        match self {
            Expr::Var(_) => 1,
            Expr::Unary(_, e) => 1 + e.size(),
            Expr::Binary(_, l, r) => 1 + l.size() + r.size(),
            Expr::Ternary(_, c, l, r) => 1 + c.size() + l.size() + r.size(),
        }
    }

    /// Depth of the tree (0 for leaves).
    pub fn depth(&self) -> usize {
        match self {
            Expr::Var(_) => 0,
            Expr::Unary(_, e) => 1 + e.depth(),
            Expr::Binary(_, l, r) => 1 + l.depth().max(r.depth()),
            Expr::Ternary(_, c, l, r) => 1 + c.depth().max(l.depth()).max(r.depth()),
        }
    }

    /// Number of leaves named `name`.
    pub fn count_var(&self, name: &str) -> usize {
        match self {
            Expr::Var(v) => usize::from(v == name),
            Expr::Unary(_, e) => e.count_var(name),
            Expr::Binary(_, l, r) => l.count_var(name) + r.count_var(name),
            Expr::Ternary(_, c, l, r) => c.count_var(name) + l.count_var(name) + r.count_var(name),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Unary(Op::Neg, e) => write!(f, "-{}", e),
            Expr::Unary(op, e) => write!(f, "{}{}", op, e),
            Expr::Binary(op, l, r) => write!(f, "({} {} {})", l, op, r),
            Expr::Ternary(Op::Ite, c, l, r) => write!(f, "({} ? {} : {})", c, l, r),
            Expr::Ternary(op, c, l, r) => write!(f, "{}({}, {}, {})", op.name(), c, l, r),
        }
    }
}
