//! Operator and variable vocabulary.
//!
//! The vocabulary fixes everything the enumerator may put into a tree:
//! the variable names (one of which is the constant placeholder) and the
//! ordered unary, binary and ternary operator lists.

use std::collections::HashSet;
use std::fmt;

use num_bigint::BigUint;

use crate::utils::compositions;

/// Number of operands an operator takes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Arity {
    Unary = 1,
    Binary = 2,
    Ternary = 3,
}

impl Arity {
    /// Number of operand slots.
    pub fn operands(self) -> usize {
        self as usize
    }
}

/// Bit-vector operator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Op {
    /// Arithmetic negation (`-u`).
    Neg,
    /// Bitwise complement (`~`).
    Not,
    Add,
    Sub,
    And,
    Or,
    Xor,
    Mul,
    Div,
    Mod,
    /// Multiply-then-modulo (`*%`), operands are `(cond, left, right)`.
    MulMod,
    /// Conditional select (`?:`), operands are `(cond, left, right)`.
    Ite,
}

impl Op {
    pub const ALL: [Op; 12] = [
        Op::Neg,
        Op::Not,
        Op::Add,
        Op::Sub,
        Op::And,
        Op::Or,
        Op::Xor,
        Op::Mul,
        Op::Div,
        Op::Mod,
        Op::MulMod,
        Op::Ite,
    ];
    pub const ALL_UNARY: [Op; 2] = [Op::Neg, Op::Not];
    pub const ALL_BINARY: [Op; 8] = [Op::Add, Op::Sub, Op::And, Op::Or, Op::Xor, Op::Mul, Op::Div, Op::Mod];
    pub const ALL_TERNARY: [Op; 2] = [Op::MulMod, Op::Ite];
    pub const COMMUTATIVE: [Op; 5] = [Op::And, Op::Or, Op::Xor, Op::Add, Op::Mul];

    pub fn arity(self) -> Arity {
        match self {
            Op::Neg | Op::Not => Arity::Unary,
            Op::Add | Op::Sub | Op::And | Op::Or | Op::Xor | Op::Mul | Op::Div | Op::Mod => Arity::Binary,
            Op::MulMod | Op::Ite => Arity::Ternary,
        }
    }

    pub fn is_commutative(self) -> bool {
        Op::COMMUTATIVE.contains(&self)
    }

    /// Short operator symbol, used for display.
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Neg => "-u",
            Op::Not => "~",
            Op::Add => "+",
            Op::Sub => "-",
            Op::And => "&",
            Op::Or => "|",
            Op::Xor => "^",
            Op::Mul => "*",
            Op::Div => "/",
            Op::Mod => "%",
            Op::MulMod => "*%",
            Op::Ite => "?:",
        }
    }

    /// Name of the matching node kind in the emitted builder API.
    pub fn name(self) -> &'static str {
        match self {
            Op::Neg => "Minus",
            Op::Not => "Not",
            Op::Add => "Add",
            Op::Sub => "Sub",
            Op::And => "And",
            Op::Or => "Or",
            Op::Xor => "Xor",
            Op::Mul => "Mul",
            Op::Div => "Div",
            Op::Mod => "Mod",
            Op::MulMod => "MulMod",
            Op::Ite => "Ite",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Fixed vocabulary of one enumeration run.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    variables: Vec<String>,
    placeholder: String,
    unary: Vec<Op>,
    binary: Vec<Op>,
    ternary: Vec<Op>,
}

impl Default for Vocabulary {
    /// Variables `x`, `y` and the placeholder `c`, with every operator.
    fn default() -> Self {
        Vocabulary::new(
            ["x", "y", "c"],
            "c",
            Op::ALL_UNARY,
            Op::ALL_BINARY,
            Op::ALL_TERNARY,
        )
    }
}

impl Vocabulary {
    /// Creates a new vocabulary.
    ///
    /// # Panics
    ///
    /// Panics if a variable name is repeated, if `placeholder` is not one of
    /// the `variables`, or if an operator is listed under the wrong arity.
    pub fn new<S>(
        variables: impl IntoIterator<Item = S>,
        placeholder: &str,
        unary: impl IntoIterator<Item = Op>,
        binary: impl IntoIterator<Item = Op>,
        ternary: impl IntoIterator<Item = Op>,
    ) -> Self
    where
        S: Into<String>,
    {
        let variables: Vec<String> = variables.into_iter().map(Into::into).collect();
        let mut seen = HashSet::new();
        for name in &variables {
            assert!(seen.insert(name.as_str()), "duplicate variable `{}`", name);
        }
        assert!(
            seen.contains(placeholder),
            "placeholder `{}` is not a variable",
            placeholder
        );

        let checked = |ops: &mut dyn Iterator<Item = Op>, arity: Arity| -> Vec<Op> {
            ops.map(|op| {
                assert_eq!(op.arity(), arity, "operator `{}` listed as {:?}", op, arity);
                op
            })
            .collect()
        };

        Vocabulary {
            unary: checked(&mut unary.into_iter(), Arity::Unary),
            binary: checked(&mut binary.into_iter(), Arity::Binary),
            ternary: checked(&mut ternary.into_iter(), Arity::Ternary),
            placeholder: placeholder.to_string(),
            variables,
        }
    }

    /// All variable names, placeholder included, in declaration order.
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Variable names that are real program inputs.
    pub fn ordinary_variables(&self) -> impl Iterator<Item = &str> + '_ {
        self.variables
            .iter()
            .map(String::as_str)
            .filter(move |&name| name != self.placeholder)
    }

    pub fn num_ordinary_variables(&self) -> usize {
        self.variables.len() - 1
    }

    /// Name of the constant placeholder variable.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn is_placeholder_name(&self, name: &str) -> bool {
        name == self.placeholder
    }

    pub fn unary(&self) -> &[Op] {
        &self.unary
    }

    pub fn binary(&self) -> &[Op] {
        &self.binary
    }

    pub fn ternary(&self) -> &[Op] {
        &self.ternary
    }

    /// Operators of the given arity.
    pub fn ops(&self, arity: Arity) -> &[Op] {
        match arity {
            Arity::Unary => &self.unary,
            Arity::Binary => &self.binary,
            Arity::Ternary => &self.ternary,
        }
    }

    /// Number of trees with exactly `level` internal nodes when nothing is
    /// filtered out.
    ///
    /// ```text
    /// T(0) = |V|
    /// T(n) = Σ_k |Ops_k| · Σ_{l_1 + … + l_k = n-1} T(l_1) ⋯ T(l_k)
    /// ```
    pub fn unfiltered_count(&self, level: usize) -> BigUint {
        let mut counts: Vec<BigUint> = vec![BigUint::from(self.variables.len())];
        for n in 1..=level {
            let mut total = BigUint::from(0u32);
            for arity in [Arity::Unary, Arity::Binary, Arity::Ternary] {
                let ops = self.ops(arity).len();
                if ops == 0 {
                    continue;
                }
                let mut shapes = BigUint::from(0u32);
                for parts in compositions(n - 1, arity.operands()) {
                    shapes += parts
                        .iter()
                        .fold(BigUint::from(1u32), |acc, &l| acc * &counts[l]);
                }
                total += shapes * ops;
            }
            counts.push(total);
        }
        counts.swap_remove(level)
    }
}
