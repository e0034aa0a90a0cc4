//! # expr-seed: exhaustive bit-vector expression enumeration
//!
//! **`expr-seed`** builds every syntactically distinct expression tree up to a
//! small node budget over a fixed vocabulary of variables and bit-vector
//! operators, drops the trees that are provably redundant, and renders the
//! rest as seed candidates for a program-synthesis search.
//!
//! ## How it works
//!
//! Trees are grouped by *level*: the number of internal (operator) nodes.
//! Level 0 holds one leaf per variable. Level `n` is built from levels
//! `0..n` by the [`builder`], passed once through the [`filter`], and then
//! frozen. One variable is the *constant placeholder*: a slot that the
//! synthesis engine fills with a constant later.
//!
//! The filter is a set of local, syntactic rules (double negation, constant
//! folding, commutative mirror images, ...). It is sound but not complete:
//! semantically equal trees that differ deeper than the rules look may both
//! survive.
//!
//! ## Basic Usage
//!
//! ```rust
//! use expr_seed::levels::{EnumConfig, Enumerator};
//! use expr_seed::render::{RenderConfig, Renderer};
//! use expr_seed::vocab::Vocabulary;
//!
//! let vocab = Vocabulary::default();
//! let index = Enumerator::new(&vocab, EnumConfig::default()).run();
//! assert_eq!(index.num_candidates(), 4240);
//!
//! let emission = Renderer::new(&vocab, RenderConfig::default()).render(&index);
//! assert!(emission.to_string().contains("candidates.reserve(4240);"));
//! ```
//!
//! ## Core Components
//!
//! - **[`vocab`]**: operators, arities and the variable set.
//! - **[`expr`]**: the expression tree.
//! - **[`builder`]**: level-by-level candidate generation.
//! - **[`filter`]**: the redundancy rules.
//! - **[`levels`]**: the level index and the enumeration driver.
//! - **[`render`]**: emission as builder-API calls.

pub mod builder;
pub mod expr;
pub mod filter;
pub mod levels;
pub mod render;
pub mod utils;
pub mod vocab;
