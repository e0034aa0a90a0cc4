//! Emission of accepted candidates as calls into an expression-builder API.
//!
//! The output is a single inline function that binds every variable once and
//! then pushes one `ctx.create(...)` call per candidate:
//!
//! ```text
//! inline void tsgen_push_2(BvExprContext &ctx, std::vector<BvExpr*> &candidates) {
//!   candidates.reserve(4240);
//!   auto _x = ctx.create(BvExpr::Var, "x");
//!   auto _c0 = ctx.create(BvExpr::Var, "c0");
//!   candidates.push_back(ctx.create(BvExpr::Minus, _x));
//!   ...
//! }
//! ```
//!
//! Placeholder leaves are numbered per tree: the first placeholder met in a
//! left-to-right walk is `c0`, the next one `c1`, and the counter restarts
//! for the next tree.

use std::fmt;

use crate::expr::Expr;
use crate::levels::LevelIndex;
use crate::vocab::Vocabulary;

/// Names used in the emitted code.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RenderConfig {
    /// Header that declares the builder API.
    pub header: String,
    pub namespace: String,
    /// Builder context type, passed by reference as `ctx`.
    pub context_type: String,
    /// Node type; also qualifies the operator kinds (`BvExpr::Add`).
    pub node_type: String,
    /// Function name prefix; the ordinary-variable count is appended.
    pub function_prefix: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            header: "../utils/smt/BvExpr.h".to_string(),
            namespace: "smt".to_string(),
            context_type: "BvExprContext".to_string(),
            node_type: "BvExpr".to_string(),
            function_prefix: "tsgen_push_".to_string(),
        }
    }
}

/// Rendered output, one entry per line.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Emission {
    lines: Vec<String>,
}

impl Emission {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

impl fmt::Display for Emission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

pub struct Renderer<'a> {
    vocab: &'a Vocabulary,
    config: RenderConfig,
}

impl<'a> Renderer<'a> {
    pub fn new(vocab: &'a Vocabulary, config: RenderConfig) -> Self {
        Renderer { vocab, config }
    }

    /// Name of the `i`-th placeholder slot within a tree.
    pub fn constant_name(&self, i: usize) -> String {
        format!("{}{}", self.vocab.placeholder(), i)
    }

    /// Render the whole candidate set.
    pub fn render(&self, index: &LevelIndex) -> Emission {
        let cfg = &self.config;
        let mut out = Emission::default();

        out.push(format!("#include \"{}\"", cfg.header));
        out.push("#include <vector>");
        out.push(format!("using namespace {};", cfg.namespace));
        out.push("");
        out.push(format!(
            "inline void {}{}({} &ctx, std::vector<{}*> &candidates) {{",
            cfg.function_prefix,
            self.vocab.num_ordinary_variables(),
            cfg.context_type,
            cfg.node_type,
        ));
        out.push(format!("  candidates.reserve({});", index.num_candidates()));

        for name in self.binding_names(index) {
            out.push(format!(
                "  auto _{} = ctx.create({}::Var, \"{}\");",
                name, cfg.node_type, name
            ));
        }
        for expr in index.candidates() {
            out.push(format!("  candidates.push_back({});", self.render_expr(expr)));
        }
        out.push("}");

        out
    }

    /// Variables bound in the prologue: ordinary variables, then as many
    /// numbered placeholder slots as the busiest candidate needs.
    pub fn binding_names(&self, index: &LevelIndex) -> Vec<String> {
        let slots = index.max_var_count(self.vocab.placeholder());
        self.vocab
            .ordinary_variables()
            .map(str::to_string)
            .chain((0..slots).map(|i| self.constant_name(i)))
            .collect()
    }

    /// Render one tree as a nested `ctx.create(...)` call.
    pub fn render_expr(&self, expr: &Expr) -> String {
        let mut counter = 0;
        self.render_at(expr, &mut counter)
    }

    fn render_at(&self, expr: &Expr, counter: &mut usize) -> String {
        let kind = |name: &str| format!("{}::{}", self.config.node_type, name);
        match expr {
            Expr::Var(name) if self.vocab.is_placeholder_name(name) => {
                let slot = self.constant_name(*counter);
                *counter += 1;
                format!("_{}", slot)
            }
            Expr::Var(name) => format!("_{}", name),
            Expr::Unary(op, e) => {
                let e = self.render_at(e, counter);
                format!("ctx.create({}, {})", kind(op.name()), e)
            }
            Expr::Binary(op, l, r) => {
                let l = self.render_at(l, counter);
                let r = self.render_at(r, counter);
                format!("ctx.create({}, {}, {})", kind(op.name()), l, r)
            }
            Expr::Ternary(op, c, l, r) => {
                let c = self.render_at(c, counter);
                let l = self.render_at(l, counter);
                let r = self.render_at(r, counter);
                format!("ctx.create({}, {}, {}, {})", kind(op.name()), c, l, r)
            }
        }
    }
}
