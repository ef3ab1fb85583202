//! Linear expressions, constraints, and the persistent constraint chain.

use std::rc::Rc;

/// A sparse linear expression over decision variables.
///
/// Terms are `(variable index, coefficient)` pairs. Variables are
/// identified by their position in the problem's ordered sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct LinExpr {
    /// Terms as (variable index, coefficient).
    pub terms: Vec<(usize, f64)>,
}

impl LinExpr {
    /// Create an empty expression.
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Create an expression consisting of a single variable.
    pub fn var(index: usize) -> Self {
        Self {
            terms: vec![(index, 1.0)],
        }
    }

    /// Add a term to the expression (builder style).
    pub fn with_term(mut self, index: usize, coef: f64) -> Self {
        self.terms.push((index, coef));
        self
    }

    /// Evaluate the expression at a point.
    pub fn eval(&self, x: &[f64]) -> f64 {
        self.terms.iter().map(|&(i, c)| c * x[i]).sum()
    }

    /// Largest variable index referenced, if any.
    pub fn max_var_index(&self) -> Option<usize> {
        self.terms.iter().map(|&(i, _)| i).max()
    }
}

impl Default for LinExpr {
    fn default() -> Self {
        Self::new()
    }
}

/// Relation of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// expr <= rhs
    Le,

    /// expr >= rhs
    Ge,

    /// expr == rhs
    Eq,
}

/// A linear constraint: `expr rel rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    /// Left-hand side expression.
    pub expr: LinExpr,

    /// Constraint relation.
    pub rel: Relation,

    /// Right-hand side.
    pub rhs: f64,
}

impl Constraint {
    /// Create `expr <= rhs`.
    pub fn le(expr: LinExpr, rhs: f64) -> Self {
        Self {
            expr,
            rel: Relation::Le,
            rhs,
        }
    }

    /// Create `expr >= rhs`.
    pub fn ge(expr: LinExpr, rhs: f64) -> Self {
        Self {
            expr,
            rel: Relation::Ge,
            rhs,
        }
    }

    /// Create `expr == rhs`.
    pub fn eq(expr: LinExpr, rhs: f64) -> Self {
        Self {
            expr,
            rel: Relation::Eq,
            rhs,
        }
    }

    /// Create the branching bound `x_var <= bound`.
    pub fn upper_bound(var: usize, bound: f64) -> Self {
        Self::le(LinExpr::var(var), bound)
    }

    /// Create the branching bound `x_var >= bound`.
    pub fn lower_bound(var: usize, bound: f64) -> Self {
        Self::ge(LinExpr::var(var), bound)
    }

    /// If this is a single-variable unit-coefficient bound, return
    /// `(var, relation, rhs)`.
    pub fn as_bound(&self) -> Option<(usize, Relation, f64)> {
        match self.expr.terms.as_slice() {
            [(var, coef)] if *coef == 1.0 => Some((*var, self.rel, self.rhs)),
            _ => None,
        }
    }

    /// Check whether a point satisfies the constraint within tolerance.
    pub fn satisfied_by(&self, x: &[f64], tol: f64) -> bool {
        let lhs = self.expr.eval(x);
        match self.rel {
            Relation::Le => lhs <= self.rhs + tol,
            Relation::Ge => lhs >= self.rhs - tol,
            Relation::Eq => (lhs - self.rhs).abs() <= tol,
        }
    }
}

/// Immutable-append persistent list of constraints.
///
/// `push` returns a new chain that shares the inherited prefix with its
/// parent. A child node extending the chain can therefore never affect
/// the parent's constraint set, which is the independence branching
/// relies on.
#[derive(Debug, Clone)]
pub struct ConstraintChain {
    head: Option<Rc<Link>>,
    len: usize,
}

#[derive(Debug)]
struct Link {
    constraint: Constraint,
    parent: Option<Rc<Link>>,
}

impl ConstraintChain {
    /// Create an empty chain.
    pub fn empty() -> Self {
        Self { head: None, len: 0 }
    }

    /// Create a chain from a slice, oldest constraint first.
    pub fn from_slice(constraints: &[Constraint]) -> Self {
        constraints
            .iter()
            .fold(Self::empty(), |chain, c| chain.push(c.clone()))
    }

    /// Return a new chain with one more constraint appended.
    pub fn push(&self, constraint: Constraint) -> Self {
        Self {
            head: Some(Rc::new(Link {
                constraint,
                parent: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Number of constraints in the chain.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Collect the constraints oldest-first (root constraints before
    /// branching bounds).
    pub fn to_vec(&self) -> Vec<Constraint> {
        let mut out = Vec::with_capacity(self.len);
        let mut cursor = self.head.as_deref();
        while let Some(link) = cursor {
            out.push(link.constraint.clone());
            cursor = link.parent.as_deref();
        }
        out.reverse();
        out
    }
}
