use std::collections::HashMap;
use std::f64::consts::{E, PI};

use crate::Error;
use crate::tree::{ExprNode, Leaf};

/// Named constants known to the lexer and bound by [`Environment::standard`]
pub const STANDARD_CONSTANTS: &[(&str, f64)] = &[("pi", PI), ("e", E)];

pub fn is_standard_constant(name: &str) -> bool {
    STANDARD_CONSTANTS.iter().any(|(constant, _)| *constant == name)
}

/// Values for variables and constants, supplied at evaluation time
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Environment {
    bindings: HashMap<String, f64>,
    parent: Option<Box<Environment>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            bindings: HashMap::new(),
            parent: None,
        }
    }

    /// Bindings made in the new scope shadow those of `parent`
    pub fn with_parent(parent: Environment) -> Self {
        Environment {
            bindings: HashMap::new(),
            parent: Some(Box::new(parent)),
        }
    }

    /// An environment holding only the standard constants
    pub fn standard() -> Self {
        let mut env = Environment::new();
        for (name, value) in STANDARD_CONSTANTS {
            env.define(name, *value);
        }
        env
    }

    pub fn define(&mut self, name: &str, value: f64) {
        self.bindings.insert(name.to_string(), value);
    }

    pub fn with_binding(mut self, name: &str, value: f64) -> Self {
        self.define(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.bindings
            .get(name)
            .copied()
            .or_else(|| self.parent.as_ref().and_then(|parent| parent.get(name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Evaluate an expression tree.
///
/// Evaluation is a pure recursive walk: nothing is cached and nothing is
/// mutated, so one tree can be evaluated repeatedly, or from several threads,
/// against different environments. Arithmetic follows IEEE-754 (`ln(0)` is
/// negative infinity, `sqrt(-1)` is NaN); the only error is a leaf name with
/// no binding in `env`.
pub fn evaluate(expr: &ExprNode, env: &Environment) -> Result<f64, Error> {
    evaluate_with(expr, &|name| env.get(name))
}

fn evaluate_with(expr: &ExprNode, lookup: &impl Fn(&str) -> Option<f64>) -> Result<f64, Error> {
    match expr {
        ExprNode::Leaf(Leaf::Number(n)) => Ok(*n),
        ExprNode::Leaf(Leaf::Variable(name)) | ExprNode::Leaf(Leaf::Constant(name)) => {
            lookup(name).ok_or_else(|| Error::UnboundName(name.clone()))
        }
        ExprNode::Unary { op, operand } => Ok(op.apply(evaluate_with(operand, lookup)?)),
        ExprNode::Binary { op, lhs, rhs } => {
            let a = evaluate_with(lhs, lookup)?;
            let b = evaluate_with(rhs, lookup)?;
            Ok(op.apply(a, b))
        }
    }
}

/// A tree viewed as a function of one variable, `f(x)`.
///
/// This is the contract numeric routines (interval search, golden section and
/// the like) consume. Every other name in the tree is checked against the
/// environment up front, so [`evaluate`](UnivariateFunction::evaluate) cannot fail.
#[derive(Debug, Clone)]
pub struct UnivariateFunction {
    tree: ExprNode,
    variable: String,
    env: Environment,
}

impl UnivariateFunction {
    pub fn new(tree: ExprNode, variable: &str, env: Environment) -> Result<Self, Error> {
        if let Some(unbound) = tree
            .names()
            .into_iter()
            .find(|name| *name != variable && !env.contains(name))
        {
            return Err(Error::UnboundName(unbound.to_string()));
        }
        Ok(UnivariateFunction {
            tree,
            variable: variable.to_string(),
            env,
        })
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn tree(&self) -> &ExprNode {
        &self.tree
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let lookup = |name: &str| {
            if name == self.variable {
                Some(x)
            } else {
                self.env.get(name)
            }
        };
        // every name was checked in `new`
        evaluate_with(&self.tree, &lookup).unwrap_or(f64::NAN)
    }
}
