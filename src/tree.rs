use std::fmt;

use crate::Error;
use crate::evaluator::{self, Environment};
use crate::functions::find_builtin_function;

/// Operand at the bottom of an expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    /// Looked up in the environment at evaluation time
    Variable(String),
    /// Named constant such as `pi`, also looked up in the environment
    Constant(String),
    Number(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Power => "^",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<BinaryOp> {
        match symbol {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Subtract),
            "*" => Some(BinaryOp::Multiply),
            "/" => Some(BinaryOp::Divide),
            "^" => Some(BinaryOp::Power),
            _ => None,
        }
    }

    /// IEEE-754 semantics throughout: `1/0` is infinity, `0/0` is NaN
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Subtract => a - b,
            BinaryOp::Multiply => a * b,
            BinaryOp::Divide => a / b,
            BinaryOp::Power => a.powf(b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Negate,
    Sin,
    Cos,
    Tan,
    /// Evaluates `atan(a)`, not `1 / tan(a)`.
    Cot,
    Sqrt,
    Exp,
    Ln,
}

impl UnaryOp {
    /// Operator symbol or function name used when displaying a tree
    pub fn name(self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Sin => "sin",
            UnaryOp::Cos => "cos",
            UnaryOp::Tan => "tg",
            UnaryOp::Cot => "ctg",
            UnaryOp::Sqrt => "sqrt",
            UnaryOp::Exp => "exp",
            UnaryOp::Ln => "ln",
        }
    }

    /// Operator for a builtin function call, e.g. `"sin"` -> [`UnaryOp::Sin`]
    pub fn from_function_name(name: &str) -> Option<UnaryOp> {
        find_builtin_function(name).map(|builtin| builtin.op)
    }

    /// Out-of-domain input yields NaN or infinity, never a panic
    pub fn apply(self, a: f64) -> f64 {
        match self {
            UnaryOp::Negate => -a,
            UnaryOp::Sin => a.sin(),
            UnaryOp::Cos => a.cos(),
            UnaryOp::Tan => a.tan(),
            UnaryOp::Cot => a.atan(),
            UnaryOp::Sqrt => a.sqrt(),
            UnaryOp::Exp => a.exp(),
            UnaryOp::Ln => a.ln(),
        }
    }
}

/// Immutable expression tree. Every child is exclusively owned by its parent.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprNode {
    Leaf(Leaf),
    Unary {
        op: UnaryOp,
        operand: Box<ExprNode>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<ExprNode>,
        rhs: Box<ExprNode>,
    },
}

impl ExprNode {
    pub fn variable(name: &str) -> Self {
        ExprNode::Leaf(Leaf::Variable(name.to_string()))
    }

    pub fn constant(name: &str) -> Self {
        ExprNode::Leaf(Leaf::Constant(name.to_string()))
    }

    pub fn number(value: f64) -> Self {
        ExprNode::Leaf(Leaf::Number(value))
    }

    pub fn unary(op: UnaryOp, operand: ExprNode) -> Self {
        ExprNode::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, lhs: ExprNode, rhs: ExprNode) -> Self {
        ExprNode::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Evaluate against `env`; see [`evaluator::evaluate`]
    pub fn evaluate(&self, env: &Environment) -> Result<f64, Error> {
        evaluator::evaluate(self, env)
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        match self {
            ExprNode::Leaf(_) => 1,
            ExprNode::Unary { operand, .. } => 1 + operand.depth(),
            ExprNode::Binary { lhs, rhs, .. } => 1 + lhs.depth().max(rhs.depth()),
        }
    }

    /// Distinct variable and constant names, in first-occurrence order
    pub fn names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            ExprNode::Leaf(Leaf::Variable(name)) | ExprNode::Leaf(Leaf::Constant(name)) => {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
            ExprNode::Leaf(Leaf::Number(_)) => {}
            ExprNode::Unary { operand, .. } => operand.collect_names(names),
            ExprNode::Binary { lhs, rhs, .. } => {
                lhs.collect_names(names);
                rhs.collect_names(names);
            }
        }
    }
}

impl fmt::Display for ExprNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprNode::Leaf(Leaf::Variable(name)) | ExprNode::Leaf(Leaf::Constant(name)) => {
                write!(f, "{}", name)
            }
            ExprNode::Leaf(Leaf::Number(n)) => write!(f, "{}", n),
            ExprNode::Unary {
                op: UnaryOp::Negate,
                operand,
            } => write!(f, "(-{})", operand),
            ExprNode::Unary { op, operand } => write!(f, "{}({})", op.name(), operand),
            ExprNode::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_symbols_round_trip() {
        for op in [
            BinaryOp::Add,
            BinaryOp::Subtract,
            BinaryOp::Multiply,
            BinaryOp::Divide,
            BinaryOp::Power,
        ] {
            assert_eq!(BinaryOp::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(BinaryOp::from_symbol("%"), None);
    }

    #[test]
    fn test_function_names() {
        assert_eq!(UnaryOp::from_function_name("sin"), Some(UnaryOp::Sin));
        assert_eq!(UnaryOp::from_function_name("tg"), Some(UnaryOp::Tan));
        assert_eq!(UnaryOp::from_function_name("ctg"), Some(UnaryOp::Cot));
        assert_eq!(UnaryOp::from_function_name("ln"), Some(UnaryOp::Ln));
        assert_eq!(UnaryOp::from_function_name("-"), None);
        assert_eq!(UnaryOp::from_function_name("max"), None);
    }

    #[test]
    fn test_cot_is_arctangent() {
        assert_eq!(UnaryOp::Cot.apply(1.0), 1.0f64.atan());
        assert_ne!(UnaryOp::Cot.apply(1.0), 1.0 / 1.0f64.tan());
    }

    #[test]
    fn test_domain_edges_do_not_panic() {
        assert_eq!(BinaryOp::Divide.apply(1.0, 0.0), f64::INFINITY);
        assert!(BinaryOp::Divide.apply(0.0, 0.0).is_nan());
        assert_eq!(UnaryOp::Ln.apply(0.0), f64::NEG_INFINITY);
        assert!(UnaryOp::Ln.apply(-1.0).is_nan());
        assert!(UnaryOp::Sqrt.apply(-4.0).is_nan());
        assert_eq!(BinaryOp::Power.apply(4.0, 0.5), 2.0);
        assert_eq!(BinaryOp::Power.apply(2.0, -1.0), 0.5);
    }

    #[test]
    fn test_display() {
        let tree = ExprNode::binary(
            BinaryOp::Multiply,
            ExprNode::unary(UnaryOp::Negate, ExprNode::variable("x")),
            ExprNode::unary(
                UnaryOp::Sin,
                ExprNode::binary(BinaryOp::Add, ExprNode::constant("pi"), ExprNode::number(0.5)),
            ),
        );
        assert_eq!(tree.to_string(), "((-x) * sin((pi + 0.5)))");
    }

    #[test]
    fn test_depth_and_names() {
        let tree = ExprNode::binary(
            BinaryOp::Add,
            ExprNode::variable("x"),
            ExprNode::unary(
                UnaryOp::Exp,
                ExprNode::binary(BinaryOp::Power, ExprNode::variable("x"), ExprNode::constant("e")),
            ),
        );
        assert_eq!(tree.depth(), 4);
        assert_eq!(tree.names(), vec!["x", "e"]);
        assert_eq!(ExprNode::number(3.0).depth(), 1);
        assert!(ExprNode::number(3.0).names().is_empty());
    }
}
