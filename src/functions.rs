//! Function registry and arity configuration.
//!
//! The scanner needs to know how many arguments every function takes. That
//! knowledge lives in a [`FunctionArityTable`], a plain configuration value
//! handed to [`GrammarScanner::new`](crate::GrammarScanner::new), so scanners for
//! different expression dialects can coexist.
//!
//! ## Builtin functions
//!
//! | name   | arity | operator            |
//! |--------|-------|---------------------|
//! | `sin`  | 1     | [`UnaryOp::Sin`]    |
//! | `cos`  | 1     | [`UnaryOp::Cos`]    |
//! | `tg`   | 1     | [`UnaryOp::Tan`]    |
//! | `ctg`  | 1     | [`UnaryOp::Cot`]    |
//! | `sqrt` | 1     | [`UnaryOp::Sqrt`]   |
//! | `exp`  | 1     | [`UnaryOp::Exp`]    |
//! | `ln`   | 1     | [`UnaryOp::Ln`]     |
//!
//! ## Loading a dialect from JSON
//!
//! With the `json` feature a table can be read from a JSON object mapping names to
//! argument counts:
//!
//! ```json
//! {"sin": 1, "max": 2, "clamp": 3}
//! ```
//!
//! Every arity must be a positive integer.

use std::collections::HashMap;
use std::sync::LazyLock;

use log::debug;

use crate::tree::UnaryOp;
use crate::{ArityMismatchKind, Error, SyntaxError};

/// Definition of a builtin function
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinFunction {
    pub name: &'static str,
    pub arity: usize,
    /// Tree operator a builder should emit for a call of this function
    pub op: UnaryOp,
}

static BUILTIN_FUNCTIONS: &[BuiltinFunction] = &[
    BuiltinFunction {
        name: "sin",
        arity: 1,
        op: UnaryOp::Sin,
    },
    BuiltinFunction {
        name: "cos",
        arity: 1,
        op: UnaryOp::Cos,
    },
    BuiltinFunction {
        name: "tg",
        arity: 1,
        op: UnaryOp::Tan,
    },
    BuiltinFunction {
        name: "ctg",
        arity: 1,
        op: UnaryOp::Cot,
    },
    BuiltinFunction {
        name: "sqrt",
        arity: 1,
        op: UnaryOp::Sqrt,
    },
    BuiltinFunction {
        name: "exp",
        arity: 1,
        op: UnaryOp::Exp,
    },
    BuiltinFunction {
        name: "ln",
        arity: 1,
        op: UnaryOp::Ln,
    },
];

static BUILTIN_BY_NAME: LazyLock<HashMap<&'static str, &'static BuiltinFunction>> =
    LazyLock::new(|| BUILTIN_FUNCTIONS.iter().map(|f| (f.name, f)).collect());

pub fn get_builtin_functions() -> &'static [BuiltinFunction] {
    BUILTIN_FUNCTIONS
}

pub fn find_builtin_function(name: &str) -> Option<&'static BuiltinFunction> {
    BUILTIN_BY_NAME.get(name).copied()
}

/// Compare the arguments a call actually received against the required count
pub fn check_arity(function: &str, expected: usize, actual: usize) -> Result<(), SyntaxError> {
    if expected == actual {
        return Ok(());
    }
    Err(SyntaxError::ArityMismatch {
        function: function.to_string(),
        expected,
        actual,
        kind: if actual < expected {
            ArityMismatchKind::TooFew
        } else {
            ArityMismatchKind::TooMany
        },
    })
}

/// Mapping from function name to its required number of arguments (at least 1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionArityTable {
    arities: HashMap<String, usize>,
}

impl Default for FunctionArityTable {
    /// The builtin functions
    fn default() -> Self {
        FunctionArityTable {
            arities: BUILTIN_FUNCTIONS
                .iter()
                .map(|f| (f.name.to_string(), f.arity))
                .collect(),
        }
    }
}

impl FunctionArityTable {
    /// A table with no functions at all
    pub fn empty() -> Self {
        FunctionArityTable {
            arities: HashMap::new(),
        }
    }

    /// Register `name`, replacing any previous arity
    pub fn insert(&mut self, name: impl Into<String>, arity: usize) -> Result<(), Error> {
        let name = name.into();
        if arity == 0 {
            return Err(Error::Config(format!(
                "function '{}' must take at least one argument",
                name
            )));
        }
        if name.is_empty() {
            return Err(Error::Config("function name must not be empty".to_string()));
        }
        self.arities.insert(name, arity);
        Ok(())
    }

    pub fn with_function(mut self, name: impl Into<String>, arity: usize) -> Result<Self, Error> {
        self.insert(name, arity)?;
        Ok(self)
    }

    /// Add every entry of `other`, overriding arities already present
    pub fn merge(&mut self, other: FunctionArityTable) {
        self.arities.extend(other.arities);
    }

    pub fn arity(&self, name: &str) -> Option<usize> {
        self.arities.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.arities.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.arities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arities.is_empty()
    }

    /// Function names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.arities.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Parse a JSON object of `name -> arity` entries into a new table
    #[cfg(feature = "json")]
    pub fn from_json(input: &str) -> Result<Self, Error> {
        let json: serde_json::Value = serde_json::from_str(input)
            .map_err(|e| Error::Config(format!("invalid JSON: {}", e)))?;

        let serde_json::Value::Object(entries) = json else {
            return Err(Error::Config(
                "function table must be a JSON object".to_string(),
            ));
        };

        let mut table = FunctionArityTable::empty();
        for (name, arity) in entries {
            let arity = arity
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| {
                    Error::Config(format!(
                        "arity of '{}' must be a positive integer, got {}",
                        name, arity
                    ))
                })?;
            table.insert(name, arity)?;
        }

        debug!("loaded {} function arities from JSON", table.len());
        Ok(table)
    }
}
