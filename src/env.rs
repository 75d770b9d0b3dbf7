//! Evaluation environment description.
//!
//! The checker never inspects runtime values: everything it knows about the names an expression may reference comes
//! from a [`Config`]. A config is built once (programmatically, from an environment struct descriptor, or from JSON)
//! and then only read, so one config can back any number of concurrent checks.
//!
//! ## Examples
//! ```rust
//! use exprcheck::env::Config;
//! use exprcheck_core::types::{FunctionSignature, Type};
//!
//! let config = Config::new()
//!     .with_variable("price", Type::Float)
//!     .with_function("round", FunctionSignature::new(vec![Type::Float], vec![Type::Int]))
//!     .with_strict(true);
//! assert!(config.binding("price").is_some());
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use exprcheck_core::lang::operators;
use exprcheck_core::types::{FunctionSignature, StructType, Type, TypeCategory};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the environment says about one name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    #[serde(rename = "type", default = "dynamic")]
    pub ty: Type,
    /// The name is a method of the environment: calls supply the receiver implicitly.
    #[serde(default)]
    pub method: bool,
    /// The name is promoted from more than one embedded source and cannot be resolved.
    #[serde(default)]
    pub ambiguous: bool,
}

fn dynamic() -> Type {
    Type::Dynamic
}

impl Binding {
    pub fn new(ty: Type) -> Self {
        Self {
            ty,
            method: false,
            ambiguous: false,
        }
    }

    pub fn method(signature: FunctionSignature) -> Self {
        Self {
            ty: Type::function(signature),
            method: true,
            ambiguous: false,
        }
    }

    pub fn ambiguous() -> Self {
        Self {
            ty: Type::Dynamic,
            method: false,
            ambiguous: true,
        }
    }
}

/// Checker configuration: the environment registry plus checking policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Known names. `None` means "no registry": every identifier is dynamic.
    pub types: Option<HashMap<String, Binding>>,
    /// Unknown names are errors instead of falling back to [`Config::default_type`].
    pub strict: bool,
    /// Type given to unknown names when not strict (dynamic when unset).
    pub default_type: Option<Type>,
    /// Operator spelling -> candidate overload function names, tried in order.
    pub operators: HashMap<String, Vec<String>>,
    /// Required category of the whole expression.
    pub expect: Option<TypeCategory>,
}

/// An operator overload selected for a pair of operand types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverloadMatch {
    /// Name of the function implementing the operator.
    pub name: String,
    pub result: Type,
}

/// Errors raised while loading or validating a [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid environment description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot read environment file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid overload {function} for operator {operator}: {reason}")]
    InvalidOverload {
        operator: String,
        function: String,
        reason: String,
    },
}

impl Config {
    /// Create a config with no registry (every identifier is dynamic).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a strict config from the struct describing the evaluation environment.
    ///
    /// ## Notes
    /// - Members of embedded structs are promoted. A name promoted from two different embedded structs is
    ///   ambiguous; the embedded struct itself is also reachable under its own name.
    /// - Direct fields shadow promoted ones, and methods (own, then promoted) are registered as receiver-bound.
    pub fn from_env_struct(env: &StructType) -> Self {
        let mut config = Self::new().with_strict(true);
        config.types = Some(fields_from_struct(env));
        for (name, signature) in methods_from_struct(env) {
            config = config.with_method(name, signature);
        }
        config
    }

    /// Parse a config from its JSON description and validate its operator table.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Register a name.
    pub fn with_binding(mut self, name: impl Into<String>, binding: Binding) -> Self {
        self.types.get_or_insert_with(HashMap::new).insert(name.into(), binding);
        self
    }

    pub fn with_variable(self, name: impl Into<String>, ty: Type) -> Self {
        self.with_binding(name, Binding::new(ty))
    }

    pub fn with_function(self, name: impl Into<String>, signature: FunctionSignature) -> Self {
        self.with_binding(name, Binding::new(Type::function(signature)))
    }

    /// Register a receiver-bound method (the signature's first input is the receiver).
    pub fn with_method(self, name: impl Into<String>, signature: FunctionSignature) -> Self {
        self.with_binding(name, Binding::method(signature))
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_default_type(mut self, ty: Type) -> Self {
        self.default_type = Some(ty);
        self
    }

    /// Append an overload function (already registered by name) for an operator.
    pub fn with_operator(mut self, operator: impl Into<String>, function: impl Into<String>) -> Self {
        self.operators.entry(operator.into()).or_default().push(function.into());
        self
    }

    pub fn with_expect(mut self, category: TypeCategory) -> Self {
        self.expect = Some(category);
        self
    }

    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.types.as_ref()?.get(name)
    }

    /// Check that every overload names a registered binary operator and a function taking two operands.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (operator, functions) in &self.operators {
            let invalid = |function: &str, reason: &str| ConfigError::InvalidOverload {
                operator: operator.clone(),
                function: function.to_string(),
                reason: reason.to_string(),
            };
            for function in functions {
                if operators::infix_from_str(operator).is_none() {
                    return Err(invalid(function, "not a binary operator"));
                }
                let Some(binding) = self.binding(function) else {
                    return Err(invalid(function, "function is not defined"));
                };
                let Type::Function(signature) = &binding.ty else {
                    return Err(invalid(function, "not a function"));
                };
                if operand_params(signature, binding.method).is_none() {
                    return Err(invalid(function, "must take exactly two operands"));
                }
                if signature.outputs.is_empty() {
                    return Err(invalid(function, "must return a value"));
                }
            }
        }
        Ok(())
    }

    /// Find the first overload of `operator` whose parameters accept the operand types.
    ///
    /// An operand fits a parameter when the types are identical, or when the parameter is dynamic and the operand
    /// is `nil` or implements it.
    pub fn find_operator_overload(&self, operator: &str, lhs: &Type, rhs: &Type) -> Option<OverloadMatch> {
        let candidates = self.operators.get(operator)?;
        candidates.iter().find_map(|name| {
            let binding = self.binding(name)?;
            let Type::Function(signature) = &binding.ty else {
                return None;
            };
            let [first, second] = operand_params(signature, binding.method)?;
            let result = signature.outputs.first()?;
            (operand_fits(lhs, first) && operand_fits(rhs, second)).then(|| OverloadMatch {
                name: name.clone(),
                result: result.clone(),
            })
        })
    }
}

fn operand_params(signature: &FunctionSignature, method: bool) -> Option<[&Type; 2]> {
    let receiver = usize::from(method);
    match signature.params.get(receiver..)? {
        [first, second] => Some([first, second]),
        _ => None,
    }
}

fn operand_fits(operand: &Type, param: &Type) -> bool {
    operand == param || (param.is_dynamic() && (operand.is_nil() || operand.assignable_to(param)))
}

fn fields_from_struct(descriptor: &StructType) -> HashMap<String, Binding> {
    let mut types = HashMap::new();
    for inner in &descriptor.embedded {
        for (name, binding) in fields_from_struct(inner) {
            if types.contains_key(&name) {
                types.insert(name, Binding::ambiguous());
            } else {
                types.insert(name, binding);
            }
        }
        types.insert(inner.name.clone(), Binding::new(Type::structure(inner.clone())));
    }
    for (name, ty) in &descriptor.fields {
        types.insert(name.clone(), Binding::new(ty.clone()));
    }
    types
}

fn methods_from_struct(descriptor: &StructType) -> Vec<(String, FunctionSignature)> {
    let mut methods: Vec<(String, FunctionSignature)> = descriptor
        .embedded
        .iter()
        .flat_map(methods_from_struct)
        .filter(|(name, _)| !descriptor.methods.contains_key(name))
        .collect();
    methods.extend(descriptor.methods.iter().map(|(name, sig)| (name.clone(), sig.clone())));
    methods
}
