//! Type descriptors for checked expressions.
//!
//! Every checked node carries exactly one [`Type`]. Types form a closed vocabulary of categories (see
//! [`TypeCategory`]) plus the structural payloads of arrays, maps, structs, functions and interfaces.
//!
//! ## Notes
//!
//! - [`Type::Dynamic`] is the "unknown/unconstrained" type. Every `is_*` predicate accepts it, so a dynamic
//!   operand never produces a diagnostic on its own.
//! - [`Type::Interface`] is a *named* dynamic type with a method set (e.g. the canonical `error` type). Its
//!   category is [`TypeCategory::Dynamic`].
//! - Struct and interface descriptors are precomputed when the environment is built and shared behind [`Arc`],
//!   so member lookups never re-derive them.
//!
//! ## Examples
//! ```rust
//! use exprcheck_core::types::{combined, Type};
//!
//! assert_eq!(combined(&Type::Int, &Type::Float), Type::Float);
//! assert_eq!(Type::array(Type::Int).to_string(), "[]int");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{NumericTy, widen};

/// A type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    /// The type of `nil`; also "no information" for argument checks and conditionals.
    Nil,
    Bool,
    Int,
    Float,
    String,
    Duration,
    Time,
    Array(Box<Type>),
    Map(Box<Type>, Box<Type>),
    Struct(Arc<StructType>),
    Function(Arc<FunctionSignature>),
    Interface(Arc<InterfaceType>),
    #[serde(rename = "any", alias = "dynamic")]
    Dynamic,
}

impl Type {
    /// Construct an array type.
    pub fn array(elem: Type) -> Type {
        Type::Array(Box::new(elem))
    }

    /// Construct a map type.
    pub fn map(key: Type, value: Type) -> Type {
        Type::Map(Box::new(key), Box::new(value))
    }

    /// Construct a function type.
    pub fn function(signature: FunctionSignature) -> Type {
        Type::Function(Arc::new(signature))
    }

    /// Construct a struct type.
    pub fn structure(descriptor: StructType) -> Type {
        Type::Struct(Arc::new(descriptor))
    }

    /// The generic array literal type (`[]any`).
    pub fn any_array() -> Type {
        Type::array(Type::Dynamic)
    }

    /// The generic map literal type (`map[string]any`).
    pub fn any_map() -> Type {
        Type::map(Type::String, Type::Dynamic)
    }

    /// The canonical `error` interface, allowed as the second output of a function.
    pub fn error() -> Type {
        Type::Interface(Arc::new(
            InterfaceType::new("error").with_method("Error", FunctionSignature::new(vec![], vec![Type::String])),
        ))
    }

    pub fn category(&self) -> TypeCategory {
        match self {
            Type::Nil => TypeCategory::Nil,
            Type::Bool => TypeCategory::Bool,
            Type::Int => TypeCategory::Int,
            Type::Float => TypeCategory::Float,
            Type::String => TypeCategory::String,
            Type::Duration => TypeCategory::Duration,
            Type::Time => TypeCategory::Time,
            Type::Array(_) => TypeCategory::Array,
            Type::Map(..) => TypeCategory::Map,
            Type::Struct(_) => TypeCategory::Struct,
            Type::Function(_) => TypeCategory::Function,
            Type::Interface(_) | Type::Dynamic => TypeCategory::Dynamic,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Type::Dynamic | Type::Interface(_))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Type::Nil)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Type::Int) || self.is_dynamic()
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Type::Float) || self.is_dynamic()
    }

    pub fn is_number(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Type::Bool) || self.is_dynamic()
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Type::String) || self.is_dynamic()
    }

    pub fn is_time(&self) -> bool {
        matches!(self, Type::Time) || self.is_dynamic()
    }

    pub fn is_duration(&self) -> bool {
        matches!(self, Type::Duration) || self.is_dynamic()
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(_)) || self.is_dynamic()
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Type::Map(..)) || self.is_dynamic()
    }

    pub fn is_struct(&self) -> bool {
        matches!(self, Type::Struct(_)) || self.is_dynamic()
    }

    pub fn is_func(&self) -> bool {
        matches!(self, Type::Function(_)) || self.is_dynamic()
    }

    /// Numeric category of a concrete `int`/`float` type. Dynamic types have none.
    pub fn numeric_ty(&self) -> Option<NumericTy> {
        match self {
            Type::Int => Some(NumericTy::Int),
            Type::Float => Some(NumericTy::Float),
            _ => None,
        }
    }

    /// Look up a method exposed by this type.
    ///
    /// Struct methods include their receiver as the first input; interface methods do not.
    pub fn method(&self, name: &str) -> Option<&FunctionSignature> {
        match self {
            Type::Struct(s) => s.method(name),
            Type::Interface(i) => i.methods.get(name),
            _ => None,
        }
    }

    /// Check whether a value of this type can be used where `target` is expected.
    ///
    /// ## Notes
    /// - Anything is assignable to [`Type::Dynamic`].
    /// - A type is assignable to an interface when it exposes every method the interface names.
    /// - `nil` is assignable to arrays, maps and functions.
    pub fn assignable_to(&self, target: &Type) -> bool {
        if self == target {
            return true;
        }
        match (self, target) {
            (_, Type::Dynamic) => true,
            (_, Type::Interface(iface)) => iface.methods.keys().all(|name| self.method(name).is_some()),
            (Type::Nil, Type::Array(_) | Type::Map(..) | Type::Function(_)) => true,
            _ => false,
        }
    }
}

impl From<NumericTy> for Type {
    fn from(ty: NumericTy) -> Self {
        match ty {
            NumericTy::Int => Type::Int,
            NumericTy::Float => Type::Float,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Nil => write!(f, "nil"),
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::String => write!(f, "string"),
            Type::Duration => write!(f, "duration"),
            Type::Time => write!(f, "time"),
            Type::Array(elem) => write!(f, "[]{}", elem),
            Type::Map(key, value) => write!(f, "map[{}]{}", key, value),
            Type::Struct(s) => write!(f, "{}", s.name),
            Type::Function(sig) => write!(f, "{}", sig),
            Type::Interface(i) => write!(f, "{}", i.name),
            Type::Dynamic => write!(f, "any"),
        }
    }
}

/// Combine two numeric operand types into the arithmetic result type.
///
/// ## Notes
/// - Operands of the same category keep that type.
/// - A dynamic operand makes the result dynamic: the runtime decides.
/// - Otherwise `int` and `float` widen to `float` (see [`widen`]).
pub fn combined(lhs: &Type, rhs: &Type) -> Type {
    if lhs.category() == rhs.category() {
        return lhs.clone();
    }
    if lhs.is_dynamic() || rhs.is_dynamic() {
        return Type::Dynamic;
    }
    match (lhs.numeric_ty(), rhs.numeric_ty()) {
        (Some(l), Some(r)) => widen(l, r).into(),
        _ if matches!(lhs, Type::Float) || matches!(rhs, Type::Float) => Type::Float,
        _ => Type::Int,
    }
}

/// Check whether two operand types may be compared with `==`/`!=`.
///
/// Anything compares with `nil`, types of one category compare with each other, and dynamic types compare with
/// everything.
pub fn comparable(lhs: &Type, rhs: &Type) -> bool {
    lhs.is_nil() || rhs.is_nil() || lhs.category() == rhs.category() || lhs.is_dynamic() || rhs.is_dynamic()
}

/// A struct descriptor: fields, methods and embedded structs whose members are promoted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructType {
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Type>,
    /// Methods keyed by name; each signature's first input is the receiver.
    #[serde(default)]
    pub methods: BTreeMap<String, FunctionSignature>,
    /// Embedded structs, in declaration order.
    #[serde(default)]
    pub embedded: Vec<StructType>,
}

impl StructType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, ty: Type) -> Self {
        self.fields.insert(name.into(), ty);
        self
    }

    pub fn with_method(mut self, name: impl Into<String>, signature: FunctionSignature) -> Self {
        self.methods.insert(name.into(), signature);
        self
    }

    pub fn with_embedded(mut self, inner: StructType) -> Self {
        self.embedded.push(inner);
        self
    }

    /// Look up a field, then the fields promoted from embedded structs (in declaration order, depth-first).
    pub fn field(&self, name: &str) -> Option<&Type> {
        self.fields
            .get(name)
            .or_else(|| self.embedded.iter().find_map(|inner| inner.field(name)))
    }

    /// Look up a method, then the methods promoted from embedded structs.
    pub fn method(&self, name: &str) -> Option<&FunctionSignature> {
        self.methods
            .get(name)
            .or_else(|| self.embedded.iter().find_map(|inner| inner.method(name)))
    }
}

/// A named dynamic type with a method set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceType {
    pub name: String,
    /// Methods keyed by name; signatures carry no receiver.
    #[serde(default)]
    pub methods: BTreeMap<String, FunctionSignature>,
}

impl InterfaceType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: BTreeMap::new(),
        }
    }

    pub fn with_method(mut self, name: impl Into<String>, signature: FunctionSignature) -> Self {
        self.methods.insert(name.into(), signature);
        self
    }
}

/// A function signature.
///
/// ## Notes
/// - When `variadic` is set, the last entry of `params` is the *element* type of the variadic tail.
/// - A second output, if present, is expected to be [`Type::error`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    #[serde(default)]
    pub params: Vec<Type>,
    #[serde(default)]
    pub outputs: Vec<Type>,
    #[serde(default)]
    pub variadic: bool,
}

impl FunctionSignature {
    pub fn new(params: Vec<Type>, outputs: Vec<Type>) -> Self {
        Self {
            params,
            outputs,
            variadic: false,
        }
    }

    /// Mark the last parameter as a variadic tail.
    pub fn with_variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "func(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if self.variadic && i + 1 == self.params.len() {
                write!(f, "...")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ")")?;
        match self.outputs.as_slice() {
            [] => Ok(()),
            [single] => write!(f, " {}", single),
            outputs => {
                write!(f, " (")?;
                for (i, out) in outputs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", out)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// The closed set of type categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeCategory {
    Nil,
    Bool,
    #[serde(alias = "integer")]
    Int,
    Float,
    String,
    Duration,
    Time,
    Array,
    Map,
    Struct,
    #[serde(rename = "func", alias = "function")]
    Function,
    #[serde(rename = "any", alias = "dynamic")]
    Dynamic,
}

impl TypeCategory {
    pub const ALL: &'static [TypeCategory] = &[
        TypeCategory::Nil,
        TypeCategory::Bool,
        TypeCategory::Int,
        TypeCategory::Float,
        TypeCategory::String,
        TypeCategory::Duration,
        TypeCategory::Time,
        TypeCategory::Array,
        TypeCategory::Map,
        TypeCategory::Struct,
        TypeCategory::Function,
        TypeCategory::Dynamic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TypeCategory::Nil => "nil",
            TypeCategory::Bool => "bool",
            TypeCategory::Int => "int",
            TypeCategory::Float => "float",
            TypeCategory::String => "string",
            TypeCategory::Duration => "duration",
            TypeCategory::Time => "time",
            TypeCategory::Array => "array",
            TypeCategory::Map => "map",
            TypeCategory::Struct => "struct",
            TypeCategory::Function => "func",
            TypeCategory::Dynamic => "any",
        }
    }

    /// `int` and `float` expectations accept either numeric category.
    pub fn is_numeric(self) -> bool {
        matches!(self, TypeCategory::Int | TypeCategory::Float)
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`TypeCategory`] spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown type category '{}'", self.0)
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for TypeCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let aliased = match s {
            "integer" => "int",
            "function" => "func",
            "dynamic" => "any",
            other => other,
        };
        TypeCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == aliased)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}
