//! Expression tree definitions.

use std::collections::BTreeMap;

use exprcheck_core::types::Type;
use serde::{Deserialize, Serialize};

/// Source location span (byte offsets into [`Tree::source`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A parsed expression together with the source text it was parsed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub source: String,
    pub node: Node,
}

impl Tree {
    pub fn new(source: impl Into<String>, node: Node) -> Self {
        Self {
            source: source.into(),
            node,
        }
    }
}

/// A tree node: its kind, its location, and the type the checker inferred for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(default)]
    pub span: Span,
    /// Written by the checker on every visit; `None` until then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<Type>,
}

/// One variant per expression form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    Nil,
    Identifier {
        value: String,
    },
    Integer {
        value: i64,
    },
    Float {
        value: f64,
    },
    Bool {
        value: bool,
    },
    String {
        value: String,
    },
    /// A literal folded to a runtime value (e.g. by constant propagation).
    Constant {
        value: Value,
    },
    Unary {
        operator: String,
        node: Box<Node>,
    },
    Binary {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// `left matches right` (regular expression test).
    Matches {
        left: Box<Node>,
        right: Box<Node>,
    },
    /// `node.property` and `node[property]`. Field access uses a string literal property.
    Member {
        node: Box<Node>,
        property: Box<Node>,
    },
    Slice {
        node: Box<Node>,
        #[serde(default)]
        from: Option<Box<Node>>,
        #[serde(default)]
        to: Option<Box<Node>>,
    },
    Call {
        callee: Box<Node>,
        #[serde(default)]
        arguments: Vec<Node>,
        /// Set by the checker when the variadic tail can be passed as one `[]any`.
        #[serde(default)]
        fast: bool,
    },
    Builtin {
        name: String,
        #[serde(default)]
        arguments: Vec<Node>,
    },
    Closure {
        node: Box<Node>,
    },
    /// `#`: the element currently iterated by the enclosing builtin.
    Pointer,
    Conditional {
        cond: Box<Node>,
        exp1: Box<Node>,
        exp2: Box<Node>,
    },
    Array {
        #[serde(default)]
        nodes: Vec<Node>,
    },
    Map {
        #[serde(default)]
        pairs: Vec<Node>,
    },
    Pair {
        key: Box<Node>,
        value: Box<Node>,
    },
}

/// A runtime value embedded in a [`NodeKind::Constant`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// The type of this value as the runtime would report it.
    pub fn type_of(&self) -> Type {
        match self {
            Value::Nil => Type::Nil,
            Value::Bool(_) => Type::Bool,
            Value::Int(_) => Type::Int,
            Value::Float(_) => Type::Float,
            Value::String(_) => Type::String,
            Value::Array(_) => Type::any_array(),
            Value::Map(_) => Type::any_map(),
        }
    }
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            span: Span::default(),
            ty: None,
        }
    }

    pub fn with_span(mut self, start: usize, end: usize) -> Self {
        self.span = Span::new(start, end);
        self
    }

    pub fn nil() -> Self {
        Self::new(NodeKind::Nil)
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Identifier { value: name.into() })
    }

    pub fn integer(value: i64) -> Self {
        Self::new(NodeKind::Integer { value })
    }

    pub fn float(value: f64) -> Self {
        Self::new(NodeKind::Float { value })
    }

    pub fn bool(value: bool) -> Self {
        Self::new(NodeKind::Bool { value })
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(NodeKind::String { value: value.into() })
    }

    pub fn constant(value: Value) -> Self {
        Self::new(NodeKind::Constant { value })
    }

    pub fn unary(operator: impl Into<String>, node: Node) -> Self {
        Self::new(NodeKind::Unary {
            operator: operator.into(),
            node: Box::new(node),
        })
    }

    pub fn binary(operator: impl Into<String>, left: Node, right: Node) -> Self {
        Self::new(NodeKind::Binary {
            operator: operator.into(),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn matches(left: Node, right: Node) -> Self {
        Self::new(NodeKind::Matches {
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// `node.name`: member access with a string literal property.
    pub fn field(node: Node, name: impl Into<String>) -> Self {
        Self::member(node, Node::string(name))
    }

    pub fn member(node: Node, property: Node) -> Self {
        Self::new(NodeKind::Member {
            node: Box::new(node),
            property: Box::new(property),
        })
    }

    pub fn slice(node: Node, from: Option<Node>, to: Option<Node>) -> Self {
        Self::new(NodeKind::Slice {
            node: Box::new(node),
            from: from.map(Box::new),
            to: to.map(Box::new),
        })
    }

    pub fn call(callee: Node, arguments: Vec<Node>) -> Self {
        Self::new(NodeKind::Call {
            callee: Box::new(callee),
            arguments,
            fast: false,
        })
    }

    pub fn builtin(name: impl Into<String>, arguments: Vec<Node>) -> Self {
        Self::new(NodeKind::Builtin {
            name: name.into(),
            arguments,
        })
    }

    pub fn closure(body: Node) -> Self {
        Self::new(NodeKind::Closure { node: Box::new(body) })
    }

    pub fn pointer() -> Self {
        Self::new(NodeKind::Pointer)
    }

    pub fn conditional(cond: Node, exp1: Node, exp2: Node) -> Self {
        Self::new(NodeKind::Conditional {
            cond: Box::new(cond),
            exp1: Box::new(exp1),
            exp2: Box::new(exp2),
        })
    }

    pub fn array(nodes: Vec<Node>) -> Self {
        Self::new(NodeKind::Array { nodes })
    }

    /// A map literal from `(key, value)` pairs.
    pub fn map(pairs: Vec<(Node, Node)>) -> Self {
        Self::new(NodeKind::Map {
            pairs: pairs.into_iter().map(|(k, v)| Node::pair(k, v)).collect(),
        })
    }

    pub fn pair(key: Node, value: Node) -> Self {
        Self::new(NodeKind::Pair {
            key: Box::new(key),
            value: Box::new(value),
        })
    }

    /// Whether this is a call site marked for the fast variadic calling convention.
    pub fn is_fast_call(&self) -> bool {
        matches!(self.kind, NodeKind::Call { fast: true, .. })
    }

    /// Direct children in visiting order.
    pub fn children(&self) -> Vec<&Node> {
        match &self.kind {
            NodeKind::Nil
            | NodeKind::Identifier { .. }
            | NodeKind::Integer { .. }
            | NodeKind::Float { .. }
            | NodeKind::Bool { .. }
            | NodeKind::String { .. }
            | NodeKind::Constant { .. }
            | NodeKind::Pointer => Vec::new(),
            NodeKind::Unary { node, .. } | NodeKind::Closure { node } => vec![node],
            NodeKind::Binary { left, right, .. } | NodeKind::Matches { left, right } => vec![left, right],
            NodeKind::Member { node, property } => vec![node, property],
            NodeKind::Slice { node, from, to } => {
                let mut out: Vec<&Node> = vec![node];
                out.extend(from.as_deref());
                out.extend(to.as_deref());
                out
            }
            NodeKind::Call { callee, arguments, .. } => {
                let mut out: Vec<&Node> = vec![callee];
                out.extend(arguments.iter());
                out
            }
            NodeKind::Builtin { arguments, .. } => arguments.iter().collect(),
            NodeKind::Conditional { cond, exp1, exp2 } => vec![cond, exp1, exp2],
            NodeKind::Array { nodes } => nodes.iter().collect(),
            NodeKind::Map { pairs } => pairs.iter().collect(),
            NodeKind::Pair { key, value } => vec![key, value],
        }
    }

    /// Visit this node and every descendant in pre-order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_is_preorder() {
        let node = Node::binary("+", Node::integer(1), Node::unary("-", Node::integer(2)));
        let mut kinds = Vec::new();
        node.walk(&mut |n| {
            kinds.push(match &n.kind {
                NodeKind::Binary { .. } => "binary",
                NodeKind::Unary { .. } => "unary",
                NodeKind::Integer { .. } => "integer",
                _ => "other",
            })
        });
        assert_eq!(kinds, ["binary", "integer", "unary", "integer"]);
    }

    #[test]
    fn test_node_json_shape() {
        let json = r#"{
            "kind": "binary",
            "operator": "+",
            "left": {"kind": "integer", "value": 1, "span": {"start": 0, "end": 1}},
            "right": {"kind": "constant", "value": [1, "a"]},
            "span": {"start": 0, "end": 5}
        }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        let NodeKind::Binary { operator, left, right } = &node.kind else {
            panic!("expected binary node, got {:?}", node.kind);
        };
        assert_eq!(operator, "+");
        assert_eq!(left.kind, NodeKind::Integer { value: 1 });
        assert_eq!(left.span, Span::new(0, 1));
        assert_eq!(
            right.kind,
            NodeKind::Constant {
                value: Value::Array(vec![Value::Int(1), Value::String("a".into())])
            }
        );
        assert_eq!(node.ty, None);
    }

    #[test]
    fn test_value_type_of() {
        assert_eq!(Value::Int(3).type_of(), Type::Int);
        assert_eq!(Value::Nil.type_of(), Type::Nil);
        assert_eq!(Value::Map(BTreeMap::new()).type_of(), Type::any_map());
    }
}
