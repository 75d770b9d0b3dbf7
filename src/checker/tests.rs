//! Checker unit tests.

use super::*;
use exprcheck_core::types::{FunctionSignature, StructType};
use exprcheck_syntax::ast::{Node, NodeKind, Value};

fn user() -> StructType {
    StructType::new("User")
        .with_field("Name", Type::String)
        .with_field("Age", Type::Int)
        .with_method(
            "Greet",
            FunctionSignature::new(vec![Type::Dynamic, Type::String], vec![Type::String]),
        )
}

fn env() -> Config {
    Config::new()
        .with_strict(true)
        .with_variable("items", Type::array(Type::Int))
        .with_variable("tags", Type::map(Type::String, Type::Int))
        .with_variable("user", Type::structure(user()))
        .with_variable("name", Type::String)
        .with_variable("price", Type::Float)
        .with_variable("count", Type::Int)
        .with_variable("flag", Type::Bool)
        .with_variable("now", Type::Time)
        .with_variable("ttl", Type::Duration)
        .with_variable("anything", Type::Dynamic)
        .with_variable("err", Type::error())
        .with_function("add", FunctionSignature::new(vec![Type::Int, Type::Int], vec![Type::Int]))
        .with_function("scale", FunctionSignature::new(vec![Type::Float], vec![Type::Float]))
        .with_function(
            "sprintf",
            FunctionSignature::new(vec![Type::String, Type::Dynamic], vec![Type::String]).with_variadic(),
        )
        .with_function(
            "log",
            FunctionSignature::new(vec![Type::Dynamic], vec![Type::Dynamic, Type::error()]).with_variadic(),
        )
        .with_function("fail", FunctionSignature::new(vec![], vec![]))
        .with_function(
            "triple",
            FunctionSignature::new(vec![], vec![Type::Int, Type::Int, Type::Int]),
        )
        .with_method("Now", FunctionSignature::new(vec![Type::Dynamic], vec![Type::Time]))
}

fn run(config: &Config, node: Node) -> (Result<Type, CheckError>, Node) {
    let mut tree = Tree::new("", node);
    let result = check(&mut tree, config);
    (result, tree.node)
}

fn infer(node: Node) -> Type {
    match run(&env(), node).0 {
        Ok(ty) => ty,
        Err(err) => panic!("expected the expression to check, got: {err}"),
    }
}

fn error_message(node: Node) -> String {
    match run(&env(), node).0 {
        Err(CheckError::Type(err)) => err.message,
        other => panic!("expected a type error, got: {other:?}"),
    }
}

fn ident(name: &str) -> Node {
    Node::identifier(name)
}

fn predicate(body: Node) -> Node {
    Node::closure(body)
}

// ========================================
// Literals and identifiers
// ========================================

#[test]
fn test_literals() {
    assert_eq!(infer(Node::nil()), Type::Nil);
    assert_eq!(infer(Node::integer(1)), Type::Int);
    assert_eq!(infer(Node::float(1.5)), Type::Float);
    assert_eq!(infer(Node::bool(true)), Type::Bool);
    assert_eq!(infer(Node::string("a")), Type::String);
    assert_eq!(infer(Node::constant(Value::Float(2.0))), Type::Float);
    assert_eq!(infer(Node::constant(Value::Array(vec![]))), Type::any_array());
}

#[test]
fn test_identifier_resolution() {
    assert_eq!(infer(ident("price")), Type::Float);
    assert_eq!(error_message(ident("missing")), "unknown name missing");
}

#[test]
fn test_identifier_without_registry_is_dynamic() {
    let (result, _) = run(&Config::new(), ident("whatever"));
    assert_eq!(result, Ok(Type::Dynamic));
}

#[test]
fn test_identifier_non_strict_fallback() {
    let loose = Config::new().with_variable("x", Type::Int);
    assert_eq!(run(&loose, ident("y")).0, Ok(Type::Dynamic));

    let defaulted = loose.with_default_type(Type::String);
    assert_eq!(run(&defaulted, ident("y")).0, Ok(Type::String));
}

#[test]
fn test_identifier_ambiguous() {
    let config = Config::new().with_binding("id", crate::env::Binding::ambiguous());
    match run(&config, ident("id")).0 {
        Err(CheckError::Type(err)) => assert_eq!(err.message, "ambiguous identifier id"),
        other => panic!("expected ambiguity error, got {other:?}"),
    }
}

// ========================================
// Operators
// ========================================

#[test]
fn test_binary_arithmetic_widening() {
    assert_eq!(infer(Node::binary("+", Node::integer(1), Node::integer(2))), Type::Int);
    assert_eq!(infer(Node::binary("*", ident("count"), ident("price"))), Type::Float);
    assert_eq!(infer(Node::binary("**", Node::integer(2), Node::integer(3))), Type::Float);
    assert_eq!(infer(Node::binary("%", Node::integer(7), Node::integer(2))), Type::Int);
    assert_eq!(infer(Node::binary("+", ident("anything"), Node::integer(2))), Type::Dynamic);
}

#[test]
fn test_binary_mismatch_message() {
    assert_eq!(
        error_message(Node::binary("+", Node::integer(1), Node::string("a"))),
        "invalid operation: + (mismatched types int and string)"
    );
    assert_eq!(
        error_message(Node::binary("%", ident("price"), Node::integer(2))),
        "invalid operation: % (mismatched types float and int)"
    );
}

#[test]
fn test_binary_strings_and_time() {
    assert_eq!(infer(Node::binary("+", ident("name"), Node::string("!"))), Type::String);
    assert_eq!(infer(Node::binary("startsWith", ident("name"), Node::string("a"))), Type::Bool);
    assert_eq!(infer(Node::binary("-", ident("now"), ident("now"))), Type::Duration);
    assert_eq!(infer(Node::binary("+", ident("now"), ident("ttl"))), Type::Time);
    assert_eq!(infer(Node::binary("<", ident("now"), ident("now"))), Type::Bool);
    assert_eq!(infer(Node::binary("..", Node::integer(1), Node::integer(5))), Type::array(Type::Int));
}

#[test]
fn test_binary_logic_and_membership() {
    assert_eq!(infer(Node::binary("&&", ident("flag"), Node::bool(false))), Type::Bool);
    assert_eq!(infer(Node::binary("or", ident("flag"), Node::bool(false))), Type::Bool);
    let map = Node::map(vec![(Node::string("x"), Node::integer(1))]);
    assert_eq!(infer(Node::binary("in", Node::string("x"), map)), Type::Bool);
    assert_eq!(infer(Node::binary("not in", Node::integer(1), ident("items"))), Type::Bool);
    assert_eq!(infer(Node::binary("in", Node::string("Name"), ident("user"))), Type::Bool);
    assert_eq!(
        error_message(Node::binary("and", ident("flag"), Node::integer(1))),
        "invalid operation: and (mismatched types bool and int)"
    );
}

#[test]
fn test_equality_requires_comparable_operands() {
    assert_eq!(infer(Node::binary("==", ident("count"), ident("price"))), Type::Bool);
    assert_eq!(infer(Node::binary("!=", ident("name"), Node::nil())), Type::Bool);
    assert_eq!(
        error_message(Node::binary("==", ident("name"), Node::integer(1))),
        "invalid operation: == (mismatched types string and int)"
    );
}

#[test]
fn test_unknown_binary_operator() {
    assert_eq!(
        error_message(Node::binary("<>", Node::integer(1), Node::integer(2))),
        "unknown operator (<>)"
    );
    assert_eq!(
        error_message(Node::binary("not", Node::bool(true), Node::bool(true))),
        "unknown operator (not)"
    );
}

#[test]
fn test_unary_operators() {
    assert_eq!(infer(Node::unary("!", ident("flag"))), Type::Bool);
    assert_eq!(infer(Node::unary("not", ident("anything"))), Type::Bool);
    assert_eq!(infer(Node::unary("-", ident("price"))), Type::Float);
    assert_eq!(
        error_message(Node::unary("!", Node::integer(1))),
        "invalid operation: ! (mismatched type int)"
    );
    assert_eq!(error_message(Node::unary("~", Node::integer(1))), "unknown operator (~)");
}

#[test]
fn test_operator_overload_takes_precedence() {
    let money = Type::structure(StructType::new("Money"));
    let config = env()
        .with_variable("a", money.clone())
        .with_variable("b", money.clone())
        .with_function(
            "AddMoney",
            FunctionSignature::new(vec![money.clone(), money.clone()], vec![money.clone()]),
        )
        .with_operator("+", "AddMoney");
    assert_eq!(run(&config, Node::binary("+", ident("a"), ident("b"))).0, Ok(money));
    // Operands the overload does not accept fall through to the rule table.
    assert_eq!(
        run(&config, Node::binary("+", Node::integer(1), Node::integer(2))).0,
        Ok(Type::Int)
    );
}

#[test]
fn test_matches() {
    assert_eq!(infer(Node::matches(ident("name"), Node::string("^a"))), Type::Bool);
    assert_eq!(
        error_message(Node::matches(Node::integer(1), Node::string("^a"))),
        "invalid operation: matches (mismatched types int and string)"
    );
}

// ========================================
// Member access and slicing
// ========================================

#[test]
fn test_member_array_and_map() {
    assert_eq!(infer(Node::member(ident("items"), Node::integer(0))), Type::Int);
    assert_eq!(infer(Node::member(ident("tags"), Node::string("k"))), Type::Int);
    assert_eq!(infer(Node::member(ident("anything"), Node::string("k"))), Type::Dynamic);
    assert_eq!(
        error_message(Node::member(ident("items"), Node::string("a"))),
        "invalid operation: cannot use string as index to []int"
    );
}

#[test]
fn test_member_index_error_points_at_property() {
    let node = Node::member(ident("items").with_span(0, 5), Node::string("a").with_span(6, 9)).with_span(0, 10);
    let mut tree = Tree::new("items[\"a\"]", node);
    match check(&mut tree, &env()) {
        Err(CheckError::Type(err)) => assert_eq!((err.line, err.column), (1, 7)),
        other => panic!("expected index error, got {other:?}"),
    }
}

#[test]
fn test_member_struct_fields() {
    assert_eq!(infer(Node::field(ident("user"), "Name")), Type::String);
    assert_eq!(
        error_message(Node::field(ident("user"), "Email")),
        "type User has no field Email"
    );
    assert_eq!(error_message(Node::field(ident("count"), "x")), "type int has no field x");
}

#[test]
fn test_member_promoted_field() {
    let admin = StructType::new("Admin").with_field("Level", Type::Int).with_embedded(user());
    let config = env().with_variable("admin", Type::structure(admin));
    assert_eq!(
        run(&config, Node::field(ident("admin"), "Name")).0,
        Ok(Type::String)
    );
}

#[test]
fn test_member_method_binding() {
    let (_, node) = run(&env(), Node::field(ident("user"), "Greet"));
    assert!(matches!(node.ty, Some(Type::Function(_))));

    // The receiver is implicit: one explicit argument.
    let call = Node::call(Node::field(ident("user"), "Greet"), vec![Node::string("hi")]);
    assert_eq!(infer(call), Type::String);

    // Interface methods have no receiver parameter.
    let call = Node::call(Node::field(ident("err"), "Error"), vec![]);
    assert_eq!(infer(call), Type::String);
}

#[test]
fn test_slice() {
    let slice = Node::slice(ident("items"), Some(Node::integer(1)), Some(Node::integer(2)));
    assert_eq!(infer(slice), Type::array(Type::Int));
    assert_eq!(infer(Node::slice(ident("name"), None, Some(ident("count")))), Type::String);
    assert_eq!(
        error_message(Node::slice(ident("items"), Some(Node::string("a")), None)),
        "invalid operation: non-integer slice index string"
    );
}

// ========================================
// Calls
// ========================================

#[test]
fn test_call_function() {
    assert_eq!(infer(Node::call(ident("add"), vec![Node::integer(1), ident("count")])), Type::Int);
    assert_eq!(infer(Node::call(ident("Now"), vec![])), Type::Time);
}

#[test]
fn test_call_arity() {
    assert_eq!(
        error_message(Node::call(ident("add"), vec![Node::integer(1)])),
        "not enough arguments to call add"
    );
    assert_eq!(
        error_message(Node::call(ident("add"), vec![Node::integer(1), Node::integer(2), Node::integer(3)])),
        "too many arguments to call add"
    );
    assert_eq!(
        error_message(Node::call(ident("Now"), vec![Node::integer(1)])),
        "too many arguments to call Now"
    );
    assert_eq!(error_message(Node::call(ident("sprintf"), vec![])), "not enough arguments to call sprintf");
}

#[test]
fn test_call_outputs() {
    assert_eq!(error_message(Node::call(ident("fail"), vec![])), "func fail doesn't return value");
    assert_eq!(
        error_message(Node::call(ident("triple"), vec![])),
        "func triple returns more then two values"
    );
}

#[test]
fn test_call_argument_types() {
    assert_eq!(
        error_message(Node::call(ident("add"), vec![Node::string("a"), Node::integer(1)])),
        "cannot use string as argument (type int) to call add"
    );
    // nil carries no information and dynamic arguments are accepted.
    assert_eq!(infer(Node::call(ident("add"), vec![Node::nil(), ident("anything")])), Type::Int);
}

#[test]
fn test_call_variadic_tail() {
    let call = Node::call(
        ident("sprintf"),
        vec![Node::string("%d %s"), Node::integer(1), Node::string("a")],
    );
    let (result, node) = run(&env(), call);
    assert_eq!(result, Ok(Type::String));
    assert!(!node.is_fast_call());
}

#[test]
fn test_call_fast_variadic_marker() {
    let (result, node) = run(&env(), Node::call(ident("log"), vec![Node::integer(1), ident("name")]));
    assert_eq!(result, Ok(Type::Dynamic));
    assert!(node.is_fast_call());
}

#[test]
fn test_call_integer_literal_coercion() {
    let call = Node::call(ident("scale"), vec![Node::binary("+", Node::integer(1), Node::integer(2))]);
    let (result, node) = run(&env(), call);
    assert_eq!(result, Ok(Type::Float));
    let NodeKind::Call { arguments, .. } = &node.kind else {
        panic!("expected a call node");
    };
    arguments[0].walk(&mut |n| assert_eq!(n.ty, Some(Type::Float)));
}

#[test]
fn test_call_non_literal_int_is_not_coerced() {
    assert_eq!(
        error_message(Node::call(ident("scale"), vec![ident("count")])),
        "cannot use int as argument (type float) to call scale"
    );
}

#[test]
fn test_call_non_callable_and_dynamic() {
    assert_eq!(
        error_message(Node::call(ident("name"), vec![])),
        "cannot call non-function name (type string)"
    );
    let (result, node) = run(&env(), Node::call(ident("anything"), vec![Node::integer(1)]));
    assert_eq!(result, Ok(Type::Dynamic));
    let NodeKind::Call { arguments, .. } = &node.kind else {
        panic!("expected a call node");
    };
    assert_eq!(arguments[0].ty, Some(Type::Int));
}

// ========================================
// Builtins, closures, pointer
// ========================================

fn positive() -> Node {
    predicate(Node::binary(">", Node::pointer(), Node::integer(0)))
}

#[test]
fn test_builtin_predicates() {
    for name in ["all", "none", "any", "one"] {
        assert_eq!(infer(Node::builtin(name, vec![ident("items"), positive()])), Type::Bool, "{name}");
    }
    assert_eq!(infer(Node::builtin("count", vec![ident("items"), positive()])), Type::Int);
}

#[test]
fn test_builtin_filter_and_map() {
    assert_eq!(
        infer(Node::builtin("filter", vec![ident("items"), positive()])),
        Type::array(Type::Int)
    );
    assert_eq!(
        infer(Node::builtin("filter", vec![ident("anything"), positive()])),
        Type::any_array()
    );
    let double = predicate(Node::binary("*", Node::pointer(), Node::float(2.0)));
    assert_eq!(
        infer(Node::builtin("map", vec![ident("items"), double])),
        Type::array(Type::Float)
    );
}

#[test]
fn test_builtin_rejects_non_array() {
    assert_eq!(
        error_message(Node::builtin("all", vec![ident("tags"), positive()])),
        "builtin all takes only array (got map[string]int)"
    );
}

#[test]
fn test_builtin_closure_requirements() {
    let not_bool = predicate(Node::binary("+", Node::pointer(), Node::integer(1)));
    assert_eq!(
        error_message(Node::builtin("filter", vec![ident("items"), not_bool])),
        "closure should return boolean (got int)"
    );
    assert_eq!(
        error_message(Node::builtin("any", vec![ident("items"), Node::integer(1)])),
        "closure should have one input and one output"
    );
    assert_eq!(
        error_message(Node::builtin("any", vec![ident("items"), ident("add")])),
        "closure should have one input and one output"
    );
    // A dynamic closure value is accepted.
    assert_eq!(infer(Node::builtin("map", vec![ident("items"), ident("anything")])), Type::any_array());
}

#[test]
fn test_len_and_unknown_builtins() {
    assert_eq!(infer(Node::builtin("len", vec![ident("items")])), Type::Int);
    assert_eq!(infer(Node::builtin("len", vec![ident("name")])), Type::Int);
    assert_eq!(
        error_message(Node::builtin("len", vec![Node::integer(1)])),
        "invalid argument for len (type int)"
    );
    assert_eq!(
        error_message(Node::builtin("len", vec![])),
        "builtin len expects 1 argument (got 0)"
    );
    assert_eq!(
        error_message(Node::builtin("all", vec![ident("items")])),
        "builtin all expects 2 arguments (got 1)"
    );
    assert_eq!(error_message(Node::builtin("sum", vec![ident("items")])), "unknown builtin sum");
}

#[test]
fn test_pointer() {
    assert_eq!(error_message(Node::pointer()), "cannot use pointer accessor outside closure");

    // all(names, any(items, # == 1) and # != ""): each `#` reads its own collection.
    let config = env().with_variable("names", Type::array(Type::String));
    let nested = Node::builtin(
        "all",
        vec![
            ident("names"),
            predicate(Node::binary(
                "and",
                Node::builtin(
                    "any",
                    vec![ident("items"), predicate(Node::binary("==", Node::pointer(), Node::integer(1)))],
                ),
                Node::binary("!=", Node::pointer(), Node::string("")),
            )),
        ],
    );
    let (result, node) = run(&config, nested);
    assert_eq!(result, Ok(Type::Bool));

    let mut pointer_types = Vec::new();
    node.walk(&mut |n| {
        if matches!(n.kind, NodeKind::Pointer) {
            pointer_types.push(n.ty.clone());
        }
    });
    assert_eq!(pointer_types, [Some(Type::Int), Some(Type::String)]);
}

#[test]
fn test_closure_type() {
    let (_, node) = run(&env(), predicate(Node::bool(true)));
    assert_eq!(
        node.ty,
        Some(Type::function(FunctionSignature::new(vec![Type::Dynamic], vec![Type::Bool])))
    );
}

// ========================================
// Conditional and literals
// ========================================

#[test]
fn test_conditional() {
    assert_eq!(infer(Node::conditional(ident("flag"), Node::nil(), Node::integer(5))), Type::Int);
    assert_eq!(infer(Node::conditional(ident("flag"), Node::integer(5), Node::nil())), Type::Int);
    assert_eq!(infer(Node::conditional(ident("flag"), Node::nil(), Node::nil())), Type::Nil);
    assert_eq!(infer(Node::conditional(ident("flag"), Node::integer(1), Node::integer(2))), Type::Int);
    assert_eq!(
        infer(Node::conditional(ident("flag"), Node::integer(1), Node::string("a"))),
        Type::Dynamic
    );
    assert_eq!(
        error_message(Node::conditional(Node::integer(1), Node::integer(2), Node::integer(3))),
        "non-bool expression (type int) used as condition"
    );
}

#[test]
fn test_collection_literals() {
    let array = Node::array(vec![Node::integer(1), Node::string("a")]);
    let (result, node) = run(&env(), array);
    assert_eq!(result, Ok(Type::any_array()));
    assert!(node.children().iter().all(|child| child.ty.is_some()));

    let (result, node) = run(&env(), Node::map(vec![(Node::string("k"), Node::integer(1))]));
    assert_eq!(result, Ok(Type::any_map()));
    assert_eq!(node.children()[0].ty, Some(Type::Nil));
}

// ========================================
// Driver
// ========================================

#[test]
fn test_expected_category() {
    let numeric = env().with_expect(TypeCategory::Int);
    assert_eq!(run(&numeric, ident("price")).0, Ok(Type::Float));

    let boolean = env().with_expect(TypeCategory::Bool);
    let err = run(&boolean, ident("name")).0.unwrap_err();
    assert_eq!(err.to_string(), "expected bool, but got string");
    assert_eq!(run(&boolean, ident("anything")).0.map_err(|_| ()), Err(()));
}

#[test]
fn test_type_errors_skip_expected_category() {
    let config = env().with_expect(TypeCategory::Bool);
    assert!(matches!(run(&config, ident("missing")).0, Err(CheckError::Type(_))));
}

#[test]
fn test_first_error_wins() {
    let node = Node::binary("+", ident("first").with_span(0, 5), ident("second").with_span(8, 14));
    let mut tree = Tree::new("first + second", node);
    match check(&mut tree, &env()) {
        Err(CheckError::Type(err)) => {
            assert_eq!(err.message, "unknown name first");
            assert_eq!(err.column, 1);
        }
        other => panic!("expected a type error, got {other:?}"),
    }
    // The walk completed: the second operand was still annotated.
    let NodeKind::Binary { right, .. } = &tree.node.kind else {
        panic!("expected a binary node");
    };
    assert_eq!(right.ty, Some(Type::Dynamic));
    assert_eq!(tree.node.ty, Some(Type::Dynamic));
}

#[test]
fn test_checker_is_reusable() {
    let config = env();
    let checker = Checker::new(&config);
    let mut tree = Tree::new("count + 1", Node::binary("+", ident("count"), Node::integer(1)));
    let first = checker.check(&mut tree);
    let annotated = tree.clone();
    let second = checker.check(&mut tree);
    assert_eq!(first, second);
    assert_eq!(tree, annotated);
}
