// tests/unit_parser.rs
use clonecheck::parser::SourceParser;
use clonecheck::tree::{AstNode, LiteralClass, NodeKind};

fn parse_all(source: &str) -> Vec<clonecheck::parser::Function> {
    let mut parser = SourceParser::new().expect("grammar loads");
    parser.parse_source("test.cpp", source).expect("source parses")
}

fn parse_one(source: &str) -> AstNode {
    let functions = parse_all(source);
    assert_eq!(functions.len(), 1, "expected exactly one function");
    functions.into_iter().next().unwrap().body
}

#[test]
fn test_function_signatures_are_stable_keys() {
    let functions = parse_all(
        "int add(int a, int b) { return a + b; }\n\
         class Stack {\n\
         public:\n\
           void push(int value) { size += 1; }\n\
         };\n",
    );
    let names: Vec<&str> = functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["add(int a, int b)", "Stack::push(int value)"]);
}

#[test]
fn test_empty_bodies_are_not_collected() {
    assert!(parse_all("void nop() {}").is_empty());
    assert!(parse_all("int declared_only(int x);").is_empty());
}

#[test]
fn test_declaration_becomes_assignment() {
    let body = parse_one("int f() { int x = 1; return x; }");
    assert_eq!(body.children.len(), 2);

    let declaration = &body.children[0];
    assert!(matches!(declaration.kind, NodeKind::Assignment));
    assert!(matches!(
        &declaration.children[0].kind,
        NodeKind::Identifier { name } if name == "x"
    ));
    assert!(matches!(
        &declaration.children[1].kind,
        NodeKind::Literal { value, .. } if value == "1"
    ));

    let return_node = &body.children[1];
    assert!(matches!(return_node.kind, NodeKind::Return));
}

#[test]
fn test_declaration_without_initializer_has_empty_value_slot() {
    let body = parse_one("void f() { int x; x = 2; }");
    let declaration = &body.children[0];
    assert!(matches!(declaration.kind, NodeKind::Assignment));
    assert_eq!(declaration.children.len(), 1);
    assert!(matches!(declaration.slot(1).kind, NodeKind::Null));
}

#[test]
fn test_operator_extraction() {
    let body = parse_one("int f(int a, int b) { return a + b; }");
    let return_node = &body.children[0];
    assert!(matches!(
        &return_node.children[0].kind,
        NodeKind::Binary { op } if op == "+"
    ));
}

#[test]
fn test_compound_assignment_strips_trailing_equals() {
    let body = parse_one("void f(int a, int b) { a += b; }");
    assert!(matches!(
        &body.children[0].kind,
        NodeKind::CompoundAssign { op } if op == "+"
    ));
}

#[test]
fn test_update_expression_is_unary() {
    let body = parse_one("void f(int i) { ++i; i--; }");
    assert!(matches!(&body.children[0].kind, NodeKind::Unary { op } if op == "++"));
    assert!(matches!(&body.children[1].kind, NodeKind::Unary { op } if op == "--"));
}

#[test]
fn test_for_loop_fills_absent_slots_with_nulls() {
    let body = parse_one("void f() { for (;;) break; }");
    let loop_node = &body.children[0];
    assert!(matches!(loop_node.kind, NodeKind::CStyleLoop));
    assert_eq!(loop_node.children.len(), 4);
    for slot in &loop_node.children[..3] {
        assert!(matches!(slot.kind, NodeKind::Null), "absent slot is a Null");
    }
    let wrapped_body = &loop_node.children[3];
    assert!(wrapped_body.is_composite());
    assert!(matches!(wrapped_body.children[0].kind, NodeKind::Break));
}

#[test]
fn test_for_loop_keeps_present_slots_positional() {
    let body = parse_one("void f(int n) { for (int i = 0; i < n; ++i) continue; }");
    let loop_node = &body.children[0];
    assert!(matches!(loop_node.children[0].kind, NodeKind::Assignment));
    assert!(matches!(&loop_node.children[1].kind, NodeKind::Binary { op } if op == "<"));
    assert!(matches!(&loop_node.children[2].kind, NodeKind::Unary { op } if op == "++"));
    assert!(loop_node.children[3].is_composite());
}

#[test]
fn test_if_with_else_has_three_slots() {
    let body = parse_one("int f(int x) { if (x) return 1; else return 2; }");
    let if_node = &body.children[0];
    assert!(matches!(if_node.kind, NodeKind::If));
    assert_eq!(if_node.children.len(), 3);
    assert!(matches!(if_node.children[0].kind, NodeKind::Identifier { .. }));
    assert!(if_node.children[1].is_composite(), "then branch wrapped");
    assert!(if_node.children[2].is_composite(), "else branch wrapped");
}

#[test]
fn test_while_condition_and_body() {
    let body = parse_one("void f(int n) { while (n) { n -= 1; } }");
    let while_node = &body.children[0];
    assert!(matches!(while_node.kind, NodeKind::While));
    assert!(matches!(while_node.children[0].kind, NodeKind::Identifier { .. }));
    assert!(while_node.children[1].is_composite());
    assert!(matches!(
        &while_node.children[1].children[0].kind,
        NodeKind::CompoundAssign { op } if op == "-"
    ));
}

#[test]
fn test_unsupported_kinds_become_unknown() {
    let body = parse_one("void f() { g(); }");
    assert!(matches!(body.children[0].kind, NodeKind::Unknown));
}

#[test]
fn test_string_and_float_literals() {
    let body = parse_one("void f() { s = \"hi\"; x = 2.5; }");
    let first = &body.children[0];
    assert!(matches!(
        &first.children[1].kind,
        NodeKind::Literal { value, .. } if value == "\"hi\""
    ));
}

#[test]
fn test_raw_string_literal_classifies_as_string() {
    let body = parse_one("void f() { s = R\"(raw)\"; }");
    let assignment = &body.children[0];
    assert!(matches!(
        &assignment.children[1].kind,
        NodeKind::Literal { value, class: LiteralClass::Str } if value == "R\"(raw)\""
    ));
}
