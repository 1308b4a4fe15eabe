// src/compare/mod.rs
//! The similarity engine: recursive weighted comparison over the
//! normalized AST, with coercion between variants.
//!
//! When two nodes are of the same variant the per-variant rule applies,
//! scaled by the product of both weights. When they differ, either side
//! may be rewritten into a shape alike the other - a C-style loop into an
//! initializer plus `while`, a compound assignment into a plain one, any
//! node into a `Null` or a one-element block - with the rewrite cost
//! carried as a reduced weight on the synthesized node. Synthesized nodes
//! are owned by the comparing call frame and never leak into the trees.

use crate::config::CompareConfig;
use crate::tree::{AstNode, NodeKind};
use std::mem::discriminant;

/// Weight of a `Null` standing in for a pruned subtree.
pub const NULL_COERCION_WEIGHT: f64 = 0.1;
/// Weight of the Composite wrapped around a lone statement facing a block.
pub const WRAP_COERCION_WEIGHT: f64 = 0.9;
/// Weight of an `a = a + b` synthesized from `a += b`.
pub const COMPOUND_ASSIGN_COERCION_WEIGHT: f64 = 0.7;

/// Compares two trees with default tunables. Result is in [0, 1].
#[must_use]
pub fn similarity(a: &AstNode, b: &AstNode) -> f64 {
    compare(a, b, &CompareConfig::default())
}

/// Compares two trees. Symmetric up to rounding; 1.0 on identical trees
/// free of `Unknown` nodes.
#[must_use]
pub fn compare(a: &AstNode, b: &AstNode, config: &CompareConfig) -> f64 {
    if discriminant(&a.kind) == discriminant(&b.kind) {
        return compare_same_variant(a, b, config) * combined_weight(a, b);
    }

    // A Null on either side always coerces the other side, so the
    // shorter-tree rule scores 0.1 in both argument orders.
    if matches!(b.kind, NodeKind::Null) {
        return compare(&null_alike(a), b, config);
    }
    if matches!(a.kind, NodeKind::Null) {
        return compare(a, &null_alike(b), config);
    }

    if let Some(alike) = make_alike(a, b) {
        return compare(&alike, b, config);
    }
    if let Some(alike) = make_alike(b, a) {
        return compare(a, &alike, config);
    }
    0.0
}

fn combined_weight(a: &AstNode, b: &AstNode) -> f64 {
    a.weight * b.weight
}

fn compare_same_variant(a: &AstNode, b: &AstNode, config: &CompareConfig) -> f64 {
    match (&a.kind, &b.kind) {
        (NodeKind::Composite, NodeKind::Composite) => composite_score(a, b, config),
        (NodeKind::Null, NodeKind::Null) => 1.0,
        (NodeKind::Unknown, NodeKind::Unknown) => 0.0,
        (NodeKind::Break, NodeKind::Break) | (NodeKind::Continue, NodeKind::Continue) => 1.0,
        (NodeKind::Identifier { name: left }, NodeKind::Identifier { name: right }) => {
            if config.match_identifier_names && left != right {
                0.0
            } else {
                1.0
            }
        }
        (
            NodeKind::Literal { value: va, class: ca },
            NodeKind::Literal { value: vb, class: cb },
        ) => {
            let base = if va == vb {
                1.0
            } else if ca == cb {
                0.5
            } else {
                0.2
            };
            base * combined_weight(a, b)
        }
        (NodeKind::Assignment, NodeKind::Assignment)
        | (NodeKind::CompoundAssign { .. }, NodeKind::CompoundAssign { .. })
        | (NodeKind::While, NodeKind::While) => compare_twice(a, b, 0, 1, config),
        (NodeKind::Return, NodeKind::Return) => compare(&*a.slot(0), &*b.slot(0), config),
        (NodeKind::Unary { op: left }, NodeKind::Unary { op: right }) => {
            if left == right {
                compare(&*a.slot(0), &*b.slot(0), config)
            } else {
                0.0
            }
        }
        (NodeKind::Binary { op: left }, NodeKind::Binary { op: right }) => {
            if left == right {
                compare_twice(a, b, 0, 1, config)
            } else {
                0.0
            }
        }
        (NodeKind::CStyleLoop, NodeKind::CStyleLoop) => {
            let ends = compare_twice(a, b, 0, 2, config); // initializer, step
            let core = compare_twice(a, b, 1, 3, config); // condition, body
            (ends + core) / 2.0
        }
        (NodeKind::If, NodeKind::If) => {
            let main = compare_twice(a, b, 0, 1, config);
            if a.children.len() > 2 && b.children.len() > 2 {
                (main + compare(&*a.slot(2), &*b.slot(2), config)) / 2.0
            } else {
                main
            }
        }
        _ => unreachable!("same-variant comparison on mismatched variants"),
    }
}

/// Structural conjunction over two slots: zero when either slot is zero,
/// otherwise the mean.
fn compare_twice(
    a: &AstNode,
    b: &AstNode,
    first: usize,
    second: usize,
    config: &CompareConfig,
) -> f64 {
    let left = compare(&*a.slot(first), &*b.slot(first), config);
    if left == 0.0 {
        return 0.0;
    }
    let right = compare(&*a.slot(second), &*b.slot(second), config);
    if right == 0.0 {
        return 0.0;
    }
    (left + right) / 2.0
}

/// Child-wise mean of a statement sequence against another, normalized
/// over the pairs actually formed. A loop facing a non-loop peer is
/// expanded in place into its `init; while` decomposition, consuming two
/// peer positions - the sequence-level face of the loop coercion. Extra
/// children on the other side are ignored, so a short sequence can fully
/// match the prefix of a longer one.
fn composite_score(a: &AstNode, b: &AstNode, config: &CompareConfig) -> f64 {
    if a.children.is_empty() {
        return 1.0;
    }

    let mut scores = Vec::with_capacity(a.children.len());
    let mut i = 0;
    let mut j = 0;
    while i < a.children.len() {
        let x = &a.children[i];
        match b.children.get(j) {
            Some(y) if x.is_loop() && !y.is_loop() => {
                let unrolled = decompose_loop(x);
                scores.push(compare(&unrolled.children[0], y, config));
                scores.push(compare(&unrolled.children[1], &*b.slot(j + 1), config));
                i += 1;
                j += 2;
            }
            Some(y) if y.is_loop() && !x.is_loop() => {
                let unrolled = decompose_loop(y);
                scores.push(compare(x, &unrolled.children[0], config));
                scores.push(compare(&*a.slot(i + 1), &unrolled.children[1], config));
                i += 2;
                j += 1;
            }
            _ => {
                scores.push(compare(x, &*b.slot(j), config));
                i += 1;
                j += 1;
            }
        }
    }

    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Rewrites `node` into a shape alike `target`, or fails. Variant-specific
/// rewrites take precedence over the generic ones; in particular a loop
/// coerced toward a Composite uses the decomposition, whose natural shape
/// is a Composite, not the generic wrap.
fn make_alike(node: &AstNode, target: &AstNode) -> Option<AstNode> {
    match (&node.kind, &target.kind) {
        (NodeKind::CStyleLoop, NodeKind::While | NodeKind::Composite) => {
            Some(decompose_loop(node))
        }
        (NodeKind::CompoundAssign { op }, NodeKind::Assignment) => {
            Some(desugar_compound_assign(node, op))
        }
        (_, NodeKind::Null) => Some(null_alike(node)),
        (_, NodeKind::Composite) => Some(wrap_alike(node)),
        _ => None,
    }
}

/// `for (init; cond; step) body` as `{ init; while (cond) { body; step } }`.
/// Weight-neutral: the rewrite is semantically exact for well-formed loops.
fn decompose_loop(node: &AstNode) -> AstNode {
    let init = node.slot(0).into_owned();
    let cond = node.slot(1).into_owned();
    let step = node.slot(2).into_owned();
    let body = node.slot(3);

    let mut while_body = AstNode::composite(body.location.clone());
    while_body.children.extend(body.children.iter().cloned());
    while_body.children.push(step);

    let mut while_node = AstNode::new(NodeKind::While, node.location.clone());
    while_node.append_child(cond);
    while_node.append_child(while_body);

    let mut outer = AstNode::composite(node.location.clone());
    outer.append_child(init);
    outer.append_child(while_node);
    outer
}

/// `a += b` as `a = a + b`, carrying the rewrite penalty.
fn desugar_compound_assign(node: &AstNode, op: &str) -> AstNode {
    let left = node.slot(0).into_owned();
    let right = node.slot(1).into_owned();

    let mut operation = AstNode::new(
        NodeKind::Binary { op: op.to_string() },
        node.location.clone(),
    );
    operation.append_child(left.clone());
    operation.append_child(right);

    let mut assignment = AstNode::new(NodeKind::Assignment, node.location.clone());
    assignment.weight = COMPOUND_ASSIGN_COERCION_WEIGHT;
    assignment.append_child(left);
    assignment.append_child(operation);
    assignment
}

fn null_alike(node: &AstNode) -> AstNode {
    let mut null = AstNode::null(node.location.clone());
    null.weight = NULL_COERCION_WEIGHT;
    null
}

fn wrap_alike(node: &AstNode) -> AstNode {
    let mut wrapper = AstNode::composite(node.location.clone());
    wrapper.weight = WRAP_COERCION_WEIGHT;
    wrapper.children.push(node.clone());
    wrapper
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::AstBuilder;
    use crate::types::{Coordinate, Location};
    use std::sync::Arc;

    fn loc() -> Location {
        Location::new(Arc::from("t.cpp"), Coordinate::new(1, 1), Coordinate::new(1, 9))
    }

    fn literal(lexeme: &str) -> AstNode {
        AstNode::literal(lexeme, loc())
    }

    // return x; return 1;
    fn sample_tree() -> AstNode {
        let mut builder = AstBuilder::new();
        builder.open_root(loc());
        builder.open_return(loc());
        builder.add_identifier("x", loc());
        builder.close_node();
        builder.open_return(loc());
        builder.add_literal("1", loc());
        builder.close_node();
        builder.product()
    }

    #[test]
    fn test_identical_trees_score_one() {
        let tree = sample_tree();
        assert_eq!(similarity(&tree, &tree), 1.0);
    }

    #[test]
    fn test_null_coercion_scores_a_tenth_both_ways() {
        let tree = sample_tree();
        let null = AstNode::null(loc());
        assert_eq!(similarity(&tree, &null), NULL_COERCION_WEIGHT);
        assert_eq!(similarity(&null, &tree), NULL_COERCION_WEIGHT);
    }

    #[test]
    fn test_literal_lexical_classes() {
        assert_eq!(similarity(&literal("1"), &literal("1")), 1.0);
        assert_eq!(similarity(&literal("1"), &literal("2")), 0.5);
        assert_eq!(similarity(&literal("1"), &literal("\"x\"")), 0.2);
    }

    #[test]
    fn test_unknown_never_matches_itself() {
        let unknown = AstNode::new(NodeKind::Unknown, loc());
        assert_eq!(similarity(&unknown, &unknown), 0.0);
    }

    #[test]
    fn test_identifier_names_ignored_by_default() {
        let a = AstNode::identifier("x", loc());
        let b = AstNode::identifier("y", loc());
        assert_eq!(similarity(&a, &b), 1.0);

        let strict = CompareConfig {
            match_identifier_names: true,
            ..CompareConfig::default()
        };
        assert_eq!(compare(&a, &b, &strict), 0.0);
        assert_eq!(compare(&a, &a, &strict), 1.0);
    }

    #[test]
    fn test_mismatched_operators_never_match() {
        let mut a = AstNode::new(NodeKind::Binary { op: "+".into() }, loc());
        a.append_child(AstNode::identifier("x", loc()));
        a.append_child(AstNode::identifier("y", loc()));
        let mut b = a.clone();
        b.kind = NodeKind::Binary { op: "-".into() };
        assert_eq!(similarity(&a, &b), 0.0);
        assert_eq!(similarity(&a, &a), 1.0);
    }

    #[test]
    fn test_scores_stay_in_unit_interval() {
        let trees = [
            sample_tree(),
            AstNode::null(loc()),
            literal("1"),
            AstNode::identifier("x", loc()),
        ];
        for a in &trees {
            for b in &trees {
                let score = similarity(a, b);
                assert!((0.0..=1.0).contains(&score), "score {score} out of range");
            }
        }
    }
}
