use layout_test::{format, parse, render_expr, Arg, BinOp, Expr, ExprKind};
use pretty_layout::{PrettyProvider, RenderOptions};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn at(source: &str, width: usize) -> String {
    match format(source, &RenderOptions::width(width)) {
        Ok(out) => out,
        Err(e) => panic!("failed to format {source:?}: {e}"),
    }
}

#[test]
fn ready() {
    println!("it works!")
}

#[test]
fn call_stays_flat_when_it_fits() {
    assert_eq!(at("f(1,2)", 80), "f(1, 2)\n");
    assert_eq!(at("f()", 80), "f()\n");
}

#[test]
fn call_breaks_one_argument_per_line() {
    assert_eq!(
        at("frobnicate(alpha, beta, gamma)", 20),
        "frobnicate(\n  alpha,\n  beta,\n  gamma,\n)\n"
    );
}

#[test]
fn named_arguments() {
    assert_eq!(at("f(scale: 2)", 80), "f(scale: 2)\n");
    assert_eq!(at("plot(data, scale: 2, log: 1)", 16), "plot(\n  data,\n  scale: 2,\n  log: 1,\n)\n");
}

#[test]
fn array_layouts() {
    assert_eq!(at("[1, 2, 3]", 80), "[1, 2, 3]\n");
    assert_eq!(at("[]", 80), "[]\n");
    assert_eq!(at("[alpha, beta, gamma]", 10), "[\n  alpha,\n  beta,\n  gamma,\n]\n");
}

#[test]
fn trailing_commas_are_accepted_and_normalized() {
    assert_eq!(at("[1, 2,]", 80), "[1, 2]\n");
    assert_eq!(at("f(1, 2,)", 80), "f(1, 2)\n");
}

#[test]
fn chain_prefers_one_line() {
    assert_eq!(at("alpha + beta", 12), "alpha + beta\n");
    assert_eq!(at("alpha + beta", 11), "alpha\n  + beta\n");
}

#[test]
fn chain_breaks_every_operator_together() {
    assert_eq!(at("aaaa + bbbb + cccc + dddd", 12), "aaaa\n  + bbbb\n  + cccc\n  + dddd\n");
}

#[test]
fn chain_inside_parentheses_keeps_one_level() {
    // The parentheses already indent, so the chain does not indent again.
    assert_eq!(at("(aaaa + bbbb)", 8), "(\n  aaaa\n  + bbbb\n)\n");
}

#[test]
fn chain_inside_argument_list_keeps_one_level() {
    assert_eq!(at("f(aaaa + bbbb)", 8), "f(\n  aaaa\n  + bbbb,\n)\n");
}

#[test]
fn chain_inside_array_keeps_one_level() {
    assert_eq!(at("[aaaa + bbbb]", 8), "[\n  aaaa\n  + bbbb,\n]\n");
}

#[test]
fn conditional_layouts() {
    assert_eq!(at("if cond then aaaa else bbbb", 80), "if cond then aaaa else bbbb\n");
    assert_eq!(at("if cond then aaaa else bbbb", 12), "if cond\n  then aaaa\n  else bbbb\n");
}

#[test]
fn conditional_inside_parentheses_keeps_one_level() {
    assert_eq!(
        at("(if cond then aaaa else bbbb)", 12),
        "(\n  if cond\n  then aaaa\n  else bbbb\n)\n"
    );
}

#[test]
fn hug_keeps_the_operator_on_the_first_line() {
    assert_eq!(at("items + f(aaaa, bbbb)", 80), "items + f(aaaa, bbbb)\n");
    assert_eq!(at("items + f(aaaa, bbbb)", 18), "items + f(\n  aaaa,\n  bbbb,\n)\n");
    assert_eq!(at("value + [1, 2]", 10), "value + [\n  1,\n  2,\n]\n");
}

#[test]
fn hug_gives_up_when_even_the_head_overflows() {
    assert_eq!(at("items + f(aaaa, bbbb)", 8), "items +\n  f(\n    aaaa,\n    bbbb,\n  )\n");
}

#[test]
fn mixed_precedence_is_two_chains() {
    assert_eq!(at("a + b * c", 80), "a + b * c\n");
    // The inner chain is its own group and may stay flat.
    assert_eq!(at("aaaa + bbbb * cccc", 15), "aaaa\n  + bbbb * cccc\n");
}

#[test]
fn keyword_operators() {
    assert_eq!(at("this and that or other", 80), "this and that or other\n");
    assert_eq!(at("this and that or other", 13), "this and that\n  or other\n");
}

#[test]
fn wider_indent() {
    let options = RenderOptions::width(11).with_indent_width(4);
    assert_eq!(format("alpha + beta", &options).unwrap(), "alpha\n    + beta\n");
}

#[test]
fn formatting_is_idempotent() {
    let sources = [
        "f(1,2)",
        "frobnicate(alpha, beta, gamma)",
        "aaaa + bbbb + cccc + dddd",
        "(aaaa + bbbb)",
        "f(aaaa + bbbb)",
        "if cond then aaaa else bbbb",
        "items + f(aaaa, bbbb)",
        "[alpha, beta, [1, 2, 3], g(x, y: 4)]",
        "if a and b then f(x) else [y, z]",
    ];
    for source in sources {
        for width in [4, 8, 12, 20, 80] {
            let once = at(source, width);
            assert_eq!(at(&once, width), once, "{source:?} at width {width}");
        }
    }
}

#[test]
fn right_nested_chain_flattens_into_one_run() {
    // A right nested tree of one precedence class lays out exactly like the
    // left nested tree the parser builds, so reformatting its output is a
    // fixpoint.
    let theme = PrettyProvider::new(RenderOptions::width(15));
    let inner = leaf_expr(ExprKind::Binary {
        op: BinOp::Add,
        lhs: Box::new(leaf_expr(ExprKind::Name("bbbb".to_string()))),
        rhs: Box::new(leaf_expr(ExprKind::Name("cccc".to_string()))),
    });
    let expr = leaf_expr(ExprKind::Binary {
        op: BinOp::Add,
        lhs: Box::new(leaf_expr(ExprKind::Name("aaaa".to_string()))),
        rhs: Box::new(inner),
    });
    let first = render_expr(&expr, &theme).unwrap();
    assert_eq!(first, "aaaa\n  + bbbb\n  + cccc");
    let reparsed = parse(&first).unwrap();
    assert_eq!(render_expr(&reparsed, &theme).unwrap(), first);
}

#[test]
fn unknown_node_is_a_hard_error() {
    let theme = PrettyProvider::new(RenderOptions::default());
    let expr = Expr { kind: ExprKind::Unknown("magic".to_string()), span: 3..9 };
    let err = render_expr(&expr, &theme).unwrap_err();
    assert_eq!(err.span, 3..9);
    assert_eq!(err.node, "magic");
}

#[test]
fn lex_error_reports_the_offending_span() {
    let err = parse("f(#)").unwrap_err();
    assert_eq!(err.span, 2..3);
    assert!(err.message.contains("unexpected character"));
}

#[test]
fn unclosed_parenthesis_points_at_the_end() {
    let err = parse("(alpha").unwrap_err();
    assert_eq!(err.span, 6..6);
    assert!(err.message.contains("`)`"));
}

#[test]
fn trailing_tokens_are_rejected() {
    let err = parse("alpha beta").unwrap_err();
    assert_eq!(err.span, 6..10);
    assert!(err.message.contains("end of input"));
}

// ------------------------------------------------------------- properties

fn leaf_expr(kind: ExprKind) -> Expr {
    Expr { kind, span: 0..0 }
}

fn arb_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["alpha", "beta", "gamma", "delta", "lorem", "ipsum", "value"])
        .prop_map(str::to_string)
}

fn arb_op() -> impl Strategy<Value = BinOp> {
    prop::sample::select(vec![BinOp::Or, BinOp::And, BinOp::Add, BinOp::Sub, BinOp::Mul, BinOp::Div])
}

/// Parenthesizes an expression the grammar would not accept bare as an
/// operand of `op`: conditionals, and chains of a lower precedence class.
fn operand(op: BinOp, expr: Expr) -> Expr {
    let needs_parens = match &expr.kind {
        ExprKind::If { .. } => true,
        ExprKind::Binary { op: child, .. } => child.precedence().0 < op.precedence().0,
        _ => false,
    };
    if needs_parens { leaf_expr(ExprKind::Paren(Box::new(expr))) } else { expr }
}

fn arb_expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        (0u32..10_000).prop_map(|n| leaf_expr(ExprKind::Number(n.to_string()))),
        arb_name().prop_map(|n| leaf_expr(ExprKind::Name(n))),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        let arg = (proptest::option::of(arb_name()), inner.clone())
            .prop_map(|(name, value)| Arg { name, value });
        prop_oneof![
            (arb_op(), inner.clone(), inner.clone()).prop_map(|(op, lhs, rhs)| leaf_expr(
                ExprKind::Binary {
                    op,
                    lhs: Box::new(operand(op, lhs)),
                    rhs: Box::new(operand(op, rhs)),
                }
            )),
            (arb_name(), prop::collection::vec(arg, 0..4))
                .prop_map(|(callee, args)| leaf_expr(ExprKind::Call { callee, args })),
            prop::collection::vec(inner.clone(), 0..4)
                .prop_map(|items| leaf_expr(ExprKind::Array(items))),
            inner.clone().prop_map(|e| leaf_expr(ExprKind::Paren(Box::new(e)))),
            (inner.clone(), inner.clone(), inner).prop_map(|(test, then, otherwise)| leaf_expr(
                ExprKind::If {
                    test: Box::new(test),
                    then: Box::new(then),
                    otherwise: Box::new(otherwise),
                }
            )),
        ]
    })
}

proptest! {
    /// Reformatting rendered output reproduces it byte for byte.
    #[test]
    fn layout_is_idempotent(expr in arb_expr(), width in 4usize..60) {
        let theme = PrettyProvider::new(RenderOptions::width(width));
        let first = render_expr(&expr, &theme).unwrap();
        let reparsed = parse(&first).unwrap();
        let second = render_expr(&reparsed, &theme).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Anything that fits on one line at the target width is laid out flat.
    #[test]
    fn flat_wins_when_it_fits(expr in arb_expr()) {
        let wide = PrettyProvider::new(RenderOptions::width(10_000));
        let flat = render_expr(&expr, &wide).unwrap();
        if !flat.contains('\n') && flat.len() <= 80 {
            let normal = PrettyProvider::new(RenderOptions::width(80));
            prop_assert_eq!(render_expr(&expr, &normal).unwrap(), flat);
        }
    }

    /// No layout ever loses or invents tokens.
    #[test]
    fn layout_preserves_the_token_stream(expr in arb_expr(), width in 4usize..60) {
        let theme = PrettyProvider::new(RenderOptions::width(width));
        let rendered = render_expr(&expr, &theme).unwrap();
        // The output must at least parse back to something.
        parse(&rendered).unwrap();
    }
}
