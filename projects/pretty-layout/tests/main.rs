use pretty_assertions::assert_eq;
use pretty_layout::{
    docs, hug_operand, AncestorKind, CallSite, HardBlock, KAndRBracket, OperatorChain, Precedence,
    PrettyProvider, PrettyTree, RenderOptions, SoftBlock, TreePath,
};
use termcolor::{Buffer, Color, ColorSpec};

fn render(doc: &PrettyTree, width: usize) -> String {
    doc.pretty(width).to_string()
}

fn render_with(doc: &PrettyTree, options: RenderOptions) -> String {
    doc.pretty_with(options).to_string()
}

#[test]
fn ready() {
    println!("it works!")
}

#[test]
fn group_stays_flat_when_it_fits() {
    let doc = docs!["lorem", PrettyTree::line_or_space(), "ipsum"].group();
    assert_eq!(render(&doc, 80), "lorem ipsum");
    assert_eq!(render(&doc, 11), "lorem ipsum");
}

#[test]
fn group_breaks_one_column_past_the_width() {
    let doc = docs!["lorem", PrettyTree::line_or_space(), "ipsum"].group();
    assert_eq!(render(&doc, 10), "lorem\nipsum");
}

#[test]
fn group_breaks_all_of_its_lines_together() {
    let doc = docs![
        "aa",
        PrettyTree::line_or_space(),
        "bb",
        PrettyTree::line_or_space(),
        "cc",
    ]
    .group();
    assert_eq!(render(&doc, 7), "aa\nbb\ncc");
}

#[test]
fn nested_group_decides_for_itself() {
    let inner = docs!["cc", PrettyTree::line_or_space(), "dd"].group();
    let outer = docs!["aaaaaaaa", PrettyTree::line_or_space(), inner].group();
    // The outer group breaks but the inner pair still fits on its line.
    assert_eq!(render(&outer, 10), "aaaaaaaa\ncc dd");
}

#[test]
fn group_measures_the_rest_of_the_line() {
    let doc = docs!["aa", PrettyTree::line_or_space(), "bb"].group().append(";;;;");
    assert_eq!(render(&doc, 9), "aa bb;;;;");
    // The trailing text no longer fits after the group, so the group breaks
    // even though its own text would fit.
    assert_eq!(render(&doc, 8), "aa\nbb;;;;");
}

#[test]
fn hardline_forces_its_group_broken() {
    let doc = docs!["aa", PrettyTree::hardline(), "bb"].group();
    assert_eq!(render(&doc, 80), "aa\nbb");
}

#[test]
fn hardline_propagates_to_enclosing_groups_only() {
    let sibling = docs!["cc", PrettyTree::line_or_space(), "dd"].group();
    let hard = docs!["aa", PrettyTree::hardline(), "bb"].group();
    let doc = docs![hard, PrettyTree::line_or_space(), sibling].group();
    // The outer group is broken by the hard line, the sibling is not.
    assert_eq!(render(&doc, 80), "aa\nbb\ncc dd");
}

#[test]
fn group_break_ignores_fit() {
    let doc = docs!["aa", PrettyTree::line_or_space(), "bb"].group_break();
    assert_eq!(render(&doc, 80), "aa\nbb");
}

#[test]
fn nest_counts_levels_not_columns() {
    let doc = docs![
        "begin",
        docs![PrettyTree::hardline(), "body"].nest(1),
        PrettyTree::hardline(),
        "end",
    ];
    assert_eq!(render(&doc, 80), "begin\n  body\nend");
    let options = RenderOptions::width(80).with_indent_width(4);
    assert_eq!(render_with(&doc, options), "begin\n    body\nend");
}

#[test]
fn tabs_indent_one_per_level() {
    let doc = docs![
        "begin",
        docs![PrettyTree::hardline(), docs![PrettyTree::hardline(), "deep"].nest(1)].nest(1),
        PrettyTree::hardline(),
        "end",
    ];
    let options = RenderOptions::width(80).with_tabs(true);
    assert_eq!(render_with(&doc, options), "begin\n\t\n\t\tdeep\nend");
}

#[test]
fn indentation_is_not_emitted_on_verbatim_lines() {
    let doc = docs![
        "head",
        docs![PrettyTree::hardline(), PrettyTree::verbatim("raw\n  kept")].nest(2),
    ];
    assert_eq!(render(&doc, 80), "head\n    raw\n  kept");
}

#[test]
fn verbatim_preserves_blank_lines() {
    let doc = PrettyTree::verbatim("a\n\nb");
    assert_eq!(render(&doc, 80), "a\n\nb");
}

#[test]
fn newline_in_text() {
    let doc = docs![
        "test",
        docs![PrettyTree::line_or_space(), PrettyTree::verbatim("\"test\n     test\"")].nest(2),
    ]
    .group();
    assert_eq!(render(&doc, 10), "test\n    \"test\n     test\"");
}

#[test]
fn overflow_never_fails() {
    let doc = docs!["shorter", PrettyTree::line_or_space(), "unbreakable_long_token"].group();
    assert_eq!(render(&doc, 4), "shorter\nunbreakable_long_token");
}

#[test]
fn graphemes_measure_as_one_column() {
    // Three columns of text in six bytes.
    let doc = docs![PrettyTree::text("ééé"), PrettyTree::line_or_space(), "x"].group();
    assert_eq!(render(&doc, 5), "ééé x");
    assert_eq!(render(&doc, 4), "ééé\nx");
}

#[test]
fn fill_breaks_pairwise() {
    let doc = PrettyTree::fill(vec![
        PrettyTree::text("aaaaaa"),
        PrettyTree::line_or_space(),
        PrettyTree::text("bbbb"),
        PrettyTree::line_or_space(),
        PrettyTree::text("cc"),
    ]);
    // The first pair does not fit, the second does; the break between them
    // does not cascade.
    assert_eq!(render(&doc, 10), "aaaaaa\nbbbb cc");
    assert_eq!(render(&doc, 14), "aaaaaa bbbb cc");
}

#[test]
fn fill_keeps_oversized_items_on_their_own_line() {
    let doc = PrettyTree::fill(vec![
        PrettyTree::text("aa"),
        PrettyTree::line_or_space(),
        PrettyTree::text("bbbbbbbbbbbb"),
        PrettyTree::line_or_space(),
        PrettyTree::text("cc"),
    ]);
    assert_eq!(render(&doc, 10), "aa\nbbbbbbbbbbbb\ncc");
}

#[test]
fn choice_picks_the_first_fitting_candidate() {
    let doc = PrettyTree::choice([
        PrettyTree::text("alpha beta gamma"),
        PrettyTree::text("alpha beta"),
        PrettyTree::text("alpha"),
    ]);
    assert_eq!(render(&doc, 40), "alpha beta gamma");
    assert_eq!(render(&doc, 12), "alpha beta");
    assert_eq!(render(&doc, 7), "alpha");
}

#[test]
fn choice_falls_back_to_the_last_candidate_broken() {
    let broken = docs!["aa", PrettyTree::line_or_space(), "bb"];
    let doc = PrettyTree::choice([PrettyTree::text("aa bb and more"), broken]);
    assert_eq!(render(&doc, 4), "aa\nbb");
}

#[test]
fn annotations_do_not_affect_layout() {
    let color = {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red));
        std::rc::Rc::new(spec)
    };
    let plain = docs!["lorem", PrettyTree::line_or_space(), "ipsum"].group();
    let colored = docs![
        PrettyTree::text("lorem").annotate(color.clone()),
        PrettyTree::line_or_space(),
        PrettyTree::text("ipsum").annotate(color),
    ]
    .group();
    assert_eq!(render(&colored, 11), render(&plain, 11));
    assert_eq!(render(&colored, 10), render(&plain, 10));
}

#[test]
fn colored_rendering_emits_escapes() {
    let color = {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red));
        std::rc::Rc::new(spec)
    };
    let doc = PrettyTree::text("hello").annotate(color).append(" world");
    let mut buffer = Buffer::ansi();
    doc.render_colored(80, &mut buffer).unwrap();
    let out = String::from_utf8_lossy(buffer.as_slice()).into_owned();
    assert!(out.contains("hello"));
    assert!(out.contains('\u{1b}'));
}

#[test]
fn operator_chain_flat_and_broken() {
    let mut chain = OperatorChain::new(Precedence(1), "aaa");
    chain.push("+", "bbb");
    chain.push("+", "ccc");
    let doc = chain.into_doc(false);
    assert_eq!(render(&doc, 80), "aaa + bbb + ccc");
    assert_eq!(render(&doc, 10), "aaa\n  + bbb\n  + ccc");
}

#[test]
fn operator_chain_in_continuation_scope_does_not_nest() {
    let mut chain = OperatorChain::new(Precedence(1), "aaa");
    chain.push("+", "bbb");
    let doc = chain.into_doc(true);
    assert_eq!(render(&doc, 5), "aaa\n+ bbb");
}

#[test]
fn hug_prefers_everything_flat() {
    let operand = SoftBlock::brackets().join_slice(
        &["a", "b"],
        &PrettyProvider::default(),
    );
    let doc = hug_operand(PrettyTree::text("value +"), operand);
    assert_eq!(render(&doc, 80), "value + [a b]");
}

#[test]
fn hug_breaks_the_operand_in_place() {
    let operand = SoftBlock::brackets()
        .with_joint(PrettyTree::text(",").append(PrettyTree::line_or_space()))
        .join_slice(&["aaaa", "bbbb"], &PrettyProvider::default());
    let doc = hug_operand(PrettyTree::text("value +"), operand);
    assert_eq!(render(&doc, 12), "value + [\n  aaaa,\n  bbbb\n]");
}

#[test]
fn hug_moves_an_unbreakable_operand_to_its_own_line() {
    let doc = hug_operand(PrettyTree::text("value +"), PrettyTree::text("atom_operand"));
    assert_eq!(render(&doc, 80), "value + atom_operand");
    assert_eq!(render(&doc, 14), "value +\n  atom_operand");
}

#[test]
fn soft_block_flat_and_broken() {
    let theme = PrettyProvider::default();
    let block = SoftBlock::parentheses()
        .with_joint(PrettyTree::text(",").append(PrettyTree::line_or_space()))
        .with_tail(",");
    let doc = block.join_slice(&["aa", "bb"], &theme);
    assert_eq!(render(&doc, 80), "(aa, bb)");
    assert_eq!(render(&doc, 6), "(\n  aa,\n  bb,\n)");
}

#[test]
fn soft_block_empty_stays_tight() {
    let theme = PrettyProvider::default();
    let doc = SoftBlock::parentheses().join_slice::<&'static str>(&[], &theme);
    assert_eq!(render(&doc, 80), "()");
}

#[test]
fn hard_block_always_breaks() {
    let theme = PrettyProvider::default();
    let block = HardBlock::curly_braces()
        .with_joint(PrettyTree::text(",").append(PrettyTree::Hardline));
    let doc = block.join_slice(&["aa", "bb"], &theme);
    assert_eq!(render(&doc, 80), "{\n  aa,\n  bb\n}");
}

#[test]
fn k_and_r_bracket_flat_and_broken() {
    let theme = PrettyProvider::default();
    let bracket = KAndRBracket::curly_braces();
    let inline_join = PrettyTree::text(", ");
    let block_join = PrettyTree::text(",").append(PrettyTree::Hardline);
    let doc = PrettyTree::text("struct Point")
        .append(bracket.build(&["x", "y"], &theme, inline_join, block_join));
    assert_eq!(render(&doc, 80), "struct Point { x, y }");
    assert_eq!(render(&doc, 16), "struct Point {\n  x,\n  y\n}");
}

#[test]
fn tree_path_same_precedence_chain_is_a_continuation() {
    let mut path = TreePath::new();
    path.descend(AncestorKind::Statement);
    path.descend(AncestorKind::OperatorChain(Precedence(3)));
    assert!(path.is_continuation(Some(Precedence(3)), None));
    assert!(!path.is_continuation(Some(Precedence(4)), None));
}

#[test]
fn tree_path_parentheses_claim_the_scope() {
    let mut path = TreePath::new();
    path.descend(AncestorKind::OperatorChain(Precedence(1)));
    path.descend(AncestorKind::Parenthesized);
    assert!(path.is_continuation(Some(Precedence(1)), None));
    assert!(path.is_continuation(None, None));
}

#[test]
fn tree_path_argument_list_claims_only_its_own_call() {
    let mut path = TreePath::new();
    path.descend(AncestorKind::ArgumentList(CallSite(7)));
    assert!(path.is_continuation(None, Some(CallSite(7))));
    assert!(!path.is_continuation(None, Some(CallSite(8))));
    assert!(!path.is_continuation(None, None));
}

#[test]
fn tree_path_transparent_ancestors_are_skipped() {
    let mut path = TreePath::new();
    path.descend(AncestorKind::NamedArgument);
    path.descend(AncestorKind::Transparent);
    assert!(path.is_continuation(None, None));
}

#[test]
fn tree_path_boundaries_and_root_are_not_continuations() {
    let mut path = TreePath::new();
    assert!(!path.is_continuation(None, None));
    path.descend(AncestorKind::Declaration);
    assert!(!path.is_continuation(None, None));
    path.descend(AncestorKind::ConditionTest);
    assert!(!path.is_continuation(None, None));
    path.ascend();
    path.ascend();
    assert_eq!(path.depth(), 0);
}

#[test]
fn provider_theme_tokens_render_plain_without_color() {
    let theme = PrettyProvider::default();
    let doc = docs![theme.keyword("if"), PrettyTree::Space, theme.number("42")];
    assert_eq!(render(&doc, 80), "if 42");
}
