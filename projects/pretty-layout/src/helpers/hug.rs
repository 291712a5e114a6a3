use super::*;

/// Candidate layouts for a binary operand that can absorb a break on its own,
/// such as a call, a parenthesized expression or a collection literal.
///
/// Tried in order: everything on one line, the operator kept inline with the
/// operand broken internally, and finally the operand moved to its own line
/// one level deeper.
///
/// ```vk
/// value + items([a, b])
///
/// value + items([
///   a,
///   b,
/// ])
///
/// value +
///   items([a, b])
/// ```
pub fn hug_operand(prefix: PrettyTree, operand: PrettyTree) -> PrettyTree {
    let inline = prefix.clone().append(PrettyTree::Space).append(operand.clone());
    let hugged = prefix.clone().append(PrettyTree::Space).append(operand.clone().into_broken());
    let moved = prefix.append(PrettyTree::line_or_space().append(operand).nest(1));
    PrettyTree::choice([inline, hugged, moved])
}
