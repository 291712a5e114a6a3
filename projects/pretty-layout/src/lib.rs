#![deny(missing_debug_implementations)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]
#![doc = include_str!("../readme.md")]

mod continuation;
mod helpers;
mod providers;
mod render;
mod traits;
mod tree;

pub use crate::{
    continuation::{AncestorKind, CallSite, Precedence, TreePath},
    helpers::{hug_operand, HardBlock, KAndRBracket, OperatorChain, PrettySequence, SoftBlock},
    providers::PrettyProvider,
    render::{best, FmtWrite, IoWrite, Render, RenderAnnotated, RenderOptions, TerminalWriter},
    traits::{PrettyBuilder, PrettyPrint},
    tree::{PrettyFormatter, PrettyTree},
};

/// Concatenates a number of documents (or values that can be converted into a
/// document, like `&str`).
///
/// ```
/// use pretty_layout::{docs, PrettyTree};
/// let doc = docs![
///     "let",
///     PrettyTree::Space,
///     "x",
///     PrettyTree::Space,
///     "=",
///     PrettyTree::Space,
///     Some("123"),
/// ];
/// assert_eq!(doc.pretty(80).to_string(), "let x = 123");
/// ```
#[macro_export]
macro_rules! docs {
    () => {
        $crate::PrettyTree::Nil
    };
    ($first: expr $(,)?) => {
        $crate::PrettyTree::from($first)
    };
    ($first: expr $(, $rest: expr)+ $(,)?) => {{
        let mut doc = $crate::PrettyTree::from($first);
        $(
            doc = doc.append($rest);
        )*
        doc
    }};
}
