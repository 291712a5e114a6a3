use super::*;
use std::fmt::Debug;

impl Default for PrettyTree {
    fn default() -> Self {
        Self::Nil
    }
}

impl Clone for PrettyTree {
    fn clone(&self) -> Self {
        match self {
            Self::Nil => Self::Nil,
            Self::Hardline => Self::Hardline,
            Self::VerbatimLine => Self::VerbatimLine,
            Self::Text(s) => Self::Text(s.clone()),
            Self::StaticText(s) => Self::StaticText(s),
            Self::RenderLen { len, doc } => Self::RenderLen { len: *len, doc: doc.clone() },
            Self::Append { lhs, rhs } => Self::Append { lhs: lhs.clone(), rhs: rhs.clone() },
            Self::MaybeInline { block, inline } => {
                Self::MaybeInline { block: block.clone(), inline: inline.clone() }
            }
            Self::Nest { levels, doc } => Self::Nest { levels: *levels, doc: doc.clone() },
            Self::Group { items, broken } => Self::Group { items: items.clone(), broken: *broken },
            Self::Fill { items } => Self::Fill { items: items.clone() },
            Self::Choice { candidates } => Self::Choice { candidates: candidates.clone() },
            Self::Annotated { color, doc } => {
                Self::Annotated { color: color.clone(), doc: doc.clone() }
            }
        }
    }
}

impl Debug for PrettyTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let is_line = |doc: &PrettyTree| match doc {
            PrettyTree::MaybeInline { block, inline } => {
                matches!((&**block, &**inline), (PrettyTree::Hardline, PrettyTree::StaticText(" ")))
            }
            _ => false,
        };
        let is_line_ = |doc: &PrettyTree| match doc {
            PrettyTree::MaybeInline { block, inline } => {
                matches!((&**block, &**inline), (PrettyTree::Hardline, PrettyTree::Nil))
            }
            _ => false,
        };
        match self {
            PrettyTree::Nil => f.debug_tuple("Nil").finish(),
            PrettyTree::Append { lhs: _, rhs: _ } => {
                let mut f = f.debug_list();
                append_docs(self, &mut |doc| {
                    f.entry(doc);
                });
                f.finish()
            }
            _ if is_line(self) => f.debug_tuple("Line").finish(),
            _ if is_line_(self) => f.debug_tuple("Line?").finish(),
            PrettyTree::MaybeInline { block, inline } => {
                f.debug_tuple("FlatAlt").field(block).field(inline).finish()
            }
            PrettyTree::Group { items, broken } => {
                if *broken {
                    return f.debug_tuple("Group!").field(items).finish();
                }
                if is_line(items) {
                    return f.debug_tuple("SoftLine").finish();
                }
                if is_line_(items) {
                    return f.debug_tuple("SoftLine?").finish();
                }
                f.debug_tuple("Group").field(items).finish()
            }
            PrettyTree::Nest { levels, doc } => {
                f.debug_tuple("Nest").field(levels).field(doc).finish()
            }
            PrettyTree::Hardline => f.debug_tuple("Hardline").finish(),
            PrettyTree::VerbatimLine => f.debug_tuple("VerbatimLine").finish(),
            PrettyTree::RenderLen { doc, .. } => doc.fmt(f),
            PrettyTree::Text(s) => Debug::fmt(s, f),
            PrettyTree::StaticText(s) => Debug::fmt(s, f),
            PrettyTree::Fill { items } => f.debug_tuple("Fill").field(items).finish(),
            PrettyTree::Choice { candidates } => f.debug_tuple("Choice").field(candidates).finish(),
            PrettyTree::Annotated { color, doc } => {
                f.debug_tuple("Annotated").field(color).field(doc).finish()
            }
        }
    }
}

fn append_docs(mut doc: &PrettyTree, consumer: &mut impl FnMut(&PrettyTree)) {
    loop {
        match doc {
            PrettyTree::Append { lhs, rhs } => {
                append_docs(lhs, consumer);
                doc = rhs;
            }
            _ => break consumer(doc),
        }
    }
}
