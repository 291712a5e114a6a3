use super::*;
use crate::PrettyBuilder;

/// A bracketed block that stays inline when it fits and breaks one level
/// deeper when it does not.
///
/// ```vk
/// {a, b, c}
///
/// {
///   a,
///   b,
/// }
/// ```
#[derive(Clone, Debug)]
pub struct SoftBlock {
    /// Indentation units claimed by the broken layout
    pub nest: usize,
    /// The left hand side of the block
    pub lhs: &'static str,
    /// The right hand side of the block
    pub rhs: &'static str,
    /// The joint between adjacent items
    pub joint: PrettyTree,
    /// Emitted after the last item, only in the broken layout
    pub tail: PrettyTree,
}

impl SoftBlock {
    /// Build a new soft block
    pub fn new(lhs: &'static str, rhs: &'static str) -> Self {
        Self { lhs, rhs, nest: 1, joint: PrettyTree::line_or_space(), tail: PrettyTree::Nil }
    }
    /// Build a new soft block with the tuple syntax
    pub fn tuple() -> Self {
        Self::new("(", ")")
    }
    /// Build a new soft block with the parentheses syntax
    pub fn parentheses() -> Self {
        Self::new("(", ")")
    }
    /// Build a new soft block with the brackets syntax
    pub fn brackets() -> Self {
        Self::new("[", "]")
    }
    /// Build a new soft block with the curly braces syntax
    pub fn curly_braces() -> Self {
        Self::new("{", "}")
    }
    /// Set the joint between adjacent items
    pub fn with_joint(self, joint: PrettyTree) -> Self {
        Self { joint, ..self }
    }
    /// Set the trailing item, typically a trailing comma
    pub fn with_tail<T: Into<PrettyTree>>(self, tail: T) -> Self {
        Self { tail: tail.into(), ..self }
    }
    /// Set the indentation units claimed by the broken layout
    pub fn with_nest(self, nest: usize) -> Self {
        Self { nest, ..self }
    }
}

impl SoftBlock {
    /// Join a slice of pretty printables with the soft block
    pub fn join_slice<T: PrettyPrint>(&self, slice: &[T], theme: &PrettyProvider) -> PrettyTree {
        if slice.is_empty() {
            return PrettyTree::text(self.lhs).append(self.rhs);
        }
        let mut inner = PrettySequence::new(slice.len() * 2 + 2);
        inner += PrettyTree::line_or_nil();
        for (idx, term) in slice.iter().enumerate() {
            if idx != 0 {
                inner += self.joint.clone();
            }
            inner += term.pretty(theme);
        }
        if !matches!(self.tail, PrettyTree::Nil) {
            inner += self.tail.clone().flat_alt(PrettyTree::Nil);
        }
        let mut outer = PrettySequence::new(4);
        outer += self.lhs;
        outer += inner.nest(self.nest);
        outer += PrettyTree::line_or_nil();
        outer += self.rhs;
        outer.group()
    }
}
