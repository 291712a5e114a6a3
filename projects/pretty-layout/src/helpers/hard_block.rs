use super::*;

/// A bracketed block whose items always sit on their own lines.
///
/// ```vk
/// {
///   a,
///   b,
/// }
/// ```
#[derive(Clone, Debug)]
pub struct HardBlock {
    /// Indentation units claimed by the block body
    pub nest: usize,
    /// The left hand side of the block
    pub lhs: &'static str,
    /// The right hand side of the block
    pub rhs: &'static str,
    /// The joint between adjacent items
    pub joint: PrettyTree,
}

impl HardBlock {
    /// Build a new hard block
    pub fn new(lhs: &'static str, rhs: &'static str) -> Self {
        Self { lhs, rhs, nest: 1, joint: PrettyTree::Hardline }
    }
    /// Build a new hard block with the parentheses syntax
    pub fn parentheses() -> Self {
        Self::new("(", ")")
    }
    /// Build a new hard block with the brackets syntax
    pub fn brackets() -> Self {
        Self::new("[", "]")
    }
    /// Build a new hard block with the curly braces syntax
    pub fn curly_braces() -> Self {
        Self::new("{", "}")
    }
    /// Set the joint between adjacent items
    pub fn with_joint(self, joint: PrettyTree) -> Self {
        Self { joint, ..self }
    }
    /// Set the indentation units claimed by the block body
    pub fn with_nest(self, nest: usize) -> Self {
        Self { nest, ..self }
    }
}

impl HardBlock {
    /// Join a slice of pretty printables with the hard block
    pub fn join_slice<T: PrettyPrint>(&self, slice: &[T], theme: &PrettyProvider) -> PrettyTree {
        if slice.is_empty() {
            return PrettyTree::text(self.lhs).append(self.rhs);
        }
        let mut inner = PrettySequence::new(slice.len() * 2 + 1);
        inner += PrettyTree::Hardline;
        for (idx, term) in slice.iter().enumerate() {
            if idx != 0 {
                inner += self.joint.clone();
            }
            inner += term.pretty(theme);
        }
        let mut outer = PrettySequence::new(4);
        outer += self.lhs;
        outer += inner.nest(self.nest);
        outer += PrettyTree::Hardline;
        outer += self.rhs;
        outer.into()
    }
}
