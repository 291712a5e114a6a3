use super::*;
use crate::Precedence;

/// A run of same precedence binary operators flattened into one group.
///
/// Flattening before emission is what keeps nested chains from forming a
/// staircase: every operator in the run shares a single break decision and a
/// single continuation level, claimed here only when no ancestor on the
/// [`TreePath`](crate::TreePath) claimed one already.
///
/// ```vk
/// aaa + bbb + ccc
///
/// aaa
///   + bbb
///   + ccc
/// ```
#[derive(Clone, Debug)]
pub struct OperatorChain {
    precedence: Precedence,
    head: PrettyTree,
    tail: Vec<(PrettyTree, PrettyTree)>,
}

impl OperatorChain {
    /// Start a chain at its leftmost operand.
    pub fn new<T>(precedence: Precedence, head: T) -> Self
    where
        T: Into<PrettyTree>,
    {
        Self { precedence, head: head.into(), tail: Vec::new() }
    }

    pub fn precedence(&self) -> Precedence {
        self.precedence
    }

    /// Extend the chain with one operator and its right operand.
    pub fn push<O, T>(&mut self, operator: O, operand: T)
    where
        O: Into<PrettyTree>,
        T: Into<PrettyTree>,
    {
        self.tail.push((operator.into(), operand.into()));
    }

    /// Finish the chain.
    ///
    /// The broken layout puts each operator at the start of its line. Pass
    /// `continuation: true` when an ancestor already claimed the
    /// continuation level; the chain then breaks at the current level
    /// instead of nesting deeper.
    pub fn into_doc(self, continuation: bool) -> PrettyTree {
        if self.tail.is_empty() {
            return self.head;
        }
        let mut tail = PrettySequence::new(self.tail.len() * 4);
        for (operator, operand) in self.tail {
            tail += PrettyTree::line_or_space();
            tail += operator;
            tail += PrettyTree::Space;
            tail += operand;
        }
        let levels = if continuation { 0 } else { 1 };
        self.head.append(tail.nest(levels)).group()
    }
}
