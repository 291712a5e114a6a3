//! Continuation indentation policy.
//!
//! A translator that indents every nested construct one level deeper
//! produces staircases: `a + b + c` broken at each operator drifts right by
//! one level per operand. The fix is to make indentation a property of the
//! *path* from a node to the root rather than of the node itself: the first
//! construct on the path claims the continuation level, and everything below
//! it reuses the claim instead of stacking a new one.
//!
//! [`TreePath`] records that path explicitly. The translator pushes an
//! [`AncestorKind`] when it descends into a child and pops it on the way back
//! out, then asks [`TreePath::is_continuation`] before emitting a construct
//! that would otherwise claim its own level.

/// Precedence class of a run of binary or logical operators.
///
/// Two chains belong to the same run, and therefore share one continuation
/// level, only when their classes are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Precedence(pub u8);

/// Identity of one call's argument list, distinguishing the list a node sits
/// directly inside from the argument lists of enclosing calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite(pub u32);

/// Layout classification of one ancestor between a node and the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AncestorKind {
    /// A flattened chain of binary or logical operators of one precedence
    /// class.
    OperatorChain(Precedence),
    /// An explicitly parenthesized expression.
    Parenthesized,
    /// A named or keyword argument binding.
    NamedArgument,
    /// A value branch of a conditional expression.
    ConditionValue,
    /// The condition branch of a conditional expression.
    ConditionTest,
    /// The argument list of the identified call.
    ArgumentList(CallSite),
    /// A top level declaration.
    Declaration,
    /// A statement.
    Statement,
    /// An ancestor with no effect on indentation; the walk continues past it.
    Transparent,
    /// Anything the translator cannot classify. Treated as a boundary so an
    /// unrecognized construct opens a fresh indentation scope instead of
    /// silently reusing one.
    Unknown,
}

/// Explicit chain of ancestors for the node currently being translated, the
/// innermost last.
///
/// Keeping the chain beside the walk keeps [`is_continuation`] a pure
/// function of the position being translated; there is no ambient state to
/// invalidate when translation of a subtree is retried.
///
/// [`is_continuation`]: TreePath::is_continuation
#[derive(Debug, Clone, Default)]
pub struct TreePath {
    steps: Vec<AncestorKind>,
}

impl TreePath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that translation moved into a child of a construct of the
    /// given kind.
    pub fn descend(&mut self, kind: AncestorKind) {
        self.steps.push(kind);
    }

    /// Undo the most recent [`descend`](Self::descend).
    pub fn ascend(&mut self) {
        self.steps.pop();
    }

    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// Whether the current position already sits inside a claimed
    /// continuation scope.
    ///
    /// The walk runs from the innermost ancestor outward and the first
    /// non-transparent ancestor decides:
    ///
    /// * an operator chain claims the scope only for chains of the same
    ///   precedence class, so a run of `+` under a run of `or` still indents;
    /// * parentheses, named arguments and condition values always claim it;
    /// * an argument list claims it only for nodes directly inside that same
    ///   call;
    /// * statements, declarations, condition tests and unclassified ancestors
    ///   are boundaries, as is the root.
    ///
    /// A construct for which this returns `true` must not nest its broken
    /// lines a level deeper; the ancestor that claimed the scope already did.
    pub fn is_continuation(&self, precedence: Option<Precedence>, call: Option<CallSite>) -> bool {
        for step in self.steps.iter().rev() {
            match *step {
                AncestorKind::OperatorChain(class) => return Some(class) == precedence,
                AncestorKind::Parenthesized
                | AncestorKind::NamedArgument
                | AncestorKind::ConditionValue => return true,
                AncestorKind::ArgumentList(site) => return Some(site) == call,
                AncestorKind::ConditionTest
                | AncestorKind::Declaration
                | AncestorKind::Statement
                | AncestorKind::Unknown => return false,
                AncestorKind::Transparent => {}
            }
        }
        false
    }
}
