use super::*;
use crate::PrettyBuilder;

#[derive(Clone, Debug, Default)]
pub struct PrettySequence {
    items: Vec<PrettyTree>,
}

impl PrettySequence {
    pub fn new(capacity: usize) -> Self {
        Self { items: Vec::with_capacity(capacity) }
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
    pub fn push<T>(&mut self, item: T)
    where
        T: Into<PrettyTree>,
    {
        self.items.push(item.into());
    }
    pub fn extend<I, T>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<PrettyTree>,
    {
        self.items.extend(items.into_iter().map(|x| x.into()));
    }
    /// Finish the sequence raised by `levels` indentation units.
    pub fn nest(self, levels: usize) -> PrettyTree {
        PrettyTree::from(self).nest(levels)
    }
    /// Finish the sequence as a group.
    pub fn group(self) -> PrettyTree {
        PrettyTree::from(self).group()
    }
}

impl PrettyBuilder for PrettySequence {
    fn flat_alt<E>(self, inline: E) -> PrettyTree
    where
        E: Into<PrettyTree>,
    {
        PrettyTree::from(self).flat_alt(inline)
    }
}

impl<T> AddAssign<T> for PrettySequence
where
    T: Into<PrettyTree>,
{
    fn add_assign(&mut self, rhs: T) {
        self.push(rhs);
    }
}

impl From<PrettySequence> for PrettyTree {
    fn from(value: PrettySequence) -> Self {
        Self::concat(value.items)
    }
}
