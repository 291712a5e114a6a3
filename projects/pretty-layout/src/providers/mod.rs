use crate::{helpers::PrettySequence, PrettyPrint, PrettyTree, RenderOptions};
use std::{
    borrow::Cow,
    fmt::{Debug, Formatter},
    rc::Rc,
};
use termcolor::{Color, ColorSpec};

fn rgb(r: u8, g: u8, b: u8) -> Rc<ColorSpec> {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Rgb(r, g, b)));
    Rc::new(spec)
}

fn rgb_underline(r: u8, g: u8, b: u8) -> Rc<ColorSpec> {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Rgb(r, g, b)));
    spec.set_underline(true);
    Rc::new(spec)
}

/// Represents a pretty-printable tree provider.
///
/// Carries the render options a translator should print against together
/// with the color theme for each token class.
pub struct PrettyProvider {
    options: RenderOptions,
    keyword: Rc<ColorSpec>,
    string: Rc<ColorSpec>,
    number: Rc<ColorSpec>,
    macros: Rc<ColorSpec>,
    argument: Rc<ColorSpec>,
    argument_mut: Rc<ColorSpec>,
    local: Rc<ColorSpec>,
    local_mut: Rc<ColorSpec>,
    operator: Rc<ColorSpec>,
    structure: Rc<ColorSpec>,
    interface: Rc<ColorSpec>,
}

impl Debug for PrettyProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyProvider").field("options", &self.options).finish()
    }
}

impl Default for PrettyProvider {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl PrettyProvider {
    /// Creates a new pretty-printable tree provider.
    pub fn new(options: RenderOptions) -> Self {
        PrettyProvider {
            options,
            keyword: rgb(197, 119, 207),
            string: rgb(152, 195, 121),
            number: rgb(206, 153, 100),
            macros: rgb(87, 182, 194),
            argument: rgb(239, 112, 117),
            argument_mut: rgb_underline(239, 112, 117),
            local: rgb(152, 195, 121),
            local_mut: rgb_underline(152, 195, 121),
            operator: rgb(90, 173, 238),
            structure: rgb(197, 119, 207),
            interface: rgb(197, 119, 207),
        }
    }
}

impl PrettyProvider {
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
    pub fn get_width(&self) -> usize {
        self.options.print_width
    }
    pub fn set_width(&mut self, width: usize) {
        self.options.print_width = width;
    }
    /// Allocate a document containing the given text.
    pub fn keyword<S>(&self, text: S) -> PrettyTree
    where
        S: Into<Cow<'static, str>>,
    {
        PrettyTree::text(text).annotate(self.keyword.clone())
    }
    /// Allocate a document containing the given text.
    pub fn identifier<S>(&self, text: S) -> PrettyTree
    where
        S: Into<Cow<'static, str>>,
    {
        PrettyTree::text(text).annotate(self.operator.clone())
    }
    /// Allocate a document containing the given text.
    pub fn generic<S>(&self, text: S) -> PrettyTree
    where
        S: Into<Cow<'static, str>>,
    {
        PrettyTree::text(text).annotate(self.macros.clone())
    }

    /// Allocate a document containing the given text.
    pub fn variable<S>(&self, text: S, mutable: bool) -> PrettyTree
    where
        S: Into<Cow<'static, str>>,
    {
        if mutable {
            PrettyTree::text(text).annotate(self.local_mut.clone())
        }
        else {
            PrettyTree::text(text).annotate(self.local.clone())
        }
    }
    /// Allocate a document containing the given text.
    pub fn argument<S>(&self, text: S, mutable: bool) -> PrettyTree
    where
        S: Into<Cow<'static, str>>,
    {
        if mutable {
            PrettyTree::text(text).annotate(self.argument_mut.clone())
        }
        else {
            PrettyTree::text(text).annotate(self.argument.clone())
        }
    }
    /// Allocate a document containing the given text.
    pub fn operator<S>(&self, text: S) -> PrettyTree
    where
        S: Into<Cow<'static, str>>,
    {
        PrettyTree::text(text).annotate(self.operator.clone())
    }
    /// Allocate a document containing the given text.
    pub fn string<S>(&self, text: S) -> PrettyTree
    where
        S: Into<Cow<'static, str>>,
    {
        PrettyTree::text(text).annotate(self.string.clone())
    }
    /// Allocate a document containing the given text.
    pub fn annotation<S>(&self, text: S) -> PrettyTree
    where
        S: Into<Cow<'static, str>>,
    {
        PrettyTree::text(text).annotate(self.macros.clone())
    }
    /// Allocate a document containing the given text.
    pub fn number<S>(&self, text: S) -> PrettyTree
    where
        S: Into<Cow<'static, str>>,
    {
        PrettyTree::text(text).annotate(self.number.clone())
    }
    /// Allocate a document containing the given text.
    pub fn structure<S>(&self, text: S) -> PrettyTree
    where
        S: Into<Cow<'static, str>>,
    {
        PrettyTree::text(text).annotate(self.structure.clone())
    }
    /// Allocate a document containing the given text.
    pub fn interface<S>(&self, text: S) -> PrettyTree
    where
        S: Into<Cow<'static, str>>,
    {
        PrettyTree::text(text).annotate(self.interface.clone())
    }
}

impl PrettyProvider {
    pub fn join_slice<I, T>(&self, iter: &[I], joint: T) -> PrettyTree
    where
        I: PrettyPrint,
        T: PrettyPrint,
    {
        let mut iters = iter.iter().map(|x| x.pretty(self));
        let mut terms = PrettySequence::new(iter.len() * 2);
        terms += iters.next().unwrap_or(PrettyTree::Nil);
        for term in iters {
            terms += joint.pretty(self);
            terms += term;
        }
        terms.into()
    }
    pub fn concat<T>(&self, iter: &[T]) -> PrettyTree
    where
        T: PrettyPrint,
    {
        let mut out = PrettyTree::Nil;
        for term in iter {
            out = out.append(term.pretty(self));
        }
        out
    }
}
