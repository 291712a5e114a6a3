use crate::{
    render::{best, RenderAnnotated, RenderOptions},
    FmtWrite, IoWrite, PrettyBuilder, TerminalWriter,
};
use std::{
    borrow::Cow,
    fmt::{Display, Formatter},
    rc::Rc,
};
use termcolor::{ColorSpec, WriteColor};
use unicode_segmentation::UnicodeSegmentation;

mod display;
mod into;

/// The concrete document type: a tree of text with optional break points.
///
/// Build one with the constructors on `PrettyTree` (or the helper builders in
/// this crate), then hand it to one of the `render*` methods. Children are
/// reference counted, so cloning a node is cheap and subtrees can be reused
/// while building.
pub enum PrettyTree {
    Nil,
    /// Literal owned text. Measured by byte length; build it through
    /// [`text`](Self::text), which wraps non-ascii content in `RenderLen`
    /// so it is measured per grapheme instead.
    Text(Rc<str>),
    /// Literal borrowed text, with the same measurement caveat as `Text`.
    StaticText(&'static str),
    /// Stores the grapheme length of a string document that is not just ascii.
    RenderLen { len: usize, doc: Rc<Self> },
    Append { lhs: Rc<Self>, rhs: Rc<Self> },
    /// Acts as `block` when laid out on multiple lines and as `inline` when
    /// laid out on a single line.
    MaybeInline { block: Rc<Self>, inline: Rc<Self> },
    /// A line break that always happens and indents the next line.
    Hardline,
    /// A line break that always happens and does not indent, for embedded
    /// verbatim text that must keep its own column zero.
    VerbatimLine,
    /// Raises the indentation level of every line rendered inside by `levels`
    /// units. A unit is `indent_width` spaces, or one tab.
    Nest { levels: usize, doc: Rc<Self> },
    /// A unit of breaking: rendered on one line when it fits, otherwise every
    /// break point inside renders broken. `broken` is set when the caller
    /// forces it or when a hard line inside makes the flat layout impossible;
    /// it is computed once, when the group is built.
    Group { items: Rc<Self>, broken: bool },
    /// Alternating content and separator documents, packed one pair at a time
    /// so a long sequence can mix flat and broken segments.
    Fill { items: Rc<[Self]> },
    /// Candidate layouts tried in order; the first whose leading line fits is
    /// rendered, and the last is rendered broken when none fit.
    Choice { candidates: Rc<[Self]> },
    /// Colors `doc` when rendered to a terminal; has no effect on layout.
    Annotated { color: Rc<ColorSpec>, doc: Rc<Self> },
}

#[allow(non_upper_case_globals)]
impl PrettyTree {
    pub const Space: Self = PrettyTree::StaticText(" ");

    /// A line that breaks when its group breaks and renders as a space when
    /// the group stays on a single line.
    #[inline]
    pub fn line_or_space() -> Self {
        Self::Hardline.flat_alt(Self::Space)
    }

    /// Acts like `line_or_space` but renders as nothing on a single line.
    #[inline]
    pub fn line_or_nil() -> Self {
        Self::Hardline.flat_alt(Self::Nil)
    }

    /// A line break that always happens, even inside a flat group.
    #[inline]
    pub fn hardline() -> Self {
        Self::Hardline
    }

    /// A line break with no indentation after it.
    #[inline]
    pub fn verbatim_line() -> Self {
        Self::VerbatimLine
    }
}

impl PrettyTree {
    /// The given text, which must not contain line breaks.
    #[inline]
    pub fn text<U: Into<Cow<'static, str>>>(data: U) -> Self {
        match data.into() {
            Cow::Borrowed(s) => PrettyTree::StaticText(s),
            Cow::Owned(s) => PrettyTree::Text(Rc::from(s)),
        }
        .with_utf8_len()
    }

    /// Text that may contain line breaks; each embedded `\n` becomes a
    /// [`VerbatimLine`](Self::VerbatimLine) so the following lines keep their
    /// own columns instead of picking up the surrounding indentation.
    pub fn verbatim(data: &str) -> Self {
        let mut out = Self::Nil;
        for (index, line) in data.split('\n').enumerate() {
            if index != 0 {
                out += Self::VerbatimLine;
            }
            if !line.is_empty() {
                out += Self::text(line.to_string());
            }
        }
        out
    }

    fn with_utf8_len(self) -> Self {
        let len = match &self {
            Self::Text(s) if !s.is_ascii() => s.graphemes(true).count(),
            Self::StaticText(s) if !s.is_ascii() => s.graphemes(true).count(),
            _ => return self,
        };
        Self::RenderLen { len, doc: Rc::new(self) }
    }

    /// Append the given document after this document.
    #[inline]
    pub fn append<E>(self, follow: E) -> Self
    where
        E: Into<PrettyTree>,
    {
        let rhs = follow.into();
        match (&self, &rhs) {
            (Self::Nil, _) => rhs,
            (_, Self::Nil) => self,
            _ => Self::Append { lhs: Rc::new(self), rhs: Rc::new(rhs) },
        }
    }

    pub fn concat<I>(docs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PrettyTree>,
    {
        let mut head = Self::Nil;
        for item in docs.into_iter() {
            head += item.into();
        }
        head
    }

    /// Joins an iterator of documents, interspersing `joint` between them.
    pub fn join<I>(docs: I, joint: Self) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PrettyTree>,
    {
        let mut head = Self::Nil;
        for (index, item) in docs.into_iter().enumerate() {
            if index != 0 {
                head += joint.clone();
            }
            head += item.into();
        }
        head
    }

    /// Mark this document as a group.
    ///
    /// Groups are laid out on a single line if possible. Within a group, all
    /// break points are decided together: either everything renders inline or
    /// every one of them breaks; nested groups decide for themselves.
    ///
    /// ```
    /// use pretty_layout::PrettyTree;
    /// let doc = PrettyTree::text("a").append(PrettyTree::line_or_space()).append("b").group();
    /// assert_eq!(doc.pretty(80).to_string(), "a b");
    /// assert_eq!(doc.pretty(1).to_string(), "a\nb");
    /// ```
    #[inline]
    pub fn group(self) -> Self {
        match self {
            Self::Group { .. } | Self::Text(_) | Self::StaticText(_) | Self::Nil => self,
            _ => {
                let broken = self.wants_break();
                Self::Group { items: Rc::new(self), broken }
            }
        }
    }

    /// A group that always renders broken, regardless of fit.
    #[inline]
    pub fn group_break(self) -> Self {
        Self::Group { items: Rc::new(self), broken: true }
    }

    /// Force the outermost group of this document broken; documents that are
    /// not groups are wrapped in a broken one.
    pub fn into_broken(self) -> Self {
        match self {
            Self::Group { items, .. } => Self::Group { items, broken: true },
            other => other.group_break(),
        }
    }

    /// Raise the indentation level of this document by `levels` units.
    #[inline]
    pub fn nest(self, levels: usize) -> Self {
        if levels == 0 {
            return self;
        }
        match self {
            Self::Nil => Self::Nil,
            _ => Self::Nest { levels, doc: Rc::new(self) },
        }
    }

    /// Raise the indentation level by one unit.
    #[inline]
    pub fn indent(self) -> Self {
        self.nest(1)
    }

    /// Alternating content and separator documents. Unlike a group, each
    /// separator decides on its own whether to break, measured against the
    /// width remaining after the content before it.
    pub fn fill<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PrettyTree>,
    {
        let items: Vec<Self> = items.into_iter().map(Into::into).collect();
        if items.is_empty() { Self::Nil } else { Self::Fill { items: Rc::from(items) } }
    }

    /// Candidate layouts tried in order. The first candidate whose leading
    /// line fits the remaining width is rendered flat; if none fit, the last
    /// candidate is rendered broken.
    pub fn choice<I>(candidates: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PrettyTree>,
    {
        let mut candidates: Vec<Self> = candidates.into_iter().map(Into::into).collect();
        match candidates.len() {
            0 => Self::Nil,
            1 => match candidates.pop() {
                Some(doc) => doc,
                None => Self::Nil,
            },
            _ => Self::Choice { candidates: Rc::from(candidates) },
        }
    }

    #[inline]
    pub fn annotate(self, color: Rc<ColorSpec>) -> Self {
        Self::Annotated { color, doc: Rc::new(self) }
    }

    /// Puts `self` between `before` and `after`.
    #[inline]
    pub fn enclose<E, F>(self, before: E, after: F) -> Self
    where
        E: Into<Self>,
        F: Into<Self>,
    {
        before.into().append(self).append(after.into())
    }

    pub fn single_quotes(self) -> Self {
        self.enclose("'", "'")
    }

    pub fn double_quotes(self) -> Self {
        self.enclose("\"", "\"")
    }

    pub fn parens(self) -> Self {
        self.enclose("(", ")")
    }

    pub fn angles(self) -> Self {
        self.enclose("<", ">")
    }

    pub fn braces(self) -> Self {
        self.enclose("{", "}")
    }

    pub fn brackets(self) -> Self {
        self.enclose("[", "]")
    }

    /// True when the flat layout of this document is impossible because a
    /// hard line sits inside it. Evaluated once per group, at construction;
    /// a nested group contributes its own cached answer.
    pub(crate) fn wants_break(&self) -> bool {
        match self {
            Self::Hardline | Self::VerbatimLine => true,
            Self::MaybeInline { inline, .. } => inline.wants_break(),
            Self::Append { lhs, rhs } => lhs.wants_break() || rhs.wants_break(),
            Self::Nest { doc, .. } | Self::RenderLen { doc, .. } | Self::Annotated { doc, .. } => {
                doc.wants_break()
            }
            Self::Group { broken, .. } => *broken,
            Self::Fill { items } => items.iter().any(Self::wants_break),
            Self::Choice { candidates } => candidates.iter().all(Self::wants_break),
            Self::Nil | Self::Text(_) | Self::StaticText(_) => false,
        }
    }
}

impl PrettyBuilder for PrettyTree {
    #[inline]
    fn flat_alt<E>(self, inline: E) -> PrettyTree
    where
        E: Into<PrettyTree>,
    {
        Self::MaybeInline { block: Rc::new(self), inline: Rc::new(inline.into()) }
    }
}

impl PrettyTree {
    /// Writes a rendered document to a `std::io::Write` object.
    #[inline]
    pub fn render<W>(&self, width: usize, out: &mut W) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        self.render_with(&RenderOptions::width(width), out)
    }

    /// Writes a rendered document to a `std::io::Write` object with explicit
    /// render options.
    #[inline]
    pub fn render_with<W>(&self, options: &RenderOptions, out: &mut W) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        self.render_raw(options, &mut IoWrite::new(out))
    }

    /// Writes a rendered document to a `std::fmt::Write` object.
    #[inline]
    pub fn render_fmt<W>(&self, width: usize, out: &mut W) -> std::fmt::Result
    where
        W: ?Sized + std::fmt::Write,
    {
        self.render_fmt_with(&RenderOptions::width(width), out)
    }

    /// Writes a rendered document to a `std::fmt::Write` object with explicit
    /// render options.
    #[inline]
    pub fn render_fmt_with<W>(&self, options: &RenderOptions, out: &mut W) -> std::fmt::Result
    where
        W: ?Sized + std::fmt::Write,
    {
        self.render_raw(options, &mut FmtWrite::new(out))
    }

    /// Writes a rendered document to any annotated sink.
    #[inline]
    pub fn render_raw<W>(&self, options: &RenderOptions, out: &mut W) -> Result<(), W::Error>
    where
        W: ?Sized + RenderAnnotated,
    {
        best(self, options, out)
    }

    /// Writes a rendered document with its color annotations to a terminal.
    #[inline]
    pub fn render_colored<W>(&self, width: usize, out: W) -> std::io::Result<()>
    where
        W: WriteColor,
    {
        self.render_colored_with(&RenderOptions::width(width), out)
    }

    #[inline]
    pub fn render_colored_with<W>(&self, options: &RenderOptions, out: W) -> std::io::Result<()>
    where
        W: WriteColor,
    {
        self.render_raw(options, &mut TerminalWriter::new(out))
    }

    /// Returns a value which implements `std::fmt::Display`.
    ///
    /// ```
    /// use pretty_layout::PrettyTree;
    /// let doc = PrettyTree::text("hello").append(PrettyTree::line_or_space()).append("world").group();
    /// assert_eq!(format!("{}", doc.pretty(80)), "hello world");
    /// ```
    #[inline]
    pub fn pretty(&self, width: usize) -> PrettyFormatter {
        PrettyFormatter { tree: self, options: RenderOptions::width(width) }
    }

    /// Like [`pretty`](Self::pretty) with explicit render options.
    #[inline]
    pub fn pretty_with(&self, options: RenderOptions) -> PrettyFormatter {
        PrettyFormatter { tree: self, options }
    }
}

/// Display adapter returned by [`PrettyTree::pretty`].
#[derive(Debug)]
pub struct PrettyFormatter<'a> {
    tree: &'a PrettyTree,
    options: RenderOptions,
}

impl<'a> Display for PrettyFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.tree.render_raw(&self.options, &mut FmtWrite::new(f))
    }
}
