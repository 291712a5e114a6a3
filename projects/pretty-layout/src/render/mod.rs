use crate::PrettyTree;
use std::{cmp, rc::Rc};
use termcolor::ColorSpec;

mod terminal;
mod write_fmt;
mod write_io;

pub use self::{terminal::TerminalWriter, write_fmt::FmtWrite, write_io::IoWrite};

/// Options shared by every render entry point.
///
/// `print_width` is the target line width in columns; lines longer than it
/// are allowed when no break point exists, layout never fails. One level of
/// indentation is `indent_width` spaces, or a single tab when `use_tabs` is
/// set (a tab counts as one column when measuring).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub print_width: usize,
    pub indent_width: usize,
    pub use_tabs: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { print_width: 80, indent_width: 2, use_tabs: false }
    }
}

impl RenderOptions {
    /// Default options with the given line width.
    pub fn width(print_width: usize) -> Self {
        Self { print_width, ..Self::default() }
    }

    pub fn with_indent_width(self, indent_width: usize) -> Self {
        Self { indent_width, ..self }
    }

    pub fn with_tabs(self, use_tabs: bool) -> Self {
        Self { use_tabs, ..self }
    }

    /// The column reached after emitting `levels` units of indentation.
    fn indent_columns(&self, levels: usize) -> usize {
        if self.use_tabs { levels } else { levels * self.indent_width }
    }
}

/// Trait representing the operations necessary to render a document.
pub trait Render {
    type Error;

    fn write_str(&mut self, s: &str) -> Result<usize, Self::Error>;

    fn write_str_all(&mut self, mut s: &str) -> Result<(), Self::Error> {
        while !s.is_empty() {
            let count = self.write_str(s)?;
            s = &s[count..];
        }
        Ok(())
    }
}

/// Trait representing the operations necessary to write an annotated document.
pub trait RenderAnnotated: Render {
    fn push_annotation(&mut self, color: &ColorSpec) -> Result<(), Self::Error>;
    fn pop_annotation(&mut self) -> Result<(), Self::Error>;
}

macro_rules! make_spaces {
    () => { "" };
    ($s: tt $($t: tt)*) => { concat!("          ", make_spaces!($($t)*)) };
}

pub(crate) const SPACES: &str = make_spaces!(,,,,,,,,,,);

fn write_spaces<W>(spaces: usize, out: &mut W) -> Result<(), W::Error>
where
    W: ?Sized + Render,
{
    let mut inserted = 0;
    while inserted < spaces {
        let insert = cmp::min(SPACES.len(), spaces - inserted);
        inserted += out.write_str(&SPACES[..insert])?;
    }

    Ok(())
}

/// Layout mode for a subtree: `Flat` keeps every optional break inline,
/// `Break` takes them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Mode {
    Break,
    Flat,
}

/// One pending unit of work on the layout stack.
enum Task {
    Doc { indent: usize, mode: Mode, doc: Rc<PrettyTree> },
    /// The unprocessed remainder of a fill, resumed once the pair before it
    /// has been rendered and the cursor is known.
    FillRest { indent: usize, items: Rc<[PrettyTree]>, at: usize },
}

/// Renders `doc` into `out` according to `options`.
///
/// The layout walk is iterative: a stack of tasks replaces recursion, so
/// document depth is bounded by heap, not call stack. Groups are measured
/// with [`Best::fits_from`] against the remaining width, and every decision
/// is final; there is no backtracking over emitted text.
pub fn best<W>(doc: &PrettyTree, options: &RenderOptions, out: &mut W) -> Result<(), W::Error>
where
    W: ?Sized + RenderAnnotated,
{
    Best {
        pos: 0,
        tasks: vec![Task::Doc { indent: 0, mode: Mode::Break, doc: Rc::new(doc.clone()) }],
        fit_queue: vec![],
        annotation_levels: vec![],
        options: options.clone(),
    }
    .run(out)
}

struct Best {
    pos: usize,
    tasks: Vec<Task>,
    fit_queue: Vec<(Mode, Rc<PrettyTree>)>,
    annotation_levels: Vec<usize>,
    options: RenderOptions,
}

impl Best {
    fn run<W>(&mut self, out: &mut W) -> Result<(), W::Error>
    where
        W: ?Sized + RenderAnnotated,
    {
        while let Some(task) = self.tasks.pop() {
            match task {
                Task::FillRest { indent, items, at } => self.step_fill(indent, items, at),
                Task::Doc { indent, mode, doc } => match &*doc {
                    PrettyTree::Nil => {}
                    PrettyTree::Text(s) => {
                        out.write_str_all(s)?;
                        self.pos += s.len();
                    }
                    PrettyTree::StaticText(s) => {
                        out.write_str_all(s)?;
                        self.pos += s.len();
                    }
                    PrettyTree::RenderLen { len, doc } => {
                        match &**doc {
                            PrettyTree::Text(s) => out.write_str_all(s)?,
                            PrettyTree::StaticText(s) => out.write_str_all(s)?,
                            _ => {}
                        }
                        self.pos += len;
                    }
                    PrettyTree::Append { lhs, rhs } => {
                        self.tasks.push(Task::Doc { indent, mode, doc: rhs.clone() });
                        self.tasks.push(Task::Doc { indent, mode, doc: lhs.clone() });
                    }
                    PrettyTree::MaybeInline { block, inline } => {
                        let chosen = match mode {
                            Mode::Break => block,
                            Mode::Flat => inline,
                        };
                        self.tasks.push(Task::Doc { indent, mode, doc: chosen.clone() });
                    }
                    PrettyTree::Hardline => self.write_line_break(indent, out)?,
                    PrettyTree::VerbatimLine => {
                        out.write_str_all("\n")?;
                        self.pos = 0;
                    }
                    PrettyTree::Nest { levels, doc } => {
                        self.tasks.push(Task::Doc { indent: indent + levels, mode, doc: doc.clone() });
                    }
                    PrettyTree::Group { items, broken } => {
                        let mode = if *broken {
                            Mode::Break
                        }
                        else if let Mode::Break = mode {
                            // The enclosing context already broke; this group
                            // still earns a flat layout when it fits together
                            // with whatever follows it on the line.
                            match self.fits_from(&[items.clone()], self.pos, true) {
                                true => Mode::Flat,
                                false => Mode::Break,
                            }
                        }
                        else {
                            Mode::Flat
                        };
                        self.tasks.push(Task::Doc { indent, mode, doc: items.clone() });
                    }
                    PrettyTree::Fill { items } => self.step_fill(indent, items.clone(), 0),
                    PrettyTree::Choice { candidates } => {
                        if let Some((fallback, preferred)) = candidates.split_last() {
                            self.step_choice(indent, mode, preferred, fallback);
                        }
                    }
                    PrettyTree::Annotated { color, doc } => {
                        out.push_annotation(color)?;
                        self.annotation_levels.push(self.tasks.len());
                        self.tasks.push(Task::Doc { indent, mode, doc: doc.clone() });
                    }
                },
            }
            while self.annotation_levels.last() == Some(&self.tasks.len()) {
                self.annotation_levels.pop();
                out.pop_annotation()?;
            }
        }
        Ok(())
    }

    fn write_line_break<W>(&mut self, indent: usize, out: &mut W) -> Result<(), W::Error>
    where
        W: ?Sized + RenderAnnotated,
    {
        out.write_str_all("\n")?;
        if self.options.use_tabs {
            for _ in 0..indent {
                out.write_str_all("\t")?;
            }
        }
        else {
            write_spaces(indent * self.options.indent_width, out)?;
        }
        self.pos = self.options.indent_columns(indent);
        Ok(())
    }

    /// Picks the first candidate whose leading line fits; falls back to the
    /// last candidate in break mode. Candidates are measured in isolation,
    /// without the trailing content of the document, so a choice made here
    /// never depends on siblings.
    fn step_choice(
        &mut self,
        indent: usize,
        mode: Mode,
        preferred: &[PrettyTree],
        fallback: &PrettyTree,
    ) {
        if let Mode::Flat = mode {
            let first = preferred.first().unwrap_or(fallback);
            self.tasks.push(Task::Doc { indent, mode: Mode::Flat, doc: Rc::new(first.clone()) });
            return;
        }
        for candidate in preferred {
            if self.fits_from(&[Rc::new(candidate.clone())], self.pos, false) {
                self.tasks.push(Task::Doc {
                    indent,
                    mode: Mode::Flat,
                    doc: Rc::new(candidate.clone()),
                });
                return;
            }
        }
        self.tasks.push(Task::Doc { indent, mode: Mode::Break, doc: Rc::new(fallback.clone()) });
    }

    /// Advances a fill by one content/separator pair.
    ///
    /// Each separator looks at exactly one pair: when `separator + content`
    /// fits the rest of the line the pair renders flat, otherwise the
    /// separator breaks and the content is remeasured from the fresh line.
    /// Decisions never propagate to earlier or later pairs.
    fn step_fill(&mut self, indent: usize, items: Rc<[PrettyTree]>, at: usize) {
        if at >= items.len() {
            return;
        }
        if at == 0 {
            let content = Rc::new(items[0].clone());
            let mode = match self.fits_from(&[content.clone()], self.pos, false) {
                true => Mode::Flat,
                false => Mode::Break,
            };
            if items.len() > 1 {
                self.tasks.push(Task::FillRest { indent, items: items.clone(), at: 1 });
            }
            self.tasks.push(Task::Doc { indent, mode, doc: content });
            return;
        }
        let separator = Rc::new(items[at].clone());
        let Some(content) = items.get(at + 1) else {
            // A trailing separator with no content after it.
            let mode = match self.fits_from(&[separator.clone()], self.pos, false) {
                true => Mode::Flat,
                false => Mode::Break,
            };
            self.tasks.push(Task::Doc { indent, mode, doc: separator });
            return;
        };
        let content = Rc::new(content.clone());
        self.tasks.push(Task::FillRest { indent, items: items.clone(), at: at + 2 });
        if self.fits_from(&[separator.clone(), content.clone()], self.pos, false) {
            self.tasks.push(Task::Doc { indent, mode: Mode::Flat, doc: content });
            self.tasks.push(Task::Doc { indent, mode: Mode::Flat, doc: separator });
        }
        else {
            let resumed = self.options.indent_columns(indent);
            let content_mode = match self.fits_from(&[content.clone()], resumed, false) {
                true => Mode::Flat,
                false => Mode::Break,
            };
            self.tasks.push(Task::Doc { indent, mode: content_mode, doc: content });
            self.tasks.push(Task::Doc { indent, mode: Mode::Break, doc: separator });
        }
    }

    /// Measures whether `docs`, laid out flat starting at column `pos`, stay
    /// within the line width.
    ///
    /// A hard line ends the measurement: reached while still flat it means
    /// the flat layout is impossible, reached inside an already broken
    /// subtree it means the leading line ended in time. With `scan_rest` the
    /// measurement continues into the pending tasks after `docs`, so a group
    /// only goes flat when the text following it on the same line fits too.
    fn fits_from(&mut self, docs: &[Rc<PrettyTree>], pos: usize, scan_rest: bool) -> bool {
        let width = self.options.print_width;
        let mut pos = pos;
        let mut rest_index = if scan_rest { self.tasks.len() } else { 0 };
        self.fit_queue.clear();
        for doc in docs.iter().rev() {
            self.fit_queue.push((Mode::Flat, doc.clone()));
        }

        loop {
            if pos > width {
                return false;
            }
            let (mode, doc) = match self.fit_queue.pop() {
                Some(top) => top,
                None => {
                    if rest_index == 0 {
                        return true;
                    }
                    rest_index -= 1;
                    match &self.tasks[rest_index] {
                        Task::Doc { doc, .. } => (Mode::Break, doc.clone()),
                        Task::FillRest { items, at, .. } => {
                            for item in items[*at..].iter().rev() {
                                self.fit_queue.push((Mode::Break, Rc::new(item.clone())));
                            }
                            continue;
                        }
                    }
                }
            };
            match &*doc {
                PrettyTree::Nil => {}
                PrettyTree::Text(s) => pos += s.len(),
                PrettyTree::StaticText(s) => pos += s.len(),
                PrettyTree::RenderLen { len, .. } => pos += len,
                PrettyTree::Append { lhs, rhs } => {
                    self.fit_queue.push((mode, rhs.clone()));
                    self.fit_queue.push((mode, lhs.clone()));
                }
                PrettyTree::MaybeInline { block, inline } => {
                    let chosen = match mode {
                        Mode::Break => block,
                        Mode::Flat => inline,
                    };
                    self.fit_queue.push((mode, chosen.clone()));
                }
                PrettyTree::Hardline | PrettyTree::VerbatimLine => {
                    return matches!(mode, Mode::Break);
                }
                PrettyTree::Nest { doc, .. } => self.fit_queue.push((mode, doc.clone())),
                PrettyTree::Group { items, broken } => {
                    // A nested group never makes its parent break on its own;
                    // only a hard line inside (the `broken` flag) does.
                    let inner = if *broken { Mode::Break } else { mode };
                    self.fit_queue.push((inner, items.clone()));
                }
                PrettyTree::Fill { items } => {
                    for item in items.iter().rev() {
                        self.fit_queue.push((mode, Rc::new(item.clone())));
                    }
                }
                PrettyTree::Choice { candidates } => {
                    let chosen = match mode {
                        Mode::Flat => candidates.first(),
                        Mode::Break => candidates.last(),
                    };
                    if let Some(candidate) = chosen {
                        self.fit_queue.push((mode, Rc::new(candidate.clone())));
                    }
                }
                PrettyTree::Annotated { doc, .. } => self.fit_queue.push((mode, doc.clone())),
            }
        }
    }
}
