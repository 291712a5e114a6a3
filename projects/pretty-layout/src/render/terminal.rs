use crate::{Render, RenderAnnotated};
use std::{
    fmt::{Debug, Formatter},
    io::{Error, Write},
};
use termcolor::{ColorSpec, WriteColor};

/// Writes to a terminal, replaying color annotations as they open and close.
///
/// Annotations nest, so the writer keeps a stack of the specs currently in
/// effect and restores the previous one when an annotation ends.
pub struct TerminalWriter<W> {
    color_stack: Vec<ColorSpec>,
    upstream: W,
}

impl<W> Debug for TerminalWriter<W> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalWriter").finish()
    }
}

impl<W> TerminalWriter<W> {
    pub fn new(upstream: W) -> Self {
        TerminalWriter { color_stack: Vec::new(), upstream }
    }
}

impl<W> Render for TerminalWriter<W>
where
    W: Write,
{
    type Error = Error;

    fn write_str(&mut self, s: &str) -> std::io::Result<usize> {
        self.upstream.write(s.as_bytes())
    }

    fn write_str_all(&mut self, s: &str) -> std::io::Result<()> {
        self.upstream.write_all(s.as_bytes())
    }
}

impl<W> RenderAnnotated for TerminalWriter<W>
where
    W: WriteColor,
{
    fn push_annotation(&mut self, color: &ColorSpec) -> Result<(), Self::Error> {
        self.color_stack.push(color.clone());
        self.upstream.set_color(color)
    }

    fn pop_annotation(&mut self) -> Result<(), Self::Error> {
        self.color_stack.pop();
        match self.color_stack.last() {
            Some(previous) => self.upstream.set_color(previous),
            None => self.upstream.reset(),
        }
    }
}
