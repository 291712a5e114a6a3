use crate::{Render, RenderAnnotated};
use std::fmt::{Debug, Formatter};
use termcolor::ColorSpec;

/// Writes to something implementing `std::fmt::Write`, discarding annotations.
pub struct FmtWrite<W> {
    upstream: W,
}

impl<W> Debug for FmtWrite<W> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FmtWrite").finish()
    }
}

impl<W> FmtWrite<W> {
    /// Create a new `FmtWrite` from something implementing `std::fmt::Write`
    pub fn new(upstream: W) -> FmtWrite<W> {
        FmtWrite { upstream }
    }
}

impl<W> Render for FmtWrite<W>
where
    W: std::fmt::Write,
{
    type Error = std::fmt::Error;

    fn write_str(&mut self, s: &str) -> Result<usize, std::fmt::Error> {
        self.write_str_all(s).map(|_| s.len())
    }

    fn write_str_all(&mut self, s: &str) -> std::fmt::Result {
        self.upstream.write_str(s)
    }
}

impl<W> RenderAnnotated for FmtWrite<W>
where
    W: std::fmt::Write,
{
    fn push_annotation(&mut self, _: &ColorSpec) -> Result<(), Self::Error> {
        Ok(())
    }

    fn pop_annotation(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
