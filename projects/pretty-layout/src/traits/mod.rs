use crate::{providers::PrettyProvider, PrettyTree};
use termcolor::Buffer;

pub trait PrettyBuilder {
    /// Acts as `self` when laid out on multiple lines and acts as `inline` when laid out on a single line.
    ///
    /// ```
    /// use pretty_layout::{PrettyBuilder, PrettyTree};
    ///
    /// let doc = PrettyTree::text("let x")
    ///     .append(PrettyTree::line_or_space())
    ///     .append(PrettyTree::text("in x").flat_alt("in x;"))
    ///     .group();
    ///
    /// assert_eq!(doc.pretty(100).to_string(), "let x in x;");
    /// assert_eq!(doc.pretty(8).to_string(), "let x\nin x");
    /// ```
    fn flat_alt<E>(self, inline: E) -> PrettyTree
    where
        E: Into<PrettyTree>;
}

/// Marker trait for types that can be pretty printed.
pub trait PrettyPrint {
    /// Build a pretty tree for this type.
    fn pretty(&self, theme: &PrettyProvider) -> PrettyTree;
    /// Render this type to a plain string with the theme's options.
    fn pretty_string(&self, theme: &PrettyProvider) -> String {
        let mut buffer = String::new();
        match self.pretty(theme).render_fmt_with(theme.options(), &mut buffer) {
            Ok(_) => buffer,
            Err(e) => format!("Error: {}", e),
        }
    }
    /// Render this type to a string with ansi color escapes.
    fn pretty_colorful(&self, theme: &PrettyProvider) -> String {
        let mut buffer = Buffer::ansi();
        if let Err(e) = self.pretty(theme).render_colored_with(theme.options(), &mut buffer) {
            return format!("Error: {}", e);
        }
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }
}

impl PrettyPrint for PrettyTree {
    fn pretty(&self, _: &PrettyProvider) -> PrettyTree {
        self.clone()
    }
}

impl PrettyPrint for &'static str {
    fn pretty(&self, _: &PrettyProvider) -> PrettyTree {
        PrettyTree::text(*self)
    }
}

impl PrettyPrint for String {
    fn pretty(&self, _: &PrettyProvider) -> PrettyTree {
        PrettyTree::text(self.clone())
    }
}
