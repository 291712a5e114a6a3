//! A miniature expression language driven through the whole pipeline: source
//! text to syntax tree to document to laid out text. The crate exists for its
//! tests; the library surface is what they need to parse, translate and
//! render.

use pretty_layout::{
    docs, hug_operand, AncestorKind, CallSite, OperatorChain, Precedence, PrettyProvider,
    PrettyTree, RenderOptions, SoftBlock, TreePath,
};
use std::{error::Error, fmt, ops::Range};

/// One node of the toy syntax tree, with the source span it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Number(String),
    Name(String),
    Binary { op: BinOp, lhs: Box<Expr>, rhs: Box<Expr> },
    Call { callee: String, args: Vec<Arg> },
    Array(Vec<Expr>),
    Paren(Box<Expr>),
    If { test: Box<Expr>, then: Box<Expr>, otherwise: Box<Expr> },
    /// A node kind the translator has no rule for. The parser never produces
    /// one; it exists so the error path of translation stays reachable.
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Or,
    And,
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn text(self) -> &'static str {
        match self {
            BinOp::Or => "or",
            BinOp::And => "and",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
    /// Operators of one precedence class flatten into one chain.
    pub fn precedence(self) -> Precedence {
        match self {
            BinOp::Or => Precedence(1),
            BinOp::And => Precedence(2),
            BinOp::Add | BinOp::Sub => Precedence(3),
            BinOp::Mul | BinOp::Div => Precedence(4),
        }
    }
}

/// A call argument, optionally named: `f(x, scale: 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub name: Option<String>,
    pub value: Expr,
}

/// Parse failure with the offending span.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub span: Range<usize>,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error at {}..{}: {}", self.span.start, self.span.end, self.message)
    }
}

impl Error for ParseError {}

/// A node the translator cannot lay out. Translation is total over the
/// grammar the parser produces, so seeing one of these is a bug in whoever
/// built the tree, and it surfaces as a hard error instead of bad output.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslateError {
    pub span: Range<usize>,
    pub node: String,
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no layout rule for node `{}` at {}..{}", self.node, self.span.start, self.span.end)
    }
}

impl Error for TranslateError {}

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    Parse(ParseError),
    Translate(TranslateError),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Parse(e) => fmt::Display::fmt(e, f),
            FormatError::Translate(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl Error for FormatError {}

impl From<ParseError> for FormatError {
    fn from(e: ParseError) -> Self {
        FormatError::Parse(e)
    }
}

impl From<TranslateError> for FormatError {
    fn from(e: TranslateError) -> Self {
        FormatError::Translate(e)
    }
}

/// Formats a source string: parse, translate, render, trailing newline.
pub fn format(source: &str, options: &RenderOptions) -> Result<String, FormatError> {
    let expr = parse(source)?;
    let theme = PrettyProvider::new(options.clone());
    let mut out = render_expr(&expr, &theme)?;
    out.push('\n');
    Ok(out)
}

/// Translates and renders an already built tree.
pub fn render_expr(expr: &Expr, theme: &PrettyProvider) -> Result<String, TranslateError> {
    let doc = Translator::new(theme).translate(expr)?;
    Ok(doc.pretty_with(theme.options().clone()).to_string())
}

// ---------------------------------------------------------------- lexing

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Number(String),
    Ident(String),
    Symbol(char),
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    kind: TokenKind,
    span: Range<usize>,
}

fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();
    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c.is_ascii_digit() {
            let mut end = start;
            let mut text = String::new();
            while let Some(&(i, d)) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                text.push(d);
                end = i + d.len_utf8();
                chars.next();
            }
            tokens.push(Token { kind: TokenKind::Number(text), span: start..end });
            continue;
        }
        if c.is_ascii_alphabetic() || c == '_' {
            let mut end = start;
            let mut text = String::new();
            while let Some(&(i, d)) = chars.peek() {
                if !d.is_ascii_alphanumeric() && d != '_' {
                    break;
                }
                text.push(d);
                end = i + d.len_utf8();
                chars.next();
            }
            tokens.push(Token { kind: TokenKind::Ident(text), span: start..end });
            continue;
        }
        if matches!(c, '(' | ')' | '[' | ']' | ',' | ':' | '+' | '-' | '*' | '/') {
            chars.next();
            tokens.push(Token { kind: TokenKind::Symbol(c), span: start..start + c.len_utf8() });
            continue;
        }
        return Err(ParseError {
            span: start..start + c.len_utf8(),
            message: format!("unexpected character {c:?}"),
        });
    }
    Ok(tokens)
}

// --------------------------------------------------------------- parsing

/// Parses one expression spanning the whole input.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let tokens = lex(source)?;
    let mut parser = Parser { tokens: &tokens, pos: 0, eof: source.len() };
    let expr = parser.parse_expr()?;
    if let Some(extra) = parser.peek() {
        return Err(ParseError {
            span: extra.span.clone(),
            message: "expected end of input".to_string(),
        });
    }
    Ok(expr)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    eof: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn peek_second(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos + 1)
    }

    fn bump(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn eof_span(&self) -> Range<usize> {
        self.eof..self.eof
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        let span = self.peek().map(|t| t.span.clone()).unwrap_or_else(|| self.eof_span());
        ParseError { span, message: message.into() }
    }

    fn eat_symbol(&mut self, symbol: char) -> bool {
        if matches!(self.peek(), Some(t) if t.kind == TokenKind::Symbol(symbol)) {
            self.pos += 1;
            true
        }
        else {
            false
        }
    }

    fn expect_symbol(&mut self, symbol: char) -> Result<(), ParseError> {
        if self.eat_symbol(symbol) {
            Ok(())
        }
        else {
            Err(self.error_here(format!("expected `{symbol}`")))
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        match self.peek() {
            Some(Token { kind: TokenKind::Ident(word), .. }) if word == keyword => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<(), ParseError> {
        if self.eat_keyword(keyword) {
            Ok(())
        }
        else {
            Err(self.error_here(format!("expected `{keyword}`")))
        }
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        if matches!(self.peek(), Some(Token { kind: TokenKind::Ident(word), .. }) if word == "if") {
            return self.parse_if();
        }
        self.parse_binary(Precedence(1))
    }

    fn parse_if(&mut self) -> Result<Expr, ParseError> {
        let start = self.peek().map(|t| t.span.start).unwrap_or(self.eof);
        self.expect_keyword("if")?;
        let test = self.parse_expr()?;
        self.expect_keyword("then")?;
        let then = self.parse_expr()?;
        self.expect_keyword("else")?;
        let otherwise = self.parse_expr()?;
        let end = otherwise.span.end;
        Ok(Expr {
            kind: ExprKind::If {
                test: Box::new(test),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            },
            span: start..end,
        })
    }

    fn peek_operator(&self, min: Precedence) -> Option<BinOp> {
        let op = match &self.peek()?.kind {
            TokenKind::Ident(word) if word == "or" => BinOp::Or,
            TokenKind::Ident(word) if word == "and" => BinOp::And,
            TokenKind::Symbol('+') => BinOp::Add,
            TokenKind::Symbol('-') => BinOp::Sub,
            TokenKind::Symbol('*') => BinOp::Mul,
            TokenKind::Symbol('/') => BinOp::Div,
            _ => return None,
        };
        if op.precedence().0 >= min.0 { Some(op) } else { None }
    }

    /// Precedence climbing over the left associative binary operators.
    fn parse_binary(&mut self, min: Precedence) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_primary()?;
        while let Some(op) = self.peek_operator(min) {
            self.pos += 1;
            let rhs = self.parse_binary(Precedence(op.precedence().0 + 1))?;
            let span = lhs.span.start..rhs.span.end;
            lhs = Expr {
                kind: ExprKind::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) },
                span,
            };
        }
        Ok(lhs)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = match self.peek() {
            Some(token) => token.clone(),
            None => return Err(self.error_here("expected expression")),
        };
        match &token.kind {
            TokenKind::Number(text) => {
                self.pos += 1;
                Ok(Expr { kind: ExprKind::Number(text.clone()), span: token.span })
            }
            TokenKind::Ident(word) if word == "if" => self.parse_if(),
            TokenKind::Ident(word) if word == "then" || word == "else" => {
                Err(self.error_here("expected expression"))
            }
            TokenKind::Ident(word) if word == "and" || word == "or" => {
                Err(self.error_here("expected expression"))
            }
            TokenKind::Ident(name) => {
                self.pos += 1;
                if self.eat_symbol('(') {
                    let args = self.parse_args()?;
                    let end = self.tokens[self.pos - 1].span.end;
                    Ok(Expr {
                        kind: ExprKind::Call { callee: name.clone(), args },
                        span: token.span.start..end,
                    })
                }
                else {
                    Ok(Expr { kind: ExprKind::Name(name.clone()), span: token.span })
                }
            }
            TokenKind::Symbol('(') => {
                self.pos += 1;
                let inner = self.parse_expr()?;
                self.expect_symbol(')')?;
                let end = self.tokens[self.pos - 1].span.end;
                Ok(Expr {
                    kind: ExprKind::Paren(Box::new(inner)),
                    span: token.span.start..end,
                })
            }
            TokenKind::Symbol('[') => {
                self.pos += 1;
                let mut items = Vec::new();
                while !self.eat_symbol(']') {
                    if !items.is_empty() {
                        self.expect_symbol(',')?;
                        // Trailing comma.
                        if self.eat_symbol(']') {
                            break;
                        }
                    }
                    items.push(self.parse_expr()?);
                }
                let end = self.tokens[self.pos - 1].span.end;
                Ok(Expr { kind: ExprKind::Array(items), span: token.span.start..end })
            }
            _ => Err(self.error_here("expected expression")),
        }
    }

    /// Arguments after the open parenthesis, consuming the close.
    fn parse_args(&mut self) -> Result<Vec<Arg>, ParseError> {
        let mut args = Vec::new();
        while !self.eat_symbol(')') {
            if !args.is_empty() {
                self.expect_symbol(',')?;
                if self.eat_symbol(')') {
                    break;
                }
            }
            let name = match (self.peek(), self.peek_second()) {
                (Some(first), Some(second))
                    if matches!(first.kind, TokenKind::Ident(_))
                        && second.kind == TokenKind::Symbol(':') =>
                {
                    let name = match &first.kind {
                        TokenKind::Ident(name) => name.clone(),
                        _ => unreachable!(),
                    };
                    self.pos += 2;
                    Some(name)
                }
                _ => None,
            };
            let value = self.parse_expr()?;
            args.push(Arg { name, value });
        }
        Ok(args)
    }
}

// ------------------------------------------------------------ translation

/// Turns syntax trees into documents, one rule per node kind.
///
/// The translator carries a [`TreePath`] so every rule can ask whether an
/// ancestor already claimed the continuation level before nesting its own.
#[derive(Debug)]
pub struct Translator<'a> {
    theme: &'a PrettyProvider,
    path: TreePath,
    /// Argument lists currently open, innermost last.
    call_stack: Vec<CallSite>,
    next_call: u32,
}

impl<'a> Translator<'a> {
    pub fn new(theme: &'a PrettyProvider) -> Self {
        Self { theme, path: TreePath::new(), call_stack: Vec::new(), next_call: 0 }
    }

    fn enclosing_call(&self) -> Option<CallSite> {
        self.call_stack.last().copied()
    }

    pub fn translate(&mut self, expr: &Expr) -> Result<PrettyTree, TranslateError> {
        match &expr.kind {
            ExprKind::Number(text) => Ok(self.theme.number(text.clone())),
            ExprKind::Name(name) => Ok(self.theme.identifier(name.clone())),
            ExprKind::Binary { .. } => self.binary_doc(expr),
            ExprKind::Call { callee, args } => self.call_doc(callee, args),
            ExprKind::Array(items) => self.array_doc(items),
            ExprKind::Paren(inner) => self.paren_doc(inner),
            ExprKind::If { test, then, otherwise } => self.if_doc(test, then, otherwise),
            ExprKind::Unknown(node) => {
                Err(TranslateError { span: expr.span.clone(), node: node.clone() })
            }
        }
    }

    /// Collects a run of operators of one precedence class into a single
    /// flat list. The run extends through both children, so a right nested
    /// tree of the same class yields the same chain as the left nested one
    /// the parser builds; `op_in` is the operator that led to `expr`.
    fn flatten_chain<'e>(
        expr: &'e Expr,
        class: Precedence,
        op_in: Option<BinOp>,
        out: &mut Vec<(Option<BinOp>, &'e Expr)>,
    ) {
        match &expr.kind {
            ExprKind::Binary { op, lhs, rhs } if op.precedence() == class => {
                Self::flatten_chain(lhs, class, op_in, out);
                Self::flatten_chain(rhs, class, Some(*op), out);
            }
            _ => out.push((op_in, expr)),
        }
    }

    fn is_huggable(expr: &Expr) -> bool {
        matches!(expr.kind, ExprKind::Call { .. } | ExprKind::Array(_) | ExprKind::Paren(_))
    }

    fn binary_doc(&mut self, expr: &Expr) -> Result<PrettyTree, TranslateError> {
        let class = match &expr.kind {
            ExprKind::Binary { op, .. } => op.precedence(),
            _ => unreachable!("binary_doc called on a non-binary node"),
        };
        let continuation = self.path.is_continuation(Some(class), self.enclosing_call());
        let mut operands = Vec::new();
        Self::flatten_chain(expr, class, None, &mut operands);

        self.path.descend(AncestorKind::OperatorChain(class));
        let result = self.chain_doc(class, &operands, continuation);
        self.path.ascend();
        result
    }

    fn chain_doc(
        &mut self,
        class: Precedence,
        operands: &[(Option<BinOp>, &Expr)],
        continuation: bool,
    ) -> Result<PrettyTree, TranslateError> {
        // A two term chain whose right operand can absorb the break itself
        // gets the three candidate layouts instead of the plain chain.
        if let [(None, lhs), (Some(op), rhs)] = operands {
            if !continuation && Self::is_huggable(rhs) && !Self::is_huggable(lhs) {
                let prefix = self
                    .translate(lhs)?
                    .append(PrettyTree::Space)
                    .append(self.theme.operator(op.text()));
                let operand = self.translate(rhs)?;
                return Ok(hug_operand(prefix, operand));
            }
        }
        let mut iter = operands.iter();
        let head = match iter.next() {
            Some((_, first)) => self.translate(first)?,
            None => PrettyTree::Nil,
        };
        let mut chain = OperatorChain::new(class, head);
        for (op, operand) in iter {
            let operator = match op {
                Some(op) => self.theme.operator(op.text()),
                None => PrettyTree::Nil,
            };
            chain.push(operator, self.translate(operand)?);
        }
        Ok(chain.into_doc(continuation))
    }

    fn call_doc(&mut self, callee: &str, args: &[Arg]) -> Result<PrettyTree, TranslateError> {
        let site = CallSite(self.next_call);
        self.next_call += 1;

        self.path.descend(AncestorKind::ArgumentList(site));
        self.call_stack.push(site);
        let mut docs = Vec::with_capacity(args.len());
        for arg in args {
            docs.push(self.arg_doc(arg)?);
        }
        self.call_stack.pop();
        self.path.ascend();

        let block = SoftBlock::parentheses()
            .with_joint(PrettyTree::text(",").append(PrettyTree::line_or_space()))
            .with_tail(",");
        Ok(self.theme.identifier(callee.to_string()).append(block.join_slice(&docs, self.theme)))
    }

    fn arg_doc(&mut self, arg: &Arg) -> Result<PrettyTree, TranslateError> {
        match &arg.name {
            Some(name) => {
                self.path.descend(AncestorKind::NamedArgument);
                let value = self.translate(&arg.value)?;
                self.path.ascend();
                Ok(docs![self.theme.argument(name.clone(), false), ":", PrettyTree::Space, value])
            }
            None => self.translate(&arg.value),
        }
    }

    fn array_doc(&mut self, items: &[Expr]) -> Result<PrettyTree, TranslateError> {
        self.path.descend(AncestorKind::Parenthesized);
        let mut docs = Vec::with_capacity(items.len());
        for item in items {
            docs.push(self.translate(item)?);
        }
        self.path.ascend();
        let block = SoftBlock::brackets()
            .with_joint(PrettyTree::text(",").append(PrettyTree::line_or_space()))
            .with_tail(",");
        Ok(block.join_slice(&docs, self.theme))
    }

    fn paren_doc(&mut self, inner: &Expr) -> Result<PrettyTree, TranslateError> {
        self.path.descend(AncestorKind::Parenthesized);
        let inner = self.translate(inner)?;
        self.path.ascend();
        Ok(SoftBlock::parentheses().join_slice(&[inner], self.theme))
    }

    fn if_doc(
        &mut self,
        test: &Expr,
        then: &Expr,
        otherwise: &Expr,
    ) -> Result<PrettyTree, TranslateError> {
        let continuation = self.path.is_continuation(None, self.enclosing_call());

        self.path.descend(AncestorKind::ConditionTest);
        let test = self.translate(test)?;
        self.path.ascend();

        self.path.descend(AncestorKind::ConditionValue);
        let then = self.translate(then)?;
        let otherwise = self.translate(otherwise)?;
        self.path.ascend();

        let tail = docs![
            PrettyTree::line_or_space(),
            self.theme.keyword("then"),
            PrettyTree::Space,
            then,
            PrettyTree::line_or_space(),
            self.theme.keyword("else"),
            PrettyTree::Space,
            otherwise,
        ];
        let levels = if continuation { 0 } else { 1 };
        Ok(docs![self.theme.keyword("if"), PrettyTree::Space, test, tail.nest(levels)].group())
    }
}
