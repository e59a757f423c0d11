//! Expression AST
//!
//! Every node lives in an [`Arena`](crate::arena::Arena) and refers to its
//! children by shared reference, so a tree is `Copy` to pass around and can
//! never outlive the arena that owns it. Literal and name nodes carry no text:
//! their span is resolved against the owning source file when needed.

use crate::span::Span;
use std::fmt;

pub type ExprRef<'ast> = &'ast Expr<'ast>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expr<'ast> {
    pub kind: ExprKind<'ast>,
    /// Full source extent, sub-expressions included.
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprKind<'ast> {
    /// Integer literal in base 2, 8, 10 or 16.
    IntLiteral { radix: u32 },
    FloatLiteral,
    StringLiteral,
    BoolLiteral(bool),
    NoneLiteral,
    Paren(ExprRef<'ast>),
    List(&'ast [ExprRef<'ast>]),
    Set(&'ast [ExprRef<'ast>]),
    /// Key/value pairs in source order.
    Dict(&'ast [(ExprRef<'ast>, ExprRef<'ast>)]),
    Name,
    /// `value.attr`; `attr` is the span of the attribute name.
    Attribute { value: ExprRef<'ast>, attr: Span },
    Call {
        callee: ExprRef<'ast>,
        args: &'ast [ExprRef<'ast>],
    },
    /// `value[index]`
    Index {
        value: ExprRef<'ast>,
        index: ExprRef<'ast>,
    },
    /// `value[lower:upper]` with either bound optional.
    Slice {
        value: ExprRef<'ast>,
        lower: Option<ExprRef<'ast>>,
        upper: Option<ExprRef<'ast>>,
    },
    Binary {
        op: BinaryOp,
        lhs: ExprRef<'ast>,
        rhs: ExprRef<'ast>,
    },
    Unary { op: UnaryOp, operand: ExprRef<'ast> },
    /// `then if condition else otherwise`
    Ternary {
        then: ExprRef<'ast>,
        condition: ExprRef<'ast>,
        otherwise: ExprRef<'ast>,
    },
    /// `target := value`
    NamedExpr {
        target: ExprRef<'ast>,
        value: ExprRef<'ast>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Equal,
    NotEqual,
    Is,
    IsNot,
    In,
    NotIn,
    BitOr,
    BitXor,
    BitAnd,
    LeftShift,
    RightShift,
    Add,
    Sub,
    Mul,
    MatMul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Or => "or",
            BinaryOp::And => "and",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Is => "is",
            BinaryOp::IsNot => "is not",
            BinaryOp::In => "in",
            BinaryOp::NotIn => "not in",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::LeftShift => "<<",
            BinaryOp::RightShift => ">>",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::MatMul => "@",
            BinaryOp::Div => "/",
            BinaryOp::FloorDiv => "//",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Plus,
    Minus,
    Invert,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Not => "not",
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Invert => "~",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'ast> Expr<'ast> {
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ExprKind::IntLiteral { .. } => "IntLiteral",
            ExprKind::FloatLiteral => "FloatLiteral",
            ExprKind::StringLiteral => "StringLiteral",
            ExprKind::BoolLiteral(_) => "BoolLiteral",
            ExprKind::NoneLiteral => "NoneLiteral",
            ExprKind::Paren(_) => "Paren",
            ExprKind::List(_) => "List",
            ExprKind::Set(_) => "Set",
            ExprKind::Dict(_) => "Dict",
            ExprKind::Name => "Name",
            ExprKind::Attribute { .. } => "Attribute",
            ExprKind::Call { .. } => "Call",
            ExprKind::Index { .. } => "Index",
            ExprKind::Slice { .. } => "Slice",
            ExprKind::Binary { .. } => "Binary",
            ExprKind::Unary { .. } => "Unary",
            ExprKind::Ternary { .. } => "Ternary",
            ExprKind::NamedExpr { .. } => "NamedExpr",
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<ExprRef<'ast>> {
        match self.kind {
            ExprKind::IntLiteral { .. }
            | ExprKind::FloatLiteral
            | ExprKind::StringLiteral
            | ExprKind::BoolLiteral(_)
            | ExprKind::NoneLiteral
            | ExprKind::Name => Vec::new(),
            ExprKind::Paren(inner) => vec![inner],
            ExprKind::List(elements) | ExprKind::Set(elements) => elements.to_vec(),
            ExprKind::Dict(entries) => entries.iter().flat_map(|&(k, v)| [k, v]).collect(),
            ExprKind::Attribute { value, .. } => vec![value],
            ExprKind::Call { callee, args } => {
                let mut children = Vec::with_capacity(args.len() + 1);
                children.push(callee);
                children.extend_from_slice(args);
                children
            }
            ExprKind::Index { value, index } => vec![value, index],
            ExprKind::Slice { value, lower, upper } => {
                std::iter::once(value).chain(lower).chain(upper).collect()
            }
            ExprKind::Binary { lhs, rhs, .. } => vec![lhs, rhs],
            ExprKind::Unary { operand, .. } => vec![operand],
            ExprKind::Ternary {
                then,
                condition,
                otherwise,
            } => vec![then, condition, otherwise],
            ExprKind::NamedExpr { target, value } => vec![target, value],
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(|child| child.node_count())
            .sum::<usize>()
    }

    /// Structural dump of this subtree.
    pub fn dump(&self) -> ExprDump<'_, 'ast> {
        ExprDump { expr: self }
    }
}

/// Displays an expression as nested `{ kind: ..., field: value }` blocks with
/// four-space indentation.
pub struct ExprDump<'a, 'ast> {
    expr: &'a Expr<'ast>,
}

impl fmt::Display for ExprDump<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.expr, 0, "")
    }
}

fn pad(f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
    write!(f, "{:width$}", "", width = level * 4)
}

fn write_node(f: &mut fmt::Formatter<'_>, expr: &Expr<'_>, level: usize, label: &str) -> fmt::Result {
    pad(f, level)?;
    writeln!(f, "{}{{", label)?;
    let inner = level + 1;
    pad(f, inner)?;
    writeln!(f, "kind: {}", expr.kind_name())?;

    match expr.kind {
        ExprKind::IntLiteral { radix } => {
            pad(f, inner)?;
            writeln!(f, "base: {}", radix)?;
        }
        ExprKind::BoolLiteral(value) => {
            pad(f, inner)?;
            writeln!(f, "val: {}", if value { "True" } else { "False" })?;
        }
        ExprKind::FloatLiteral
        | ExprKind::StringLiteral
        | ExprKind::NoneLiteral
        | ExprKind::Name => {}
        ExprKind::Paren(inner_expr) => write_node(f, inner_expr, inner, "expr: ")?,
        ExprKind::List(elements) | ExprKind::Set(elements) => {
            write_list(f, "elements", elements, inner)?;
        }
        ExprKind::Dict(entries) => {
            pad(f, inner)?;
            if entries.is_empty() {
                writeln!(f, "entries: []")?;
            } else {
                writeln!(f, "entries: [")?;
                for &(key, value) in entries {
                    pad(f, inner + 1)?;
                    writeln!(f, "{{")?;
                    write_node(f, key, inner + 2, "key: ")?;
                    write_node(f, value, inner + 2, "value: ")?;
                    pad(f, inner + 1)?;
                    writeln!(f, "}}")?;
                }
                pad(f, inner)?;
                writeln!(f, "]")?;
            }
        }
        ExprKind::Attribute { value, attr } => {
            write_node(f, value, inner, "value: ")?;
            pad(f, inner)?;
            writeln!(f, "attr: {}", attr)?;
        }
        ExprKind::Call { callee, args } => {
            write_node(f, callee, inner, "callee: ")?;
            write_list(f, "args", args, inner)?;
        }
        ExprKind::Index { value, index } => {
            write_node(f, value, inner, "value: ")?;
            write_node(f, index, inner, "index: ")?;
        }
        ExprKind::Slice { value, lower, upper } => {
            write_node(f, value, inner, "value: ")?;
            write_optional(f, "lower", lower, inner)?;
            write_optional(f, "upper", upper, inner)?;
        }
        ExprKind::Binary { op, lhs, rhs } => {
            pad(f, inner)?;
            writeln!(f, "op: {}", op)?;
            write_node(f, lhs, inner, "lhs: ")?;
            write_node(f, rhs, inner, "rhs: ")?;
        }
        ExprKind::Unary { op, operand } => {
            pad(f, inner)?;
            writeln!(f, "op: {}", op)?;
            write_node(f, operand, inner, "operand: ")?;
        }
        ExprKind::Ternary {
            then,
            condition,
            otherwise,
        } => {
            write_node(f, then, inner, "then: ")?;
            write_node(f, condition, inner, "condition: ")?;
            write_node(f, otherwise, inner, "otherwise: ")?;
        }
        ExprKind::NamedExpr { target, value } => {
            write_node(f, target, inner, "target: ")?;
            write_node(f, value, inner, "value: ")?;
        }
    }

    pad(f, inner)?;
    writeln!(f, "start: {}", expr.span.local_pos)?;
    pad(f, inner)?;
    writeln!(f, "end: {}", expr.span.local_end())?;
    pad(f, level)?;
    writeln!(f, "}}")
}

fn write_list(f: &mut fmt::Formatter<'_>, name: &str, exprs: &[ExprRef<'_>], level: usize) -> fmt::Result {
    pad(f, level)?;
    if exprs.is_empty() {
        return writeln!(f, "{}: []", name);
    }
    writeln!(f, "{}: [", name)?;
    for expr in exprs {
        write_node(f, expr, level + 1, "")?;
    }
    pad(f, level)?;
    writeln!(f, "]")
}

fn write_optional(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    expr: Option<ExprRef<'_>>,
    level: usize,
) -> fmt::Result {
    match expr {
        Some(expr) => write_node(f, expr, level, &format!("{}: ", name)),
        None => {
            pad(f, level)?;
            writeln!(f, "{}: None", name)
        }
    }
}

#[cfg(test)]
#[path = "ast_tests.rs"]
mod tests;
