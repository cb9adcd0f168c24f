//! A minimal s-expression reader for [`CilNode::render`]'s own output
//! format.
//!
//! `spec.md` §1 treats CIL parsing as an external collaborator the core
//! never implements. This workspace ships no CIL grammar; instead, the CLI
//! reads the same small s-expression shape [`CilNode::render`] writes
//! (`(flavor field field (nested-flavor ...))`), so fixtures, golden files,
//! and hand-written fuzz inputs can round-trip without a real CIL front
//! end. A production deployment swaps this module for a real parser that
//! builds an [`AstNode`] implementor of its own.

use cildiff_kernel::ast::{CilNode, Flavor, NodeData};
use cildiff_kernel::error::KernelError;

/// Parse one s-expression into a [`CilNode`] tree. Every atom after the
/// leading flavor name becomes a bare [`NodeData::Name`] child unless it is
/// itself parenthesised, in which case it recurses — this is a toy grammar,
/// not a faithful CIL reader; line numbers are assigned by source line of
/// each opening paren.
pub fn parse(source: &str) -> Result<CilNode, KernelError> {
    let tokens = tokenize(source);
    let mut pos = 0;
    let node = parse_node(&tokens, &mut pos)?;
    Ok(node)
}

#[derive(Debug, Clone)]
enum Token {
    Open,
    Close,
    Atom(String),
}

fn tokenize(source: &str) -> Vec<(Token, u32)> {
    let mut tokens = Vec::new();
    let mut line = 1u32;
    let mut chars = source.chars().peekable();
    let mut atom = String::new();
    let flush = |atom: &mut String, tokens: &mut Vec<(Token, u32)>, line: u32| {
        if !atom.is_empty() {
            tokens.push((Token::Atom(std::mem::take(atom)), line));
        }
    };
    while let Some(c) = chars.next() {
        match c {
            '\n' => {
                flush(&mut atom, &mut tokens, line);
                line += 1;
            }
            '(' => {
                flush(&mut atom, &mut tokens, line);
                tokens.push((Token::Open, line));
            }
            ')' => {
                flush(&mut atom, &mut tokens, line);
                tokens.push((Token::Close, line));
            }
            c if c.is_whitespace() => flush(&mut atom, &mut tokens, line),
            c => atom.push(c),
        }
    }
    flush(&mut atom, &mut tokens, line);
    tokens
}

fn parse_node(tokens: &[(Token, u32)], pos: &mut usize) -> Result<CilNode, KernelError> {
    let (open, open_line) = tokens.get(*pos).ok_or_else(unexpected_eof)?;
    if !matches!(open, Token::Open) {
        return Err(malformed(*open_line, "expected '('"));
    }
    *pos += 1;

    let flavor_name = match tokens.get(*pos) {
        Some((Token::Atom(name), _)) => name.clone(),
        _ => return Err(malformed(*open_line, "expected flavor name after '('")),
    };
    *pos += 1;
    let flavor = flavor_from_name(&flavor_name);

    let mut children = Vec::new();
    let mut name: Option<String> = None;
    loop {
        match tokens.get(*pos) {
            Some((Token::Close, _)) => {
                *pos += 1;
                break;
            }
            Some((Token::Open, _)) => {
                children.push(parse_node(tokens, pos)?);
            }
            Some((Token::Atom(value), _)) => {
                if name.is_none() {
                    name = Some(value.clone());
                }
                *pos += 1;
            }
            None => return Err(unexpected_eof()),
        }
    }

    let data = match name {
        Some(n) => NodeData::Name(n),
        None => NodeData::Empty,
    };

    if children.is_empty() {
        Ok(CilNode::leaf(flavor, data, *open_line))
    } else {
        Ok(CilNode::container(flavor, data, *open_line, children))
    }
}

fn unexpected_eof() -> KernelError {
    KernelError::MalformedExpression {
        line: 0,
        detail: "unexpected end of input".into(),
    }
}

fn malformed(line: u32, detail: &str) -> KernelError {
    KernelError::MalformedExpression {
        line,
        detail: detail.into(),
    }
}

fn flavor_from_name(name: &str) -> Flavor {
    match name {
        "root" => Flavor::Root,
        "source-info" => Flavor::SourceInfo,
        "block" => Flavor::Block,
        "macro" => Flavor::Macro,
        "call" => Flavor::MacroCall,
        "optional" => Flavor::Optional,
        "in" => Flavor::In,
        "booleanif" => Flavor::BooleanIf,
        "tunableif" => Flavor::TunableIf,
        "condfalse" => Flavor::CondFalse,
        "condtrue" => Flavor::CondTrue,
        "type" => Flavor::Type,
        "role" => Flavor::Role,
        "user" => Flavor::User,
        "class" => Flavor::Class,
        "common" => Flavor::Common,
        "allow" => Flavor::AllowRule,
        other => Flavor::Other(Box::leak(other.to_string().into_boxed_str())),
    }
}
