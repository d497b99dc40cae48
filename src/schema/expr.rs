// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Type expression parser using Pest.
//!
//! Parsing produces a [`TypeExpr`], which is then resolved to a
//! [`TypeDescriptor`]. Bare names that are neither scalars nor built-in value
//! types are handed to a lookup function, so a schema can bind its own enums
//! and composites.

use std::str::FromStr;

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::core::{CodecError, EnumType, Result, ScalarType, TypeDescriptor, ValueTypeKind};

/// Pest parser for type expressions.
#[derive(Parser)]
#[grammar = "schema/type_expr.pest"] // Path relative to src/ directory
struct TypeExprParser;

/// Parsed, unresolved type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A bare name
    Named(String),
    /// `enum Name: underlying`
    Enum { name: String, underlying: String },
    /// `composite Name`
    Composite(String),
    Array(Box<TypeExpr>),
    List(Box<TypeExpr>),
}

impl TypeExpr {
    /// Resolve to a descriptor, using `lookup` for names the codec does not
    /// know on its own.
    pub fn resolve<F>(&self, lookup: &F) -> Result<TypeDescriptor>
    where
        F: Fn(&str) -> Option<TypeDescriptor>,
    {
        match self {
            TypeExpr::Named(name) => ScalarType::try_from_str(name)
                .map(TypeDescriptor::Scalar)
                .or_else(|| ValueTypeKind::try_from_str(name).map(TypeDescriptor::ValueType))
                .or_else(|| lookup(name))
                .ok_or_else(|| CodecError::unsupported(name.clone())),
            TypeExpr::Enum { name, underlying } => {
                if let Some(TypeDescriptor::Enum(declared)) = lookup(name) {
                    if declared.underlying().name() == underlying
                        || ScalarType::try_from_str(underlying) == Some(declared.underlying())
                    {
                        return Ok(TypeDescriptor::Enum(declared));
                    }
                }
                let repr = ScalarType::try_from_str(underlying).ok_or_else(|| {
                    CodecError::invalid_schema(
                        name.clone(),
                        format!("unknown enum representation '{underlying}'"),
                    )
                })?;
                Ok(TypeDescriptor::enumeration(EnumType::new(name.clone(), repr)?))
            }
            TypeExpr::Composite(name) => Ok(TypeDescriptor::Composite(name.clone())),
            TypeExpr::Array(inner) => Ok(TypeDescriptor::array(inner.resolve(lookup)?)),
            TypeExpr::List(inner) => Ok(TypeDescriptor::list(inner.resolve(lookup)?)),
        }
    }
}

/// Parse a type expression.
pub fn parse_type_expr(expr: &str) -> Result<TypeExpr> {
    let mut pairs = TypeExprParser::parse(Rule::type_root, expr)
        .map_err(|e| CodecError::invalid_schema(expr, format!("Parse error: {e}")))?;

    let root = pairs
        .next()
        .and_then(|root| root.into_inner().next())
        .ok_or_else(|| CodecError::invalid_schema(expr, "empty type expression"))?;
    Ok(build_expr(root))
}

fn build_expr(pair: Pair<'_, Rule>) -> TypeExpr {
    let mut expr = TypeExpr::Named(String::new());
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::array_type => expr = TypeExpr::Array(Box::new(build_generic(inner))),
            Rule::list_type => expr = TypeExpr::List(Box::new(build_generic(inner))),
            Rule::enum_type => {
                let mut idents = inner
                    .into_inner()
                    .filter(|p| p.as_rule() == Rule::ident)
                    .map(|p| p.as_str().to_string());
                let name = idents.next().unwrap_or_default();
                let underlying = idents.next().unwrap_or_default();
                expr = TypeExpr::Enum { name, underlying };
            }
            Rule::composite_type => {
                let name = inner
                    .into_inner()
                    .find(|p| p.as_rule() == Rule::ident)
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                expr = TypeExpr::Composite(name);
            }
            Rule::named_type => expr = TypeExpr::Named(inner.as_str().trim().to_string()),
            Rule::array_suffix => expr = TypeExpr::Array(Box::new(expr)),
            _ => {}
        }
    }
    expr
}

fn build_generic(pair: Pair<'_, Rule>) -> TypeExpr {
    pair.into_inner()
        .find(|p| p.as_rule() == Rule::type_expr)
        .map(build_expr)
        .unwrap_or_else(|| TypeExpr::Named(String::new()))
}

/// Parse and resolve a type expression without a schema.
pub fn resolve_type_expr(expr: &str) -> Result<TypeDescriptor> {
    parse_type_expr(expr)?.resolve(&|_| None)
}

impl FromStr for TypeDescriptor {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        resolve_type_expr(s)
    }
}
