//! Type References
//!
//! A type reference names a type by its fully qualified name, with optional
//! type arguments and nullability. Its textual form is
//! `pkg.Name<pkg.Arg, ...>?`, with `*` standing for a star projection.

use crate::error::{GenerationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

pub const STAR: &str = "*";

/// Raw name shared by every function type.
pub const FUNCTION: &str = "kotlin.Function";

/// Use-site variance of a type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variance {
    #[default]
    Invariant,
    In,
    Out,
}

/// `suspend R.(P1, P2) -> T`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionType {
    pub suspend: bool,
    pub receiver: Option<TypeRef>,
    pub parameters: Vec<TypeRef>,
    pub return_type: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeRef {
    pub name: String,
    pub arguments: Vec<TypeRef>,
    pub nullable: bool,
    pub variance: Variance,
    /// Signature of a function type; `name` is then [`FUNCTION`].
    pub function: Option<Box<FunctionType>>,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        TypeRef::parameterized(name, Vec::new())
    }

    pub fn parameterized(name: impl Into<String>, arguments: Vec<TypeRef>) -> Self {
        TypeRef {
            name: name.into(),
            arguments,
            nullable: false,
            variance: Variance::Invariant,
            function: None,
        }
    }

    pub fn function(signature: FunctionType) -> Self {
        TypeRef {
            function: Some(Box::new(signature)),
            ..TypeRef::new(FUNCTION)
        }
    }

    pub fn star() -> Self {
        TypeRef::new(STAR)
    }

    pub fn unit() -> Self {
        TypeRef::new("kotlin.Unit")
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_variance(mut self, variance: Variance) -> Self {
        self.variance = variance;
        self
    }

    pub fn is_function(&self) -> bool {
        self.function.is_some()
    }

    pub fn is_star(&self) -> bool {
        self.name == STAR
    }

    /// Same raw type, ignoring arguments and nullability.
    pub fn is_same_raw(&self, other: &TypeRef) -> bool {
        self.name == other.name
    }

    pub fn first_argument(&self) -> Option<&TypeRef> {
        self.arguments.first()
    }

    /// Package part of the name: the dot-separated segments before the first
    /// one that starts with an uppercase letter. Falls back to everything
    /// before the last segment when no segment is capitalized.
    pub fn package_name(&self) -> &str {
        split_qualified(&self.name).0
    }

    /// Name relative to the package, e.g. `Outer.Inner`.
    pub fn relative_name(&self) -> &str {
        split_qualified(&self.name).1
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

pub(crate) fn split_qualified(name: &str) -> (&str, &str) {
    let mut offset = 0;
    for segment in name.split('.') {
        if segment.chars().next().is_some_and(|c| c.is_uppercase()) {
            return if offset == 0 {
                ("", name)
            } else {
                (&name[..offset - 1], &name[offset..])
            };
        }
        offset += segment.len() + 1;
    }
    match name.rfind('.') {
        Some(idx) => (&name[..idx], &name[idx + 1..]),
        None => ("", name),
    }
}

impl fmt::Display for Variance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variance::Invariant => Ok(()),
            Variance::In => f.write_str("in "),
            Variance::Out => f.write_str("out "),
        }
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.suspend {
            f.write_str("suspend ")?;
        }
        if let Some(receiver) = &self.receiver {
            if receiver.is_function() {
                write!(f, "({}).", receiver)?;
            } else {
                write!(f, "{}.", receiver)?;
            }
        }
        f.write_str("(")?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.variance)?;
        if let Some(function) = &self.function {
            return if self.nullable {
                write!(f, "({})?", function)
            } else {
                write!(f, "{}", function)
            };
        }
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", arg)?;
            }
            f.write_str(">")?;
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

impl FromStr for TypeRef {
    type Err = GenerationError;

    fn from_str(input: &str) -> Result<Self> {
        let mut parser = TypeRefParser {
            input,
            chars: input.char_indices().peekable(),
        };
        let parsed = parser.parse_type()?;
        parser.skip_whitespace();
        let trailing = parser.chars.peek().copied();
        match trailing {
            None => Ok(parsed),
            Some((pos, c)) => Err(parser.error(format!("unexpected '{}' at offset {}", c, pos))),
        }
    }
}

impl TryFrom<String> for TypeRef {
    type Error = GenerationError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

struct TypeRefParser<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> TypeRefParser<'a> {
    fn error(&self, reason: impl Into<String>) -> GenerationError {
        GenerationError::invalid_type_ref(self.input, reason)
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|&(_, c)| c.is_whitespace()).is_some() {}
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        self.chars.next_if(|&(_, c)| c == expected).is_some()
    }

    fn at(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        matches!(self.chars.peek(), Some(&(_, c)) if c == expected)
    }

    /// Consumes `text` only when it is followed by something that cannot
    /// continue a name, e.g. `out` in `out T` but not in `outer.T`.
    fn eat_keyword(&mut self, text: &str) -> bool {
        self.skip_whitespace();
        let mut lookahead = self.chars.clone();
        for expected in text.chars() {
            if lookahead.next_if(|&(_, c)| c == expected).is_none() {
                return false;
            }
        }
        match lookahead.peek() {
            Some(&(_, c)) if c.is_whitespace() || c == '(' => {
                self.chars = lookahead;
                true
            }
            _ => false,
        }
    }

    fn eat_arrow(&mut self) -> bool {
        self.skip_whitespace();
        let mut lookahead = self.chars.clone();
        if lookahead.next_if(|&(_, c)| c == '-').is_some()
            && lookahead.next_if(|&(_, c)| c == '>').is_some()
        {
            self.chars = lookahead;
            true
        } else {
            false
        }
    }

    /// `.` directly after a type and before `(`: the type is a receiver.
    fn eat_receiver_dot(&mut self) -> bool {
        let mut lookahead = self.chars.clone();
        if lookahead.next_if(|&(_, c)| c == '.').is_none() {
            return false;
        }
        while lookahead.next_if(|&(_, c)| c.is_whitespace()).is_some() {}
        if matches!(lookahead.peek(), Some(&(_, '('))) {
            self.chars = lookahead;
            true
        } else {
            false
        }
    }

    fn parse_type(&mut self) -> Result<TypeRef> {
        self.skip_whitespace();
        if self.eat('*') {
            return Ok(TypeRef::star());
        }

        let suspend = self.eat_keyword("suspend");
        let mut receiver = None;
        if !self.at('(') {
            let named = self.parse_named_type()?;
            if !self.eat_receiver_dot() {
                if suspend {
                    return Err(self.error("expected a function type after 'suspend'"));
                }
                return Ok(named);
            }
            receiver = Some(named);
        }

        self.eat('(');
        let mut items = Vec::new();
        if !self.eat(')') {
            loop {
                items.push(self.parse_function_parameter()?);
                if self.eat(',') {
                    continue;
                }
                if self.eat(')') {
                    break;
                }
                return Err(self.error("expected ',' or ')' in parameter list"));
            }
        }

        if self.eat_arrow() {
            let return_type = self.parse_type()?;
            return Ok(TypeRef::function(FunctionType {
                suspend,
                receiver,
                parameters: items,
                return_type,
            }));
        }

        // Parenthesized type, e.g. the function type in `((A) -> B)?`.
        match (suspend, receiver, items.pop()) {
            (false, None, Some(inner)) if items.is_empty() => {
                let nullable = self.eat('?') || inner.nullable;
                Ok(inner.with_nullable(nullable))
            }
            _ => Err(self.error("expected '->' after parameter list")),
        }
    }

    /// A function type parameter, optionally named: `id: kotlin.String`.
    fn parse_function_parameter(&mut self) -> Result<TypeRef> {
        self.skip_whitespace();
        let checkpoint = self.chars.clone();
        if self.parse_identifier().is_ok() && self.eat(':') {
            return self.parse_type();
        }
        self.chars = checkpoint;
        self.parse_type()
    }

    fn parse_type_argument(&mut self) -> Result<TypeRef> {
        let variance = if self.eat_keyword("in") {
            Variance::In
        } else if self.eat_keyword("out") {
            Variance::Out
        } else {
            Variance::Invariant
        };
        Ok(self.parse_type()?.with_variance(variance))
    }

    fn parse_named_type(&mut self) -> Result<TypeRef> {
        let name = self.parse_qualified_name()?;
        let mut arguments = Vec::new();
        if self.eat('<') {
            loop {
                arguments.push(self.parse_type_argument()?);
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(self.error("expected ',' or '>' in type arguments"));
            }
        }
        let nullable = self.eat('?');
        Ok(TypeRef::parameterized(name, arguments).with_nullable(nullable))
    }

    fn parse_qualified_name(&mut self) -> Result<String> {
        let mut name = self.parse_identifier()?;
        loop {
            let mut lookahead = self.chars.clone();
            let continues = lookahead.next_if(|&(_, c)| c == '.').is_some()
                && matches!(lookahead.peek(), Some(&(_, c)) if c.is_alphabetic() || c == '_');
            if !continues {
                return Ok(name);
            }
            self.chars = lookahead;
            name.push('.');
            name.push_str(&self.parse_identifier()?);
        }
    }

    fn parse_identifier(&mut self) -> Result<String> {
        let mut ident = String::new();
        if let Some((_, c)) = self.chars.next_if(|&(_, c)| c.is_alphabetic() || c == '_') {
            ident.push(c);
        } else {
            return Err(self.error("expected an identifier"));
        }
        while let Some((_, c)) = self.chars.next_if(|&(_, c)| c.is_alphanumeric() || c == '_') {
            ident.push(c);
        }
        Ok(ident)
    }
}
