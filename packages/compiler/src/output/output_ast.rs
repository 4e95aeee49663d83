//! Output AST Module
//!
//! Defines the expression and statement tree used for synthesized member
//! bodies. Emitters walk it through the visitor traits below.

use crate::model::type_ref::{split_qualified, TypeRef};
use serde::Serialize;

///// Expressions

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Expression {
    ReadVar(ReadVarExpr),
    ReadProp(ReadPropExpr),
    InvokeFn(InvokeFunctionExpr),
    Instantiate(InstantiateExpr),
    ArrowFn(ArrowFunctionExpr),
    External(ExternalExpr),
    Null,
    This,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadVarExpr {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadPropExpr {
    pub receiver: Box<Expression>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvokeFunctionExpr {
    #[serde(rename = "fn")]
    pub fn_: Box<Expression>,
    pub args: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstantiateExpr {
    pub class_expr: Box<Expression>,
    pub args: Vec<Expression>,
}

impl InstantiateExpr {
    /// A trailing thunk that emitters may place after the argument list.
    pub fn trailing_thunk(&self) -> Option<&ArrowFunctionExpr> {
        match self.args.last() {
            Some(Expression::ArrowFn(arrow)) => Some(arrow),
            _ => None,
        }
    }
}

/// Zero-argument lambda evaluating `body`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrowFunctionExpr {
    pub body: Box<Expression>,
}

/// Reference to a declaration that lives outside the generated file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ExternalReference {
    pub package: String,
    pub name: String,
}

impl ExternalReference {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        ExternalReference {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Reference to the class named by a type reference.
    pub fn from_type(type_: &TypeRef) -> Self {
        ExternalReference::new(type_.package_name(), type_.relative_name())
    }

    /// Reference to a top-level member, e.g. `com.example.mainProvider`.
    pub fn member(qualified_name: &str) -> Self {
        let (package, name) = split_qualified(qualified_name);
        ExternalReference::new(package, name)
    }

    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.package, self.name)
        }
    }

    /// The identifier an import makes visible: the outermost name segment.
    pub fn import_name(&self) -> &str {
        self.name.split('.').next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalExpr {
    pub value: ExternalReference,
}

pub trait ExpressionVisitor<C> {
    fn visit_read_var_expr(&mut self, expr: &ReadVarExpr, context: &mut C);
    fn visit_read_prop_expr(&mut self, expr: &ReadPropExpr, context: &mut C);
    fn visit_invoke_function_expr(&mut self, expr: &InvokeFunctionExpr, context: &mut C);
    fn visit_instantiate_expr(&mut self, expr: &InstantiateExpr, context: &mut C);
    fn visit_arrow_function_expr(&mut self, expr: &ArrowFunctionExpr, context: &mut C);
    fn visit_external_expr(&mut self, expr: &ExternalExpr, context: &mut C);
    fn visit_null_expr(&mut self, context: &mut C);
    fn visit_this_expr(&mut self, context: &mut C);
}

impl Expression {
    pub fn visit_expression<C>(&self, visitor: &mut dyn ExpressionVisitor<C>, context: &mut C) {
        match self {
            Expression::ReadVar(e) => visitor.visit_read_var_expr(e, context),
            Expression::ReadProp(e) => visitor.visit_read_prop_expr(e, context),
            Expression::InvokeFn(e) => visitor.visit_invoke_function_expr(e, context),
            Expression::Instantiate(e) => visitor.visit_instantiate_expr(e, context),
            Expression::ArrowFn(e) => visitor.visit_arrow_function_expr(e, context),
            Expression::External(e) => visitor.visit_external_expr(e, context),
            Expression::Null => visitor.visit_null_expr(context),
            Expression::This => visitor.visit_this_expr(context),
        }
    }

    pub fn prop(&self, name: impl Into<String>) -> Box<Expression> {
        Box::new(Expression::ReadProp(ReadPropExpr {
            receiver: Box::new(self.clone()),
            name: name.into(),
        }))
    }

    pub fn call_fn(&self, args: Vec<Expression>) -> Box<Expression> {
        Box::new(Expression::InvokeFn(InvokeFunctionExpr {
            fn_: Box::new(self.clone()),
            args,
        }))
    }

    pub fn instantiate(&self, args: Vec<Expression>) -> Box<Expression> {
        Box::new(Expression::Instantiate(InstantiateExpr {
            class_expr: Box::new(self.clone()),
            args,
        }))
    }
}

///// Statements

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Statement {
    Return(ReturnStatement),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStatement {
    pub value: Box<Expression>,
}

pub trait StatementVisitor<C> {
    fn visit_return_stmt(&mut self, stmt: &ReturnStatement, context: &mut C);
}

impl Statement {
    pub fn visit_statement<C>(&self, visitor: &mut dyn StatementVisitor<C>, context: &mut C) {
        match self {
            Statement::Return(s) => visitor.visit_return_stmt(s, context),
        }
    }
}

// Helper functions for creating common expressions
pub fn variable(name: impl Into<String>) -> Box<Expression> {
    Box::new(Expression::ReadVar(ReadVarExpr { name: name.into() }))
}

pub fn null_expr() -> Box<Expression> {
    Box::new(Expression::Null)
}

pub fn this_expr() -> Box<Expression> {
    Box::new(Expression::This)
}

pub fn import_ref(id: ExternalReference) -> Box<Expression> {
    Box::new(Expression::External(ExternalExpr { value: id }))
}

/// Zero-argument thunk evaluating `body`.
pub fn thunk(body: Box<Expression>) -> Box<Expression> {
    Box::new(Expression::ArrowFn(ArrowFunctionExpr { body }))
}

pub fn return_stmt(value: Box<Expression>) -> Statement {
    Statement::Return(ReturnStatement { value })
}
