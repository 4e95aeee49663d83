//! Kotlin Emitter Module
//!
//! Renders an adapter descriptor as a Kotlin source file. Types and external
//! references are printed by simple name and collected into the import list;
//! a simple name already taken by another declaration is printed qualified.

use super::abstract_emitter::{escape_identifier, EmitterVisitorContext};
use super::output_ast as o;
use super::output_ast::{ExpressionVisitor, ExternalReference, StatementVisitor};
use crate::model::{DeclarationKind, FunctionType, Modifiers, Parameter, TypeRef};
use crate::wrapper::{AdapterDescriptor, AdapterMember};
use indexmap::IndexMap;

/// Packages visible in every Kotlin file without an import.
const DEFAULT_IMPORTED_PACKAGES: &[&str] = &[
    "kotlin",
    "kotlin.annotation",
    "kotlin.collections",
    "kotlin.comparisons",
    "kotlin.io",
    "kotlin.ranges",
    "kotlin.sequences",
    "kotlin.text",
];

pub fn emit_adapter(adapter: &AdapterDescriptor) -> String {
    let package = adapter.package_name();
    let mut emitter = KotlinEmitter::new(package, &adapter.type_ref());

    let mut body = EmitterVisitorContext::create_root();
    emitter.emit_class(adapter, &mut body);

    let mut file = EmitterVisitorContext::create_root();
    if !package.is_empty() {
        file.println(&format!("package {}", package));
        file.println("");
    }
    let imports = emitter.scope.imports();
    for import in &imports {
        file.println(&format!("import {}", import));
    }
    if !imports.is_empty() {
        file.println("");
    }

    format!("{}{}", file.to_source(), body.to_source())
}

struct ImportScope {
    package: String,
    /// Outermost simple name -> the declaration it resolves to in this file.
    by_name: IndexMap<String, ExternalReference>,
}

impl ImportScope {
    fn new(package: &str) -> Self {
        ImportScope {
            package: package.to_string(),
            by_name: IndexMap::new(),
        }
    }

    /// Text to print for `reference`, registering it for import when its
    /// simple name is still free.
    fn reference(&mut self, reference: &ExternalReference) -> String {
        if reference.package.is_empty() {
            return reference.name.clone();
        }
        let outer = ExternalReference::new(reference.package.as_str(), reference.import_name());
        match self.by_name.get(&outer.name) {
            Some(existing) if *existing == outer => reference.name.clone(),
            Some(_) => reference.qualified_name(),
            None => {
                self.by_name.insert(outer.name.clone(), outer);
                reference.name.clone()
            }
        }
    }

    fn imports(&self) -> Vec<String> {
        let mut imports: Vec<String> = self
            .by_name
            .values()
            .filter(|r| r.package != self.package)
            .filter(|r| !DEFAULT_IMPORTED_PACKAGES.contains(&r.package.as_str()))
            .map(ExternalReference::qualified_name)
            .collect();
        imports.sort();
        imports
    }
}

struct KotlinEmitter {
    scope: ImportScope,
}

impl KotlinEmitter {
    fn new(package: &str, declared: &TypeRef) -> Self {
        let mut scope = ImportScope::new(package);
        // The declared class owns its simple name in this file.
        scope.reference(&ExternalReference::from_type(declared));
        KotlinEmitter { scope }
    }

    fn type_source(&mut self, type_: &TypeRef) -> String {
        let variance = type_.variance.to_string();
        if type_.is_star() {
            return "*".to_string();
        }
        if let Some(function) = &type_.function {
            let signature = self.function_type_source(function);
            return if type_.nullable {
                format!("{}({})?", variance, signature)
            } else {
                format!("{}{}", variance, signature)
            };
        }
        let mut source = variance;
        source.push_str(&self.scope.reference(&ExternalReference::from_type(type_)));
        if !type_.arguments.is_empty() {
            let args: Vec<String> = type_.arguments.iter().map(|a| self.type_source(a)).collect();
            source.push('<');
            source.push_str(&args.join(", "));
            source.push('>');
        }
        if type_.nullable {
            source.push('?');
        }
        source
    }

    fn function_type_source(&mut self, function: &FunctionType) -> String {
        let mut source = String::new();
        if function.suspend {
            source.push_str("suspend ");
        }
        if let Some(receiver) = &function.receiver {
            let receiver_source = self.type_source(receiver);
            if receiver.is_function() {
                source.push_str(&format!("({}).", receiver_source));
            } else {
                source.push_str(&format!("{}.", receiver_source));
            }
        }
        let params: Vec<String> = function.parameters.iter().map(|p| self.type_source(p)).collect();
        let return_type = self.type_source(&function.return_type);
        source.push_str(&format!("({}) -> {}", params.join(", "), return_type));
        source
    }

    fn parameters_source(&mut self, parameters: &[Parameter]) -> String {
        parameters
            .iter()
            .map(|p| format!("{}: {}", escape_identifier(&p.name), self.type_source(&p.type_)))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn emit_class(&mut self, adapter: &AdapterDescriptor, ctx: &mut EmitterVisitorContext) {
        ctx.println(&format!("public class {}(", escape_identifier(adapter.simple_name())));
        ctx.inc_indent();
        let mut merged = Vec::new();
        for param in &adapter.primary_constructor.parameters {
            let field = adapter.fields.iter().find(|f| {
                f.name == param.name
                    && f.initializer == *o::variable(param.name.as_str())
            });
            let prefix = match field {
                Some(field) => {
                    merged.push(field.name.as_str());
                    format!("{}val ", modifiers_source(field.modifiers, false))
                }
                None => String::new(),
            };
            let type_ = self.type_source(&param.type_);
            ctx.println(&format!("{}{}: {},", prefix, escape_identifier(&param.name), type_));
        }
        ctx.dec_indent();

        let supertypes: Vec<String> = adapter.supertypes.iter().map(|t| self.type_source(t)).collect();
        if supertypes.is_empty() {
            ctx.println(") {");
        } else {
            ctx.println(&format!(") : {} {{", supertypes.join(", ")));
        }
        ctx.inc_indent();

        for field in adapter.fields.iter().filter(|f| !merged.contains(&f.name.as_str())) {
            let type_ = self.type_source(&field.type_);
            ctx.print(
                &format!(
                    "{}val {}: {} = ",
                    modifiers_source(field.modifiers, false),
                    escape_identifier(&field.name),
                    type_
                ),
                false,
            );
            field.initializer.visit_expression(self, ctx);
            ctx.println("");
        }

        let secondary = &adapter.secondary_constructor;
        let params = self.parameters_source(&secondary.parameters);
        ctx.print(&format!("public constructor({})", params), false);
        if let Some(args) = &secondary.delegate_args {
            ctx.print(" : this(", false);
            self.visit_args(args, ctx);
            ctx.print(")", false);
        }
        ctx.println("");

        for member in &adapter.members {
            ctx.println("");
            self.emit_member(member, ctx);
        }

        ctx.dec_indent();
        ctx.println("}");
    }

    fn emit_member(&mut self, member: &AdapterMember, ctx: &mut EmitterVisitorContext) {
        let modifiers = modifiers_source(member.modifiers, true);
        let return_type = self.type_source(&member.return_type);
        let name = escape_identifier(&member.name);

        match member.kind {
            DeclarationKind::Function => {
                let params = self.parameters_source(&member.parameters);
                ctx.println(&format!(
                    "{}fun {}({}): {} {{",
                    modifiers, name, params, return_type
                ));
                ctx.inc_indent();
                member.body.visit_statement(self, ctx);
                ctx.dec_indent();
                ctx.println("}");
            }
            DeclarationKind::Property { .. } => {
                ctx.println(&format!("{}val {}: {}", modifiers, name, return_type));
                let o::Statement::Return(getter) = &member.body;
                ctx.inc_indent();
                ctx.print("get() = ", false);
                getter.value.visit_expression(self, ctx);
                ctx.println("");
                ctx.dec_indent();
            }
        }
    }

    fn visit_args(&mut self, args: &[o::Expression], ctx: &mut EmitterVisitorContext) {
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                ctx.print(", ", false);
            }
            arg.visit_expression(self, ctx);
        }
    }
}

/// Keywords for a modifier set, each followed by a space. Visibility is
/// always explicit for members.
fn modifiers_source(modifiers: Modifiers, explicit_public: bool) -> String {
    let mut keywords = Vec::new();
    if modifiers.contains(Modifiers::PRIVATE) {
        keywords.push("private");
    } else if modifiers.contains(Modifiers::PROTECTED) {
        keywords.push("protected");
    } else if modifiers.contains(Modifiers::INTERNAL) {
        keywords.push("internal");
    } else if explicit_public {
        keywords.push("public");
    }
    for (flag, keyword) in [
        (Modifiers::ABSTRACT, "abstract"),
        (Modifiers::OPEN, "open"),
        (Modifiers::OVERRIDE, "override"),
        (Modifiers::SUSPEND, "suspend"),
    ] {
        if modifiers.contains(flag) {
            keywords.push(keyword);
        }
    }
    keywords.iter().map(|k| format!("{} ", k)).collect()
}

impl ExpressionVisitor<EmitterVisitorContext> for KotlinEmitter {
    fn visit_read_var_expr(&mut self, expr: &o::ReadVarExpr, ctx: &mut EmitterVisitorContext) {
        ctx.print(&escape_identifier(&expr.name), false);
    }

    fn visit_read_prop_expr(&mut self, expr: &o::ReadPropExpr, ctx: &mut EmitterVisitorContext) {
        expr.receiver.visit_expression(self, ctx);
        ctx.print(".", false);
        ctx.print(&escape_identifier(&expr.name), false);
    }

    fn visit_invoke_function_expr(
        &mut self,
        expr: &o::InvokeFunctionExpr,
        ctx: &mut EmitterVisitorContext,
    ) {
        expr.fn_.visit_expression(self, ctx);
        ctx.print("(", false);
        self.visit_args(&expr.args, ctx);
        ctx.print(")", false);
    }

    fn visit_instantiate_expr(&mut self, expr: &o::InstantiateExpr, ctx: &mut EmitterVisitorContext) {
        expr.class_expr.visit_expression(self, ctx);
        match expr.trailing_thunk() {
            Some(thunk) => {
                let leading = &expr.args[..expr.args.len() - 1];
                if !leading.is_empty() {
                    ctx.print("(", false);
                    self.visit_args(leading, ctx);
                    ctx.print(")", false);
                }
                ctx.print(" ", false);
                self.visit_arrow_function_expr(thunk, ctx);
            }
            None => {
                ctx.print("(", false);
                self.visit_args(&expr.args, ctx);
                ctx.print(")", false);
            }
        }
    }

    fn visit_arrow_function_expr(
        &mut self,
        expr: &o::ArrowFunctionExpr,
        ctx: &mut EmitterVisitorContext,
    ) {
        ctx.print("{ ", false);
        expr.body.visit_expression(self, ctx);
        ctx.print(" }", false);
    }

    fn visit_external_expr(&mut self, expr: &o::ExternalExpr, ctx: &mut EmitterVisitorContext) {
        let text = self.scope.reference(&expr.value);
        ctx.print(&text, false);
    }

    fn visit_null_expr(&mut self, ctx: &mut EmitterVisitorContext) {
        ctx.print("null", false);
    }

    fn visit_this_expr(&mut self, ctx: &mut EmitterVisitorContext) {
        ctx.print("this", false);
    }
}

impl StatementVisitor<EmitterVisitorContext> for KotlinEmitter {
    fn visit_return_stmt(&mut self, stmt: &o::ReturnStatement, ctx: &mut EmitterVisitorContext) {
        ctx.print("return ", false);
        stmt.value.visit_expression(self, ctx);
        ctx.println("");
    }
}
