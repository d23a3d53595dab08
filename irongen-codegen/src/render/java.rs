//! Java-flavoured reference renderer.
//!
//! The printer is a [`Visitor`] over the finished tree. Member and statement
//! methods write whole lines; expression and type methods write inline text
//! into the current line of the [`CodeWriter`].

use std::mem;
use std::ops::ControlFlow;

use irongen_ast::node::{
    AbstractMethodDeclaration, ArgumentList, ArrayInitializer, ArrayType, BinaryExpression, Block,
    BoundedType, Cast, ClassName, Comment, CommentKind, CompilationUnit,
    ConstructorDeclaration, ConstructorParameter, DeclarationReference, DecoratingTypeNode,
    Delegate, DelegateCall, EdgeType, EnumItem, ExtendsDeclaration, Field, FieldBackedGetter,
    FieldBackedSetter, FieldReference, FormatNewline, FreeText, FreeTextCode, FreeTextExample,
    FreeTextLine, FreeTextList, FreeTextParagraph, FreeTextPropertyLink, FreeTextSection,
    FreeTextTypeLink, GenericRef, GenericType, GenericTypeDeclaration,
    GenericTypeDeclarationList, HardCoded, Identifier, IfElseStatement, IfStatement,
    ImplementsDeclaration, IndexAccess, InstanceOf, Literal, MemberAccess, MethodCall,
    MethodDeclaration, MethodDeclarationSignature, MethodName, ModifierKind, ModifierList,
    Namespace, NamespaceBlock, NewStatement, Node, Nodes, Parameter, ParameterList,
    ReturnStatement,
    SelfReference, StaticMemberReference, Statement, SuperConstructorCall, SuperReference,
    TernaryExpression, ThrowStatement, TokenKind, TypeNode, VariableDeclaration, WildcardType,
};
use irongen_ast::visit::Visitor;
use irongen_ast::{AstError, CodeRoot, ObjectDeclaration};
use irongen_model::naming::to_pascal_case;
use irongen_model::{PrimitiveKind, PrimitiveValue, TypeId, TypeModel};
use tracing::{debug, warn};

use super::writer::CodeWriter;
use super::{RenderedFile, Renderer};
use crate::error::Result;

type Flow = ControlFlow<AstError>;

/// Prints every compilation unit as one Java-like source file.
#[derive(Debug, Clone)]
pub struct JavaLikeRenderer {
    indent: &'static str,
    extension: &'static str,
}

impl Default for JavaLikeRenderer {
    fn default() -> Self {
        Self {
            indent: "    ",
            extension: "java",
        }
    }
}

impl JavaLikeRenderer {
    /// Creates a renderer with four-space indentation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation unit.
    #[must_use]
    pub const fn with_indent(mut self, indent: &'static str) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the file extension, without the dot.
    #[must_use]
    pub const fn with_extension(mut self, extension: &'static str) -> Self {
        self.extension = extension;
        self
    }

    fn render_unit(&self, root: &CodeRoot, unit: &CompilationUnit) -> Result<RenderedFile> {
        let mut printer = Printer::new(root, CodeWriter::new(self.indent));
        if let ControlFlow::Break(err) = printer.visit_compilation_unit(unit) {
            return Err(err.into());
        }
        let name = unit
            .name
            .clone()
            .or_else(|| unit.children.iter().find_map(|n| Some(n.shape()?.name.value.clone())))
            .unwrap_or_else(|| "Generated".to_string());
        debug!(unit = %name, package = %unit.package.namespace, "rendered unit");
        Ok(RenderedFile {
            file_name: format!("{name}.{}", self.extension),
            directory: unit.package.namespace.replace('.', "/"),
            content: printer.out.finish(),
            name,
        })
    }
}

impl Renderer for JavaLikeRenderer {
    fn render(&self, root: &CodeRoot) -> Result<Vec<RenderedFile>> {
        let mut files = Vec::new();
        for node in root.children() {
            match node {
                Node::CompilationUnit(unit) => files.push(self.render_unit(root, unit)?),
                other => {
                    warn!(kind = other.kind_name(), "skipping node outside a compilation unit");
                }
            }
        }
        Ok(files)
    }
}

fn check<T>(result: irongen_ast::Result<T>) -> ControlFlow<AstError, T> {
    match result {
        Ok(value) => ControlFlow::Continue(value),
        Err(err) => ControlFlow::Break(err),
    }
}

/// Java spelling of a primitive, boxed where a reference type is required.
const fn primitive_name(kind: PrimitiveKind, boxed: bool) -> &'static str {
    match (kind, boxed) {
        (PrimitiveKind::Null, _) => "Object",
        (PrimitiveKind::Void, false) => "void",
        (PrimitiveKind::Void, true) => "Void",
        (PrimitiveKind::Bool, false) => "boolean",
        (PrimitiveKind::Bool, true) => "Boolean",
        (PrimitiveKind::Char, false) => "char",
        (PrimitiveKind::Char, true) => "Character",
        (PrimitiveKind::String, _) => "String",
        (PrimitiveKind::Int, false) => "int",
        (PrimitiveKind::Int, true) => "Integer",
        (PrimitiveKind::Long, false) => "long",
        (PrimitiveKind::Long, true) => "Long",
        (PrimitiveKind::Float, false) => "float",
        (PrimitiveKind::Float, true) => "Float",
        (PrimitiveKind::Double | PrimitiveKind::Number, false) => "double",
        (PrimitiveKind::Double | PrimitiveKind::Number, true) => "Double",
        (PrimitiveKind::Decimal, _) => "BigDecimal",
    }
}

const fn modifier_keyword(kind: ModifierKind) -> Option<&'static str> {
    match kind {
        ModifierKind::Private => Some("private"),
        ModifierKind::Public => Some("public"),
        ModifierKind::Protected => Some("protected"),
        ModifierKind::Static => Some("static"),
        ModifierKind::Final | ModifierKind::Readonly | ModifierKind::Const => Some("final"),
        ModifierKind::Abstract => Some("abstract"),
        ModifierKind::Default | ModifierKind::Override => None,
    }
}

const fn precedence(token: TokenKind) -> u8 {
    match token {
        TokenKind::Comma => 0,
        TokenKind::Assign => 1,
        TokenKind::CoalesceNull => 2,
        TokenKind::Or => 3,
        TokenKind::And => 4,
        TokenKind::BitwiseOr => 5,
        TokenKind::Equals | TokenKind::NotEquals => 6,
        TokenKind::Gt | TokenKind::Lt | TokenKind::Gte | TokenKind::Lte => 7,
        TokenKind::Add | TokenKind::Subtract => 8,
        TokenKind::Multiply => 9,
    }
}

/// Nodes that need a terminating `;` when they stand alone in a block.
const fn is_expression(node: &Node) -> bool {
    matches!(
        node,
        Node::TernaryExpression(_)
            | Node::BinaryExpression(_)
            | Node::MethodCall(_)
            | Node::MemberAccess(_)
            | Node::IndexAccess(_)
            | Node::Cast(_)
            | Node::NewStatement(_)
            | Node::InstanceOf(_)
            | Node::SuperConstructorCall(_)
            | Node::Literal(_)
            | Node::Identifier(_)
            | Node::SelfReference(_)
            | Node::SuperReference(_)
            | Node::FieldReference(_)
            | Node::DeclarationReference(_)
            | Node::StaticMemberReference(_)
            | Node::ClassName(_)
            | Node::DelegateCall(_)
            | Node::ArrayInitializer(_)
            | Node::Type(_)
    )
}

fn quote(text: &str, delimiter: char) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(delimiter);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

fn literal_text(literal: &Literal) -> String {
    let kind = literal
        .primitive_kind
        .unwrap_or_else(|| literal.value.natural_kind());
    match &literal.value {
        PrimitiveValue::Null => "null".to_string(),
        PrimitiveValue::Bool(b) => b.to_string(),
        PrimitiveValue::Int(i) => match kind {
            PrimitiveKind::Long => format!("{i}L"),
            PrimitiveKind::Float => format!("{i}f"),
            PrimitiveKind::Double | PrimitiveKind::Number => format!("{i}.0"),
            PrimitiveKind::String => quote(&i.to_string(), '"'),
            _ => i.to_string(),
        },
        PrimitiveValue::Float(v) => match kind {
            PrimitiveKind::Float => format!("{v:?}f"),
            PrimitiveKind::String => quote(&v.to_string(), '"'),
            _ => format!("{v:?}"),
        },
        PrimitiveValue::String(s) => match kind {
            PrimitiveKind::Char if s.chars().count() == 1 => quote(s, '\''),
            _ => quote(s, '"'),
        },
    }
}

/// `is` for non-nullable booleans, `get` otherwise.
fn getter_prefix(model: &TypeModel, type_id: Option<TypeId>) -> &'static str {
    let is_bool = type_id
        .and_then(|id| model.try_get(model.undecorated(id)))
        .and_then(|def| def.as_primitive())
        .is_some_and(|p| p.kind == PrimitiveKind::Bool && !p.nullable);
    if is_bool { "is" } else { "get" }
}

struct Printer<'a> {
    root: &'a CodeRoot,
    out: CodeWriter,
    /// Documentation text being collected for the current comment.
    doc: String,
    /// Print primitives as their boxed reference types.
    boxed: bool,
    /// Names of the enclosing declarations, innermost last.
    owners: Vec<String>,
}

impl<'a> Printer<'a> {
    fn new(root: &'a CodeRoot, out: CodeWriter) -> Self {
        Self {
            root,
            out,
            doc: String::new(),
            boxed: false,
            owners: Vec::new(),
        }
    }

    fn boxing(&mut self, f: impl FnOnce(&mut Self) -> Flow) -> Flow {
        let previous = mem::replace(&mut self.boxed, true);
        let flow = f(self);
        self.boxed = previous;
        flow
    }

    fn modifiers(&mut self, modifiers: &ModifierList) {
        if modifiers.has(ModifierKind::Override) {
            self.out.line("@Override");
        }
        for modifier in &modifiers.children {
            if let Some(keyword) = modifier_keyword(modifier.kind) {
                self.out.write(keyword);
                self.out.write(" ");
            }
        }
    }

    fn comments(&mut self, comment: Option<&Comment>) -> Flow {
        match comment {
            Some(comment) => self.visit_comment(comment),
            None => ControlFlow::Continue(()),
        }
    }

    fn block_child(&mut self, node: &Node) -> Flow {
        self.visit_node(node)?;
        if is_expression(node) {
            self.out.write(";");
        }
        self.out.end_line();
        ControlFlow::Continue(())
    }

    fn braced(&mut self, block: &Block) -> Flow {
        self.out.write(" {");
        self.out.newline();
        self.out.indent();
        self.visit_block(block)?;
        self.out.end_line();
        self.out.dedent();
        self.out.line("}");
        ControlFlow::Continue(())
    }

    fn comma_separated<T>(
        &mut self,
        items: &[T],
        mut f: impl FnMut(&mut Self, &T) -> Flow,
    ) -> Flow {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.write(", ");
            }
            f(self, item)?;
        }
        ControlFlow::Continue(())
    }

    fn type_clause(&mut self, keyword: &str, types: &[&TypeNode]) -> Flow {
        if types.is_empty() {
            return ControlFlow::Continue(());
        }
        self.out.write(keyword);
        self.comma_separated(types, |p, t| p.visit_type_node(t))
    }

    fn operand(&mut self, node: &Node, parent: TokenKind, right: bool) -> Flow {
        let wrap = match node {
            Node::BinaryExpression(child) => {
                let (child, parent) = (precedence(child.token), precedence(parent));
                child < parent || (right && child == parent && parent > 1)
            }
            Node::TernaryExpression(_) => true,
            _ => false,
        };
        if wrap {
            self.out.write("(");
        }
        self.visit_node(node)?;
        if wrap {
            self.out.write(")");
        }
        ControlFlow::Continue(())
    }

    fn method_name_text(&self, name: &MethodName) -> String {
        match name {
            MethodName::Plain(identifier) => identifier.value.clone(),
            MethodName::Getter(getter) => format!(
                "{}{}",
                getter_prefix(self.root.model(), getter.type_id),
                to_pascal_case(&getter.identifier.value)
            ),
            MethodName::Setter(setter) => {
                format!("set{}", to_pascal_case(&setter.identifier.value))
            }
        }
    }

    fn signature(&mut self, signature: &MethodDeclarationSignature) -> Flow {
        self.out.end_line();
        self.comments(signature.comments.as_ref())?;
        self.modifiers(&signature.modifiers);
        if let Some(generics) = &signature.generic_parameters {
            if !generics.children.is_empty() {
                self.visit_generic_type_declaration_list(generics)?;
                self.out.write(" ");
            }
        }
        self.visit_type_node(&signature.type_node)?;
        self.out.write(" ");
        let name = self.method_name_text(&signature.identifier);
        self.out.write(&name);
        self.out.write("(");
        self.visit_parameter_list(&signature.parameters)?;
        self.out.write(")");
        if let Some(throws) = &signature.throws {
            let types: Vec<&TypeNode> = throws.children.iter().collect();
            self.type_clause(" throws ", &types)?;
        }
        ControlFlow::Continue(())
    }

    fn enum_items(&mut self, items: &[&EnumItem]) -> Flow {
        for (i, item) in items.iter().enumerate() {
            self.comments(item.comments.as_ref())?;
            self.out.write(&item.identifier.value);
            if !matches!(item.value.value, PrimitiveValue::Null) {
                self.out.write("(");
                self.visit_literal(&item.value)?;
                self.out.write(")");
            }
            self.out.write(if i + 1 == items.len() { ";" } else { "," });
            self.out.end_line();
        }
        if items.is_empty() {
            self.out.line(";");
        }

        let value_kind = items
            .iter()
            .map(|item| &item.value)
            .find(|value| !matches!(value.value, PrimitiveValue::Null))
            .map(|value| value.primitive_kind.unwrap_or_else(|| value.value.natural_kind()));
        let (Some(kind), Some(owner)) = (value_kind, self.owners.last().cloned()) else {
            return ControlFlow::Continue(());
        };
        let ty = primitive_name(kind, false);
        self.out.blank_line();
        self.out.line(&format!("private final {ty} value;"));
        self.out.blank_line();
        self.out.line(&format!("{owner}({ty} value) {{"));
        self.out.indent();
        self.out.line("this.value = value;");
        self.out.dedent();
        self.out.line("}");
        self.out.blank_line();
        self.out.line(&format!("public {ty} getValue() {{"));
        self.out.indent();
        self.out.line("return value;");
        self.out.dedent();
        self.out.line("}");
        ControlFlow::Continue(())
    }

    fn edge_name(&self, edge: &EdgeType) -> String {
        if let Some(name) = &edge.local_name {
            return name.clone();
        }
        let model = self.root.model();
        match model.try_get(model.undecorated(edge.type_id)) {
            Some(def) => match def.as_primitive() {
                Some(p) => primitive_name(p.kind, p.nullable || self.boxed).to_string(),
                None => model.virtual_name(edge.type_id),
            },
            None => "Object".to_string(),
        }
    }

    fn paragraph_break(&mut self) {
        if self.doc.is_empty() || self.doc.ends_with("\n\n") {
            return;
        }
        if !self.doc.ends_with('\n') {
            self.doc.push('\n');
        }
        self.doc.push('\n');
    }
}

impl Visitor for Printer<'_> {
    type Break = AstError;

    fn visit_compilation_unit(&mut self, node: &CompilationUnit) -> Flow {
        self.comments(node.comments.as_ref())?;
        if !node.package.namespace.is_empty() {
            self.out.line(&format!("package {};", node.package.namespace));
            self.out.blank_line();
        }
        for import in &node.imports.children {
            match import.type_node.as_edge().and_then(|e| e.import_name.as_deref()) {
                Some(name) => self.out.line(&format!("import {name};")),
                None => warn!(unit = ?node.name, "import without a canonical name"),
            }
        }
        self.out.blank_line();
        for child in &node.children {
            self.block_child(child)?;
        }
        ControlFlow::Continue(())
    }

    fn visit_object_declaration(&mut self, node: ObjectDeclaration<'_>) -> Flow {
        let shape = node.shape();
        self.out.end_line();
        self.comments(shape.comments.as_ref())?;
        self.modifiers(&shape.modifiers);
        self.out.write(match node {
            ObjectDeclaration::Class(_) => "class ",
            ObjectDeclaration::Interface(_) => "interface ",
            ObjectDeclaration::Enum(_) => "enum ",
        });
        self.out.write(&shape.name.value);
        if let Some(generics) = &shape.generic_parameters {
            self.visit_generic_type_declaration_list(generics)?;
        }
        let extends: Vec<&TypeNode> =
            shape.extends.iter().flat_map(|e| &e.types.children).collect();
        let implements: Vec<&TypeNode> =
            shape.implements.iter().flat_map(|i| &i.types.children).collect();
        if let ObjectDeclaration::Interface(_) = node {
            let all: Vec<&TypeNode> = extends.into_iter().chain(implements).collect();
            self.type_clause(" extends ", &all)?;
        } else {
            self.type_clause(" extends ", &extends)?;
            self.type_clause(" implements ", &implements)?;
        }

        self.out.write(" {");
        self.out.newline();
        self.out.indent();
        self.owners.push(shape.name.value.clone());
        let flow = self.visit_object_declaration_body(node, &shape.body);
        self.owners.pop();
        flow?;
        self.out.trim_blank_lines();
        self.out.dedent();
        self.out.line("}");
        ControlFlow::Continue(())
    }

    fn visit_object_declaration_body(
        &mut self,
        owner: ObjectDeclaration<'_>,
        body: &Block,
    ) -> Flow {
        if !matches!(owner, ObjectDeclaration::Enum(_)) {
            return self.visit_block(body);
        }
        let items: Vec<&EnumItem> = body
            .children
            .iter()
            .filter_map(|n| match n {
                Node::EnumItemList(list) => Some(&list.children),
                _ => None,
            })
            .flatten()
            .collect();
        self.enum_items(&items)?;
        let members: Vec<&Node> = body
            .children
            .iter()
            .filter(|n| !matches!(n, Node::EnumItemList(_)))
            .collect();
        if !members.is_empty() {
            self.out.blank_line();
        }
        for child in members {
            self.block_child(child)?;
        }
        ControlFlow::Continue(())
    }

    fn visit_block(&mut self, node: &Block) -> Flow {
        for child in &node.children {
            self.block_child(child)?;
        }
        ControlFlow::Continue(())
    }

    fn visit_nodes(&mut self, node: &Nodes) -> Flow {
        for child in &node.children {
            self.block_child(child)?;
        }
        ControlFlow::Continue(())
    }

    fn visit_namespace(&mut self, node: &Namespace) -> Flow {
        self.visit_namespace_block(&node.block)
    }

    fn visit_namespace_block(&mut self, node: &NamespaceBlock) -> Flow {
        self.visit_block(&node.block)
    }

    fn visit_comment(&mut self, node: &Comment) -> Flow {
        self.doc.clear();
        self.visit_free_text(&node.text)?;
        let text = mem::take(&mut self.doc);
        let lines: Vec<&str> = text.trim_end().lines().map(str::trim_end).collect();
        self.out.end_line();
        match node.kind {
            CommentKind::Single => {
                for line in lines {
                    self.out.line(format!("// {line}").trim_end());
                }
            }
            CommentKind::Multi | CommentKind::Doc => {
                let open = if node.kind == CommentKind::Doc { "/**" } else { "/*" };
                self.out.line(open);
                for line in lines {
                    self.out.line(format!(" * {line}").trim_end());
                }
                self.out.line(" */");
            }
        }
        ControlFlow::Continue(())
    }

    fn visit_free_text_leaf(&mut self, node: &FreeText) -> Flow {
        self.doc.push_str(&node.text);
        ControlFlow::Continue(())
    }

    fn visit_free_text_line(&mut self, node: &FreeTextLine) -> Flow {
        self.visit_free_text(&node.child)?;
        self.doc.push('\n');
        ControlFlow::Continue(())
    }

    fn visit_free_text_paragraph(&mut self, node: &FreeTextParagraph) -> Flow {
        self.paragraph_break();
        self.visit_free_text(&node.child)?;
        self.doc.push('\n');
        ControlFlow::Continue(())
    }

    fn visit_free_text_section(&mut self, node: &FreeTextSection) -> Flow {
        self.paragraph_break();
        if let Some(header) = &node.header {
            self.visit_free_text(header)?;
            self.doc.push('\n');
        }
        self.visit_free_text(&node.content)
    }

    fn visit_free_text_list(&mut self, node: &FreeTextList) -> Flow {
        for child in &node.children {
            self.doc.push_str("- ");
            self.visit_free_text(child)?;
            self.doc.push('\n');
        }
        ControlFlow::Continue(())
    }

    fn visit_free_text_code(&mut self, node: &FreeTextCode) -> Flow {
        self.doc.push_str(&format!("{{@code {}}}", node.text));
        ControlFlow::Continue(())
    }

    fn visit_free_text_example(&mut self, node: &FreeTextExample) -> Flow {
        self.paragraph_break();
        self.doc.push_str(&format!("<pre>\n{}\n</pre>\n", node.text));
        ControlFlow::Continue(())
    }

    fn visit_free_text_type_link(&mut self, node: &FreeTextTypeLink) -> Flow {
        let name = node
            .local_name
            .clone()
            .unwrap_or_else(|| self.root.model().virtual_name(node.type_id));
        self.doc.push_str(&format!("{{@link {name}}}"));
        ControlFlow::Continue(())
    }

    fn visit_free_text_property_link(&mut self, node: &FreeTextPropertyLink) -> Flow {
        let owner = self.root.model().virtual_name(node.type_id);
        self.doc
            .push_str(&format!("{{@link {owner}#{}}}", node.property_name));
        ControlFlow::Continue(())
    }

    fn visit_field(&mut self, node: &Field) -> Flow {
        self.out.end_line();
        self.comments(node.comments.as_ref())?;
        self.modifiers(&node.modifiers);
        self.visit_type_node(&node.type_node)?;
        self.out.write(" ");
        self.out.write(&node.identifier.value);
        if let Some(initializer) = &node.initializer {
            self.out.write(" = ");
            self.visit_node(initializer)?;
        }
        self.out.write(";");
        self.out.end_line();
        ControlFlow::Continue(())
    }

    fn visit_field_backed_getter(&mut self, node: &FieldBackedGetter) -> Flow {
        let root = self.root;
        let field = check(root.resolve_field(node.field_ref.target_id))?;
        let base = node
            .getter_name
            .as_ref()
            .map_or(field.identifier.original_or_value(), |n| n.value.as_str());
        let prefix = getter_prefix(root.model(), field.type_node.type_id());
        let is_static = field.modifiers.has(ModifierKind::Static);

        self.out.end_line();
        self.comments(node.comments.as_ref())?;
        self.out.write(if is_static { "public static " } else { "public " });
        self.visit_type_node(&field.type_node)?;
        self.out.write(&format!(" {prefix}{}() {{", to_pascal_case(base)));
        self.out.newline();
        self.out.indent();
        let owner = if is_static { "" } else { "this." };
        self.out
            .line(&format!("return {owner}{};", field.identifier.value));
        self.out.dedent();
        self.out.line("}");
        ControlFlow::Continue(())
    }

    fn visit_field_backed_setter(&mut self, node: &FieldBackedSetter) -> Flow {
        let root = self.root;
        let field = check(root.resolve_field(node.field_ref.target_id))?;
        let parameter = node
            .identifier
            .as_ref()
            .map_or(field.identifier.original_or_value(), |n| n.value.as_str());

        self.out.end_line();
        self.comments(node.comments.as_ref())?;
        self.out
            .write(&format!("public void set{}(", to_pascal_case(parameter)));
        self.visit_type_node(&field.type_node)?;
        self.out.write(&format!(" {parameter}) {{"));
        self.out.newline();
        self.out.indent();
        self.out
            .line(&format!("this.{} = {parameter};", field.identifier.value));
        self.out.dedent();
        self.out.line("}");
        ControlFlow::Continue(())
    }

    fn visit_constructor_declaration(&mut self, node: &ConstructorDeclaration) -> Flow {
        self.out.end_line();
        self.comments(node.comments.as_ref())?;
        self.modifiers(&node.modifiers);
        let owner = self.owners.last().cloned().unwrap_or_default();
        self.out.write(&owner);
        self.out.write("(");
        self.comma_separated(&node.parameters.children, |p, param| {
            p.visit_constructor_parameter(param)
        })?;
        self.out.write(")");
        self.braced(&node.body)
    }

    fn visit_constructor_parameter(&mut self, node: &ConstructorParameter) -> Flow {
        self.visit_type_node(&node.type_node)?;
        self.out.write(" ");
        self.out.write(&node.identifier.value);
        ControlFlow::Continue(())
    }

    fn visit_parameter_list(&mut self, node: &ParameterList) -> Flow {
        self.comma_separated(&node.children, |p, param| p.visit_parameter(param))
    }

    fn visit_parameter(&mut self, node: &Parameter) -> Flow {
        self.visit_type_node(&node.type_node)?;
        self.out.write(" ");
        self.out.write(&node.identifier.value);
        ControlFlow::Continue(())
    }

    fn visit_method_declaration(&mut self, node: &MethodDeclaration) -> Flow {
        self.signature(&node.signature)?;
        self.braced(&node.body)
    }

    fn visit_abstract_method_declaration(&mut self, node: &AbstractMethodDeclaration) -> Flow {
        self.signature(&node.signature)?;
        self.out.write(";");
        self.out.end_line();
        ControlFlow::Continue(())
    }

    fn visit_generic_type_declaration_list(&mut self, node: &GenericTypeDeclarationList) -> Flow {
        if node.children.is_empty() {
            return ControlFlow::Continue(());
        }
        self.out.write("<");
        self.comma_separated(&node.children, |p, g| p.visit_generic_type_declaration(g))?;
        self.out.write(">");
        ControlFlow::Continue(())
    }

    fn visit_generic_type_declaration(&mut self, node: &GenericTypeDeclaration) -> Flow {
        self.out.write(&node.name.value);
        self.boxing(|p| {
            if let Some(upper) = &node.upper_bound {
                p.out.write(" extends ");
                p.visit_type_node(upper)?;
            }
            if let Some(lower) = &node.lower_bound {
                p.out.write(" super ");
                p.visit_type_node(lower)?;
            }
            ControlFlow::Continue(())
        })
    }

    fn visit_extends_declaration(&mut self, node: &ExtendsDeclaration) -> Flow {
        let types: Vec<&TypeNode> = node.types.children.iter().collect();
        self.type_clause(" extends ", &types)
    }

    fn visit_implements_declaration(&mut self, node: &ImplementsDeclaration) -> Flow {
        let types: Vec<&TypeNode> = node.types.children.iter().collect();
        self.type_clause(" implements ", &types)
    }

    fn visit_variable_declaration(&mut self, node: &VariableDeclaration) -> Flow {
        if node.constant {
            self.out.write("final ");
        }
        match &node.type_node {
            Some(type_node) => self.visit_type_node(type_node)?,
            None => self.out.write("var"),
        }
        self.out.write(" ");
        self.out.write(&node.identifier.value);
        if let Some(initializer) = &node.initializer {
            self.out.write(" = ");
            self.visit_node(initializer)?;
        }
        self.out.write(";");
        self.out.end_line();
        ControlFlow::Continue(())
    }

    fn visit_statement(&mut self, node: &Statement) -> Flow {
        self.block_child(&node.child)
    }

    fn visit_return_statement(&mut self, node: &ReturnStatement) -> Flow {
        self.out.write("return ");
        self.visit_node(&node.expression)?;
        self.out.write(";");
        self.out.end_line();
        ControlFlow::Continue(())
    }

    fn visit_throw_statement(&mut self, node: &ThrowStatement) -> Flow {
        self.out.write("throw ");
        self.visit_node(&node.expression)?;
        self.out.write(";");
        self.out.end_line();
        ControlFlow::Continue(())
    }

    fn visit_if_statement(&mut self, node: &IfStatement) -> Flow {
        self.out.write("if (");
        self.visit_node(&node.predicate)?;
        self.out.write(")");
        self.braced(&node.body)
    }

    fn visit_if_else_statement(&mut self, node: &IfElseStatement) -> Flow {
        self.out.write("if (");
        self.visit_node(&node.predicate)?;
        self.out.write(") {");
        self.out.newline();
        self.out.indent();
        self.visit_block(&node.if_body)?;
        self.out.end_line();
        self.out.dedent();
        self.out.write("} else {");
        self.out.newline();
        self.out.indent();
        self.visit_block(&node.else_body)?;
        self.out.end_line();
        self.out.dedent();
        self.out.line("}");
        ControlFlow::Continue(())
    }

    fn visit_ternary_expression(&mut self, node: &TernaryExpression) -> Flow {
        self.visit_node(&node.predicate)?;
        self.out.write(" ? ");
        self.visit_node(&node.if_expression)?;
        self.out.write(" : ");
        self.visit_node(&node.else_expression)
    }

    fn visit_binary_expression(&mut self, node: &BinaryExpression) -> Flow {
        self.operand(&node.left, node.token, false)?;
        if node.token == TokenKind::Comma {
            self.out.write(", ");
        } else {
            self.out.write(&format!(" {} ", node.token.symbol()));
        }
        self.operand(&node.right, node.token, true)
    }

    fn visit_argument_list(&mut self, node: &ArgumentList) -> Flow {
        self.out.write("(");
        self.comma_separated(&node.children, |p, arg| p.visit_node(arg))?;
        self.out.write(")");
        ControlFlow::Continue(())
    }

    fn visit_method_call(&mut self, node: &MethodCall) -> Flow {
        if let Some(target) = &node.target {
            self.visit_node(target)?;
            self.out.write(".");
        }
        let name = self.method_name_text(&node.method_name);
        self.out.write(&name);
        self.visit_argument_list(&node.arguments)
    }

    fn visit_member_access(&mut self, node: &MemberAccess) -> Flow {
        self.visit_node(&node.owner)?;
        self.out.write(".");
        self.visit_node(&node.member)
    }

    fn visit_index_access(&mut self, node: &IndexAccess) -> Flow {
        self.visit_node(&node.target)?;
        self.out.write("[");
        self.visit_node(&node.index)?;
        self.out.write("]");
        ControlFlow::Continue(())
    }

    fn visit_cast(&mut self, node: &Cast) -> Flow {
        self.out.write("(");
        self.visit_type_node(&node.to_type)?;
        self.out.write(") ");
        self.visit_node(&node.expression)
    }

    fn visit_new_statement(&mut self, node: &NewStatement) -> Flow {
        self.out.write("new ");
        self.visit_type_node(&node.type_node)?;
        self.visit_argument_list(&node.arguments)
    }

    fn visit_instance_of(&mut self, node: &InstanceOf) -> Flow {
        self.visit_node(&node.target)?;
        self.out.write(" instanceof ");
        self.visit_type_node(&node.type_node)
    }

    fn visit_super_constructor_call(&mut self, node: &SuperConstructorCall) -> Flow {
        self.out.write("super");
        self.visit_argument_list(&node.arguments)
    }

    fn visit_literal(&mut self, node: &Literal) -> Flow {
        self.out.write(&literal_text(node));
        ControlFlow::Continue(())
    }

    fn visit_identifier(&mut self, node: &Identifier) -> Flow {
        self.out.write(&node.value);
        ControlFlow::Continue(())
    }

    fn visit_self_reference(&mut self, _node: &SelfReference) -> Flow {
        self.out.write("this");
        ControlFlow::Continue(())
    }

    fn visit_super_reference(&mut self, _node: &SuperReference) -> Flow {
        self.out.write("super");
        ControlFlow::Continue(())
    }

    fn visit_field_reference(&mut self, node: &FieldReference) -> Flow {
        let root = self.root;
        let field = check(root.resolve_field(node.target_id))?;
        self.out.write(&field.identifier.value);
        ControlFlow::Continue(())
    }

    fn visit_declaration_reference(&mut self, node: &DeclarationReference) -> Flow {
        let root = self.root;
        let target = check(root.resolve(node.target_id))?;
        match target.identifier() {
            Some(identifier) => {
                self.out.write(&identifier.value);
                ControlFlow::Continue(())
            }
            None => ControlFlow::Break(AstError::unexpected("named declaration", "delegate")),
        }
    }

    fn visit_generic_ref(&mut self, _node: &GenericRef) -> Flow {
        ControlFlow::Continue(())
    }

    fn visit_static_member_reference(&mut self, node: &StaticMemberReference) -> Flow {
        self.visit_type_node(&node.target)?;
        self.out.write(".");
        self.visit_node(&node.member)
    }

    fn visit_class_name(&mut self, node: &ClassName) -> Flow {
        match &node.type_node {
            TypeNode::Generic(generic) => self.visit_edge_type(&generic.base),
            other => self.visit_type_node(other),
        }
    }

    fn visit_delegate_call(&mut self, node: &DelegateCall) -> Flow {
        self.visit_node(&node.delegate)?;
        self.out.write(".apply");
        self.visit_argument_list(&node.arguments)
    }

    fn visit_array_initializer(&mut self, node: &ArrayInitializer) -> Flow {
        if let Some(type_node) = &node.type_node {
            self.out.write("new ");
            self.visit_type_node(type_node)?;
            self.out.write("[] ");
        }
        self.out.write("{ ");
        self.comma_separated(&node.children, |p, child| p.visit_node(child))?;
        self.out.write(" }");
        ControlFlow::Continue(())
    }

    fn visit_hard_coded(&mut self, node: &HardCoded) -> Flow {
        for (i, line) in node.text.lines().enumerate() {
            if i > 0 {
                self.out.newline();
            }
            self.out.write(line);
        }
        ControlFlow::Continue(())
    }

    fn visit_format_newline(&mut self, _node: &FormatNewline) -> Flow {
        self.out.blank_line();
        ControlFlow::Continue(())
    }

    fn visit_edge_type(&mut self, node: &EdgeType) -> Flow {
        let name = self.edge_name(node);
        self.out.write(&name);
        ControlFlow::Continue(())
    }

    fn visit_array_type(&mut self, node: &ArrayType) -> Flow {
        let previous = mem::replace(&mut self.boxed, false);
        let flow = self.visit_type_node(&node.of);
        self.boxed = previous;
        flow?;
        self.out.write("[]");
        ControlFlow::Continue(())
    }

    fn visit_generic_type(&mut self, node: &GenericType) -> Flow {
        self.visit_edge_type(&node.base)?;
        if node.args.is_empty() {
            return ControlFlow::Continue(());
        }
        self.out.write("<");
        self.boxing(|p| p.comma_separated(&node.args, |p, arg| p.visit_type_node(arg)))?;
        self.out.write(">");
        ControlFlow::Continue(())
    }

    fn visit_bounded_type(&mut self, node: &BoundedType) -> Flow {
        self.visit_type_node(&node.base)
    }

    fn visit_wildcard_type(&mut self, _node: &WildcardType) -> Flow {
        self.out.write("Object");
        ControlFlow::Continue(())
    }

    fn visit_decorating_type_node(&mut self, node: &DecoratingTypeNode) -> Flow {
        self.visit_type_node(&node.of)
    }

    fn visit_delegate(&mut self, node: &Delegate) -> Flow {
        let name = self
            .root
            .name_resolver()
            .delegate_name(node.kind)
            .map_or_else(|| "Function".to_string(), |n| n.name);
        self.out.write(&name);
        self.out.write("<");
        self.boxing(|p| {
            for parameter in &node.parameter_types {
                p.visit_type_node(parameter)?;
                p.out.write(", ");
            }
            p.visit_type_node(&node.return_type)
        })?;
        self.out.write(">");
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::options::CodeOptions;
    use irongen_ast::node::{ident, ClassDeclaration, DeclarationShape, PackageDeclaration};
    use irongen_ast::IdSlot;
    use irongen_model::{EnumType, PrimitiveType, TypeDef};

    fn render(root: &CodeRoot) -> Vec<RenderedFile> {
        JavaLikeRenderer::new().render(root).expect("render")
    }

    fn file<'a>(files: &'a [RenderedFile], name: &str) -> &'a RenderedFile {
        files
            .iter()
            .find(|f| f.name == name)
            .unwrap_or_else(|| panic!("no file named {name}"))
    }

    fn expression(node: &Node) -> String {
        let root = CodeRoot::new(fixtures::empty_model());
        let mut printer = Printer::new(&root, CodeWriter::default());
        assert!(printer.visit_node(node).is_continue());
        printer.out.finish()
    }

    #[test]
    fn test_renders_one_file_per_unit() {
        let (model, _) = fixtures::person_model();
        let root = fixtures::run_standard(model, &CodeOptions::default());

        let files = render(&root);

        assert_eq!(files.len(), 1);
        let person = &files[0];
        assert_eq!(person.name, "Person");
        assert_eq!(person.file_name, "Person.java");
        assert_eq!(person.directory, "com/zoo");
        assert!(person.content.starts_with("// Generated by irongen\npackage com.zoo;\n"));
        let content = &person.content;
        assert!(content.contains("/**\n * Somebody at the zoo.\n */\npublic class Person {"));
        assert!(content.contains("    public String getName() {\n        return this.name;"));
        assert!(person.content.contains("public void setNickname(String nickname) {"));
        assert!(person.content.contains("this.nickname = nickname;"));
        assert!(person.content.ends_with("}\n"));
        assert!(!person.content.contains("\n\n\n"));
    }

    #[test]
    fn test_generated_comment_can_be_disabled() {
        let (model, _) = fixtures::person_model();
        let options = CodeOptions::builder()
            .include_generated_comment(false)
            .include_comments(false)
            .build();
        let root = fixtures::run_standard(model, &options);

        let content = &render(&root)[0].content;
        assert!(content.starts_with("package com.zoo;"));
        assert!(!content.contains("//"));
        assert!(!content.contains("/**"));
    }

    #[test]
    fn test_imports_across_namespaces() {
        let (model, _, _) = fixtures::cross_namespace_model();
        let root = fixtures::run_standard(model, &CodeOptions::default());

        let files = render(&root);
        let shop = file(&files, "Shop");
        assert_eq!(shop.directory, "com/b");
        assert_eq!(shop.content.matches("import com.a.Owner;").count(), 1);
        assert!(shop.content.contains("public Owner getOwner() {"));
        let owner = file(&files, "Owner");
        assert!(owner.content.contains("import com.b.Shop;"));
    }

    #[test]
    fn test_enum_items_carry_values() {
        let mut model = fixtures::empty_model();
        model.add_exported(TypeDef::Enum(EnumType::of_strings("Color", ["red", "dark green"])));
        let root = fixtures::run_standard(model, &CodeOptions::default());

        let files = render(&root);
        let color = file(&files, "Color");
        assert_eq!(color.directory, "generated");
        assert!(color.content.contains("public enum Color {"));
        assert!(color.content.contains("    RED(\"red\"),\n    DARK_GREEN(\"dark green\");"));
        assert!(color.content.contains("private final String value;"));
        assert!(color.content.contains("Color(String value) {"));
        assert!(color.content.contains("public String getValue() {"));
        assert!(color.content.ends_with("        return value;\n    }\n}\n"));
        assert!(!color.content.contains("\n\n}"));
    }

    #[test]
    fn test_binary_operands_are_parenthesized_by_precedence() {
        let either = BinaryExpression::new(ident("a"), TokenKind::Or, ident("b"));
        let both = BinaryExpression::new(either.into(), TokenKind::And, ident("c"));
        assert_eq!(expression(&both.into()), "(a || b) && c\n");

        let both = BinaryExpression::new(ident("a"), TokenKind::And, ident("b"));
        let either = BinaryExpression::new(both.into(), TokenKind::Or, ident("c"));
        assert_eq!(expression(&either.into()), "a && b || c\n");
    }

    #[test]
    fn test_literals() {
        assert_eq!(literal_text(&Literal::new("say \"hi\"\n")), "\"say \\\"hi\\\"\\n\"");
        assert_eq!(literal_text(&Literal::new(7_i64)), "7");
        let long = Literal::typed(PrimitiveValue::Int(7), PrimitiveKind::Long);
        assert_eq!(literal_text(&long), "7L");
        assert_eq!(
            literal_text(&Literal::typed(PrimitiveValue::Float(0.5), PrimitiveKind::Float)),
            "0.5f"
        );
        assert_eq!(literal_text(&Literal::typed("x".into(), PrimitiveKind::Char)), "'x'");
        assert_eq!(literal_text(&Literal::new(true)), "true");
        assert_eq!(literal_text(&Literal::null()), "null");
    }

    #[test]
    fn test_primitives_box_inside_generics() {
        assert_eq!(primitive_name(PrimitiveKind::Int, false), "int");
        assert_eq!(primitive_name(PrimitiveKind::Int, true), "Integer");
        assert_eq!(primitive_name(PrimitiveKind::String, false), "String");

        let mut model = fixtures::empty_model();
        let int = model.primitive(PrimitiveType::new(PrimitiveKind::Int));
        let list = model.add(TypeDef::HardcodedReference(irongen_model::HardcodedReference {
            fqn: "java.util.List".to_string(),
        }));
        let root = CodeRoot::new(model);
        let generic = TypeNode::Generic(Box::new(GenericType {
            id: IdSlot::new(),
            type_id: list,
            base: EdgeType::new(list),
            args: vec![EdgeType::new(int).into()],
            parameters: Vec::new(),
        }));
        let mut printer = Printer::new(&root, CodeWriter::default());
        assert!(printer.visit_type_node(&generic).is_continue());
        assert!(printer.visit_edge_type(&EdgeType::new(int)).is_continue());
        assert_eq!(printer.out.finish(), "List<Integer>int\n");
    }

    #[test]
    fn test_dangling_reference_fails() {
        let (model, person) = fixtures::person_model();
        let elsewhere = CodeRoot::new(fixtures::empty_model());
        let missing = elsewhere.id_of(&Field::new(
            EdgeType::new(person).into(),
            Identifier::new("ghost"),
        ));

        let mut shape =
            DeclarationShape::new(Identifier::new("Person"), EdgeType::new(person).into());
        shape.body = Block::new(vec![FieldBackedGetter::new(FieldReference::new(missing)).into()]);
        let class: Node = ClassDeclaration {
            id: IdSlot::new(),
            shape,
        }
        .into();
        let mut root = CodeRoot::new(model);
        let unit = CompilationUnit::new("Person", PackageDeclaration::new("com.zoo"), class);
        root.push_child(unit.into());

        let err = JavaLikeRenderer::new().render(&root).expect_err("dangling getter");
        assert!(matches!(
            err,
            crate::error::CodegenError::Ast(AstError::ReferenceNodeNotFound { .. })
        ));
    }
}
