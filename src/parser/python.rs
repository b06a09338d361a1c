// Python structural extraction using tree-sitter.
//
// Parsing is strict: a tree containing any error node is reported as a
// failed file rather than mined for partial structure.

use crate::error::{Error, Result};
use crate::parser::model::*;
use tree_sitter::{Node, Parser, Tree};

/// Parser for Python source files
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    /// Create a new Python parser
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let language = tree_sitter_python::language();
        parser
            .set_language(&language)
            .map_err(|e| Error::Parser(format!("Failed to set Python language: {}", e)))?;
        Ok(Self { parser })
    }

    /// Parse source text into a syntax tree. Malformed input becomes a
    /// tagged error, never a panic.
    pub fn parse(&mut self, source: &str) -> Result<Tree> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| Error::parser("parser returned no tree"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(Error::parser(first_error_diagnostic(root)));
        }

        Ok(tree)
    }

    /// Parse and extract the structural report for one module
    pub fn extract(&mut self, source: &str, relative_path: &str) -> Result<ModuleReport> {
        let tree = self.parse(source)?;
        Ok(extract_module(
            &tree.root_node(),
            source.as_bytes(),
            relative_path,
        ))
    }
}

/// Locate the first error or missing node and describe its position
fn first_error_diagnostic(node: Node) -> String {
    let position = find_error(node)
        .map(|n| n.start_position())
        .unwrap_or_else(|| node.start_position());
    format!(
        "syntax error at line {}, column {}",
        position.row + 1,
        position.column + 1
    )
}

fn find_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = find_error(child) {
            return Some(found);
        }
    }
    Some(node)
}

/// Walk the module root and collect all top-level constructs
fn extract_module(root: &Node, source: &[u8], path: &str) -> ModuleReport {
    let mut report = ModuleReport::new(path);
    report.docstring = leading_docstring(root, source);

    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        match child.kind() {
            "import_statement" => {
                report
                    .imports
                    .plain_imports
                    .extend(parse_plain_import(&child, source));
            }
            "import_from_statement" => {
                if let Some(from) = parse_from_import(&child, source) {
                    report.imports.from_imports.push(from);
                }
            }
            "class_definition" => {
                if let Some(class) = parse_class(&child, source) {
                    report.classes.push(class);
                }
            }
            "function_definition" => {
                if let Some(func) = parse_callable(&child, source) {
                    report.functions.push(func);
                }
            }
            "decorated_definition" => {
                if decorated_inner_kind(&child) == Some("class_definition") {
                    if let Some(class) = parse_class(&child, source) {
                        report.classes.push(class);
                    }
                } else if let Some(func) = parse_callable(&child, source) {
                    report.functions.push(func);
                }
            }
            "expression_statement" => {
                if let Some(var) = parse_variable(&child, source) {
                    report.module_variables.push(var);
                }
            }
            _ => {}
        }
    }

    report
}

/// Render a node back to source text. Falls back to the node's
/// s-expression dump when the slice is not valid UTF-8, so nothing is
/// silently dropped.
fn node_text(node: &Node, source: &[u8]) -> String {
    node.utf8_text(source)
        .map(|t| t.to_string())
        .unwrap_or_else(|_| node.to_sexp())
}

/// Extract string content, handling triple-quoted strings
fn string_content(node: &Node, source: &[u8]) -> Option<String> {
    let text = node.utf8_text(source).ok()?;

    let s = if text.starts_with("\"\"\"") || text.starts_with("'''") {
        &text[3..text.len().saturating_sub(3)]
    } else if text.starts_with('"') || text.starts_with('\'') {
        &text[1..text.len().saturating_sub(1)]
    } else {
        text
    };

    Some(s.trim().to_string())
}

/// First literal string statement of a module, class body, or function
/// body; comments before it are allowed.
fn leading_docstring(container: &Node, source: &[u8]) -> Option<String> {
    let mut cursor = container.walk();
    for child in container.children(&mut cursor) {
        match child.kind() {
            "expression_statement" => {
                let mut inner = child.walk();
                for node in child.children(&mut inner) {
                    if node.kind() == "string" {
                        return string_content(&node, source);
                    }
                }
                return None;
            }
            "comment" => {}
            _ => return None,
        }
    }
    None
}

/// `import X [as Y], Z` entries, alias text preserved
fn parse_plain_import(node: &Node, source: &[u8]) -> Vec<String> {
    let mut entries = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "dotted_name" => entries.push(node_text(&child, source)),
            "aliased_import" => entries.push(aliased_text(&child, source)),
            _ => {}
        }
    }
    entries
}

/// `from M import A [as B], ...` as one clause; relative dots kept on `M`
fn parse_from_import(node: &Node, source: &[u8]) -> Option<FromImport> {
    let mut module = String::new();
    let mut names = Vec::new();
    let mut seen_import = false;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "relative_import" => module = node_text(&child, source),
            "dotted_name" => {
                if seen_import {
                    names.push(node_text(&child, source));
                } else {
                    module = node_text(&child, source);
                }
            }
            "import" => seen_import = true,
            "wildcard_import" => names.push("*".to_string()),
            "aliased_import" => names.push(aliased_text(&child, source)),
            _ => {}
        }
    }

    if module.is_empty() {
        return None;
    }
    Some(FromImport { module, names })
}

fn aliased_text(node: &Node, source: &[u8]) -> String {
    let name = node.child_by_field_name("name");
    let alias = node.child_by_field_name("alias");
    match (name, alias) {
        (Some(n), Some(a)) => {
            format!("{} as {}", node_text(&n, source), node_text(&a, source))
        }
        (Some(n), None) => node_text(&n, source),
        _ => node_text(node, source),
    }
}

/// Single-name assignment or annotated assignment. Tuple and multi-target
/// forms are intentionally not decomposed.
fn parse_variable(stmt: &Node, source: &[u8]) -> Option<VariableInfo> {
    let mut cursor = stmt.walk();
    let assign = stmt
        .children(&mut cursor)
        .find(|c| c.kind() == "assignment")?;

    let left = assign.child_by_field_name("left")?;
    if left.kind() != "identifier" {
        return None;
    }

    let right = assign.child_by_field_name("right");
    // `a = b = 1` chains a second assignment on the right; the original
    // multi-target statement is skipped, not split.
    if right.map(|r| r.kind() == "assignment").unwrap_or(false) {
        return None;
    }

    let mut var = VariableInfo::new(&node_text(&left, source));
    var.annotation = assign
        .child_by_field_name("type")
        .map(|n| node_text(&n, source));
    var.value = right.map(|n| node_text(&n, source));
    Some(var)
}

/// The kind of definition wrapped by a `decorated_definition`
fn decorated_inner_kind<'a>(node: &Node<'a>) -> Option<&'a str> {
    node.child_by_field_name("definition").map(|n| n.kind())
}

/// Resolve a possibly-decorated node to the inner definition of the
/// wanted kind.
fn inner_definition<'a>(node: &Node<'a>, wanted: &str) -> Option<Node<'a>> {
    if node.kind() == wanted {
        return Some(*node);
    }
    if node.kind() != "decorated_definition" {
        return None;
    }
    let inner = node.child_by_field_name("definition")?;
    if inner.kind() != wanted {
        return None;
    }
    Some(inner)
}

/// Decorator expressions as text, `@` stripped, arguments kept
fn extract_decorators(node: &Node, source: &[u8]) -> Vec<String> {
    let mut decorators = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "decorator" {
            let text = node_text(&child, source);
            decorators.push(text.trim_start_matches('@').trim().to_string());
        }
    }
    decorators
}

/// Parse a class definition, possibly under decorators
fn parse_class(node: &Node, source: &[u8]) -> Option<ClassInfo> {
    let class_node = inner_definition(node, "class_definition")?;

    let name_node = class_node.child_by_field_name("name")?;
    let mut class = ClassInfo::new(&node_text(&name_node, source));
    class.decorators = extract_decorators(node, source);

    if let Some(superclasses) = class_node.child_by_field_name("superclasses") {
        class.bases = parse_bases(&superclasses, source);
    }

    if let Some(body) = class_node.child_by_field_name("body") {
        class.docstring = leading_docstring(&body, source);
        parse_class_body(&body, source, &mut class);
    }

    Some(class)
}

/// Base classes from the superclass argument list; keyword arguments
/// (metaclass=...) are not bases.
fn parse_bases(node: &Node, source: &[u8]) -> Vec<String> {
    let mut bases = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "identifier" | "attribute" | "subscript" | "call" => {
                bases.push(node_text(&child, source));
            }
            _ => {}
        }
    }
    bases
}

fn parse_class_body(body: &Node, source: &[u8], class: &mut ClassInfo) {
    let mut cursor = body.walk();
    for child in body.children(&mut cursor) {
        match child.kind() {
            "function_definition" | "decorated_definition" => {
                if let Some(method) = parse_callable(&child, source) {
                    if method.is_property() && !class.properties.contains(&method.name) {
                        class.properties.push(method.name.clone());
                    }
                    class.methods.push(method);
                }
            }
            "expression_statement" => {
                if let Some(var) = parse_variable(&child, source) {
                    class.class_variables.push(var);
                }
            }
            _ => {}
        }
    }
}

/// Parse a function or method definition, possibly under decorators
fn parse_callable(node: &Node, source: &[u8]) -> Option<CallableInfo> {
    let func_node = inner_definition(node, "function_definition")?;

    let name_node = func_node.child_by_field_name("name")?;
    let mut func = CallableInfo::new(&node_text(&name_node, source));
    func.decorators = extract_decorators(node, source);
    func.is_async = has_async_keyword(&func_node);

    if let Some(params) = func_node.child_by_field_name("parameters") {
        func.signature = extract_signature(
            &params,
            func_node.child_by_field_name("return_type"),
            source,
        );
    }

    if let Some(body) = func_node.child_by_field_name("body") {
        func.docstring = leading_docstring(&body, source);
    }

    Some(func)
}

fn has_async_keyword(node: &Node) -> bool {
    let mut cursor = node.walk();
    let result = node.children(&mut cursor).any(|c| c.kind() == "async");
    result
}

/// Decompose a `parameters` node into the signature model.
///
/// Position-only and regular positional parameters merge into one ordered
/// list; the grammar attaches each default to its own parameter node, so
/// defaulted positionals trail defaultless ones by construction. A `*args`
/// splat or a bare `*` separator switches collection to keyword-only.
fn extract_signature(
    params: &Node,
    return_type: Option<Node>,
    source: &[u8],
) -> SignatureInfo {
    let mut sig = SignatureInfo::default();
    let mut keyword_only = false;

    let mut cursor = params.walk();
    for child in params.children(&mut cursor) {
        match child.kind() {
            "identifier" => {
                push_param(
                    &mut sig,
                    keyword_only,
                    ParameterInfo::new(&node_text(&child, source)),
                );
            }
            "typed_parameter" => {
                parse_typed_parameter(&child, source, &mut sig, &mut keyword_only);
            }
            "default_parameter" => {
                if let Some(param) = parse_default_parameter(&child, source) {
                    push_param(&mut sig, keyword_only, param);
                }
            }
            "typed_default_parameter" => {
                if let Some(param) = parse_typed_default_parameter(&child, source) {
                    push_param(&mut sig, keyword_only, param);
                }
            }
            "list_splat_pattern" => {
                if let Some(name) = splat_name(&child, source) {
                    sig.vararg = Some(VariadicInfo::new(&name));
                }
                keyword_only = true;
            }
            "dictionary_splat_pattern" => {
                if let Some(name) = splat_name(&child, source) {
                    sig.kwarg = Some(VariadicInfo::new(&name));
                }
            }
            "keyword_separator" | "*" => keyword_only = true,
            "positional_separator" | "/" => {}
            _ => {}
        }
    }

    sig.returns = return_type.map(|n| node_text(&n, source));
    sig
}

fn push_param(sig: &mut SignatureInfo, keyword_only: bool, param: ParameterInfo) {
    if keyword_only {
        sig.keyword_only.push(param);
    } else {
        sig.positional.push(param);
    }
}

/// `x: T`, or an annotated splat `*args: T` / `**kwargs: T`
fn parse_typed_parameter(
    node: &Node,
    source: &[u8],
    sig: &mut SignatureInfo,
    keyword_only: &mut bool,
) {
    let annotation = node
        .child_by_field_name("type")
        .map(|n| node_text(&n, source));

    let mut cursor = node.walk();
    for inner in node.children(&mut cursor) {
        match inner.kind() {
            "identifier" => {
                let mut param = ParameterInfo::new(&node_text(&inner, source));
                param.annotation = annotation;
                push_param(sig, *keyword_only, param);
                return;
            }
            "list_splat_pattern" => {
                if let Some(name) = splat_name(&inner, source) {
                    sig.vararg = Some(VariadicInfo {
                        name,
                        annotation,
                    });
                }
                *keyword_only = true;
                return;
            }
            "dictionary_splat_pattern" => {
                if let Some(name) = splat_name(&inner, source) {
                    sig.kwarg = Some(VariadicInfo {
                        name,
                        annotation,
                    });
                }
                return;
            }
            _ => {}
        }
    }
}

/// `x=expr`
fn parse_default_parameter(node: &Node, source: &[u8]) -> Option<ParameterInfo> {
    let name = node.child_by_field_name("name")?;
    if name.kind() != "identifier" {
        return None;
    }
    let mut param = ParameterInfo::new(&node_text(&name, source));
    param.default = node
        .child_by_field_name("value")
        .map(|n| node_text(&n, source));
    Some(param)
}

/// `x: T = expr`
fn parse_typed_default_parameter(node: &Node, source: &[u8]) -> Option<ParameterInfo> {
    let name = node.child_by_field_name("name")?;
    let mut param = ParameterInfo::new(&node_text(&name, source));
    param.annotation = node
        .child_by_field_name("type")
        .map(|n| node_text(&n, source));
    param.default = node
        .child_by_field_name("value")
        .map(|n| node_text(&n, source));
    Some(param)
}

fn splat_name(node: &Node, source: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    let result = node.children(&mut cursor)
        .find(|c| c.kind() == "identifier")
        .map(|n| node_text(&n, source));
    result
}
