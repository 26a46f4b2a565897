use std::path::{Path, PathBuf};
use thiserror::Error;
use tree_sitter::{Node, Parser};

use crate::parser::ast_utils::*;
use crate::tree::{ChanDir, TreeNode};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Failed to set language: {0}")]
    Language(String),

    #[error("Failed to read file {path:?}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Failed to parse source for: {path:?}")]
    NoTree { path: PathBuf },

    #[error("Syntax error in {path:?} at line {line}")]
    Syntax { path: PathBuf, line: usize },

    #[error("Missing package clause in {path:?}")]
    MissingPackage { path: PathBuf },
}

/// Go source to declaration tree.
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> Result<Self, ParseError> {
        let language = tree_sitter_go::language();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| ParseError::Language(e.to_string()))?;

        Ok(Self { parser })
    }

    pub fn parse_file(&mut self, file_path: &Path) -> Result<TreeNode, ParseError> {
        let source = std::fs::read_to_string(file_path).map_err(|e| ParseError::Io {
            path: file_path.to_path_buf(),
            message: e.to_string(),
        })?;

        self.parse_source(&source, file_path)
    }

    pub fn parse_source(&mut self, source: &str, file_path: &Path) -> Result<TreeNode, ParseError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ParseError::NoTree {
                path: file_path.to_path_buf(),
            })?;

        let root = tree.root_node();
        if let Some(line) = first_error_line(root) {
            return Err(ParseError::Syntax {
                path: file_path.to_path_buf(),
                line,
            });
        }

        Lowering {
            source: source.as_bytes(),
        }
        .file(root, file_path)
    }
}

/// Lowers tree-sitter-go nodes into `TreeNode`s.
struct Lowering<'s> {
    source: &'s [u8],
}

impl<'s> Lowering<'s> {
    fn file(&self, root: Node, file_path: &Path) -> Result<TreeNode, ParseError> {
        let mut package = None;
        let mut doc = None;
        let mut decls = Vec::new();

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "package_clause" => {
                    doc = leading_comments(child, self.source);
                    package = find_child_of_type(child, &["package_identifier"]).map(|n| self.ident(n));
                }
                "comment" => {}
                "import_declaration" => decls.push(self.import_declaration(child)),
                "type_declaration" => decls.push(self.type_declaration(child)),
                "function_declaration" | "method_declaration" => decls.push(self.routine(child)),
                "var_declaration" | "const_declaration" => decls.push(self.value_declaration(child)),
                other => decls.push(TreeNode::unknown(other)),
            }
        }

        let package = package.ok_or_else(|| ParseError::MissingPackage {
            path: file_path.to_path_buf(),
        })?;

        Ok(TreeNode::File {
            path: file_path.display().to_string(),
            doc,
            package: Box::new(package),
            decls,
        })
    }

    fn ident(&self, node: Node) -> TreeNode {
        TreeNode::ident(node_text(node, self.source))
    }

    fn literal(&self, node: Node) -> TreeNode {
        TreeNode::literal(node_text(node, self.source))
    }

    fn import_declaration(&self, node: Node) -> TreeNode {
        let mut specs = Vec::new();
        for child in named_children_without_comments(node) {
            match child.kind() {
                "import_spec" => specs.push(self.import_spec(child)),
                "import_spec_list" => {
                    for spec in named_children_without_comments(child) {
                        specs.push(self.import_spec(spec));
                    }
                }
                _ => {}
            }
        }

        TreeNode::GenericDeclaration {
            keyword: "import".to_string(),
            doc: leading_comments(node, self.source),
            specs,
        }
    }

    fn import_spec(&self, node: Node) -> TreeNode {
        TreeNode::ImportSpecification {
            doc: leading_comments(node, self.source),
            name: node
                .child_by_field_name("name")
                .map(|n| Box::new(self.ident(n))),
            path: Box::new(self.child_or_missing(node, "path", |n| self.literal(n))),
            comment: trailing_comment(node, self.source),
        }
    }

    fn type_declaration(&self, node: Node) -> TreeNode {
        let grouped = has_token(node, "(");
        let specs = named_children_without_comments(node)
            .into_iter()
            .filter(|child| matches!(child.kind(), "type_spec" | "type_alias"))
            .map(|spec| {
                // an ungrouped spec ends where its declaration does
                let trailing = if grouped {
                    trailing_comment(spec, self.source)
                } else {
                    trailing_comment(node, self.source)
                };
                self.type_spec(spec, trailing)
            })
            .collect();

        TreeNode::GenericDeclaration {
            keyword: "type".to_string(),
            doc: leading_comments(node, self.source),
            specs,
        }
    }

    fn type_spec(&self, node: Node, comment: Option<Box<TreeNode>>) -> TreeNode {
        TreeNode::TypeSpecification {
            doc: leading_comments(node, self.source),
            name: Box::new(self.child_or_missing(node, "name", |n| self.ident(n))),
            alias: node.kind() == "type_alias",
            type_expr: Box::new(self.child_type(node, "type")),
            comment,
        }
    }

    fn routine(&self, node: Node) -> TreeNode {
        TreeNode::RoutineDeclaration {
            doc: leading_comments(node, self.source),
            name: Box::new(self.child_or_missing(node, "name", |n| self.ident(n))),
        }
    }

    /// `var` and `const` declarations; their specs are kept opaque.
    fn value_declaration(&self, node: Node) -> TreeNode {
        let keyword = if node.kind() == "const_declaration" { "const" } else { "var" };
        let specs = named_children_without_comments(node)
            .into_iter()
            .map(|spec| TreeNode::unknown(spec.kind()))
            .collect();

        TreeNode::GenericDeclaration {
            keyword: keyword.to_string(),
            doc: leading_comments(node, self.source),
            specs,
        }
    }

    fn child_or_missing(&self, node: Node, field: &str, lower: impl Fn(Node) -> TreeNode) -> TreeNode {
        node.child_by_field_name(field)
            .map(lower)
            .unwrap_or_else(|| TreeNode::unknown("missing"))
    }

    fn child_type(&self, node: Node, field: &str) -> TreeNode {
        self.child_or_missing(node, field, |n| self.type_expr(n))
    }

    fn first_named_type(&self, node: Node) -> TreeNode {
        named_children_without_comments(node)
            .first()
            .map(|n| self.type_expr(*n))
            .unwrap_or_else(|| TreeNode::unknown("missing"))
    }

    fn type_expr(&self, node: Node) -> TreeNode {
        match node.kind() {
            "type_identifier" | "identifier" | "package_identifier" | "field_identifier" => self.ident(node),
            "qualified_type" => TreeNode::QualifiedIdentifier {
                base: Box::new(self.child_or_missing(node, "package", |n| self.ident(n))),
                selector: Box::new(self.child_or_missing(node, "name", |n| self.ident(n))),
            },
            "pointer_type" => TreeNode::PointerType {
                elem: Box::new(self.first_named_type(node)),
            },
            "slice_type" => TreeNode::SliceType {
                elem: Box::new(self.child_type(node, "element")),
            },
            "array_type" => TreeNode::ArrayType {
                len: Box::new(self.child_or_missing(node, "length", |n| self.expression(n))),
                elem: Box::new(self.child_type(node, "element")),
            },
            "implicit_length_array_type" => TreeNode::ArrayType {
                len: Box::new(TreeNode::literal("...")),
                elem: Box::new(self.child_type(node, "element")),
            },
            "map_type" => TreeNode::MapType {
                key: Box::new(self.child_type(node, "key")),
                value: Box::new(self.child_type(node, "value")),
            },
            "channel_type" => TreeNode::ChannelType {
                dir: channel_direction(node),
                value: Box::new(self.child_type(node, "value")),
            },
            "generic_type" => TreeNode::GenericInstance {
                base: Box::new(self.child_type(node, "type")),
                args: node
                    .child_by_field_name("type_arguments")
                    .map(|args| self.type_arguments(args))
                    .unwrap_or_default(),
            },
            "parenthesized_type" => TreeNode::ParenthesizedType {
                inner: Box::new(self.first_named_type(node)),
            },
            "struct_type" => TreeNode::StructLikeType {
                fields: Box::new(
                    find_child_of_type(node, &["field_declaration_list"])
                        .map(|list| self.field_list(list))
                        .unwrap_or(TreeNode::FieldList { fields: Vec::new() }),
                ),
            },
            "interface_type" => TreeNode::InterfaceType {
                members: named_children_without_comments(node)
                    .into_iter()
                    .map(|member| TreeNode::unknown(member.kind()))
                    .collect(),
            },
            other => TreeNode::unknown(other),
        }
    }

    fn type_arguments(&self, node: Node) -> Vec<TreeNode> {
        named_children_without_comments(node)
            .into_iter()
            .map(|arg| {
                // newer grammars wrap each argument in a type_elem
                if arg.kind() == "type_elem" && arg.named_child_count() == 1 {
                    self.first_named_type(arg)
                } else {
                    self.type_expr(arg)
                }
            })
            .collect()
    }

    /// Array lengths: literals, constants and `pkg.Const` references.
    fn expression(&self, node: Node) -> TreeNode {
        match node.kind() {
            "int_literal" | "float_literal" | "imaginary_literal" | "rune_literal"
            | "raw_string_literal" | "interpreted_string_literal" => self.literal(node),
            "identifier" => self.ident(node),
            "selector_expression" => TreeNode::QualifiedIdentifier {
                base: Box::new(self.child_or_missing(node, "operand", |n| self.expression(n))),
                selector: Box::new(self.child_or_missing(node, "field", |n| self.ident(n))),
            },
            other => TreeNode::unknown(other),
        }
    }

    fn field_list(&self, node: Node) -> TreeNode {
        let fields = named_children_without_comments(node)
            .into_iter()
            .filter(|child| child.kind() == "field_declaration")
            .map(|field| self.field(field))
            .collect();

        TreeNode::FieldList { fields }
    }

    fn field(&self, node: Node) -> TreeNode {
        let mut cursor = node.walk();
        let names: Vec<TreeNode> = node
            .children_by_field_name("name", &mut cursor)
            .map(|n| self.ident(n))
            .collect();

        let mut type_expr = self.child_type(node, "type");
        if names.is_empty() && has_token(node, "*") {
            type_expr = TreeNode::PointerType {
                elem: Box::new(type_expr),
            };
        }

        TreeNode::Field {
            doc: leading_comments(node, self.source),
            names,
            type_expr: Box::new(type_expr),
            tag: node
                .child_by_field_name("tag")
                .map(|n| Box::new(self.literal(n))),
            comment: trailing_comment(node, self.source),
        }
    }
}

fn channel_direction(node: Node) -> ChanDir {
    let mut cursor = node.walk();
    let tokens: Vec<&str> = node
        .children(&mut cursor)
        .filter(|child| !child.is_named())
        .map(|child| child.kind())
        .collect();

    match tokens.as_slice() {
        ["<-", ..] => ChanDir::Recv,
        _ if tokens.contains(&"<-") => ChanDir::Send,
        _ => ChanDir::Both,
    }
}
