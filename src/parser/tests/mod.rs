// Parser lowering tests: Go source in, declaration tree out

pub mod fixtures;

mod comment_attachment;
mod declaration_parsing;
mod type_parsing;

use crate::parser::GoParser;
use crate::tree::TreeNode;
use std::path::Path;

pub(crate) fn parse(source: &str) -> TreeNode {
    let mut parser = GoParser::new().expect("Failed to create parser");
    parser
        .parse_source(source, Path::new("test.go"))
        .expect("Failed to parse source")
}

/// Top-level type specifications of a parsed file, in source order.
pub(crate) fn type_specs(file: &TreeNode) -> Vec<&TreeNode> {
    let TreeNode::File { decls, .. } = file else {
        panic!("expected a file node, got {}", file.kind_name());
    };
    decls
        .iter()
        .filter_map(|decl| match decl {
            TreeNode::GenericDeclaration { keyword, specs, .. } if keyword == "type" => Some(specs),
            _ => None,
        })
        .flatten()
        .collect()
}

/// Field nodes of a struct type specification.
pub(crate) fn struct_fields(spec: &TreeNode) -> &[TreeNode] {
    let TreeNode::TypeSpecification { type_expr, .. } = spec else {
        panic!("expected a type specification, got {}", spec.kind_name());
    };
    let TreeNode::StructLikeType { fields } = type_expr.as_ref() else {
        panic!("expected a struct type, got {}", type_expr.kind_name());
    };
    let TreeNode::FieldList { fields } = fields.as_ref() else {
        panic!("expected a field list");
    };
    fields
}
