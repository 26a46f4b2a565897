use super::fixtures::*;
use super::{parse, struct_fields, type_specs};
use crate::tree::TreeNode;

fn comment_lines(node: &Option<Box<TreeNode>>) -> Vec<String> {
    match node.as_deref() {
        Some(TreeNode::CommentGroup { lines }) => lines.clone(),
        Some(other) => panic!("expected a comment group, got {}", other.kind_name()),
        None => Vec::new(),
    }
}

#[test]
pub fn test_package_doc_attached_to_file() {
    let file = parse(USER_MODEL);
    let TreeNode::File { doc, .. } = &file else {
        panic!("expected a file node");
    };
    assert_eq!(comment_lines(doc), vec!["// Package models holds the persisted entities."]);
}

#[test]
pub fn test_declaration_doc_attached_to_declaration() {
    let file = parse(USER_MODEL);
    let TreeNode::File { decls, .. } = &file else {
        panic!("expected a file node");
    };

    let type_decl = decls
        .iter()
        .find(|decl| matches!(decl, TreeNode::GenericDeclaration { keyword, .. } if keyword == "type"))
        .expect("Should find type declaration");
    let TreeNode::GenericDeclaration { doc, .. } = type_decl else {
        unreachable!();
    };
    assert_eq!(comment_lines(doc), vec!["// User is an account holder."]);
}

#[test]
pub fn test_grouped_spec_doc_and_trailing_field_comment() {
    let file = parse(GROUPED_TYPES);
    let specs = type_specs(&file);

    let TreeNode::TypeSpecification { doc, .. } = specs[0] else {
        panic!("expected a type specification");
    };
    assert_eq!(comment_lines(doc), vec!["// Order is placed by a user."]);

    let fields = struct_fields(specs[0]);
    let TreeNode::Field { doc, comment, .. } = &fields[1] else {
        panic!("expected a field");
    };
    assert!(doc.is_none());
    assert_eq!(comment_lines(comment), vec!["// in cents"]);

    let TreeNode::Field { comment, .. } = &fields[0] else {
        panic!("expected a field");
    };
    assert!(comment.is_none(), "the next field's comment must not leak upwards");
}
