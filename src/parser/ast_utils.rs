use tree_sitter::Node;

use crate::tree::TreeNode;

/// Safe wrapper around node.utf8_text that handles encoding errors gracefully
pub fn safe_node_text<'a>(node: Node, source: &'a [u8]) -> Option<&'a str> {
    node.utf8_text(source).ok()
}

/// Source text of a node, or an empty string when it is not valid UTF-8
pub fn node_text(node: Node, source: &[u8]) -> String {
    safe_node_text(node, source).unwrap_or("").to_string()
}

/// Find the first child node of any of the specified types
pub fn find_child_of_type<'a>(node: Node<'a>, types: &[&str]) -> Option<Node<'a>> {
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        if types.contains(&child.kind()) {
            return Some(child);
        }
    }

    None
}

/// Named children, skipping comments
pub fn named_children_without_comments<'a>(node: Node<'a>) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    children
}

/// Whether an unnamed token of the given spelling appears among the children
pub fn has_token(node: Node, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

/// Comments directly above the node with no blank line between them.
///
/// A comment sharing a line with the preceding sibling belongs to that
/// sibling and stops the scan.
pub fn leading_comments(node: Node, source: &[u8]) -> Option<Box<TreeNode>> {
    let mut lines = Vec::new();
    let mut next_row = node.start_position().row;
    let mut current = node.prev_named_sibling();

    while let Some(prev) = current {
        if prev.kind() != "comment" || prev.end_position().row + 1 != next_row {
            break;
        }
        if let Some(before) = prev.prev_named_sibling() {
            if before.end_position().row == prev.start_position().row {
                break;
            }
        }
        lines.push(node_text(prev, source));
        next_row = prev.start_position().row;
        current = prev.prev_named_sibling();
    }

    if lines.is_empty() {
        None
    } else {
        lines.reverse();
        Some(Box::new(TreeNode::CommentGroup { lines }))
    }
}

/// Comment starting on the line where the node ends.
pub fn trailing_comment(node: Node, source: &[u8]) -> Option<Box<TreeNode>> {
    let next = node.next_named_sibling()?;
    if next.kind() == "comment" && next.start_position().row == node.end_position().row {
        Some(Box::new(TreeNode::CommentGroup {
            lines: vec![node_text(next, source)],
        }))
    } else {
        None
    }
}

/// One-based line of the first syntax error below `node`, if any
pub fn first_error_line(node: Node) -> Option<usize> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .find_map(first_error_line)
        .or(Some(node.start_position().row + 1))
}
