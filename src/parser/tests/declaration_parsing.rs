use super::fixtures::*;
use super::parse;
use crate::parser::{GoParser, ParseError};
use crate::projector::{project_file, SymbolTable};
use crate::tree::TreeNode;
use std::path::Path;

/// Test that every top-level declaration kind is lowered in source order
#[test]
pub fn test_declaration_kinds() {
    let file = parse(MIXED_DECLARATIONS);
    let TreeNode::File { package, decls, .. } = &file else {
        panic!("expected a file node");
    };

    assert_eq!(package.as_ref(), &TreeNode::ident("services"));
    assert_eq!(file.package_name(), Some("services"));

    let summary: Vec<String> = decls
        .iter()
        .map(|decl| match decl {
            TreeNode::GenericDeclaration { keyword, .. } => keyword.clone(),
            TreeNode::RoutineDeclaration { name, .. } => match name.as_ref() {
                TreeNode::Identifier { name } => format!("func {}", name),
                other => panic!("routine name should be an identifier, got {}", other.kind_name()),
            },
            other => other.kind_name().to_string(),
        })
        .collect();

    assert_eq!(
        summary,
        vec!["import", "var", "const", "type", "func NewUserService", "func Find", "type"]
    );
}

#[test]
pub fn test_import_specs() {
    let file = parse(USER_MODEL);
    let TreeNode::File { decls, .. } = &file else {
        panic!("expected a file node");
    };

    let TreeNode::GenericDeclaration { keyword, specs, .. } = &decls[0] else {
        panic!("expected the import declaration first");
    };
    assert_eq!(keyword, "import");

    let paths: Vec<&TreeNode> = specs
        .iter()
        .map(|spec| match spec {
            TreeNode::ImportSpecification { path, .. } => path.as_ref(),
            other => panic!("expected an import spec, got {}", other.kind_name()),
        })
        .collect();
    assert_eq!(
        paths,
        vec![
            &TreeNode::literal("\"time\""),
            &TreeNode::literal("\"github.com/google/uuid\""),
        ]
    );
}

#[test]
pub fn test_named_import() {
    let file = parse("package services\n\nimport db \"github.com/acme/store\"\n");
    let TreeNode::File { decls, .. } = &file else {
        panic!("expected a file node");
    };
    let TreeNode::GenericDeclaration { specs, .. } = &decls[0] else {
        panic!("expected an import declaration");
    };

    match &specs[0] {
        TreeNode::ImportSpecification { name, .. } => {
            assert_eq!(name.as_deref(), Some(&TreeNode::ident("db")));
        }
        other => panic!("expected an import spec, got {}", other.kind_name()),
    }
}

/// Test symbol collection straight from source: types, functions and methods
#[test]
pub fn test_symbols_from_source() {
    let file = parse(MIXED_DECLARATIONS);
    let symbols = project_file::<SymbolTable>(&file).unwrap();

    assert_eq!(
        symbols.iter().collect::<Vec<_>>(),
        vec!["Find", "NewUserService", "Repository", "UserService"]
    );
    assert!(!symbols.contains("ErrNotFound"), "var declarations are not symbols");
}

#[test]
pub fn test_syntax_error_reported_with_line() {
    let mut parser = GoParser::new().expect("Failed to create parser");
    let err = parser
        .parse_source(BROKEN_SYNTAX, Path::new("broken.go"))
        .unwrap_err();

    match err {
        ParseError::Syntax { path, line } => {
            assert_eq!(path, Path::new("broken.go"));
            assert!(line >= 4, "error should be reported inside the struct, got line {}", line);
        }
        other => panic!("expected a syntax error, got {:?}", other),
    }
}

#[test]
pub fn test_missing_package_clause() {
    let mut parser = GoParser::new().expect("Failed to create parser");
    let err = parser
        .parse_source("type Orphan struct{}\n", Path::new("orphan.go"))
        .unwrap_err();
    assert!(matches!(err, ParseError::MissingPackage { .. }), "got {:?}", err);
}

#[test]
pub fn test_parse_file_reports_io_errors() {
    let mut parser = GoParser::new().expect("Failed to create parser");
    let err = parser.parse_file(Path::new("/nonexistent/models/user.go")).unwrap_err();
    assert!(matches!(err, ParseError::Io { .. }));
}
