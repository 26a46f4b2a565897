use serde::{Deserialize, Serialize};

/// Direction of a channel type expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// Parsed declaration tree handed to the projectors.
///
/// Every syntax kind the projectors understand has its own variant; anything
/// else the parser produces is carried as `Unknown` so the walk can skip it.
/// Children are boxed nodes rather than concrete structs because the walk
/// resolves them through the dispatcher and checks the resulting value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    PackageGroup {
        name: String,
        files: Vec<TreeNode>,
    },
    File {
        #[serde(default)]
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        doc: Option<Box<TreeNode>>,
        package: Box<TreeNode>,
        #[serde(default)]
        decls: Vec<TreeNode>,
    },
    GenericDeclaration {
        keyword: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        doc: Option<Box<TreeNode>>,
        #[serde(default)]
        specs: Vec<TreeNode>,
    },
    ImportSpecification {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        doc: Option<Box<TreeNode>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<Box<TreeNode>>,
        path: Box<TreeNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        comment: Option<Box<TreeNode>>,
    },
    TypeSpecification {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        doc: Option<Box<TreeNode>>,
        name: Box<TreeNode>,
        #[serde(default)]
        alias: bool,
        #[serde(rename = "type")]
        type_expr: Box<TreeNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        comment: Option<Box<TreeNode>>,
    },
    /// Function or method declaration.
    RoutineDeclaration {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        doc: Option<Box<TreeNode>>,
        name: Box<TreeNode>,
    },
    StructLikeType {
        fields: Box<TreeNode>,
    },
    FieldList {
        #[serde(default)]
        fields: Vec<TreeNode>,
    },
    Field {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        doc: Option<Box<TreeNode>>,
        #[serde(default)]
        names: Vec<TreeNode>,
        #[serde(rename = "type")]
        type_expr: Box<TreeNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tag: Option<Box<TreeNode>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        comment: Option<Box<TreeNode>>,
    },
    Identifier {
        name: String,
    },
    /// Literal token, spelled exactly as in the source (quotes included).
    Literal {
        value: String,
    },
    /// Dotted `base.selector` reference.
    QualifiedIdentifier {
        base: Box<TreeNode>,
        selector: Box<TreeNode>,
    },
    CommentGroup {
        lines: Vec<String>,
    },
    PointerType {
        elem: Box<TreeNode>,
    },
    SliceType {
        elem: Box<TreeNode>,
    },
    ArrayType {
        len: Box<TreeNode>,
        elem: Box<TreeNode>,
    },
    MapType {
        key: Box<TreeNode>,
        value: Box<TreeNode>,
    },
    ChannelType {
        dir: ChanDir,
        value: Box<TreeNode>,
    },
    EllipsisType {
        elem: Box<TreeNode>,
    },
    GenericInstance {
        base: Box<TreeNode>,
        args: Vec<TreeNode>,
    },
    ParenthesizedType {
        inner: Box<TreeNode>,
    },
    InterfaceType {
        #[serde(default)]
        members: Vec<TreeNode>,
    },
    Unknown {
        #[serde(rename = "syntax")]
        kind: String,
    },
}

impl TreeNode {
    pub fn ident(name: impl Into<String>) -> Self {
        TreeNode::Identifier { name: name.into() }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        TreeNode::Literal { value: value.into() }
    }

    pub fn qualified(base: impl Into<String>, selector: impl Into<String>) -> Self {
        TreeNode::QualifiedIdentifier {
            base: Box::new(TreeNode::ident(base)),
            selector: Box::new(TreeNode::ident(selector)),
        }
    }

    pub fn unknown(kind: impl Into<String>) -> Self {
        TreeNode::Unknown { kind: kind.into() }
    }

    /// `name struct { fields... }` wrapped in a `type` declaration.
    pub fn struct_decl(name: impl Into<String>, fields: Vec<TreeNode>) -> Self {
        TreeNode::GenericDeclaration {
            keyword: "type".to_string(),
            doc: None,
            specs: vec![TreeNode::TypeSpecification {
                doc: None,
                name: Box::new(TreeNode::ident(name)),
                alias: false,
                type_expr: Box::new(TreeNode::StructLikeType {
                    fields: Box::new(TreeNode::FieldList { fields }),
                }),
                comment: None,
            }],
        }
    }

    pub fn field(names: &[&str], type_expr: TreeNode, tag: Option<&str>) -> Self {
        TreeNode::Field {
            doc: None,
            names: names.iter().map(|n| TreeNode::ident(*n)).collect(),
            type_expr: Box::new(type_expr),
            tag: tag.map(|t| Box::new(TreeNode::literal(t))),
            comment: None,
        }
    }

    pub fn routine(name: impl Into<String>) -> Self {
        TreeNode::RoutineDeclaration {
            doc: None,
            name: Box::new(TreeNode::ident(name)),
        }
    }

    pub fn file(path: impl Into<String>, package: impl Into<String>, decls: Vec<TreeNode>) -> Self {
        TreeNode::File {
            path: path.into(),
            doc: None,
            package: Box::new(TreeNode::ident(package)),
            decls,
        }
    }

    /// Short kind name used in diagnostics.
    pub fn kind_name(&self) -> &str {
        match self {
            TreeNode::PackageGroup { .. } => "package_group",
            TreeNode::File { .. } => "file",
            TreeNode::GenericDeclaration { .. } => "generic_declaration",
            TreeNode::ImportSpecification { .. } => "import_specification",
            TreeNode::TypeSpecification { .. } => "type_specification",
            TreeNode::RoutineDeclaration { .. } => "routine_declaration",
            TreeNode::StructLikeType { .. } => "struct_like_type",
            TreeNode::FieldList { .. } => "field_list",
            TreeNode::Field { .. } => "field",
            TreeNode::Identifier { .. } => "identifier",
            TreeNode::Literal { .. } => "literal",
            TreeNode::QualifiedIdentifier { .. } => "qualified_identifier",
            TreeNode::CommentGroup { .. } => "comment_group",
            TreeNode::PointerType { .. } => "pointer_type",
            TreeNode::SliceType { .. } => "slice_type",
            TreeNode::ArrayType { .. } => "array_type",
            TreeNode::MapType { .. } => "map_type",
            TreeNode::ChannelType { .. } => "channel_type",
            TreeNode::EllipsisType { .. } => "ellipsis_type",
            TreeNode::GenericInstance { .. } => "generic_instance",
            TreeNode::ParenthesizedType { .. } => "parenthesized_type",
            TreeNode::InterfaceType { .. } => "interface_type",
            TreeNode::Unknown { kind } => kind,
        }
    }

    /// Files contained in this node: the group's files, the node itself for a
    /// file, nothing otherwise.
    pub fn files(&self) -> Vec<&TreeNode> {
        match self {
            TreeNode::PackageGroup { files, .. } => files.iter().collect(),
            TreeNode::File { .. } => vec![self],
            _ => Vec::new(),
        }
    }

    /// Package name of a file node.
    pub fn package_name(&self) -> Option<&str> {
        match self {
            TreeNode::File { package, .. } => match package.as_ref() {
                TreeNode::Identifier { name } => Some(name),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn file_path(&self) -> Option<&str> {
        match self {
            TreeNode::File { path, .. } => Some(path),
            _ => None,
        }
    }
}
