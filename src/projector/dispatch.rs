use crate::tree::{ChanDir, TreeNode};

use super::value::{ProjectionError, Value};

/// Per-kind accumulation rules layered on the shared walk.
///
/// The walk resolves children and hands their values to these hooks; an
/// implementor decides what to keep. The implementor is also the accumulator
/// and is passed explicitly through the recursion.
pub trait Projection: Default {
    /// Whether routine declarations contribute to this projection. When false
    /// the walk does not descend into them.
    const VISITS_ROUTINES: bool;

    fn type_spec(&mut self, name: String, underlying: Value);

    fn routine(&mut self, _name: String) {}

    fn field_list(&self, fields: Vec<Value>) -> Result<Value, ProjectionError>;

    fn field(
        &self,
        names: Vec<Value>,
        type_value: Value,
        tag: Option<Value>,
    ) -> Result<Value, ProjectionError>;

    /// Fold another accumulator into this one. Entries from `other` win.
    fn absorb(&mut self, other: Self);
}

/// Walk `node` and resolve it to a value, accumulating into `acc`.
///
/// An absent node resolves to `Value::Absent` without recursing. Kinds the
/// walk does not know resolve to `Value::Absent` too, so new syntax in the
/// input never aborts a walk on its own.
pub fn visit<P: Projection>(node: Option<&TreeNode>, acc: &mut P) -> Result<Value, ProjectionError> {
    let Some(node) = node else {
        return Ok(Value::Absent);
    };

    match node {
        TreeNode::PackageGroup { files, .. } => {
            for file in files {
                visit(Some(file), acc)?;
            }
            Ok(Value::Absent)
        }
        TreeNode::File {
            doc,
            package,
            decls,
            ..
        } => {
            visit(doc.as_deref(), acc)?;
            visit(Some(package), acc)?;
            for decl in decls {
                visit(Some(decl), acc)?;
            }
            Ok(Value::Absent)
        }
        TreeNode::GenericDeclaration { doc, specs, .. } => {
            visit(doc.as_deref(), acc)?;
            for spec in specs {
                visit(Some(spec), acc)?;
            }
            Ok(Value::Absent)
        }
        TreeNode::ImportSpecification {
            doc,
            name,
            path,
            comment,
        } => {
            visit(doc.as_deref(), acc)?;
            visit(name.as_deref(), acc)?;
            visit(Some(path), acc)?;
            visit(comment.as_deref(), acc)?;
            Ok(Value::Absent)
        }
        TreeNode::TypeSpecification {
            doc,
            name,
            type_expr,
            comment,
            ..
        } => {
            visit(doc.as_deref(), acc)?;
            let name = visit(Some(name), acc)?.into_text("type name")?;
            let underlying = visit(Some(type_expr), acc)?;
            acc.type_spec(name, underlying);
            visit(comment.as_deref(), acc)?;
            Ok(Value::Absent)
        }
        TreeNode::RoutineDeclaration { doc, name } => {
            if P::VISITS_ROUTINES {
                visit(doc.as_deref(), acc)?;
                let name = visit(Some(name), acc)?.into_text("routine name")?;
                acc.routine(name);
            }
            Ok(Value::Absent)
        }
        TreeNode::StructLikeType { fields } => visit(Some(fields), acc),
        TreeNode::FieldList { fields } => {
            let mut values = Vec::with_capacity(fields.len());
            for field in fields {
                values.push(visit(Some(field), acc)?);
            }
            acc.field_list(values)
        }
        TreeNode::Field {
            doc,
            names,
            type_expr,
            tag,
            comment,
        } => {
            visit(doc.as_deref(), acc)?;
            let mut name_values = Vec::with_capacity(names.len());
            for name in names {
                name_values.push(visit(Some(name), acc)?);
            }
            let type_value = visit(Some(type_expr), acc)?;
            let tag_value = match tag {
                Some(tag) => Some(visit(Some(tag), acc)?),
                None => None,
            };
            visit(comment.as_deref(), acc)?;
            acc.field(name_values, type_value, tag_value)
        }
        TreeNode::Identifier { name } => Ok(Value::Text(name.clone())),
        TreeNode::Literal { value } => Ok(Value::Text(value.clone())),
        TreeNode::QualifiedIdentifier { base, selector } => {
            let base = visit(Some(base), acc)?.into_text("qualified reference base")?;
            let selector = visit(Some(selector), acc)?.into_text("qualified reference selector")?;
            Ok(Value::Text(format!("{}.{}", base, selector)))
        }
        TreeNode::CommentGroup { .. } => Ok(Value::Absent),
        TreeNode::PointerType { elem } => {
            let elem = visit(Some(elem), acc)?;
            Ok(render(vec![elem], |p| format!("*{}", p[0])))
        }
        TreeNode::SliceType { elem } => {
            let elem = visit(Some(elem), acc)?;
            Ok(render(vec![elem], |p| format!("[]{}", p[0])))
        }
        TreeNode::ArrayType { len, elem } => {
            let len = visit(Some(len), acc)?;
            let elem = visit(Some(elem), acc)?;
            Ok(render(vec![len, elem], |p| format!("[{}]{}", p[0], p[1])))
        }
        TreeNode::MapType { key, value } => {
            let key = visit(Some(key), acc)?;
            let value = visit(Some(value), acc)?;
            Ok(render(vec![key, value], |p| format!("map[{}]{}", p[0], p[1])))
        }
        TreeNode::ChannelType { dir, value } => {
            let value = visit(Some(value), acc)?;
            let prefix = match dir {
                ChanDir::Both => "chan ",
                ChanDir::Send => "chan<- ",
                ChanDir::Recv => "<-chan ",
            };
            Ok(render(vec![value], |p| format!("{}{}", prefix, p[0])))
        }
        TreeNode::EllipsisType { elem } => {
            let elem = visit(Some(elem), acc)?;
            Ok(render(vec![elem], |p| format!("...{}", p[0])))
        }
        TreeNode::GenericInstance { base, args } => {
            let mut parts = vec![visit(Some(base), acc)?];
            for arg in args {
                parts.push(visit(Some(arg), acc)?);
            }
            if args.is_empty() {
                return Ok(Value::Absent);
            }
            Ok(render(parts, |p| format!("{}[{}]", p[0], p[1..].join(", "))))
        }
        TreeNode::ParenthesizedType { inner } => {
            let inner = visit(Some(inner), acc)?;
            Ok(render(vec![inner], |p| format!("({})", p[0])))
        }
        TreeNode::InterfaceType { members } => {
            for member in members {
                visit(Some(member), acc)?;
            }
            if members.is_empty() {
                Ok(Value::Text("interface{}".to_string()))
            } else {
                Ok(Value::Absent)
            }
        }
        TreeNode::Unknown { .. } => Ok(Value::Absent),
    }
}

/// Build the text of a composite type expression. An empty struct literal
/// spells as `struct{}`; any other non-text part makes the whole expression
/// unrenderable.
fn render(parts: Vec<Value>, spell: impl FnOnce(&[String]) -> String) -> Value {
    let mut texts = Vec::with_capacity(parts.len());
    for part in parts {
        match part {
            Value::Text(text) => texts.push(text),
            Value::RecordShape(record) if record.fields.is_empty() => texts.push("struct{}".to_string()),
            _ => return Value::Absent,
        }
    }
    Value::Text(spell(&texts))
}

/// Walk one file with a fresh accumulator.
pub fn project_file<P: Projection>(file: &TreeNode) -> Result<P, ProjectionError> {
    let mut acc = P::default();
    visit(Some(file), &mut acc)?;
    Ok(acc)
}
