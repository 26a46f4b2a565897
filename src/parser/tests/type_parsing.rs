use super::fixtures::*;
use super::{parse, struct_fields, type_specs};
use crate::projector::{project_file, RecordCatalog};
use crate::tree::{ChanDir, TreeNode};

/// Test lowering of a plain struct with tags and co-typed names
#[test]
pub fn test_struct_fields_keep_order_and_tags() {
    let file = parse(USER_MODEL);
    let specs = type_specs(&file);
    assert_eq!(specs.len(), 1);

    let fields = struct_fields(specs[0]);
    assert_eq!(fields.len(), 4, "FirstName, LastName should stay a single field");

    let catalog = project_file::<RecordCatalog>(&file).unwrap();
    let user = catalog.get("User").expect("Should find User record");

    let names: Vec<Vec<String>> = user.fields.iter().map(|f| f.names.clone()).collect();
    assert_eq!(
        names,
        vec![
            vec!["ID".to_string()],
            vec!["FirstName".to_string(), "LastName".to_string()],
            vec!["Email".to_string()],
            vec!["CreatedAt".to_string()],
        ]
    );
    assert_eq!(user.fields[0].type_name, "uuid.UUID");
    assert_eq!(user.fields[0].tag, r#"`json:"id" db:"id"`"#);
    assert_eq!(user.fields[0].tag_lookup("db"), Some("id"));
    assert_eq!(user.fields[1].type_name, "string");
    assert_eq!(user.fields[1].tag, "");
    assert_eq!(user.fields[3].type_name, "time.Time");
}

/// Test that composite type expressions are spelled the way they are written
#[test]
pub fn test_composite_field_types() {
    let file = parse(COMPOSITE_FIELDS);
    let catalog = project_file::<RecordCatalog>(&file).unwrap();
    let inventory = catalog.get("Inventory").expect("Should find Inventory record");

    let types: Vec<&str> = inventory.fields.iter().map(|f| f.type_name.as_str()).collect();
    assert_eq!(
        types,
        vec![
            "[]string",
            "map[string]int",
            "*User",
            "[32]byte",
            "<-chan Event",
            "chan<- Event",
            "interface{}",
            "Page[User]",
            "map[uuid.UUID][]*Order",
        ]
    );
}

#[test]
pub fn test_empty_struct_elements_in_composite_types() {
    let file = parse(EMPTY_STRUCT_ELEMENTS);
    let catalog = project_file::<RecordCatalog>(&file).expect("empty struct elements should not fail the file");

    assert!(catalog.contains("Role"));
    let membership = catalog.get("Membership").expect("Should find Membership record");
    let types: Vec<&str> = membership.fields.iter().map(|f| f.type_name.as_str()).collect();
    assert_eq!(types, vec!["int", "map[string]struct{}", "chan struct{}", "[]struct{}"]);
}

#[test]
pub fn test_channel_directions_lowered() {
    let file = parse(COMPOSITE_FIELDS);
    let fields = struct_fields(type_specs(&file)[0]);

    let dirs: Vec<ChanDir> = fields
        .iter()
        .filter_map(|field| match field {
            TreeNode::Field { type_expr, .. } => match type_expr.as_ref() {
                TreeNode::ChannelType { dir, .. } => Some(*dir),
                _ => None,
            },
            _ => None,
        })
        .collect();
    assert_eq!(dirs, vec![ChanDir::Recv, ChanDir::Send]);
}

/// Test embedded fields: no names, pointer embedding kept in the type
#[test]
pub fn test_embedded_fields() {
    let file = parse(EMBEDDED_FIELDS);
    let catalog = project_file::<RecordCatalog>(&file).unwrap();
    let audited = catalog.get("Audited").expect("Should find Audited record");

    assert_eq!(audited.fields.len(), 4);
    assert!(audited.fields[0].is_embedded());
    assert_eq!(audited.fields[0].type_name, "Base");
    assert_eq!(audited.fields[1].type_name, "*sync.Mutex");
    assert_eq!(audited.fields[2].type_name, "gorm.Model");
    assert_eq!(audited.fields[3].names, vec!["Note"]);
}

/// Test grouped declarations, aliases and empty structs
#[test]
pub fn test_grouped_type_declarations() {
    let file = parse(GROUPED_TYPES);
    let specs = type_specs(&file);
    assert_eq!(specs.len(), 4, "Order, Status, LineItem and Empty");

    let aliases: Vec<bool> = specs
        .iter()
        .map(|spec| matches!(spec, TreeNode::TypeSpecification { alias: true, .. }))
        .collect();
    assert_eq!(aliases, vec![false, false, true, false]);

    let catalog = project_file::<RecordCatalog>(&file).unwrap();
    assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["Empty", "LineItem", "Order"]);
    assert!(catalog.get("Empty").unwrap().fields.is_empty());
    assert_eq!(catalog.get("Order").unwrap().fields[1].type_name, "float64");
}

#[test]
pub fn test_unsupported_field_types_lower_to_unknown() {
    let file = parse(FUNC_FIELD);
    let fields = struct_fields(type_specs(&file)[0]);

    match &fields[0] {
        TreeNode::Field { type_expr, .. } => {
            assert_eq!(type_expr.as_ref(), &TreeNode::unknown("function_type"));
        }
        other => panic!("expected a field, got {}", other.kind_name()),
    }
}
