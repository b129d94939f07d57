//! Tests for TypeNodeTree against schema-backed introspection

use rstest::{fixture, rstest};

use typetree::domain::{
    default_handlers, Declaration, Member, NodeHandler, NodeKind, ObjectHandler, TreeArena,
    TypeExpr, TypeNode, TypeNodeTree,
};
use typetree::util::testing::init_test_setup;
use typetree::{Introspect, SchemaContext};

const STORE: &str = r#"
root = "Store"

[types.Store]
members = [
    { name = "name", type = "string" },
    { name = "owner", type = "User | null" },
    { name = "items", type = "Item[]" },
    { name = "users", type = "Record<string, User>" },
    { name = "open", type = "boolean", kind = "accessor" },
    { name = "tags", type = "string[]" },
]

[types.User]
members = [
    { name = "id", type = "string" },
    { name = "address", type = "Address" },
]

[types.Address]
members = [
    { name = "street", type = "string" },
    { name = "zip", type = "number", optional = true },
]

[types.Item]
members = [
    { name = "sku", type = "string" },
    { name = "price", type = "number" },
    { name = "total", type = "number", kind = "method" },
]
"#;

#[fixture]
fn store() -> SchemaContext {
    init_test_setup();
    SchemaContext::parse(STORE, "store").expect("parse store schema")
}

fn shape(tree: &TreeArena<TypeNode>) -> Vec<(usize, String, NodeKind)> {
    tree.iter()
        .map(|(idx, node)| {
            let level = tree.path_to(idx).len() - 1;
            (level, node.data.name.clone(), node.data.kind.clone())
        })
        .collect()
}

fn entry(level: usize, name: &str, kind: NodeKind) -> (usize, String, NodeKind) {
    (level, name.to_string(), kind)
}

// ============================================================
// End-to-end decomposition
// ============================================================

#[test]
fn given_foo_with_record_field_when_building_then_matches_expected_tree() {
    init_test_setup();
    let ctx = SchemaContext::new()
        .with_struct(
            "Foo",
            vec![
                Member::new(Declaration::property("bar", TypeExpr::Reference("Baz".into()))),
                Member::new(Declaration::property("count", TypeExpr::Keyword("number".into()))),
            ],
        )
        .with_struct(
            "Baz",
            vec![Member::new(Declaration::property(
                "label",
                TypeExpr::Keyword("string".into()),
            ))],
        );

    let built = TypeNodeTree::new(TypeNode::root("Foo"), &ctx, vec![Box::new(ObjectHandler)])
        .expect("build tree");

    assert_eq!(
        shape(built.tree()),
        vec![
            entry(0, "Foo", NodeKind::Root),
            entry(1, "bar", NodeKind::Object),
            entry(2, "label", NodeKind::Terminal),
            entry(1, "count", NodeKind::Terminal),
        ]
    );
    let tree = built.tree();
    let bar = tree.children(tree.root())[0];
    let label = tree.value(tree.children(bar)[0]).unwrap();
    assert_eq!(label.owner.as_deref(), Some("Baz"));
}

#[rstest]
fn given_store_with_default_handlers_when_building_then_decomposes_all_shapes(store: SchemaContext) {
    let built = TypeNodeTree::new(TypeNode::root("Store"), &store, default_handlers()).unwrap();

    assert_eq!(
        shape(built.tree()),
        vec![
            entry(0, "Store", NodeKind::Root),
            entry(1, "name", NodeKind::Terminal),
            entry(1, "owner", NodeKind::Object),
            entry(2, "id", NodeKind::Terminal),
            entry(2, "address", NodeKind::Object),
            entry(3, "street", NodeKind::Terminal),
            entry(3, "zip", NodeKind::Terminal),
            entry(1, "items", NodeKind::Array),
            entry(2, "sku", NodeKind::Terminal),
            entry(2, "price", NodeKind::Terminal),
            entry(1, "users", NodeKind::Record),
            entry(2, "id", NodeKind::Terminal),
            entry(2, "address", NodeKind::Object),
            entry(3, "street", NodeKind::Terminal),
            entry(3, "zip", NodeKind::Terminal),
            entry(1, "tags", NodeKind::Terminal),
        ]
    );
}

// ============================================================
// Properties
// ============================================================

#[rstest]
fn given_same_input_when_building_twice_then_trees_are_identical(store: SchemaContext) {
    let first = TypeNodeTree::new(TypeNode::root("Store"), &store, default_handlers()).unwrap();
    let second = TypeNodeTree::new(TypeNode::root("Store"), &store, default_handlers()).unwrap();

    let values = |t: &TreeArena<TypeNode>| t.iter().map(|(_, n)| n.data.clone()).collect::<Vec<_>>();
    assert_eq!(values(first.tree()), values(second.tree()));
}

#[rstest]
fn given_store_when_building_then_children_follow_declaration_order(store: SchemaContext) {
    let built = TypeNodeTree::new(TypeNode::root("Store"), &store, default_handlers()).unwrap();
    let tree = built.tree();

    let names: Vec<_> = tree
        .children(tree.root())
        .iter()
        .filter_map(|&c| tree.value(c))
        .map(|n| n.name.as_str())
        .collect();

    // `open` is an accessor and is left out
    assert_eq!(names, vec!["name", "owner", "items", "users", "tags"]);
}

#[rstest]
fn given_no_handlers_when_building_then_every_field_is_terminal(store: SchemaContext) {
    let built = TypeNodeTree::new(TypeNode::root("Store"), &store, Vec::new()).unwrap();
    let tree = built.tree();

    assert_eq!(tree.depth(), 2);
    assert!(tree
        .iter()
        .skip(1)
        .all(|(_, n)| n.data.kind == NodeKind::Terminal));
}

#[rstest]
fn given_object_before_array_when_building_then_array_field_stays_terminal(store: SchemaContext) {
    // ObjectHandler does not recognize `Item[]`, so order only matters for overlapping shapes
    let handlers: Vec<Box<dyn NodeHandler>> = vec![Box::new(ObjectHandler)];
    let built = TypeNodeTree::new(TypeNode::root("Store"), &store, handlers).unwrap();
    let tree = built.tree();

    let items = tree
        .iter()
        .find(|(_, n)| n.data.name == "items")
        .map(|(_, n)| n.data.kind.clone());
    assert_eq!(items, Some(NodeKind::Terminal));
}

// ============================================================
// Union types
// ============================================================

#[test]
fn given_union_field_when_building_then_only_first_variant_is_decomposed() {
    init_test_setup();
    let ctx = SchemaContext::parse(
        r#"
[types.Drawing]
members = [{ name = "shape", type = "Shape" }]

[types.Shape]
union = ["Circle", "Square"]

[types.Circle]
members = [{ name = "radius", type = "number" }]

[types.Square]
members = [{ name = "side", type = "number" }]
"#,
        "drawing",
    )
    .unwrap();
    assert_eq!(ctx.type_symbols("Shape").len(), 2);

    let built = TypeNodeTree::new(TypeNode::root("Drawing"), &ctx, default_handlers()).unwrap();

    let names: Vec<_> = built
        .tree()
        .iter()
        .map(|(_, n)| n.data.name.clone())
        .collect();
    assert_eq!(names, vec!["Drawing", "shape", "radius"]);

    let radius = built
        .tree()
        .iter()
        .find(|(_, n)| n.data.name == "radius")
        .map(|(_, n)| n.data.clone())
        .unwrap();
    assert_eq!(radius.owner.as_deref(), Some("Circle"));
    let shape_field = built
        .tree()
        .iter()
        .find(|(_, n)| n.data.name == "shape")
        .map(|(_, n)| n.data.clone())
        .unwrap();
    assert_eq!(shape_field.owner.as_deref(), Some("Drawing"));
    assert_eq!(shape_field.target.as_deref(), Some("Shape"));
}

#[test]
fn given_unknown_root_when_building_then_tree_has_only_root() {
    let ctx = SchemaContext::new();
    let built = TypeNodeTree::new(TypeNode::root("Ghost"), &ctx, default_handlers()).unwrap();
    assert_eq!(built.tree().len(), 1);
    assert!(built.tree().leaves().contains(&built.tree().root()));
}
