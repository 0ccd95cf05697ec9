use crate::{AttrValue, MatchContext, Matcher, Missing, NameTable, NodeId, Tree, TypeId, Value};

struct Fixture {
    names: NameTable,
    tree: Tree,
    program: NodeId,
    call: NodeId,
    callee: NodeId,
    arg: NodeId,
}

/// `Program { CallExpression { callee: Identifier(name = "foo"), Literal(value = 1) } }`
fn fixture() -> Fixture {
    let mut names = NameTable::with_names(
        ["Program", "CallExpression", "Identifier", "Literal"],
        ["callee", "name", "value"],
    );
    let ty = |name: &str| names.element(name).unwrap();
    let mut tree = Tree::new();
    let program = tree.add_root(ty("Program"));
    let call = tree.add_child(program, ty("CallExpression"));
    let callee = tree.add_field(call, names.attr("callee").unwrap(), ty("Identifier"));
    let arg = tree.add_child(call, ty("Literal"));
    tree.set_attr(callee, names.intern_attr("name"), "foo");
    tree.set_attr(arg, names.intern_attr("value"), 1);
    Fixture {
        names,
        tree,
        program,
        call,
        callee,
        arg,
    }
}

#[test]
fn navigation() {
    let f = fixture();
    assert_eq!(f.tree.parent(f.call), f.program);
    assert_eq!(f.tree.parent(f.program), NodeId::NONE);
    assert_eq!(f.tree.siblings(f.callee), &[f.callee, f.arg]);
    assert_eq!(f.tree.siblings(f.program), &[f.program]);
    assert_eq!(f.tree.first_child(f.call), f.callee);
    assert_eq!(f.tree.last_child(f.call), f.arg);
    assert_eq!(f.tree.first_child(f.arg), NodeId::NONE);
}

#[test]
fn invalid_ids_are_total() {
    let f = fixture();
    let bogus = NodeId::new(1000);
    assert!(f.tree.node_type(bogus).is_none());
    assert!(f.tree.parent(bogus).is_none());
    assert!(f.tree.siblings(bogus).is_empty());
    assert!(f.tree.siblings(NodeId::NONE).is_empty());
}

#[test]
fn fields() {
    let f = fixture();
    let callee = f.names.attr("callee").unwrap();
    assert_eq!(f.tree.field(f.call, callee), f.callee);
    assert_eq!(f.tree.field(f.program, callee), NodeId::NONE);
}

#[test]
fn attr_paths_descend_through_fields() {
    let f = fixture();
    let path = [f.names.attr("callee").unwrap(), f.names.attr("name").unwrap()];
    assert_eq!(f.tree.attr_path_value(f.call, &path, 0), Ok(Value::Str("foo")));
    assert_eq!(f.tree.attr_path_value(f.callee, &path, 1), Ok(Value::Str("foo")));
}

#[test]
fn attr_paths_report_missing_segment() {
    let f = fixture();
    let name = f.names.attr("name").unwrap();
    let value = f.names.attr("value").unwrap();
    assert_eq!(
        f.tree.attr_path_value(f.call, &[name], 0),
        Err(Missing { segment: 0 })
    );
    // `value` holds a number, so it cannot be descended into.
    assert_eq!(
        f.tree.attr_path_value(f.arg, &[value, name], 0),
        Err(Missing { segment: 1 })
    );
    assert_eq!(
        f.tree.attr_path_value(f.arg, &[], 0),
        Err(Missing { segment: 0 })
    );
}

#[test]
fn set_attr_overwrites() {
    let mut f = fixture();
    let value = f.names.attr("value").unwrap();
    f.tree.set_attr(f.arg, value, "two");
    assert_eq!(f.tree.attr(f.arg, value), Some(&AttrValue::Str("two".into())));
}

#[test]
fn sub_select_skips_the_root_itself() {
    let f = fixture();
    let call_type = f.names.element("CallExpression").unwrap();
    let is_call = Matcher::new(move |ctx, id| ctx.node_type(id) == call_type);
    let matchers = [is_call];
    assert!(f.tree.sub_select(&matchers, f.program));
    assert!(!f.tree.sub_select(&matchers, f.call));
}

#[test]
fn walk_is_preorder() {
    let f = fixture();
    let order: Vec<NodeId> = f.tree.walk().collect();
    assert_eq!(order, vec![f.program, f.call, f.callee, f.arg]);
}

#[test]
#[should_panic(expected = "not found")]
fn adding_to_unknown_parent_panics() {
    let mut tree = Tree::new();
    tree.add_child(NodeId::new(7), TypeId::new(1));
}
