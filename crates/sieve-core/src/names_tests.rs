use crate::{AttrId, NameTable, TypeId};

#[test]
fn ids_start_at_one() {
    let mut names = NameTable::new();
    assert_eq!(names.intern_element("Program"), TypeId::new(1));
    assert_eq!(names.intern_element("Identifier"), TypeId::new(2));
    assert_eq!(names.intern_attr("name"), AttrId::new(1));
}

#[test]
fn interning_is_idempotent() {
    let mut names = NameTable::new();
    let first = names.intern_element("CallExpression");
    let second = names.intern_element("CallExpression");
    assert_eq!(first, second);
    assert_eq!(names.element_count(), 1);
}

#[test]
fn elements_and_attrs_are_separate_namespaces() {
    let names = NameTable::with_names(["value"], ["value", "callee"]);
    assert_eq!(names.element("value"), Some(TypeId::new(1)));
    assert_eq!(names.attr("value"), Some(AttrId::new(1)));
    assert_eq!(names.attr("callee"), Some(AttrId::new(2)));
    assert_eq!(names.element("callee"), None);
}

#[test]
fn reverse_lookup() {
    let names = NameTable::with_names(["Foo", "Bar"], ["attr"]);
    assert_eq!(names.element_name(TypeId::new(2)), Some("Bar"));
    assert_eq!(names.attr_name(AttrId::new(1)), Some("attr"));
    assert_eq!(names.element_name(TypeId::NONE), None);
    assert_eq!(names.element_name(TypeId::new(3)), None);
}
