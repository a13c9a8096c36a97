use super::*;
use crate::declaration::Declaration;
use crate::flags::SymbolFlags;
use tsg_common::SourceLocation;

fn property(graph: &mut SymbolGraph, owner: SymbolId, name: &str, ty: SymbolId) -> SymbolId {
    let member = graph.create_symbol(name, SymbolKind::PROPERTY);
    graph.set_type(member, ty);
    graph.add_member(owner, member, false);
    member
}

#[test]
fn test_find_member_own_then_parent() {
    let mut graph = SymbolGraph::new();
    let number = graph.well_known().number;
    let base = graph.create_type("Base", SymbolKind::INTERFACE);
    let derived = graph.create_type("Derived", SymbolKind::INTERFACE);
    graph.add_extended_type(derived, base);
    let inherited = property(&mut graph, base, "x", number);
    let own = property(&mut graph, derived, "y", number);

    assert_eq!(graph.find_member(derived, "y", false), Some(own));
    assert_eq!(graph.find_member(derived, "x", false), None);
    assert_eq!(graph.find_member(derived, "x", true), Some(inherited));
}

#[test]
fn test_find_member_first_base_wins_depth_first() {
    let mut graph = SymbolGraph::new();
    let wk = *graph.well_known();
    let grand = graph.create_type("Grand", SymbolKind::INTERFACE);
    let left = graph.create_type("Left", SymbolKind::INTERFACE);
    let right = graph.create_type("Right", SymbolKind::INTERFACE);
    let leaf = graph.create_type("Leaf", SymbolKind::INTERFACE);
    graph.add_extended_type(left, grand);
    graph.add_extended_type(leaf, left);
    graph.add_extended_type(leaf, right);
    let from_grand = property(&mut graph, grand, "x", wk.number);
    property(&mut graph, right, "x", wk.string);

    assert_eq!(graph.find_member(leaf, "x", true), Some(from_grand));
}

#[test]
fn test_find_member_forwards_through_alias() {
    let mut graph = SymbolGraph::new();
    let number = graph.well_known().number;
    let target = graph.create_type("I", SymbolKind::INTERFACE);
    let x = property(&mut graph, target, "x", number);
    let alias = graph.create_alias_type("J", target);
    let alias_of_alias = graph.create_alias_type("K", alias);

    assert_eq!(graph.resolve_alias(alias_of_alias), target);
    assert_eq!(graph.find_member(alias_of_alias, "x", false), Some(x));
    assert_eq!(graph.members(alias).as_slice(), &[x]);
}

#[test]
#[should_panic(expected = "cannot hold member")]
fn test_alias_rejects_members() {
    let mut graph = SymbolGraph::new();
    let target = graph.create_type("I", SymbolKind::INTERFACE);
    let alias = graph.create_alias_type("J", target);
    let x = graph.create_symbol("x", SymbolKind::PROPERTY);
    graph.add_member(alias, x, false);
}

#[test]
fn test_find_member_falls_back_to_nested_type() {
    let mut graph = SymbolGraph::new();
    let module = graph.create_container_type("M", SymbolKind::CONTAINER);
    let nested = graph.create_class_type("C");
    graph.add_enclosed_type(module, nested);

    assert_eq!(graph.find_member(module, "C", false), Some(nested));
    assert_eq!(graph.find_nested_type(module, "C", SymbolKind::CLASS), Some(nested));
    assert_eq!(graph.find_nested_type(module, "C", SymbolKind::INTERFACE), None);
    assert_eq!(graph.container(nested), Some(module));
}

#[test]
fn test_find_member_through_export_assignment_chain() {
    let mut graph = SymbolGraph::new();
    let number = graph.well_known().number;
    let outer = graph.create_container_type("\"outer\"", SymbolKind::DYNAMIC_MODULE);
    let inner = graph.create_container_type("Inner", SymbolKind::CONTAINER);
    let x = property(&mut graph, inner, "x", number);
    graph.set_export_assignment(
        outer,
        ExportAssignment {
            container: Some(inner),
            ..ExportAssignment::default()
        },
    );
    // A cycle back to the outer module must not loop.
    graph.set_export_assignment(
        inner,
        ExportAssignment {
            container: Some(outer),
            ..ExportAssignment::default()
        },
    );

    assert_eq!(graph.find_member(outer, "x", false), Some(x));
    assert_eq!(graph.find_member(outer, "missing", false), None);
}

#[test]
fn test_get_all_members_dedups_by_name_and_hides_private() {
    let mut graph = SymbolGraph::new();
    let wk = *graph.well_known();
    let base = graph.create_class_type("Base");
    let derived = graph.create_class_type("Derived");
    graph.add_extended_type(derived, base);

    let base_x = property(&mut graph, base, "x", wk.number);
    let base_y = property(&mut graph, base, "y", wk.number);
    let own_x = property(&mut graph, derived, "x", wk.string);
    let secret = graph.create_symbol("secret", SymbolKind::PROPERTY);
    graph.add_member(derived, secret, true);
    let method = graph.create_symbol("run", SymbolKind::METHOD);
    graph.add_member(derived, method, false);

    let all = graph.get_all_members(derived, SymbolKind::empty(), false);
    assert_eq!(all, vec![own_x, method, base_y]);
    assert!(!all.contains(&base_x));

    let with_private = graph.get_all_members(derived, SymbolKind::empty(), true);
    assert!(with_private.contains(&secret));

    let methods = graph.get_all_members(derived, SymbolKind::METHOD, false);
    assert_eq!(methods, vec![method]);
}

#[test]
fn test_private_declaration_hides_member() {
    let mut graph = SymbolGraph::new();
    let number = graph.well_known().number;
    let class = graph.create_class_type("C");
    let x = property(&mut graph, class, "x", number);
    let decl = graph.declare(
        Declaration::new("x", SymbolKind::PROPERTY, SourceLocation::new("a.ts", 0, 1))
            .with_flags(DeclFlags::PRIVATE),
    );
    graph.add_declaration(x, decl);
    assert!(graph.is_private_member(x));
    assert!(graph.get_all_members(class, SymbolKind::empty(), false).is_empty());
}

#[test]
fn test_cyclic_hierarchy_terminates() {
    let mut graph = SymbolGraph::new();
    let number = graph.well_known().number;
    let a = graph.create_type("A", SymbolKind::INTERFACE);
    let b = graph.create_type("B", SymbolKind::INTERFACE);
    graph.add_extended_type(a, b);
    graph.add_extended_type(b, a);
    let x = property(&mut graph, b, "x", number);
    let call = graph.create_signature(SymbolKind::CALL_SIGNATURE);
    graph.add_call_signature(b, call);

    assert_eq!(graph.find_member(a, "x", true), Some(x));
    assert_eq!(graph.find_member(a, "nope", true), None);
    assert_eq!(graph.get_all_members(a, SymbolKind::empty(), false), vec![x]);
    // B derives from A, so A does not collect B's signatures.
    assert!(graph.call_signatures(a, true).is_empty());
    assert_eq!(graph.call_signatures(b, true), vec![call]);
}

#[test]
fn test_signatures_collect_from_bases() {
    let mut graph = SymbolGraph::new();
    let base = graph.create_type("Base", SymbolKind::INTERFACE);
    let derived = graph.create_type("Derived", SymbolKind::INTERFACE);
    graph.add_extended_type(derived, base);
    let base_call = graph.create_signature(SymbolKind::CALL_SIGNATURE);
    let own_call = graph.create_signature(SymbolKind::CALL_SIGNATURE);
    let construct = graph.create_signature(SymbolKind::CONSTRUCT_SIGNATURE);
    graph.add_call_signature(base, base_call);
    graph.add_call_signature(derived, own_call);
    graph.add_construct_signature(derived, construct);

    assert_eq!(graph.call_signatures(derived, false), vec![own_call]);
    assert_eq!(graph.call_signatures(derived, true), vec![own_call, base_call]);
    assert_eq!(graph.construct_signatures(derived, true), vec![construct]);

    graph.remove_signature(derived, own_call);
    assert_eq!(graph.call_signatures(derived, false), Vec::<SymbolId>::new());
}

#[test]
fn test_has_base() {
    let mut graph = SymbolGraph::new();
    let a = graph.create_class_type("A");
    let b = graph.create_class_type("B");
    let i = graph.create_type("I", SymbolKind::INTERFACE);
    let unrelated = graph.create_class_type("U");
    graph.add_extended_type(b, a);
    graph.add_implemented_type(a, i);

    assert!(graph.has_base(b, a));
    assert!(graph.has_base(b, i));
    assert!(graph.has_base(a, a));
    assert!(!graph.has_base(a, b));
    assert!(!graph.has_base(b, unrelated));
}

#[test]
fn test_accessor_type_from_getter_then_setter() {
    let mut graph = SymbolGraph::new();
    let wk = *graph.well_known();

    let getter_sig = graph.create_signature(SymbolKind::CALL_SIGNATURE);
    graph.set_return_type(getter_sig, wk.number);
    let getter_type = graph.create_type("", SymbolKind::FUNCTION_TYPE);
    graph.add_call_signature(getter_type, getter_sig);
    let getter = graph.create_symbol("get_x", SymbolKind::GET_ACCESSOR);
    graph.set_type(getter, getter_type);

    let value = graph.create_symbol("v", SymbolKind::PARAMETER);
    graph.set_type(value, wk.string);
    let setter_sig = graph.create_signature(SymbolKind::CALL_SIGNATURE);
    graph.add_parameter(setter_sig, value, SymbolFlags::empty());
    let setter_type = graph.create_type("", SymbolKind::FUNCTION_TYPE);
    graph.add_call_signature(setter_type, setter_sig);
    let setter = graph.create_symbol("set_x", SymbolKind::SET_ACCESSOR);
    graph.set_type(setter, setter_type);

    let write_only = graph.create_accessor("w");
    graph.set_setter(write_only, setter);
    assert_eq!(graph.accessor_type(write_only), Some(wk.string));

    let both = graph.create_accessor("x");
    graph.set_setter(both, setter);
    graph.set_getter(both, getter);
    assert_eq!(graph.accessor_type(both), Some(wk.number));
    assert_eq!(graph.member_type(both), Some(wk.number));
}

#[test]
fn test_class_and_container_slots() {
    let mut graph = SymbolGraph::new();
    let class = graph.create_class_type("C");
    let ctor = graph.create_symbol("constructor", SymbolKind::CONSTRUCTOR_METHOD);
    graph.set_constructor_method(class, ctor);
    graph.set_has_default_constructor(class, true);
    assert_eq!(graph.constructor_method(class), Some(ctor));
    assert!(graph.has_default_constructor(class));

    let module = graph.create_container_type("M", SymbolKind::CONTAINER);
    let instance = graph.create_symbol("M", SymbolKind::VARIABLE);
    graph.set_instance_symbol(module, instance);
    assert_eq!(graph.instance_symbol(module), Some(instance));

    let instance_type = graph.create_type("", SymbolKind::OBJECT_TYPE);
    graph.set_associated_container(instance_type, module);
    assert_eq!(graph.associated_container(instance_type), Some(module));
}

#[test]
fn test_lookup_is_scoped_to_the_owning_container() {
    // module P { module A { y } module B { x } }
    let mut graph = SymbolGraph::new();
    let number = graph.well_known().number;
    let parent = graph.create_container_type("P", SymbolKind::CONTAINER);
    let a = graph.create_container_type("A", SymbolKind::CONTAINER);
    let b = graph.create_container_type("B", SymbolKind::CONTAINER);
    graph.add_enclosed_type(parent, a);
    graph.add_enclosed_type(parent, b);
    let y = property(&mut graph, a, "y", number);
    let x = property(&mut graph, b, "x", number);

    for look_in_parent in [false, true] {
        assert_eq!(graph.find_member(a, "x", look_in_parent), None);
        assert_eq!(graph.find_member(b, "y", look_in_parent), None);
        assert_eq!(graph.find_member(parent, "x", look_in_parent), None);
        assert_eq!(graph.find_member(a, "y", look_in_parent), Some(y));
        assert_eq!(graph.find_member(b, "x", look_in_parent), Some(x));
    }
    assert_eq!(graph.container(x), Some(b));
    assert_eq!(graph.find_member(parent, "A", false), Some(a));

    graph.remove_member(b, x);
    assert_eq!(graph.find_member(b, "x", true), None);
    assert_eq!(graph.find_member(a, "y", true), Some(y));
    assert_eq!(graph.container(x), None);
}
