use super::*;
use crate::declaration::Declaration;
use crate::symbol::ExportAssignment;
use tsg_common::SourceLocation;

fn declare(graph: &mut SymbolGraph, symbol: SymbolId, flags: DeclFlags) {
    let name = graph.name(symbol).to_string();
    let kind = graph.kind(symbol);
    let decl = graph.declare(
        Declaration::new(name, kind, SourceLocation::new("m.ts", 0, 1)).with_flags(flags),
    );
    graph.add_declaration(symbol, decl);
}

#[test]
fn test_primitives_and_top_level_are_visible() {
    let mut graph = SymbolGraph::new();
    let number = graph.well_known().number;
    assert!(graph.is_externally_visible(number));

    let top = graph.create_class_type("Top");
    declare(&mut graph, top, DeclFlags::empty());
    assert!(graph.is_externally_visible(top));
}

#[test]
fn test_private_member_is_never_visible() {
    let mut graph = SymbolGraph::new();
    let class = graph.create_class_type("C");
    declare(&mut graph, class, DeclFlags::EXPORTED);
    let secret = graph.create_symbol("secret", SymbolKind::PROPERTY);
    graph.add_member(class, secret, true);
    let open = graph.create_symbol("open", SymbolKind::PROPERTY);
    graph.add_member(class, open, false);

    assert!(!graph.is_externally_visible(secret));
    assert!(graph.is_externally_visible(open));
}

#[test]
fn test_unexported_member_of_module_is_not_visible() {
    let mut graph = SymbolGraph::new();
    let module = graph.create_container_type("M", SymbolKind::CONTAINER);
    declare(&mut graph, module, DeclFlags::EXPORTED);

    let hidden = graph.create_symbol("hidden", SymbolKind::VARIABLE);
    declare(&mut graph, hidden, DeclFlags::empty());
    graph.add_member(module, hidden, false);

    let shown = graph.create_symbol("shown", SymbolKind::VARIABLE);
    declare(&mut graph, shown, DeclFlags::EXPORTED);
    graph.add_member(module, shown, false);

    assert!(!graph.is_externally_visible(hidden));
    assert!(graph.is_externally_visible(shown));
}

#[test]
fn test_exported_member_of_hidden_module_is_not_visible() {
    let mut graph = SymbolGraph::new();
    let outer = graph.create_container_type("Outer", SymbolKind::CONTAINER);
    let inner = graph.create_container_type("Inner", SymbolKind::CONTAINER);
    declare(&mut graph, inner, DeclFlags::empty());
    graph.add_enclosed_type(outer, inner);

    let member = graph.create_symbol("x", SymbolKind::VARIABLE);
    declare(&mut graph, member, DeclFlags::EXPORTED);
    graph.add_member(inner, member, false);

    assert!(!graph.is_externally_visible(member));
}

#[test]
fn test_member_reachable_through_export_assignment_chain() {
    let mut graph = SymbolGraph::new();
    let module = graph.create_container_type("\"lib\"", SymbolKind::DYNAMIC_MODULE);
    declare(&mut graph, module, DeclFlags::EXPORTED);
    let reexported = graph.create_container_type("N", SymbolKind::CONTAINER);
    declare(&mut graph, reexported, DeclFlags::empty());
    graph.add_enclosed_type(module, reexported);

    let target = graph.create_symbol("impl", SymbolKind::FUNCTION);
    declare(&mut graph, target, DeclFlags::empty());
    graph.add_member(module, target, false);

    let other = graph.create_symbol("other", SymbolKind::FUNCTION);
    declare(&mut graph, other, DeclFlags::empty());
    graph.add_member(module, other, false);

    graph.set_export_assignment(
        module,
        ExportAssignment {
            container: Some(reexported),
            ..ExportAssignment::default()
        },
    );
    graph.set_export_assignment(
        reexported,
        ExportAssignment {
            value: Some(target),
            // Cycle back to the module is cut by the walk latch.
            container: Some(module),
            ..ExportAssignment::default()
        },
    );

    assert!(graph.is_used_in_export_assignment(module, target));
    assert!(graph.is_externally_visible(target));
    assert!(!graph.is_externally_visible(other));
}

#[test]
fn test_type_defers_to_associated_container() {
    let mut graph = SymbolGraph::new();
    let outer = graph.create_container_type("Outer", SymbolKind::CONTAINER);
    let module = graph.create_container_type("M", SymbolKind::CONTAINER);
    declare(&mut graph, module, DeclFlags::empty());
    graph.add_enclosed_type(outer, module);

    let instance_type = graph.create_type("", SymbolKind::OBJECT_TYPE);
    graph.set_associated_container(instance_type, module);
    assert!(!graph.is_externally_visible(instance_type));
}

#[test]
fn test_clone_visibility_requires_visible_arguments() {
    let mut graph = SymbolGraph::new();
    let number = graph.well_known().number;
    let module = graph.create_container_type("M", SymbolKind::CONTAINER);
    let hidden = graph.create_class_type("Hidden");
    declare(&mut graph, hidden, DeclFlags::empty());
    graph.add_enclosed_type(module, hidden);

    let root = graph.create_type("Box", SymbolKind::INTERFACE);
    let t = graph.create_type_parameter("T");
    graph.add_type_parameter(root, t);

    let visible_clone = graph.create_type("Box", SymbolKind::INTERFACE);
    graph.set_root(visible_clone, root);
    graph.set_type_arguments(visible_clone, &[number]);

    let hidden_clone = graph.create_type("Box", SymbolKind::INTERFACE);
    graph.set_root(hidden_clone, root);
    graph.set_type_arguments(hidden_clone, &[hidden]);

    assert!(graph.is_externally_visible(visible_clone));
    assert!(!graph.is_externally_visible(hidden_clone));
}
