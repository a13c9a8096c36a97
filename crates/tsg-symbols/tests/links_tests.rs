use super::*;
use crate::flags::SymbolKind;

#[test]
fn test_connect_registers_both_ends() {
    let mut graph = SymbolGraph::new();
    let a = graph.create_type("A", SymbolKind::INTERFACE);
    let b = graph.create_type("B", SymbolKind::INTERFACE);
    let link = graph.connect(a, b, LinkKind::Extends);

    assert_eq!(graph.link(link).map(|l| (l.source, l.dest)), Some((a, b)));
    assert_eq!(graph.outgoing_targets(a, LinkKind::Extends).as_slice(), &[b]);
    assert_eq!(graph.incoming_sources(b, LinkKind::Extends).as_slice(), &[a]);
    assert!(graph.verify_link_pairs());
}

#[test]
fn test_disconnect_removes_both_ends_and_is_idempotent() {
    let mut graph = SymbolGraph::new();
    let a = graph.create_type("A", SymbolKind::INTERFACE);
    let b = graph.create_type("B", SymbolKind::INTERFACE);
    let link = graph.connect(a, b, LinkKind::Implements);

    graph.disconnect(link);
    assert!(graph.link(link).is_none());
    assert!(graph.outgoing_targets(a, LinkKind::Implements).is_empty());
    assert!(graph.incoming_sources(b, LinkKind::Implements).is_empty());

    graph.disconnect(link);
    graph.disconnect(LinkId(9999));
    assert!(graph.verify_link_pairs());
}

#[test]
fn test_disconnect_between_only_touches_matching_kind() {
    let mut graph = SymbolGraph::new();
    let a = graph.create_type("A", SymbolKind::CLASS);
    let b = graph.create_type("B", SymbolKind::INTERFACE);
    graph.connect(a, b, LinkKind::Extends);
    graph.connect(a, b, LinkKind::Implements);

    graph.disconnect_between(a, b, LinkKind::Extends);
    assert!(graph.outgoing_targets(a, LinkKind::Extends).is_empty());
    assert_eq!(graph.outgoing_targets(a, LinkKind::Implements).as_slice(), &[b]);
    assert!(graph.verify_link_pairs());
}

#[test]
fn test_outgoing_preserves_insertion_order() {
    let mut graph = SymbolGraph::new();
    let owner = graph.create_type("I", SymbolKind::INTERFACE);
    let names = ["c", "a", "b"];
    let members: Vec<_> = names
        .iter()
        .map(|n| graph.create_symbol(*n, SymbolKind::PROPERTY))
        .collect();
    for &m in &members {
        graph.add_member(owner, m, false);
    }
    assert_eq!(graph.members(owner).as_slice(), members.as_slice());
    let via_predicate: Vec<_> = graph
        .outgoing(owner, |l| l.kind == LinkKind::PublicMember)
        .filter_map(|id| graph.link(id).map(|l| l.dest))
        .collect();
    assert_eq!(via_predicate, members);
}

#[test]
#[should_panic(expected = "ContainedBy link")]
fn test_contained_by_requires_type_destination() {
    let mut graph = SymbolGraph::new();
    let x = graph.create_symbol("x", SymbolKind::VARIABLE);
    let y = graph.create_symbol("y", SymbolKind::VARIABLE);
    graph.connect(x, y, LinkKind::ContainedBy);
}

#[test]
fn test_member_link_changes_refresh_name_cache() {
    let mut graph = SymbolGraph::new();
    let owner = graph.create_type("I", SymbolKind::INTERFACE);
    let x = graph.create_symbol("x", SymbolKind::PROPERTY);
    graph.add_member(owner, x, false);
    assert_eq!(graph.find_member(owner, "x", false), Some(x));
    assert_eq!(graph.find_member(owner, "y", false), None);

    let y = graph.create_symbol("y", SymbolKind::PROPERTY);
    graph.add_member(owner, y, false);
    assert_eq!(graph.find_member(owner, "y", false), Some(y));

    graph.remove_member(owner, x);
    assert_eq!(graph.find_member(owner, "x", false), None);
    assert!(graph.verify_link_pairs());
}

#[test]
fn test_contained_member_cache_tracks_links_incrementally() {
    let mut graph = SymbolGraph::new();
    let module = graph.create_container_type("M", SymbolKind::CONTAINER);
    let f = graph.create_symbol("f", SymbolKind::FUNCTION);
    graph.add_member(module, f, false);
    assert_eq!(graph.find_contained_member(module, "f"), Some(f));

    let g = graph.create_symbol("g", SymbolKind::FUNCTION);
    graph.add_member(module, g, false);
    assert_eq!(graph.find_contained_member(module, "g"), Some(g));

    graph.remove_member(module, f);
    assert_eq!(graph.find_contained_member(module, "f"), None);
    assert_eq!(graph.contained_members(module), vec![g]);
}
