use tsg_checker::{CheckerOptions, CheckerSession, TypeFlags, TypeQuery};
use tsg_common::SourceLocation;
use tsg_symbols::{AstRef, Declaration, SymbolId, SymbolKind};

fn generic_interface(session: &mut CheckerSession, name: &str) -> (SymbolId, SymbolId) {
    let graph = session.graph_mut();
    let root = graph.create_type(name, SymbolKind::INTERFACE);
    let decl = graph.declare(Declaration::new(
        name,
        SymbolKind::INTERFACE,
        SourceLocation::new("a.ts", 5, 9),
    ));
    graph.add_declaration(root, decl);
    let t = graph.create_type_parameter("T");
    graph.add_type_parameter(root, t);
    let item = graph.create_symbol("item", SymbolKind::PROPERTY);
    graph.set_type(item, t);
    graph.add_member(root, item, false);
    (root, t)
}

#[test]
fn test_sessions_are_independent() {
    let mut first = CheckerSession::new();
    let mut second = CheckerSession::new();
    let (a, _) = generic_interface(&mut first, "A");
    let (b, _) = generic_interface(&mut second, "B");
    assert_eq!(a, b);

    let number = first.graph().well_known().number;
    first.specialize_type(a, Some(&[number]));
    assert_eq!(first.graph().specialization_count(a), 1);
    assert_eq!(second.graph().specialization_count(b), 0);

    // Type-variable ids come from a per-graph counter.
    let v1 = first.graph_mut().create_type_variable("v");
    let v2 = second.graph_mut().create_type_variable("v");
    let id_of = |session: &CheckerSession, v| {
        session.graph().type_variable_info(v).map(|info| info.id)
    };
    assert_eq!(id_of(&first, v1), id_of(&second, v2));
}

#[test]
fn test_options_flow_into_the_engine() {
    let options = CheckerOptions {
        report_excess_type_arguments: false,
        ..CheckerOptions::default()
    };
    let mut session = CheckerSession::with_options(options);
    let (root, _) = generic_interface(&mut session, "A");
    let wk = *session.graph().well_known();

    let clone = session.specialize_type(root, Some(&[wk.number, wk.string]));
    assert_eq!(session.graph().type_arguments(clone), Some(&[wk.number][..]));
    assert!(session.diagnostics().is_empty());

    let mut strict = CheckerSession::new();
    let (root, _) = generic_interface(&mut strict, "A");
    strict.specialize_type(root, Some(&[wk.number, wk.string]));
    let diagnostics = strict.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, 2314);
    assert!(strict.diagnostics().is_empty());
}

#[test]
fn test_diagnostics_serialize_to_json() {
    let mut session = CheckerSession::new();
    let (root, _) = generic_interface(&mut session, "A");
    let wk = *session.graph().well_known();
    session.specialize_type(root, Some(&[wk.number, wk.string]));

    let json = session.diagnostics_to_json().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed[0]["code"], 2314);
    assert_eq!(parsed[0]["file"], "a.ts");
    assert_eq!(parsed[0]["start"], 5);
}

#[test]
fn test_contextual_types_are_per_pass() {
    let mut session = CheckerSession::new();
    let string = session.graph().well_known().string;
    let position = AstRef(7);

    session.record_contextual_type(position, string);
    assert_eq!(session.contextual_type_at(position), Some(string));
    assert_eq!(session.contextual_type_at(AstRef(8)), None);

    session.begin_pass();
    assert_eq!(session.contextual_type_at(position), None);
}

#[test]
fn test_rerecording_expression_replaces_contributors() {
    let mut session = CheckerSession::new();
    let wk = *session.graph().well_known();
    let x = session.graph_mut().create_symbol("x", SymbolKind::VARIABLE);
    let y = session.graph_mut().create_symbol("y", SymbolKind::VARIABLE);
    let expr = AstRef(1);

    let node = session.record_expression_type(expr, wk.number, &[x]);
    assert_eq!(session.expression_contributors(expr), vec![x]);

    let again = session.record_expression_type(expr, wk.string, &[y]);
    assert_eq!(node, again);
    assert_eq!(session.expression_contributors(expr), vec![y]);
    assert!(session.type_has_flags(
        session.type_of_expression(expr).unwrap(),
        TypeFlags::STRING_LIKE
    ));

    // x no longer contributes, so invalidating it leaves the expression alone.
    session.invalidate(x);
    assert_eq!(session.type_of_expression(expr), Some(wk.string));
    session.invalidate(y);
    assert_eq!(session.type_of_expression(expr), None);
    assert!(session.graph().verify_link_pairs());
}

#[test]
fn test_begin_pass_unbinds_everything() {
    let mut session = CheckerSession::new();
    let (root, _) = generic_interface(&mut session, "A");
    session.graph_mut().set_bound(root);
    assert!(session.graph().is_bound(root));

    let generation = session.begin_pass();
    assert_eq!(generation, session.graph().generation());
    assert!(!session.graph().is_bound(root));
}

#[test]
fn test_specialize_to_any_and_instantiate_through_session() {
    let mut session = CheckerSession::new();
    let (root, _) = generic_interface(&mut session, "A");
    let wk = *session.graph().well_known();

    let any_clone = session.specialize_type_to_any(root);
    assert_eq!(session.type_to_string(any_clone), "A<any>");

    let graph = session.graph_mut();
    let signature = graph.create_signature(SymbolKind::CALL_SIGNATURE);
    let u = graph.create_type_parameter("U");
    graph.add_type_parameter(signature, u);
    graph.set_return_type(signature, u);

    let instance = session.instantiate_signature(signature, &[wk.boolean]);
    assert_eq!(session.graph().return_type(instance), Some(wk.boolean));
    assert!(session.type_has_flags(wk.boolean, TypeFlags::BOOLEAN_LIKE));
}
