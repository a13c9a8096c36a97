use super::*;

#[test]
fn test_primitive_flags() {
    let graph = SymbolGraph::new();
    let wk = *graph.well_known();

    assert_eq!(type_flags(&graph, wk.any), TypeFlags::ANY | TypeFlags::PRIMITIVE);
    assert!(type_flags(&graph, wk.string).contains(TypeFlags::STRING_LIKE));
    assert!(type_flags(&graph, wk.number).contains(TypeFlags::NUMBER_LIKE));
    assert!(type_flags(&graph, wk.boolean).contains(TypeFlags::BOOLEAN_LIKE));
    assert!(type_flags(&graph, wk.void).contains(TypeFlags::VOID_LIKE));
    assert!(type_flags(&graph, wk.null).contains(TypeFlags::NULLABLE));
    assert!(type_flags(&graph, wk.undefined).contains(TypeFlags::NULLABLE));
    assert!(!type_flags(&graph, wk.number).intersects(TypeFlags::STRING_LIKE | TypeFlags::OBJECT));
}

#[test]
fn test_string_constant_and_alias_are_string_like() {
    let mut graph = SymbolGraph::new();
    let constant = graph.create_string_constant_type("on");
    let alias = graph.create_alias_type("Mode", constant);

    assert!(type_flags(&graph, constant).contains(TypeFlags::STRING_LIKE));
    assert!(type_flags(&graph, alias).contains(TypeFlags::STRING_LIKE | TypeFlags::PRIMITIVE));
}

#[test]
fn test_structural_flags() {
    let mut graph = SymbolGraph::new();
    let iface = graph.create_type("I", SymbolKind::INTERFACE);
    let class = graph.create_class_type("C");
    let param = graph.create_type_parameter("T");
    let variable = graph.create_type_variable("?");
    let error = graph.create_error_type(None, None);
    let color = graph.create_container_type("Color", SymbolKind::ENUM);
    let module = graph.create_container_type("M", SymbolKind::CONTAINER);

    assert_eq!(type_flags(&graph, iface), TypeFlags::OBJECT);
    assert_eq!(type_flags(&graph, class), TypeFlags::OBJECT);
    assert_eq!(type_flags(&graph, param), TypeFlags::TYPE_PARAMETER);
    assert_eq!(type_flags(&graph, variable), TypeFlags::TYPE_PARAMETER);
    assert_eq!(type_flags(&graph, error), TypeFlags::ERROR | TypeFlags::ANY);
    assert!(type_flags(&graph, color).contains(TypeFlags::NUMBER_LIKE));
    assert_eq!(type_flags(&graph, module), TypeFlags::OBJECT);
}

#[test]
fn test_values_have_no_flags() {
    let mut graph = SymbolGraph::new();
    let value = graph.create_symbol("x", SymbolKind::VARIABLE);
    assert!(type_flags(&graph, value).is_empty());
}
