use super::*;

#[test]
fn test_from_args_pairs_positionally() {
    let params = [SymbolId(10), SymbolId(11)];
    let args = [SymbolId(1), SymbolId(2), SymbolId(3)];
    let subst = TypeSubstitution::from_args(&params, &args);

    assert_eq!(subst.len(), 2);
    assert_eq!(subst.get(SymbolId(10)), Some(SymbolId(1)));
    assert_eq!(subst.get(SymbolId(11)), Some(SymbolId(2)));
    assert_eq!(subst.get(SymbolId(3)), None);
}

#[test]
fn test_identity_frame() {
    let mut subst = TypeSubstitution::new();
    assert!(subst.is_empty());
    assert!(subst.is_identity());

    subst.insert(SymbolId(5), SymbolId(5));
    assert!(subst.is_identity());
    subst.insert(SymbolId(6), SymbolId(1));
    assert!(!subst.is_identity());
}

#[test]
fn test_context_lookup_prefers_innermost_frame() {
    let t = SymbolId(10);
    let u = SymbolId(11);
    let mut context = SubstitutionContext::new();
    context.push(TypeSubstitution::from_args(&[t, u], &[SymbolId(1), SymbolId(2)]));
    context.push(TypeSubstitution::from_args(&[t], &[SymbolId(3)]));

    assert_eq!(context.depth(), 2);
    assert_eq!(context.lookup(t), Some(SymbolId(3)));
    assert_eq!(context.lookup(u), Some(SymbolId(2)));

    context.pop();
    assert_eq!(context.lookup(t), Some(SymbolId(1)));
    context.pop();
    assert_eq!(context.lookup(t), None);
    assert_eq!(context.depth(), 0);
}

#[test]
fn test_specializing_to_any_toggle_returns_previous() {
    let mut context = SubstitutionContext::new();
    assert!(!context.is_specializing_to_any());
    assert!(!context.set_specializing_to_any(true));
    assert!(context.is_specializing_to_any());
    assert!(context.set_specializing_to_any(false));
    assert!(!context.is_specializing_to_any());
}
