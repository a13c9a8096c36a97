use super::*;

fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |key: &str| {
        vars.iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| (*value).to_string())
    }
}

#[test]
fn test_log_format_parse() {
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
    assert_eq!(LogFormat::parse("text"), LogFormat::Text);
    assert_eq!(LogFormat::parse(""), LogFormat::Text);
    assert_eq!(LogFormat::parse("xml"), LogFormat::Text);
}

#[test]
fn test_config_requires_a_filter() {
    assert_eq!(TracingConfig::from_lookup(lookup(&[])), None);
    assert_eq!(
        TracingConfig::from_lookup(lookup(&[("TSG_LOG_FORMAT", "tree")])),
        None
    );
}

#[test]
fn test_tsg_log_takes_precedence_over_rust_log() {
    let config = TracingConfig::from_lookup(lookup(&[
        ("RUST_LOG", "info"),
        ("TSG_LOG", "tsg_solver=debug"),
        ("TSG_LOG_FORMAT", "json"),
    ]))
    .expect("filter is set");
    assert_eq!(config.directives, "tsg_solver=debug");
    assert_eq!(config.format, LogFormat::Json);

    let fallback = TracingConfig::from_lookup(lookup(&[("RUST_LOG", "warn")]))
        .expect("RUST_LOG is enough");
    assert_eq!(fallback.directives, "warn");
    assert_eq!(fallback.format, LogFormat::Text);
}

#[test]
fn test_init_tracing_is_safe_to_call_twice() {
    init_tracing();
    init_tracing();
}
