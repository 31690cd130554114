use conndetails_core::{AttributeSet, ConnConfig};
use conndetails_openid::{
    ConnectionDetailsProjector, OpenIdClientProjector, ProjectionError, Strictness,
};

#[test]
fn empty_config_gives_default_projector() {
    let projector = OpenIdClientProjector::from_config(&ConnConfig::empty()).unwrap();
    assert_eq!(projector.strictness(), Strictness::Lenient);
    assert_eq!(projector.keys().len(), 3);
}

#[test]
fn strict_flag_is_read() {
    let config = ConnConfig::from_yaml_str("connection:\n  strict: true\n", "test").unwrap();
    let projector = OpenIdClientProjector::from_config(&config).unwrap();
    assert_eq!(projector.strictness(), Strictness::Strict);
}

#[test]
fn malformed_strict_flag_is_an_error() {
    let config = ConnConfig::from_yaml_str("connection:\n  strict: perhaps\n", "test").unwrap();
    let err = OpenIdClientProjector::from_config(&config).unwrap_err();
    assert!(matches!(err, ProjectionError::Config(_)));
}

#[test]
fn extra_fields_extend_the_table() {
    let yaml = r#"
connection:
  extra_fields:
    - field: realm_id
      simplified: realmID
    - field: root_url
      simplified: rootURL
      legacy: attribute.rootUrl
"#;
    let config = ConnConfig::from_yaml_str(yaml, "test").unwrap();
    let projector = OpenIdClientProjector::from_config(&config).unwrap();
    assert_eq!(projector.keys().len(), 5);

    let attrs = AttributeSet::new()
        .with("realm_id", "master")
        .with("root_url", "https://app.example.com");
    let details = projector.project(&attrs).unwrap();

    assert_eq!(details.len(), 4);
    assert_eq!(details.get_str("realmID"), Some("master"));
    assert_eq!(details.get_str("attribute.realm_id"), Some("master"));
    assert_eq!(details.get_str("rootURL"), Some("https://app.example.com"));
    assert_eq!(
        details.get_str("attribute.rootUrl"),
        Some("https://app.example.com")
    );
}

#[test]
fn colliding_extra_field_is_rejected() {
    let yaml = r#"
connection:
  extra_fields:
    - field: client_name
      simplified: clientSecret
"#;
    let config = ConnConfig::from_yaml_str(yaml, "test").unwrap();
    let err = OpenIdClientProjector::from_config(&config).unwrap_err();
    assert!(matches!(err, ProjectionError::KeyCollision { key } if key == "clientSecret"));
}

#[test]
fn incomplete_extra_field_is_rejected() {
    let yaml = "connection:\n  extra_fields:\n    - field: realm_id\n";
    let config = ConnConfig::from_yaml_str(yaml, "test").unwrap();
    let err = OpenIdClientProjector::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("simplified"));
}
