use conndetails_core::{AttributeSet, AttributeValue};
use conndetails_openid::{
    project, ConnectionDetails, ConnectionDetailsProjector, ConnectionKey, OpenIdClientProjector,
    ProjectionError, OPENID_CLIENT_KEYS,
};

fn full_registration() -> AttributeSet {
    AttributeSet::new()
        .with("client_secret", "test-secret-123")
        .with("client_id", "test-client")
        .with("service_account_user_id", "user-123")
}

fn assert_pair(details: &ConnectionDetails, simplified: &str, legacy: &str, expected: &str) {
    assert_eq!(details.get(simplified), Some(expected.as_bytes()), "{simplified}");
    assert_eq!(details.get(legacy), Some(expected.as_bytes()), "{legacy}");
}

fn assert_absent(details: &ConnectionDetails, simplified: &str, legacy: &str) {
    assert!(!details.contains_key(simplified), "{simplified} should be absent");
    assert!(!details.contains_key(legacy), "{legacy} should be absent");
}

#[test]
fn all_fields_present() {
    let details = project(&full_registration()).unwrap();

    assert_eq!(details.len(), 6);
    assert_pair(&details, "clientSecret", "attribute.client_secret", "test-secret-123");
    assert_pair(&details, "clientID", "attribute.client_id", "test-client");
    assert_pair(
        &details,
        "serviceAccountUserId",
        "attribute.service_account_user_id",
        "user-123",
    );
}

#[test]
fn empty_secret_is_omitted() {
    let attrs = AttributeSet::new()
        .with("client_secret", "")
        .with("client_id", "test-client");

    let details = project(&attrs).unwrap();

    assert_eq!(details.len(), 2);
    assert_absent(&details, "clientSecret", "attribute.client_secret");
    assert_pair(&details, "clientID", "attribute.client_id", "test-client");
}

#[test]
fn missing_fields_are_omitted() {
    let attrs = AttributeSet::new().with("client_id", "test-client");

    let details = project(&attrs).unwrap();

    assert_eq!(details.len(), 2);
    assert_pair(&details, "clientID", "attribute.client_id", "test-client");
    assert_absent(&details, "clientSecret", "attribute.client_secret");
    assert_absent(
        &details,
        "serviceAccountUserId",
        "attribute.service_account_user_id",
    );
}

#[test]
fn non_string_values_are_skipped() {
    let attrs = AttributeSet::new()
        .with("client_secret", 42i64)
        .with("client_id", true)
        .with("service_account_user_id", AttributeValue::List(vec!["u".into()]));

    let details = project(&attrs).unwrap();
    assert!(details.is_empty());
}

#[test]
fn null_values_are_skipped() {
    let attrs = AttributeSet::new()
        .with("client_secret", AttributeValue::Null)
        .with("client_id", "test-client");

    let details = OpenIdClientProjector::new().strict().project(&attrs).unwrap();
    assert_eq!(details.len(), 2);
    assert_absent(&details, "clientSecret", "attribute.client_secret");
}

#[test]
fn empty_attribute_set_yields_empty_map() {
    let details = project(&AttributeSet::new()).unwrap();
    assert!(details.is_empty());
}

#[test]
fn unrelated_attributes_are_ignored() {
    let attrs = full_registration()
        .with("name", "my-client")
        .with("access_type", "CONFIDENTIAL")
        .with("realm_id", "master");

    let details = project(&attrs).unwrap();
    assert_eq!(details.len(), 6);
    assert!(!details.contains_key("name"));
    assert!(!details.contains_key("attribute.realm_id"));
}

#[test]
fn size_is_twice_the_qualifying_fields() {
    let candidates: [(&str, AttributeValue); 4] = [
        ("present", AttributeValue::from("value")),
        ("empty", AttributeValue::from("")),
        ("wrong_type", AttributeValue::Integer(7)),
        ("null", AttributeValue::Null),
    ];

    // Every combination of the four shapes over the three recognized fields.
    for a in 0..5 {
        for b in 0..5 {
            for c in 0..5 {
                let mut attrs = AttributeSet::new();
                let mut qualifying = 0;
                for (key, choice) in OPENID_CLIENT_KEYS.iter().zip([a, b, c]) {
                    if let Some((shape, value)) = candidates.get(choice) {
                        attrs.insert(key.field(), value.clone());
                        if *shape == "present" {
                            qualifying += 1;
                        }
                    }
                }

                let details = project(&attrs).unwrap();
                assert_eq!(details.len(), 2 * qualifying, "{attrs:?}");
                for key in OPENID_CLIENT_KEYS.iter() {
                    let expected = attrs.get_str(key.field()).filter(|s| !s.is_empty());
                    assert_eq!(details.get_str(key.simplified()), expected);
                    assert_eq!(details.get_str(key.legacy()), expected);
                }
            }
        }
    }
}

#[test]
fn values_are_byte_identical() {
    let secret = "pä$$ wörd\n\u{1F511}";
    let attrs = AttributeSet::new().with("client_secret", secret);

    let details = project(&attrs).unwrap();
    assert_eq!(details.get("clientSecret"), Some(secret.as_bytes()));
    assert_eq!(details.get("attribute.client_secret"), Some(secret.as_bytes()));
}

#[test]
fn projection_is_idempotent() {
    let attrs = full_registration();
    let projector = OpenIdClientProjector::new();

    let first = projector.project(&attrs).unwrap();
    let second = projector.project(&attrs).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, project(&attrs).unwrap());
}

#[test]
fn strict_mode_rejects_non_string_field() {
    let attrs = AttributeSet::new()
        .with("client_id", "test-client")
        .with("client_secret", 12345i64);

    let err = OpenIdClientProjector::new().strict().project(&attrs).unwrap_err();
    match err {
        ProjectionError::NonStringValue { field, found } => {
            assert_eq!(field, "client_secret");
            assert_eq!(found, "integer");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn strict_mode_ignores_unrecognized_non_strings() {
    let attrs = full_registration().with("enabled", true);
    let details = OpenIdClientProjector::new().strict().project(&attrs).unwrap();
    assert_eq!(details.len(), 6);
}

#[test]
fn strict_mode_still_skips_empty_strings() {
    let attrs = AttributeSet::new().with("client_secret", "");
    let details = OpenIdClientProjector::new().strict().project(&attrs).unwrap();
    assert!(details.is_empty());
}

#[test]
fn extra_key_is_projected_in_both_families() {
    let projector = OpenIdClientProjector::new()
        .with_key(ConnectionKey::new("realm_id", "realmID"))
        .unwrap();
    let attrs = full_registration().with("realm_id", "master");

    let details = projector.project(&attrs).unwrap();
    assert_eq!(details.len(), 8);
    assert_pair(&details, "realmID", "attribute.realm_id", "master");
}

#[test]
fn projector_is_usable_as_trait_object() {
    let projectors: Vec<Box<dyn ConnectionDetailsProjector>> = vec![
        Box::new(OpenIdClientProjector::new()),
        Box::new(OpenIdClientProjector::new().strict()),
    ];
    for projector in &projectors {
        assert_eq!(projector.project(&full_registration()).unwrap().len(), 6);
    }
}

#[test]
fn concurrent_projection_is_independent() {
    let projector = std::sync::Arc::new(OpenIdClientProjector::new());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let projector = projector.clone();
            std::thread::spawn(move || {
                let attrs = AttributeSet::new().with("client_id", format!("client-{i}"));
                projector.project(&attrs).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let details = handle.join().unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details.get_str("clientID"), Some(format!("client-{i}").as_str()));
    }
}
