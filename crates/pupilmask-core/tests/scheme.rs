use pupilmask_core::scheme::{GREEK_ALPHABET, NamingScheme};

#[test]
fn default_template_pads_to_three_digits() {
    let scheme = NamingScheme::default();
    assert_eq!(scheme.generate(1, 0), "Pupil-001");
    assert_eq!(scheme.generate(1, 6), "Pupil-007");
    assert_eq!(scheme.generate(1, 1200), "Pupil-1201");
}

#[test]
fn pad_width_follows_the_hash_run() {
    let anon = NamingScheme::Numbered("Anon-##".into());
    assert_eq!(anon.generate(1, 6), "Anon-07");

    let plain = NamingScheme::Numbered("Pupil #".into());
    assert_eq!(plain.generate(1, 6), "Pupil 7");
    assert_eq!(plain.generate(1, 11), "Pupil 12");
}

#[test]
fn text_after_the_hash_run_is_kept() {
    let scheme = NamingScheme::Numbered("[P###]".into());
    assert_eq!(scheme.generate(0, 42), "[P042]");
}

#[test]
fn template_without_hashes_gets_a_number_appended() {
    let scheme = NamingScheme::Numbered("Child".into());
    assert_eq!(scheme.generate(1, 0), "Child001");
    assert_ne!(scheme.generate(1, 0), scheme.generate(1, 1));
}

#[test]
fn greek_cycles_with_suffix() {
    let scheme = NamingScheme::Greek;
    assert_eq!(scheme.generate(1, 0), "Alpha-1");
    assert_eq!(scheme.generate(1, 23), "Omega-1");
    assert_eq!(scheme.generate(1, 24), "Alpha-2");
    assert_eq!(scheme.generate(99, 25), "Beta-2");
    assert_eq!(GREEK_ALPHABET.len(), 24);
}

#[test]
fn custom_receives_absolute_and_relative_index() {
    let scheme = NamingScheme::custom(|number, index| format!("Child {number}/{index}"));
    assert_eq!(scheme.generate(10, 2), "Child 12/2");
    assert!(!scheme.is_builtin());
}

#[test]
fn parses_from_config_text() {
    assert!(matches!("greek".parse::<NamingScheme>(), Ok(NamingScheme::Greek)));
    assert!(matches!("GREEK".parse::<NamingScheme>(), Ok(NamingScheme::Greek)));
    match "Anon-##".parse::<NamingScheme>() {
        Ok(NamingScheme::Numbered(template)) => assert_eq!(template, "Anon-##"),
        other => panic!("unexpected scheme: {other:?}"),
    }
    match "  ".parse::<NamingScheme>() {
        Ok(NamingScheme::Numbered(template)) => assert_eq!(template, "Pupil-###"),
        other => panic!("unexpected scheme: {other:?}"),
    }
}

#[test]
fn serializes_as_a_string() {
    let json = serde_json::to_string(&NamingScheme::Greek).unwrap();
    assert_eq!(json, "\"Greek\"");

    let back: NamingScheme = serde_json::from_str("\"Pupil ###\"").unwrap();
    assert_eq!(back.generate(1, 0), "Pupil 001");
}

#[test]
fn custom_scheme_refuses_to_serialize() {
    let scheme = NamingScheme::custom(|n, _| n.to_string());
    assert!(serde_json::to_string(&scheme).is_err());
}
