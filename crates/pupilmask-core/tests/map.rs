use pupilmask_core::{NamingConfig, NamingScheme, PseudonymMap};

fn class_list() -> Vec<&'static str> {
    vec![
        "Alice Smith",
        "Bob Jones",
        "Chloe Brown",
        "Daniel Green",
        "Ella White",
        "Finley Hall",
    ]
}

fn assignment(map: &PseudonymMap) -> Vec<(String, String)> {
    map.pairs()
        .iter()
        .map(|p| (p.real.clone(), p.pseudo.clone()))
        .collect()
}

#[test]
fn builds_numbered_map_in_input_order() {
    let map = PseudonymMap::build(["bob jones", "Alice Smith"], &NamingConfig::default());

    assert_eq!(map.len(), 2);
    assert_eq!(map.pseudonym_for("Bob Jones"), Some("Pupil-001"));
    assert_eq!(map.pseudonym_for("Alice Smith"), Some("Pupil-002"));
    assert_eq!(map.real_name_for("Pupil-001"), Some("Bob Jones"));
    assert_eq!(
        map.display_lines(),
        vec!["Pupil-001 ⟷ Bob Jones", "Pupil-002 ⟷ Alice Smith"]
    );
}

#[test]
fn deduplicates_on_normalized_form() {
    let map = PseudonymMap::build(
        ["Alice Smith", "alice smith", " Alice  Smith "],
        &NamingConfig::default(),
    );
    assert_eq!(map.len(), 1);
    assert_eq!(map.pairs()[0].real, "Alice Smith");
    assert_eq!(map.pairs()[0].pseudo, "Pupil-001");
}

#[test]
fn empty_and_blank_input_gives_empty_map() {
    let none: [&str; 0] = [];
    assert!(PseudonymMap::build(none, &NamingConfig::default()).is_empty());

    let blanks = PseudonymMap::build(["", "   ", "\t"], &NamingConfig::default());
    assert!(blanks.is_empty());
    assert!(blanks.real_to_pseudo().is_empty());
    assert!(blanks.pseudo_to_real().is_empty());
}

#[test]
fn lookup_tables_are_inverse() {
    for config in [
        NamingConfig::default(),
        NamingConfig::default().with_seed(3),
        NamingConfig::default().with_scheme(NamingScheme::Greek),
        NamingConfig::default()
            .with_scheme(NamingScheme::Numbered("Pupil #".into()))
            .with_start_at(10),
    ] {
        let map = PseudonymMap::build(class_list(), &config);
        assert_eq!(map.real_to_pseudo().len(), 6);
        assert_eq!(map.pseudo_to_real().len(), 6);
        for (real, pseudo) in map.real_to_pseudo() {
            assert_eq!(map.pseudo_to_real()[pseudo], *real);
        }
    }
}

#[test]
fn start_at_offsets_numbers() {
    let config = NamingConfig::default().with_start_at(7);
    let map = PseudonymMap::build(["Alice Smith"], &config);
    assert_eq!(map.pseudonym_for("alice smith"), Some("Pupil-007"));
}

#[test]
fn same_seed_gives_same_assignment() {
    let config = NamingConfig::default().with_seed(7);
    let first = PseudonymMap::build(class_list(), &config);
    let second = PseudonymMap::build(class_list(), &config);
    assert_eq!(assignment(&first), assignment(&second));
}

#[test]
fn different_seeds_give_different_order() {
    let seven = PseudonymMap::build(class_list(), &NamingConfig::default().with_seed(7));
    let eight = PseudonymMap::build(class_list(), &NamingConfig::default().with_seed(8));
    assert_ne!(assignment(&seven), assignment(&eight));

    let seven = PseudonymMap::build(["A", "B", "C"], &NamingConfig::default().with_seed(7));
    let eight = PseudonymMap::build(["A", "B", "C"], &NamingConfig::default().with_seed(8));
    assert_ne!(assignment(&seven), assignment(&eight));
}

#[test]
fn seeded_permutation_is_stable_across_builds() {
    let map = PseudonymMap::build(class_list(), &NamingConfig::default().with_seed(7));
    let order: Vec<&str> = map.pairs().iter().map(|p| p.real.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "Ella White",
            "Bob Jones",
            "Chloe Brown",
            "Daniel Green",
            "Finley Hall",
            "Alice Smith",
        ]
    );
    assert_eq!(map.pseudonym_for("Ella White"), Some("Pupil-001"));
}

#[test]
fn seed_zero_still_shuffles() {
    let map = PseudonymMap::build(class_list(), &NamingConfig::default().with_seed(0));
    assert_eq!(map.pairs()[0].real, "Finley Hall");
}

#[test]
fn greek_scheme_recycles_after_24() {
    let names: Vec<String> = (0..26).map(|i| format!("Pupil Name{i}")).collect();
    let config = NamingConfig::default().with_scheme(NamingScheme::Greek);
    let map = PseudonymMap::build(&names, &config);

    assert_eq!(map.len(), 26);
    assert_eq!(map.pairs()[0].pseudo, "Alpha-1");
    assert_eq!(map.pairs()[24].pseudo, "Alpha-2");
    assert_eq!(map.pairs()[25].pseudo, "Beta-2");
}

#[test]
fn custom_scheme_collisions_are_disambiguated() {
    let config = NamingConfig::default().with_scheme(NamingScheme::custom(|_, _| "Child".into()));
    let map = PseudonymMap::build(["Alice Smith", "Bob Jones", "Chloe Brown"], &config);

    let labels: Vec<&str> = map.pairs().iter().map(|p| p.pseudo.as_str()).collect();
    assert_eq!(labels, vec!["Child", "Child-2", "Child-3"]);
    assert_eq!(map.pseudo_to_real().len(), 3);
}

#[test]
fn labels_differing_only_in_whitespace_are_disambiguated() {
    let config = NamingConfig::default().with_scheme(NamingScheme::custom(|_, index| {
        if index == 0 { "P 1".into() } else { "P  1".into() }
    }));
    let map = PseudonymMap::build(["Alice Smith", "Bob Jones"], &config);

    let labels: Vec<&str> = map.pairs().iter().map(|p| p.pseudo.as_str()).collect();
    assert_eq!(labels, vec!["P 1", "P 1-2"]);

    let anon = map.anonymise_text("Alice Smith and Bob Jones").unwrap();
    assert_eq!(anon, "P 1 and P 1-2");
    assert_eq!(
        map.reidentify_text(&anon).unwrap(),
        "Alice Smith and Bob Jones"
    );
}

#[test]
fn custom_scheme_blank_label_falls_back_to_numbered() {
    let config = NamingConfig::default().with_scheme(NamingScheme::custom(|_, _| "  ".into()));
    let map = PseudonymMap::build(["Alice Smith"], &config);
    assert_eq!(map.pseudonym_for("Alice Smith"), Some("Pupil-001"));
}

#[test]
fn given_name_aliases_skip_shared_and_single_word_names() {
    let map = PseudonymMap::build(
        ["Alice Smith", "Oliver Jones", "Oliver Brown", "Cher"],
        &NamingConfig::default(),
    );
    let aliases = map.given_name_aliases();

    assert_eq!(aliases.get("Alice").map(String::as_str), Some("Pupil-001"));
    assert!(!aliases.contains_key("Oliver"));
    assert!(!aliases.contains_key("Cher"));
}

#[test]
fn config_round_trips_through_json() {
    let config = NamingConfig::default()
        .with_scheme(NamingScheme::Greek)
        .with_seed(42);
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "scheme": "Greek", "start_at": 1, "seed": 42 })
    );

    let partial: NamingConfig = serde_json::from_str(r#"{ "seed": 5 }"#).unwrap();
    assert_eq!(partial.seed, Some(5));
    assert_eq!(partial.start_at, 1);
    assert_eq!(partial.scheme.to_string(), "Pupil-###");
}
