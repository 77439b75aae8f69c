//! Tests for squad configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [constraints]
        budget = 95.5
        max_per_group = 2

        [constraints.quotas]
        GK = 1
        DEF = 3
        FWD = 1

        [allocation]
        prefer_score = false
        hint_scope = "open_categories"

        [repair]
        revalidate = false
    "#;

    let config = SquadConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.constraints.budget, Decimal::new(955, 1));
    assert!(!config.allocation.prefer_score);
    assert_eq!(config.allocation.hint_scope, HintScope::OpenCategories);
    assert!(!config.repair.revalidate);

    let constraints = config.constraint_set().unwrap();
    assert_eq!(constraints.max_per_group, 2);
    assert_eq!(constraints.required(Category::Defender), 3);
    assert_eq!(constraints.required(Category::Midfielder), 0);
    assert_eq!(constraints.target_size(), 5);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        constraints:
          budget: 100
          max_per_club: 3
          positions:
            GK: 2
            DEF: 5
            MID: 5
            FWD: 3
        allocation:
          prefer_points: true
    "#;

    let config = SquadConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.constraints.max_per_group, 3);
    assert!(config.allocation.prefer_score);
    assert_eq!(
        config.constraint_set().unwrap(),
        squadforge_core::ConstraintSet::default()
    );
}

#[test]
fn test_missing_sections_take_defaults() {
    let config = SquadConfig::from_toml_str("").unwrap();
    assert_eq!(config, SquadConfig::default());
    assert!(config.allocation.prefer_score);
    assert_eq!(config.allocation.hint_scope, HintScope::WholePool);
    assert!(config.repair.revalidate);
    assert_eq!(config.constraint_set().unwrap().target_size(), 15);
}

#[test]
fn test_negative_budget_is_invalid() {
    let config = SquadConfig::from_toml_str(
        r#"
        [constraints]
        budget = -1
        "#,
    )
    .unwrap();

    let err = config.constraint_set().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("non-negative"));
}

#[test]
fn test_unknown_category_is_invalid() {
    let config = SquadConfig::from_toml_str(
        r#"
        [constraints.quotas]
        GK = 1
        SWEEPER = 1
        "#,
    )
    .unwrap();

    let err = config.constraint_set().unwrap_err();
    assert!(err.to_string().contains("SWEEPER"));
}

#[test]
fn test_unknown_hint_scope_fails_to_parse() {
    let result = SquadConfig::from_toml_str(
        r#"
        [allocation]
        hint_scope = "everywhere"
        "#,
    );
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let result = SquadConfig::load("definitely/not/here/squad.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_builder() {
    let config = SquadConfig::new()
        .with_budget(Decimal::from(80))
        .with_prefer_score(false)
        .with_hint_scope(HintScope::OpenCategories)
        .with_revalidate(false);

    assert_eq!(config.constraint_set().unwrap().budget.amount(), Decimal::from(80));
    assert!(!config.allocation.prefer_score);
    assert_eq!(config.allocation.hint_scope, HintScope::OpenCategories);
    assert!(!config.repair.revalidate);
}

#[test]
fn test_toml_round_trip() {
    let config = SquadConfig::new()
        .with_budget(Decimal::new(995, 1))
        .with_hint_scope(HintScope::OpenCategories);
    let text = config.to_toml_string().unwrap();
    let parsed = SquadConfig::from_toml_str(&text).unwrap();
    assert_eq!(parsed, config);
}
