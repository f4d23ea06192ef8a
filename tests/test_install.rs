mod common;

use std::io::Write;

use common::{recipe_row, recipe_sheet, write_workbook};
use recipe_sheet::{
    install, install_from_config, InMemoryRegistry, InstallSources, LoadError, RecipeRegistry,
    RegistrationSession, SheetSelector,
};

fn write_recipes(dir: &std::path::Path, name: &str, data: Vec<Vec<String>>) -> std::path::PathBuf {
    let path = dir.join(name);
    write_workbook(&path, &[("Recipes", recipe_sheet(data))]);
    path
}

fn default_recipes() -> Vec<Vec<String>> {
    vec![
        recipe_row(["1", "Fiber_Lv2", "1170", "1", "0", "743", "4", "WorkBenchAdvanced"]),
        recipe_row(["1", "Fiber_Lv3", "1171", "1", "0", "1170", "4", "WorkBenchAdvanced"]),
        recipe_row(["0", "WeaponParts", "662", "1", "0", "367", "2", ""]),
    ]
}

#[test]
fn test_install_default_only() {
    let dir = tempfile::tempdir().unwrap();
    let default_file = write_recipes(dir.path(), "default.xlsx", default_recipes());

    let mut registry = InMemoryRegistry::new();
    let mut session = RegistrationSession::default();
    let sources = InstallSources {
        default_file,
        override_file: None,
        selector: SheetSelector::first(),
    };

    let report = install(&mut registry, &mut session, &sources).unwrap();
    assert_eq!(
        report.added,
        vec![
            "recipe_sheet.Fiber_Lv2_formula",
            "recipe_sheet.Fiber_Lv3_formula"
        ]
    );
    assert_eq!(report.disabled, vec!["WeaponParts"]);
    assert!(report.overridden.is_empty());
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_override_workbook_wins() {
    let dir = tempfile::tempdir().unwrap();
    let default_file = write_recipes(dir.path(), "default.xlsx", default_recipes());
    let override_file = write_recipes(
        dir.path(),
        "custom.xlsx",
        vec![
            // Cheaper Fiber_Lv2 and a disabled Fiber_Lv3
            recipe_row(["1", "Fiber_Lv2", "1170", "2", "0", "743", "1", "WorkBenchAdvanced"]),
            recipe_row(["0", "Fiber_Lv3", "1171", "1", "0", "1170", "4", ""]),
            recipe_row(["1", "Custom", "5", "1", "10", "", "", ""]),
        ],
    );

    let mut registry = InMemoryRegistry::new();
    let mut session = RegistrationSession::default();
    let sources = InstallSources {
        default_file,
        override_file: Some(override_file),
        selector: SheetSelector::first(),
    };

    let report = install(&mut registry, &mut session, &sources).unwrap();

    assert_eq!(
        report.added,
        vec!["recipe_sheet.Fiber_Lv2_formula", "recipe_sheet.Custom_formula"]
    );
    assert_eq!(
        report.overridden,
        vec![
            "recipe_sheet.Fiber_Lv2_formula",
            "recipe_sheet.Fiber_Lv3_formula"
        ]
    );
    assert_eq!(report.disabled, vec!["Fiber_Lv3", "WeaponParts"]);

    let fiber = registry.get("recipe_sheet.Fiber_Lv2_formula").unwrap();
    assert_eq!(fiber.result.amount, 2);
    assert_eq!(fiber.cost.items[0].amount, 1);
    // Disabled in the override, so the default one is not used either
    assert!(!registry.contains("recipe_sheet.Fiber_Lv3_formula"));
}

#[test]
fn test_missing_override_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let default_file = write_recipes(dir.path(), "default.xlsx", default_recipes());

    let mut registry = InMemoryRegistry::new();
    let mut session = RegistrationSession::default();
    let sources = InstallSources {
        default_file,
        override_file: Some(dir.path().join("not-there.xlsx")),
        selector: SheetSelector::first(),
    };

    let report = install(&mut registry, &mut session, &sources).unwrap();
    assert_eq!(report.added.len(), 2);
}

#[test]
fn test_missing_default_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = InMemoryRegistry::new();
    let mut session = RegistrationSession::default();
    let sources = InstallSources {
        default_file: dir.path().join("default.xlsx"),
        override_file: None,
        selector: SheetSelector::first(),
    };

    let err = install(&mut registry, &mut session, &sources).unwrap_err();
    assert!(matches!(err, LoadError::FileNotFound { .. }));
    assert!(registry.is_empty());
}

#[test]
fn test_remove_all_after_install() {
    let dir = tempfile::tempdir().unwrap();
    let default_file = write_recipes(dir.path(), "default.xlsx", default_recipes());

    let mut registry = InMemoryRegistry::new();
    let mut host = RegistrationSession::new(recipe_sheet::RegistrationOptions {
        id_policy: recipe_sheet::IdPolicy::new("host.", ""),
        ..Default::default()
    });
    // A recipe that belongs to the host and must survive teardown
    let records = recipe_sheet::load(&default_file, None, None).unwrap();
    host.register(&mut registry, &records[0]).unwrap();

    let mut session = RegistrationSession::default();
    let sources = InstallSources {
        default_file,
        override_file: None,
        selector: SheetSelector::first(),
    };
    install(&mut registry, &mut session, &sources).unwrap();
    assert_eq!(registry.len(), 3);

    assert_eq!(session.remove_all(&mut registry), 2);
    assert_eq!(registry.len(), 1);
    assert!(registry.contains("host.Fiber_Lv2"));
}

#[test]
fn test_install_twice_skips_existing() {
    let dir = tempfile::tempdir().unwrap();
    let default_file = write_recipes(dir.path(), "default.xlsx", default_recipes());
    let sources = InstallSources {
        default_file,
        override_file: None,
        selector: SheetSelector::first(),
    };

    let mut registry = InMemoryRegistry::new();
    let mut first = RegistrationSession::default();
    install(&mut registry, &mut first, &sources).unwrap();

    let mut second = RegistrationSession::default();
    let report = install(&mut registry, &mut second, &sources).unwrap();
    assert!(report.added.is_empty());
    assert_eq!(report.skipped_existing.len(), 2);
    assert!(second.added_ids().is_empty());
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_install_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let default_file = write_recipes(dir.path(), "default.xlsx", default_recipes());

    let config_path = dir.path().join("recipe-sheet.toml");
    let mut config = std::fs::File::create(&config_path).unwrap();
    writeln!(
        config,
        "[source]\ndefault_file = {:?}\nsheet_name = \"recipes\"\n\n[registration]\nid_prefix = \"mod.\"\nid_suffix = \"\"\nlock_in_demo = true",
        default_file.to_string_lossy()
    )
    .unwrap();
    drop(config);

    let mut registry = InMemoryRegistry::new();
    let (session, report) = install_from_config(&mut registry, Some(&config_path)).unwrap();

    assert_eq!(report.added, vec!["mod.Fiber_Lv2", "mod.Fiber_Lv3"]);
    assert_eq!(session.added_ids().len(), 2);
    assert!(registry.get("mod.Fiber_Lv2").unwrap().lock_in_demo);
}
