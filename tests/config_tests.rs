use jsonsmith::config::{Config, Locale};
use jsonsmith::theme::{ResolvedTheme, ThemePreference};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.indent_size, 2);
    assert_eq!(config.undo_limit, 50);
    assert_eq!(config.max_import_bytes, 10 * 1024 * 1024);
    assert!(!config.create_backup);
    assert_eq!(config.locale, None);
    assert_eq!(config.theme, ThemePreference::System);
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config {
        indent_size: 4,
        undo_limit: 10,
        create_backup: true,
        locale: Some(Locale::ZhCn),
        theme: ThemePreference::Light,
        ..Config::default()
    };
    config.save_to(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("locale = \"zh-CN\""));
    assert!(text.contains("theme = \"light\""));

    assert_eq!(Config::load_from(&path), config);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "indent_size = 8\n").unwrap();

    let config = Config::load_from(&path);
    assert_eq!(config.indent_size, 8);
    assert_eq!(config.undo_limit, 50);
    assert_eq!(config.theme, ThemePreference::System);
}

#[test]
fn test_missing_or_malformed_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        Config::load_from(&dir.path().join("absent.toml")),
        Config::default()
    );

    let path = dir.path().join("bad.toml");
    fs::write(&path, "indent_size = \"wide\"\n[[[").unwrap();
    assert_eq!(Config::load_from(&path), Config::default());
}

#[test]
fn test_locale_detection() {
    assert_eq!(Locale::from_system_value(Some("zh_CN.UTF-8")), Locale::ZhCn);
    assert_eq!(Locale::from_system_value(Some("en_GB.UTF-8")), Locale::EnUs);
    assert_eq!(Locale::ZhCn.to_string(), "zh-CN");
    assert_eq!(Locale::EnUs.toggled(), Locale::ZhCn);
}

#[test]
fn test_theme_resolution() {
    assert_eq!(ThemePreference::Dark.resolve_with(Some("0;15")), ResolvedTheme::Dark);
    assert_eq!(ThemePreference::System.resolve_with(Some("0;15")), ResolvedTheme::Light);
    assert_eq!(ThemePreference::System.resolve_with(None), ResolvedTheme::Dark);
    assert_eq!(ResolvedTheme::Light.opposite(), ResolvedTheme::Dark);
}
