// SPDX-License-Identifier: PMPL-1.0-or-later

//! End-to-end tests against a locales directory on disk

use i18n_jed::{Binder, FsRepository, LocaleRepository, Options, Translator};
use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn write_locale(dir: &Path, code: &str, body: &str) {
    fs::write(dir.join(format!("{}.json", code)), body).unwrap();
}

fn locales() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_locale(
        dir.path(),
        "en",
        r#"{
            "Hello": "Hello",
            "Hello %s": "Hello %s",
            "item": { "one": "1 item", "other": "%d items" }
        }"#,
    );
    write_locale(
        dir.path(),
        "th",
        r#"{
            "Hello": "สวัสดี",
            "item": { "one": "1 ชิ้น", "other": "%d ชิ้น" }
        }"#,
    );
    dir
}

fn repository(dir: &TempDir) -> Arc<dyn LocaleRepository> {
    Arc::new(FsRepository::new(dir.path()))
}

#[test]
fn test_thai_default_translates_and_falls_back() {
    let dir = locales();
    let translator = Translator::with_options(
        repository(&dir),
        &json!({ "defaultLanguage": "th", "allowedLanguages": ["en", "th"] }),
    )
    .expect("valid options");

    assert_eq!(translator.active_language(), "th");
    assert_eq!(translator.translate("Hello"), "สวัสดี");
    assert_eq!(translator.translate("Goodbye"), "Goodbye");
}

#[test]
fn test_switching_language_reloads_from_disk() {
    let dir = locales();
    let mut translator = Translator::new(repository(&dir));
    assert_eq!(translator.translate("Hello"), "Hello");

    assert!(translator.set_active_language("th"));
    assert_eq!(translator.translate("Hello"), "สวัสดี");

    // Edits on disk are picked up by the next reload.
    write_locale(dir.path(), "th", r#"{ "Hello": "หวัดดี" }"#);
    assert!(translator.set_active_language("th"));
    assert_eq!(translator.translate("Hello"), "หวัดดี");
}

#[test]
fn test_repeated_switch_is_idempotent() {
    let dir = locales();
    let mut translator = Translator::new(repository(&dir));
    translator.set_active_language("th");
    let first = translator.mapping().clone();
    translator.set_active_language("th");
    assert_eq!(translator.active_language(), "th");
    assert_eq!(translator.mapping(), &first);
}

#[test]
fn test_quoted_code_behaves_like_plain_code() {
    let dir = locales();
    let mut quoted = Translator::new(repository(&dir));
    let mut plain = Translator::new(repository(&dir));
    quoted.set_active_language("\"th\"");
    plain.set_active_language("th");
    assert_eq!(quoted.active_language(), plain.active_language());
    assert_eq!(quoted.mapping(), plain.mapping());
}

#[test]
fn test_plural_and_interpolation() {
    let dir = locales();
    let translator = Translator::new(repository(&dir));

    assert_eq!(translator.translate_plural("item", "items", 1), "1 item");
    assert_eq!(translator.tn("item", "items", 5, &[5.into()]), "5 items");
    assert_eq!(translator.tn("item", "items", 0, &[0.into()]), "1 item");
    assert_eq!(translator.t("Hello %s", &["World".into()]), "Hello World");
    assert_eq!(translator.t("Bye %s", &["World".into()]), "Bye World");
}

#[test]
fn test_allowed_language_without_file_falls_back_to_keys() {
    let dir = locales();
    let options = Options::new("en", ["en", "th", "de"]);
    let mut translator =
        Translator::from_options(repository(&dir), options).expect("valid options");

    assert!(translator.set_active_language("de"));
    assert_eq!(translator.active_language(), "de");
    assert!(translator.mapping().is_empty());
    assert_eq!(translator.translate("Hello"), "Hello");
}

#[test]
fn test_malformed_locale_falls_back_to_keys() {
    let dir = locales();
    write_locale(dir.path(), "th", "{ broken");
    let mut translator = Translator::new(repository(&dir));
    assert!(translator.set_active_language("th"));
    assert_eq!(translator.translate("Hello"), "Hello");
}

#[test]
fn test_options_file_drives_binder() {
    let dir = locales();
    let options_path = dir.path().join("i18n.config");
    fs::write(
        &options_path,
        r#"{ "defaultLanguage": "th", "sideChannelKey": "locale" }"#,
    )
    .unwrap();

    let options = Options::from_file(&options_path).expect("options file should parse");
    let binder = Binder::new(repository(&dir), options).expect("valid options");

    let thai = binder.bind(Some("session=1"));
    assert_eq!(thai.t("Hello", &[]), "สวัสดี");

    let english = binder.bind(Some("session=1; locale=en"));
    assert_eq!(english.t("Hello", &[]), "Hello");
    assert_eq!(english.tn("item", "items", "3", &["3".into()]), "3 items");
}

#[test]
fn test_languages_discovered_from_directory() {
    let dir = locales();
    let repo = FsRepository::new(dir.path());
    assert_eq!(repo.languages().unwrap(), vec!["en", "th"]);
}

#[test]
fn test_client_script_round_trips_through_memory_repository() {
    let dir = locales();
    let binder = Binder::new(repository(&dir), Options::default()).unwrap();
    let locals = binder.bind(Some("lang=th"));
    let script = locals.client_script().expect("mapping serialises");

    let client = i18n_jed::MemoryRepository::from_bundle_script(&script)
        .expect("bundle script should parse");
    let mut translator = Translator::new(Arc::new(client));
    translator.set_active_language("th");
    assert_eq!(translator.translate("Hello"), "สวัสดี");
    assert_eq!(translator.tn("item", "items", 2, &[2.into()]), "2 ชิ้น");
}
