//! Lookup contract checks against the shipped Romanian catalog and
//! generated catalogs.
//!
//! 1. Translated, non-empty messages resolve to their translation.
//! 2. Unfinished or empty messages resolve to the source verbatim.
//! 3. An unknown context behaves exactly like the default context.
//! 4. A known context never borrows from the default context.
//! 5. Duplicate sources resolve to the last definition.
//! 6. Lookup is total: any (context, source, args) yields a string.

use proptest::prelude::*;
use tsl_catalog::{Catalog, Message, Status, parse};
use tsl_runtime::{Snapshot, Translator, substitute, tr};

const DRIVE: &[u8] = include_bytes!("../../tsl-catalog/tests/fixtures/drive_ro_RO.ts");

// ── Helpers ─────────────────────────────────────────────────────────────

fn drive() -> Translator {
    Translator::new(parse(DRIVE).expect("fixture parses"))
}

fn drive_catalog() -> Catalog {
    parse(DRIVE).expect("fixture parses")
}

// ── 1-2. Fixture behaviour ──────────────────────────────────────────────

#[test]
fn translated_message_without_placeholders() {
    let t = drive();
    assert_eq!(
        t.lookup("ProxyDlg", "Must be between 1024 and 65535.", &[]),
        "Trebuie sa fie intre 1024 si 65535"
    );
}

#[test]
fn translated_message_with_placeholder() {
    let t = drive();
    assert_eq!(t.lookup("CloudDeskTray", "Quit %s", &[&"MyApp"]), "Termina MyApp");
    assert_eq!(tr!(t, "", "About %s", "CloudDesk"), "Despre CloudDesk");
}

#[test]
fn unfinished_message_returns_source() {
    let t = drive();
    assert_eq!(t.lookup("AdvancedPage", "Change...", &[]), "Change...");
    assert_eq!(t.lookup("IntroPage", "Login", &[]), "Login");
}

#[test]
fn empty_translation_without_type_returns_source() {
    let t = drive();
    assert_eq!(t.tr("IntroPage", "Logout"), "Logout");
}

#[test]
fn every_fixture_message_follows_the_contract() {
    let catalog = drive_catalog();
    let t = Translator::new(catalog.clone());
    for (ctx, msg) in catalog.messages() {
        let expected = if msg.translation.is_empty() {
            msg.source.as_str()
        } else {
            msg.translation.as_str()
        };
        assert_eq!(
            t.tr(ctx.name(), &msg.source),
            expected,
            "context {:?} source {:?}",
            ctx.name(),
            msg.source
        );
    }
}

#[test]
fn mismatched_placeholders_are_lenient() {
    let t = drive();
    // Translation dropped the placeholder: the argument is ignored.
    assert_eq!(t.lookup("ProxyDlg", "port %s is invalid.", &[&8080]), "Portul nu este valid.");
    // A bare `%` is not a placeholder.
    assert_eq!(
        t.lookup("CloudDeskTray", "Open %s Folder", &[&"CloudDesk"]),
        "Deschide fisierul %"
    );
}

#[test]
fn trimmed_keys_match_untrimmed_queries() {
    let t = drive();
    assert_eq!(t.tr("ProxyDlg", " Proxy Configuration"), "Configuratie pentru Proxy");
    assert_eq!(t.tr("ProxyDlg", "Proxy Configuration"), "Configuratie pentru Proxy");
}

// ── 3-4. Context scoping ────────────────────────────────────────────────

#[test]
fn unknown_context_equals_default_context() {
    let t = drive();
    for source in ["About %s", "Unavailable", "Pause", "Login", "Not in catalog"] {
        assert_eq!(t.tr("NoSuchDialog", source), t.tr("", source), "{source}");
    }
    assert_eq!(t.tr("NoSuchDialog", "Pause"), "Fa pauza");
}

#[test]
fn known_context_is_not_merged_with_default() {
    let t = drive();
    assert_eq!(t.tr("", "Folder %s does not exist."), "Fisierul %s nu exista");
    assert_eq!(
        t.tr("AdvancedPage", "Folder %s does not exist."),
        "Folder %s does not exist."
    );
}

#[test]
fn scoped_translator_matches_two_part_lookup() {
    let t = std::sync::Arc::new(drive());
    let proxy = t.scoped("ProxyDlg");
    assert_eq!(
        proxy.lookup("port %s is in use.", &[&8080]),
        t.lookup("ProxyDlg", "port %s is in use.", &[&8080])
    );
    assert_eq!(proxy.tr("port %s is in use."), "Portul %s este in uz");
}

// ── 5. Duplicates ───────────────────────────────────────────────────────

#[test]
fn duplicate_source_uses_last_definition() {
    let src = br#"<TS version="2.0" language="ro_RO">
<context><name>Dlg</name>
<message><source>OK</source><translation>Bine</translation></message>
<message><source>OK</source><translation>De acord</translation></message>
</context></TS>"#;
    let t = Translator::new(parse(src).expect("parses"));
    assert_eq!(t.tr("Dlg", "OK"), "De acord");
}

// ── 6. Totality ─────────────────────────────────────────────────────────

fn catalog_strategy() -> impl Strategy<Value = Catalog> {
    let status = prop_oneof![
        Just(Status::Translated),
        Just(Status::Unfinished),
        Just(Status::Obsolete),
    ];
    let message = ("[a-z%]{1,8}", "[a-z%]{0,8}", status)
        .prop_map(|(source, translation, status)| Message::new(source, translation).with_status(status));
    let context = ("[A-C]?", proptest::collection::vec(message, 0..6));
    proptest::collection::vec(context, 0..4).prop_map(|contexts| {
        let mut catalog = Catalog::new("ro_RO", "en_US");
        for (name, messages) in contexts {
            for message in messages {
                catalog.insert(&name, message);
            }
        }
        catalog
    })
}

proptest! {
    #[test]
    fn lookup_matches_catalog(catalog in catalog_strategy()) {
        let snapshot = Snapshot::compile(catalog.clone());
        for (ctx, msg) in catalog.messages() {
            let expected = if msg.has_translation() { &msg.translation } else { &msg.source };
            prop_assert_eq!(snapshot.translate(ctx.name(), &msg.source), expected.as_str());
        }
    }

    #[test]
    fn lookup_never_panics(
        catalog in catalog_strategy(),
        context in "[A-D ]{0,3}",
        source in "[a-z% ]{0,12}",
        args in proptest::collection::vec("[a-z0-9]{0,4}", 0..4),
    ) {
        let snapshot = Snapshot::compile(catalog);
        let args: Vec<&dyn std::fmt::Display> =
            args.iter().map(|a| a as &dyn std::fmt::Display).collect();
        let _ = snapshot.lookup(&context, &source, &args);
    }

    #[test]
    fn missing_message_returns_substituted_source(
        source in "[a-z ]{0,6}%s[a-z ]{0,6}",
        arg in "[a-z]{1,6}",
    ) {
        let snapshot = Snapshot::empty();
        prop_assert_eq!(
            snapshot.lookup("Any", &source, &[&arg]),
            substitute(&source, &[&arg]).into_owned()
        );
        prop_assert_eq!(snapshot.lookup("Any", &source, &[]), source.clone());
    }
}
