use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn transgen_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("transgen"))
}

const SETTINGS: &str = r#"{
    "targets": [
        {
            "clientName": "mainClient",
            "targetLanguages": ["English", "German"],
            "doIOS": true,
            "doAndroid": true,
            "defaultLanguage": "English"
        },
        {
            "clientName": "clientOne",
            "targetLanguages": ["English"],
            "doIOS": false,
            "doAndroid": true,
            "defaultLanguage": "English",
            "clientCSVFilename": "translations_clientOne.csv"
        }
    ],
    "iosKeyCaseType": "Camel"
}"#;

const TABLE: &str = "\
Section;Key;Android;iOS;Notes;English;German
General;ok_button;x;x;;OK;OK
;share_title;x;x;;Share '%s';Teile '%s'
";

const CLIENT_TABLE: &str = "\
Section;Key;Android;iOS;Notes;English;German
;ok_button;x;x;;Okay;
";

fn project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let csv = temp_dir.path().join("translations");
    fs::create_dir_all(&csv).unwrap();
    fs::write(csv.join("settings.json"), SETTINGS).unwrap();
    fs::write(csv.join("translations.csv"), TABLE).unwrap();
    fs::write(csv.join("translations_clientOne.csv"), CLIENT_TABLE).unwrap();
    temp_dir
}

fn generate(root: &Path, extra: &[&str]) -> std::process::Output {
    transgen_cmd()
        .arg("--project")
        .arg(root)
        .args(["--csv-folder", "translations"])
        .args(extra)
        .output()
        .unwrap()
}

#[test]
fn test_list_clients() {
    let temp_dir = project();
    let output = generate(temp_dir.path(), &["--list-clients"]);
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "mainClient clientOne");
}

#[test]
fn test_generate_with_created_paths() {
    let temp_dir = project();
    let root = temp_dir.path();
    let output = generate(root, &["--create-missing-paths"]);
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("1 translations overridden, 0 translations added for client clientOne"));

    let main_xml = fs::read_to_string(root.join("mainClient/src/main/res/values/strings.xml")).unwrap();
    assert!(main_xml.contains(r#"<string name="ok_button">OK</string>"#));
    assert!(main_xml.contains(r#"<string name="share_title">Share \'%s\'</string>"#));

    let client_xml = fs::read_to_string(root.join("clientOne/src/main/res/values/strings.xml")).unwrap();
    assert!(client_xml.contains(r#"<string name="ok_button">Okay</string>"#));

    let german = fs::read_to_string(root.join("mainClient/Localization/de.lproj/Localizable.strings")).unwrap();
    assert!(german.contains("\"share_title\" = \"Teile '%@'\";"));

    let keys = fs::read_to_string(root.join("mainClient/Localization/TranslationKey.swift")).unwrap();
    assert!(keys.contains("\tstatic let okButton = \"ok_button\"\n"));
    assert!(!root.join("clientOne/Localization").exists());
}

#[test]
fn test_missing_folders_fail() {
    let temp_dir = project();
    let output = generate(temp_dir.path(), &["--platform", "android"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"));
}

#[test]
fn test_platform_filter() {
    let temp_dir = project();
    let root = temp_dir.path();
    let output = generate(root, &["--platform", "iOS", "--create-missing-paths"]);
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(root.join("mainClient/Localization/en.lproj/Localizable.strings").exists());
    assert!(!root.join("mainClient/src").exists());
    assert!(!root.join("clientOne").exists());
    assert!(String::from_utf8_lossy(&output.stderr).contains("clientOne settings do not include iOS"));
}

#[test]
fn test_unknown_client() {
    let temp_dir = project();
    let output = generate(temp_dir.path(), &["--client", "nobody"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("client `nobody` not found"));
}

#[test]
fn test_missing_settings() {
    let temp_dir = TempDir::new().unwrap();
    let output = generate(temp_dir.path(), &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("settings.json"));
}

#[test]
fn test_debug_mode() {
    let temp_dir = project();
    let root = temp_dir.path();
    let output = generate(root, &["--client", "mainClient", "--debug", "--create-missing-paths"]);
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let german = fs::read_to_string(root.join("mainClient/src/main/res/values-de/strings.xml")).unwrap();
    assert!(german.contains(r#"<string name="share_title">share_title</string>"#));
}
