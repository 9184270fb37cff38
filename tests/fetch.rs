use encoding_rs::SHIFT_JIS;
use jpcal::config::{DataSource, RunConfig, Settings};
use jpcal::fetch::{fetch_holidays, FetchOutcome};
use jpcal::holiday::HolidayCollection;
use jpcal::shell::{Outcome, Shell};
use jpcal::Error;
use mockito::Server;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const CSV: &str = "国民の祝日・休日月日,国民の祝日・休日名称\n2025/1/1,元日\n2025/1/13,成人の日\n";

fn cache_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("jpcal-fetch-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir.join("holidays.csv")
}

#[test]
fn test_shift_jis_is_cached_as_utf8() {
    let mut server = Server::new();
    let (body, _, _) = SHIFT_JIS.encode(CSV);
    let mock = server
        .mock("GET", "/syukujitsu.csv")
        .with_status(200)
        .with_header("content-type", "text/csv")
        .with_body(body.into_owned())
        .create();

    let path = cache_path("sjis");
    let url = format!("{}/syukujitsu.csv", server.url());
    let outcome = fetch_holidays(&url, &path, Duration::from_secs(5)).unwrap();

    mock.assert();
    assert_eq!(outcome, FetchOutcome::Converted);
    assert_eq!(fs::read_to_string(&path).unwrap(), CSV);
    let holidays = HolidayCollection::load(&path).unwrap();
    assert_eq!(holidays.find(2025, 1, 13).unwrap().name(), "成人の日");
    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_undecodable_body_is_stored_raw() {
    let mut server = Server::new();
    // a lead byte followed by a byte that cannot complete it
    let body: Vec<u8> = b"date,name\n2025/1/1,\x81\x0a".to_vec();
    let _mock = server
        .mock("GET", "/syukujitsu.csv")
        .with_status(200)
        .with_body(body.clone())
        .create();

    let path = cache_path("raw");
    let url = format!("{}/syukujitsu.csv", server.url());
    let outcome = fetch_holidays(&url, &path, Duration::from_secs(5)).unwrap();

    assert_eq!(outcome, FetchOutcome::Raw);
    assert_eq!(fs::read(&path).unwrap(), body);
    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_http_error_status() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/syukujitsu.csv")
        .with_status(404)
        .create();

    let path = cache_path("404");
    let url = format!("{}/syukujitsu.csv", server.url());
    let result = fetch_holidays(&url, &path, Duration::from_secs(5));

    assert!(matches!(result, Err(Error::HttpStatus(404))));
    assert!(!path.exists());
}

#[test]
fn test_shell_downloads_missing_cache() {
    let mut server = Server::new();
    let (body, _, _) = SHIFT_JIS.encode(CSV);
    let mock = server
        .mock("GET", "/syukujitsu.csv")
        .with_status(200)
        .with_body(body.into_owned())
        .expect(1)
        .create();

    let path = cache_path("shell");
    let settings = Settings {
        url: format!("{}/syukujitsu.csv", server.url()),
        cache_path: path.clone(),
        timeout_secs: 5,
    };
    let config = RunConfig {
        year: Some(2025),
        month: Some(1),
        source: DataSource::Download,
        json: false,
    };
    let mut console = Vec::new();
    let mut output = Vec::new();
    let outcome = Shell::new(settings, "".as_bytes(), &mut console, &mut output)
        .run(&config)
        .unwrap();

    mock.assert();
    assert_eq!(outcome, Outcome::Rendered);
    let console = String::from_utf8(console).unwrap();
    let output = String::from_utf8(output).unwrap();
    assert!(console.contains("✅ UTF-8に変換しました"));
    assert!(console.contains("祝日データを読み込みました: 2件"));
    assert!(output.contains("  13日: 成人の日"));
    assert!(path.exists());
    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_failed_refresh_keeps_existing_cache() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/syukujitsu.csv")
        .with_status(500)
        .expect(1)
        .create();

    let path = cache_path("refresh");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, CSV).unwrap();
    let settings = Settings {
        url: format!("{}/syukujitsu.csv", server.url()),
        cache_path: path.clone(),
        timeout_secs: 5,
    };
    let config = RunConfig {
        year: Some(2025),
        month: Some(1),
        source: DataSource::Refresh,
        json: false,
    };
    let mut console = Vec::new();
    let mut output = Vec::new();
    let outcome = Shell::new(settings, "".as_bytes(), &mut console, &mut output)
        .run(&config)
        .unwrap();

    mock.assert();
    assert_eq!(outcome, Outcome::Rendered);
    let console = String::from_utf8(console).unwrap();
    let output = String::from_utf8(output).unwrap();
    assert!(console.contains("ダウンロードエラー"));
    assert!(console.contains("祝日データを読み込みました: 2件"));
    assert!(!console.contains("祝日データなしで続行します。"));
    assert!(output.contains("   1日: 元日"));
    assert!(output.contains("  13日: 成人の日"));
    assert_eq!(fs::read_to_string(&path).unwrap(), CSV);
    let _ = fs::remove_dir_all(path.parent().unwrap());
}
