use spa_auth::app_config::AppConfig;
use spa_auth::redirect::PageOrigin;
use spa_auth_cli::{CommandContext, authorize_url, check, options_json, providers_json};

fn context(config: AppConfig, default_base_path: Option<&str>) -> CommandContext {
    CommandContext {
        config,
        origin: PageOrigin::parse("https://app.example.com/login").expect("origin should parse"),
        default_base_path: default_base_path.map(str::to_string),
    }
}

fn github_config() -> AppConfig {
    AppConfig {
        provider: Some("github".to_string()),
        client_id: Some("abc".to_string()),
        github_url: Some("https://github.com".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_providers_json() {
    let output = providers_json(&context(github_config(), None)).expect("command should succeed");
    let json: serde_json::Value = serde_json::from_str(&output).expect("output should be JSON");
    assert_eq!(json["github"]["clientId"], "abc");
    assert_eq!(json["github"]["redirectUri"], "https://app.example.com");
    assert_eq!(json.as_object().map(|o| o.len()), Some(8));
}

#[test]
fn test_default_base_path_applies_to_redirect_uris() {
    let output =
        providers_json(&context(github_config(), Some("/app/"))).expect("command should succeed");
    let json: serde_json::Value = serde_json::from_str(&output).expect("output should be JSON");
    assert_eq!(json["github"]["redirectUri"], "https://app.example.com/app/");
    assert_eq!(
        json["pingfederate"]["redirectUri"],
        "https://app.example.com/app/"
    );
}

#[test]
fn test_options_json() {
    let output = options_json(&context(github_config(), None)).expect("command should succeed");
    let json: serde_json::Value = serde_json::from_str(&output).expect("output should be JSON");
    assert_eq!(json["storageNamespace"], "auth");
    assert_eq!(json["providers"]["github"]["name"], "GitHub");
}

#[test]
fn test_authorize_url() {
    let output =
        authorize_url(&context(github_config(), None), "github").expect("command should succeed");
    assert!(output.starts_with("https://github.com/login/oauth/authorize?response_type=code"));
    assert!(!output.contains("state:"));

    assert!(authorize_url(&context(github_config(), None), "basic").is_err());
    assert!(authorize_url(&context(github_config(), None), "azure").is_err());
}

#[test]
fn test_check() {
    assert_eq!(
        check(&context(github_config(), None)).expect("config should be clean"),
        "ok"
    );

    let config = AppConfig {
        provider: Some("keycloak".to_string()),
        ..Default::default()
    };
    let err = check(&context(config, None)).unwrap_err().to_string();
    assert!(err.contains("2 issue(s) found"));
    assert!(err.contains("no client id configured for active provider keycloak"));
}
