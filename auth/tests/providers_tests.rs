use spa_auth::app_config::AppConfig;
use spa_auth::provider::{DisplayMode, OAuthType, PopupOptions, ProviderKind, Scope};
use spa_auth::providers::{build_providers, resolve_client_id};
use spa_auth::redirect::PageOrigin;

fn origin() -> PageOrigin {
    PageOrigin::parse("https://app.example.com").expect("origin should parse")
}

fn config_with_all_client_ids() -> AppConfig {
    AppConfig {
        client_id: Some("shared".to_string()),
        azure_client_id: Some("azure-id".to_string()),
        cognito_client_id: Some("cognito-id".to_string()),
        github_client_id: Some("github-id".to_string()),
        gitlab_client_id: Some("gitlab-id".to_string()),
        google_client_id: Some("google-id".to_string()),
        keycloak_client_id: Some("keycloak-id".to_string()),
        openid_client_id: Some("openid-id".to_string()),
        pingfederate_client_id: Some("pingfederate-id".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_map_contains_exactly_the_eight_providers() {
    let providers = build_providers(&AppConfig::default(), &origin());
    let keys: Vec<ProviderKind> = providers.keys().copied().collect();
    assert_eq!(keys, ProviderKind::ALL.to_vec());
}

#[test]
fn test_active_provider_uses_shared_client_id() {
    for kind in ProviderKind::ALL {
        let mut config = config_with_all_client_ids();
        config.provider = Some(kind.key().to_string());
        let providers = build_providers(&config, &origin());

        for (other, provider) in &providers {
            if *other == kind {
                assert_eq!(provider.client_id.as_deref(), Some("shared"), "{other}");
            } else {
                let expected = format!("{other}-id");
                assert_eq!(provider.client_id.as_deref(), Some(expected.as_str()));
            }
        }
    }
}

#[test]
fn test_active_provider_without_shared_client_id_is_unconfigured() {
    let config = AppConfig {
        provider: Some("azure".to_string()),
        azure_client_id: Some("azure-id".to_string()),
        ..Default::default()
    };
    assert_eq!(resolve_client_id(&config, ProviderKind::Azure), None);
}

#[test]
fn test_unset_client_ids_stay_unset() {
    let providers = build_providers(&AppConfig::default(), &origin());
    assert!(providers.values().all(|p| p.client_id.is_none()));
}

#[test]
fn test_redirect_uri_without_base_path() {
    let providers = build_providers(&AppConfig::default(), &origin());
    for (kind, provider) in &providers {
        let expected = if *kind == ProviderKind::Pingfederate {
            "https://app.example.com/"
        } else {
            "https://app.example.com"
        };
        assert_eq!(provider.redirect_uri, expected, "{kind}");
    }
}

#[test]
fn test_redirect_uri_with_base_path() {
    let config = AppConfig {
        base_path: Some("/alerta".to_string()),
        ..Default::default()
    };
    let providers = build_providers(&config, &origin());
    assert!(
        providers
            .values()
            .all(|p| p.redirect_uri == "https://app.example.com/alerta")
    );
}

#[test]
fn test_empty_base_path_is_treated_as_unset() {
    let config = AppConfig {
        base_path: Some(String::new()),
        ..Default::default()
    };
    let providers = build_providers(&config, &origin());
    assert_eq!(
        providers[&ProviderKind::Azure].redirect_uri,
        "https://app.example.com"
    );
    assert_eq!(
        providers[&ProviderKind::Pingfederate].redirect_uri,
        "https://app.example.com/"
    );
}

#[test]
fn test_github_example() {
    let config = AppConfig {
        provider: Some("github".to_string()),
        client_id: Some("abc".to_string()),
        github_url: Some("https://github.com".to_string()),
        ..Default::default()
    };
    let providers = build_providers(&config, &origin());
    let github = &providers[&ProviderKind::Github];

    assert_eq!(github.name, "GitHub");
    assert_eq!(github.url, "/auth/github");
    assert_eq!(github.client_id.as_deref(), Some("abc"));
    assert_eq!(
        github.authorization_endpoint.as_deref(),
        Some("https://github.com/login/oauth/authorize")
    );
    assert_eq!(github.redirect_uri, "https://app.example.com");
    assert_eq!(github.scope, Some(Scope::list(&["user:email", "read:org"])));
    assert!(github.state.is_none());
    assert!(github.required_url_params.is_empty());
    assert!(github.popup_options.is_none());
}

#[test]
fn test_keycloak_example() {
    let config = AppConfig {
        provider: Some("google".to_string()),
        keycloak_client_id: Some("kc1".to_string()),
        keycloak_url: Some("https://kc.example.com".to_string()),
        keycloak_realm: Some("demo".to_string()),
        ..Default::default()
    };
    let providers = build_providers(&config, &origin());
    let keycloak = &providers[&ProviderKind::Keycloak];

    assert_eq!(keycloak.client_id.as_deref(), Some("kc1"));
    assert_eq!(
        keycloak.authorization_endpoint.as_deref(),
        Some("https://kc.example.com/auth/realms/demo/protocol/openid-connect/auth")
    );
}

#[test]
fn test_endpoint_templates() {
    let config = AppConfig {
        azure_tenant: Some("contoso".to_string()),
        cognito_domain: Some("myapp".to_string()),
        aws_region: Some("eu-west-1".to_string()),
        gitlab_url: Some("https://gitlab.com".to_string()),
        oidc_auth_url: Some("https://idp.example.com/authorize".to_string()),
        pingfederate_url: Some("https://pf.example.com/as/authorization.oauth2".to_string()),
        ..Default::default()
    };
    let providers = build_providers(&config, &origin());

    let endpoint = |kind: ProviderKind| providers[&kind].authorization_endpoint.clone();
    assert_eq!(
        endpoint(ProviderKind::Azure).as_deref(),
        Some("https://login.microsoftonline.com/contoso/oauth2/v2.0/authorize")
    );
    assert_eq!(
        endpoint(ProviderKind::Cognito).as_deref(),
        Some("https://myapp.auth.eu-west-1.amazoncognito.com/login")
    );
    assert_eq!(
        endpoint(ProviderKind::Gitlab).as_deref(),
        Some("https://gitlab.com/oauth/authorize")
    );
    assert_eq!(
        endpoint(ProviderKind::Openid).as_deref(),
        Some("https://idp.example.com/authorize")
    );
    assert_eq!(
        endpoint(ProviderKind::Pingfederate).as_deref(),
        Some("https://pf.example.com/as/authorization.oauth2")
    );
    assert_eq!(endpoint(ProviderKind::Google), None);
}

#[test]
fn test_endpoint_missing_template_fields() {
    let config = AppConfig {
        cognito_domain: Some("myapp".to_string()),
        keycloak_url: Some("https://kc.example.com".to_string()),
        ..Default::default()
    };
    let providers = build_providers(&config, &origin());
    assert_eq!(providers[&ProviderKind::Azure].authorization_endpoint, None);
    assert_eq!(providers[&ProviderKind::Cognito].authorization_endpoint, None);
    assert_eq!(providers[&ProviderKind::Keycloak].authorization_endpoint, None);
}

#[test]
fn test_popup_flow_providers() {
    let providers = build_providers(&AppConfig::default(), &origin());
    for kind in [
        ProviderKind::Azure,
        ProviderKind::Cognito,
        ProviderKind::Gitlab,
        ProviderKind::Keycloak,
        ProviderKind::Openid,
    ] {
        let provider = &providers[&kind];
        assert_eq!(provider.required_url_params, vec!["scope"], "{kind}");
        assert_eq!(provider.optional_url_params, vec!["display", "state"]);
        assert_eq!(provider.display, Some(DisplayMode::Popup));
        assert_eq!(provider.oauth_type, Some(OAuthType::OAuth2));
        assert_eq!(
            provider.popup_options,
            Some(PopupOptions {
                width: 1020,
                height: 618
            })
        );
        assert!(provider.generate_state().is_some());
    }
    assert_eq!(
        providers[&ProviderKind::Gitlab].scope,
        Some(Scope::list(&["openid"]))
    );
    assert_eq!(
        providers[&ProviderKind::Azure].scope,
        Some(Scope::joined("openid+profile+email"))
    );
}

#[test]
fn test_callback_paths_and_names() {
    let providers = build_providers(&AppConfig::default(), &origin());
    let paths: Vec<(&str, &str)> = providers
        .values()
        .map(|p| (p.name.as_str(), p.url.as_str()))
        .collect();
    assert_eq!(
        paths,
        vec![
            ("Azure Active Directory", "/auth/azure"),
            ("Amazon Cognito", "/auth/openid"),
            ("GitHub", "/auth/github"),
            ("GitLab", "/auth/gitlab"),
            ("Google", "/auth/google"),
            ("Keycloak", "/auth/keycloak"),
            ("OpenID", "/auth/openid"),
            ("PingFederate", "/auth/pingfederate"),
        ]
    );
}

#[test]
fn test_google_delegates_to_library_defaults() {
    let providers = build_providers(&AppConfig::default(), &origin());
    let google = &providers[&ProviderKind::Google];
    assert_eq!(google.authorization_endpoint, None);
    assert_eq!(google.scope, None);
    assert_eq!(google.state, None);
    assert_eq!(google.display, None);
}

#[test]
fn test_pingfederate_settings() {
    let providers = build_providers(&AppConfig::default(), &origin());
    let ping = &providers[&ProviderKind::Pingfederate];
    assert_eq!(ping.required_url_params, vec!["pfidpadapterid", "scope"]);
    assert!(ping.optional_url_params.is_empty());
    assert_eq!(
        ping.extra_params.get("pfidpadapterid").map(String::as_str),
        Some("kerberos")
    );
    assert_eq!(ping.oauth_type, Some(OAuthType::OAuth2));
    assert_eq!(ping.popup_options, None);
    assert_eq!(ping.state, None);
}

#[test]
fn test_provider_map_serializes_with_library_field_names() {
    let config = AppConfig {
        provider: Some("github".to_string()),
        client_id: Some("abc".to_string()),
        github_url: Some("https://github.com".to_string()),
        ..Default::default()
    };
    let providers = build_providers(&config, &origin());
    let json = serde_json::to_value(&providers).expect("serialization should succeed");

    assert_eq!(
        json["github"],
        serde_json::json!({
            "name": "GitHub",
            "url": "/auth/github",
            "clientId": "abc",
            "authorizationEndpoint": "https://github.com/login/oauth/authorize",
            "redirectUri": "https://app.example.com",
            "scope": ["user:email", "read:org"]
        })
    );
    assert_eq!(json["keycloak"]["popupOptions"]["width"], 1020);
    assert_eq!(json["keycloak"]["oauthType"], "2.0");
    assert_eq!(json["pingfederate"]["pfidpadapterid"], "kerberos");
    assert!(json["keycloak"].get("state").is_none());
}
