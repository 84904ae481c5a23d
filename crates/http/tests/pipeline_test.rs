//! End-to-end request pipeline tests: resolution, negotiation, redirects,
//! screening, decoration, and the admin wallet flow.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use vitrine_core::content::Page;
use vitrine_core::layout::{Block, BlockKind, Col, Layout, Zone};
use vitrine_core::redirect::RedirectKey;
use vitrine_core::tenant::{Configuration, Domain, SecurityPolicy, TenantSnapshot, Website};
use vitrine_http::content_catalog::ContentCatalog;
use vitrine_http::session::SessionStore;
use vitrine_http::wallet_book::WalletBooks;
use vitrine_http::{create_router, AppState};
use vitrine_shared::types::WebsiteId;
use vitrine_shared::{AppConfig, Locale};
use vitrine_store::{FileCache, MemoryRedirectStore, RedirectEntry, TenantCatalog};

const SECURITY_TOKEN: &str = "testtok";

fn locale(tag: &str) -> Locale {
    Locale::parse(tag).unwrap()
}

fn app_config(debug: bool) -> AppConfig {
    serde_json::from_value(serde_json::json!({
        "server": {},
        "app": {
            "security_token": SECURITY_TOKEN,
            "debug": debug,
            "protocol": "https"
        },
        "cache": {}
    }))
    .unwrap()
}

/// Tenant "T1": locales [fr, en], default fr; `t1.example.com` fr-default
/// and `en.t1.example.com` en-default; pages `home` and `page` with a
/// one-block layout.
fn tenant_fixture(secure: bool) -> TenantSnapshot {
    let website = Website::new("T1", "t1");
    let id = website.id;

    let mut configuration = Configuration::new(id, locale("fr"));
    configuration.locales = vec![locale("fr"), locale("en")];
    configuration.online_locales = configuration.locales.clone();
    configuration.domains = vec![
        Domain::new_default("t1.example.com", locale("fr")),
        Domain::new_default("en.t1.example.com", locale("en")),
    ];
    configuration.validate().unwrap();

    let mut security = SecurityPolicy::new(id);
    security.secure_site = secure;

    TenantSnapshot {
        website,
        configuration,
        security,
    }
}

fn seed_content(content: &ContentCatalog, website_id: WebsiteId) {
    for slug in ["home", "page"] {
        let mut page = Page::new(slug).persisted();
        page.intls.ensure(&locale("fr"), &locale("fr")).title = Some(format!("{slug} fr"));
        page.intls.ensure(&locale("en"), &locale("fr")).title = Some(format!("{slug} en"));

        let mut layout = Layout::new(slug);
        let mut zone = Zone::new();
        let mut col = Col::new(12);
        let mut block = Block::new(BlockKind::Text).persisted();
        block.intls.ensure(&locale("fr"), &locale("fr")).body = Some("bloc".into());
        col.append_block(block);
        zone.append_col(col);
        layout.append_zone(zone);

        content.insert(website_id, slug, page, Some(layout));
    }
}

struct Fixture {
    router: Router,
    website_id: WebsiteId,
}

fn fixture_with(secure: bool, debug: bool, redirects: Vec<RedirectEntry>) -> Fixture {
    let tenant = tenant_fixture(secure);
    let website_id = tenant.website.id;

    let catalog = Arc::new(TenantCatalog::new());
    catalog.rebuild(vec![tenant]);

    let redirect_store = Arc::new(MemoryRedirectStore::new());
    redirect_store.rebuild(redirects);

    let content = Arc::new(ContentCatalog::new());
    seed_content(&content, website_id);

    let state = AppState {
        config: Arc::new(app_config(debug)),
        catalog,
        redirects: redirect_store,
        file_cache: Arc::new(FileCache::in_memory().unwrap()),
        sessions: Arc::new(SessionStore::new()),
        content,
        wallets: Arc::new(WalletBooks::new()),
    };

    Fixture {
        router: create_router(state),
        website_id,
    }
}

fn fixture() -> Fixture {
    fixture_with(false, false, Vec::new())
}

fn get(host: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::HOST, host)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_healthz_needs_no_tenant() {
    let response = fixture().router.oneshot(get("", "/healthz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_host_is_tenant_not_found() {
    let response = fixture()
        .router
        .oneshot(get("nope.example.com", "/fr/page"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "tenant_not_found");
}

#[tokio::test]
async fn test_locale_prefixed_request_redirects_to_locale_default_domain() {
    // https://t1.example.com/en/page negotiates `en` from the path and
    // must land on https://en.t1.example.com/page.
    let response = fixture()
        .router
        .oneshot(get("t1.example.com", "/en/page"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://en.t1.example.com/page"
    );
}

#[tokio::test]
async fn test_accept_language_drives_domain_canonicalization() {
    let mut request = get("t1.example.com", "/page");
    request
        .headers_mut()
        .insert(header::ACCEPT_LANGUAGE, "en;q=0.9, de".parse().unwrap());

    let response = fixture().router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://en.t1.example.com/page"
    );
}

#[tokio::test]
async fn test_front_render_carries_projection_and_headers() {
    let response = fixture()
        .router
        .oneshot(get("t1.example.com", "/fr/page"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers().clone();
    assert!(headers.get("server").is_none());
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert!(headers[header::CACHE_CONTROL]
        .to_str()
        .unwrap()
        .contains("max-age=3600"));
    let csp = headers["content-security-policy"].to_str().unwrap();
    assert!(csp.contains("'nonce-"));

    let body = json_body(response).await;
    assert_eq!(body["locale"], "fr");
    assert_eq!(body["timezone"], "Europe/Paris");
    assert_eq!(body["content"]["title"], "page fr");
    assert_eq!(body["layout"]["zones"][0]["cols"][0]["blocks"][0]["content"]["body"], "bloc");
}

#[tokio::test]
async fn test_missing_intl_renders_null_fields() {
    let fixture = fixture();

    // The en home page on the en domain, but with a page that only has
    // fr text: seed a fr-only page.
    let response = fixture
        .router
        .oneshot(get("en.t1.example.com", "/en/page"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["content"]["title"], "page en");
    // The layout block has no en record: null fields, not fr text.
    assert_eq!(
        body["layout"]["zones"][0]["cols"][0]["blocks"][0]["content"]["body"],
        serde_json::Value::Null
    );
}

#[tokio::test]
async fn test_debug_mode_omits_csp() {
    let response = fixture_with(false, true, Vec::new())
        .router
        .oneshot(get("t1.example.com", "/fr/page"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("content-security-policy").is_none());
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
}

#[tokio::test]
async fn test_xss_screen_rejects_query_payload() {
    let response = fixture()
        .router
        .oneshot(get("t1.example.com", "/fr/page?q=%3Cscript%3Ealert(1)%3C/script%3E"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["error"], "access_denied");
}

#[tokio::test]
async fn test_xss_screen_skips_admin_prefix() {
    // Same payload under the admin prefix passes the screen (and then
    // fails tenant resolution with 404, not 403).
    let response = fixture()
        .router
        .oneshot(get(
            "nope.example.com",
            &format!("/admin-{SECURITY_TOKEN}/website?q=%3Cscript%3E"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_banned_ip_gets_denied_page() {
    let tenant = {
        let mut tenant = tenant_fixture(false);
        tenant.configuration.ips_ban.push("203.0.113.7".parse().unwrap());
        tenant
    };
    let website_id = tenant.website.id;
    let catalog = Arc::new(TenantCatalog::new());
    catalog.rebuild(vec![tenant]);

    let content = Arc::new(ContentCatalog::new());
    seed_content(&content, website_id);

    let state = AppState {
        config: Arc::new(app_config(false)),
        catalog,
        redirects: Arc::new(MemoryRedirectStore::new()),
        file_cache: Arc::new(FileCache::in_memory().unwrap()),
        sessions: Arc::new(SessionStore::new()),
        content,
        wallets: Arc::new(WalletBooks::new()),
    };
    let router = create_router(state);

    let mut banned = get("t1.example.com", "/fr/page");
    banned
        .headers_mut()
        .insert("x-forwarded-for", "203.0.113.7".parse().unwrap());
    let response = router.clone().oneshot(banned).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let other = get("t1.example.com", "/fr/page");
    let response = router.oneshot(other).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_dev_list_overrides_ban() {
    let tenant = {
        let mut tenant = tenant_fixture(false);
        tenant.configuration.ips_ban.push("203.0.113.7".parse().unwrap());
        tenant.configuration.ips_dev.push("203.0.113.7".parse().unwrap());
        tenant
    };
    let website_id = tenant.website.id;
    let catalog = Arc::new(TenantCatalog::new());
    catalog.rebuild(vec![tenant]);
    let content = Arc::new(ContentCatalog::new());
    seed_content(&content, website_id);

    let state = AppState {
        config: Arc::new(app_config(false)),
        catalog,
        redirects: Arc::new(MemoryRedirectStore::new()),
        file_cache: Arc::new(FileCache::in_memory().unwrap()),
        sessions: Arc::new(SessionStore::new()),
        content,
        wallets: Arc::new(WalletBooks::new()),
    };

    let mut request = get("t1.example.com", "/fr/page");
    request
        .headers_mut()
        .insert("x-forwarded-for", "203.0.113.7".parse().unwrap());
    let response = create_router(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_legacy_redirect_fires_on_path_key() {
    let fixture = {
        let tenant = tenant_fixture(false);
        let key = RedirectKey {
            locale: locale("fr"),
            website_id: tenant.website.id,
            url: "/old".to_string(),
        };
        let website_id = tenant.website.id;
        let catalog = Arc::new(TenantCatalog::new());
        catalog.rebuild(vec![tenant]);
        let redirects = Arc::new(MemoryRedirectStore::new());
        redirects.rebuild(vec![RedirectEntry {
            key,
            target: "/fr/page".to_string(),
        }]);
        let content = Arc::new(ContentCatalog::new());
        seed_content(&content, website_id);

        create_router(AppState {
            config: Arc::new(app_config(false)),
            catalog,
            redirects,
            file_cache: Arc::new(FileCache::in_memory().unwrap()),
            sessions: Arc::new(SessionStore::new()),
            content,
            wallets: Arc::new(WalletBooks::new()),
        })
    };

    let response = fixture.oneshot(get("t1.example.com", "/old")).await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/fr/page");
}

#[tokio::test]
async fn test_session_keeps_negotiated_locale() {
    let Fixture { router, .. } = fixture();

    // First request negotiates en from browser headers on the en domain.
    let mut first = get("en.t1.example.com", "/en/page");
    first
        .headers_mut()
        .insert(header::ACCEPT_LANGUAGE, "en".parse().unwrap());
    let response = router.clone().oneshot(first).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers()[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    // Second request, no headers, no locale prefix: the session keeps en,
    // so the en-default domain serves without canonicalization.
    let mut second = get("en.t1.example.com", "/page");
    second
        .headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    let response = router.oneshot(second).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["locale"], "en");
}

#[tokio::test]
async fn test_secured_site_forces_login_route() {
    let response = fixture_with(true, false, Vec::new())
        .router
        .oneshot(get("t1.example.com", "/fr/page"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/fr/login");
}

// ============================================================================
// Admin wallet flow
// ============================================================================

fn admin_post(website_id: WebsiteId, path: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!(
            "/admin-{SECURITY_TOKEN}{path}?website={website_id}"
        ))
        .header(header::HOST, "t1.example.com")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn admin_delete(website_id: WebsiteId, path: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(format!(
            "/admin-{SECURITY_TOKEN}{path}?website={website_id}"
        ))
        .header(header::HOST, "t1.example.com")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_wallet_subcategory_deletion_reflows_positions() {
    let Fixture { router, website_id } = fixture();

    // Build type -> category -> four subcategories.
    let response = router
        .clone()
        .oneshot(admin_post(
            website_id,
            "/wallet/types",
            serde_json::json!({ "name": "Expenses" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let type_id = json_body(response).await["id"].as_str().unwrap().to_string();

    let response = router
        .clone()
        .oneshot(admin_post(
            website_id,
            &format!("/wallet/types/{type_id}/categories"),
            serde_json::json!({ "name": "Food" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let category_id = json_body(response).await["id"].as_str().unwrap().to_string();

    let mut subcategory_ids = Vec::new();
    for name in ["a", "b", "c", "d"] {
        let response = router
            .clone()
            .oneshot(admin_post(
                website_id,
                &format!("/wallet/types/{type_id}/categories/{category_id}/subcategories"),
                serde_json::json!({ "name": name }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        subcategory_ids.push(json_body(response).await["id"].as_str().unwrap().to_string());
    }

    // Delete the subcategory at position 2.
    let response = router
        .clone()
        .oneshot(admin_delete(
            website_id,
            &format!(
                "/wallet/types/{type_id}/categories/{category_id}/subcategories/{}",
                subcategory_ids[1]
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Survivors hold positions [1,2,3] in prior relative order.
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!(
                    "/admin-{SECURITY_TOKEN}/wallet?website={website_id}"
                ))
                .header(header::HOST, "t1.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let subcategories = &body["category_types"][0]["categories"][0]["subcategories"];
    let observed: Vec<(String, u64)> = subcategories
        .as_array()
        .unwrap()
        .iter()
        .map(|s| {
            (
                s["name"].as_str().unwrap().to_string(),
                s["position"].as_u64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        observed,
        vec![
            ("a".to_string(), 1),
            ("c".to_string(), 2),
            ("d".to_string(), 3)
        ]
    );
}

#[tokio::test]
async fn test_admin_preview_resolves_by_explicit_website() {
    let Fixture { router, website_id } = fixture();

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!(
                    "/admin-{SECURITY_TOKEN}/website?website={website_id}"
                ))
                .header(header::HOST, "unrelated.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["website"]["name"], "T1");
    // Admin chain ignores browser headers: tenant default locale.
    assert_eq!(body["locale"], "fr");
}
