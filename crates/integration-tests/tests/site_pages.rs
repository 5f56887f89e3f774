//! Integration tests for the public pages.
//!
//! Covers the home page sections, the contact form, the generated placeholder
//! image, the health check and the not-found view.

use reqwest::StatusCode;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};

use total_aereas_integration_tests::{redirect_target, spawn_site};
use total_aereas_site::STATIC_CACHE_CONTROL;

#[tokio::test]
async fn test_health_check() {
    let site = spawn_site().await;

    let (status, body) = site.page("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_home_renders_every_section() {
    let site = spawn_site().await;

    let (status, body) = site.page("/").await;

    assert_eq!(status, StatusCode::OK);
    for anchor in ["id=\"about\"", "id=\"services\"", "id=\"fleet\"", "id=\"contact\""] {
        assert!(body.contains(anchor), "missing section {anchor}");
    }
    assert!(body.contains("Nossa Frota"));
    assert!(body.contains("Entrar"));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let site = spawn_site().await;

    let (status, body) = site.page("/orcamentos").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Página não encontrada."));
}

#[tokio::test]
async fn test_incomplete_contact_form_keeps_values() {
    let site = spawn_site().await;

    let response = site
        .post_form(
            "/contact",
            &[("name", "Carlos"), ("email", ""), ("phone", ""), ("message", "Preciso de uma tesoura")],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("body");
    assert!(body.contains("Por favor, preencha todos os campos obrigatórios."));
    assert!(body.contains("value=\"Carlos\""));
    assert!(body.contains("Preciso de uma tesoura"));
}

#[tokio::test]
async fn test_contact_form_confirms_once() {
    let site = spawn_site().await;

    let response = site
        .post_form(
            "/contact",
            &[
                ("name", "Carlos"),
                ("email", "carlos@obra.com"),
                ("phone", ""),
                ("message", "Preciso de uma tesoura"),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(redirect_target(&response), "/#contact");

    let (_, body) = site.page("/").await;
    assert!(body.contains("Mensagem enviada com sucesso!"));

    // The notice is consumed by the first page that shows it.
    let (_, body) = site.page("/").await;
    assert!(!body.contains("Mensagem enviada com sucesso!"));
}

#[tokio::test]
async fn test_placeholder_uses_requested_size() {
    let site = spawn_site().await;

    let response = site.get("/placeholder.svg?height=120&width=300").await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(content_type.as_deref(), Some("image/svg+xml"));

    let body = response.text().await.expect("body");
    assert!(body.contains("width=\"300\""));
    assert!(body.contains("height=\"120\""));
}

#[tokio::test]
async fn test_stylesheet_is_cacheable() {
    let site = spawn_site().await;

    let response = site.get("/static/css/main.css").await;

    assert_eq!(response.status(), StatusCode::OK);
    let cache_control = response
        .headers()
        .get(CACHE_CONTROL)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(cache_control.as_deref(), Some(STATIC_CACHE_CONTROL));
}

#[tokio::test]
async fn test_pages_are_not_cached() {
    let site = spawn_site().await;

    let response = site.get("/").await;

    let cache_control = response
        .headers()
        .get(CACHE_CONTROL)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(cache_control.as_deref(), Some("no-store, max-age=0"));
}
