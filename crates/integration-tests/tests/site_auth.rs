//! Integration tests for sign-in, registration and logout.
//!
//! Requirements covered:
//! - Rejected forms re-render with a notice and never reach the provider
//! - Successful sign-ins land on the dashboard with a one-time notice
//! - Logout drops the session and sends the visitor home

use reqwest::StatusCode;

use total_aereas_integration_tests::{redirect_target, spawn_site};

#[tokio::test]
async fn test_login_page_offers_every_method() {
    let site = spawn_site().await;

    let (status, body) = site.page("/login").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Google"));
    assert!(body.contains("Facebook"));
    assert!(body.contains("action=\"/login/demo\""));
}

#[tokio::test]
async fn test_login_with_blank_password_is_rejected() {
    let site = spawn_site().await;

    let response = site
        .post_form("/login", &[("email", "joana@obra.com"), ("password", "")])
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("body");
    assert!(body.contains("Por favor, preencha todos os campos obrigatórios."));
    assert!(body.contains("value=\"joana@obra.com\""));

    let response = site.get("/dashboard").await;
    assert_eq!(redirect_target(&response), "/login");
}

#[tokio::test]
async fn test_login_greets_by_email_name() {
    let site = spawn_site().await;

    let response = site
        .post_form("/login", &[("email", "joana@obra.com"), ("password", "segredo1")])
        .await;
    let body = site.follow(response).await;

    assert!(body.contains("Login realizado com sucesso!"));
    assert!(body.contains("Bem-vindo, <span class=\"user-name\">joana</span>!"));
}

#[tokio::test]
async fn test_register_reports_password_mismatch() {
    let site = spawn_site().await;

    let response = site
        .post_form(
            "/register",
            &[
                ("email", "novo@obra.com"),
                ("password", "segredo1"),
                ("password_confirm", "segredo2"),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("body");
    assert!(body.contains("As senhas não coincidem."));

    let response = site.get("/dashboard").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_register_reports_short_password() {
    let site = spawn_site().await;

    let response = site
        .post_form(
            "/register",
            &[
                ("email", "novo@obra.com"),
                ("password", "12345"),
                ("password_confirm", "12345"),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("body");
    assert!(body.contains("A senha deve ter pelo menos 6 caracteres."));
}

#[tokio::test]
async fn test_register_signs_in() {
    let site = spawn_site().await;

    let response = site
        .post_form(
            "/register",
            &[
                ("email", "novo@obra.com"),
                ("password", "segredo1"),
                ("password_confirm", "segredo1"),
            ],
        )
        .await;
    let body = site.follow(response).await;

    assert!(body.contains("Conta criada com sucesso!"));
    assert!(body.contains("Painel de Controle"));
}

#[tokio::test]
async fn test_social_login_names_provider() {
    let site = spawn_site().await;

    let response = site.post_form("/login/social/google", &[]).await;
    let body = site.follow(response).await;

    assert!(body.contains("Login com Google realizado com sucesso!"));
    assert!(body.contains("Usuário Social"));
}

#[tokio::test]
async fn test_unknown_social_provider_is_bad_request() {
    let site = spawn_site().await;

    let response = site.post_form("/login/social/orkut", &[]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_demo_login_uses_demo_identity() {
    let site = spawn_site().await;

    site.sign_in_demo().await;
    let (_, body) = site.page("/dashboard").await;

    assert!(body.contains("mock-user-123"));
    assert!(body.contains("Usuário Anônimo"));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let site = spawn_site().await;
    site.sign_in("joana@obra.com", "segredo1").await;

    let response = site.post_form("/logout", &[]).await;
    assert_eq!(redirect_target(&response), "/");

    let (_, body) = site.page("/").await;
    assert!(body.contains("Você foi desconectado com sucesso."));
    assert!(!body.contains("action=\"/logout\""));

    let response = site.get("/dashboard").await;
    assert_eq!(redirect_target(&response), "/login");
}
