//! Integration tests for the product dashboard.
//!
//! Requirements covered:
//! - Only signed-in visitors reach the dashboard
//! - The first visit shows the three seeded products after the store delay
//! - Adding validates input and appends exactly one product
//! - Only the creator may delete a product, and deleting removes only it

use std::time::Instant;

use reqwest::StatusCode;

use total_aereas_integration_tests::{
    CATALOG_DELAY, has_product, product_cards, redirect_target, spawn_site,
};

const NEW_PRODUCT: [(&str, &str); 4] = [
    ("name", "Plataforma Articulada 16m"),
    ("description", "Alcance lateral para fachadas."),
    ("price", "450"),
    ("image", "https://cdn.example.com/articulada.png"),
];

#[tokio::test]
async fn test_dashboard_requires_sign_in() {
    let site = spawn_site().await;

    let response = site.get("/dashboard").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(redirect_target(&response), "/login");

    let (_, body) = site.page("/login").await;
    assert!(body.contains("Você precisa estar logado para acessar o painel de produtos."));
}

#[tokio::test]
async fn test_first_visit_shows_seeded_products() {
    let site = spawn_site().await;
    site.sign_in_demo().await;

    let started = Instant::now();
    let (status, body) = site.page("/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert!(started.elapsed() >= CATALOG_DELAY);
    assert_eq!(product_cards(&body), 3);
    for id in ["1", "2", "3"] {
        assert!(has_product(&body, id), "missing seeded product {id}");
    }
    assert!(body.contains("Plataforma Tesoura Elétrica Compacta"));
}

#[tokio::test]
async fn test_add_with_missing_fields_changes_nothing() {
    let site = spawn_site().await;
    site.sign_in_demo().await;

    let response = site
        .post_form(
            "/dashboard/products",
            &[("name", "Plataforma Sem Foto"), ("description", "Sem imagem."), ("image", "")],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("body");
    assert!(body.contains("Por favor, preencha todos os campos obrigatórios."));
    assert!(body.contains("value=\"Plataforma Sem Foto\""));
    assert_eq!(product_cards(&body), 3);

    let (_, body) = site.page("/dashboard").await;
    assert_eq!(product_cards(&body), 3);
}

#[tokio::test]
async fn test_add_appends_one_product_and_clears_form() {
    let site = spawn_site().await;
    site.sign_in_demo().await;

    let response = site.post_form("/dashboard/products", &NEW_PRODUCT).await;
    let body = site.follow(response).await;

    assert!(body.contains("Produto adicionado com sucesso!"));
    assert_eq!(product_cards(&body), 4);
    assert!(body.contains("Plataforma Articulada 16m"));
    assert!(body.contains("<span class=\"price\">450</span>"));
    assert!(body.contains("name=\"name\" value=\"\""));
}

#[tokio::test]
async fn test_delete_removes_only_that_product() {
    let site = spawn_site().await;
    site.sign_in_demo().await;

    let response = site.post_form("/dashboard/products/2/delete", &[]).await;
    let body = site.follow(response).await;

    assert!(body.contains("Produto excluído com sucesso!"));
    assert_eq!(product_cards(&body), 2);
    assert!(has_product(&body, "1"));
    assert!(!has_product(&body, "2"));
    assert!(has_product(&body, "3"));
}

#[tokio::test]
async fn test_delete_unknown_product_is_not_found() {
    let site = spawn_site().await;
    site.sign_in_demo().await;

    let response = site.post_form("/dashboard/products/999/delete", &[]).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_only_creator_may_delete() {
    let site = spawn_site().await;
    site.sign_in("joana@obra.com", "segredo1").await;

    let (_, body) = site.page("/dashboard").await;
    assert_eq!(product_cards(&body), 3);
    assert!(!body.contains("/delete\""));

    let response = site.post_form("/dashboard/products/1/delete", &[]).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let (_, body) = site.page("/dashboard").await;
    assert_eq!(product_cards(&body), 3);
}

#[tokio::test]
async fn test_quote_request_names_product() {
    let site = spawn_site().await;
    site.sign_in_demo().await;

    let response = site.post_form("/dashboard/products/3/quote", &[]).await;
    let body = site.follow(response).await;

    assert!(body.contains("Orçamento solicitado para"));
    assert_eq!(product_cards(&body), 3);
}

#[tokio::test]
async fn test_list_resets_after_logout() {
    let site = spawn_site().await;
    site.sign_in_demo().await;

    let response = site.post_form("/dashboard/products/1/delete", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = site.post_form("/logout", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    site.sign_in_demo().await;
    let (_, body) = site.page("/dashboard").await;
    assert_eq!(product_cards(&body), 3);
}

#[tokio::test]
async fn test_switching_user_reseeds_list() {
    let site = spawn_site().await;
    site.sign_in_demo().await;

    let response = site.post_form("/dashboard/products/2/delete", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    site.sign_in("joana@obra.com", "segredo1").await;
    let (_, body) = site.page("/dashboard").await;

    assert_eq!(product_cards(&body), 3);
    assert!(has_product(&body, "2"));
}

#[tokio::test]
async fn test_same_user_sign_in_keeps_list() {
    let site = spawn_site().await;
    site.sign_in_demo().await;

    let response = site.post_form("/dashboard/products/2/delete", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    site.sign_in_demo().await;
    let (_, body) = site.page("/dashboard").await;

    assert_eq!(product_cards(&body), 2);
    assert!(!has_product(&body, "2"));
}
