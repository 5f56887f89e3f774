//! Integration test helpers for the Total Aéreas site.
//!
//! Each test starts its own server on an ephemeral port with short mock
//! delays and drives it over HTTP, the way a browser would. Redirects are not
//! followed automatically so tests can assert on them.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p total-aereas-integration-tests
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode, header::LOCATION, redirect};

use total_aereas_site::config::{MockDelays, SiteConfig};
use total_aereas_site::state::AppState;

/// Identity provider latency used by test servers.
pub const AUTH_DELAY: Duration = Duration::from_millis(10);

/// Product store latency used by test servers.
pub const CATALOG_DELAY: Duration = Duration::from_millis(150);

/// A site running in the background plus a browser-like client.
pub struct TestSite {
    pub addr: SocketAddr,
    pub client: Client,
}

/// Start the site on `127.0.0.1` with an ephemeral port.
///
/// # Panics
///
/// Panics if the listener cannot be bound or the client cannot be built.
pub async fn spawn_site() -> TestSite {
    let config = SiteConfig {
        port: 0,
        static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../site/static")),
        delays: MockDelays {
            auth: AUTH_DELAY,
            catalog: CATALOG_DELAY,
        },
        ..SiteConfig::default()
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");

    let app = total_aereas_site::app(AppState::new(config));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test site");
    });

    TestSite {
        addr,
        client: browser(),
    }
}

/// A client that keeps cookies and does not follow redirects.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn browser() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
        .expect("build HTTP client")
}

impl TestSite {
    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// GET `path`.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request")
    }

    /// POST `fields` to `path` as a urlencoded form.
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(fields)
            .send()
            .await
            .expect("POST request")
    }

    /// GET `path` and return the status and body.
    pub async fn page(&self, path: &str) -> (StatusCode, String) {
        let response = self.get(path).await;
        let status = response.status();
        (status, response.text().await.expect("response body"))
    }

    /// Assert `response` is a 303 and GET its target, returning the body.
    pub async fn follow(&self, response: Response) -> String {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = redirect_target(&response);
        let (status, body) = self.page(&location).await;
        assert_eq!(status, StatusCode::OK, "GET {location}");
        body
    }

    /// Sign in as the demo identity, which created the seeded products.
    pub async fn sign_in_demo(&self) {
        let response = self.post_form("/login/demo", &[]).await;
        assert_eq!(redirect_target(&response), "/dashboard");
    }

    /// Sign in with an email and password.
    pub async fn sign_in(&self, email: &str, password: &str) {
        let response = self
            .post_form("/login", &[("email", email), ("password", password)])
            .await;
        assert_eq!(redirect_target(&response), "/dashboard");
    }
}

/// The `Location` header of a redirect.
///
/// # Panics
///
/// Panics if the header is missing.
#[must_use]
pub fn redirect_target(response: &Response) -> String {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("redirect location")
        .to_owned()
}

/// Number of product cards rendered on a dashboard page.
#[must_use]
pub fn product_cards(body: &str) -> usize {
    body.matches("data-product-id=").count()
}

/// Whether the dashboard shows a card for product `id`.
#[must_use]
pub fn has_product(body: &str, id: &str) -> bool {
    body.contains(&format!("data-product-id=\"{id}\""))
}
