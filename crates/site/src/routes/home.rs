//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tower_sessions::Session;
use tracing::instrument;

use total_aereas_core::{Page, Section};

use super::Layout;
use super::contact::ContactForm;
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;

// =============================================================================
// Static Content
// =============================================================================

/// A service card in the services section.
pub struct Service {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
}

/// A platform card in the fleet section.
pub struct FleetItem {
    pub name: &'static str,
    pub image: &'static str,
    pub description: &'static str,
    pub specs: &'static str,
}

/// A headline figure in the about section.
pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
}

/// Service cards, in display order.
pub const SERVICES: [Service; 4] = [
    Service {
        icon: "🔧",
        title: "Plataformas Tesouras",
        description: "Ideais para trabalhos em superfícies niveladas e espaços confinados, com excelente capacidade de carga.",
        features: &["Altura até 15m", "Capacidade 230kg", "Operação elétrica"],
    },
    Service {
        icon: "🏗️",
        title: "Plataformas Articuladas",
        description: "Perfeitas para alcançar locais de difícil acesso, com grande versatilidade em manobras.",
        features: &["Altura até 20m", "Alcance 12m", "4x4 disponível"],
    },
    Service {
        icon: "🏢",
        title: "Plataformas Telescópicas",
        description: "Para grandes alturas e alcance horizontal, ideais para obras de grande porte.",
        features: &["Altura até 40m", "Alcance 22m", "Capacidade 300kg"],
    },
    Service {
        icon: "🛠️",
        title: "Suporte Técnico",
        description: "Equipe especializada para manutenção e assistência técnica completa.",
        features: &["24h disponível", "Técnicos certificados", "Peças originais"],
    },
];

/// Fleet cards, in display order.
pub const FLEET: [FleetItem; 4] = [
    FleetItem {
        name: "Tesoura Elétrica 12m",
        image: "/placeholder.svg?height=256&width=400",
        description: "Ideal para ambientes internos e pisos planos.",
        specs: "12m altura • 230kg • Elétrica",
    },
    FleetItem {
        name: "Articulada Diesel 16m",
        image: "/placeholder.svg?height=256&width=400",
        description: "Para terrenos irregulares e alto alcance.",
        specs: "16m altura • 12m alcance • Diesel",
    },
    FleetItem {
        name: "Telescópica 28m",
        image: "/placeholder.svg?height=256&width=400",
        description: "Máximo alcance para grandes projetos.",
        specs: "28m altura • 18m alcance • 300kg",
    },
    FleetItem {
        name: "Tesoura Compacta 8m",
        image: "/placeholder.svg?height=256&width=400",
        description: "Manobras fáceis em espaços reduzidos.",
        specs: "8m altura • 180kg • Compacta",
    },
];

/// About section figures.
pub const STATS: [Stat; 2] = [
    Stat {
        value: "20+",
        label: "Anos de Experiência",
    },
    Stat {
        value: "500+",
        label: "Projetos Realizados",
    },
];

// =============================================================================
// Templates
// =============================================================================

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub services: &'static [Service],
    pub fleet: &'static [FleetItem],
    pub stats: &'static [Stat],
    /// Values shown in the contact form.
    pub contact: ContactForm,
    /// Anchor of the "Saiba Mais" button.
    pub about_href: String,
}

impl HomeTemplate {
    /// Home page with the given contact form values.
    #[must_use]
    pub fn new(layout: Layout, contact: ContactForm) -> Self {
        Self {
            layout,
            services: &SERVICES,
            fleet: &FLEET,
            stats: &STATS,
            contact,
            about_href: Section::About.href(),
        }
    }
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Display the home page.
#[instrument(skip_all)]
pub async fn home(
    OptionalAuth(user): OptionalAuth,
    session: Session,
) -> Result<impl IntoResponse> {
    let layout = Layout::load(&session, user, Some(Page::Home)).await?;
    Ok(HomeTemplate::new(layout, ContactForm::default()))
}
