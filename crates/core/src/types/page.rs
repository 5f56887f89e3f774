//! Page and section selectors.
//!
//! The site has four top-level views. [`Page`] names them and maps them to
//! routes; [`Page::resolve`] holds the single navigation guard (the dashboard
//! needs a signed-in user). [`Section`] names the anchors on the home page.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Notice shown when the dashboard is requested without a session.
pub const LOGIN_REQUIRED_NOTICE: &str =
    "Você precisa estar logado para acessar o painel de produtos.";

/// A top-level view of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Home,
    Login,
    Register,
    Dashboard,
}

/// Outcome of resolving a page request against the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Render the requested page.
    Render(Page),
    /// Send the visitor elsewhere, showing a notice.
    Redirect {
        to: Page,
        notice: &'static str,
    },
}

impl Page {
    /// Route path for this page.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
        }
    }

    /// Whether this page needs a signed-in user.
    #[must_use]
    pub const fn requires_session(self) -> bool {
        matches!(self, Self::Dashboard)
    }

    /// Decide what to show for a request of this page.
    #[must_use]
    pub const fn resolve(self, authenticated: bool) -> Navigation {
        if self.requires_session() && !authenticated {
            Navigation::Redirect {
                to: Self::Login,
                notice: LOGIN_REQUIRED_NOTICE,
            }
        } else {
            Navigation::Render(self)
        }
    }

    /// Stable lowercase name (`home`, `login`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::Register => "register",
            Self::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An anchored section of the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    About,
    Services,
    Fleet,
    Contact,
}

impl Section {
    /// All sections, in page order.
    pub const ALL: [Self; 4] = [Self::About, Self::Services, Self::Fleet, Self::Contact];

    /// Element id of the section on the home page.
    #[must_use]
    pub const fn anchor(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Services => "services",
            Self::Fleet => "fleet",
            Self::Contact => "contact",
        }
    }

    /// Navigation label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::About => "Sobre Nós",
            Self::Services => "Serviços",
            Self::Fleet => "Produtos",
            Self::Contact => "Contato",
        }
    }

    /// Link that opens the home page scrolled to this section.
    #[must_use]
    pub fn href(self) -> String {
        format!("{}#{}", Page::Home.path(), self.anchor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_distinct() {
        let pages = [Page::Home, Page::Login, Page::Register, Page::Dashboard];
        for (i, page) in pages.iter().enumerate() {
            for other in pages.iter().skip(i + 1) {
                assert_ne!(page.path(), other.path());
                assert_ne!(page.as_str(), other.as_str());
            }
        }
    }

    #[test]
    fn test_dashboard_requires_session() {
        assert_eq!(
            Page::Dashboard.resolve(false),
            Navigation::Redirect {
                to: Page::Login,
                notice: LOGIN_REQUIRED_NOTICE,
            }
        );
        assert_eq!(
            Page::Dashboard.resolve(true),
            Navigation::Render(Page::Dashboard)
        );
    }

    #[test]
    fn test_public_pages_always_render() {
        for page in [Page::Home, Page::Login, Page::Register] {
            assert_eq!(page.resolve(false), Navigation::Render(page));
            assert_eq!(page.resolve(true), Navigation::Render(page));
        }
    }

    #[test]
    fn test_section_href() {
        assert_eq!(Section::Fleet.href(), "/#fleet");
        assert_eq!(Section::Contact.anchor(), "contact");
    }
}
