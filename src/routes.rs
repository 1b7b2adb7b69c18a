//! Hash Routing
//!
//! `#/inventory` style routes mapped to pages, plus the login guard.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Profile,
    Stock,
    Produksi,
    Overhaul,
    Rekayasa,
    Kalibrasi,
    Inventory,
    Qc,
    Personalia,
    Login,
    NotFound,
}

impl Page {
    /// Pages listed in the navigation frame, in menu order
    pub const MENU: [Page; 10] = [
        Page::Dashboard,
        Page::Profile,
        Page::Stock,
        Page::Produksi,
        Page::Overhaul,
        Page::Rekayasa,
        Page::Kalibrasi,
        Page::Inventory,
        Page::Qc,
        Page::Personalia,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Dashboard => "/",
            Page::Profile => "/profile",
            Page::Stock => "/stock",
            Page::Produksi => "/produksi",
            Page::Overhaul => "/overhaul",
            Page::Rekayasa => "/rekayasa",
            Page::Kalibrasi => "/kalibrasi",
            Page::Inventory => "/inventory",
            Page::Qc => "/qc",
            Page::Personalia => "/personalia",
            Page::Login => "/login",
            Page::NotFound => "/404",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Profile => "Profil",
            Page::Stock => "Stok",
            Page::Produksi => "Produksi",
            Page::Overhaul => "Overhaul",
            Page::Rekayasa => "Rekayasa",
            Page::Kalibrasi => "Kalibrasi",
            Page::Inventory => "Inventaris",
            Page::Qc => "Quality Control",
            Page::Personalia => "Personalia",
            Page::Login => "Masuk",
            Page::NotFound => "Tidak Ditemukan",
        }
    }

    /// Parse `location.hash`, with or without the leading `#`
    pub fn from_hash(hash: &str) -> Page {
        let path = hash.trim_start_matches('#');
        let path = path.split(['?', '#']).next().unwrap_or("");
        let path = path.trim_end_matches('/');
        if path.is_empty() || path == "/dashboard" {
            return Page::Dashboard;
        }
        Self::MENU
            .into_iter()
            .chain([Page::Login])
            .find(|p| p.path() == path)
            .unwrap_or(Page::NotFound)
    }

    pub fn href(&self) -> String {
        format!("#{}", self.path())
    }
}

/// Page actually shown for a requested route
pub fn guard(requested: Page, authenticated: bool) -> Page {
    match (requested, authenticated) {
        (Page::Login, true) => Page::Dashboard,
        (Page::Login, false) => Page::Login,
        (_, false) => Page::Login,
        (page, true) => page,
    }
}

fn current_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

/// Signal tracking the current hash route
pub fn use_hash_route() -> ReadSignal<Page> {
    let (page, set_page) = signal(Page::from_hash(&current_hash()));
    let handle = window_event_listener(leptos::ev::hashchange, move |_| {
        set_page.set(Page::from_hash(&current_hash()));
    });
    on_cleanup(move || handle.remove());
    page
}

/// Navigate by rewriting the hash; the hashchange listener updates the route
pub fn navigate(page: Page) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_hash(page.path());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hash() {
        assert_eq!(Page::from_hash(""), Page::Dashboard);
        assert_eq!(Page::from_hash("#/"), Page::Dashboard);
        assert_eq!(Page::from_hash("#/inventory"), Page::Inventory);
        assert_eq!(Page::from_hash("#/qc/"), Page::Qc);
        assert_eq!(Page::from_hash("/personalia?x=1"), Page::Personalia);
        assert_eq!(Page::from_hash("#/login"), Page::Login);
        assert_eq!(Page::from_hash("#/nowhere"), Page::NotFound);
    }

    #[test]
    fn test_menu_paths_round_trip() {
        for page in Page::MENU {
            assert_eq!(Page::from_hash(&page.href()), page);
        }
    }

    #[test]
    fn test_guard_redirects_to_login() {
        assert_eq!(guard(Page::Inventory, false), Page::Login);
        assert_eq!(guard(Page::NotFound, false), Page::Login);
        assert_eq!(guard(Page::Login, false), Page::Login);
        assert_eq!(guard(Page::Login, true), Page::Dashboard);
        assert_eq!(guard(Page::Qc, true), Page::Qc);
        assert_eq!(guard(Page::NotFound, true), Page::NotFound);
    }
}
