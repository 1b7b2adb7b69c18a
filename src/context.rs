//! Application Context
//!
//! Shared state provided via Leptos Context API: the login session and the
//! current route.

use leptos::prelude::*;

use crate::auth::{check_credentials, LoginError};
use crate::routes::{self, Page};

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Email of the signed-in user, None when logged out - read
    pub session: ReadSignal<Option<String>>,
    /// Email of the signed-in user - write
    set_session: WriteSignal<Option<String>>,
    /// Route parsed from the location hash
    pub route: ReadSignal<Page>,
    /// Bumped after any write so the dashboard counts refresh - read
    pub reload_trigger: ReadSignal<u32>,
    /// Bumped after any write - write
    set_reload_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(
        session: (ReadSignal<Option<String>>, WriteSignal<Option<String>>),
        route: ReadSignal<Page>,
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
    ) -> Self {
        Self {
            session: session.0,
            set_session: session.1,
            route,
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(Option::is_some)
    }

    /// Page to render after applying the login guard
    pub fn visible_page(&self) -> Page {
        routes::guard(self.route.get(), self.is_authenticated())
    }

    pub fn login(&self, email: &str, password: &str) -> Result<(), LoginError> {
        let user = check_credentials(email, password)?;
        web_sys::console::log_1(&format!("[AUTH] signed in as {}", user).into());
        self.set_session.set(Some(user));
        routes::navigate(Page::Dashboard);
        Ok(())
    }

    pub fn logout(&self) {
        self.set_session.set(None);
        routes::navigate(Page::Login);
    }

    /// Trigger a reload of dependent views
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
