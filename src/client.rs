// src/client.rs
//! HTTP-backed [`Portal`] for Wirtualna Uczelnia.

use reqwest::Url;
use reqwest::blocking::Client;

use crate::config::consts::MARKS_PATH;
use crate::config::options::PortalOptions;
use crate::core::net;
use crate::grades::GradeRow;
use crate::portal::{Credentials, Portal, PortalError};
use crate::specs::login::{self, LoginForm};
use crate::specs::marks;

pub struct WuClient {
    url: Url,
    options: PortalOptions,
}

/// A logged-in session: the client holding the auth cookies.
pub struct WuSession {
    client: Client,
}

impl WuClient {
    pub fn new(options: PortalOptions) -> Result<Self, PortalError> {
        let url = net::parse_url(&options.url)?;
        Ok(Self { url, options })
    }

    /// Grades page address: the portal URL with `/OcenyP.aspx` appended.
    pub fn marks_url(&self) -> Result<Url, PortalError> {
        let base = self.url.as_str().trim_end_matches('/');
        net::parse_url(&join!(base, MARKS_PATH))
    }
}

impl Portal for WuClient {
    type Session = WuSession;

    fn authenticate(&self, credentials: &Credentials) -> Result<WuSession, PortalError> {
        let client = net::client(self.options.timeout)?;

        let page = net::http_get(&client, self.url.clone())?;
        let form = LoginForm::parse(&page.body)?;
        logd!("login form: {} hidden fields, action {:?}", form.hidden.len(), form.action);

        let target = net::resolve(&page.url, &form.action)?;
        let reply = net::http_post_form(&client, target, &form.fields(credentials))?;

        if login::shows_login_form(&reply.body) {
            loge!("Login page returned again for {}", credentials.login);
            return Err(PortalError::LoginRejected(credentials.login.clone()));
        }
        Ok(WuSession { client })
    }

    fn fetch_grades_rows(&self, session: &WuSession) -> Result<Vec<GradeRow>, PortalError> {
        let page = net::http_get(&session.client, self.marks_url()?)?;
        Ok(marks::extract_rows(&page.body)?)
    }
}
