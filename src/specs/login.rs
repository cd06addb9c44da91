// src/specs/login.rs
//! Scraping spec for the login form.
//!
//! The portal is an ASP.NET WebForms site: the form posts back to itself and
//! must carry every hidden field (`__VIEWSTATE`, `__EVENTVALIDATION`, ...)
//! alongside the credentials. Inputs are found by control id; the POST body
//! uses their `name` attributes, which differ from the ids.

use crate::config::consts::{LOGIN_BUTTON_ID, LOGIN_FIELD_ID, PASSWORD_FIELD_ID};
use crate::core::html::{self, attr, find_open_tag_by_id};
use crate::core::sanitize::normalize_entities;
use crate::portal::Credentials;

use super::PageError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    /// Raw `action` attribute, empty when the form posts to its own URL.
    pub action: String,
    pub hidden: Vec<(String, String)>,
    pub login_name: String,
    pub password_name: String,
    /// `name=value` of the submit button, sent as if it was clicked.
    pub button: (String, String),
}

impl LoginForm {
    /// Locate the login form in the portal's main page.
    pub fn parse(doc: &str) -> Result<LoginForm, PageError> {
        let login_name = input_name(doc, LOGIN_FIELD_ID)?;
        let password_name = input_name(doc, PASSWORD_FIELD_ID)?;

        let button_tag = find_open_tag_by_id(doc, "input", LOGIN_BUTTON_ID)
            .ok_or_else(|| not_found(LOGIN_BUTTON_ID))?;
        let button_name = attr(button_tag, "name")
            .ok_or_else(|| missing_name(LOGIN_BUTTON_ID))?;
        let button_value = attr(button_tag, "value").unwrap_or("");

        // The form that holds the login field; ASP.NET pages have exactly one
        let form = html::tag_blocks_ci(doc, "form")
            .into_iter()
            .find(|f| find_open_tag_by_id(f, "input", LOGIN_FIELD_ID).is_some());
        let action = form
            .and_then(|f| attr(html::open_tag(f), "action"))
            .map(normalize_entities)
            .unwrap_or_default();
        let form = form.unwrap_or(doc);

        let hidden = html::open_tags_ci(form, "input")
            .into_iter()
            .filter(|t| attr(t, "type").is_some_and(|ty| ty.eq_ignore_ascii_case("hidden")))
            .filter_map(|t| {
                let name = attr(t, "name")?;
                let value = attr(t, "value").unwrap_or("");
                Some((normalize_entities(name), normalize_entities(value)))
            })
            .collect();

        Ok(LoginForm {
            action,
            hidden,
            login_name,
            password_name,
            button: (normalize_entities(button_name), normalize_entities(button_value)),
        })
    }

    /// Form body for the POST, hidden state first.
    pub fn fields(&self, credentials: &Credentials) -> Vec<(String, String)> {
        let mut out = self.hidden.clone();
        out.push((self.login_name.clone(), credentials.login.clone()));
        out.push((self.password_name.clone(), credentials.password.clone()));
        out.push(self.button.clone());
        out
    }
}

/// Whether a page still shows the login field, i.e. we are not logged in.
pub fn shows_login_form(doc: &str) -> bool {
    find_open_tag_by_id(doc, "input", LOGIN_FIELD_ID).is_some()
}

fn input_name(doc: &str, id: &str) -> Result<String, PageError> {
    let tag = find_open_tag_by_id(doc, "input", id).ok_or_else(|| not_found(id))?;
    attr(tag, "name")
        .map(normalize_entities)
        .ok_or_else(|| missing_name(id))
}

fn not_found(id: &str) -> PageError {
    PageError::ElementNotFound { tag: "input", id: s!(id) }
}

fn missing_name(id: &str) -> PageError {
    PageError::MissingAttribute { tag: "input", id: s!(id), attr: "name" }
}
