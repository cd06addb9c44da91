// src/core/net.rs
//! Blocking HTTP over one cookie-carrying client per portal session.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::{Client, Response};

use crate::config::consts::USER_AGENT;
use crate::portal::PortalError;

/// A fetched page: where we ended up after redirects, plus the body.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub body: String,
}

/// Fresh client with its own cookie jar, so every session starts logged out.
pub fn client(timeout: Duration) -> Result<Client, PortalError> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .cookie_store(true)
        .timeout(timeout)
        .build()?)
}

pub fn parse_url(url: &str) -> Result<Url, PortalError> {
    Url::parse(url).map_err(|e| PortalError::InvalidUrl {
        url: s!(url),
        reason: e.to_string(),
    })
}

/// Resolve a (possibly relative) link found on `base`.
pub fn resolve(base: &Url, link: &str) -> Result<Url, PortalError> {
    base.join(link).map_err(|e| PortalError::InvalidUrl {
        url: s!(link),
        reason: e.to_string(),
    })
}

pub fn http_get(client: &Client, url: Url) -> Result<Page, PortalError> {
    logd!("GET {url}");
    read_page(client.get(url).send()?)
}

/// Form-urlencoded POST, the way a browser submits a `<form method="post">`.
pub fn http_post_form(
    client: &Client,
    url: Url,
    fields: &[(String, String)],
) -> Result<Page, PortalError> {
    logd!("POST {url} ({} fields)", fields.len());
    read_page(client.post(url).form(&fields).send()?)
}

fn read_page(resp: Response) -> Result<Page, PortalError> {
    let resp = resp.error_for_status()?;
    let url = resp.url().clone();
    let body = resp.text()?;
    logd!("{url}: {} bytes", body.len());
    Ok(Page { url, body })
}
