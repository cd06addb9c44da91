// tests/urls.rs
//
// Address building for the portal: no requests are sent.
//
use std::time::Duration;

use wu_marks::client::WuClient;
use wu_marks::config::options::PortalOptions;
use wu_marks::core::net;
use wu_marks::portal::PortalError;

fn client(url: &str) -> WuClient {
    WuClient::new(PortalOptions { url: url.into(), timeout: Duration::from_secs(5) }).unwrap()
}

#[test]
fn marks_url_from_host_root() {
    let url = client("https://wu.example.edu.pl").marks_url().unwrap();
    assert_eq!(url.as_str(), "https://wu.example.edu.pl/OcenyP.aspx");
}

#[test]
fn marks_url_trailing_slash_is_not_doubled() {
    for base in ["https://wu.example.edu.pl/wu/", "https://wu.example.edu.pl/wu"] {
        let url = client(base).marks_url().unwrap();
        assert_eq!(url.as_str(), "https://wu.example.edu.pl/wu/OcenyP.aspx", "{base}");
    }
}

#[test]
fn bad_portal_url_is_rejected() {
    let err = WuClient::new(PortalOptions { url: "wu.example".into(), ..Default::default() })
        .err()
        .unwrap();
    assert!(matches!(err, PortalError::InvalidUrl { ref url, .. } if url == "wu.example"));
}

#[test]
fn form_action_resolves_against_login_page() {
    let page = net::parse_url("https://wu.example.edu.pl/wu/Logowanie2.aspx?x=1").unwrap();

    let relative = net::resolve(&page, "./Logowanie2.aspx?ReturnUrl=%2fOcenyP.aspx").unwrap();
    assert_eq!(
        relative.as_str(),
        "https://wu.example.edu.pl/wu/Logowanie2.aspx?ReturnUrl=%2fOcenyP.aspx"
    );

    let rooted = net::resolve(&page, "/Default.aspx").unwrap();
    assert_eq!(rooted.as_str(), "https://wu.example.edu.pl/Default.aspx");

    // Empty action posts back to the page itself
    assert_eq!(net::resolve(&page, "").unwrap(), page);
}
