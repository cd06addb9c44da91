// tests/pages.rs
//
// Page specs against saved HTML: login form and grades table.
//
use wu_marks::config::options::RowPolicy;
use wu_marks::grades::{self, GradeRow};
use wu_marks::portal::Credentials;
use wu_marks::specs::PageError;
use wu_marks::specs::login::{self, LoginForm};
use wu_marks::specs::marks;

const LOGIN_PAGE: &str = include_str!("fixtures/login.html");
const MARKS_PAGE: &str = include_str!("fixtures/marks.html");

#[test]
fn login_form_fields() {
    let form = LoginForm::parse(LOGIN_PAGE).unwrap();

    assert_eq!(form.action, "./Logowanie2.aspx?ReturnUrl=%2fOcenyP.aspx&x=1");
    assert_eq!(
        form.hidden,
        vec![
            ("__EVENTTARGET".to_string(), String::new()),
            ("__VIEWSTATE".to_string(), "/wEPDwUKMTY1NDU2MTA1Mg9kFgJmD2QWAgIDD2QWBA==".to_string()),
            ("__EVENTVALIDATION".to_string(), "/wEWBAKM54rGBgL+raDpAgKK/+hQ".to_string()),
        ]
    );
    assert_eq!(form.login_name, "ctl00$ctl00$ContentPlaceHolder$MiddleContentPlaceHolder$txtIdent");
    assert_eq!(form.password_name, "ctl00$ctl00$ContentPlaceHolder$MiddleContentPlaceHolder$txtHaslo");
    assert_eq!(
        form.button,
        ("ctl00$ctl00$ContentPlaceHolder$MiddleContentPlaceHolder$butLoguj".to_string(), "Zaloguj".to_string())
    );
}

#[test]
fn login_post_body_carries_state_and_credentials() {
    let form = LoginForm::parse(LOGIN_PAGE).unwrap();
    let fields = form.fields(&Credentials::new("s12345", "tajne"));

    assert_eq!(fields.len(), 6);
    assert_eq!(fields[1].0, "__VIEWSTATE");
    assert_eq!(fields[3], (form.login_name.clone(), "s12345".to_string()));
    assert_eq!(fields[4], (form.password_name.clone(), "tajne".to_string()));
    assert_eq!(fields[5].1, "Zaloguj");
}

#[test]
fn login_form_missing_is_reported() {
    let err = LoginForm::parse(MARKS_PAGE).unwrap_err();
    assert!(matches!(err, PageError::ElementNotFound { tag: "input", .. }));
}

#[test]
fn login_detection() {
    assert!(login::shows_login_form(LOGIN_PAGE));
    assert!(!login::shows_login_form(MARKS_PAGE));
}

#[test]
fn marks_rows_extracted_in_page_order() {
    let rows = marks::extract_rows(MARKS_PAGE).unwrap();
    assert_eq!(
        rows,
        vec![
            GradeRow::new("Analiza matematyczna", "Ćwiczenia", "4.5<br>23.01.20"),
            GradeRow::new("Analiza matematyczna", "Wykład", "&nbsp;"),
            GradeRow::new(
                "Fizyka & astronomia",
                "Egzamin",
                r#"<span class="ocena">4.0</span><br><span class="ocena">16.02.20</span>"#,
            ),
        ]
    );
}

#[test]
fn marks_page_folds_into_table() {
    let rows = marks::extract_rows(MARKS_PAGE).unwrap();
    let table = grades::collect_marks(rows, RowPolicy::Abort, None).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table["Analiza matematyczna"].len(), 1);
    assert_eq!(table["Fizyka & astronomia"]["Egzamin"].value(), "4.0");
}

#[test]
fn missing_table_is_reported() {
    let err = marks::extract_rows(LOGIN_PAGE).unwrap_err();
    assert!(matches!(err, PageError::ElementNotFound { tag: "table", .. }));
}

#[test]
fn short_row_is_reported() {
    let doc = r#"<table id="ctl00_ctl00_ContentPlaceHolder_RightContentPlaceHolder_dgDane">
        <tr class="gridDane"><td>Fizyka</td><td>x</td><td>Egzamin</td></tr>
    </table>"#;
    assert_eq!(
        marks::extract_rows(doc).unwrap_err(),
        PageError::ShortRow { index: 0, cells: 3, expected: 5 }
    );
}

#[test]
fn table_without_tbody() {
    let doc = r#"<TABLE ID="ctl00_ctl00_ContentPlaceHolder_RightContentPlaceHolder_dgDane">
        <TR class="gridDane"><TD>Chemia</TD><TD></TD><TD>Laboratorium</TD><TD></TD><TD>3.0<br>10.06.21</TD></TR>
    </TABLE>"#;
    let rows = marks::extract_rows(doc).unwrap();
    assert_eq!(rows, vec![GradeRow::new("Chemia", "Laboratorium", "3.0<br>10.06.21")]);
}

#[test]
fn escaped_brackets_in_subject_survive() {
    let doc = r#"<table id="ctl00_ctl00_ContentPlaceHolder_RightContentPlaceHolder_dgDane">
        <tr class="gridDane"><td>Teoria graf&#243;w &lt;wybrane zagadnienia&gt;</td><td></td><td><b>Wyk&#x142;ad</b></td><td></td><td>4.0<br>16.02.20</td></tr>
    </table>"#;
    let rows = marks::extract_rows(doc).unwrap();
    assert_eq!(
        rows,
        vec![GradeRow::new("Teoria grafów <wybrane zagadnienia>", "Wykład", "4.0<br>16.02.20")]
    );
}

#[test]
fn cell_text_strips_markup_before_decoding() {
    use wu_marks::core::sanitize::{cell_text, normalize_entities};

    assert_eq!(
        cell_text("Algorytmy &lt;zaawansowane&gt; i C&lt;-&gt;Java"),
        "Algorytmy <zaawansowane> i C<->Java"
    );
    assert_eq!(cell_text("<a href=\"x\">Fizyka</a>&nbsp;&amp;&nbsp; chemia"), "Fizyka & chemia");
    assert_eq!(normalize_entities("&amp;lt; &#39;a&#39; &copy; R&D &#xZZ;"), "&lt; 'a' &copy; R&D &#xZZ;");
}
