// src/config/consts.rs

// Portal pages
pub const MARKS_PATH: &str = "/OcenyP.aspx";

// Login form (ASP.NET control ids)
pub const LOGIN_FIELD_ID: &str = "ctl00_ctl00_ContentPlaceHolder_MiddleContentPlaceHolder_txtIdent";
pub const PASSWORD_FIELD_ID: &str = "ctl00_ctl00_ContentPlaceHolder_MiddleContentPlaceHolder_txtHaslo";
pub const LOGIN_BUTTON_ID: &str = "ctl00_ctl00_ContentPlaceHolder_MiddleContentPlaceHolder_butLoguj";

// Grades table
pub const MARKS_TABLE_ID: &str = "ctl00_ctl00_ContentPlaceHolder_RightContentPlaceHolder_dgDane";
pub const MARKS_ROW_CLASS: &str = "gridDane";
pub const SUBJECT_COL: usize = 0;
pub const MARK_TYPE_COL: usize = 2;
pub const MARK_COL: usize = 4;

// Mark cell markup
pub const NO_MARK_SENTINEL: &str = "&nbsp;";
pub const MARK_WRAPPER_OPEN: &str = r#"<span class="ocena">"#;
pub const MARK_WRAPPER_CLOSE: &str = "</span>";

// Net
pub const USER_AGENT: &str = concat!("wu_marks/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Environment (also read from .env)
pub const ENV_URL: &str = "WU_URL";
pub const ENV_LOGIN: &str = "WU_LOGIN";
pub const ENV_PASSWORD: &str = "WU_PASSWORD";

// Local cache
pub const STORE_DIR: &str = ".store";
pub const SNAPSHOT_FILE: &str = "marks.json";
pub const LOG_FILE: &str = "debug.log";
