// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand

    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // Concatenate anything that derefs to &str
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

#[macro_export]
macro_rules! row {
    // One export row: every cell turned into an owned String
    ($($cell:expr),* $(,)?) => {
        ::std::vec![$( ::std::string::ToString::to_string(&$cell) ),*]
    };
}
