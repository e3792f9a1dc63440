/// Compile a literal pattern once and hand back the cached `Regex` on every
/// subsequent use. Patterns are literals in this crate so failing to compile
/// one is a programming error.
#[macro_export]
macro_rules! regex {
    ($pattern:expr) => {{
        use std::sync::OnceLock;
        static REGEX: OnceLock<::regex::Regex> = OnceLock::new();
        REGEX.get_or_init(|| ::regex::Regex::new($pattern).unwrap_or_else(|e| panic!("{}", e)))
    }};
}
