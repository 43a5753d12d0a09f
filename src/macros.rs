// Compiles a pattern once and hands out the cached `&'static Regex` afterwards.
// Only ever called with literals, so a bad pattern is a programming error.
macro_rules! regex(
    ($s:expr) => ({
        static RE: ::std::sync::OnceLock<::regex::Regex> = ::std::sync::OnceLock::new();
        RE.get_or_init(|| ::regex::Regex::new($s).unwrap())
    });
);
