pub mod repos;

/// An empty `--organization` value means "all organizations".
pub fn selector(org_flag: &Option<String>) -> Option<&str> {
    org_flag
        .as_deref()
        .map(str::trim)
        .filter(|org| !org.is_empty())
}
