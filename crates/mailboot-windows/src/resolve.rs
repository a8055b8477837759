use std::path::PathBuf;

/// Locates `name` on the process search path.
///
/// `which` also accepts a full path, in which case it just verifies
/// that an executable file exists there. Returns `None` when nothing
/// matches; installation must not proceed in that case.
pub fn resolve_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_resolves_to_none() {
        assert_eq!(resolve_executable("mailboot-no-such-binary-xyz"), None);
    }
}
