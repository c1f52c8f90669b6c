//! Path and identifier formatting.
//!
//! Every handler builds its output through these two functions, which keeps
//! naming-convention enforcement in one place. Identifiers are namespace
//! segments joined with `\`; the final segment runs through the verifier
//! pattern that strips a recognized extension and requires the bare name to
//! start with an uppercase letter. A segment the pattern does not match
//! passes through unchanged, mirroring a replace-with-no-match no-op.

use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

pub const NAMESPACE_SEPARATOR: &str = "\\";

/// The file name must start with an uppercase letter, continue with letters
/// or digits, and carry one of the recognized extensions.
/// `PostController.php` verifies to `PostController`; `postController.php`
/// does not match and is left alone.
static VERIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][a-zA-Z0-9]+)\.(php|hv)$").expect("verifier pattern"));

pub struct Formatter {
    root: PathBuf,
    namespace: String,
}

impl Formatter {
    pub fn new(root: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            namespace: namespace.into(),
        }
    }

    /// Join the modules root with `segments` using the platform separator.
    /// No verification is applied to any segment.
    pub fn format_path(&self, segments: &[&str]) -> PathBuf {
        let mut path = self.root.clone();
        for segment in segments {
            path.push(segment);
        }
        path
    }

    /// Join the root namespace with `segments` using `\`, verifying the
    /// final segment.
    pub fn format_identifier(&self, segments: &[&str]) -> String {
        let mut parts = Vec::with_capacity(segments.len() + 1);
        parts.push(self.namespace.as_str());
        if let Some((last, rest)) = segments.split_last() {
            parts.extend(rest.iter().copied());
            parts.push(verify_file(last));
        }
        parts.join(NAMESPACE_SEPARATOR)
    }
}

/// Capture group 1 of the verifier on a match, the input untouched
/// otherwise.
fn verify_file(name: &str) -> &str {
    match VERIFIER.captures(name) {
        Some(captures) => captures.get(1).map_or(name, |m| m.as_str()),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn formatter() -> Formatter {
        Formatter::new("/srv/modules", "Modules")
    }

    #[test]
    fn identifier_strips_extension_and_joins_with_backslash() {
        let id = formatter().format_identifier(&["Blog", "Controllers", "PostController.php"]);
        assert_eq!(id, "Modules\\Blog\\Controllers\\PostController");
    }

    #[test]
    fn hv_extension_also_recognized() {
        let id = formatter().format_identifier(&["Blog", "Entities", "Post.hv"]);
        assert_eq!(id, "Modules\\Blog\\Entities\\Post");
    }

    #[test]
    fn lowercase_file_name_passes_through_unchanged() {
        let id = formatter().format_identifier(&["Blog", "Controllers", "postController.php"]);
        assert_eq!(id, "Modules\\Blog\\Controllers\\postController.php");
    }

    #[test]
    fn unrecognized_extension_passes_through_unchanged() {
        let id = formatter().format_identifier(&["Blog", "Controllers", "PostController.rb"]);
        assert_eq!(id, "Modules\\Blog\\Controllers\\PostController.rb");
    }

    #[test]
    fn only_final_segment_is_verified() {
        // An intermediate segment that happens to look like a file name is
        // left alone.
        let id = formatter().format_identifier(&["Blog.php", "PostController.php"]);
        assert_eq!(id, "Modules\\Blog.php\\PostController");
    }

    #[test]
    fn empty_segments_yield_bare_namespace() {
        assert_eq!(formatter().format_identifier(&[]), "Modules");
    }

    #[test]
    fn path_prepends_root_without_verification() {
        let path = formatter().format_path(&["Blog", "Controllers", "PostController.php"]);
        assert_eq!(
            path,
            Path::new("/srv/modules")
                .join("Blog")
                .join("Controllers")
                .join("PostController.php")
        );
    }
}
