//! Lexical canonicalization of slash-delimited virtual paths.
//!
//! Nothing here touches the file system: `resolve` never checks that a
//! segment exists. Callers look the result up afterwards.

use crate::constants::HOME_DIR;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    home: String,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(HOME_DIR)
    }
}

impl PathResolver {
    pub fn new(home: impl Into<String>) -> Self {
        Self { home: home.into() }
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    /// Canonicalize `path` into its segment list.
    ///
    /// A leading `~` expands to the home prefix. Empty segments collapse,
    /// `.` is dropped and `..` pops the previous segment. `..` at the root
    /// is a no-op rather than an error.
    pub fn resolve(&self, path: &str) -> Vec<String> {
        let expanded;
        let path = match path.strip_prefix('~') {
            Some(rest) => {
                expanded = format!("{}{}", self.home, rest);
                expanded.as_str()
            }
            None => path,
        };
        let mut resolved: Vec<String> = Vec::new();
        for segment in path.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    resolved.pop();
                }
                other => resolved.push(other.to_string()),
            }
        }
        resolved
    }

    /// Join `input` onto `cwd` unless it is already absolute (`/...`) or
    /// home-relative (`~...`).
    pub fn absolutize(&self, cwd: &str, input: &str) -> String {
        if input.starts_with('/') || input.starts_with('~') {
            input.to_string()
        } else {
            format!("{cwd}/{input}")
        }
    }

    /// Resolve `input` against `cwd` in one step.
    pub fn resolve_from(&self, cwd: &str, input: &str) -> Vec<String> {
        self.resolve(&self.absolutize(cwd, input))
    }

    /// Compress the home prefix of an absolute path back to `~`.
    pub fn display(&self, path: &str) -> String {
        match path.strip_prefix(self.home.as_str()) {
            Some("") => "~".to_string(),
            Some(rest) if rest.starts_with('/') => format!("~{rest}"),
            _ => path.to_string(),
        }
    }
}

/// Render a segment list as an absolute path. The empty list is `/`.
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::from("/");
    for (idx, segment) in segments.iter().enumerate() {
        if idx > 0 {
            out.push('/');
        }
        out.push_str(segment.as_ref());
    }
    out
}

/// Canonical absolute form of `path`.
pub fn canonicalize(resolver: &PathResolver, path: &str) -> String {
    join_segments(&resolver.resolve(path))
}
