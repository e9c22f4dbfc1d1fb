//! URL path templates with `{name}` placeholders.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::{Error, Result};

/// Characters escaped inside a single path segment.
const SEGMENT_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b';')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A path pattern such as `/api/storage/{repoKey}/{itemPath}`.
///
/// Substituted values may contain `/` (item paths are hierarchical); every
/// segment between slashes is percent-encoded on its own.
///
/// # Example
///
/// ```
/// use artifactory_rest_core::PathTemplate;
///
/// let template = PathTemplate::new("/api/storage/{repoKey}/{itemPath}");
/// let path = template
///     .expand(&[("repoKey", "libs-release-local"), ("itemPath", "/org/acme/my app.jar")])
///     .expect("expand");
///
/// assert_eq!(path, "/api/storage/libs-release-local/org/acme/my%20app.jar");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathTemplate(&'static str);

impl PathTemplate {
    /// Create a new path template.
    #[must_use]
    pub const fn new(template: &'static str) -> Self {
        Self(template)
    }

    /// Get the template string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Substitute every `{name}` placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] when a placeholder has no value or
    /// a brace is left open.
    pub fn expand(&self, params: &[(&str, &str)]) -> Result<String> {
        let mut out = String::with_capacity(self.0.len());
        let mut rest = self.0;

        while let Some(start) = rest.find('{') {
            let (literal, tail) = rest.split_at(start);
            out.push_str(literal);

            let end = tail
                .find('}')
                .ok_or_else(|| Error::invalid_request(format!("unterminated placeholder in {}", self.0)))?;
            let name = tail.get(1..end).unwrap_or_default();
            let value = params
                .iter()
                .find_map(|(key, value)| (*key == name).then_some(*value))
                .ok_or_else(|| Error::invalid_request(format!("missing path parameter `{name}`")))?;

            out.push_str(&encode_segments(value));
            rest = tail.get(end + 1..).unwrap_or_default();
        }

        out.push_str(rest);
        Ok(out)
    }
}

fn encode_segments(value: &str) -> String {
    value
        .trim_start_matches('/')
        .split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT_SET).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

impl std::fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
