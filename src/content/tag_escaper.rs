//! Rewrites `<script>`/`<style>` elements into bracketed placeholders.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Tags escaped by [`TagEscaper::new`].
pub const DEFAULT_TAGS: [&str; 2] = ["script", "style"];

/// Capture groups per tag alternative: open, attrs, body, close, ws.
const GROUPS_PER_TAG: usize = 5;

static DEFAULT_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| TagEscaper::pattern(&DEFAULT_TAGS[..]).expect("Failed to compile tag pattern"));

/// Turns executable markup into inert text for template output.
///
/// `<script type="x">body</script>` becomes `[script type="x"]body[/script]`.
/// Only complete open/close pairs are rewritten; attributes, body and the
/// tag name's case are kept byte for byte. A lone opening or closing tag is
/// left as it is.
///
/// All tags are matched in one left-to-right pass, so an element nested in
/// the body of an escaped one (a `<style>` inside a script string, say) is
/// part of that body and stays untouched.
///
/// # Example
///
/// ```
/// use outreach_mcp_server::content::TagEscaper;
///
/// let escaper = TagEscaper::new();
/// assert_eq!(
///     escaper.show_script_tags(r#"Hi <script>console.log("x");</script>"#),
///     r#"Hi [script]console.log("x");[/script]"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TagEscaper {
    pattern: Option<Regex>,
}

impl TagEscaper {
    /// Escaper for `script` and `style` elements.
    pub fn new() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.clone(),
        }
    }

    /// Escaper for a custom set of element names.
    pub fn with_tags<I, S>(tags: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags: Vec<S> = tags.into_iter().collect();
        Ok(Self {
            pattern: Self::pattern(&tags)?,
        })
    }

    /// Rewrite every matched element of every configured tag.
    pub fn show_script_tags(&self, html: &str) -> String {
        let Some(pattern) = &self.pattern else {
            return html.to_string();
        };

        pattern
            .replace_all(html, |caps: &Captures| Self::placeholder(caps))
            .into_owned()
    }

    /// Bracketed form of whichever tag alternative matched.
    fn placeholder(caps: &Captures) -> String {
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());

        (0..caps.len() / GROUPS_PER_TAG)
            .map(|tag| 1 + tag * GROUPS_PER_TAG)
            .find(|&base| caps.get(base).is_some())
            .map(|base| {
                format!(
                    "[{}{}]{}[/{}{}]",
                    group(base),
                    group(base + 1),
                    group(base + 2),
                    group(base + 3),
                    group(base + 4)
                )
            })
            .unwrap_or_else(|| group(0).to_string())
    }

    /// One alternation with a lazy match per tag, from an opening tag to the
    /// nearest closing tag of the same name. The name must end at whitespace
    /// or `>`. `None` when there are no tags.
    fn pattern<S: AsRef<str>>(tags: &[S]) -> Result<Option<Regex>, regex::Error> {
        if tags.is_empty() {
            return Ok(None);
        }

        let alternatives = tags
            .iter()
            .map(|tag| {
                let tag = regex::escape(tag.as_ref());
                format!(r"(?:<({tag})(\s[^>]*)?>(.*?)</({tag})(\s*)>)")
            })
            .collect::<Vec<_>>()
            .join("|");

        Regex::new(&format!("(?is){alternatives}")).map(Some)
    }
}

impl Default for TagEscaper {
    fn default() -> Self {
        Self::new()
    }
}
