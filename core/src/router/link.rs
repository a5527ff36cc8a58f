//! Anchor click interception

use super::route::RoutePath;
use regex::Regex;
use std::sync::LazyLock;

/// `scheme:` prefix as defined by RFC 3986
static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("valid scheme regex"));

/// Where an anchor's `href` points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Path inside the app, handled by the router
    Internal(RoutePath),
    /// Another origin or a non-http scheme (`mailto:`, `tel:`, ...)
    External,
    /// Same-page anchor such as `#comments`
    Fragment,
}

/// Classify an anchor's `href`
pub fn classify_href(href: &str) -> LinkTarget {
    let href = href.trim();
    if href.starts_with('#') {
        LinkTarget::Fragment
    } else if href.starts_with("//") || SCHEME.is_match(href) {
        LinkTarget::External
    } else {
        LinkTarget::Internal(RoutePath::from(href))
    }
}

/// Resolve a document-relative path against the current location
///
/// Absolute paths are returned untouched. `./` and `../` segments are
/// folded the way a browser resolves an anchor's `href`; an empty href or
/// a bare `?query` stays on the current path.
pub fn resolve_against(base: &RoutePath, path: RoutePath) -> RoutePath {
    if path.as_str().starts_with('/') {
        return path;
    }
    // An empty href reloads the current document, a bare query replaces only the query
    if path.as_str().is_empty() {
        let current = base.as_str();
        return RoutePath::from(current.split_once('#').map_or(current, |(head, _)| head));
    }
    if path.as_str().starts_with('?') {
        return RoutePath::from(format!("{}{}", base.route_key(), path));
    }

    let base_key = base.route_key();
    let directory = &base_key[..base_key.rfind('/').map(|i| i + 1).unwrap_or(0)];

    let mut segments: Vec<&str> = directory.split('/').filter(|s| !s.is_empty()).collect();
    let mut rest = path.as_str();
    loop {
        if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("../") {
            segments.pop();
            rest = stripped;
        } else {
            break;
        }
    }

    let mut resolved = String::from("/");
    for segment in segments {
        resolved.push_str(segment);
        resolved.push('/');
    }
    resolved.push_str(rest);
    RoutePath::from(resolved)
}

/// Keyboard modifiers held during a click
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.ctrl || self.meta || self.shift || self.alt
    }
}

/// A click that reached an anchor element during the capture phase
#[derive(Debug, Clone, Default)]
pub struct LinkClick {
    /// The anchor's `href` attribute
    pub href: Option<String>,
    /// The anchor's `target` attribute
    pub target: Option<String>,
    /// Whether the anchor carries a `download` attribute
    pub download: bool,
    /// Mouse button, 0 being the primary one
    pub button: u16,
    pub modifiers: Modifiers,
    default_prevented: bool,
}

impl LinkClick {
    /// Plain primary-button click on an anchor with the given `href`
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Self::default()
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// The in-app path this click should be routed to, if any
    ///
    /// Clicks the browser would open in another context (modifier keys,
    /// middle button, `target="_blank"`, downloads) are left alone.
    pub fn internal_path(&self) -> Option<RoutePath> {
        if self.default_prevented || self.download || self.button != 0 || self.modifiers.any() {
            return None;
        }
        if let Some(target) = &self.target {
            if !target.is_empty() && !target.eq_ignore_ascii_case("_self") {
                return None;
            }
        }

        match classify_href(self.href.as_deref()?) {
            LinkTarget::Internal(path) => Some(path),
            LinkTarget::External | LinkTarget::Fragment => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_href() {
        assert_eq!(
            classify_href("/dashboard"),
            LinkTarget::Internal("/dashboard".into())
        );
        assert_eq!(
            classify_href("calendar?day=2"),
            LinkTarget::Internal("calendar?day=2".into())
        );
        assert_eq!(classify_href("https://example.com"), LinkTarget::External);
        assert_eq!(classify_href("//cdn.example.com/app.js"), LinkTarget::External);
        assert_eq!(classify_href("mailto:team@nivoxar.app"), LinkTarget::External);
        assert_eq!(classify_href("#comments"), LinkTarget::Fragment);
    }

    #[test]
    fn test_internal_path_for_plain_click() {
        let click = LinkClick::new("/analytics");
        assert_eq!(click.internal_path(), Some(RoutePath::from("/analytics")));
    }

    #[test]
    fn test_clicks_opening_new_context_pass_through() {
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        assert!(LinkClick::new("/a").with_modifiers(ctrl).internal_path().is_none());
        assert!(LinkClick::new("/a").with_target("_blank").internal_path().is_none());
        assert!(LinkClick::new("/a").with_target("_self").internal_path().is_some());

        let mut middle = LinkClick::new("/a");
        middle.button = 1;
        assert!(middle.internal_path().is_none());

        let mut download = LinkClick::new("/export.csv");
        download.download = true;
        assert!(download.internal_path().is_none());
    }

    #[test]
    fn test_resolve_against_current_location() {
        let base = RoutePath::from("/dashboard");
        assert_eq!(resolve_against(&base, "/calendar".into()), "/calendar");
        assert_eq!(resolve_against(&base, "calendar".into()), "/calendar");
        assert_eq!(resolve_against(&base, "./profile".into()), "/profile");

        let nested = RoutePath::from("/settings/account?tab=2");
        assert_eq!(resolve_against(&nested, "security".into()), "/settings/security");
        assert_eq!(resolve_against(&nested, "../analytics".into()), "/analytics");

        assert_eq!(resolve_against(&base, "?tab=2".into()), "/dashboard?tab=2");
        assert_eq!(resolve_against(&nested, "?tab=3".into()), "/settings/account?tab=3");
        assert_eq!(resolve_against(&base, "".into()), "/dashboard");
        assert_eq!(
            resolve_against(&RoutePath::from("/calendar?month=5#today"), "".into()),
            "/calendar?month=5"
        );
    }

    #[test]
    fn test_anchor_without_href() {
        let click = LinkClick::default();
        assert!(click.internal_path().is_none());
    }
}
