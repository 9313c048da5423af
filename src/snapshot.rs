use serde::{Deserialize, Serialize};

pub const DEFAULT_HTML: &str =
    "<h1>Hello World</h1>\n<p>Edit the code and press Run or enable Auto-run.</p>";
pub const DEFAULT_CSS: &str =
    "body{font-family:system-ui,Segoe UI,Roboto,Arial;margin:16px;color:#0b1220}\nh1{color:#4f46e5}";
pub const DEFAULT_JS: &str = "console.log('Hello from JS');";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Layout {
    #[serde(rename = "stacked")]
    Stacked,
    #[serde(rename = "side-by-side")]
    SideBySide,
}

impl Layout {
    pub fn toggled(self) -> Self {
        match self {
            Layout::Stacked => Layout::SideBySide,
            Layout::SideBySide => Layout::Stacked,
        }
    }
}

/// The one durable entity: the three source fragments plus the two UI
/// toggles that ride along with them.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct EditorSnapshot {
    pub html: String,
    pub css: String,
    pub js: String,
    pub autorun: bool,
    pub layout: Layout,
}

impl Default for EditorSnapshot {
    fn default() -> Self {
        Self {
            html: DEFAULT_HTML.to_string(),
            css: DEFAULT_CSS.to_string(),
            js: DEFAULT_JS.to_string(),
            autorun: false,
            layout: Layout::SideBySide,
        }
    }
}

// Persisted shape with every field optional, so an older or hand-edited
// payload degrades per field instead of as a whole.
#[derive(Deserialize)]
struct RawSnapshot {
    html: Option<String>,
    css: Option<String>,
    js: Option<String>,
    autorun: Option<bool>,
    layout: Option<Layout>,
}

impl EditorSnapshot {
    /// Parses a persisted payload, coalescing each missing field to its
    /// starter default. A payload that is not the expected structure at all
    /// yields the full default snapshot. Never fails.
    pub fn from_json(raw: &str) -> Self {
        let defaults = Self::default();
        match serde_json::from_str::<RawSnapshot>(raw) {
            Ok(parsed) => Self {
                html: parsed.html.unwrap_or(defaults.html),
                css: parsed.css.unwrap_or(defaults.css),
                js: parsed.js.unwrap_or(defaults.js),
                autorun: parsed.autorun.unwrap_or(defaults.autorun),
                layout: parsed.layout.unwrap_or(defaults.layout),
            },
            Err(_) => defaults,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_payload_yields_defaults() {
        assert_eq!(EditorSnapshot::from_json("not json"), EditorSnapshot::default());
        assert_eq!(EditorSnapshot::from_json("[1,2,3]"), EditorSnapshot::default());
        assert_eq!(EditorSnapshot::from_json(""), EditorSnapshot::default());
    }

    #[test]
    fn test_missing_fields_coalesce_individually() {
        let snap = EditorSnapshot::from_json(r#"{"html":"<b>x</b>","autorun":true}"#);
        assert_eq!(snap.html, "<b>x</b>");
        assert_eq!(snap.css, DEFAULT_CSS, "missing css should fall back alone");
        assert_eq!(snap.js, DEFAULT_JS);
        assert!(snap.autorun);
        assert_eq!(snap.layout, Layout::SideBySide);
    }

    #[test]
    fn test_layout_serializes_as_kebab_strings() {
        let mut snap = EditorSnapshot::default();
        snap.layout = Layout::Stacked;
        let json = snap.to_json().unwrap();
        assert!(json.contains(r#""layout": "stacked""#), "got: {}", json);

        let back = EditorSnapshot::from_json(&json);
        assert_eq!(back.layout, Layout::Stacked);
    }

    #[test]
    fn test_unknown_layout_value_degrades_to_defaults() {
        // An unrecognized enum string fails the structural parse, which is
        // full-default territory rather than per-field coalescing.
        let snap = EditorSnapshot::from_json(r#"{"html":"kept?","layout":"diagonal"}"#);
        assert_eq!(snap, EditorSnapshot::default());
    }

    #[test]
    fn test_round_trip_preserves_awkward_text() {
        let snap = EditorSnapshot {
            html: "<p>\"quoted\" & 'single'</p>\nline two".to_string(),
            css: "p::after{content:\"↪ done\"}".to_string(),
            js: "console.log('héllo \\n wörld');".to_string(),
            autorun: true,
            layout: Layout::Stacked,
        };
        let back = EditorSnapshot::from_json(&snap.to_json().unwrap());
        assert_eq!(back, snap);
    }
}
