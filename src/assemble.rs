use crate::snapshot::EditorSnapshot;

// Keeps the rendering surface color visible through the document background.
const RESET_STYLE: &str = "html,body{background:transparent;margin:0;padding:0;}";

/// Combines the three fragments into one standalone document. Fixed ordering:
/// reset style, user style, user markup, wrapped script. Fragments pass
/// through verbatim; isolation is the surface's job, not the assembler's.
pub fn build_document(snapshot: &EditorSnapshot) -> String {
    let css = format!(
        "<style>{}</style><style>{}</style>",
        RESET_STYLE, snapshot.css
    );
    // Any runtime failure in the user script lands on the document's own
    // console instead of aborting the rest of the page.
    let js = format!(
        "<script>\ntry{{{}\n}}catch(e){{console.error(e)}}\n</script>",
        snapshot.js
    );
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\">{}</head><body>{}{}</body></html>",
        css, snapshot.html, js
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(html: &str, css: &str, js: &str) -> EditorSnapshot {
        EditorSnapshot {
            html: html.to_string(),
            css: css.to_string(),
            js: js.to_string(),
            ..EditorSnapshot::default()
        }
    }

    #[test]
    fn test_ordering_style_then_markup_then_script() {
        let doc = build_document(&snap("MARKUP", "STYLING", "SCRIPTING"));
        let style_at = doc.find("STYLING").unwrap();
        let markup_at = doc.find("MARKUP").unwrap();
        let script_at = doc.find("SCRIPTING").unwrap();
        assert!(style_at < markup_at, "style must precede markup");
        assert!(markup_at < script_at, "markup must precede script");
    }

    #[test]
    fn test_reset_style_precedes_user_style() {
        let doc = build_document(&snap("", "h1{color:red}", ""));
        let reset_at = doc.find("background:transparent").unwrap();
        let user_at = doc.find("h1{color:red}").unwrap();
        assert!(reset_at < user_at);
    }

    #[test]
    fn test_script_is_wrapped_in_try_catch() {
        let doc = build_document(&snap("", "", "boom()"));
        assert!(doc.contains("try{boom()"));
        assert!(doc.contains("catch(e){console.error(e)}"));
    }

    #[test]
    fn test_charset_is_declared() {
        let doc = build_document(&EditorSnapshot::default());
        assert!(doc.starts_with("<!doctype html>"));
        assert!(doc.contains("<meta charset=\"utf-8\">"));
    }

    #[test]
    fn test_throwing_script_does_not_displace_markup_or_style() {
        // Example from the system contract: a thrown value must leave the
        // markup and styling intact in the assembled document.
        let doc = build_document(&snap("<b>x</b>", "b{color:red}", "throw 1"));
        assert!(doc.contains("<b>x</b>"));
        assert!(doc.contains("color:red"));
        assert!(doc.contains("try{throw 1"));
        assert!(doc.ends_with("</script></body></html>"));
    }

    #[test]
    fn test_fragments_are_not_sanitized() {
        let doc = build_document(&snap("<script>alert(1)</script>", "", ""));
        assert!(doc.contains("<script>alert(1)</script>"));
    }
}
