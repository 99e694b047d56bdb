//! Reload script injection for served HTML documents.

/// Route serving the reload client script.
pub const RELOAD_SCRIPT_PATH: &str = "/__livedev__/reload.js";

/// Tag inserted into every served HTML document.
pub const RELOAD_SCRIPT_TAG: &str = r#"<script src="/__livedev__/reload.js"></script>"#;

/// Browser-side reload client.
pub const RELOAD_SCRIPT: &str = include_str!("../../assets/reload-client.js");

/// Check whether a file name should receive the reload script.
pub fn is_html_file(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".html")
}

/// Insert the reload script tag into an HTML document.
///
/// The tag goes before the last `</body>`, else before the last `</html>`,
/// else at the end. Tag matching is ASCII case-insensitive.
pub fn inject_reload_script(html: &str) -> String {
    // ASCII lowercasing keeps byte offsets identical
    let lowered = html.to_ascii_lowercase();
    let pos = lowered.rfind("</body>").or_else(|| lowered.rfind("</html>"));

    let mut result = String::with_capacity(html.len() + RELOAD_SCRIPT_TAG.len() + 2);
    match pos {
        Some(pos) => {
            result.push_str(&html[..pos]);
            result.push_str(RELOAD_SCRIPT_TAG);
            result.push('\n');
            result.push_str(&html[pos..]);
        }
        None => {
            result.push_str(html);
            result.push('\n');
            result.push_str(RELOAD_SCRIPT_TAG);
        }
    }
    result
}
