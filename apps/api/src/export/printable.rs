//! Printable layout: the chrome-free HTML the browser renders off-screen and captures.
//!
//! Only titles and contents appear; no drag handles, buttons, or editor styling.

use crate::sections::ResumeSection;

const PRINTABLE_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Resume</title>
<style>
  body { margin: 0; -webkit-print-color-adjust: exact; print-color-adjust: exact; }
  #printable-resume-area * { transition: none !important; box-shadow: none !important; }
</style>
</head>
<body>
<div id="printable-resume-area" style="font-family: Arial, sans-serif; padding: 40pt; background-color: white; color: #333333; width: 595pt; box-sizing: border-box; line-height: 1.4;">
"#;

const PRINTABLE_TAIL: &str = "</div>\n</body>\n</html>\n";

/// Renders the printable HTML for `sections`, in list order.
pub fn render_printable(sections: &[ResumeSection]) -> String {
    let mut out = String::from(PRINTABLE_HEAD);
    let last = sections.len().saturating_sub(1);

    for (idx, section) in sections.iter().enumerate() {
        // No trailing gap after the last section, or the export gains a blank band.
        let container_style = if idx < last {
            "margin-bottom: 15pt;"
        } else {
            ""
        };
        let title_margin_top = if idx == 0 { "0" } else { "10pt" };

        out.push_str(&format!(
            "<div class=\"resume-section\" style=\"{container_style}\">\n\
             <h2 style=\"font-size: 14pt; font-weight: bold; margin-top: {title_margin_top}; \
             margin-bottom: 8pt; border-bottom: 1px solid #cccccc; padding-bottom: 4pt; \
             color: #000000;\">{}</h2>\n\
             <div style=\"font-size: 10pt; white-space: pre-wrap; color: #333333;\">{}</div>\n\
             </div>\n",
            html_escape(&section.title),
            html_escape(&section.content),
        ));
    }

    out.push_str(PRINTABLE_TAIL);
    out
}

fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::default_sections;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<b>"R&D"</b> 'x'"#),
            "&lt;b&gt;&quot;R&amp;D&quot;&lt;/b&gt; &#39;x&#39;"
        );
    }

    #[test]
    fn test_render_keeps_section_order() {
        let html = render_printable(&default_sections());
        let positions: Vec<usize> = ["Personal Information", "Summary", "Work Experience", "Education", "Skills"]
            .iter()
            .map(|title| html.find(&format!(">{title}</h2>")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_render_escapes_user_text() {
        let sections = vec![ResumeSection::new("x", "<script>", "a & b")];
        let html = render_printable(&sections);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn test_last_section_has_no_bottom_margin() {
        let html = render_printable(&default_sections());
        assert_eq!(html.matches("margin-bottom: 15pt;").count(), 4);
    }

    #[test]
    fn test_render_empty_list() {
        let html = render_printable(&[]);
        assert!(html.contains("printable-resume-area"));
        assert!(!html.contains("resume-section"));
    }
}
