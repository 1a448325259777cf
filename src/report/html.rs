// Small HTML building blocks shared by the report pages.

/// Escape text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&'  => out.push_str("&amp;"),
            '<'  => out.push_str("&lt;"),
            '>'  => out.push_str("&gt;"),
            '"'  => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c    => out.push(c),
        }
    }
    out
}

/// Render a table. `row_class(i)` may tag individual body rows.
pub fn table<F>(class: &str, headers: &[String], rows: &[Vec<String>], row_class: F) -> String
where
    F: Fn(usize, &[String]) -> Option<&'static str>,
{
    let mut out = format!("<table class=\"{}\">\n<thead><tr>", escape(class));
    for h in headers {
        out.push_str(&format!("<th>{}</th>", escape(h)));
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    for (i, row) in rows.iter().enumerate() {
        match row_class(i, row) {
            Some(c) => out.push_str(&format!("<tr class=\"{c}\">")),
            None    => out.push_str("<tr>"),
        }
        for cell in row {
            out.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>\n");
    out
}

/// Render `key: value` pairs as a definition list.
pub fn key_values(pairs: &[(String, String)]) -> String {
    let mut out = String::from("<dl>\n");
    for (k, v) in pairs {
        out.push_str(&format!("<dt>{}</dt><dd>{}</dd>\n", escape(k), escape(v)));
    }
    out.push_str("</dl>\n");
    out
}

/// Wrap a body in the page shell shared by all reports.
pub fn page(title: &str, body: &str, generated_at: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         <h1>{title}</h1>\n\
         {body}\
         <footer><small>Generated at {generated_at}</small></footer>\n\
         </body>\n\
         </html>\n",
        title = escape(title),
        body = body,
        generated_at = escape(generated_at),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_table_marks_rows() {
        let html = table(
            "t",
            &["a".to_string(), "b".to_string()],
            &[vec!["1".into(), "x".into()], vec!["2".into(), "<y>".into()]],
            |i, _| (i == 1).then_some("best-row"),
        );
        assert!(html.contains("<th>a</th><th>b</th>"));
        assert!(html.contains("<tr><td>1</td><td>x</td></tr>"));
        assert!(html.contains("<tr class=\"best-row\"><td>2</td><td>&lt;y&gt;</td></tr>"));
    }

    #[test]
    fn test_page_escapes_title_only() {
        let html = page("A & B", "<p>body</p>\n", "2024-01-01 00:00:00");
        assert!(html.contains("<title>A &amp; B</title>"));
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains("Generated at 2024-01-01 00:00:00"));
    }
}
