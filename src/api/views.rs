//! HTML pages for the four steps.
//!
//! Every dynamic value goes through [`escape_html`]. Pages after the login
//! carry `username`, `primavera_url` and the session token as hidden fields.

use crate::model::{ColumnListing, ResultTable, TableDescriptor};
use serde_json::Value;
use std::fmt::Write;

/// Values forwarded in hidden fields from one step to the next
#[derive(Debug, Clone, PartialEq)]
pub struct FormContext {
    pub username: String,
    pub primavera_url: String,
    pub session: String,
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        body = body
    )
}

fn error_block(error: Option<&str>) -> String {
    match error {
        Some(message) => format!(
            "    <p class=\"error\">{}</p>\n",
            escape_html(message)
        ),
        None => String::new(),
    }
}

fn hidden(name: &str, value: &str) -> String {
    format!(
        "        <input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
        escape_html(name),
        escape_html(value)
    )
}

fn hidden_context(ctx: &FormContext) -> String {
    let mut fields = hidden("username", &ctx.username);
    fields.push_str(&hidden("primavera_url", &ctx.primavera_url));
    fields.push_str(&hidden("session", &ctx.session));
    fields
}

/// `GET /` and every step-1 failure
pub fn login_page(error: Option<&str>, username: &str, primavera_url: &str) -> String {
    let body = format!(
        r#"{error}    <form method="post" action="/list_of_tables">
        <label>Primavera URL <input type="url" name="primavera_url" value="{url}" required></label>
        <label>Username <input type="text" name="username" value="{user}" required></label>
        <label>Password <input type="password" name="password" required></label>
        <button type="submit">Sign in</button>
    </form>
"#,
        error = error_block(error),
        url = escape_html(primavera_url),
        user = escape_html(username),
    );
    page("Primavera P6 Explorer", &body)
}

/// Sorted table list with one checkbox per table
pub fn tables_page(ctx: &FormContext, tables: &[TableDescriptor], error: Option<&str>) -> String {
    let mut body = error_block(error);
    body.push_str("    <form method=\"post\" action=\"/columns\">\n");
    body.push_str(&hidden_context(ctx));

    if tables.is_empty() {
        body.push_str("        <p>No tables to show.</p>\n");
    } else {
        body.push_str("        <ul class=\"tables\">\n");
        for table in tables {
            let _ = writeln!(
                body,
                "            <li><label><input type=\"checkbox\" name=\"tables\" value=\"{}\"> {}</label></li>",
                escape_html(table.identifier()),
                escape_html(table.display_name()),
            );
        }
        body.push_str("        </ul>\n");
        body.push_str("        <button type=\"submit\">Show columns</button>\n");
    }
    body.push_str("    </form>\n");

    // Lets the user reload the list after a failed column lookup
    body.push_str("    <form method=\"post\" action=\"/list_of_tables\">\n");
    body.push_str(&hidden_context(ctx));
    body.push_str("        <button type=\"submit\">Reload tables</button>\n    </form>\n");

    page("Tables", &body)
}

/// Per-table column lists; checkbox values are `table:column`
pub fn columns_page(ctx: &FormContext, listing: &ColumnListing, error: Option<&str>) -> String {
    let mut body = error_block(error);
    body.push_str("    <form method=\"post\" action=\"/data\">\n");
    body.push_str(&hidden_context(ctx));

    for entry in listing.iter() {
        let _ = writeln!(
            body,
            "        <fieldset>\n            <legend>{}</legend>\n            <ul class=\"columns\">",
            escape_html(&entry.table)
        );
        for column in &entry.columns {
            let label = escape_html(&column.label());
            if column.is_error() {
                let _ = writeln!(body, "                <li class=\"error\">{}</li>", label);
            } else if let Some(name) = column.name() {
                let value = format!("{}:{}", entry.table, name);
                let _ = writeln!(
                    body,
                    "                <li><label><input type=\"checkbox\" name=\"selected_columns\" value=\"{}\"> {}</label></li>",
                    escape_html(&value),
                    label
                );
            } else {
                let _ = writeln!(body, "                <li>{}</li>", label);
            }
        }
        body.push_str("            </ul>\n        </fieldset>\n");
    }

    if !listing.is_empty() {
        body.push_str("        <button type=\"submit\">Run query</button>\n");
    }
    body.push_str("    </form>\n");

    page("Columns", &body)
}

/// Query results, or the failure, plus a way back to the column lists
pub fn data_page(
    ctx: &FormContext,
    table_names: &[String],
    result: Option<&Value>,
    error: Option<&str>,
) -> String {
    let mut body = error_block(error);

    if !table_names.is_empty() {
        let names: Vec<String> = table_names.iter().map(|n| escape_html(n)).collect();
        let _ = writeln!(body, "    <p>Tables: {}</p>", names.join(", "));
    }

    if let Some(result) = result {
        match ResultTable::from_value(result) {
            Some(table) => body.push_str(&result_table(&table)),
            None => {
                let pretty = serde_json::to_string_pretty(result).unwrap_or_default();
                let _ = writeln!(body, "    <pre>{}</pre>", escape_html(&pretty));
            }
        }
    }

    body.push_str("    <form method=\"post\" action=\"/columns\">\n");
    body.push_str(&hidden_context(ctx));
    for name in table_names {
        body.push_str(&hidden("tables", name));
    }
    body.push_str("        <button type=\"submit\">Back to columns</button>\n    </form>\n");

    page("Query results", &body)
}

fn result_table(table: &ResultTable) -> String {
    if table.rows.is_empty() {
        return "    <p>The query returned no rows.</p>\n".to_string();
    }

    let mut html = String::from("    <table>\n        <thead><tr>");
    for header in &table.headers {
        let _ = write!(html, "<th>{}</th>", escape_html(header));
    }
    html.push_str("</tr></thead>\n        <tbody>\n");
    for row in &table.rows {
        html.push_str("            <tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape_html(cell));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("        </tbody>\n    </table>\n");
    html
}
