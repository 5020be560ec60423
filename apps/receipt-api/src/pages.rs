//! HTML pages for the submission form and the receipt listing

use receipt_core::{ReceiptField, ReceiptRecord};

const PAYMENT_METHODS: [&str; 3] = ["efectivo", "tarjeta", "transferencia"];

fn label(field: ReceiptField) -> &'static str {
    match field {
        ReceiptField::Date => "Fecha",
        ReceiptField::ReceiptNumber => "Recibo N.°",
        ReceiptField::ReceivedFrom => "Recibí de",
        ReceiptField::Amount => "La suma de",
        ReceiptField::PaymentMethod => "Forma de pago",
        ReceiptField::Concept => "Por el concepto de",
        ReceiptField::Saldo => "Saldo",
    }
}

/// Escape text for use in element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="/static/styles.css">
</head>
<body>
<nav><a href="/">Nuevo recibo</a> | <a href="/receipts">Recibos</a></nav>
<h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        body = body
    )
}

fn input(field: ReceiptField) -> String {
    let name = field.name();
    match field {
        ReceiptField::Date => {
            format!(r#"<input type="date" id="{name}" name="{name}" required>"#)
        }
        ReceiptField::PaymentMethod => {
            let options: String = PAYMENT_METHODS
                .iter()
                .map(|method| format!(r#"<option value="{method}">{method}</option>"#))
                .collect();
            format!(r#"<select id="{name}" name="{name}" required>{options}</select>"#)
        }
        _ => format!(r#"<input type="text" id="{name}" name="{name}" required>"#),
    }
}

/// Empty submission form posting to `/generate`
pub fn submission_form() -> String {
    let fields: String = ReceiptField::ALL
        .into_iter()
        .map(|field| {
            format!(
                r#"<div><label for="{}">{}</label>{}</div>"#,
                field.name(),
                label(field),
                input(field)
            )
        })
        .collect();
    let body = format!(
        r#"<form method="post" action="/generate">{}<button type="submit">Generar recibo</button></form>"#,
        fields
    );

    layout("Generador de recibos", &body)
}

/// Link that re-renders the receipt stored at `index`
fn download_href(index: usize) -> String {
    format!("/receipts/{}/image", index)
}

fn receipt_row(index: usize, receipt: &ReceiptRecord) -> String {
    let cells: String = receipt
        .fields()
        .map(|(_, value)| format!("<td>{}</td>", escape_html(value)))
        .collect();
    format!(
        r#"<tr>{}<td><a href="{}">Descargar</a></td></tr>"#,
        cells,
        download_href(index)
    )
}

/// Table of `receipts` (paired with their store positions) with a filter box
/// pre-filled with `filter`
pub fn receipt_listing(receipts: &[(usize, ReceiptRecord)], filter: &str) -> String {
    let mut body = format!(
        r#"<form method="get" action="/receipts"><input type="search" name="q" value="{}" placeholder="Buscar en recibos..."><button type="submit">Filtrar</button></form>"#,
        escape_html(filter)
    );

    if receipts.is_empty() {
        body.push_str("<p>No hay recibos.</p>");
        return layout("Recibos", &body);
    }

    let headers: String = ReceiptField::ALL
        .into_iter()
        .map(|field| format!("<th>{}</th>", label(field)))
        .collect();
    let rows: String = receipts
        .iter()
        .map(|(index, receipt)| receipt_row(*index, receipt))
        .collect();
    body.push_str(&format!(
        "<table><thead><tr>{}<th>Acciones</th></tr></thead><tbody>{}</tbody></table>",
        headers, rows
    ));

    layout("Recibos", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("Recibí de"), "Recibí de");
    }

    #[test]
    fn test_form_has_every_field() {
        let html = submission_form();
        for field in ReceiptField::ALL {
            assert!(html.contains(&format!(r#"name="{}""#, field.name())));
        }
        assert!(html.contains(r#"action="/generate""#));
    }

    #[test]
    fn test_empty_listing() {
        let html = receipt_listing(&[], "");
        assert!(html.contains("No hay recibos."));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_rows_link_to_store_position() {
        let receipt = ReceiptRecord {
            date: "2024-01-01".to_string(),
            receipt_number: "R007".to_string(),
            received_from: "Jane Doe".to_string(),
            amount: "100.00".to_string(),
            payment_method: "efectivo".to_string(),
            concept: "rent".to_string(),
            saldo: "0.00".to_string(),
        };

        let html = receipt_listing(&[(6, receipt)], "");
        assert!(html.contains(r#"<a href="/receipts/6/image">Descargar</a>"#));
        assert!(html.contains("<td>R007</td>"));
        assert!(html.contains("<th>Acciones</th>"));
    }
}
