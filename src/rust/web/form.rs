//! Server-side rendering of the specimen form.

use crate::registry::{AttributeDefinition, Domain, FieldValue, SpecimenRecord};

pub const PAGE_TITLE: &str = "Mushroom Data Interface";
pub const RESULT_LABEL: &str = "Result from the classification endpoint";

// Attributes with at most this many choices render as radio buttons.
const RADIO_LIMIT: usize = 2;

// Re-applies the visibility rule whenever a controlling checkbox changes, and
// blocks the submit button while a classification is in flight.
const FORM_SCRIPT: &str = r#"<script>
document.querySelectorAll('[data-shown-when]').forEach(function (field) {
  var flag = document.getElementById(field.dataset.shownWhen);
  flag.addEventListener('change', function () { field.hidden = !flag.checked; });
});
document.getElementById('specimen').addEventListener('submit', function () {
  document.getElementById('submit').disabled = true;
});
</script>
"#;

/// Renders the whole page for `record`, with `result` in the result area.
///
/// Gated attributes are rendered hidden when the visibility rule says so.
pub fn render_page(record: &SpecimenRecord<'_>, result: Option<&str>) -> String {
    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n</head>\n<body>\n", PAGE_TITLE));
    html.push_str(&format!("<h1>{}</h1>\n", PAGE_TITLE));
    html.push_str("<form id=\"specimen\" method=\"post\" action=\"/\">\n");

    for (attr, value) in record.iter() {
        render_field(&mut html, attr, value, record.is_visible(attr));
    }

    html.push_str(&format!(
        "<div class=\"field\">\n<label for=\"result\">{}</label>\n\
         <textarea id=\"result\" readonly rows=\"3\">{}</textarea>\n</div>\n",
        RESULT_LABEL,
        escape_html(result.unwrap_or_default())
    ));
    html.push_str("<button id=\"submit\" type=\"submit\">Submit</button>\n</form>\n");
    html.push_str(FORM_SCRIPT);
    html.push_str("</body>\n</html>\n");
    html
}

fn render_field(html: &mut String, attr: &AttributeDefinition, value: FieldValue, visible: bool) {
    let shown_when = attr
        .shown_when
        .map(|flag| format!(" data-shown-when=\"{}\"", flag))
        .unwrap_or_default();
    let hidden = if visible { "" } else { " hidden" };
    html.push_str(&format!(
        "<div class=\"field\" id=\"field-{}\"{}{}>\n",
        attr.name, shown_when, hidden
    ));

    match attr.domain {
        Domain::Continuous { min, max, .. } => {
            html.push_str(&format!(
                "<label for=\"{name}\">{label}</label>\n\
                 <input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"any\" value=\"{value}\">\n",
                name = attr.name,
                label = escape_html(attr.label),
                min = min,
                max = max,
                value = value.as_number().unwrap_or(min),
            ));
        }
        Domain::Flag { .. } => {
            let checked = if value.as_flag().unwrap_or(false) { " checked" } else { "" };
            html.push_str(&format!(
                "<label><input type=\"checkbox\" id=\"{name}\" name=\"{name}\" value=\"true\"{checked}> {label}</label>\n",
                name = attr.name,
                label = escape_html(attr.label),
                checked = checked,
            ));
        }
        Domain::Discrete { choices, .. } if choices.len() <= RADIO_LIMIT => {
            let selected = value.as_code();
            html.push_str(&format!(
                "<fieldset id=\"{}\">\n<legend>{}</legend>\n",
                attr.name,
                escape_html(attr.label)
            ));
            for choice in choices {
                let checked = if selected == Some(choice.code) { " checked" } else { "" };
                html.push_str(&format!(
                    "<label><input type=\"radio\" name=\"{}\" value=\"{}\"{}> {}</label>\n",
                    attr.name,
                    choice.code,
                    checked,
                    escape_html(choice.label)
                ));
            }
            html.push_str("</fieldset>\n");
        }
        Domain::Discrete { choices, .. } => {
            let selected = value.as_code();
            html.push_str(&format!(
                "<label for=\"{name}\">{label}</label>\n<select id=\"{name}\" name=\"{name}\">\n",
                name = attr.name,
                label = escape_html(attr.label),
            ));
            for choice in choices {
                let marker = if selected == Some(choice.code) { " selected" } else { "" };
                html.push_str(&format!(
                    "<option value=\"{}\"{}>{}</option>\n",
                    choice.code,
                    marker,
                    escape_html(choice.label)
                ));
            }
            html.push_str("</select>\n");
        }
    }

    html.push_str("</div>\n");
}

pub(crate) fn escape_html(text: &str) -> String {
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
