use shared_types::{ContactRecord, Notification, NotificationLevel};
use std::fmt::Write;

pub(crate) const TITLE: &str = "Important Contacts";
pub(crate) const EMPTY_STATE: &str = "No contacts available";

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: #fff; color: #000; }
main { max-width: 900px; margin: 0 auto; padding: 32px 16px 96px; }
h1 { font-size: 1.5rem; font-weight: 400; text-align: center; }
ul { list-style: none; padding: 0; }
li form { margin: 0; }
li button {
  display: flex; gap: 16px; align-items: center; width: 100%; padding: 8px 16px;
  border: 0; background: none; text-align: left; font: inherit; cursor: pointer;
}
.phone { color: #555; font-size: 0.875rem; }
.empty { text-align: center; color: #555; }
.export {
  width: 100%; margin-top: 32px; padding: 10px; border: 0; border-radius: 4px;
  background: #000; color: #fff; font: inherit; text-transform: uppercase; cursor: pointer;
}
.banner {
  position: fixed; left: 50%; bottom: 24px; transform: translateX(-50%);
  display: flex; gap: 16px; align-items: center; padding: 6px 16px; border-radius: 4px; color: #fff;
}
.banner button { border: 0; background: none; color: inherit; font: inherit; cursor: pointer; }
.success { background: #2e7d32; }
.warning { background: #ed6c02; }
.error { background: #d32f2f; }
"#;

pub(crate) fn render_page(
    contacts: &[ContactRecord],
    notification: Option<&Notification>,
) -> String {
    let mut html = String::with_capacity(2048);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{TITLE}</title>\n<style>{STYLE}</style>\n</head>");
    html.push_str("<body>\n<main>\n");
    let _ = writeln!(html, "<h1>{TITLE}</h1>");

    if contacts.is_empty() {
        let _ = writeln!(html, "<p class=\"empty\">{EMPTY_STATE}</p>");
    } else {
        html.push_str("<ul>\n");
        for contact in contacts {
            render_row(&mut html, contact);
        }
        html.push_str("</ul>\n");
    }

    html.push_str(
        "<form method=\"post\" action=\"/export\">\
         <button class=\"export\" type=\"submit\">&#x2295; Add to Contacts</button></form>\n",
    );
    html.push_str("</main>\n");

    if let Some(notification) = notification {
        render_banner(&mut html, notification);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_row(html: &mut String, contact: &ContactRecord) {
    let checked = if contact.is_selected() { " checked" } else { "" };
    let _ = writeln!(
        html,
        "<li><form method=\"post\" action=\"/contacts/{id}/toggle\"><button type=\"submit\">\
         <input type=\"checkbox\" tabindex=\"-1\" disabled{checked}>\
         <span><span class=\"name\">{name}</span><br><span class=\"phone\">{phone}</span></span>\
         </button></form></li>",
        id = contact.id(),
        name = escape_html(contact.name()),
        phone = escape_html(contact.display_phone()),
    );
}

fn render_banner(html: &mut String, notification: &Notification) {
    let class = match notification.level {
        NotificationLevel::Success => "success",
        NotificationLevel::Warning => "warning",
        NotificationLevel::Error => "error",
    };
    let _ = writeln!(
        html,
        "<div class=\"banner {class}\" role=\"alert\"><span>{text}</span>\
         <form method=\"post\" action=\"/notification/dismiss\">\
         <button type=\"submit\" aria-label=\"close\">&times;</button></form></div>",
        text = escape_html(&notification.text),
    );
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
