//! Email bodies for contact submissions

use ns_shared::sanitize::escape_html;

use crate::domain::entities::contact::ContactSubmission;

pub(crate) fn notification_subject(submission: &ContactSubmission) -> String {
    match &submission.company {
        Some(company) => format!("New inquiry from {} ({})", submission.name, company),
        None => format!("New inquiry from {}", submission.name),
    }
}

fn detail_rows(submission: &ContactSubmission, client_ip: Option<&str>) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Name", submission.name.clone()),
        ("Email", submission.email.clone()),
    ];
    let optional = [
        ("Phone", &submission.phone),
        ("Company", &submission.company),
        ("Service", &submission.service),
        ("Budget", &submission.budget),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            rows.push((label, value.clone()));
        }
    }
    if let Some(ip) = client_ip {
        rows.push(("IP", ip.to_string()));
    }
    rows
}

/// HTML and plain-text bodies for the team notification
pub(crate) fn notification_body(
    submission: &ContactSubmission,
    client_ip: Option<&str>,
) -> (String, String) {
    let rows = detail_rows(submission, client_ip);

    let mut html = String::from("<h2>New contact form submission</h2><table>");
    let mut text = String::from("New contact form submission\n\n");
    for (label, value) in &rows {
        html.push_str(&format!(
            "<tr><td><strong>{}</strong></td><td>{}</td></tr>",
            label,
            escape_html(value)
        ));
        text.push_str(&format!("{}: {}\n", label, value));
    }
    html.push_str("</table><h3>Message</h3>");
    html.push_str(&format!(
        "<p>{}</p>",
        escape_html(&submission.message).replace('\n', "<br>")
    ));
    text.push_str(&format!("\nMessage:\n{}\n", submission.message));

    (html, text)
}

pub(crate) fn confirmation_subject(site_name: &str) -> String {
    format!("Thanks for reaching out to {}", site_name)
}

/// HTML and plain-text bodies for the visitor confirmation
pub(crate) fn confirmation_body(submission: &ContactSubmission, site_name: &str) -> (String, String) {
    let first_name = submission
        .name
        .split_whitespace()
        .next()
        .unwrap_or(&submission.name);

    let html = format!(
        "<p>Hi {name},</p><p>Thanks for contacting {site}. We received your message and \
         will get back to you within one business day.</p><blockquote>{message}</blockquote>\
         <p>The {site} team</p>",
        name = escape_html(first_name),
        site = escape_html(site_name),
        message = escape_html(&submission.message).replace('\n', "<br>"),
    );
    let text = format!(
        "Hi {name},\n\nThanks for contacting {site}. We received your message and will get \
         back to you within one business day.\n\n> {message}\n\nThe {site} team\n",
        name = first_name,
        site = site_name,
        message = submission.message.replace('\n', "\n> "),
    );

    (html, text)
}
