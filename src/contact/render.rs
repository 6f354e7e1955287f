//! Message body rendering.

use super::Submission;

/// HTML escaping for user-supplied text.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape `s` and turn every line separator into `<br>`.
fn html_lines(s: &str) -> String {
    escape_html(s)
        .replace("\r\n", "<br>")
        .replace(['\n', '\r'], "<br>")
}

/// Plain text body.
pub fn render_text(submission: &Submission) -> String {
    format!(
        "You have a new message from your contact form:\n\
         \n\
         Name: {}\n\
         Email: {}\n\
         \n\
         Message:\n\
         {}\n",
        submission.name(),
        submission.email(),
        submission.message()
    )
}

/// HTML body. All submitted text is escaped.
pub fn render_html(submission: &Submission) -> String {
    format!(
        "<h3>You have a new message from your contact form:</h3>\n\
         <p><strong>Name:</strong> {}</p>\n\
         <p><strong>Email:</strong> {}</p>\n\
         <hr>\n\
         <p><strong>Message:</strong></p>\n\
         <p>{}</p>\n",
        escape_html(submission.name()),
        escape_html(submission.email()),
        html_lines(submission.message())
    )
}
