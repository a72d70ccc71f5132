//! Minimal server-rendered pages for the accounts forms. Just enough HTML to
//! drive the signup/login flows; styling and real templating come later.

use crate::serializers::accounts::FormErrors;

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn errorlist(messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let items: String = messages
        .iter()
        .map(|m| format!("<li>{}</li>", escape(m)))
        .collect();
    format!("<ul class=\"errorlist\">{items}</ul>")
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\">\
         <title>{} · CodeConnect</title></head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

pub fn signup_page(username: &str, email: &str, hourly_rate: &str, errors: &FormErrors) -> String {
    let body = format!(
        concat!(
            "<h1>Sign up as a freelancer</h1>\n",
            "{non_field}",
            "<form method=\"post\" action=\"/accounts/signup/freelancer/\">\n",
            "<p><label for=\"id_username\">Username</label>\n",
            "<input type=\"text\" name=\"username\" id=\"id_username\" value=\"{username}\" maxlength=\"150\">{e_username}</p>\n",
            "<p><label for=\"id_email\">Email address</label>\n",
            "<input type=\"email\" name=\"email\" id=\"id_email\" value=\"{email}\" maxlength=\"254\">{e_email}</p>\n",
            "<p><label for=\"id_password1\">Password</label>\n",
            "<input type=\"password\" name=\"password1\" id=\"id_password1\">{e_password1}</p>\n",
            "<p><label for=\"id_password2\">Password confirmation</label>\n",
            "<input type=\"password\" name=\"password2\" id=\"id_password2\">{e_password2}</p>\n",
            "<p><label for=\"id_hourly_rate\">Your standard hourly rate (USD)</label>\n",
            "<input type=\"text\" name=\"hourly_rate\" id=\"id_hourly_rate\" value=\"{hourly_rate}\">\n",
            "<small>Used as the default for quote generation.</small>{e_hourly_rate}</p>\n",
            "<button type=\"submit\">Sign up</button>\n",
            "</form>"
        ),
        non_field = errorlist(errors.non_field()),
        username = escape(username),
        e_username = errorlist(errors.for_field("username")),
        email = escape(email),
        e_email = errorlist(errors.for_field("email")),
        e_password1 = errorlist(errors.for_field("password1")),
        e_password2 = errorlist(errors.for_field("password2")),
        hourly_rate = escape(hourly_rate),
        e_hourly_rate = errorlist(errors.for_field("hourly_rate")),
    );
    layout("Freelancer signup", &body)
}

pub fn login_page(email: &str, errors: &FormErrors) -> String {
    let body = format!(
        concat!(
            "<h1>Log in</h1>\n",
            "{non_field}",
            "<form method=\"post\" action=\"/accounts/login/\">\n",
            "<p><label for=\"id_email\">Email address</label>\n",
            "<input type=\"email\" name=\"email\" id=\"id_email\" value=\"{email}\" maxlength=\"254\">{e_email}</p>\n",
            "<p><label for=\"id_password\">Password</label>\n",
            "<input type=\"password\" name=\"password\" id=\"id_password\">{e_password}</p>\n",
            "<button type=\"submit\">Log in</button>\n",
            "</form>\n",
            "<p><a href=\"/accounts/signup/freelancer/\">Sign up as a freelancer</a></p>"
        ),
        non_field = errorlist(errors.non_field()),
        email = escape(email),
        e_email = errorlist(errors.for_field("email")),
        e_password = errorlist(errors.for_field("password")),
    );
    layout("Log in", &body)
}

pub fn server_error_page() -> String {
    layout(
        "Server error",
        "<h1>Something went wrong</h1>\n<p>Nothing was saved. Please try again.</p>",
    )
}

pub fn unbuilt_page(what: &str) -> String {
    layout(
        "Coming soon",
        &format!("<h1>{} is not built yet</h1>", escape(what)),
    )
}
