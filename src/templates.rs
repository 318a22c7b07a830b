use tera::Tera;

pub const SUBSCRIPTION_FORM: &str = "subscriptions/subscription_form.html";
pub const SUBSCRIPTION_EMAIL_TEXT: &str = "subscriptions/subscription_email.txt";
pub const SUBSCRIPTION_EMAIL_HTML: &str = "subscriptions/subscription_email.html";

/// Build the template registry once, at startup.
///
/// Templates are embedded in the binary (paths relative to this file, checked
/// at compile time), so the server does not depend on the working directory.
/// Autoescaping applies to the `.html` templates only; the plain-text email
/// must carry the submitted values verbatim.
pub fn build_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../templates/base.html")),
        (
            SUBSCRIPTION_FORM,
            include_str!("../templates/subscriptions/subscription_form.html"),
        ),
        (
            SUBSCRIPTION_EMAIL_TEXT,
            include_str!("../templates/subscriptions/subscription_email.txt"),
        ),
        (
            SUBSCRIPTION_EMAIL_HTML,
            include_str!("../templates/subscriptions/subscription_email.html"),
        ),
    ])?;
    Ok(tera)
}
