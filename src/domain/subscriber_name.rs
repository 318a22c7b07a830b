use unicode_segmentation::UnicodeSegmentation;

/// Registrant name, as printed on the confirmation email.
///
/// Rejects empty/whitespace and more than `MAX_LEN` graphemes; any other
/// character is fine, tera escapes it on the way out. The field is private;
/// use `SubscriberName::parse`.
#[derive(Debug)]
pub struct SubscriberName(String);

impl SubscriberName {
    pub const MAX_LEN: usize = 100;

    pub fn parse(name: String) -> Result<Self, String> {
        let empty = name.trim().is_empty();
        let too_long = name.graphemes(true).count() > Self::MAX_LEN;
        match (empty, too_long) {
            (true, _) => Err("Informe o nome.".to_string()),
            (_, true) => Err(format!(
                "O nome deve ter no máximo {} caracteres.",
                Self::MAX_LEN
            )),
            _ => Ok(Self(name.trim().to_string())),
        }
    }
}

impl AsRef<str> for SubscriberName {
    fn as_ref(&self) -> &str { &self.0 }
}
