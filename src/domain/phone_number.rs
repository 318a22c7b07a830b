/// Contact phone, free-form (e.g. `43-3358-6180`, `43 3358-6180 ramal 2`).
/// Only presence and length are checked.
#[derive(Debug)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub const MAX_LEN: usize = 20;

    pub fn parse(phone: String) -> Result<Self, String> {
        let phone = phone.trim();
        if phone.is_empty() {
            Err("Informe o telefone.".to_string())
        } else if phone.chars().count() > Self::MAX_LEN {
            Err(format!(
                "O telefone deve ter no máximo {} caracteres.",
                Self::MAX_LEN
            ))
        } else {
            Ok(Self(phone.to_string()))
        }
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str { &self.0 }
}
