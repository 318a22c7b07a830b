/// Brazilian taxpayer registry number: exactly 11 ASCII digits.
///
/// Check digits are not verified; the value is treated as an opaque string
/// and forwarded verbatim to the confirmation email.
#[derive(Debug)]
pub struct Cpf(String);

impl Cpf {
    pub const LEN: usize = 11;

    pub fn parse(cpf: String) -> Result<Self, String> {
        let cpf = cpf.trim();
        if cpf.len() != Self::LEN || !cpf.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("O CPF deve conter {} dígitos.", Self::LEN));
        }
        Ok(Self(cpf.to_string()))
    }
}

impl AsRef<str> for Cpf {
    fn as_ref(&self) -> &str { &self.0 }
}
