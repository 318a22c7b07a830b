use serde::Deserialize;
use serde::Serialize;

use crate::domain::Cpf;
use crate::domain::PhoneNumber;
use crate::domain::SubscriberEmail;
use crate::domain::SubscriberName;
use crate::domain::Subscription;

/// Order in which the fields are rendered (and validated).
pub const FIELD_NAMES: [&str; 4] = ["name", "cpf", "email", "phone"];

const REQUIRED: &str = "Este campo é obrigatório.";

/// Raw `POST /inscricao/` payload.
///
/// Every field defaults to an empty string, so that an empty (or partial)
/// payload still reaches the handler and can be re-rendered with errors,
/// instead of being rejected by the `Form` extractor with a 400.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubscriptionFormData {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub csrf_token: String,
}

#[derive(Debug, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: &'static str,
    pub value: String,
    pub errors: Vec<String>,
}

impl FormField {
    fn new(
        name: &'static str,
        label: &'static str,
        input_type: &'static str,
        value: &str,
    ) -> Self {
        Self {
            name,
            label,
            input_type,
            value: value.to_string(),
            errors: vec![],
        }
    }
}

/// What the subscription template renders: the four fields (with submitted
/// values and errors, once bound), plus errors that belong to no field.
#[derive(Debug, Serialize)]
pub struct SubscriptionForm {
    fields: Vec<FormField>,
    non_field_errors: Vec<String>,
    is_bound: bool,
}

impl SubscriptionForm {
    /// Empty form, as served by `GET /inscricao/`
    pub fn unbound() -> Self {
        let mut form = Self::with_values(&SubscriptionFormData::default());
        form.is_bound = false;
        form
    }

    fn with_values(data: &SubscriptionFormData) -> Self {
        let fields = vec![
            FormField::new("name", "Nome", "text", &data.name),
            FormField::new("cpf", "CPF", "text", &data.cpf),
            FormField::new("email", "Email", "email", &data.email),
            FormField::new("phone", "Telefone", "text", &data.phone),
        ];
        debug_assert!(fields.iter().map(|f| f.name).eq(FIELD_NAMES));
        Self {
            fields,
            non_field_errors: vec![],
            is_bound: true,
        }
    }

    /// Validate all fields. On failure, the returned form keeps the submitted
    /// values and carries an error for every invalid field (not just the
    /// first).
    pub fn bind(data: &SubscriptionFormData) -> Result<Subscription, Self> {
        let mut form = Self::with_values(data);

        let name = form.clean(0, SubscriberName::parse);
        let cpf = form.clean(1, Cpf::parse);
        let email = form.clean(2, SubscriberEmail::parse);
        let phone = form.clean(3, PhoneNumber::parse);

        match (name, cpf, email, phone) {
            (Some(name), Some(cpf), Some(email), Some(phone)) => Ok(Subscription {
                name,
                cpf,
                email,
                phone,
            }),
            _ => Err(form),
        }
    }

    /// Bound form that must be re-rendered regardless of whether its fields
    /// are valid (e.g. the CSRF check failed).
    pub fn reject(
        data: &SubscriptionFormData,
        error: impl Into<String>,
    ) -> Self {
        let mut form = Self::bind(data).err().unwrap_or_else(|| Self::with_values(data));
        form.non_field_errors.push(error.into());
        form
    }

    fn clean<T>(
        &mut self,
        index: usize,
        parse: impl FnOnce(String) -> Result<T, String>,
    ) -> Option<T> {
        let field = &mut self.fields[index];
        if field.value.trim().is_empty() {
            field.errors.push(REQUIRED.to_string());
            return None;
        }
        parse(field.value.clone())
            .map_err(|e| field.errors.push(e))
            .ok()
    }

    pub fn field_names(&self) -> Vec<&str> { self.fields.iter().map(|f| f.name).collect() }

    pub fn is_bound(&self) -> bool { self.is_bound }

    pub fn has_errors(&self) -> bool {
        !self.non_field_errors.is_empty() || self.fields.iter().any(|f| !f.errors.is_empty())
    }

    pub fn errors_for(
        &self,
        field: &str,
    ) -> &[String] {
        self.fields
            .iter()
            .find(|f| f.name == field)
            .map(|f| f.errors.as_slice())
            .unwrap_or_default()
    }

    pub fn non_field_errors(&self) -> &[String] { &self.non_field_errors }
}
