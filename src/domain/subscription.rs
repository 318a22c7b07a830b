use super::Cpf;
use super::PhoneNumber;
use super::SubscriberEmail;
use super::SubscriberName;

/// A fully parsed registrant. Only produced by `SubscriptionForm::bind`, and
/// dropped once the confirmation email has been sent.
#[derive(Debug)]
pub struct Subscription {
    pub name: SubscriberName,
    pub cpf: Cpf,
    pub email: SubscriberEmail,
    pub phone: PhoneNumber,
}
