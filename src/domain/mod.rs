mod cpf;
mod phone_number;
mod subscriber_email;
mod subscriber_name;
mod subscription;

pub use cpf::Cpf;
pub use phone_number::PhoneNumber;
pub use subscriber_email::SubscriberEmail;
pub use subscriber_name::SubscriberName;
pub use subscription::Subscription;
