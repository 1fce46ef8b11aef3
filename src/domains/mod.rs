mod signup_email;
mod signup_request;

pub use signup_email::*;
pub use signup_request::*;
