use crate::domains::SignupEmail;

// Lives only for the duration of one call to the submission handler;
// nothing is persisted.
pub struct SignupRequest {
    pub email: SignupEmail,
}
