use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccessError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Role {role} is not permitted for this operation")]
    Unauthorized { role: String },
}
