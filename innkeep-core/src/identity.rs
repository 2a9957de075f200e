/// A caller identity established from a request credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub email: String,
    pub is_admin: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Missing credential")]
    MissingCredential,
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),
}

/// Turns a bearer credential into a caller identity.
pub trait IdentityVerifier: Send + Sync {
    fn verify(&self, credential: &str) -> Result<VerifiedIdentity, IdentityError>;
}
