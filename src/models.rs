use serde::{Deserialize, Serialize};

/// Bearer token payload issued by the identity service.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Employee email
    pub sub: String,
    pub role: u8, // role id
    pub exp: usize,
}
