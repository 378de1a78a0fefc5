use std::fmt;

/// Operator-supplied login for the Primavera data service.
///
/// All three values are opaque and carried unvalidated. The base URL is
/// used exactly as typed when building upstream URLs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub service_base_url: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        service_base_url: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            service_base_url: service_base_url.into(),
        }
    }
}

// Keeps passwords out of log lines
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("service_base_url", &self.service_base_url)
            .finish()
    }
}
