//! API key resolution
//!
//! Keys are looked up once, when a provider is built, and then held by the
//! provider. Nothing reads the environment at query time.

/// An API key and the variable it came from
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: Option<String>,
    source: Option<String>,
}

impl Credentials {
    /// No key at all; the provider will report itself unusable
    pub fn none() -> Self {
        Self {
            api_key: None,
            source: None,
        }
    }

    pub fn from_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            source: None,
        }
    }

    /// First non-empty value among `vars` in the process environment
    pub fn from_env(vars: &[&str]) -> Self {
        Self::resolve(vars, |name| std::env::var(name).ok())
    }

    /// First non-empty value among `vars` according to `lookup`
    pub fn resolve(vars: &[&str], lookup: impl Fn(&str) -> Option<String>) -> Self {
        vars.iter()
            .find_map(|&var| {
                lookup(var)
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .map(|key| Self {
                        api_key: Some(key),
                        source: Some(var.to_string()),
                    })
            })
            .unwrap_or_else(Self::none)
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Name of the environment variable the key was read from
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_present(&self) -> bool {
        self.api_key.is_some()
    }
}

// Never print the key itself
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("source", &self.source)
            .finish()
    }
}
