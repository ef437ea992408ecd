use std::fmt;

use crate::error::DomainError;

const MAX_TENANT_LEN: usize = 48;

/// Tenant identifier - the partition key every post operation is scoped by.
///
/// Restricted to characters that are safe in database and collection names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantId(String);

impl TenantId {
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();

        if raw.is_empty() {
            return Err(DomainError::InvalidTenant("tenant id is empty".to_string()));
        }
        if raw.len() > MAX_TENANT_LEN {
            return Err(DomainError::InvalidTenant(format!(
                "tenant id is longer than {MAX_TENANT_LEN} characters"
            )));
        }
        if let Some(c) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(DomainError::InvalidTenant(format!(
                "tenant id contains '{c}'"
            )));
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
