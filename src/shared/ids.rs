use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

const HEX: &[u8; 16] = b"0123456789abcdef";

pub fn validate_identifier_value(kind: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{kind} must be non-empty"));
    }
    if value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
    {
        return Ok(());
    }
    Err(format!(
        "{kind} must use only ASCII letters, digits, '-' or '_'"
    ))
}

/// Opaque identifier of a workflow state. Assigned once when the state is
/// created and never changed by reordering or renaming.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct WorkflowStateId(String);

impl WorkflowStateId {
    pub fn parse(raw: &str) -> Result<Self, String> {
        validate_identifier_value("workflow state id", raw)?;
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WorkflowStateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::borrow::Borrow<str> for WorkflowStateId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for WorkflowStateId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl<'de> Deserialize<'de> for WorkflowStateId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .map_err(|err| D::Error::custom(format!("invalid workflow state id `{raw}`: {err}")))
    }
}

/// Hands out workflow state ids for one edit session. The random prefix keeps
/// ids from separate sessions apart; the counter keeps them unique within one.
#[derive(Debug, Clone)]
pub struct StateIdAllocator {
    prefix: String,
    next: u64,
}

impl StateIdAllocator {
    pub fn new() -> Self {
        Self::with_prefix(&session_prefix())
    }

    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: 1,
        }
    }

    pub fn next_id(&mut self) -> WorkflowStateId {
        let id = format!("ws-{}-{}", self.prefix, self.next);
        self.next += 1;
        WorkflowStateId(id)
    }
}

impl Default for StateIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

fn session_prefix() -> String {
    let mut bytes = [0_u8; 4];
    if getrandom::getrandom(&mut bytes).is_err() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(0);
        bytes = nanos.to_le_bytes();
    }
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_issues_distinct_parseable_ids() {
        let mut allocator = StateIdAllocator::with_prefix("abcd");
        let first = allocator.next_id();
        let second = allocator.next_id();
        assert_eq!(first.as_str(), "ws-abcd-1");
        assert_eq!(second.as_str(), "ws-abcd-2");
        assert!(WorkflowStateId::parse(first.as_str()).is_ok());
    }

    #[test]
    fn random_prefix_is_hex() {
        let prefix = session_prefix();
        assert_eq!(prefix.len(), 8);
        assert!(prefix.chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[test]
    fn parse_rejects_blank_and_spaced_ids() {
        assert!(WorkflowStateId::parse("").is_err());
        assert!(WorkflowStateId::parse("in progress").is_err());
    }
}
