//! Error types shared by the page components.
//!
//! None of these ever reach the visitor as an error message. Storage errors
//! degrade the reveal to a fresh visit, embed errors switch a region to its
//! fallback, and region errors are caught by the region boundary.

/// Errors from the persisted key/value store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,

    #[error("failed to read `{key}`: {reason}")]
    Read { key: String, reason: String },

    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
}

/// Errors from third-party embeds
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmbedError {
    #[error("failed to inject script `{id}`: {reason}")]
    ScriptInjection { id: String, reason: String },

    #[error("{embed} failed to load: {reason}")]
    LoadFailed { embed: String, reason: String },

    #[error("{embed} is not supported by this browser: {missing}")]
    Unsupported { embed: String, missing: String },
}

/// Errors while loading or validating the site configuration
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("failed to parse site config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid site config: {0}")]
    Invalid(String),

    #[error("failed to read site config: {0}")]
    Io(#[from] std::io::Error),
}

/// An unexpected failure while rendering one region of the page
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("region `{region}` failed to render: {reason}")]
pub struct RegionError {
    pub region: String,
    pub reason: String,
}

impl RegionError {
    pub fn new(region: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            reason: reason.into(),
        }
    }
}

impl From<EmbedError> for RegionError {
    fn from(err: EmbedError) -> Self {
        let region = match &err {
            EmbedError::ScriptInjection { id, .. } => id.clone(),
            EmbedError::LoadFailed { embed, .. } | EmbedError::Unsupported { embed, .. } => {
                embed.clone()
            }
        };
        Self::new(region, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_messages() {
        let err = StorageError::Read {
            key: "lastVisit".to_string(),
            reason: "SecurityError".to_string(),
        };
        assert_eq!(err.to_string(), "failed to read `lastVisit`: SecurityError");
        assert_eq!(StorageError::Unavailable.to_string(), "storage is not available");
    }

    #[test]
    fn test_region_error_from_embed_error() {
        let err = EmbedError::LoadFailed {
            embed: "scheduling".to_string(),
            reason: "network".to_string(),
        };
        let region: RegionError = err.into();
        assert_eq!(region.region, "scheduling");
        assert!(region.reason.contains("network"));
    }

    #[test]
    fn test_site_error_from_json() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SiteError = parse_err.into();
        assert!(err.to_string().starts_with("failed to parse site config"));
    }
}
