//! Internal guidelines singleton.

use serde::{Deserialize, Serialize};

/// Collection holding site-wide settings documents.
pub const SETTINGS_COLLECTION: &str = "settings";

/// Fixed document id of the guidelines singleton.
pub const GUIDELINES_DOC_ID: &str = "guidelines";

/// Body written the first time the guidelines are read from an empty store.
pub const DEFAULT_GUIDELINES: &str = "# Internal Guidelines\n\
\n\
## Working hours\n\
Core hours are 9:00 to 15:00. Let the team know in advance if you will be away.\n\
\n\
## Client files\n\
Keep every client deck in the shared drive under the client's folder. Never send source files without approval.\n\
\n\
## Design quality\n\
Every deck is reviewed by a second designer before delivery.\n";

/// The guidelines document, a markdown-like free-text body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GuidelinesData {
    #[serde(default)]
    pub content: String,
}

impl Default for GuidelinesData {
    fn default() -> Self {
        Self {
            content: DEFAULT_GUIDELINES.to_string(),
        }
    }
}

/// Body of a guidelines save. The content is required so a request without it
/// never overwrites the stored text.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveGuidelinesRequest {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_request_requires_content() {
        assert!(serde_json::from_str::<SaveGuidelinesRequest>("{}").is_err());
        assert!(serde_json::from_str::<SaveGuidelinesRequest>(r#"{"contents": "x"}"#).is_err());

        let request: SaveGuidelinesRequest =
            serde_json::from_str(r##"{"content": "# Rules"}"##).unwrap();
        assert_eq!(request.content, "# Rules");
    }

    #[test]
    fn test_stored_document_without_content_decodes_empty() {
        let data: GuidelinesData = serde_json::from_str("{}").unwrap();
        assert_eq!(data.content, "");
    }
}
