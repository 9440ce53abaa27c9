//! Prompt version records and validation.
//!
//! A prompt name owns an ordered sequence of versions. Hosts keep the list
//! newest-first; the selection reducer only needs the content-free
//! [`VersionSummary`] projection.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length for a prompt name in characters.
pub const MAX_PROMPT_NAME_LENGTH: usize = 255;

/// Maximum length for a version tag in characters.
pub const MAX_TAG_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A single version of a named prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptVersion {
    pub id: DbId,
    pub prompt_name: String,
    pub content: String,
    pub version_number: i32,
    pub tag: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PromptVersion {
    /// Content-free projection used for selection.
    pub fn summary(&self) -> VersionSummary {
        VersionSummary {
            id: self.id,
            version_number: self.version_number,
            tag: self.tag.clone(),
            created_at: self.created_at,
        }
    }

    /// Search filter used by version lists.
    ///
    /// An empty query matches every version. Otherwise the query is matched
    /// case-insensitively as a substring of the version number, the tag, or
    /// the content.
    pub fn matches_filter(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let q = query.to_lowercase();
        self.version_number.to_string().contains(&q)
            || self
                .tag
                .as_deref()
                .is_some_and(|tag| tag.to_lowercase().contains(&q))
            || self.content.to_lowercase().contains(&q)
    }
}

/// The fields of a version the selection reducer reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSummary {
    pub id: DbId,
    pub version_number: i32,
    pub tag: Option<String>,
    pub created_at: Timestamp,
}

/// Sort versions newest-first (descending version number).
pub fn sort_newest_first(versions: &mut [PromptVersion]) {
    versions.sort_by(|a, b| b.version_number.cmp(&a.version_number));
}

// ---------------------------------------------------------------------------
// Input DTOs
// ---------------------------------------------------------------------------

/// Input for creating a new version under a prompt name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPromptVersion {
    pub prompt_name: String,
    pub content: String,
    pub tag: Option<String>,
}

impl NewPromptVersion {
    /// Trim name and content; a blank tag becomes `None`.
    pub fn trimmed(self) -> Self {
        let tag = self
            .tag
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Self {
            prompt_name: self.prompt_name.trim().to_string(),
            content: self.content.trim().to_string(),
            tag,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        validate_prompt_name(&self.prompt_name)?;
        validate_content(&self.content)?;
        if let Some(tag) = &self.tag {
            validate_tag(tag)?;
        }
        Ok(())
    }
}

/// What an update does to a version's tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagUpdate {
    #[default]
    Keep,
    Set(String),
    Clear,
}

/// Partial update of an existing version. At least one field must be set.
///
/// In JSON an absent `tag` keeps the current tag and `null` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptVersionUpdate {
    pub content: Option<String>,
    #[serde(default, deserialize_with = "deserialize_tag_update")]
    pub tag: TagUpdate,
}

fn deserialize_tag_update<'de, D>(deserializer: D) -> Result<TagUpdate, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
        .map(|tag| tag.map_or(TagUpdate::Clear, TagUpdate::Set))
}

impl PromptVersionUpdate {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.content.is_none() && self.tag == TagUpdate::Keep {
            return Err(CoreError::Validation(
                "At least one field (content or tag) must be provided".to_string(),
            ));
        }
        if let Some(content) = &self.content {
            validate_content(content)?;
        }
        if let TagUpdate::Set(tag) = &self.tag {
            validate_tag(tag)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a prompt name: must be non-blank and within length limit.
pub fn validate_prompt_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Prompt name must not be empty".to_string(),
        ));
    }
    let len = name.chars().count();
    if len > MAX_PROMPT_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Prompt name exceeds maximum length of {MAX_PROMPT_NAME_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

/// Validate a tag: must be non-empty and within length limit.
pub fn validate_tag(tag: &str) -> Result<(), CoreError> {
    if tag.is_empty() {
        return Err(CoreError::Validation("Tag must not be empty".to_string()));
    }
    let len = tag.chars().count();
    if len > MAX_TAG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Tag exceeds maximum length of {MAX_TAG_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

/// Validate version content for create/update requests.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.is_empty() {
        return Err(CoreError::Validation(
            "Prompt content must not be empty".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn version(id: DbId, number: i32, tag: Option<&str>, content: &str) -> PromptVersion {
        let at = Utc.with_ymd_and_hms(2025, 1, number as u32, 12, 0, 0).unwrap();
        PromptVersion {
            id,
            prompt_name: "summarizer".to_string(),
            content: content.to_string(),
            version_number: number,
            tag: tag.map(str::to_string),
            created_at: at,
            updated_at: at,
        }
    }

    // -- matches_filter --

    #[test]
    fn empty_query_matches_everything() {
        assert!(version(1, 1, None, "").matches_filter(""));
    }

    #[test]
    fn filter_matches_version_number() {
        let v = version(1, 12, None, "text");
        assert!(v.matches_filter("12"));
        assert!(v.matches_filter("1"));
        assert!(!v.matches_filter("3"));
    }

    #[test]
    fn filter_matches_tag_case_insensitively() {
        let v = version(1, 1, Some("Production"), "text");
        assert!(v.matches_filter("prod"));
        assert!(v.matches_filter("PRODUCTION"));
    }

    #[test]
    fn filter_matches_content_case_insensitively() {
        let v = version(1, 1, None, "Summarize the ARTICLE below");
        assert!(v.matches_filter("article"));
        assert!(!v.matches_filter("poem"));
    }

    // -- summaries and ordering --

    #[test]
    fn summary_drops_content_and_keeps_identity() {
        let v = version(7, 3, Some("staging"), "body");
        let s = v.summary();
        assert_eq!(s.id, 7);
        assert_eq!(s.version_number, 3);
        assert_eq!(s.tag.as_deref(), Some("staging"));
        assert_eq!(s.created_at, v.created_at);
    }

    #[test]
    fn sort_newest_first_orders_by_descending_number() {
        let mut list = vec![
            version(1, 1, None, "a"),
            version(3, 3, None, "c"),
            version(2, 2, None, "b"),
        ];
        sort_newest_first(&mut list);
        let ids: Vec<DbId> = list.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    // -- NewPromptVersion --

    #[test]
    fn trimmed_normalizes_fields() {
        let input = NewPromptVersion {
            prompt_name: "  summarizer ".to_string(),
            content: "\n body \n".to_string(),
            tag: Some("   ".to_string()),
        }
        .trimmed();
        assert_eq!(input.prompt_name, "summarizer");
        assert_eq!(input.content, "body");
        assert_eq!(input.tag, None);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn blank_content_rejected_after_trim() {
        let input = NewPromptVersion {
            prompt_name: "summarizer".to_string(),
            content: "   ".to_string(),
            tag: None,
        }
        .trimmed();
        let err = input.validate().unwrap_err();
        assert!(err.to_string().contains("content must not be empty"));
    }

    // -- PromptVersionUpdate --

    #[test]
    fn update_requires_at_least_one_field() {
        let err = PromptVersionUpdate::default().validate().unwrap_err();
        assert!(err.to_string().contains("At least one field"));
    }

    #[test]
    fn update_with_tag_only_passes() {
        let update = PromptVersionUpdate {
            content: None,
            tag: TagUpdate::Set("production".to_string()),
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn update_with_empty_content_rejected() {
        let update = PromptVersionUpdate {
            content: Some(String::new()),
            tag: TagUpdate::Keep,
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn update_with_empty_tag_rejected() {
        let update = PromptVersionUpdate {
            content: None,
            tag: TagUpdate::Set(String::new()),
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn null_tag_in_json_clears_tag() {
        let update: PromptVersionUpdate = serde_json::from_str(r#"{"tag": null}"#).unwrap();
        assert_eq!(update.tag, TagUpdate::Clear);
        assert!(update.content.is_none());
        assert!(update.validate().is_ok());
    }

    #[test]
    fn absent_tag_in_json_keeps_tag() {
        let update: PromptVersionUpdate = serde_json::from_str(r#"{"content": "New"}"#).unwrap();
        assert_eq!(update.tag, TagUpdate::Keep);

        let empty: PromptVersionUpdate = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.tag, TagUpdate::Keep);
        assert!(empty.validate().is_err());
    }

    #[test]
    fn string_tag_in_json_sets_tag() {
        let update: PromptVersionUpdate = serde_json::from_str(r#"{"tag": "prod"}"#).unwrap();
        assert_eq!(update.tag, TagUpdate::Set("prod".to_string()));
    }

    // -- validate_prompt_name --

    #[test]
    fn empty_prompt_name_rejected() {
        let err = validate_prompt_name("  ").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn boundary_prompt_name_length_passes() {
        assert!(validate_prompt_name(&"n".repeat(MAX_PROMPT_NAME_LENGTH)).is_ok());
    }

    #[test]
    fn too_long_prompt_name_rejected() {
        let err = validate_prompt_name(&"n".repeat(MAX_PROMPT_NAME_LENGTH + 1)).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum length"));
    }

    // -- validate_tag --

    #[test]
    fn empty_tag_rejected() {
        assert!(validate_tag("").is_err());
    }

    #[test]
    fn too_long_tag_rejected() {
        let err = validate_tag(&"t".repeat(MAX_TAG_LENGTH + 1)).unwrap_err();
        assert!(err.to_string().contains("Tag exceeds maximum length"));
    }

    #[test]
    fn boundary_tag_length_passes() {
        assert!(validate_tag(&"t".repeat(MAX_TAG_LENGTH)).is_ok());
    }
}
