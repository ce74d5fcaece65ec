//! Portfolio gallery item.

use serde::{Deserialize, Serialize};

use super::{require, Record, Validate};
use crate::errors::AppError;

/// A slide design shown in the portfolio gallery. Images are external URLs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SlideWork {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub designer_name: String,
    pub image_url: String,
}

/// Request body for adding a portfolio item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSlideWork {
    pub title: String,
    #[serde(default)]
    pub designer_name: String,
    pub image_url: String,
}

/// Request body for updating a portfolio item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideWorkPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Validate for NewSlideWork {
    fn validate(&self) -> Result<(), AppError> {
        require(&self.title, "Portfolio title is required")?;
        require(&self.image_url, "Portfolio image url is required")
    }
}

impl Record for SlideWork {
    const COLLECTION: &'static str = "portfolio";
    const KIND: &'static str = "Portfolio item";

    type Draft = NewSlideWork;
    type Patch = SlideWorkPatch;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_slide_work_requires_image_url() {
        let work = NewSlideWork {
            title: "Annual report deck".to_string(),
            designer_name: "Sara".to_string(),
            image_url: " ".to_string(),
        };
        assert!(matches!(
            work.validate(),
            Err(AppError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_slide_work_uses_camel_case_fields() {
        let json = serde_json::to_value(SlideWork {
            id: "p1".to_string(),
            title: "Pitch".to_string(),
            designer_name: "Omar".to_string(),
            image_url: "https://img.example/p1.png".to_string(),
        })
        .unwrap();
        assert_eq!(json["designerName"], "Omar");
        assert_eq!(json["imageUrl"], "https://img.example/p1.png");
    }
}
