//! Gallery category enum.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Closed set of portfolio categories. The string forms are what the site
/// frontend sends and filters on, and what `gallery_items.category` stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GalleryCategory {
    Branding,
    #[serde(rename = "UI/UX")]
    UiUx,
    Posters,
    #[serde(rename = "Social Media")]
    SocialMedia,
    Motion,
}

impl GalleryCategory {
    pub const ALL: [Self; 5] = [
        Self::Branding,
        Self::UiUx,
        Self::Posters,
        Self::SocialMedia,
        Self::Motion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Branding => "Branding",
            Self::UiUx => "UI/UX",
            Self::Posters => "Posters",
            Self::SocialMedia => "Social Media",
            Self::Motion => "Motion",
        }
    }
}

impl fmt::Display for GalleryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GalleryCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid category '{s}'. Must be one of: {}",
                    names.join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_display_name() {
        for cat in GalleryCategory::ALL {
            assert_eq!(cat.as_str().parse::<GalleryCategory>().unwrap(), cat);
        }
    }

    #[test]
    fn rejects_unknown_category() {
        let err = "Illustration".parse::<GalleryCategory>().unwrap_err();
        assert!(err.to_string().contains("Social Media"));
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&GalleryCategory::UiUx).unwrap();
        assert_eq!(json, "\"UI/UX\"");
    }
}
