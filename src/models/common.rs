use serde::{Deserialize, Serialize};

/// Visual style requested for generated images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    Photorealistic,
    Artistic,
    Minimalist,
    Commercial,
    Logo,
    Cartoon,
}

impl ImageStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStyle::Photorealistic => "photorealistic",
            ImageStyle::Artistic => "artistic",
            ImageStyle::Minimalist => "minimalist",
            ImageStyle::Commercial => "commercial",
            ImageStyle::Logo => "logo",
            ImageStyle::Cartoon => "cartoon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "4:3")]
    Classic,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Classic => "4:3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Standard,
    High,
    Ultra,
}

impl ImageQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageQuality::Standard => "standard",
            ImageQuality::High => "high",
            ImageQuality::Ultra => "ultra",
        }
    }
}

/// Edit operation applied to a base image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOperation {
    Add,
    Remove,
    Modify,
    StyleTransfer,
    Inpaint,
}

impl EditOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditOperation::Add => "add",
            EditOperation::Remove => "remove",
            EditOperation::Modify => "modify",
            EditOperation::StyleTransfer => "style_transfer",
            EditOperation::Inpaint => "inpaint",
        }
    }
}

/// How multiple source images are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionType {
    Merge,
    StyleTransfer,
    ProductMockup,
    Collage,
}

impl CompositionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompositionType::Merge => "merge",
            CompositionType::StyleTransfer => "style_transfer",
            CompositionType::ProductMockup => "product_mockup",
            CompositionType::Collage => "collage",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefinementType {
    Adjust,
    Enhance,
    Modify,
}

impl RefinementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefinementType::Adjust => "adjust",
            RefinementType::Enhance => "enhance",
            RefinementType::Modify => "modify",
        }
    }
}

/// Design context for high-fidelity text rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    Logo,
    Poster,
    Banner,
    BusinessCard,
    SocialMedia,
}

impl TextStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextStyle::Logo => "logo",
            TextStyle::Poster => "poster",
            TextStyle::Banner => "banner",
            TextStyle::BusinessCard => "business_card",
            TextStyle::SocialMedia => "social_media",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&AspectRatio::Landscape).unwrap(),
            "\"16:9\""
        );
        assert_eq!(
            serde_json::to_string(&EditOperation::StyleTransfer).unwrap(),
            "\"style_transfer\""
        );
        assert_eq!(
            serde_json::to_string(&TextStyle::BusinessCard).unwrap(),
            "\"business_card\""
        );
    }

    #[test]
    fn test_unknown_value_is_rejected() {
        assert!(serde_json::from_str::<ImageStyle>("\"sketch\"").is_err());
        assert!(serde_json::from_str::<ImageQuality>("\"hd\"").is_err());
    }
}
