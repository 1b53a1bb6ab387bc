use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Fallback instruction used when the custom template is selected but the
/// user supplied no prompt text.
const CUSTOM_FALLBACK: &str = "Analyze this image and return the requested data in JSON format.";

/// Named extraction presets offered by the UI.
///
/// Every non-custom variant is bound to one fixed instruction string; the
/// `Custom` variant takes the caller's own text at resolution time.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, EnumString,
)]
pub enum ExtractionTemplate {
    #[strum(serialize = "General Description")]
    General,
    #[strum(serialize = "Invoice/Receipt")]
    Invoice,
    #[strum(serialize = "Cooking Recipe")]
    Recipe,
    #[strum(serialize = "Business Card")]
    BusinessCard,
    #[strum(serialize = "E-commerce Product")]
    Product,
    #[strum(serialize = "Full OCR Text")]
    Ocr,
    #[strum(serialize = "Custom Script")]
    Custom,
}

impl ExtractionTemplate {
    /// Resolve the instruction string sent to the inference service.
    ///
    /// `custom` is only consulted for [`ExtractionTemplate::Custom`]; an
    /// empty or absent custom prompt falls back to a generic instruction.
    /// Instruction content is not validated, arbitrary text is accepted.
    pub fn instruction(&self, custom: Option<&str>) -> String {
        match self {
            Self::General => {
                "Generate a comprehensive JSON object describing everything in this image, \
                 including objects, colors, lighting, and mood."
            }
            Self::Invoice => {
                "Extract all data from this invoice/receipt into JSON. Include vendor, date, \
                 total, tax, and an array of line items with description and price."
            }
            Self::Recipe => {
                "Extract the recipe from this image into JSON. Include title, prepTime, \
                 cookTime, ingredients (with amounts), and step-by-step instructions."
            }
            Self::BusinessCard => {
                "Extract contact information from this business card into JSON. Include name, \
                 jobTitle, company, email, phone, website, and address."
            }
            Self::Product => {
                "Analyze this product image and generate e-commerce metadata in JSON. Include \
                 name, category, detected_features, dominant_colors, and potential_tags."
            }
            Self::Ocr => {
                "Perform OCR on this image and return the text structured in JSON by layout \
                 blocks, lines, and raw_text."
            }
            Self::Custom => {
                return match custom {
                    Some(text) if !text.trim().is_empty() => text.to_string(),
                    _ => CUSTOM_FALLBACK.to_string(),
                };
            }
        }
        .to_string()
    }
}

/// Request body for `POST /api/extract`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtractRequest {
    /// Base64 of the raw image bytes, without any `data:` URL prefix.
    pub image_data: String,
    /// Declared media type of the image, e.g. `image/png`.
    pub mime_type: String,
    pub template: ExtractionTemplate,
    pub custom_prompt: Option<String>,
}

/// Successful extraction: the model's raw (trimmed) JSON text plus the
/// template it was produced with and the server-side capture time.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtractResponse {
    pub json: String,
    pub template: ExtractionTemplate,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

/// Pretty-print a JSON text for display.
///
/// Returns `None` when `raw` is not syntactically valid JSON; the caller
/// decides how to surface that (the UI shows the raw text with a notice).
pub fn pretty_print_json(raw: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    serde_json::to_string_pretty(&value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn fixed_templates_resolve_deterministically() {
        for template in ExtractionTemplate::iter().filter(|t| *t != ExtractionTemplate::Custom) {
            let first = template.instruction(None);
            let second = template.instruction(Some("ignored override"));
            assert_eq!(first, second, "{template} must ignore custom text");
            assert!(!first.is_empty());
        }
    }

    #[test]
    fn custom_template_uses_override_verbatim() {
        let resolved =
            ExtractionTemplate::Custom.instruction(Some("List every animal in the photo."));
        assert_eq!(resolved, "List every animal in the photo.");
    }

    #[test]
    fn custom_template_falls_back_when_empty() {
        assert_eq!(ExtractionTemplate::Custom.instruction(None), CUSTOM_FALLBACK);
        assert_eq!(ExtractionTemplate::Custom.instruction(Some("")), CUSTOM_FALLBACK);
        assert_eq!(ExtractionTemplate::Custom.instruction(Some("   ")), CUSTOM_FALLBACK);
    }

    #[test]
    fn labels_round_trip_through_strum() {
        for template in ExtractionTemplate::iter() {
            let label = template.to_string();
            let parsed: ExtractionTemplate = label.parse().unwrap();
            assert_eq!(parsed, template);
        }
        assert_eq!(ExtractionTemplate::Invoice.to_string(), "Invoice/Receipt");
    }

    #[test]
    fn pretty_print_preserves_content() {
        let raw = r#"{"vendor":"Acme","total":12.5,"items":[{"description":"widget"}]}"#;
        let pretty = pretty_print_json(raw).unwrap();
        assert!(pretty.contains('\n'));
        let reparsed: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        let original: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn pretty_print_rejects_non_json() {
        assert!(pretty_print_json("not json at all").is_none());
        assert!(pretty_print_json("```json\n{}\n```").is_none());
        assert!(pretty_print_json("").is_none());
    }
}
