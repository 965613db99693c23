//! Instruction rendering for the Gemini models.
//!
//! Every function here is a pure function of its inputs: no clock reads, no
//! randomness, no I/O. Unrecognized or absent options select the default
//! branch, so every builder is total over its input space.

use crate::models::common::{
    AspectRatio, CompositionType, EditOperation, ImageQuality, ImageStyle, RefinementType,
    TextStyle,
};

/// Ordered category table for [`infer_category`]. The first entry whose
/// keyword set matches wins.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "automotive",
        &["car", "vehicle", "auto", "truck", "motorcycle", "ferrari", "tesla"],
    ),
    (
        "portrait",
        &["person", "face", "portrait", "human", "woman", "man", "child"],
    ),
    (
        "landscape",
        &["mountain", "ocean", "forest", "desert", "nature", "sunset", "sunrise"],
    ),
    (
        "architecture",
        &["building", "house", "city", "urban", "structure", "tower"],
    ),
    (
        "food",
        &["food", "meal", "restaurant", "cooking", "kitchen", "dish"],
    ),
    (
        "fashion",
        &["fashion", "clothing", "style", "model", "dress", "outfit"],
    ),
    (
        "technology",
        &["tech", "computer", "phone", "gadget", "device", "digital"],
    ),
];

/// Instruction asking the model to rewrite `prompt` as a professional image
/// generation prompt.
pub fn enhancement_instruction(prompt: &str, category: &str, style: &str) -> String {
    format!(
        r#"You are an expert prompt engineer for AI image generation. You specialize in creating highly detailed, optimized prompts.

Original prompt: "{prompt}"
Category: {category}
Style preference: {style}

Transform this into a professional AI image generation prompt:

Enhancement Rules:
1. Add specific visual details: lighting, composition, perspective
2. Include technical photography terms: "shot with", lens specs, camera settings
3. Add quality boosters: "high detail", "8K", "professional photography", "award-winning"
4. Specify style descriptors that match the category
5. Include mood and atmosphere details
6. Add artistic techniques if relevant: "depth of field", "bokeh", "golden ratio composition"
7. Keep under 150 words but be descriptive
8. Optimize for DALL-E 3, Midjourney, and Stable Diffusion

Return ONLY the enhanced prompt, no explanations:"#
    )
}

/// Instruction requesting `count` diverse prompts for `category`, formatted
/// as a numbered list. The caller parses the list back out of the raw text.
pub fn suggestion_instruction(category: &str, count: u8) -> String {
    format!(
        r#"Generate {count} creative and highly detailed image prompts for {category} imagery.

Each prompt should be:
- 30-60 words long
- Professionally detailed with specific visual elements
- Include lighting, mood, composition details
- Add technical photography specifications
- Optimized for AI image generation (DALL-E 3, Midjourney, Stable Diffusion)
- Unique and diverse in approach
- Include quality keywords like "8K", "professional", "award-winning"

Category: {category}

Format as numbered list:
1. [First detailed prompt with technical specs]
2. [Second detailed prompt with different style/mood]
3. [Third detailed prompt with unique perspective]"#
    )
}

/// Instruction requesting a structured judgment of an existing prompt as a
/// JSON object.
pub fn analysis_instruction(prompt: &str) -> String {
    format!(
        r#"Analyze this AI image generation prompt and provide improvement suggestions:

Prompt: "{prompt}"

Provide:
1. Analysis: What's good and what's missing
2. Improvements: 3-5 specific suggestions
3. Score: Rate the prompt quality from 1-10

Format as JSON:
{{
  "analysis": "detailed analysis",
  "improvements": ["improvement 1", "improvement 2", "improvement 3"],
  "score": 7
}}"#
    )
}

fn style_descriptor(style: ImageStyle) -> &'static str {
    match style {
        ImageStyle::Photorealistic => "photorealistic, professional photography, natural lighting",
        ImageStyle::Artistic => "artistic interpretation, painterly style, expressive brushwork",
        ImageStyle::Minimalist => "minimalist design, clean lines, generous negative space",
        ImageStyle::Commercial => "commercial studio photography, softbox lighting, advertising polish",
        ImageStyle::Logo => "flat vector logo artwork, crisp edges, scalable shapes",
        ImageStyle::Cartoon => "cartoon illustration, bold outlines, vibrant flat colors",
    }
}

fn quality_descriptor(quality: ImageQuality) -> Option<&'static str> {
    match quality {
        ImageQuality::Standard => None,
        ImageQuality::High => Some("high quality, 4K, sharp focus"),
        ImageQuality::Ultra => Some("ultra-high quality, 4K, extremely detailed"),
    }
}

fn ratio_descriptor(ratio: AspectRatio) -> &'static str {
    match ratio {
        AspectRatio::Square => "balanced square composition",
        AspectRatio::Landscape => "wide panoramic framing",
        AspectRatio::Portrait => "vertical composition",
        AspectRatio::Classic => "classic 4:3 framing",
    }
}

/// Appends the fixed descriptor phrases for the selected style, quality tier
/// and aspect ratio. Absent options append nothing, so the identity case
/// returns `base` untouched.
pub fn style_enhancement(
    base: &str,
    style: Option<ImageStyle>,
    ratio: Option<AspectRatio>,
    quality: Option<ImageQuality>,
) -> String {
    let mut descriptors: Vec<&str> = Vec::new();

    if let Some(style) = style {
        descriptors.push(style_descriptor(style));
    }
    if let Some(quality) = quality {
        if let Some(descriptor) = quality_descriptor(quality) {
            descriptors.push(descriptor);
        }
    }
    if let Some(ratio) = ratio {
        descriptors.push(ratio_descriptor(ratio));
    }

    if descriptors.is_empty() {
        base.to_string()
    } else {
        format!("{}, {}", base, descriptors.join(", "))
    }
}

/// Operation-specific edit instruction, phrased to bias the model toward
/// natural blending with the source image.
pub fn edit_instruction(prompt: &str, operation: Option<EditOperation>, preserve_original: bool) -> String {
    let mut instruction = match operation {
        Some(EditOperation::Add) => format!(
            "Add the following to this image: {prompt}. Blend the new elements naturally into the existing lighting and perspective."
        ),
        Some(EditOperation::Remove) => format!(
            "Remove the following from this image: {prompt}. Fill the cleared area so it matches the surrounding scene seamlessly."
        ),
        Some(EditOperation::Modify) => format!(
            "Modify this image as follows: {prompt}. Keep the change consistent with the original lighting and style."
        ),
        Some(EditOperation::StyleTransfer) => format!(
            "Redraw this image in the following style: {prompt}. Preserve the subject and composition while applying the style throughout."
        ),
        Some(EditOperation::Inpaint) => format!(
            "Repair and fill in this image according to: {prompt}. Reconstruct the area so the result looks natural and untouched."
        ),
        None => format!("Edit this image according to: {prompt}. Make the result look natural."),
    };

    if preserve_original {
        instruction.push_str(" Preserve every other part of the original image exactly as it is.");
    }

    instruction
}

/// Composition instruction keyed by composition type; each template
/// references the number of supplied source images.
pub fn composition_instruction(
    prompt: &str,
    composition_type: Option<CompositionType>,
    image_count: usize,
) -> String {
    match composition_type {
        Some(CompositionType::Merge) => format!(
            "Merge these {image_count} images into one seamless scene: {prompt}. Unify lighting, perspective and color grading across the result."
        ),
        Some(CompositionType::StyleTransfer) => format!(
            "Using these {image_count} images, apply the artistic style of the first image to the content of the others: {prompt}. Keep the subjects recognizable."
        ),
        Some(CompositionType::ProductMockup) => format!(
            "Create a product mockup from these {image_count} images: {prompt}. Place the product naturally with realistic shadows and reflections."
        ),
        Some(CompositionType::Collage) => format!(
            "Arrange these {image_count} images into a cohesive collage: {prompt}. Balance the layout and keep a consistent color palette."
        ),
        None => format!("Combine these {image_count} images into a single picture: {prompt}."),
    }
}

/// Refinement instruction prefixed with a rendering of the prior turns, so
/// the model sees the conversation that produced the current image.
pub fn refinement_instruction(
    prompt: &str,
    history: &[String],
    refinement_type: Option<RefinementType>,
) -> String {
    let instruction = match refinement_type {
        Some(RefinementType::Adjust) => format!(
            "Adjust the image as follows: {prompt}. Apply only this change and keep everything else intact."
        ),
        Some(RefinementType::Enhance) => format!(
            "Enhance the image as follows: {prompt}. Improve detail and clarity without altering the composition."
        ),
        Some(RefinementType::Modify) => format!(
            "Modify the image as follows: {prompt}. Keep the overall scene recognizable."
        ),
        None => format!("Refine the image as follows: {prompt}."),
    };

    if history.is_empty() {
        instruction
    } else {
        format!(
            "Previous refinement steps:\n{}\n\n{}",
            history.join("\n"),
            instruction
        )
    }
}

fn text_style_clause(style: TextStyle) -> &'static str {
    match style {
        TextStyle::Logo => {
            "Production quality: a flat, scalable logo that stays balanced and readable at small sizes."
        }
        TextStyle::Poster => {
            "Production quality: a print-ready poster with strong visual hierarchy."
        }
        TextStyle::Banner => {
            "Production quality: a wide banner layout with a clear focal flow toward the text."
        }
        TextStyle::BusinessCard => {
            "Production quality: a clean business card layout at standard card proportions."
        }
        TextStyle::SocialMedia => {
            "Production quality: a bold social media graphic that reads well in a scrolling feed."
        }
    }
}

/// Design brief for high-fidelity text rendering. Always closes with the
/// legibility requirement.
pub fn text_design_instruction(
    text: &str,
    style: TextStyle,
    color_scheme: Option<&str>,
    font_style: Option<&str>,
    background: Option<&str>,
) -> String {
    let mut brief = format!(
        "Create a {} design that displays the exact text \"{}\".",
        style.as_str().replace('_', " "),
        text
    );

    if let Some(font_style) = font_style {
        brief.push_str(&format!(" Typography: {font_style}."));
    }
    if let Some(color_scheme) = color_scheme {
        brief.push_str(&format!(" Color scheme: {color_scheme}."));
    }
    if let Some(background) = background {
        brief.push_str(&format!(" Background: {background}."));
    }

    brief.push(' ');
    brief.push_str(text_style_clause(style));
    brief.push_str(" Every character must be perfectly legible and spelled exactly as given.");
    brief
}

/// Case-insensitive keyword match against the fixed category table; the
/// first matching entry wins, `"general"` otherwise.
pub fn infer_category(prompt: &str) -> &'static str {
    let lower = prompt.to_lowercase();

    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|keyword| lower.contains(keyword)) {
            return category;
        }
    }

    "general"
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STYLES: [ImageStyle; 6] = [
        ImageStyle::Photorealistic,
        ImageStyle::Artistic,
        ImageStyle::Minimalist,
        ImageStyle::Commercial,
        ImageStyle::Logo,
        ImageStyle::Cartoon,
    ];

    #[test]
    fn test_style_descriptors_are_exclusive() {
        for style in ALL_STYLES {
            let output = style_enhancement("a red car", Some(style), None, None);
            for other in ALL_STYLES {
                let descriptor = style_descriptor(other);
                if other == style {
                    assert!(output.contains(descriptor), "{output} missing own descriptor");
                } else {
                    assert!(
                        !output.contains(descriptor),
                        "{output} leaked descriptor of {other:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_style_enhancement_identity_case() {
        assert_eq!(style_enhancement("a red car", None, None, None), "a red car");
        // Standard quality appends nothing on its own.
        assert_eq!(
            style_enhancement("a red car", None, None, Some(ImageQuality::Standard)),
            "a red car"
        );
    }

    #[test]
    fn test_quality_and_ratio_descriptors() {
        let output = style_enhancement(
            "a lighthouse",
            None,
            Some(AspectRatio::Portrait),
            Some(ImageQuality::Ultra),
        );
        assert!(output.contains("ultra-high quality"));
        assert!(output.contains("4K"));
        assert!(output.contains("vertical composition"));
        assert!(output.starts_with("a lighthouse, "));
    }

    #[test]
    fn test_infer_category_first_table_entry_wins() {
        // "car" (automotive) and "sunset" (landscape) both match; automotive
        // is declared earlier.
        assert_eq!(infer_category("a car driving into the sunset"), "automotive");
        assert_eq!(infer_category("A SUNSET over the ocean"), "landscape");
        assert_eq!(infer_category("abstract swirls"), "general");
    }

    #[test]
    fn test_enhancement_instruction_embeds_inputs() {
        let instruction = enhancement_instruction("a cat", "portrait", "artistic");
        assert!(instruction.contains("Original prompt: \"a cat\""));
        assert!(instruction.contains("Category: portrait"));
        assert!(instruction.contains("Style preference: artistic"));
        assert!(instruction.contains("Return ONLY the enhanced prompt"));
    }

    #[test]
    fn test_suggestion_instruction_mentions_count() {
        let instruction = suggestion_instruction("food", 5);
        assert!(instruction.starts_with("Generate 5 creative"));
        assert!(instruction.contains("Format as numbered list"));
    }

    #[test]
    fn test_edit_instruction_preservation_clause() {
        let with = edit_instruction("a hat", Some(EditOperation::Add), true);
        let without = edit_instruction("a hat", Some(EditOperation::Add), false);
        assert!(with.contains("Preserve every other part"));
        assert!(!without.contains("Preserve every other part"));
        assert!(without.starts_with("Add the following"));
    }

    #[test]
    fn test_edit_instruction_default_branch() {
        let instruction = edit_instruction("make it pop", None, false);
        assert!(instruction.starts_with("Edit this image according to: make it pop"));
    }

    #[test]
    fn test_composition_references_image_count() {
        let instruction =
            composition_instruction("beach scene", Some(CompositionType::Collage), 4);
        assert!(instruction.contains("these 4 images"));
        let fallback = composition_instruction("beach scene", None, 2);
        assert!(fallback.contains("these 2 images"));
    }

    #[test]
    fn test_refinement_history_prefix() {
        let history = vec!["make it brighter".to_string(), "add a moon".to_string()];
        let instruction =
            refinement_instruction("shift colors to blue", &history, Some(RefinementType::Adjust));
        assert!(instruction.starts_with("Previous refinement steps:\nmake it brighter\nadd a moon"));
        assert!(instruction.contains("Adjust the image as follows: shift colors to blue"));

        let fresh = refinement_instruction("shift colors to blue", &[], None);
        assert!(fresh.starts_with("Refine the image"));
    }

    #[test]
    fn test_text_design_instruction_closes_with_legibility() {
        let brief = text_design_instruction(
            "GRAND OPENING",
            TextStyle::Poster,
            Some("red and gold"),
            Some("bold serif"),
            None,
        );
        assert!(brief.contains("the exact text \"GRAND OPENING\""));
        assert!(brief.contains("Typography: bold serif."));
        assert!(brief.contains("Color scheme: red and gold."));
        assert!(!brief.contains("Background:"));
        assert!(brief.ends_with("spelled exactly as given."));
    }

    #[test]
    fn test_composers_are_deterministic() {
        let a = enhancement_instruction("a dog", "general", "photorealistic");
        let b = enhancement_instruction("a dog", "general", "photorealistic");
        assert_eq!(a, b);
    }
}
