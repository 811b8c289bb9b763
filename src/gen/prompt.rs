//! Prompt construction. Everything here is a pure function over static
//! lookup tables; unknown keys fall back to a fixed default entry, so the
//! builder never fails.

use crate::r#gen::GenerateRequest;

/// A post persona: the system prompt sent to the completion service plus
/// content guidance woven into the user prompt.
pub struct Persona {
    pub key: &'static str,
    pub name: &'static str,
    pub system_prompt: &'static str,
    pub formatting_style: &'static str,
    pub visual_style: &'static str,
}

/// The first entry is the fallback for unknown keys.
pub const PERSONAS: [Persona; 8] = [
    Persona {
        key: "professional",
        name: "Professional",
        system_prompt: "You are a professional LinkedIn post writer. Create engaging, professional content that builds thought leadership and drives engagement.",
        formatting_style: "Use professional language with strategic use of emojis, bullet points, and clear call-to-actions.",
        visual_style: "clean, corporate, business-focused, professional lighting, modern office setting",
    },
    Persona {
        key: "storytelling",
        name: "Storytelling",
        system_prompt: "You are a master storyteller on LinkedIn. Create compelling personal stories that connect with your audience and drive engagement.",
        formatting_style: "Use storytelling techniques with emotional hooks, personal anecdotes, and relatable experiences.",
        visual_style: "warm, personal, authentic, natural lighting, human-centered",
    },
    Persona {
        key: "industry_insights",
        name: "Industry Insights",
        system_prompt: "You are an industry expert writing LinkedIn posts. Share valuable insights, trends, and technical knowledge that positions you as a thought leader.",
        formatting_style: "Use technical language appropriately, include data points, and provide actionable insights.",
        visual_style: "technical, data-driven, charts and graphs, professional, analytical",
    },
    Persona {
        key: "motivational",
        name: "Motivational",
        system_prompt: "You are a motivational speaker on LinkedIn. Create inspiring content that motivates and energizes your audience.",
        formatting_style: "Use uplifting language, powerful quotes, and energizing calls-to-action.",
        visual_style: "inspiring, uplifting, bright colors, dynamic, energetic",
    },
    Persona {
        key: "educational",
        name: "Educational",
        system_prompt: "You are an educator on LinkedIn. Create informative, step-by-step content that teaches valuable skills and knowledge.",
        formatting_style: "Use clear structure, numbered steps, and practical examples.",
        visual_style: "clear, instructional, step-by-step, informative, clean design",
    },
    Persona {
        key: "news_commentary",
        name: "News Commentary",
        system_prompt: "You are a LinkedIn commentator on current events. Provide thoughtful analysis and professional commentary on relevant news and trends.",
        formatting_style: "Use balanced perspective, cite sources, and encourage discussion.",
        visual_style: "current, relevant, news-focused, professional, timely",
    },
    Persona {
        key: "product_showcase",
        name: "Product Showcase",
        system_prompt: "You are a marketing professional on LinkedIn. Create compelling content that showcases products or services without being overly salesy.",
        formatting_style: "Use benefit-focused language, social proof, and clear value propositions.",
        visual_style: "product-focused, clean background, professional, highlight features",
    },
    Persona {
        key: "networking",
        name: "Networking",
        system_prompt: "You are a networking expert on LinkedIn. Create content that builds relationships and encourages professional connections.",
        formatting_style: "Use conversational tone, ask engaging questions, and encourage interaction.",
        visual_style: "people-focused, collaborative, professional, connection-oriented",
    },
];

pub fn persona(key: &str) -> &'static Persona {
    PERSONAS.iter().find(|p| p.key == key).unwrap_or(&PERSONAS[0])
}

pub fn image_style(key: &str) -> &'static str {
    match key {
        "illustration" => "illustration, hand-drawn style, artistic, creative illustration",
        "minimalist" => "minimalist design, clean lines, simple shapes, white space, modern minimalist",
        "infographic" => "infographic style, data visualization, charts, graphs, informational graphics",
        "abstract" => "abstract art, geometric shapes, artistic, creative, non-representational",
        "vintage" => "vintage style, retro design, classic, timeless, nostalgic",
        "modern_flat" => "flat design, modern, clean, simple, contemporary flat design",
        "3d_render" => "3D rendered, three-dimensional, computer generated, modern 3D graphics",
        // photo_realistic and anything unrecognized
        _ => "photorealistic, high-resolution photography, realistic lighting, professional photography",
    }
}

pub fn goal_palette(goal: &str) -> &'static str {
    match goal {
        "Educate" => "blue and white, professional, clean",
        "Engage" => "vibrant colors, energetic, eye-catching",
        "Promote" => "brand colors, professional, attention-grabbing",
        "Inspire" => "warm tones, uplifting, motivational",
        "Inform" => "neutral tones, clear, informative",
        "Motivate" => "bold colors, dynamic, energetic",
        "Entertain" => "fun colors, playful, engaging",
        "Network" => "professional blues and grays, trustworthy",
        "Advocate" => "strong colors, impactful, meaningful",
        _ => "professional, clean",
    }
}

/// Character-range guidance the completion is asked to stay within, per
/// length bucket. Unknown buckets get the Medium range.
pub fn length_guidance(post_length: &str) -> &'static str {
    match post_length {
        "Very Short" => "100-300 characters (1-2 sentences)",
        "Short" => "300-800 characters (2-4 sentences)",
        "Medium" => "800-1,500 characters (4-8 sentences)",
        "Long" => "1,500-2,500 characters (8-15 sentences)",
        "Very Long" => "2,500-3,000 characters (15+ sentences)",
        _ => "800-1,500 characters",
    }
}

fn tone_guidance(tone_intensity: &str) -> &'static str {
    match tone_intensity {
        "Very Light" => "subtle, gentle, understated",
        "Light" => "pleasant, friendly, approachable",
        "Moderate" => "balanced, professional, engaging",
        "Strong" => "confident, assertive, impactful",
        "Very Strong" => "powerful, compelling, commanding",
        _ => "professional and engaging",
    }
}

fn formatting_instructions(formatting: &str) -> &'static str {
    match formatting {
        "Bullet Points" => {
            "Use bullet points (\u{2022}) for key takeaways. Make each point concise and impactful."
        }
        "Numbered List" => "Use numbered steps or points (1., 2., 3.). Create a logical sequence.",
        "Paragraphs" => "Use flowing paragraph format with smooth transitions between ideas.",
        "Mixed Format" => {
            "Combine bullets, paragraphs, and lists strategically for maximum engagement."
        }
        "Question & Answer" => "Use Q&A format with engaging questions that spark discussion.",
        _ => "Use a clear, structured format.",
    }
}

/// Build the (system prompt, user prompt) pair for the completion call.
/// The request is expected to be sanitized already.
pub fn build_prompt(req: &GenerateRequest) -> (String, String) {
    let persona = persona(&req.template);
    let character_guidance = length_guidance(&req.post_length);
    let tone = tone_guidance(&req.tone_intensity);
    let format_instructions = formatting_instructions(&req.formatting);

    let cta_instruction = if req.cta.is_empty() {
        "End with an engaging call-to-action that encourages interaction (questions, comments, or shares).".to_string()
    } else {
        format!("Include a clear call-to-action: {}", req.cta)
    };

    let user_prompt = format!(
        "Create a compelling {persona_name} LinkedIn post about: {topic}\n\
         \n\
         CONTEXT:\n\
         - Purpose: {purpose}\n\
         - Target Audience: {audience}\n\
         - Key Message: {message}\n\
         - Post Goal: {goal}\n\
         \n\
         STYLE REQUIREMENTS:\n\
         - Tone: {tone} with a {language_style} language style\n\
         - Length: {character_guidance} (LinkedIn maximum: 3,000 characters)\n\
         - Format: {format_instructions}\n\
         \n\
         CONTENT GUIDELINES:\n\
         {formatting_style}\n\
         \n\
         - Start with a hook that grabs attention (question, bold statement, or relatable scenario)\n\
         - Develop the main message clearly and concisely\n\
         - Use LinkedIn-optimized formatting:\n\
         \u{2022} Strategic CAPITALIZATION for emphasis on key points\n\
         \u{2022} Relevant emojis (2-4 max) to enhance readability and engagement\n\
         \u{2022} Clear line breaks between sections for easy scanning\n\
         \u{2022} Short paragraphs (2-3 sentences max) for mobile readability\n\
         - {cta_instruction}\n\
         \n\
         QUALITY STANDARDS:\n\
         - Professional yet approachable\n\
         - Actionable insights or value\n\
         - Authentic voice that resonates with {audience_lower}\n\
         - Engaging and shareable content\n\
         - No hashtags unless specifically requested\n\
         \n\
         CRITICAL: The post must be exactly within {character_guidance}. Do not exceed 3,000 characters total.",
        persona_name = persona.name.to_lowercase(),
        topic = req.topic,
        purpose = req.purpose,
        audience = req.audience,
        message = req.message,
        goal = req.post_goal,
        language_style = req.language_style.to_lowercase(),
        formatting_style = persona.formatting_style,
        audience_lower = req.audience.to_lowercase(),
    );

    (persona.system_prompt.to_string(), user_prompt)
}

/// Build the companion image-generation prompt. The goal palette is the
/// authoritative color instruction; the persona's visual style contributes
/// composition and mood only.
pub fn build_image_prompt(req: &GenerateRequest) -> String {
    let persona = persona(&req.template);
    let image = image_style(&req.visual_style);
    let palette = goal_palette(&req.post_goal);

    format!(
        "Create a LinkedIn post image for: {topic}\n\
         \n\
         Purpose: {purpose}\n\
         Audience: {audience}\n\
         Goal: {goal}\n\
         \n\
         Template Style: {template_style}\n\
         Image Type: {image}\n\
         Color Palette: {palette}\n\
         \n\
         Image Requirements:\n\
         - LinkedIn-optimized (1200x627px recommended)\n\
         - Professional quality\n\
         - Text overlay friendly\n\
         - High contrast for readability\n\
         - Brand-appropriate\n\
         - Colors must follow the stated palette\n\
         \n\
         Final Style: {image} with {template_style} approach",
        topic = req.topic,
        purpose = req.purpose,
        audience = req.audience,
        goal = req.post_goal,
        template_style = persona.visual_style,
    )
}
