use serde::{Deserialize, Serialize};

// Validate endpoint request format
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ValidationRequest {
    #[serde(default)]
    pub idea: Option<String>,
}

impl ValidationRequest {
    // Trimmed idea text, None when absent or blank
    pub fn idea(&self) -> Option<&str> {
        self.idea.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

// Validate endpoint response format
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ValidationResponse {
    pub result: String,
}

// Gemini generateContent request format
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

// Gemini generateContent response format, only the fields we read
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    // candidates[0].content.parts[0].text
    pub fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.is_empty())
    }
}
