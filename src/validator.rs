use std::sync::Arc;

use crate::error::ValidateError;
use crate::gemini::GenerativeModel;
use crate::prompt::build_prompt;
use crate::report::UntrustedMarkdown;

#[derive(Clone)]
pub struct IdeaValidator {
    model: Arc<dyn GenerativeModel>,
}

impl IdeaValidator {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub async fn validate(&self, idea: &str) -> Result<UntrustedMarkdown, ValidateError> {
        let idea = idea.trim();
        if idea.is_empty() {
            return Err(ValidateError::MissingInput);
        }

        let prompt = build_prompt(idea);
        match self.model.generate(&prompt).await? {
            Some(text) => Ok(UntrustedMarkdown::new(text)),
            None => Err(ValidateError::EmptyResult),
        }
    }
}
