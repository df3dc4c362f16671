use chrono::{DateTime, Utc};
use matchaway_core::{Error, Result, Validate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub position: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Faq {
    pub fn new(question: String, answer: String, position: u32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            question,
            answer,
            position,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Validate for Faq {
    fn validate(&self) -> Result<()> {
        if self.question.trim().is_empty() {
            return Err(Error::validation("question", "must not be empty"));
        }
        if self.answer.trim().is_empty() {
            return Err(Error::validation("answer", "must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaqPatch {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub position: Option<u32>,
}

impl FaqPatch {
    pub fn apply(&self, faq: &mut Faq) {
        if let Some(question) = &self.question {
            faq.question = question.clone();
        }
        if let Some(answer) = &self.answer {
            faq.answer = answer.clone();
        }
        if let Some(position) = self.position {
            faq.position = position;
        }
        faq.updated_at = Utc::now();
    }
}
