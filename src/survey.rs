use serde::{Deserialize, Serialize};

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Scale,
    Boolean,
}

/// A single answer value. Scale questions carry numbers, yes/no questions
/// carry booleans; the wire format is the bare JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Number(i64),
}

impl AnswerValue {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            AnswerValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnswerValue::Bool(b) => Some(*b),
            AnswerValue::Number(_) => None,
        }
    }
}

/// A stored question, including the creator's own answer.
///
/// Question ids are 1-based ordinals in authoring order; they are what
/// answer submissions reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub response_type: ResponseType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub response_scale_max: Option<u32>,
    pub creator_answer: AnswerValue,
}

impl Question {
    /// Whether an answer value fits this question: an integer within
    /// `1..=response_scale_max` for scale questions, a bool for yes/no.
    pub fn accepts(&self, answer: &AnswerValue) -> bool {
        match self.response_type {
            ResponseType::Scale => match (answer.as_number(), self.response_scale_max) {
                (Some(n), Some(max)) => n >= 1 && n <= max as i64,
                _ => false,
            },
            ResponseType::Boolean => answer.as_bool().is_some(),
        }
    }
}

/// A stored survey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Survey {
    pub survey_id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    pub user_code: i64,
    pub created_at: String,
}

impl Survey {
    pub fn question(&self, question_id: i64) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}

// ==================== Wire Payloads ====================

/// Question payload inside a create request. No id yet; the service assigns
/// ordinals on creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQuestion {
    pub text: String,
    pub response_type: ResponseType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub response_scale_max: Option<u32>,
    pub creator_answer: AnswerValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSurveyRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    pub questions: Vec<NewQuestion>,
    /// Creator-picked survey code; the service assigns one from the reserve
    /// when absent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub survey_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSurveyResponse {
    pub survey_id: String,
    pub share_link: String,
    pub user_code: i64,
}

/// Question shape shown to respondents: the creator's answer is withheld.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionView {
    pub id: i64,
    pub text: String,
    pub response_type: ResponseType,
    pub response_scale_max: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyView {
    pub title: String,
    pub description: String,
    pub questions: Vec<QuestionView>,
}

impl From<&Survey> for SurveyView {
    fn from(survey: &Survey) -> Self {
        SurveyView {
            title: survey.title.clone(),
            description: survey.description.clone(),
            questions: survey
                .questions
                .iter()
                .map(|q| QuestionView {
                    id: q.id,
                    text: q.text.clone(),
                    response_type: q.response_type,
                    response_scale_max: q.response_scale_max,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerItem {
    pub question_id: i64,
    pub answer: AnswerValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswersRequest {
    pub answers: Vec<AnswerItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswersResponse {
    pub user_code: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdSuggestions {
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdAvailability {
    pub id: String,
    pub available: bool,
}
