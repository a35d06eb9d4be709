//! Aggregates stored submissions into the results payloads served to
//! creators and participants. The creator's own answers are the benchmark
//! the survey is scored against and never count toward the aggregate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::store::Submission;
use crate::survey::{AnswerValue, Question, ResponseType, Survey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Creator,
    Participant,
}

/// Results payload for one survey, shaped for either viewer role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyResults {
    pub user_type: UserType,
    pub survey_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total_responses: Option<usize>,
    pub questions: Vec<QuestionResults>,
    pub overall_statistics: OverallStatistics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResults {
    pub question_id: i64,
    pub text: String,
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub response_scale_max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub distribution: Option<BTreeMap<u32, usize>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub yes_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub no_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub creator_answer: Option<AnswerValue>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user_score: Option<AnswerValue>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user_deviation: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallStatistics {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub highest_rated_question: Option<RatedQuestion>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lowest_rated_question: Option<RatedQuestion>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub average_deviation_from_aggregate: Option<f64>,
}

/// A question singled out by the overall ranking, scored 0..=1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatedQuestion {
    pub question_id: i64,
    pub text: String,
    pub score: f64,
}

/// Per-question aggregate over all submissions. `rating_ratio` normalizes
/// the question onto 0..=1 so scale and boolean questions rank together.
#[derive(Debug, Default)]
struct QuestionStats {
    average: Option<f64>,
    distribution: Option<BTreeMap<u32, usize>>,
    yes_count: Option<usize>,
    no_count: Option<usize>,
    rating_ratio: Option<f64>,
}

/// Round for presentation. Ranking and deviations keep full precision
/// until the final payload.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn answer_for<'a>(submission: &'a Submission, question_id: i64) -> Option<&'a AnswerValue> {
    submission
        .answers
        .iter()
        .find(|a| a.question_id == question_id)
        .map(|a| &a.answer)
}

fn question_stats(question: &Question, submissions: &[Submission]) -> QuestionStats {
    match question.response_type {
        ResponseType::Scale => {
            let Some(max) = question.response_scale_max else {
                return QuestionStats::default();
            };

            let mut distribution: BTreeMap<u32, usize> = (1..=max).map(|v| (v, 0)).collect();
            let mut values = Vec::new();
            for submission in submissions {
                if let Some(value) = answer_for(submission, question.id).and_then(AnswerValue::as_number)
                {
                    if (1..=max as i64).contains(&value) {
                        *distribution.entry(value as u32).or_insert(0) += 1;
                        values.push(value);
                    }
                }
            }

            let average = if values.is_empty() {
                None
            } else {
                Some(values.iter().sum::<i64>() as f64 / values.len() as f64)
            };

            QuestionStats {
                average,
                distribution: Some(distribution),
                yes_count: None,
                no_count: None,
                rating_ratio: average.map(|a| a / max as f64),
            }
        }
        ResponseType::Boolean => {
            let mut yes = 0;
            let mut no = 0;
            for submission in submissions {
                match answer_for(submission, question.id).and_then(AnswerValue::as_bool) {
                    Some(true) => yes += 1,
                    Some(false) => no += 1,
                    None => {}
                }
            }

            let answered = yes + no;
            QuestionStats {
                average: None,
                distribution: None,
                yes_count: Some(yes),
                no_count: Some(no),
                rating_ratio: if answered == 0 {
                    None
                } else {
                    Some(yes as f64 / answered as f64)
                },
            }
        }
    }
}

fn base_question_results(question: &Question, stats: &QuestionStats) -> QuestionResults {
    QuestionResults {
        question_id: question.id,
        text: question.text.clone(),
        response_type: question.response_type,
        response_scale_max: question.response_scale_max,
        average: stats.average.map(round2),
        distribution: stats.distribution.clone(),
        yes_count: stats.yes_count,
        no_count: stats.no_count,
        creator_answer: None,
        user_score: None,
        user_deviation: None,
    }
}

/// Highest and lowest rated questions by rating ratio. Unanswered questions
/// do not rank; ties keep the earlier question.
fn rank_questions(
    survey: &Survey,
    stats: &[QuestionStats],
) -> (Option<RatedQuestion>, Option<RatedQuestion>) {
    let mut highest: Option<(&Question, f64)> = None;
    let mut lowest: Option<(&Question, f64)> = None;

    for (question, stats) in survey.questions.iter().zip(stats) {
        let Some(ratio) = stats.rating_ratio else {
            continue;
        };
        match highest {
            Some((_, best)) if ratio <= best => {}
            _ => highest = Some((question, ratio)),
        }
        match lowest {
            Some((_, worst)) if ratio >= worst => {}
            _ => lowest = Some((question, ratio)),
        }
    }

    let rated = |entry: Option<(&Question, f64)>| {
        entry.map(|(question, ratio)| RatedQuestion {
            question_id: question.id,
            text: question.text.clone(),
            score: round2(ratio),
        })
    };

    (rated(highest), rated(lowest))
}

/// Results as the survey's creator sees them: response totals, their own
/// benchmark answers and the best/worst rated questions.
pub fn creator_results(survey: &Survey, submissions: &[Submission]) -> SurveyResults {
    let stats: Vec<QuestionStats> = survey
        .questions
        .iter()
        .map(|q| question_stats(q, submissions))
        .collect();

    let questions = survey
        .questions
        .iter()
        .zip(&stats)
        .map(|(question, stats)| {
            let mut results = base_question_results(question, stats);
            results.creator_answer = Some(question.creator_answer.clone());
            results
        })
        .collect();

    let (highest, lowest) = rank_questions(survey, &stats);

    SurveyResults {
        user_type: UserType::Creator,
        survey_id: survey.survey_id.clone(),
        title: survey.title.clone(),
        total_responses: Some(submissions.len()),
        questions,
        overall_statistics: OverallStatistics {
            highest_rated_question: highest,
            lowest_rated_question: lowest,
            average_deviation_from_aggregate: None,
        },
    }
}

/// Results as a participant sees them. A known `user_code` adds that
/// respondent's own scores and their deviation from the aggregate; an
/// unknown or absent code yields the generic participant view.
pub fn participant_results(
    survey: &Survey,
    submissions: &[Submission],
    user_code: Option<i64>,
) -> SurveyResults {
    let stats: Vec<QuestionStats> = survey
        .questions
        .iter()
        .map(|q| question_stats(q, submissions))
        .collect();

    let own = user_code.and_then(|code| submissions.iter().find(|s| s.user_code == code));

    let mut deviations = Vec::new();
    let questions = survey
        .questions
        .iter()
        .zip(&stats)
        .map(|(question, stats)| {
            let mut results = base_question_results(question, stats);
            if let Some(own) = own {
                if let Some(answer) = answer_for(own, question.id) {
                    results.user_score = Some(answer.clone());
                    if question.response_type == ResponseType::Scale {
                        if let (Some(value), Some(average)) = (answer.as_number(), stats.average) {
                            let deviation = value as f64 - average;
                            deviations.push(deviation.abs());
                            results.user_deviation = Some(round2(deviation));
                        }
                    }
                }
            }
            results
        })
        .collect();

    let average_deviation = if deviations.is_empty() {
        None
    } else {
        Some(round2(
            deviations.iter().sum::<f64>() / deviations.len() as f64,
        ))
    };

    SurveyResults {
        user_type: UserType::Participant,
        survey_id: survey.survey_id.clone(),
        title: survey.title.clone(),
        total_responses: None,
        questions,
        overall_statistics: OverallStatistics {
            highest_rated_question: None,
            lowest_rated_question: None,
            average_deviation_from_aggregate: average_deviation,
        },
    }
}
