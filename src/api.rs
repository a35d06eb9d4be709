//! Typed client for the Backwave REST API. Each method is a thin wrapper
//! around one endpoint; no retries, no caching. Failures carry the status
//! and response body so callers can surface them as-is.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::results::SurveyResults;
use crate::survey::{
    AnswerItem, CreateSurveyRequest, CreateSurveyResponse, IdAvailability, IdSuggestions,
    SubmitAnswersRequest, SubmitAnswersResponse, SurveyView,
};

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for the service at `base_url` (without the `/v1`
    /// suffix; it is appended here).
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("{}/v1", base_url.trim_end_matches('/')),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_base_url)
    }

    pub async fn create_survey(
        &self,
        request: &CreateSurveyRequest,
    ) -> Result<CreateSurveyResponse> {
        let url = format!("{}/surveys", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Failed to send create survey request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Backwave API error ({}): {}", status, body);
        }

        response
            .json::<CreateSurveyResponse>()
            .await
            .context("Failed to parse create survey response")
    }

    pub async fn get_survey(&self, survey_id: &str) -> Result<SurveyView> {
        let url = format!("{}/surveys/{}", self.base_url, survey_id);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .context("Failed to send get survey request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Backwave API error ({}): {}", status, body);
        }

        response
            .json::<SurveyView>()
            .await
            .context("Failed to parse survey response")
    }

    pub async fn submit_answers(
        &self,
        survey_id: &str,
        answers: &[AnswerItem],
    ) -> Result<SubmitAnswersResponse> {
        let url = format!("{}/surveys/{}/answers", self.base_url, survey_id);
        let request = SubmitAnswersRequest {
            answers: answers.to_vec(),
        };
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send submit answers request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Backwave API error ({}): {}", status, body);
        }

        response
            .json::<SubmitAnswersResponse>()
            .await
            .context("Failed to parse submit answers response")
    }

    pub async fn get_survey_results(
        &self,
        survey_id: &str,
        user_code: i64,
    ) -> Result<SurveyResults> {
        let url = format!("{}/surveys/{}/results", self.base_url, survey_id);
        let response = self
            .http
            .get(&url)
            .query(&[("user_code", user_code)])
            .send()
            .await
            .context("Failed to send survey results request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Backwave API error ({}): {}", status, body);
        }

        response
            .json::<SurveyResults>()
            .await
            .context("Failed to parse survey results response")
    }

    pub async fn get_results_by_user_code(&self, user_code: i64) -> Result<SurveyResults> {
        let url = format!("{}/surveys/results", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("user_code", user_code)])
            .send()
            .await
            .context("Failed to send results lookup request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Backwave API error ({}): {}", status, body);
        }

        response
            .json::<SurveyResults>()
            .await
            .context("Failed to parse results lookup response")
    }

    pub async fn get_ids(&self, count: usize, preferred: Option<&str>) -> Result<IdSuggestions> {
        let url = format!("{}/ids", self.base_url);
        let mut request = self.http.get(&url).query(&[("count", count)]);
        if let Some(id) = preferred {
            request = request.query(&[("id", id)]);
        }
        let response = request
            .send()
            .await
            .context("Failed to send id suggestions request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Backwave API error ({}): {}", status, body);
        }

        response
            .json::<IdSuggestions>()
            .await
            .context("Failed to parse id suggestions response")
    }

    pub async fn check_id_availability(&self, id: &str) -> Result<IdAvailability> {
        let url = format!("{}/ids/check", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("id", id)])
            .send()
            .await
            .context("Failed to send id check request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Backwave API error ({}): {}", status, body);
        }

        response
            .json::<IdAvailability>()
            .await
            .context("Failed to parse id check response")
    }
}
