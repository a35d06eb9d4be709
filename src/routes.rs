//! Client route table. Maps a location path onto the view to render,
//! honoring the deployment base path. Literal segments win over parameter
//! segments, so `/new` is always the create view and never a survey id.

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` - landing page with the code entry form.
    Home,
    /// `/new` - survey creation form.
    Create,
    /// `/:surveyId` - answer form for one survey.
    TakeSurvey { survey_id: String },
    /// `/u/:userCode` - results looked up by code alone.
    Results { user_code: String },
    /// `/u/:surveyId/:userCode` - results for a known survey.
    SurveyResults {
        survey_id: String,
        user_code: String,
    },
    NotFound,
}

pub struct RouteTable {
    base_path: String,
}

impl RouteTable {
    /// Build a table rooted at `base_path`. `/` (or empty) means the app is
    /// served from the domain root.
    pub fn new(base_path: &str) -> Self {
        let mut base = base_path.trim().to_string();
        if !base.starts_with('/') {
            base.insert(0, '/');
        }
        Self {
            base_path: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.base_path)
    }

    /// Resolve a location path to a route. Query strings and fragments are
    /// ignored; a trailing slash is tolerated. Paths outside the base path
    /// resolve to `NotFound`.
    pub fn resolve(&self, path: &str) -> Route {
        let path = path
            .split(|c| c == '?' || c == '#')
            .next()
            .unwrap_or("");

        let remainder = if self.base_path.is_empty() {
            path
        } else {
            match path.strip_prefix(self.base_path.as_str()) {
                Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
                _ => return Route::NotFound,
            }
        };

        let segments: Vec<&str> = remainder
            .trim_end_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["new"] => Route::Create,
            ["u", user_code] => Route::Results {
                user_code: (*user_code).to_string(),
            },
            ["u", survey_id, user_code] => Route::SurveyResults {
                survey_id: (*survey_id).to_string(),
                user_code: (*user_code).to_string(),
            },
            [survey_id] => Route::TakeSurvey {
                survey_id: (*survey_id).to_string(),
            },
            _ => Route::NotFound,
        }
    }
}
