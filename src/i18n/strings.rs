/// All localized user-facing strings for a locale.
///
/// Strings are grouped the way the views consume them: one prefix per view
/// plus the shared header and toast groups. Lookup by the dotted catalog key
/// (e.g. `"homeView.title"`) is available through [`LocaleStrings::lookup`].
#[derive(Debug, Clone)]
pub struct LocaleStrings {
    // ==================== Home View ====================
    pub home_title: &'static str,
    pub home_subtitle: &'static str,
    pub home_create_button: &'static str,
    pub home_participate_title: &'static str,
    pub home_participate_subtitle: &'static str,
    pub home_participate_placeholder: &'static str,
    pub home_participate_button: &'static str,
    /// Shown when a survey code does not resolve to a survey
    pub home_error_message: &'static str,

    // ==================== Create View ====================
    pub create_title: &'static str,
    pub create_description: &'static str,
    pub create_input_placeholder: &'static str,
    pub create_rating_button: &'static str,
    pub create_yes_no_button: &'static str,
    pub create_add_button: &'static str,
    pub create_suggest_button: &'static str,
    pub create_publish_button: &'static str,
    /// Shown when the creator tries to publish without answering every question
    pub create_alert_message: &'static str,
    pub create_published_message: &'static str,
    pub create_review_code_label: &'static str,
    pub create_review_link_label: &'static str,
    pub create_copy_url_button: &'static str,
    pub create_toast_success: &'static str,
    pub create_toast_error: &'static str,
    pub create_copy_success: &'static str,
    pub create_copy_error: &'static str,
    pub create_error_checking_code: &'static str,
    pub create_error_fetching_codes: &'static str,
    pub create_code_not_available: &'static str,

    // ==================== Take Survey View ====================
    pub take_survey_previous_button: &'static str,
    pub take_survey_next_button: &'static str,
    pub take_survey_finish_button: &'static str,
    pub take_survey_loading_message: &'static str,
    pub take_survey_submitting_button: &'static str,
    pub take_survey_error_submitting: &'static str,
    pub take_survey_error_fetching_codes: &'static str,
    pub take_survey_missing_survey_id: &'static str,
    pub take_survey_survey_not_found: &'static str,
    pub take_survey_error_loading: &'static str,
    pub take_survey_unexpected_error: &'static str,
    pub take_survey_privacy_note: &'static str,

    // ==================== Results View ====================
    pub results_copy_success: &'static str,
    pub results_copy_error: &'static str,
    pub results_finish_button: &'static str,

    // ==================== Header ====================
    pub header_title: &'static str,
    pub header_participate: &'static str,
    pub header_create: &'static str,
    pub header_analyze: &'static str,
    pub header_participate_placeholder: &'static str,
    pub header_participate_button: &'static str,
    pub header_analyze_placeholder: &'static str,
    pub header_analyze_button: &'static str,
    pub header_error_loading_survey: &'static str,
    pub header_empty_code_error: &'static str,
    pub header_error_loading_results: &'static str,

    // ==================== Toasts ====================
    pub toast_survey_created: &'static str,
    pub toast_survey_creation_failed: &'static str,
    pub toast_copied_to_clipboard: &'static str,
    pub toast_copy_failed: &'static str,
}

impl LocaleStrings {
    /// Look up a string by its dotted catalog key (e.g. `"createView.title"`).
    ///
    /// Returns `None` for unknown keys so callers can fall back to the key
    /// itself or the canonical locale.
    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        let value = match key {
            // Home view
            "homeView.title" => self.home_title,
            "homeView.subtitle" => self.home_subtitle,
            "homeView.createButton" => self.home_create_button,
            "homeView.participateTitle" => self.home_participate_title,
            "homeView.participateSubtitle" => self.home_participate_subtitle,
            "homeView.participatePlaceholder" => self.home_participate_placeholder,
            "homeView.participateButton" => self.home_participate_button,
            "homeView.errorMessage" => self.home_error_message,

            // Create view
            "createView.title" => self.create_title,
            "createView.description" => self.create_description,
            "createView.inputPlaceholder" => self.create_input_placeholder,
            "createView.ratingButton" => self.create_rating_button,
            "createView.yesNoButton" => self.create_yes_no_button,
            "createView.addButton" => self.create_add_button,
            "createView.suggestButton" => self.create_suggest_button,
            "createView.publishButton" => self.create_publish_button,
            "createView.alertMessage" => self.create_alert_message,
            "createView.publishedMessage" => self.create_published_message,
            "createView.reviewCodeLabel" => self.create_review_code_label,
            "createView.reviewLinkLabel" => self.create_review_link_label,
            "createView.copyUrlButton" => self.create_copy_url_button,
            "createView.toastSuccess" => self.create_toast_success,
            "createView.toastError" => self.create_toast_error,
            "createView.copySuccess" => self.create_copy_success,
            "createView.copyError" => self.create_copy_error,
            "createView.errorCheckingCode" => self.create_error_checking_code,
            "createView.errorFetchingCodes" => self.create_error_fetching_codes,
            "createView.codeNotAvailable" => self.create_code_not_available,

            // Take survey view
            "takeSurvey.previousButton" => self.take_survey_previous_button,
            "takeSurvey.nextButton" => self.take_survey_next_button,
            "takeSurvey.finishButton" => self.take_survey_finish_button,
            "takeSurvey.loadingMessage" => self.take_survey_loading_message,
            "takeSurvey.submittingButton" => self.take_survey_submitting_button,
            "takeSurvey.errorSubmitting" => self.take_survey_error_submitting,
            "takeSurvey.errorFetchingCodes" => self.take_survey_error_fetching_codes,
            "takeSurvey.missingSurveyId" => self.take_survey_missing_survey_id,
            "takeSurvey.surveyNotFound" => self.take_survey_survey_not_found,
            "takeSurvey.errorLoading" => self.take_survey_error_loading,
            "takeSurvey.unexpectedError" => self.take_survey_unexpected_error,
            "takeSurvey.privacyNote" => self.take_survey_privacy_note,

            // Results view
            "resultsView.copySuccess" => self.results_copy_success,
            "resultsView.copyError" => self.results_copy_error,
            "resultsView.finishButton" => self.results_finish_button,

            // Header
            "header.title" => self.header_title,
            "header.participate" => self.header_participate,
            "header.create" => self.header_create,
            "header.analyze" => self.header_analyze,
            "header.participatePlaceholder" => self.header_participate_placeholder,
            "header.participateButton" => self.header_participate_button,
            "header.analyzePlaceholder" => self.header_analyze_placeholder,
            "header.analyzeButton" => self.header_analyze_button,
            "header.errorLoadingSurvey" => self.header_error_loading_survey,
            "header.emptyCodeError" => self.header_empty_code_error,
            "header.errorLoadingResults" => self.header_error_loading_results,

            // Toasts
            "toast.surveyCreated" => self.toast_survey_created,
            "toast.surveyCreationFailed" => self.toast_survey_creation_failed,
            "toast.copiedToClipboard" => self.toast_copied_to_clipboard,
            "toast.copyFailed" => self.toast_copy_failed,

            _ => return None,
        };
        Some(value)
    }
}

// ==================== English Strings ====================

/// English strings (canonical)
pub const ENGLISH_STRINGS: LocaleStrings = LocaleStrings {
    // Home view
    home_title: "Calibrate your self awareness",
    home_subtitle: "Compare what you think about yourself, what others really look at you as",
    home_create_button: "Create a review",
    home_participate_title: "Came here for a friend?",
    home_participate_subtitle:
        "Share some valuable feedback to the creator and see what others are saying",
    home_participate_placeholder: "Enter review code",
    home_participate_button: "Participate",
    home_error_message: "Invalid survey code or survey not found. Please try again.",

    // Create view
    create_title: "Share your honest view",
    create_description: "Helps me reflect on what I think of myself",
    create_input_placeholder: "Enter your question here",
    create_rating_button: "Rating",
    create_yes_no_button: "Yes/No",
    create_add_button: "Add",
    create_suggest_button: "Suggest",
    create_publish_button: "Publish",
    create_alert_message: "Complete self review before publishing",
    create_published_message: "The review is published and live!",
    create_review_code_label: "Review code",
    create_review_link_label: "Review Link",
    create_copy_url_button: "Copy URL",
    create_toast_success: "Survey created successfully!",
    create_toast_error: "Failed to create survey. Please try again.",
    create_copy_success: "Copied to clipboard!",
    create_copy_error: "Failed to copy to clipboard",
    create_error_checking_code: "Cannot validate the id",
    create_error_fetching_codes: "Error fetching suggestions. Please try again.",
    create_code_not_available:
        "The id is already used or invalid (contains space, special characters)",

    // Take survey view
    take_survey_previous_button: "Previous",
    take_survey_next_button: "Next",
    take_survey_finish_button: "Finish",
    take_survey_loading_message: "Loading survey...",
    take_survey_submitting_button: "Publishing...",
    take_survey_error_submitting: "Error submitting survey. Please try again.",
    take_survey_error_fetching_codes: "Error fetching suggestions. Please try again.",
    take_survey_missing_survey_id: "Survey ID is missing. Please check the URL and try again.",
    take_survey_survey_not_found: "Survey not found. Please check the survey ID and try again.",
    take_survey_error_loading:
        "An error occurred while loading the survey. Please try again later.",
    take_survey_unexpected_error: "An unexpected error occurred. Please try again.",
    take_survey_privacy_note: "This page ONLY collects the answers choices and the handle you \
choose. The handle is (only) for you to view the results later, the answer choices are used to \
calculate stats.",

    // Results view
    results_copy_success: "Copied to the clipboard",
    results_copy_error: "Could not copy to the clipboard",
    results_finish_button: "Finish",

    // Header
    header_title: "Backwave",
    header_participate: "Participate",
    header_create: "Create",
    header_analyze: "Analyze",
    header_participate_placeholder: "Enter review code",
    header_participate_button: "Participate",
    header_analyze_placeholder: "Enter creator code",
    header_analyze_button: "Analyze",
    header_error_loading_survey: "Failed to load survey. Please check the code and try again.",
    header_empty_code_error: "The code cannot be empty.",
    header_error_loading_results:
        "Failed to load results. Please check the creator code and try again.",

    // Toasts
    toast_survey_created: "Survey created successfully!",
    toast_survey_creation_failed: "Failed to create survey. Please try again.",
    toast_copied_to_clipboard: "Copied to clipboard!",
    toast_copy_failed: "Failed to copy to clipboard",
};
