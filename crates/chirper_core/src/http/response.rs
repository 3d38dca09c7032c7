//! Response envelopes produced by chirp handlers.

use super::routes::Route;
use crate::model::validation::ValidationErrors;
use crate::repo::chirp_repo::ChirpRecord;
use serde::{Deserialize, Serialize};

/// View component rendered for the chirp list.
pub const CHIRPS_INDEX_COMPONENT: &str = "Chirps/Index";

/// Form body accepted by store and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChirpForm {
    /// Missing values are treated as empty input.
    #[serde(default)]
    pub message: Option<String>,
}

impl ChirpForm {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Submitted message, or `""` when the field was omitted.
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

/// Data bound to the chirp list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChirpIndexProps {
    /// Oldest first.
    pub chirps: Vec<ChirpRecord>,
}

/// Outcome of one handled request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Named view plus its data.
    View {
        component: &'static str,
        props: ChirpIndexProps,
    },
    /// Redirect to a named route.
    Redirect(Route),
    /// Input rejected; errors keyed by form field.
    ValidationFailed(ValidationErrors),
    Forbidden,
    NotFound,
    /// Storage failure. Details are logged, not returned.
    ServerError,
}

impl Response {
    /// HTTP-equivalent status code.
    pub fn status(&self) -> u16 {
        match self {
            Self::View { .. } => 200,
            Self::Redirect(_) => 302,
            Self::ValidationFailed(_) => 422,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::ServerError => 500,
        }
    }

    /// Redirect target path, when this is a redirect.
    pub fn location(&self) -> Option<String> {
        match self {
            Self::Redirect(route) => Some(route.url()),
            _ => None,
        }
    }

    pub fn is_redirect_to(&self, route: Route) -> bool {
        matches!(self, Self::Redirect(target) if *target == route)
    }

    /// Field errors, when input was rejected.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::ValidationFailed(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChirpForm, Response};
    use crate::http::routes::Route;
    use crate::model::validation::ValidationErrors;

    #[test]
    fn status_codes_follow_http_semantics() {
        assert_eq!(Response::Redirect(Route::Login).status(), 302);
        assert_eq!(
            Response::ValidationFailed(ValidationErrors::new()).status(),
            422
        );
        assert_eq!(Response::Forbidden.status(), 403);
        assert_eq!(Response::NotFound.status(), 404);
        assert_eq!(Response::ServerError.status(), 500);
    }

    #[test]
    fn redirect_exposes_location() {
        let response = Response::Redirect(Route::ChirpsIndex);
        assert_eq!(response.location().as_deref(), Some("/chirps"));
        assert!(response.is_redirect_to(Route::ChirpsIndex));
        assert!(!response.is_redirect_to(Route::Login));
        assert_eq!(Response::Forbidden.location(), None);
    }

    #[test]
    fn omitted_message_reads_as_empty() {
        assert_eq!(ChirpForm::default().message(), "");
        assert_eq!(ChirpForm::new("hi").message(), "hi");
    }

    #[test]
    fn form_body_without_message_deserializes_as_empty() {
        let form: ChirpForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form.message(), "");

        let form: ChirpForm = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(form.message(), "hi");

        let form: ChirpForm = serde_json::from_str(r#"{"message":null}"#).unwrap();
        assert_eq!(form.message(), "");
    }
}
