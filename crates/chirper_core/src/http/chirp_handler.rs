//! Chirp request handler.
//!
//! # Responsibility
//! - Gate every operation behind the authentication boundary.
//! - Map service results onto `Response` envelopes.
//!
//! # Invariants
//! - Guest requests return `Redirect(Route::Login)` without touching storage.
//! - Successful mutations redirect to `chirps.index`.
//! - Storage failures are logged and surfaced as `ServerError`.

use super::response::{ChirpForm, ChirpIndexProps, Response, CHIRPS_INDEX_COMPONENT};
use super::routes::Route;
use crate::auth::{authenticate, Requester};
use crate::model::chirp::ChirpId;
use crate::model::user::UserId;
use crate::repo::chirp_repo::ChirpRepository;
use crate::service::chirp_service::{ChirpService, ChirpServiceError};
use log::{error, info};

/// Request handler for list/store/update.
pub struct ChirpHandler<R: ChirpRepository> {
    service: ChirpService<R>,
}

impl<R: ChirpRepository> ChirpHandler<R> {
    pub fn new(repo: R) -> Self {
        Self {
            service: ChirpService::new(repo),
        }
    }

    /// `GET /chirps`: every chirp, oldest first.
    pub fn index(&self, requester: Requester) -> Response {
        if authenticated(requester, Route::ChirpsIndex).is_none() {
            return Response::Redirect(Route::Login);
        }

        match self.service.list() {
            Ok(chirps) => Response::View {
                component: CHIRPS_INDEX_COMPONENT,
                props: ChirpIndexProps { chirps },
            },
            Err(err) => failure_response(Route::ChirpsIndex, err),
        }
    }

    /// `POST /chirps`: posts a chirp as the requester.
    pub fn store(&self, requester: Requester, form: &ChirpForm) -> Response {
        let Some(user_id) = authenticated(requester, Route::ChirpsStore) else {
            return Response::Redirect(Route::Login);
        };

        match self.service.create(user_id, form.message()) {
            Ok(_) => Response::Redirect(Route::ChirpsIndex),
            Err(err) => failure_response(Route::ChirpsStore, err),
        }
    }

    /// `PUT /chirps/{chirp}`: edits a chirp the requester authored.
    pub fn update(&self, requester: Requester, chirp_id: ChirpId, form: &ChirpForm) -> Response {
        let route = Route::ChirpsUpdate(chirp_id);
        let Some(user_id) = authenticated(requester, route) else {
            return Response::Redirect(Route::Login);
        };

        match self.service.update(user_id, chirp_id, form.message()) {
            Ok(()) => Response::Redirect(Route::ChirpsIndex),
            Err(err) => failure_response(route, err),
        }
    }
}

fn authenticated(requester: Requester, route: Route) -> Option<UserId> {
    match authenticate(requester) {
        Ok(user_id) => Some(user_id),
        Err(_) => {
            info!(
                "event=auth_redirect module=http status=rejected route={}",
                route.name()
            );
            None
        }
    }
}

fn failure_response(route: Route, err: ChirpServiceError) -> Response {
    match err {
        ChirpServiceError::Validation(errors) => Response::ValidationFailed(errors),
        ChirpServiceError::Forbidden(_) => Response::Forbidden,
        ChirpServiceError::NotFound(_) => Response::NotFound,
        ChirpServiceError::Repo(err) => {
            error!(
                "event=request_failed module=http status=error route={} error={}",
                route.name(),
                err
            );
            Response::ServerError
        }
    }
}
