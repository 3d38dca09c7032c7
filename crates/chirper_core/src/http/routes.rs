//! Named routes used by chirp responses.

use crate::model::chirp::ChirpId;
use std::fmt::{Display, Formatter};

/// HTTP verbs used by the chirp routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

/// Named route with its bound parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ChirpsIndex,
    ChirpsStore,
    ChirpsUpdate(ChirpId),
    Login,
}

impl Route {
    /// Stable route name.
    pub fn name(self) -> &'static str {
        match self {
            Self::ChirpsIndex => "chirps.index",
            Self::ChirpsStore => "chirps.store",
            Self::ChirpsUpdate(_) => "chirps.update",
            Self::Login => "login",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Self::ChirpsIndex | Self::Login => Method::Get,
            Self::ChirpsStore => Method::Post,
            Self::ChirpsUpdate(_) => Method::Put,
        }
    }

    /// Renders the request path with parameters filled in.
    pub fn url(self) -> String {
        match self {
            Self::ChirpsIndex | Self::ChirpsStore => "/chirps".to_string(),
            Self::ChirpsUpdate(id) => format!("/chirps/{id}"),
            Self::Login => "/login".to_string(),
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method().as_str(), self.url())
    }
}
