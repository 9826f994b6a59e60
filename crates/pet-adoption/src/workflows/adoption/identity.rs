use serde::{Deserialize, Serialize};

use super::domain::{ShelterId, UserId};

/// Authenticated session handed to every component instead of ambient global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Viewer {
    Applicant { user_id: UserId },
    Shelter { user_id: UserId, shelter_id: ShelterId },
    Admin { user_id: UserId },
    Anonymous,
}

impl Viewer {
    pub fn applicant(user_id: impl Into<String>) -> Self {
        Viewer::Applicant {
            user_id: UserId(user_id.into()),
        }
    }

    pub fn shelter(user_id: impl Into<String>, shelter_id: impl Into<String>) -> Self {
        Viewer::Shelter {
            user_id: UserId(user_id.into()),
            shelter_id: ShelterId(shelter_id.into()),
        }
    }

    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Viewer::Applicant { user_id }
            | Viewer::Shelter { user_id, .. }
            | Viewer::Admin { user_id } => Some(user_id),
            Viewer::Anonymous => None,
        }
    }

    pub fn shelter_id(&self) -> Option<&ShelterId> {
        match self {
            Viewer::Shelter { shelter_id, .. } => Some(shelter_id),
            Viewer::Applicant { .. } | Viewer::Admin { .. } | Viewer::Anonymous => None,
        }
    }

    pub const fn role_label(&self) -> &'static str {
        match self {
            Viewer::Applicant { .. } => "applicant",
            Viewer::Shelter { .. } => "shelter",
            Viewer::Admin { .. } => "admin",
            Viewer::Anonymous => "anonymous",
        }
    }

    /// Build a viewer from the identity headers forwarded by the authentication layer.
    ///
    /// Missing or inconsistent headers resolve to [`Viewer::Anonymous`].
    pub fn from_headers(headers: &axum::http::HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let Some(user_id) = header(USER_ID_HEADER) else {
            return Viewer::Anonymous;
        };

        match header(ROLE_HEADER).map(|role| role.to_ascii_lowercase()).as_deref() {
            Some("applicant") => Viewer::applicant(user_id),
            Some("shelter") => match header(SHELTER_ID_HEADER) {
                Some(shelter_id) => Viewer::shelter(user_id, shelter_id),
                None => Viewer::Anonymous,
            },
            Some("admin") => Viewer::Admin {
                user_id: UserId(user_id),
            },
            _ => Viewer::Anonymous,
        }
    }
}

pub const USER_ID_HEADER: &str = "x-user-id";
pub const ROLE_HEADER: &str = "x-user-role";
pub const SHELTER_ID_HEADER: &str = "x-shelter-id";

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn resolves_each_role_from_headers() {
        assert_eq!(
            Viewer::from_headers(&headers(&[
                (USER_ID_HEADER, "user-a"),
                (ROLE_HEADER, "applicant")
            ])),
            Viewer::applicant("user-a")
        );
        assert_eq!(
            Viewer::from_headers(&headers(&[
                (USER_ID_HEADER, "staff-1"),
                (ROLE_HEADER, "Shelter"),
                (SHELTER_ID_HEADER, "S1"),
            ])),
            Viewer::shelter("staff-1", "S1")
        );
        assert_eq!(
            Viewer::from_headers(&headers(&[(USER_ID_HEADER, "root"), (ROLE_HEADER, "admin")]))
                .role_label(),
            "admin"
        );
    }

    #[test]
    fn incomplete_identity_is_anonymous() {
        assert_eq!(Viewer::from_headers(&HeaderMap::new()), Viewer::Anonymous);
        assert_eq!(
            Viewer::from_headers(&headers(&[(USER_ID_HEADER, "staff-1"), (ROLE_HEADER, "shelter")])),
            Viewer::Anonymous
        );
        assert_eq!(
            Viewer::from_headers(&headers(&[(USER_ID_HEADER, "u"), (ROLE_HEADER, "donor")])),
            Viewer::Anonymous
        );
    }
}
