use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use std::collections::HashSet;

use crate::config::Permission;
use crate::web::api::error::ApiError;
use crate::web::state::AppState;

/// Holder of a configured API key. Only the mutating routes (observer and
/// catalog changes) ask for one; reads are open.
#[derive(Debug, Clone)]
pub struct Operator {
    pub name: String,
    permissions: HashSet<Permission>,
}

impl Operator {
    pub fn require(&self, permission: Permission) -> Result<(), ApiError> {
        if self.permissions.contains(&permission) {
            Ok(())
        } else {
            log::warn!("{} tried {} without permission", self.name, permission.as_str());
            Err(ApiError::Forbidden(permission))
        }
    }
}

fn bearer_key(parts: &Parts) -> Result<&str, ApiError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(ApiError::Unauthorized("missing_api_key"))?;
    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or(ApiError::Unauthorized("malformed_authorization"))
}

impl FromRequestParts<AppState> for Operator {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let key = bearer_key(parts)?;
        let api_key = state
            .config
            .find_api_key(key)
            .ok_or(ApiError::Unauthorized("invalid_api_key"))?;

        Ok(Operator {
            name: api_key.name.clone(),
            permissions: api_key.permissions.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder();
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn code(result: Result<&str, ApiError>) -> Option<&'static str> {
        match result {
            Err(ApiError::Unauthorized(code)) => Some(code),
            _ => None,
        }
    }

    #[test]
    fn bearer_key_extraction() {
        assert_eq!(bearer_key(&parts(Some("Bearer abc"))).ok(), Some("abc"));
        assert_eq!(code(bearer_key(&parts(None))), Some("missing_api_key"));
        assert_eq!(
            code(bearer_key(&parts(Some("Basic abc")))),
            Some("malformed_authorization")
        );
        assert_eq!(
            code(bearer_key(&parts(Some("Bearer  ")))),
            Some("malformed_authorization")
        );
    }

    #[test]
    fn operator_permissions() {
        let operator = Operator {
            name: "night shift".into(),
            permissions: HashSet::from([Permission::SetObserver]),
        };
        assert!(operator.require(Permission::SetObserver).is_ok());
        assert!(matches!(
            operator.require(Permission::ManageCatalog),
            Err(ApiError::Forbidden(Permission::ManageCatalog))
        ));
    }
}
