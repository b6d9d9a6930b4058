//! One-shot messages carried across a redirect in a short-lived cookie

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use cookie::{time::Duration, Cookie, SameSite};
use petclinic_shared::constants::{FLASH_COOKIE, FLASH_MAX_AGE_SECS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    OwnerCreated,
    OwnerUpdated,
    OwnerIdMismatch,
}

impl Flash {
    pub fn code(self) -> &'static str {
        match self {
            Flash::OwnerCreated => "owner-created",
            Flash::OwnerUpdated => "owner-updated",
            Flash::OwnerIdMismatch => "owner-id-mismatch",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "owner-created" => Some(Flash::OwnerCreated),
            "owner-updated" => Some(Flash::OwnerUpdated),
            "owner-id-mismatch" => Some(Flash::OwnerIdMismatch),
            _ => None,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Flash::OwnerCreated => "New Owner Created",
            Flash::OwnerUpdated => "Owner Values Updated",
            Flash::OwnerIdMismatch => "Owner ID mismatch. Please try again.",
        }
    }

    /// Model key the message is exposed under: `error` or `message`.
    pub fn key(self) -> &'static str {
        match self {
            Flash::OwnerIdMismatch => "error",
            _ => "message",
        }
    }

    pub fn set_cookie(self) -> Cookie<'static> {
        Cookie::build((FLASH_COOKIE, self.code()))
            .path("/")
            .max_age(Duration::seconds(FLASH_MAX_AGE_SECS))
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }

    pub fn clear_cookie() -> Cookie<'static> {
        Cookie::build((FLASH_COOKIE, ""))
            .path("/")
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }

    /// Redirect to `to`, showing this message on the next rendered page.
    pub fn redirect(self, to: &str) -> Response {
        ([(header::SET_COOKIE, self.set_cookie().to_string())], Redirect::to(to)).into_response()
    }
}

/// The flash message sent back by the browser, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IncomingFlash(pub Option<Flash>);

fn find_flash(value: &HeaderValue) -> Option<Flash> {
    Cookie::split_parse(value.to_str().ok()?)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == FLASH_COOKIE)
        .and_then(|cookie| Flash::from_code(cookie.value_trimmed()))
}

impl<S> FromRequestParts<S> for IncomingFlash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let flash = parts.headers.get_all(header::COOKIE).iter().find_map(find_flash);
        Ok(IncomingFlash(flash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_flash_in_cookie_header() {
        let header = HeaderValue::from_static("theme=dark; petclinic_flash=owner-id-mismatch; lang=en");
        assert_eq!(find_flash(&header), Some(Flash::OwnerIdMismatch));

        let header = HeaderValue::from_static("petclinic_flash=");
        assert_eq!(find_flash(&header), None);
    }

    #[test]
    fn test_mismatch_is_an_error() {
        assert_eq!(Flash::OwnerIdMismatch.key(), "error");
        assert_eq!(Flash::OwnerUpdated.key(), "message");
    }

    #[test]
    fn test_flash_cookie_attributes() {
        let cookie = Flash::OwnerCreated.set_cookie();
        assert_eq!(cookie.name(), "petclinic_flash");
        assert_eq!(cookie.value(), "owner-created");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(60)));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));

        let cleared = Flash::clear_cookie();
        assert_eq!(cleared.value(), "");
        assert_eq!(cleared.max_age(), Some(Duration::ZERO));
    }

    #[test]
    fn test_find_flash_accepts_quoted_value() {
        let header = HeaderValue::from_static("petclinic_flash=\"owner-updated\"");
        assert_eq!(find_flash(&header), Some(Flash::OwnerUpdated));
    }
}
