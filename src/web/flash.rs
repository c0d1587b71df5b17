//! One-shot error messages carried to the next page view in a signed cookie.
//! The message is Base64-URL encoded so any text fits in a cookie value.

use tower_cookies::{Cookie, Cookies, Key};

use crate::utils::{self, b64u_decode_to_string, b64u_encode};

use super::FLASH_ERROR_MSG;

pub fn set_flash_error(cookies: &Cookies, key: &Key, message: &str) {
    let cookie = Cookie::build((FLASH_ERROR_MSG, b64u_encode(message)))
        .path("/")
        .http_only(true)
        .build();
    cookies.signed(key).add(cookie);
}

/// Reads the pending flash message and removes the cookie so it is shown only once.
pub fn take_flash_error(cookies: &Cookies, key: &Key) -> utils::Result<Option<String>> {
    let signed_cookies = cookies.signed(key);

    let Some(flash_err) = signed_cookies.get(FLASH_ERROR_MSG) else {
        return Ok(None);
    };
    // remove the cookie if we just used it
    signed_cookies.remove(Cookie::build((FLASH_ERROR_MSG, "")).path("/").build());

    b64u_decode_to_string(flash_err.value()).map(Some)
}
