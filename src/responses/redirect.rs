use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, Response, ResponseBuilder};

/// 303 See Other, so the browser follows a POST with a plain GET.
pub fn redirect(location: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(303)
        .header("Location", location)
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}

pub fn with_cookie(mut resp: Response, cookie: &str) -> ResultResp {
    let value = cookie.parse().map_err(|_| ServerError::InternalError)?;
    resp.headers_mut().append("Set-Cookie", value);
    Ok(resp)
}
