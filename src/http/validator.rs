use crate::config::config;
use crate::http::HttpMethod;
use crate::http::HttpVersion;
use crate::http::request::HttpRequest;
use crate::http::status::HttpStatus;

pub enum ValidatorError {
    Error,
    HttpVersionNotSupported,
    BodyNotAllowed,
    MissingContentLength,
}

impl ValidatorError {
    pub fn into_http_status(self) -> HttpStatus {
        match self {
            ValidatorError::Error => HttpStatus::BadRequest,
            ValidatorError::HttpVersionNotSupported => HttpStatus::HttpVersionNotSupported,
            ValidatorError::BodyNotAllowed => HttpStatus::BadRequest,
            ValidatorError::MissingContentLength => HttpStatus::LengthRequired,
        }
    }
}

pub struct Validator;

impl Validator {
    fn validate_http_version(v: (u8, u8)) -> Result<(), ValidatorError> {
        match HttpVersion::from_parts(v) {
            Ok(http_v) => {
                if http_v <= config().http_version {
                    Ok(())
                } else {
                    Err(ValidatorError::HttpVersionNotSupported)
                }
            }
            Err(_) => Err(ValidatorError::Error),
        }
    }

    fn validate_http_method(
        content_length: Option<usize>,
        method: &HttpMethod,
    ) -> Result<(), ValidatorError> {
        match method {
            HttpMethod::Get => match content_length {
                Some(n) if n > 0 => Err(ValidatorError::BodyNotAllowed),
                _ => Ok(()),
            },
            HttpMethod::Post => match content_length {
                None => Err(ValidatorError::MissingContentLength),
                Some(_) => Ok(()),
            },
            HttpMethod::Unknown => Err(ValidatorError::Error),
        }
    }

    /// Runs once all headers are parsed, before the body is read.
    pub fn validate_request(req: &HttpRequest) -> Result<(), ValidatorError> {
        Self::validate_http_version(req.http_version)?;

        // The parser already rejected non-numeric values.
        let content_length = req
            .headers
            .get("content-length")
            .and_then(|v| v.parse::<usize>().ok());

        Self::validate_http_method(content_length, &req.method)?;

        Ok(())
    }
}
