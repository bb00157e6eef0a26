#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpStatus {
    Ok = 200,

    BadRequest = 400,
    NotFound = 404,
    LengthRequired = 411,
    PayloadTooLarge = 413,
    UriTooLong = 414,

    InternalServerError = 500,
    HttpVersionNotSupported = 505,
}

impl HttpStatus {
    pub fn reason(self) -> &'static str {
        match self {
            HttpStatus::Ok => "OK",
            HttpStatus::BadRequest => "Bad Request",
            HttpStatus::NotFound => "Not Found",
            HttpStatus::LengthRequired => "Length Required",
            HttpStatus::PayloadTooLarge => "Payload Too Large",
            HttpStatus::UriTooLong => "URI Too Long",
            HttpStatus::InternalServerError => "Internal Server Error",
            HttpStatus::HttpVersionNotSupported => "HTTP Version Not Supported",
        }
    }
}
