use crate::config::config;
use crate::http::request::HttpRequest;
use crate::http::status::HttpStatus;
use crate::http::*;

const PARSER_BUF_CAP: usize = 16384;

/// Errors raised while parsing a request from the wire.
///
/// To keep parser logic separate from HTTP status codes, direct status
/// codes are not used here but mapped later via [`ParserError::into_http_status`].
#[derive(PartialEq, Eq, Debug)]
pub enum ParserError {
    /// Malformed request line (wrong shape, bad version syntax).
    BadRequestLine,
    /// Method other than GET or POST.
    Method,
    /// Header line without a `:` separator.
    BadHeader,
    /// `content-length` that does not parse as a non-negative integer.
    BadContentLength,
    /// Body bytes that do not decode as UTF-8.
    BodyNotUtf8,
    /// Input ended before the request was complete.
    UnexpectedEof,
    /// Internal buffer overflow before the body started.
    Overflow,

    // 413 Payload Too Large
    PayloadTooLarge,
    // 414 URI Too Long
    UriTooLong,
    // 505 HTTP Version Not Supported
    VersionNotSupported,
}

impl ParserError {
    pub fn into_http_status(self) -> HttpStatus {
        match self {
            ParserError::PayloadTooLarge => HttpStatus::PayloadTooLarge,
            ParserError::UriTooLong => HttpStatus::UriTooLong,
            ParserError::VersionNotSupported => HttpStatus::HttpVersionNotSupported,
            _ => HttpStatus::BadRequest,
        }
    }
}

#[derive(PartialEq, Eq, Debug)]
pub enum ParserOutcome {
    /// More data is needed to make progress.
    Incomplete,
    /// All headers are parsed; the request can be validated before the
    /// body is read.
    HeadersDone,
    /// The request is fully parsed.
    Done,
}

#[derive(PartialEq, PartialOrd)]
enum ParserState {
    RequestLine,
    Headers,
    Body,
    Done,
}

/// Incremental request parser.
///
/// Fed byte slices as they arrive from the stream; drains parsed bytes
/// from its internal buffer as each state completes. Feeding an empty
/// slice lets the parser progress on already-buffered data.
pub struct RequestParser {
    buf: [u8; PARSER_BUF_CAP],
    buf_len: usize,
    state: ParserState,

    header_bytes: usize,
    body_expected: usize,
    body: Vec<u8>,
}

impl RequestParser {
    pub fn new() -> Self {
        Self {
            buf: [0; PARSER_BUF_CAP],
            buf_len: 0,
            state: ParserState::RequestLine,
            header_bytes: 0,
            body_expected: 0,
            body: Vec::new(),
        }
    }

    /// Removes and returns the next `\r\n`-terminated line from the
    /// buffer, without the terminator.
    fn take_line(&mut self) -> Option<Vec<u8>> {
        let mut end = usize::MAX;
        for i in 0..self.buf_len.saturating_sub(1) {
            if self.buf[i] == b'\r' && self.buf[i + 1] == b'\n' {
                end = i;
                break;
            }
        }
        if end == usize::MAX {
            return None;
        }

        let line = self.buf[..end].to_vec();
        let consumed = end + 2;
        self.buf.copy_within(consumed..self.buf_len, 0);
        self.buf_len -= consumed;
        Some(line)
    }

    /// Returns `false` when the request line is not yet complete.
    fn parse_request_line(&mut self, req: &mut HttpRequest) -> Result<bool, ParserError> {
        let Some(line) = self.take_line() else {
            return Ok(false);
        };

        // Request line: METHOD PATH HTTP/VERSION
        let parts: Vec<&[u8]> = line.split(|&b| b == b' ').collect();
        if parts.len() != 3 {
            return Err(ParserError::BadRequestLine);
        }

        let method = std::str::from_utf8(parts[0]).unwrap_or("");
        let method = match http_method_from_str(method) {
            HttpMethod::Unknown => return Err(ParserError::Method),
            m => m,
        };

        let path = std::str::from_utf8(parts[1]).unwrap_or("");
        if path.is_empty() {
            return Err(ParserError::BadRequestLine);
        }
        if path.len() > config().max_path_size {
            return Err(ParserError::UriTooLong);
        }

        let version = std::str::from_utf8(parts[2]).unwrap_or("");
        let (maj, min) = version
            .strip_prefix("HTTP/")
            .and_then(|v| v.split_once('.'))
            .and_then(|(maj, min)| Some((maj.parse::<u8>().ok()?, min.parse::<u8>().ok()?)))
            .ok_or(ParserError::BadRequestLine)?;

        if HttpVersion::from_parts((maj, min)).is_err() {
            return Err(ParserError::VersionNotSupported);
        }

        req.method = method;
        req.path = path.to_string();
        req.http_version = (maj, min);

        self.state = ParserState::Headers;
        Ok(true)
    }

    /// Parses header lines until the empty line that ends the header
    /// block. Keys are lowercased, values trimmed, duplicates overwrite.
    fn parse_headers(&mut self, req: &mut HttpRequest) -> Result<ParserOutcome, ParserError> {
        loop {
            let Some(line) = self.take_line() else {
                return Ok(ParserOutcome::Incomplete);
            };
            self.header_bytes += line.len() + 2;
            if self.header_bytes > config().max_header_size {
                return Err(ParserError::PayloadTooLarge);
            }

            if line.is_empty() {
                return self.finish_headers(req);
            }

            let mut it = line.splitn(2, |&b| b == b':');
            let name = it.next().unwrap_or(b"");
            let value = it.next().ok_or(ParserError::BadHeader)?;

            let name = std::str::from_utf8(name)
                .map_err(|_| ParserError::BadHeader)?
                .trim()
                .to_lowercase();
            let value = std::str::from_utf8(value)
                .map_err(|_| ParserError::BadHeader)?
                .trim();
            if name.is_empty() {
                return Err(ParserError::BadHeader);
            }
            req.headers.set_raw(&name, value);
        }
    }

    fn finish_headers(&mut self, req: &mut HttpRequest) -> Result<ParserOutcome, ParserError> {
        match req.headers.get("content-length") {
            None => {
                // No body expected.
                req.body = None;
                self.state = ParserState::Done;
            }
            Some(raw) => {
                let content_len = raw
                    .parse::<usize>()
                    .map_err(|_| ParserError::BadContentLength)?;
                if content_len > config().max_body_size {
                    return Err(ParserError::PayloadTooLarge);
                }
                self.body_expected = content_len;
                self.state = ParserState::Body;
            }
        }
        Ok(ParserOutcome::HeadersDone)
    }

    fn parse_body(&mut self, req: &mut HttpRequest) -> Result<ParserOutcome, ParserError> {
        let to_copy = std::cmp::min(self.buf_len, self.body_expected - self.body.len());
        self.body.extend_from_slice(&self.buf[..to_copy]);
        self.buf.copy_within(to_copy..self.buf_len, 0);
        self.buf_len -= to_copy;

        if self.body.len() < self.body_expected {
            return Ok(ParserOutcome::Incomplete);
        }

        let text = String::from_utf8(std::mem::take(&mut self.body))
            .map_err(|_| ParserError::BodyNotUtf8)?;
        req.body = Some(text);
        self.state = ParserState::Done;
        Ok(ParserOutcome::Done)
    }

    /// Feeds bytes into the parser and advances as far as the buffered
    /// data allows.
    ///
    /// [`ParserOutcome::Incomplete`] always means more bytes are
    /// required: every call consumes as much buffered data as the
    /// current state can. After [`ParserOutcome::HeadersDone`], feeding
    /// an empty slice continues into the body (or completion) on data
    /// already buffered.
    pub fn feed(
        &mut self,
        buf: &[u8],
        req: &mut HttpRequest,
    ) -> Result<ParserOutcome, ParserError> {
        if self.buf_len + buf.len() > PARSER_BUF_CAP {
            return Err(ParserError::Overflow);
        }
        self.buf[self.buf_len..self.buf_len + buf.len()].copy_from_slice(buf);
        self.buf_len += buf.len();

        loop {
            match self.state {
                ParserState::RequestLine => {
                    if !self.parse_request_line(req)? {
                        return Ok(ParserOutcome::Incomplete);
                    }
                    // continue into headers on the same buffered data
                }
                ParserState::Headers => return self.parse_headers(req),
                ParserState::Body => return self.parse_body(req),
                ParserState::Done => return Ok(ParserOutcome::Done),
            }
        }
    }
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a complete request held in memory. Used by the in-process
/// test harness; the server feeds the parser incrementally instead.
pub fn parse_bytes(raw: &[u8]) -> Result<HttpRequest, ParserError> {
    let mut parser = RequestParser::new();
    let mut req = HttpRequest::new();
    let mut outcome = parser.feed(raw, &mut req)?;
    loop {
        match outcome {
            ParserOutcome::Done => return Ok(req),
            ParserOutcome::HeadersDone => outcome = parser.feed(&[], &mut req)?,
            // All input was already fed, so the request is truncated.
            ParserOutcome::Incomplete => return Err(ParserError::UnexpectedEof),
        }
    }
}
