//! Core HTTP server implementation.
//!
//! This module implements the low-level server runtime. It is
//! responsible only for networking concerns:
//! - binding and accepting TCP connections,
//! - reading raw bytes from the network,
//! - writing raw bytes back to the client.
//!
//! Higher-level HTTP semantics—request parsing, validation, routing and
//! response generation—are delegated to the `http` and `handler`
//! modules.
//!
//! ## Request handling flow
//!
//! 1. Accept a TCP connection
//! 2. Purge expired sessions
//! 3. Incrementally parse the stream into an [`HttpRequest`]
//!    (delegated to [`http::parser::RequestParser`](crate::http::parser::RequestParser))
//! 4. Validate the request once headers are in
//!    (delegated to [`http::validator::Validator`](crate::http::validator::Validator))
//! 5. Generate an [`HttpResponse`]
//!    (delegated to [`handler::handle_request`](crate::handler::handle_request))
//! 6. Serialize and write the response, then close the connection
//!
//! Connections are handled strictly one at a time: the full cycle runs
//! before the next accept. Blocking reads and writes are the only
//! suspension points, so a slow or malicious peer stalls the whole
//! server; there is no timeout or cancellation model. This is an
//! accepted limitation of the design, not something handled here.
//!
//! Errors at any stage produce an HTTP error response for that
//! connection; nothing terminates the accept loop.

use crate::config::config;
use crate::handler;
use crate::http::parser::{ParserError, ParserOutcome, RequestParser};
use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;
use crate::http::validator::{Validator, ValidatorError};
use crate::store::AppState;
use async_std::net::{TcpListener, TcpStream};
use async_std::prelude::*;

pub struct Server {
    state: AppState,
}

/// Errors that can occur while reading and parsing an HTTP request from
/// the stream, used to interrupt the flow and return appropriate
/// responses.
enum ReadError {
    Io(std::io::Error),
    ConnectionClosed,
    Parser(ParserError),
    Validator(ValidatorError),
}

impl Server {
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
        }
    }

    /// Binds the configured address and serves forever, one connection
    /// at a time.
    pub async fn run(&mut self) -> std::io::Result<()> {
        let listener = TcpListener::bind((config().address, config().port)).await?;
        eprintln!("Listening on {}:{}", config().address, config().port);

        loop {
            let (stream, _addr) = match listener.accept().await {
                Ok(conn) => conn,
                Err(err) => {
                    eprintln!("Accept error: {err}");
                    continue;
                }
            };

            // Session expiry is purged lazily, once per connection.
            self.state.sessions.purge_expired();

            if let Err(err) = Self::handle_client(stream, &mut self.state).await {
                eprintln!("I/O error while writing response: {err}");
            }
        }
    }

    /// Reads and incrementally parses an HTTP request from the TCP
    /// stream.
    ///
    /// The request is parsed as data becomes available. Once all
    /// headers are read the request is validated; if a body is
    /// expected, it is read until completion.
    async fn read_request(stream: &mut TcpStream) -> Result<HttpRequest, ReadError> {
        let mut parser = RequestParser::new();
        let mut req = HttpRequest::new();
        let mut buffer = vec![0; config().buffer_size];

        loop {
            let n = match stream.read(&mut buffer).await {
                Ok(0) => return Err(ReadError::ConnectionClosed),
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ReadError::Io(e)),
            };

            let mut outcome = parser
                .feed(&buffer[..n], &mut req)
                .map_err(ReadError::Parser)?;

            loop {
                match outcome {
                    // The parser needs more data to make progress.
                    ParserOutcome::Incomplete => break,
                    ParserOutcome::HeadersDone => {
                        // Validate early, before the body is read, then
                        // continue on any already-buffered body bytes.
                        // Feeding an empty slice lets the parser
                        // progress without a new network read.
                        Validator::validate_request(&req).map_err(ReadError::Validator)?;
                        outcome = parser.feed(&[], &mut req).map_err(ReadError::Parser)?;
                    }
                    ParserOutcome::Done => return Ok(req),
                }
            }
        }
    }

    /// Writes the given `HttpResponse` back to the TCP stream.
    async fn write_response(
        stream: &mut TcpStream,
        response: &HttpResponse,
    ) -> std::io::Result<()> {
        let headers = response.build_headers();
        stream.write_all(headers.as_bytes()).await?;
        stream.write_all(&response.body).await?;
        Ok(())
    }

    /// Handles a single client connection end to end. The connection is
    /// closed when the stream drops.
    async fn handle_client(mut stream: TcpStream, state: &mut AppState) -> std::io::Result<()> {
        let response = match Self::read_request(&mut stream).await {
            Ok(req) => handler::handle_request(&req, state),
            Err(ReadError::Io(err)) => {
                eprintln!("I/O error while reading request: {:?}", err);
                return Ok(());
            }
            Err(ReadError::ConnectionClosed) => return Ok(()),
            Err(ReadError::Parser(err)) => handler::handle_error(err.into_http_status()),
            Err(ReadError::Validator(err)) => handler::handle_error(err.into_http_status()),
        };

        Self::write_response(&mut stream, &response).await
    }
}

impl Default for Server {
    fn default() -> Self {
        Self::new()
    }
}
