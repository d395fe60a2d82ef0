//! Cookie-backed, request-scoped session state: flash messages and the CSRF
//! token.
//!
//! A [`Session`] is built from the incoming request, handed explicitly to
//! whatever needs it, and written back onto the response with
//! [`Session::apply`]. Nothing is kept on the server between requests.
//!
//! A flash value is set on one response and read (then expired) on the next
//! request, which is how a rejected form post carries its message across
//! the redirect back to the form.

use url::form_urlencoded;
use uuid::Uuid;

use crate::request::Request;
use crate::response::Response;

/// Name of the CSRF cookie and of the hidden form field that must echo it.
pub const CSRF_FIELD: &str = "csrf_token";

const FLASH_PREFIX: &str = "flash_";

/// Session state for one request/response cycle.
#[derive(Debug)]
pub struct Session {
    incoming: Vec<(String, String)>,
    /// Pending `set-cookie` values keyed by cookie name.
    outgoing: Vec<(String, String)>,
    csrf: Option<String>,
}

impl Session {
    pub fn from_request(req: &Request) -> Self {
        let incoming = req.headers().iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("cookie"))
            .flat_map(|(_, v)| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Self { incoming, outgoing: Vec::new(), csrf: None }
    }

    fn cookie(&self, name: &str) -> Option<&str> {
        self.incoming.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    fn queue(&mut self, name: String, header: String) {
        self.outgoing.retain(|(k, _)| *k != name);
        self.outgoing.push((name, header));
    }

    /// Reads the flash value stored under `key` and expires it, so it is
    /// shown exactly once.
    pub fn take_flash(&mut self, key: &str) -> Option<String> {
        let name = format!("{FLASH_PREFIX}{key}");
        let value = self.cookie(&name).map(decode)?;
        self.queue(name.clone(), format!("{name}=; Path=/; Max-Age=0"));
        Some(value)
    }

    /// Stores `value` under `key` for the next request.
    pub fn set_flash(&mut self, key: &str, value: &str) {
        let name = format!("{FLASH_PREFIX}{key}");
        let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
        self.queue(name.clone(), format!("{name}={encoded}; Path=/; HttpOnly; SameSite=Lax"));
    }

    /// The session's CSRF token, minting one (and queueing its cookie) on
    /// first use.
    pub fn csrf_token(&mut self) -> String {
        if let Some(token) = &self.csrf {
            return token.clone();
        }
        let existing = self.cookie(CSRF_FIELD).map(str::to_owned);
        let token = match existing {
            Some(existing) => existing,
            None => {
                let minted = Uuid::new_v4().simple().to_string();
                self.queue(
                    CSRF_FIELD.to_owned(),
                    format!("{CSRF_FIELD}={minted}; Path=/; HttpOnly; SameSite=Strict"),
                );
                minted
            }
        };
        self.csrf = Some(token.clone());
        token
    }

    /// True only when the request carried a CSRF cookie and `submitted`
    /// matches it.
    pub fn verify_csrf(&self, submitted: Option<&str>) -> bool {
        match (self.cookie(CSRF_FIELD), submitted) {
            (Some(expected), Some(submitted)) => expected == submitted,
            _ => false,
        }
    }

    /// Attaches every queued cookie to `response`.
    pub fn apply(self, response: Response) -> Response {
        self.outgoing
            .into_iter()
            .fold(response, |res, (_, header)| res.with_header("set-cookie", &header))
    }
}

fn decode(raw: &str) -> String {
    // A percent-encoded value with no `=` parses as a lone key.
    form_urlencoded::parse(raw.as_bytes())
        .next()
        .map(|(k, _)| k.into_owned())
        .unwrap_or_default()
}
