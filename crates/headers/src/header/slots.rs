//! The known header layouts for requests and responses.
//!
//! `Content-Length` is deliberately absent from both: the collection keeps it in
//! its own numeric slot.

use crate::header::known::known_headers;

known_headers! {
    /// Known header slots for HTTP requests.
    pub struct RequestHeaderSlots {
        (0, host, HOST, "Host");
        (1, connection, CONNECTION, "Connection");
        (2, transfer_encoding, TRANSFER_ENCODING, "Transfer-Encoding");
        (3, content_type, CONTENT_TYPE, "Content-Type");
        (4, accept, ACCEPT, "Accept");
        (5, accept_encoding, ACCEPT_ENCODING, "Accept-Encoding");
        (6, accept_language, ACCEPT_LANGUAGE, "Accept-Language");
        (7, accept_charset, ACCEPT_CHARSET, "Accept-Charset");
        (8, user_agent, USER_AGENT, "User-Agent");
        (9, cookie, COOKIE, "Cookie");
        (10, authorization, AUTHORIZATION, "Authorization");
        (11, referer, REFERER, "Referer");
        (12, origin, ORIGIN, "Origin");
        (13, cache_control, CACHE_CONTROL, "Cache-Control");
        (14, pragma, PRAGMA, "Pragma");
        (15, upgrade, UPGRADE, "Upgrade");
        (16, expect, EXPECT, "Expect");
        (17, te, TE, "TE");
        (18, trailer, TRAILER, "Trailer");
        (19, keep_alive, KEEP_ALIVE, "Keep-Alive");
        (20, content_encoding, CONTENT_ENCODING, "Content-Encoding");
        (21, content_language, CONTENT_LANGUAGE, "Content-Language");
        (22, content_location, CONTENT_LOCATION, "Content-Location");
        (23, content_range, CONTENT_RANGE, "Content-Range");
        (24, date, DATE, "Date");
        (25, if_match, IF_MATCH, "If-Match");
        (26, if_none_match, IF_NONE_MATCH, "If-None-Match");
        (27, if_modified_since, IF_MODIFIED_SINCE, "If-Modified-Since");
        (28, if_unmodified_since, IF_UNMODIFIED_SINCE, "If-Unmodified-Since");
        (29, if_range, IF_RANGE, "If-Range");
        (30, range, RANGE, "Range");
        (31, max_forwards, MAX_FORWARDS, "Max-Forwards");
        (32, proxy_authorization, PROXY_AUTHORIZATION, "Proxy-Authorization");
        (33, via, VIA, "Via");
        (34, upgrade_insecure_requests, UPGRADE_INSECURE_REQUESTS, "Upgrade-Insecure-Requests");
        (35, access_control_request_method, ACCESS_CONTROL_REQUEST_METHOD, "Access-Control-Request-Method");
        (36, access_control_request_headers, ACCESS_CONTROL_REQUEST_HEADERS, "Access-Control-Request-Headers");
        (37, traceparent, TRACEPARENT, "traceparent");
        (38, tracestate, TRACESTATE, "tracestate");
    }
}

known_headers! {
    /// Known header slots for HTTP responses.
    pub struct ResponseHeaderSlots {
        (0, server, SERVER, "Server");
        (1, date, DATE, "Date");
        (2, content_type, CONTENT_TYPE, "Content-Type");
        (3, connection, CONNECTION, "Connection");
        (4, transfer_encoding, TRANSFER_ENCODING, "Transfer-Encoding");
        (5, keep_alive, KEEP_ALIVE, "Keep-Alive");
        (6, cache_control, CACHE_CONTROL, "Cache-Control");
        (7, pragma, PRAGMA, "Pragma");
        (8, set_cookie, SET_COOKIE, "Set-Cookie");
        (9, location, LOCATION, "Location");
        (10, etag, ETAG, "ETag");
        (11, last_modified, LAST_MODIFIED, "Last-Modified");
        (12, expires, EXPIRES, "Expires");
        (13, vary, VARY, "Vary");
        (14, content_encoding, CONTENT_ENCODING, "Content-Encoding");
        (15, content_language, CONTENT_LANGUAGE, "Content-Language");
        (16, content_location, CONTENT_LOCATION, "Content-Location");
        (17, content_range, CONTENT_RANGE, "Content-Range");
        (18, accept_ranges, ACCEPT_RANGES, "Accept-Ranges");
        (19, age, AGE, "Age");
        (20, allow, ALLOW, "Allow");
        (21, alt_svc, ALT_SVC, "Alt-Svc");
        (22, retry_after, RETRY_AFTER, "Retry-After");
        (23, www_authenticate, WWW_AUTHENTICATE, "WWW-Authenticate");
        (24, proxy_authenticate, PROXY_AUTHENTICATE, "Proxy-Authenticate");
        (25, trailer, TRAILER, "Trailer");
        (26, upgrade, UPGRADE, "Upgrade");
        (27, via, VIA, "Via");
        (28, access_control_allow_origin, ACCESS_CONTROL_ALLOW_ORIGIN, "Access-Control-Allow-Origin");
        (29, access_control_allow_credentials, ACCESS_CONTROL_ALLOW_CREDENTIALS, "Access-Control-Allow-Credentials");
        (30, access_control_allow_headers, ACCESS_CONTROL_ALLOW_HEADERS, "Access-Control-Allow-Headers");
        (31, access_control_allow_methods, ACCESS_CONTROL_ALLOW_METHODS, "Access-Control-Allow-Methods");
        (32, access_control_expose_headers, ACCESS_CONTROL_EXPOSE_HEADERS, "Access-Control-Expose-Headers");
        (33, access_control_max_age, ACCESS_CONTROL_MAX_AGE, "Access-Control-Max-Age");
    }
}
