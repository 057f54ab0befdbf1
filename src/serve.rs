//! Response header values for hosts serving a generated manifest.
//!
//! The core only produces text; transport belongs to the caller. A manifest
//! that is itself stale-cached stops clients from ever noticing content
//! changes, so hosts should send these values with every manifest response.

/// Content type browsers require for cache manifest documents.
pub const CONTENT_TYPE: &str = "text/cache-manifest";

/// `Cache-Control` value disabling intermediary caching of the manifest.
pub const CACHE_CONTROL: &str = "no-cache, no-store, max-age=0, must-revalidate";

/// `Pragma` value understood by HTTP/1.0 intermediaries.
pub const PRAGMA: &str = "no-cache";

/// `Expires` value pinned in the past so the manifest is always revalidated.
pub const EXPIRES: &str = "Fri, 01 Jan 1990 00:00:00 GMT";
