//! Assembly of the cache manifest document.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::builder::Manifest;
use crate::manifest::fingerprint::fingerprint;

/// Escape set for fallback URLs: everything outside the unreserved URI
/// characters is percent-encoded so the emitted line stays one token and
/// decodes back to the original string.
const FALLBACK_URL: &AsciiSet = &NON_ALPHANUMERIC
  .remove(b'-')
  .remove(b'_')
  .remove(b'.')
  .remove(b'~');

/// Render the full manifest document.
///
/// The `CACHE MANIFEST` header and fingerprint comment are always present.
/// Each section, with its preceding blank line, is emitted only when its
/// collection is non-empty. CACHE and NETWORK listings drop repeated entries,
/// keeping the first occurrence's position.
pub(crate) fn render(manifest: &Manifest) -> String {
  let mut body = vec!["CACHE MANIFEST".to_string()];
  body.push(format!("# {}", fingerprint(manifest)));

  let cache = dedup_entries(&manifest.cache);
  if !cache.is_empty() {
    body.push(String::new());
    body.push("CACHE:".to_string());
    body.extend(cache);
  }

  let network = dedup_entries(&manifest.network);
  if !network.is_empty() {
    body.push(String::new());
    body.push("NETWORK:".to_string());
    body.extend(network);
  }

  if !manifest.fallback.is_empty() {
    body.push(String::new());
    body.push("FALLBACK:".to_string());
    for (namespace, url) in &manifest.fallback {
      body.push(format!("{} {}", namespace, escape_fallback_url(url)));
    }
  }

  body.join("\n")
}

/// First occurrence wins; later repeats are dropped from the listing.
fn dedup_entries(entries: &[String]) -> Vec<String> {
  let mut seen = std::collections::BTreeSet::new();
  let mut unique = Vec::new();
  for entry in entries {
    if seen.insert(entry.as_str()) {
      unique.push(entry.clone());
    }
  }
  unique
}

/// Percent-encode a fallback target so the manifest line parses cleanly.
pub(crate) fn escape_fallback_url(url: &str) -> String {
  utf8_percent_encode(url, FALLBACK_URL).to_string()
}
