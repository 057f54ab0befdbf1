//! Content fingerprint over cache and watch entries.

use std::fs;

use sha2::{Digest, Sha256};
use tracing::warn;

use crate::builder::{Manifest, is_url};

/// Compute the version fingerprint for a manifest.
///
/// Cache entries followed by watch entries are hashed in their original
/// insertion order, before any display deduplication, so a repeated
/// declaration keeps contributing to the digest. URL entries hash their
/// literal text; path entries hash the file bytes read from under the root.
/// The concatenated per-entry hex digests are hashed once more to produce
/// the final value.
pub(crate) fn fingerprint(manifest: &Manifest) -> String {
  let mut digests = String::new();
  for entry in manifest.cache.iter().chain(manifest.watch.iter()) {
    if let Some(digest) = entry_digest(manifest, entry) {
      digests.push_str(&digest);
    }
  }
  hex::encode(Sha256::digest(digests.as_bytes()))
}

/// Digest a single entry, or `None` when its backing file cannot be read.
///
/// An unreadable file is logged and excluded from the fingerprint input
/// rather than hashed as empty; the entry itself still renders in the
/// CACHE section.
fn entry_digest(manifest: &Manifest, entry: &str) -> Option<String> {
  if is_url(entry) {
    return Some(hex::encode(Sha256::digest(entry.as_bytes())));
  }

  let path = manifest.root.join(entry);
  match fs::read(&path) {
    Ok(bytes) => Some(hex::encode(Sha256::digest(&bytes))),
    Err(err) => {
      warn!(
        "couldn't read {} for the version fingerprint: {}",
        path.display(),
        err
      );
      None
    }
  }
}
