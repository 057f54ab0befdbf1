//! Declarative accumulation of cache, watch, network and fallback entries.

use std::path::{Path, PathBuf};

use tracing::warn;

/// Returns `true` when an entry names a remote resource rather than a file
/// under the manifest root. Remote entries are never read from disk.
pub(crate) fn is_url(entry: &str) -> bool {
  entry.contains("://")
}

/// Collects manifest entries against a root directory.
///
/// Glob patterns are expanded eagerly, at configuration time, so the
/// resulting [`Manifest`] is a plain snapshot of resolved entries. Insertion
/// order is preserved per collection; duplicates are kept here and only
/// dropped from the rendered listing, never from the fingerprint input.
#[derive(Debug, Clone)]
pub struct ManifestBuilder {
  root: PathBuf,
  cache: Vec<String>,
  watch: Vec<String>,
  network: Vec<String>,
  fallback: Vec<(String, String)>,
}

impl ManifestBuilder {
  /// Create an empty builder rooted at `root`.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self {
      root: root.into(),
      cache: Vec::new(),
      watch: Vec::new(),
      network: Vec::new(),
      fallback: Vec::new(),
    }
  }

  /// Expand glob patterns against the root and record every match as a cache
  /// entry. Patterns that match nothing contribute no entries.
  pub fn cache_patterns<I, S>(mut self, patterns: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let matches = self.expand_patterns(patterns);
    self.cache.extend(matches);
    self
  }

  /// Record literal cache entries: URLs, root-relative paths, or absolute
  /// paths under the root (which are normalised to relative form).
  pub fn cache<I, S>(mut self, names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    for name in names {
      let entry = self.normalize_literal(name.as_ref());
      self.cache.push(entry);
    }
    self
  }

  /// Like [`ManifestBuilder::cache_patterns`], but the matches only feed the
  /// version fingerprint and never appear in the rendered document.
  pub fn watch_patterns<I, S>(mut self, patterns: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let matches = self.expand_patterns(patterns);
    self.watch.extend(matches);
    self
  }

  /// Like [`ManifestBuilder::cache`], targeting the watch collection.
  pub fn watch<I, S>(mut self, names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    for name in names {
      let entry = self.normalize_literal(name.as_ref());
      self.watch.push(entry);
    }
    self
  }

  /// Record NETWORK section entries verbatim. No normalisation happens here
  /// because network entries may be URLs or policy tokens such as `"*"`.
  pub fn network<I, S>(mut self, names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    self
      .network
      .extend(names.into_iter().map(|name| name.as_ref().to_string()));
    self
  }

  /// Map a namespace to the resource served when a request under it fails.
  ///
  /// Declaring the same namespace again replaces the earlier target while
  /// keeping its position in the rendered FALLBACK section.
  pub fn fallback(mut self, namespace: impl Into<String>, url: impl Into<String>) -> Self {
    let namespace = namespace.into();
    let url = url.into();
    match self.fallback.iter_mut().find(|(ns, _)| *ns == namespace) {
      Some((_, existing)) => *existing = url,
      None => self.fallback.push((namespace, url)),
    }
    self
  }

  /// Freeze the accumulated collections into an immutable [`Manifest`].
  pub fn build(self) -> Manifest {
    Manifest {
      root: self.root,
      cache: self.cache,
      watch: self.watch,
      network: self.network,
      fallback: self.fallback,
    }
  }

  fn expand_patterns<I, S>(&self, patterns: I) -> Vec<String>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut matches = Vec::new();
    for pattern in patterns {
      let full_pattern = self.root.join(pattern.as_ref());
      let paths = match glob::glob(&full_pattern.to_string_lossy()) {
        Ok(paths) => paths,
        Err(err) => {
          warn!("skipping invalid glob pattern {}: {}", pattern.as_ref(), err);
          continue;
        }
      };
      for path in paths.flatten() {
        matches.push(self.root_relative(&path));
      }
    }
    matches
  }

  /// Render a matched path relative to the root with forward slashes.
  fn root_relative(&self, path: &Path) -> String {
    match path.strip_prefix(&self.root) {
      Ok(relative) => relative.to_string_lossy().replace('\\', "/"),
      Err(_) => path.to_string_lossy().replace('\\', "/"),
    }
  }

  /// Literal entries beginning with the root's string form are stored
  /// relative to it; everything else (URLs, already-relative paths) is kept
  /// verbatim.
  fn normalize_literal(&self, name: &str) -> String {
    let root = self.root.to_string_lossy();
    match name.strip_prefix(root.as_ref()) {
      Some(rest) => rest.trim_start_matches(['/', '\\']).to_string(),
      None => name.to_string(),
    }
  }
}

/// Immutable entry snapshot produced by [`ManifestBuilder::build`].
#[derive(Debug, Clone)]
pub struct Manifest {
  pub(crate) root: PathBuf,
  pub(crate) cache: Vec<String>,
  pub(crate) watch: Vec<String>,
  pub(crate) network: Vec<String>,
  pub(crate) fallback: Vec<(String, String)>,
}

impl Manifest {
  /// Build a manifest by applying `configure` to a fresh builder rooted at
  /// `root`.
  pub fn configure<F>(root: impl Into<PathBuf>, configure: F) -> Self
  where
    F: FnOnce(ManifestBuilder) -> ManifestBuilder,
  {
    configure(ManifestBuilder::new(root)).build()
  }

  /// Render the manifest document, computing the version fingerprint from
  /// the current contents of every cache and watch entry.
  pub fn render(&self) -> String {
    crate::manifest::render(self)
  }

  /// Root directory entries and patterns were resolved against.
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Entries emitted in the CACHE section, in insertion order, duplicates
  /// included.
  pub fn cache_entries(&self) -> &[String] {
    &self.cache
  }

  /// Entries that feed only the version fingerprint.
  pub fn watch_entries(&self) -> &[String] {
    &self.watch
  }

  /// Entries emitted in the NETWORK section, stored verbatim.
  pub fn network_entries(&self) -> &[String] {
    &self.network
  }

  /// FALLBACK rules as `(namespace, url)` pairs in insertion order.
  pub fn fallback_rules(&self) -> &[(String, String)] {
    &self.fallback
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::tempdir;

  fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
  }

  #[test]
  fn expands_patterns_to_root_relative_entries() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("index.html"), "index");
    write_file(&root.join("pages/about.html"), "about");
    write_file(&root.join("pages/notes/today.html"), "today");
    write_file(&root.join("style.css"), "css");

    let manifest = ManifestBuilder::new(root)
      .cache_patterns(["*.html", "**/*.html"])
      .build();

    assert_eq!(manifest.cache_entries(), &[
      "index.html".to_string(),
      "index.html".to_string(),
      "pages/about.html".to_string(),
      "pages/notes/today.html".to_string(),
    ]);
  }

  #[test]
  fn pattern_without_matches_contributes_nothing() {
    let dir = tempdir().unwrap();

    let manifest = ManifestBuilder::new(dir.path())
      .cache_patterns(["missing/**/*.png"])
      .build();

    assert!(manifest.cache_entries().is_empty());
  }

  #[test]
  fn literals_under_the_root_are_normalised() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let absolute = root.join("app.js").to_string_lossy().to_string();

    let manifest = ManifestBuilder::new(root)
      .cache([absolute.as_str(), "index.html", "https://cdn.example.com/lib.js"])
      .build();

    assert_eq!(manifest.cache_entries(), &[
      "app.js".to_string(),
      "index.html".to_string(),
      "https://cdn.example.com/lib.js".to_string(),
    ]);
  }

  #[test]
  fn network_entries_are_stored_verbatim() {
    let dir = tempdir().unwrap();

    let manifest = ManifestBuilder::new(dir.path())
      .network(["*", "https://api.example.com/"])
      .build();

    assert_eq!(manifest.network_entries(), &[
      "*".to_string(),
      "https://api.example.com/".to_string(),
    ]);
  }

  #[test]
  fn fallback_overwrites_keep_their_position() {
    let dir = tempdir().unwrap();

    let manifest = ManifestBuilder::new(dir.path())
      .fallback("/", "/offline.html")
      .fallback("/images/", "/blank.png")
      .fallback("/", "/offline-v2.html")
      .build();

    assert_eq!(manifest.fallback_rules(), &[
      ("/".to_string(), "/offline-v2.html".to_string()),
      ("/images/".to_string(), "/blank.png".to_string()),
    ]);
  }

  #[test]
  fn watch_entries_never_join_the_cache_collection() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("layout.tmpl"), "layout");

    let manifest = ManifestBuilder::new(root)
      .watch_patterns(["*.tmpl"])
      .watch(["partials/header.tmpl"])
      .build();

    assert!(manifest.cache_entries().is_empty());
    assert_eq!(manifest.watch_entries(), &[
      "layout.tmpl".to_string(),
      "partials/header.tmpl".to_string(),
    ]);
  }

  #[test]
  fn classifies_urls_by_scheme_separator() {
    assert!(is_url("https://example.com/app.js"));
    assert!(is_url("custom://resource"));
    assert!(!is_url("pages/about.html"));
    assert!(!is_url("weird:name"));
  }
}
