//! Assign sources to compilation libraries, keeping compile order.
//!
//! Sources are given in compile order, each optionally followed by the library it
//! compiles into:
//!
//! * `a.vhd` goes to the library named by a later marker, or the work library.
//! * `a.vhd=lib` puts `a.vhd` and every pending source before it in `lib`.
//! * `=lib` puts every pending source in `lib`.
//! * `a.vhd= lib` (or `= lib`) defers the library name to the next token.

use std::fmt::Display;

use itertools::Itertools;

/// A source file and the library it compiles into.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourceEntry {
    pub library: String,
    pub path: String,
}

impl SourceEntry {
    pub fn new(library: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            library: library.into(),
            path: path.into(),
        }
    }
}

// the `path=library` form used in generated makefiles.
impl Display for SourceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.path, self.library)
    }
}

/// Libraries with their sources in compile order.
///
/// Libraries are kept in the order they were first named.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LibraryTable {
    libraries: Vec<(String, Vec<String>)>,
}

impl LibraryTable {
    pub fn get(&self, library: &str) -> Option<&[String]> {
        self.libraries
            .iter()
            .find(|(name, _)| name == library)
            .map(|(_, sources)| sources.as_slice())
    }
    pub fn contains(&self, library: &str) -> bool {
        self.get(library).is_some()
    }
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.libraries.iter().map(|(name, _)| name.as_str())
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.libraries
            .iter()
            .map(|(name, sources)| (name.as_str(), sources.as_slice()))
    }
    pub fn len(&self) -> usize {
        self.libraries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    /// The sources of `library`, registering the library if it is new.
    fn sources_mut(&mut self, library: &str) -> &mut Vec<String> {
        let idx = match self.libraries.iter().position(|(name, _)| name == library) {
            Some(idx) => idx,
            None => {
                self.libraries.push((library.to_string(), Vec::new()));
                self.libraries.len() - 1
            }
        };
        &mut self.libraries[idx].1
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for LibraryTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// The result of [`resolve`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Sources {
    entries: Vec<SourceEntry>,
    libraries: LibraryTable,
}

impl Sources {
    /// Every source in compile order, with its library.
    pub fn entries(&self) -> &[SourceEntry] {
        &self.entries
    }
    pub fn libraries(&self) -> &LibraryTable {
        &self.libraries
    }
    /// Libraries that were named but received no source, e.g. with a leading `=lib`.
    pub fn empty_libraries(&self) -> impl Iterator<Item = &str> {
        self.libraries
            .iter()
            .filter(|(_, sources)| sources.is_empty())
            .map(|(name, _)| name)
    }
}

/// Accumulates `--src` tokens one at a time.
///
/// Sources are buffered until a library is named for them; [`SourceResolver::finish`]
/// assigns whatever is left to the default library.
#[derive(Clone, Debug, Default)]
pub struct SourceResolver {
    pending: Vec<String>,
    library_next: bool,
    sources: Sources,
}

impl SourceResolver {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, token: &str) {
        if self.library_next {
            self.library_next = false;
            self.assign(token);
        } else if let Some((src, lib)) = token.split_once('=') {
            if !src.is_empty() {
                self.pending.push(src.to_string());
            }
            if lib.is_empty() {
                self.library_next = true;
            } else {
                self.assign(lib);
            }
        } else {
            self.pending.push(token.to_string());
        }
    }

    pub fn finish(mut self, default_library: &str) -> Sources {
        if self.library_next {
            log::warn!(
                "missing library name after `=`, using `{default_library}` for {}",
                self.pending.iter().format(", ")
            );
        }
        if !self.pending.is_empty() {
            self.assign(default_library);
        }
        self.sources
    }

    fn assign(&mut self, library: &str) {
        log::debug!(
            "library `{library}`: {}",
            self.pending.iter().format(" ")
        );
        let sources = self.sources.libraries.sources_mut(library);
        sources.extend(self.pending.iter().cloned());
        self.sources.entries.extend(
            self.pending
                .drain(..)
                .map(|path| SourceEntry::new(library, path)),
        );
    }
}

/// Assign sources to libraries.
///
/// Each group holds the tokens of one `--src` occurrence. Groups are processed in
/// order as a single token stream.
pub fn resolve(
    groups: impl IntoIterator<Item = impl IntoIterator<Item = impl AsRef<str>>>,
    default_library: &str,
) -> Sources {
    let mut resolver = SourceResolver::new();
    for token in groups.into_iter().flatten() {
        resolver.push(token.as_ref());
    }
    resolver.finish(default_library)
}
