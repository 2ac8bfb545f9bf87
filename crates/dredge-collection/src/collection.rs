//! Collections: a file filter plus a way to decode each matching file.

use crate::decode::DecodeStep;
use crate::discovery::SegmentFilter;
use crate::document::Document;
use crate::error::{CollectionError, CollectionResult};
use crate::segment::Segment;
use crate::source::{SegmentSource, open_source};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A corpus format: which files belong to it and how to read them.
///
/// Implementors usually only provide [`filter`](Self::filter) and
/// [`decoder`](Self::decoder); opening and discovery have defaults.
pub trait Collection {
    /// Decode step run over each segment
    type Decoder: DecodeStep<Item = Document>;

    /// Short name used in logs and reports
    fn name(&self) -> &str;

    /// File filter applied during discovery
    fn filter(&self) -> &SegmentFilter;

    /// Build a decode step over an opened source.
    fn decoder(&self, source: SegmentSource) -> Self::Decoder;

    /// Every segment file under `root`.
    fn segment_paths(&self, root: &Path) -> Vec<PathBuf> {
        self.filter().discover(root)
    }

    /// Open one segment.
    fn open_segment(&self, path: &Path) -> CollectionResult<Segment<Self::Decoder>> {
        let source = open_source(path).map_err(|source| CollectionError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(collection = self.name(), path = %path.display(), "opened segment");
        Ok(Segment::new(path, self.decoder(source)))
    }

    /// Lazily open every segment under `root`.
    ///
    /// Paths that cannot be opened are logged and passed over.
    fn segments(&self, root: &Path) -> SegmentIter<'_, Self>
    where
        Self: Sized,
    {
        SegmentIter {
            collection: self,
            paths: self.segment_paths(root).into_iter(),
        }
    }
}

/// Iterator returned by [`Collection::segments`].
///
/// Only one segment is open at a time unless the caller holds on to them.
pub struct SegmentIter<'a, C: Collection> {
    collection: &'a C,
    paths: std::vec::IntoIter<PathBuf>,
}

impl<C: Collection> SegmentIter<'_, C> {
    /// Paths not yet visited
    pub fn remaining(&self) -> usize {
        self.paths.len()
    }
}

impl<C: Collection> Iterator for SegmentIter<'_, C> {
    type Item = Segment<C::Decoder>;

    fn next(&mut self) -> Option<Self::Item> {
        for path in self.paths.by_ref() {
            match self.collection.open_segment(&path) {
                Ok(segment) => return Some(segment),
                Err(err) => warn!(collection = self.collection.name(), "{err}"),
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.paths.len()))
    }
}

impl<C: Collection> std::fmt::Debug for SegmentIter<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentIter")
            .field("collection", &self.collection.name())
            .field("remaining", &self.paths.len())
            .finish()
    }
}
