// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::BTreeMap,
          fmt::{Display, Formatter, Result as FmtResult},
          sync::Arc};

use crate::{AttributeCache, CacheStats, Document, LayoutConfig, LayoutConfigError,
            MemoryReport, WorkspaceError, new_shared_attribute_cache, ok};

/// A set of named [`Document`]s that all draw their formats from one shared
/// [`AttributeCache`], so the same format used in two documents is a single instance.
#[derive(Debug)]
pub struct Workspace {
    cache: Arc<AttributeCache>,
    documents: BTreeMap<String, Document>,
    layout_config: LayoutConfig,
}

impl Default for Workspace {
    fn default() -> Self { Self::with_cache(new_shared_attribute_cache()) }
}

impl Workspace {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_cache(cache: Arc<AttributeCache>) -> Self {
        Self {
            cache,
            documents: BTreeMap::new(),
            layout_config: LayoutConfig::default(),
        }
    }

    /// Layout used by documents created from now on.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutConfigError::OutOfRange`] for a negative or non-finite value.
    pub fn with_layout_config(
        mut self,
        layout_config: LayoutConfig,
    ) -> Result<Self, LayoutConfigError> {
        layout_config.validate()?;
        self.layout_config = layout_config;
        ok!(self)
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<AttributeCache> { &self.cache }

    #[must_use]
    pub fn len(&self) -> usize { self.documents.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    /// # Errors
    ///
    /// Returns [`WorkspaceError::DuplicateDocument`] if `name` is taken.
    pub fn create_document(
        &mut self,
        name: impl Into<String>,
    ) -> Result<&mut Document, WorkspaceError> {
        use std::collections::btree_map::Entry;

        match self.documents.entry(name.into()) {
            Entry::Occupied(entry) => Err(WorkspaceError::DuplicateDocument {
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                let document =
                    Document::with_cache(entry.key().clone(), Arc::clone(&self.cache))
                        .with_checked_layout_config(self.layout_config);
                ok!(entry.insert(document))
            }
        }
    }

    #[must_use]
    pub fn document(&self, name: &str) -> Option<&Document> { self.documents.get(name) }

    pub fn document_mut(&mut self, name: &str) -> Option<&mut Document> {
        self.documents.get_mut(name)
    }

    /// The removed document keeps its handle on the shared cache while it lives.
    pub fn remove_document(&mut self, name: &str) -> Option<Document> {
        self.documents.remove(name)
    }

    /// Document names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> { self.documents.keys().map(String::as_str) }

    #[must_use]
    pub fn global_report(&self) -> WorkspaceReport {
        let documents: Vec<(String, MemoryReport)> = self
            .documents
            .iter()
            .map(|(name, document)| (name.clone(), document.memory_report()))
            .collect();
        let total_glyphs = documents.iter().map(|(_, it)| it.total_glyphs).sum();

        WorkspaceReport::new(total_glyphs, self.cache.size(), self.cache.stats(), documents)
    }

    /// Drops every interned format and resets the counters. Only possible while no
    /// document (inside or outside the workspace) or other owner holds the cache.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::CacheInUse`] with the number of other holders.
    pub fn try_clear_cache(&mut self) -> Result<(), WorkspaceError> {
        match Arc::get_mut(&mut self.cache) {
            Some(cache) => {
                cache.clear();
                ok!()
            }
            None => Err(WorkspaceError::CacheInUse {
                holders: Arc::strong_count(&self.cache) - 1,
            }),
        }
    }
}

/// Totals across every document of a [`Workspace`].
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceReport {
    pub total_documents: usize,
    pub total_glyphs: usize,
    pub average_glyphs_per_document: f64,
    pub unique_formats: usize,
    pub cache_stats: CacheStats,
    /// Sorted by document name.
    pub documents: Vec<(String, MemoryReport)>,
}

impl WorkspaceReport {
    #[must_use]
    pub fn new(
        total_glyphs: usize,
        unique_formats: usize,
        cache_stats: CacheStats,
        documents: Vec<(String, MemoryReport)>,
    ) -> Self {
        let total_documents = documents.len();
        let average_glyphs_per_document = if total_documents == 0 {
            0.0
        } else {
            total_glyphs as f64 / total_documents as f64
        };
        Self {
            total_documents,
            total_glyphs,
            average_glyphs_per_document,
            unique_formats,
            cache_stats,
            documents,
        }
    }
}

impl Display for WorkspaceReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(
            f,
            "{} documents, {} glyphs ({:.1} per document), {} unique formats",
            self.total_documents,
            self.total_glyphs,
            self.average_glyphs_per_document,
            self.unique_formats
        )?;
        write!(f, "cache: {}", self.cache_stats)?;
        for (name, report) in &self.documents {
            write!(f, "\n  {name}: {report}")?;
        }
        ok!()
    }
}
