//! Schematic store: the reference diagram catalog.
//!
//! # Invariants
//! - Upserts without an image are rejected before any state change.
//! - Persisted entries without an image are skipped at load.

use crate::model::schematic::{Schematic, SchematicDraft};
use crate::repo::collection_repo::{CollectionKey, CollectionRepository, RepoResult};
use crate::service::seed::default_schematic_drafts;
use log::{info, warn};
use std::collections::HashSet;

/// In-memory schematic catalog backed by a collection repository.
pub struct SchematicStore<R: CollectionRepository> {
    repo: R,
    schematics: Vec<Schematic>,
}

impl<R: CollectionRepository> SchematicStore<R> {
    /// Loads the persisted catalog, installing defaults when empty.
    ///
    /// A snapshot that needed defaults, or held invalid or repeated entries,
    /// is written back in normalized form.
    pub fn open(repo: R) -> RepoResult<Self> {
        let drafts: Vec<SchematicDraft> = repo.load(CollectionKey::UserSchematics)?;
        let loaded = drafts.len();

        let mut seen = HashSet::new();
        let mut normalized = false;
        let mut schematics = Vec::with_capacity(loaded);
        for draft in drafts {
            let Ok(schematic) = Schematic::from_draft(draft.clone()) else {
                continue;
            };
            normalized |= schematic.to_draft() != draft;
            if seen.insert(schematic.id.clone()) {
                schematics.push(schematic);
            }
        }
        if schematics.len() != loaded {
            warn!(
                "event=schematic_store_open module=service status=skipped_invalid loaded={} kept={}",
                loaded,
                schematics.len()
            );
        }

        let mut store = Self {
            repo,
            schematics: Vec::new(),
        };
        if schematics.is_empty() {
            store.seed()?;
        } else if normalized || schematics.len() != loaded {
            store.commit(schematics)?;
            info!(
                "event=schematic_store_open module=service status=normalized count={}",
                store.schematics.len()
            );
        } else {
            store.schematics = schematics;
        }

        info!(
            "event=schematic_store_open module=service status=ok count={}",
            store.schematics.len()
        );
        Ok(store)
    }

    pub fn list(&self) -> &[Schematic] {
        &self.schematics
    }

    pub fn len(&self) -> usize {
        self.schematics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schematics.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Schematic> {
        self.schematics.iter().find(|schematic| schematic.id == id)
    }

    /// Case-insensitive match on title or category; empty filter matches all.
    pub fn search(&self, filter: &str) -> Vec<Schematic> {
        let needle = filter.to_lowercase();
        self.schematics
            .iter()
            .filter(|schematic| schematic.matches_lowercase(&needle))
            .cloned()
            .collect()
    }

    /// Creates or replaces a schematic.
    ///
    /// # Errors
    /// - `RepoError::Validation(MissingImage)` when the draft has no image;
    ///   neither memory nor storage is touched.
    pub fn upsert(&mut self, draft: SchematicDraft) -> RepoResult<Schematic> {
        let schematic = Schematic::from_draft(draft).inspect_err(|err| {
            warn!("event=schematic_upsert module=service status=rejected reason={err}");
        })?;
        let mut next = self.schematics.clone();

        let mode = match next.iter().position(|existing| existing.id == schematic.id) {
            Some(index) => {
                next[index] = schematic.clone();
                "update"
            }
            None => {
                next.insert(0, schematic.clone());
                "create"
            }
        };

        self.commit(next)?;
        info!(
            "event=schematic_upsert module=service status=ok mode={} id={} count={}",
            mode,
            schematic.id,
            self.schematics.len()
        );
        Ok(schematic)
    }

    /// Removes the schematic with `id`. Absent ids are a no-op.
    pub fn remove(&mut self, id: &str) -> RepoResult<()> {
        let next: Vec<Schematic> = self
            .schematics
            .iter()
            .filter(|schematic| schematic.id != id)
            .cloned()
            .collect();
        let removed = self.schematics.len() - next.len();

        self.commit(next)?;
        info!(
            "event=schematic_remove module=service status=ok id={} removed={}",
            id, removed
        );
        Ok(())
    }

    fn seed(&mut self) -> RepoResult<()> {
        let seeded = default_schematic_drafts()
            .into_iter()
            .map(Schematic::from_draft)
            .collect::<Result<Vec<_>, _>>()?;
        self.commit(seeded)?;
        info!(
            "event=schematic_seed module=service status=ok count={}",
            self.schematics.len()
        );
        Ok(())
    }

    fn commit(&mut self, next: Vec<Schematic>) -> RepoResult<()> {
        self.repo.save(CollectionKey::UserSchematics, &next)?;
        self.schematics = next;
        Ok(())
    }
}
