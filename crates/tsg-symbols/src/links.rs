//! Typed directed edges between nodes.
//!
//! A link is stored once in the arena and referenced from both ends: the
//! source's outgoing list and the destination's incoming list. `connect`
//! and `disconnect` are the only places that touch those lists, so a link
//! is never half-attached.
//!
//! Fan-out per node is bounded by its declared members and signatures, so
//! lookups by kind are linear scans.

use crate::flags::LinkKind;
use crate::graph::SymbolGraph;
use crate::ids::{LinkId, SymbolId};
use smallvec::SmallVec;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
    pub source: SymbolId,
    pub dest: SymbolId,
    pub kind: LinkKind,
}

impl SymbolGraph {
    /// Add a link from `source` to `dest`.
    ///
    /// Connecting a `ContainedBy` edge also registers the source in the
    /// container's contained-member cache.
    pub fn connect(&mut self, source: SymbolId, dest: SymbolId, kind: LinkKind) -> LinkId {
        if kind == LinkKind::ContainedBy {
            assert!(
                self.is_type(dest),
                "ContainedBy link from {source:?} to non-type {dest:?}"
            );
        }

        let id = LinkId(self.links.len() as u32);
        self.links.push(Some(Link { source, dest, kind }));
        self.symbol_mut(source).outgoing.push(id);
        self.symbol_mut(dest).incoming.push(id);
        trace!(link = id.0, source = source.0, dest = dest.0, kind = ?kind, "connect");

        self.note_link_added(source, dest, kind);
        id
    }

    /// Remove a link from both of its ends. Unknown or already removed
    /// links are ignored.
    pub fn disconnect(&mut self, link: LinkId) {
        let Some(slot) = self.links.get_mut(link.index()) else {
            return;
        };
        let Some(removed) = slot.take() else {
            return;
        };
        self.symbol_mut(removed.source).outgoing.retain(|l| *l != link);
        self.symbol_mut(removed.dest).incoming.retain(|l| *l != link);
        trace!(link = link.0, source = removed.source.0, dest = removed.dest.0, kind = ?removed.kind, "disconnect");

        self.note_link_removed(removed);
    }

    /// Remove every `kind` link from `source` to `dest`.
    pub fn disconnect_between(&mut self, source: SymbolId, dest: SymbolId, kind: LinkKind) {
        let doomed: SmallVec<[LinkId; 2]> = self
            .outgoing(source, move |l| l.kind == kind && l.dest == dest)
            .collect();
        for link in doomed {
            self.disconnect(link);
        }
    }

    #[inline]
    pub fn link(&self, link: LinkId) -> Option<&Link> {
        self.links.get(link.index()).and_then(Option::as_ref)
    }

    /// Outgoing links of `source` accepted by `predicate`, in insertion order.
    pub fn outgoing<'a>(
        &'a self,
        source: SymbolId,
        predicate: impl Fn(&Link) -> bool + 'a,
    ) -> impl Iterator<Item = LinkId> + 'a {
        self.symbol(source)
            .outgoing
            .iter()
            .copied()
            .filter(move |&id| self.link(id).is_some_and(&predicate))
    }

    /// Incoming links of `dest` accepted by `predicate`, in insertion order.
    pub fn incoming<'a>(
        &'a self,
        dest: SymbolId,
        predicate: impl Fn(&Link) -> bool + 'a,
    ) -> impl Iterator<Item = LinkId> + 'a {
        self.symbol(dest)
            .incoming
            .iter()
            .copied()
            .filter(move |&id| self.link(id).is_some_and(&predicate))
    }

    pub fn outgoing_links(&self, source: SymbolId, kind: LinkKind) -> SmallVec<[LinkId; 4]> {
        self.outgoing(source, move |l| l.kind == kind).collect()
    }

    /// Destinations of `source`'s outgoing `kind` links, in insertion order.
    pub fn outgoing_targets(&self, source: SymbolId, kind: LinkKind) -> SmallVec<[SymbolId; 4]> {
        self.symbol(source)
            .outgoing
            .iter()
            .filter_map(|&id| self.link(id))
            .filter(|l| l.kind == kind)
            .map(|l| l.dest)
            .collect()
    }

    /// Sources of `dest`'s incoming `kind` links, in insertion order.
    pub fn incoming_sources(&self, dest: SymbolId, kind: LinkKind) -> SmallVec<[SymbolId; 4]> {
        self.symbol(dest)
            .incoming
            .iter()
            .filter_map(|&id| self.link(id))
            .filter(|l| l.kind == kind)
            .map(|l| l.source)
            .collect()
    }

    pub fn first_target(&self, source: SymbolId, kind: LinkKind) -> Option<SymbolId> {
        self.symbol(source)
            .outgoing
            .iter()
            .filter_map(|&id| self.link(id))
            .find(|l| l.kind == kind)
            .map(|l| l.dest)
    }

    /// Every live link is referenced exactly once from each of its ends,
    /// and every list entry refers to a live link with that end.
    pub fn verify_link_pairs(&self) -> bool {
        for (index, slot) in self.links.iter().enumerate() {
            let Some(link) = slot else { continue };
            let id = LinkId(index as u32);
            let out = self.symbol(link.source).outgoing.iter().filter(|l| **l == id).count();
            let inc = self.symbol(link.dest).incoming.iter().filter(|l| **l == id).count();
            if out != 1 || inc != 1 {
                return false;
            }
        }
        self.symbols.iter().all(|symbol| {
            symbol
                .outgoing
                .iter()
                .all(|&l| self.link(l).is_some_and(|link| link.source == symbol.id))
                && symbol
                    .incoming
                    .iter()
                    .all(|&l| self.link(l).is_some_and(|link| link.dest == symbol.id))
        })
    }

    // =========================================================================
    // Cache maintenance
    // =========================================================================

    fn note_link_added(&mut self, source: SymbolId, dest: SymbolId, kind: LinkKind) {
        match kind {
            LinkKind::ContainedBy => {
                let name = self.symbol(source).name.clone();
                if let Some(info) = self.symbol(dest).type_info() {
                    if let Some(cache) = info.caches.contained_members.borrow_mut().as_mut() {
                        cache.entry(name).or_default().push(source);
                    }
                }
            }
            _ => self.drop_caches_for(source, kind),
        }
    }

    fn note_link_removed(&mut self, link: Link) {
        match link.kind {
            LinkKind::ContainedBy => {
                let name = &self.symbol(link.source).name;
                if let Some(info) = self.symbol(link.dest).type_info() {
                    if let Some(cache) = info.caches.contained_members.borrow_mut().as_mut() {
                        if let Some(entries) = cache.get_mut(name) {
                            entries.retain(|s| *s != link.source);
                            if entries.is_empty() {
                                cache.remove(name);
                            }
                        }
                    }
                }
            }
            _ => self.drop_caches_for(link.source, link.kind),
        }
    }

    /// Drop the caches of `source` that are derived from `kind` links.
    fn drop_caches_for(&self, source: SymbolId, kind: LinkKind) {
        let Some(info) = self.symbol(source).type_info() else {
            return;
        };
        let caches = &info.caches;
        match kind {
            LinkKind::PublicMember | LinkKind::PrivateMember => {
                caches.member_by_name.replace(None);
            }
            LinkKind::EnclosedType => {
                caches.nested_type_by_name.replace(None);
            }
            LinkKind::CallSignature => {
                caches.call_signatures.replace(None);
            }
            LinkKind::ConstructSignature => {
                caches.construct_signatures.replace(None);
            }
            LinkKind::IndexSignature => {
                caches.index_signatures.replace(None);
            }
            _ => {}
        }
        caches.free_type_parameters.replace(None);
    }
}

#[cfg(test)]
#[path = "../tests/links_tests.rs"]
mod tests;
