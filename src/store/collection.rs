use log::debug;

/// An entity held by the store. `KIND` is used for log lines only.
pub trait Record: Clone {
    const KIND: &'static str;

    fn id(&self) -> &str;
}

/// A shallow-merge update: fields carried by the patch overwrite, omitted
/// fields keep their prior value.
pub trait Patch<E> {
    fn apply(self, target: &mut E);
}

/// Insertion-ordered collection of one entity type. Lookups are linear;
/// workspaces hold tens of records, not thousands.
#[derive(Debug, Clone)]
pub struct Collection<E: Record> {
    items: Vec<E>,
}

impl<E: Record> Default for Collection<E> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<E: Record> Collection<E> {
    pub fn from_items(items: Vec<E>) -> Self {
        Self { items }
    }

    pub fn insert(&mut self, entity: E) {
        self.items.push(entity);
    }

    pub fn get(&self, id: &str) -> Option<&E> {
        self.items.iter().find(|e| e.id() == id)
    }

    /// Shallow-merges `patch` over the entity with `id`. Missing ids are a
    /// documented no-op, not an error: the caller may hold a stale id.
    pub fn update<P: Patch<E>>(&mut self, id: &str, patch: P) -> bool {
        match self.items.iter_mut().find(|e| e.id() == id) {
            Some(entity) => {
                patch.apply(entity);
                true
            }
            None => {
                debug!("update for missing {} {id} ignored", E::KIND);
                false
            }
        }
    }

    /// Removes the entity with `id` if present; no-op otherwise.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|e| e.id() != id);
        if self.items.len() == before {
            debug!("delete for missing {} {id} ignored", E::KIND);
            false
        } else {
            true
        }
    }

    pub fn as_slice(&self) -> &[E] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
