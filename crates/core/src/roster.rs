use crate::{Card, CardSource, RngState, Role};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("{0} slot is already filled")]
    SlotFilled(Role),
    #[error("a reveal is already in progress")]
    RevealActive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReveal {
    pub role: Role,
    pub card: Card,
}

/// The five role slots, the card being revealed and the upgraded marks.
#[derive(Debug, Clone, Default)]
pub struct RosterStore {
    slots: [Option<Card>; 5],
    revealing: Option<PendingReveal>,
    upgraded: BTreeSet<String>,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks a random card for `role` and holds it as the pending reveal.
    /// The slot itself is only filled by [`RosterStore::complete_reveal`].
    ///
    /// # Panics
    ///
    /// When the catalog has no card for `role`. Catalog loading rejects such
    /// data, so reaching this is a bug.
    pub fn draw_card(
        &mut self,
        role: Role,
        catalog: &impl CardSource,
        rng: &mut RngState,
    ) -> Result<&Card, RosterError> {
        if self.revealing.is_some() {
            return Err(RosterError::RevealActive);
        }
        if self.slots[role.index()].is_some() {
            return Err(RosterError::SlotFilled(role));
        }
        let pool = catalog.list_by_role(role);
        assert!(!pool.is_empty(), "catalog has no cards for role {role}");
        let card = pool[rng.pick_index(pool.len())].clone();
        let pending = self.revealing.insert(PendingReveal { role, card });
        Ok(&pending.card)
    }

    /// Commits the pending card into the role it was drawn for. Without a
    /// pending reveal this does nothing.
    pub fn complete_reveal(&mut self) -> Option<Role> {
        let PendingReveal { role, card } = self.revealing.take()?;
        self.slots[role.index()] = Some(card);
        Some(role)
    }

    /// Drops the pending reveal without committing it.
    pub fn abandon_reveal(&mut self) -> Option<PendingReveal> {
        self.revealing.take()
    }

    pub fn reset_game(&mut self) {
        self.slots = Default::default();
        self.revealing = None;
        self.upgraded.clear();
    }

    pub fn revealing(&self) -> Option<&PendingReveal> {
        self.revealing.as_ref()
    }

    pub fn slot(&self, role: Role) -> Option<&Card> {
        self.slots[role.index()].as_ref()
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.filled_count() == Role::ALL.len()
    }

    /// All five cards in canonical order, once every slot is filled.
    pub fn full_roster(&self) -> Option<Vec<Card>> {
        self.slots.iter().cloned().collect()
    }

    pub fn mark_upgraded<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.upgraded.extend(ids.into_iter().map(Into::into));
    }

    pub fn clear_upgrades(&mut self) {
        self.upgraded.clear();
    }

    pub fn is_upgraded(&self, id: &str) -> bool {
        self.upgraded.contains(id)
    }

    pub fn upgraded_ids(&self) -> &BTreeSet<String> {
        &self.upgraded
    }
}
