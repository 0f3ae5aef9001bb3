use crate::{Card, Region, Role};
use std::collections::HashMap;

/// Read-only view over the playable cards.
pub trait CardSource {
    /// Cards for a role, in catalog order.
    fn list_by_role(&self, role: Role) -> Vec<&Card>;
    fn find_by_id(&self, id: &str) -> Option<&Card>;
    fn count(&self) -> usize;

    fn list_by_region(&self, region: Region) -> Vec<&Card>;

    /// Resolves ids in order, dropping unknown ones.
    fn find_many(&self, ids: &[&str]) -> Vec<&Card> {
        ids.iter().filter_map(|id| self.find_by_id(id)).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cards: Vec<Card>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Later duplicates of an id are ignored; callers that care validate first.
    pub fn new(cards: Vec<Card>) -> Self {
        let mut by_id = HashMap::with_capacity(cards.len());
        for (idx, card) in cards.iter().enumerate() {
            by_id.entry(card.id.clone()).or_insert(idx);
        }
        Self { cards, by_id }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn roles_missing(&self) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| !self.cards.iter().any(|card| card.role == *role))
            .collect()
    }
}

impl CardSource for Catalog {
    fn list_by_role(&self, role: Role) -> Vec<&Card> {
        self.cards.iter().filter(|card| card.role == role).collect()
    }

    fn find_by_id(&self, id: &str) -> Option<&Card> {
        self.by_id.get(id).map(|idx| &self.cards[*idx])
    }

    fn count(&self) -> usize {
        self.cards.len()
    }

    fn list_by_region(&self, region: Region) -> Vec<&Card> {
        self.cards
            .iter()
            .filter(|card| card.region == region)
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::{Card, Catalog, Region, Role};

    pub fn card(id: &str, team: &str, role: Role) -> Card {
        Card {
            id: id.to_string(),
            name: id.split('-').next().unwrap_or(id).to_string(),
            team: team.to_string(),
            region: Region::Lck,
            role,
            year: "2024".to_string(),
            image_ref: None,
        }
    }

    pub fn t1_2024() -> Vec<Card> {
        vec![
            card("zeus-t1-2024", "T1", Role::Top),
            card("oner-t1-2024", "T1", Role::Jungle),
            card("faker-t1-2024", "T1", Role::Mid),
            card("gumayusi-t1-2024", "T1", Role::Adc),
            card("keria-t1-2024", "T1", Role::Support),
        ]
    }

    pub fn small_catalog() -> Catalog {
        let mut cards = t1_2024();
        cards.push(card("kiin-gen-2024", "GEN", Role::Top));
        cards.push(card("chovy-gen-2024", "GEN", Role::Mid));
        cards.push(card("peyz-gen-2024", "GEN", Role::Adc));
        Catalog::new(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{card, small_catalog};
    use super::*;

    #[test]
    fn lists_by_role_in_catalog_order() {
        let catalog = small_catalog();
        let mids: Vec<&str> = catalog
            .list_by_role(Role::Mid)
            .iter()
            .map(|card| card.id.as_str())
            .collect();
        assert_eq!(mids, vec!["faker-t1-2024", "chovy-gen-2024"]);
        assert_eq!(catalog.count(), 8);
    }

    #[test]
    fn find_many_skips_unknown_ids() {
        let catalog = small_catalog();
        let found = catalog.find_many(&["keria-t1-2024", "nobody", "kiin-gen-2024"]);
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].team, "GEN");
    }

    #[test]
    fn reports_roles_without_cards() {
        let catalog = Catalog::new(vec![card("a", "T1", Role::Top)]);
        assert_eq!(
            catalog.roles_missing(),
            vec![Role::Jungle, Role::Mid, Role::Adc, Role::Support]
        );
    }
}
