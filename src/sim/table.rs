//! Shared position table
//!
//! One slot per card, holding the last position that card published. The
//! scene owns the table and lends it to each entity's tick; each entity
//! writes only its own slot (from its integration step, or from the drag
//! handoff while the pointer owns it) and reads every other slot for
//! magnetism. Because entities update in index order within a frame, a read
//! may observe a neighbor's current-tick or previous-tick position; the
//! one-frame staleness is expected.

use glam::Vec2;

#[derive(Debug, Clone)]
pub struct PositionTable {
    slots: Vec<Vec2>,
}

impl PositionTable {
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![Vec2::ZERO; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Record `pos` as the latest known position of entity `index`
    pub fn publish(&mut self, index: usize, pos: Vec2) {
        self.slots[index] = pos;
    }

    pub fn get(&self, index: usize) -> Vec2 {
        self.slots[index]
    }

    /// Latest known positions of every entity except `index`
    pub fn others(&self, index: usize) -> impl Iterator<Item = Vec2> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != index)
            .map(|(_, pos)| *pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_read() {
        let mut table = PositionTable::new(3);
        table.publish(1, Vec2::new(10.0, 20.0));

        assert_eq!(table.get(1), Vec2::new(10.0, 20.0));
        assert_eq!(table.get(0), Vec2::ZERO);
    }

    #[test]
    fn test_others_excludes_self() {
        let mut table = PositionTable::new(3);
        table.publish(0, Vec2::new(1.0, 0.0));
        table.publish(1, Vec2::new(2.0, 0.0));
        table.publish(2, Vec2::new(3.0, 0.0));

        let others: Vec<_> = table.others(1).collect();
        assert_eq!(others, vec![Vec2::new(1.0, 0.0), Vec2::new(3.0, 0.0)]);
    }
}
