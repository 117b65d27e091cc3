use crate::grid::{Dir, Pos};
use ahash::AHashSet;
use std::collections::VecDeque;

/// The snake: segments ordered tail to head, plus an occupancy set kept in
/// step with the deque.
#[derive(Clone, Debug)]
pub struct Agent {
    segments: VecDeque<Pos>,
    occupied: AHashSet<Pos>,
    dir: Dir,
}

impl Agent {
    pub fn empty(dir: Dir) -> Self {
        Self { segments: VecDeque::new(), occupied: AHashSet::new(), dir }
    }

    /// A straight run of `length` cells ending at `head`, trailing away from
    /// the facing direction.
    pub fn straight(head: Pos, length: usize, dir: Dir) -> Self {
        let back = dir.opposite();
        let mut cells = Vec::with_capacity(length);
        let mut p = head;
        for _ in 0..length {
            cells.push(p);
            p = p.step(back);
        }
        cells.reverse();
        Self::from_segments(cells, dir)
    }

    pub(crate) fn from_segments(cells: impl IntoIterator<Item = Pos>, dir: Dir) -> Self {
        let segments: VecDeque<Pos> = cells.into_iter().collect();
        let occupied = segments.iter().copied().collect();
        Self { segments, occupied, dir }
    }

    pub fn head(&self) -> Option<Pos> {
        self.segments.back().copied()
    }

    pub fn tail(&self) -> Option<Pos> {
        self.segments.front().copied()
    }

    pub fn dir(&self) -> Dir {
        self.dir
    }

    pub fn set_dir(&mut self, dir: Dir) {
        self.dir = dir;
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn occupies(&self, p: Pos) -> bool {
        self.occupied.contains(&p)
    }

    /// Tail first, head last.
    pub fn segments(&self) -> impl ExactSizeIterator<Item = Pos> + DoubleEndedIterator + '_ {
        self.segments.iter().copied()
    }

    pub fn push_head(&mut self, p: Pos) {
        self.segments.push_back(p);
        self.occupied.insert(p);
    }

    pub fn pop_tail(&mut self) -> Option<Pos> {
        let tail = self.segments.pop_front()?;
        self.occupied.remove(&tail);
        Some(tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_run_is_tail_to_head() {
        let agent = Agent::straight(Pos::new(4, 5), 5, Dir::Right);
        let cells: Vec<Pos> = agent.segments().collect();
        assert_eq!(
            cells,
            vec![Pos::new(0, 5), Pos::new(1, 5), Pos::new(2, 5), Pos::new(3, 5), Pos::new(4, 5)]
        );
        assert_eq!(agent.head(), Some(Pos::new(4, 5)));
        assert_eq!(agent.tail(), Some(Pos::new(0, 5)));
        assert_eq!(agent.dir(), Dir::Right);
    }

    #[test]
    fn occupancy_follows_push_and_pop() {
        let mut agent = Agent::straight(Pos::new(2, 0), 3, Dir::Right);
        assert!(agent.occupies(Pos::new(0, 0)));

        agent.push_head(Pos::new(3, 0));
        assert_eq!(agent.pop_tail(), Some(Pos::new(0, 0)));
        assert!(!agent.occupies(Pos::new(0, 0)));
        assert!(agent.occupies(Pos::new(3, 0)));
        assert_eq!(agent.len(), 3);
    }

    #[test]
    fn empty_agent_has_no_head() {
        let mut agent = Agent::empty(Dir::Left);
        assert!(agent.is_empty());
        assert_eq!(agent.head(), None);
        assert_eq!(agent.pop_tail(), None);
    }
}
