use crate::grid::Pos;

/// A pickup burst. Visual only; it never feeds back into the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollectionEvent {
    pub pos: Pos,
    pub frame: u32,
}

impl CollectionEvent {
    pub fn new(pos: Pos) -> Self {
        Self { pos, frame: 0 }
    }

    /// 0.0 when fresh, 1.0 at the end of its lifetime.
    pub fn progress(&self, lifetime: u32) -> f32 {
        if lifetime == 0 {
            return 1.0;
        }
        (self.frame as f32 / lifetime as f32).min(1.0)
    }
}

/// Ages every event by one frame and drops those past `lifetime`.
pub fn advance(events: &mut Vec<CollectionEvent>, lifetime: u32) {
    for e in events.iter_mut() {
        e.frame += 1;
    }
    events.retain(|e| e.frame <= lifetime);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_expire_once_past_lifetime() {
        let mut events = vec![CollectionEvent::new(Pos::new(1, 1))];
        for expected in 1..=20 {
            advance(&mut events, 20);
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].frame, expected);
        }
        advance(&mut events, 20);
        assert!(events.is_empty());
    }

    #[test]
    fn staggered_events_expire_independently() {
        let mut events = vec![CollectionEvent { pos: Pos::new(1, 1), frame: 19 }, CollectionEvent::new(Pos::new(2, 2))];
        advance(&mut events, 20);
        advance(&mut events, 20);
        assert_eq!(events, vec![CollectionEvent { pos: Pos::new(2, 2), frame: 2 }]);
    }

    #[test]
    fn progress_is_clamped() {
        let e = CollectionEvent { pos: Pos::new(0, 0), frame: 10 };
        assert_eq!(e.progress(20), 0.5);
        assert_eq!(CollectionEvent { pos: Pos::new(0, 0), frame: 30 }.progress(20), 1.0);
        assert_eq!(e.progress(0), 1.0);
    }
}
