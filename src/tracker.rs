use crate::buttons::{DpadDirection, DpadState};
use log::trace;

/// Press history of one pair of opposing directions.
///
/// `first` is the held direction that was pressed earliest and is never
/// overwritten while it stays held. `last` is overwritten by every new press.
/// Both are `None` when nothing is held, or when both sides went down in the
/// same frame and their order is unknown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisTracker {
    negative: DpadDirection,
    positive: DpadDirection,
    held: (bool, bool),
    first: DpadDirection,
    last: DpadDirection,
}

impl AxisTracker {
    pub const fn vertical() -> Self {
        Self::new(DpadDirection::Up, DpadDirection::Down)
    }

    pub const fn horizontal() -> Self {
        Self::new(DpadDirection::Left, DpadDirection::Right)
    }

    const fn new(negative: DpadDirection, positive: DpadDirection) -> Self {
        AxisTracker {
            negative,
            positive,
            held: (false, false),
            first: DpadDirection::None,
            last: DpadDirection::None,
        }
    }

    /// Feeds this frame's state of the pair and returns the last pressed
    /// direction that is still held.
    pub fn update(&mut self, negative: bool, positive: bool) -> DpadDirection {
        let (was_negative, was_positive) = self.held;
        let pressed_negative = negative && !was_negative;
        let pressed_positive = positive && !was_positive;

        match (negative, positive) {
            (false, false) => {
                self.first = DpadDirection::None;
                self.last = DpadDirection::None;
            }
            (true, false) => {
                self.first = self.negative;
                self.last = self.negative;
            }
            (false, true) => {
                self.first = self.positive;
                self.last = self.positive;
            }
            (true, true) => match (pressed_negative, pressed_positive) {
                (true, true) => {
                    self.first = DpadDirection::None;
                    self.last = DpadDirection::None;
                }
                (true, false) => self.last = self.negative,
                (false, true) => self.last = self.positive,
                (false, false) => {}
            },
        }

        if self.held != (negative, positive) {
            trace!(
                "{:?}/{:?}: held {:?} first {:?} last {:?}",
                self.negative,
                self.positive,
                (negative, positive),
                self.first,
                self.last
            );
        }
        self.held = (negative, positive);
        self.last
    }

    pub fn first(&self) -> DpadDirection {
        self.first
    }

    pub fn last(&self) -> DpadDirection {
        self.last
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.negative, self.positive);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectionalStateTracker {
    y: AxisTracker,
    x: AxisTracker,
}

impl DirectionalStateTracker {
    pub const fn new() -> Self {
        DirectionalStateTracker {
            y: AxisTracker::vertical(),
            x: AxisTracker::horizontal(),
        }
    }

    pub fn update(&mut self, raw: DpadState) {
        self.y.update(raw.up, raw.down);
        self.x.update(raw.left, raw.right);
    }

    pub fn y(&self) -> &AxisTracker {
        &self.y
    }

    pub fn x(&self) -> &AxisTracker {
        &self.x
    }

    pub fn reset(&mut self) {
        self.y.reset();
        self.x.reset();
    }
}

impl Default for DirectionalStateTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use permutohedron::Heap;
    use test_case::test_case;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Event {
        Press(DpadDirection),
        Release(DpadDirection),
    }

    #[test]
    fn single_press_is_first_and_last() {
        let mut t = AxisTracker::horizontal();
        assert_eq!(t.update(true, false), DpadDirection::Left);
        assert_eq!(t.first(), DpadDirection::Left);
        assert_eq!(t.update(false, false), DpadDirection::None);
        assert_eq!(t.first(), DpadDirection::None);
    }

    #[test]
    fn simultaneous_press_is_unknown() {
        let mut t = AxisTracker::vertical();
        assert_eq!(t.update(true, true), DpadDirection::None);
        assert_eq!(t.first(), DpadDirection::None);
        // Holding on does not invent an order.
        assert_eq!(t.update(true, true), DpadDirection::None);
        // Releasing one side leaves the other as the only press.
        assert_eq!(t.update(false, true), DpadDirection::Down);
        assert_eq!(t.first(), DpadDirection::Down);
    }

    #[test]
    fn repress_while_opposite_held() {
        let mut t = AxisTracker::horizontal();
        let _ = t.update(true, false);
        assert_eq!(t.update(true, true), DpadDirection::Right);
        assert_eq!(t.update(false, true), DpadDirection::Right);
        // Left comes back: it is the newest press, Right is now the oldest.
        assert_eq!(t.update(true, true), DpadDirection::Left);
        assert_eq!(t.first(), DpadDirection::Right);
    }

    #[test]
    fn reset_forgets_history() {
        let mut t = DirectionalStateTracker::new();
        t.update(DpadState {
            up: true,
            left: true,
            ..Default::default()
        });
        t.reset();
        assert_eq!(t, DirectionalStateTracker::new());
    }

    // Every valid press/release order of both sides, one event per frame,
    // checked against a list of held directions in press order.
    #[test_case(AxisTracker::horizontal(), DpadDirection::Left, DpadDirection::Right; "horizontal")]
    #[test_case(AxisTracker::vertical(), DpadDirection::Up, DpadDirection::Down; "vertical")]
    fn tracks_press_order_for_every_event_order(
        fresh: AxisTracker,
        l: DpadDirection,
        r: DpadDirection,
    ) {
        let mut events = [
            Event::Press(l),
            Event::Press(r),
            Event::Release(l),
            Event::Release(r),
        ];
        let mut checked = 0;
        for order in Heap::new(&mut events) {
            let valid = [l, r].iter().all(|d| {
                let press = order.iter().position(|e| *e == Event::Press(*d));
                let release = order.iter().position(|e| *e == Event::Release(*d));
                press < release
            });
            if !valid {
                continue;
            }
            checked += 1;

            let mut tracker = fresh;
            let mut held: Vec<DpadDirection> = Vec::new();
            for event in order.iter() {
                match *event {
                    Event::Press(d) => held.push(d),
                    Event::Release(d) => held.retain(|h| *h != d),
                }
                let last = tracker.update(held.contains(&l), held.contains(&r));
                let expected_first = held.first().copied().unwrap_or(DpadDirection::None);
                let expected_last = held.last().copied().unwrap_or(DpadDirection::None);
                assert_eq!(last, expected_last, "{:?}", order);
                assert_eq!(tracker.first(), expected_first, "{:?}", order);
            }
        }
        assert_eq!(checked, 6);
    }
}
