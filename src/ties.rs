// 🏅 Extremum Holders - Current best/worst value + ordered tie set
//
// Tie sets are plain index lists into the dataset's employee/area vectors.
// Each relation (global max, area min, ranking, ...) owns its own list, so an
// employee can sit in several tie sets at once.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Strictly greater replaces
    Max,

    /// Strictly lower replaces
    Min,
}

/// What an offer did to the holder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// New extremum, tie set reset to the single new member
    Replaced,

    /// Equal value, member appended at the tail
    Tied,

    /// Worse value, or tie rejected as a duplicate
    Ignored,
}

/// Extremal value + members sharing it, in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct Extremum<V> {
    pub value: V,
    pub members: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtremumHolder<V> {
    direction: Direction,
    current: Option<Extremum<V>>,
}

impl<V: PartialOrd + Copy> ExtremumHolder<V> {
    pub fn new(direction: Direction) -> Self {
        ExtremumHolder {
            direction,
            current: None,
        }
    }

    pub fn max() -> Self {
        Self::new(Direction::Max)
    }

    pub fn min() -> Self {
        Self::new(Direction::Min)
    }

    pub fn value(&self) -> Option<V> {
        self.current.as_ref().map(|e| e.value)
    }

    /// Members of the tie set, empty when unseeded
    pub fn members(&self) -> &[usize] {
        match &self.current {
            Some(current) => &current.members,
            None => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn offer(&mut self, value: V, member: usize) -> Offer {
        self.offer_unless(value, member, |_| false)
    }

    /// Offer a member; on a tie, skip it if `duplicate` matches any member
    pub fn offer_unless<F>(&mut self, value: V, member: usize, duplicate: F) -> Offer
    where
        F: Fn(usize) -> bool,
    {
        let current = match self.current.as_mut() {
            Some(current) => current,
            None => {
                self.current = Some(Extremum {
                    value,
                    members: vec![member],
                });
                return Offer::Replaced;
            }
        };

        let better = match self.direction {
            Direction::Max => value > current.value,
            Direction::Min => value < current.value,
        };

        if better {
            current.value = value;
            current.members.clear();
            current.members.push(member);
            Offer::Replaced
        } else if value == current.value {
            if current.members.iter().any(|&m| duplicate(m)) {
                return Offer::Ignored;
            }
            current.members.push(member);
            Offer::Tied
        } else {
            Offer::Ignored
        }
    }
}
