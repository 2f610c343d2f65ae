use chrono::Weekday;

/// Weekdays in wire order, Sunday first.
pub const WEEKDAYS_FROM_SUNDAY: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Wire index of a weekday (Sunday=0..Saturday=6).
#[must_use]
pub fn weekday_index(day: Weekday) -> u32 {
    day.num_days_from_sunday()
}

/// Weekday for a wire index, `None` outside 0..=6.
#[must_use]
pub fn weekday_from_index(index: i64) -> Option<Weekday> {
    usize::try_from(index)
        .ok()
        .and_then(|idx| WEEKDAYS_FROM_SUNDAY.get(idx).copied())
}

/// The weekdays an agent is normally available on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: Self = Self(0);

    /// Monday through Friday.
    #[must_use]
    pub fn workweek() -> Self {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ]
        .into_iter()
        .collect()
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_sunday()
    }

    #[must_use]
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    pub fn remove(&mut self, day: Weekday) {
        self.0 &= !Self::bit(day);
    }

    /// Flips membership of `day`; returns whether it is now a member.
    pub fn toggle(&mut self, day: Weekday) -> bool {
        self.0 ^= Self::bit(day);
        self.contains(day)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Members in wire order, Sunday first.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        WEEKDAYS_FROM_SUNDAY
            .into_iter()
            .filter(move |day| self.contains(*day))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}
