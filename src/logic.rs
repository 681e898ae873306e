/// What is known about one side of a cell: whether its pipe passes through that side.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Connection {
    /// Pipe passes through this side.
    Connected,
    /// Pipe never passes through this side.
    Blocked,
    /// Not settled yet.
    #[default]
    Unknown,
}

impl Connection {
    pub(crate) fn from_outlet(open: bool) -> Self {
        match open {
            true => Self::Connected,
            false => Self::Blocked,
        }
    }

    /// Whether this is anything but [`Unknown`](Self::Unknown).
    #[inline]
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }

    /// Merge two views of the same edge, one from each side.
    ///
    /// Any `Connected` report wins; otherwise any `Blocked` report wins.
    pub(crate) fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Self::Connected, _) | (_, Self::Connected) => Self::Connected,
            (Self::Blocked, _) | (_, Self::Blocked) => Self::Blocked,
            _ => Self::Unknown,
        }
    }
}
