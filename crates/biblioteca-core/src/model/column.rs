/// The fixed column layout of a stored catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Genre,
    Surname,
    Name,
    Title,
    Series,
    Publisher,
    Year,
    Volume,
    Note,
    Created,
    Updated,
}

impl Column {
    /// Every column, in stored order.
    pub const ALL: [Self; 11] = [
        Self::Genre,
        Self::Surname,
        Self::Name,
        Self::Title,
        Self::Series,
        Self::Publisher,
        Self::Year,
        Self::Volume,
        Self::Note,
        Self::Created,
        Self::Updated,
    ];

    /// Zero-based position in a stored row.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Header cell text.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Genre => "Genre",
            Self::Surname => "Surname",
            Self::Name => "Name",
            Self::Title => "Title",
            Self::Series => "Series",
            Self::Publisher => "Publisher",
            Self::Year => "Year",
            Self::Volume => "Volume",
            Self::Note => "Note",
            Self::Created => "Created",
            Self::Updated => "Updated",
        }
    }

    /// The full header row.
    pub fn headers() -> [&'static str; 11] {
        Self::ALL.map(Self::header)
    }
}
