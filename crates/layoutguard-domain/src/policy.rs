/// How entries of a data mapping are paired with entries of a layout mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Pairing {
    /// Sort both sides by key and zip them. Layouts written with the same key names
    /// as the data pair up exactly; differing names pair by position.
    #[default]
    Positional,
    /// Pair each data key with the layout key of the same (unmarked) name.
    ByName,
}

impl Pairing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pairing::Positional => "positional",
            Pairing::ByName => "by-name",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchPolicy {
    pub pairing: Pairing,
}

impl MatchPolicy {
    pub fn new(pairing: Pairing) -> Self {
        Self { pairing }
    }
}
