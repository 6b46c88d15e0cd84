/// Emission options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Spaces per indentation level. `None` emits the compact
    /// single-line form.
    pub indent: Option<usize>,
    /// Sort object and record fields (and enum members) at emit time.
    /// The value itself is left untouched.
    pub sort_keys: bool,
}

impl Config {
    pub fn compact() -> Self {
        Self::default()
    }

    pub fn pretty(indent: usize) -> Self {
        Self {
            indent: Some(indent),
            sort_keys: false,
        }
    }

    pub fn sorted(mut self) -> Self {
        self.sort_keys = true;
        self
    }
}
