//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch the configured list page
    LoadPokedex,
    /// Fetch detail for a normalized key
    LoadDetail { key: String },
    /// Download the sprite for the selected pokemon
    LoadSprite { id: u32, url: String },
}

impl Effect {
    /// Short name used for task keys and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Effect::LoadPokedex => "pokedex",
            Effect::LoadDetail { .. } => "detail",
            Effect::LoadSprite { .. } => "sprite",
        }
    }
}
