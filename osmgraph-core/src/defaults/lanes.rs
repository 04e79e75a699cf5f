use log::debug;

/// Default lane counts for ways without a usable lanes tag.
///
/// In table mode the high-hierarchy categories get their structural default
/// of two lanes per direction; otherwise every way falls back to a single
/// lane, which matches the bulk of the network.
#[derive(Debug, Clone)]
pub struct LaneDefaults {
    use_table: bool,
}

impl LaneDefaults {
    /// Defaults without the per-category table: always one lane.
    pub fn new() -> Self {
        Self { use_table: false }
    }

    /// Defaults with per-category values enabled.
    pub fn with_table() -> Self {
        Self { use_table: true }
    }

    pub fn lanes(&self, category: &str, way_id: &str) -> u32 {
        let table_default = match category {
            "motorway" | "trunk" | "primary" => 2,
            _ => 1,
        };

        if self.use_table {
            table_default
        } else {
            if table_default != 1 {
                debug!(
                    "Lane default for way {way_id} (highway = {category}) kept at 1, \
                     table value would be {table_default}"
                );
            }
            1
        }
    }
}

impl Default for LaneDefaults {
    fn default() -> Self {
        Self::new()
    }
}
