use hashbrown::HashMap;

/// Street type reserved for unmapped highway values and non-road categories.
pub const UNKNOWN_STREET_TYPE: u8 = 10;

/// Lookup from the raw highway value to the street type ordinal
/// (0 = motorway class, lower is higher in the hierarchy).
#[derive(Debug, Clone)]
pub struct HighwayDefaults {
    table: HashMap<&'static str, u8>,
}

impl HighwayDefaults {
    pub fn new() -> Self {
        let mut table = HashMap::new();

        table.insert("motorway", 0);
        table.insert("motorway_link", 0);

        table.insert("trunk", 1);
        table.insert("trunk_link", 1);
        table.insert("primary", 1);
        table.insert("primary_link", 1);

        table.insert("secondary", 2);
        table.insert("secondary_link", 2);
        table.insert("tertiary", 2);

        table.insert("residential", 3);
        table.insert("unclassified", 3);

        table.insert("living_street", 4);

        // access roads, largely unnamed
        table.insert("service", 5);

        table.insert("pedestrian", UNKNOWN_STREET_TYPE);
        table.insert("cycleway", UNKNOWN_STREET_TYPE);
        table.insert("footway", UNKNOWN_STREET_TYPE);
        table.insert("bridleway", UNKNOWN_STREET_TYPE);
        table.insert("path", UNKNOWN_STREET_TYPE);
        table.insert("track", UNKNOWN_STREET_TYPE);
        table.insert("steps", UNKNOWN_STREET_TYPE);
        table.insert("platform", UNKNOWN_STREET_TYPE);
        table.insert("bus_guideway", UNKNOWN_STREET_TYPE);
        table.insert("ford", UNKNOWN_STREET_TYPE);
        table.insert("sidewalk", UNKNOWN_STREET_TYPE);
        table.insert("escalator", UNKNOWN_STREET_TYPE);
        table.insert("elevator", UNKNOWN_STREET_TYPE);
        table.insert("crossing", UNKNOWN_STREET_TYPE);
        table.insert("bus_stop", UNKNOWN_STREET_TYPE);
        table.insert("traffic_signals", UNKNOWN_STREET_TYPE);
        table.insert("unsurfaced", UNKNOWN_STREET_TYPE);

        // "road" marks work in progress
        table.insert("road", UNKNOWN_STREET_TYPE);

        Self { table }
    }

    /// Street type for the given highway value, `None` when unmapped.
    pub fn street_type(&self, highway: &str) -> Option<u8> {
        self.table.get(highway).copied()
    }
}

impl Default for HighwayDefaults {
    fn default() -> Self {
        Self::new()
    }
}
