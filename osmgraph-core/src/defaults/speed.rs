use log::warn;

/// Fixed speed for motorways without an explicit limit context.
pub const MOTORWAY: i32 = 130;
pub const MOTORWAY_LINK: i32 = 80;

pub const TRUNK_OUTSIDE: i32 = 130;
pub const TRUNK_INSIDE: i32 = 50;
pub const PRIMARY_OUTSIDE: i32 = 100;
pub const PRIMARY_INSIDE: i32 = 50;
pub const SECONDARY_OUTSIDE: i32 = 100;
pub const SECONDARY_INSIDE: i32 = 50;
pub const TERTIARY_OUTSIDE: i32 = 100;
pub const TERTIARY_INSIDE: i32 = 50;
pub const UNCLASSIFIED_OUTSIDE: i32 = 100;
pub const UNCLASSIFIED_INSIDE: i32 = 50;
pub const RESIDENTIAL_OUTSIDE: i32 = 100;
pub const RESIDENTIAL_INSIDE: i32 = 50;
pub const ROAD_INSIDE: i32 = 50;
pub const ROAD_OUTSIDE: i32 = 50;

/// Speed for ways tagged with the symbolic "walk" value and for living
/// streets.
pub const WALK_SPEED: i32 = 7;
/// Speed for the symbolic "moderat" value, service roads and fords.
pub const MODERAT_SPEED: i32 = 25;
pub const RURAL_SPEED: i32 = 100;
pub const URBAN_SPEED: i32 = 50;
/// Marker speed for ways explicitly tagged as having no limit.
pub const NO_MAXSPEED: i32 = 1;

/// Flat default for mapped categories without a dedicated table row.
pub const DEFAULT_SPEED: i32 = 50;
/// Flat default for ways that carry no highway tag at all.
pub const NO_CATEGORY_SPEED: i32 = 40;

pub const TRUNK: i32 = 80;
pub const PRIMARY: i32 = 70;
pub const SECONDARY: i32 = 70;
pub const TERTIARY: i32 = 50;
pub const UNCLASSIFIED: i32 = 50;
pub const RESIDENTIAL: i32 = 40;
pub const ROAD: i32 = 30;

/// Whether a way runs inside a built-up area, as far as it can be told.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrbanContext {
    Urban,
    Outside,
    Unknown,
}

/// Default-speed table keyed by street category and urban context.
#[derive(Debug, Clone, Default)]
pub struct SpeedDefaults;

impl SpeedDefaults {
    pub fn new() -> Self {
        Self
    }

    /// Default speed in km/h for a way of the given category. `None` stands
    /// for a way without any highway tag.
    pub fn default_speed(&self, category: Option<&str>, context: UrbanContext) -> i32 {
        let Some(category) = category else {
            return NO_CATEGORY_SPEED;
        };

        match category {
            "motorway" | "DE:motorway" => MOTORWAY,
            "motorway_link" => MOTORWAY_LINK,
            "trunk" | "trunk_link" => pick(context, TRUNK_INSIDE, TRUNK_OUTSIDE, TRUNK),
            "primary" | "primary_link" => {
                pick(context, PRIMARY_INSIDE, PRIMARY_OUTSIDE, PRIMARY)
            }
            "secondary" | "secondary_link" => {
                pick(context, SECONDARY_INSIDE, SECONDARY_OUTSIDE, SECONDARY)
            }
            "tertiary" => pick(context, TERTIARY_INSIDE, TERTIARY_OUTSIDE, TERTIARY),
            "unclassified" => {
                pick(context, UNCLASSIFIED_INSIDE, UNCLASSIFIED_OUTSIDE, UNCLASSIFIED)
            }
            "residential" => {
                pick(context, RESIDENTIAL_INSIDE, RESIDENTIAL_OUTSIDE, RESIDENTIAL)
            }
            "road" => pick(context, ROAD_INSIDE, ROAD_OUTSIDE, ROAD),
            "living_street" => WALK_SPEED,
            "service" | "ford" => MODERAT_SPEED,
            _ => DEFAULT_SPEED,
        }
    }

    /// Warns when a resolved speed is implausible for its category. Returns
    /// true when a conflict was found.
    pub fn check_speed_conflicts(&self, way_id: &str, category: &str, speed: i32) -> bool {
        let conflict = match category {
            "living_street" => speed > 10,
            "residential" => speed > 50,
            "motorway" => speed < 80,
            _ => false,
        };

        if conflict {
            warn!("Conflict in maxspeed ({category})! Way-id: {way_id}, speed: {speed}");
        }

        conflict
    }
}

fn pick(context: UrbanContext, inside: i32, outside: i32, unknown: i32) -> i32 {
    match context {
        UrbanContext::Urban => inside,
        UrbanContext::Outside => outside,
        UrbanContext::Unknown => unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motorway_is_flat() {
        let defaults = SpeedDefaults::new();
        for context in [UrbanContext::Urban, UrbanContext::Outside, UrbanContext::Unknown] {
            assert_eq!(defaults.default_speed(Some("motorway"), context), 130);
        }
    }

    #[test]
    fn residential_depends_on_context() {
        let defaults = SpeedDefaults::new();
        assert_eq!(
            defaults.default_speed(Some("residential"), UrbanContext::Urban),
            50
        );
        assert_eq!(
            defaults.default_speed(Some("residential"), UrbanContext::Outside),
            100
        );
        assert_eq!(
            defaults.default_speed(Some("residential"), UrbanContext::Unknown),
            40
        );
    }

    #[test]
    fn scalar_categories() {
        let defaults = SpeedDefaults::new();
        assert_eq!(
            defaults.default_speed(Some("living_street"), UrbanContext::Unknown),
            WALK_SPEED
        );
        assert_eq!(
            defaults.default_speed(Some("service"), UrbanContext::Urban),
            MODERAT_SPEED
        );
        assert_eq!(
            defaults.default_speed(Some("ford"), UrbanContext::Outside),
            MODERAT_SPEED
        );
    }

    #[test]
    fn fallback_rows() {
        let defaults = SpeedDefaults::new();
        assert_eq!(
            defaults.default_speed(Some("corridor"), UrbanContext::Unknown),
            DEFAULT_SPEED
        );
        assert_eq!(
            defaults.default_speed(None, UrbanContext::Unknown),
            NO_CATEGORY_SPEED
        );
    }

    #[test]
    fn conflict_detection() {
        let defaults = SpeedDefaults::new();
        assert!(defaults.check_speed_conflicts("1", "living_street", 30));
        assert!(defaults.check_speed_conflicts("1", "motorway", 50));
        assert!(!defaults.check_speed_conflicts("1", "residential", 50));
    }
}
