use chrono::NaiveDateTime;

/// Upper bound on hourly entries carried into the display model.
pub const NEXT_HOURS_LIMIT: usize = 8;

/// Best geocoder match for a free-text place name.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ResolvedLocation {
    /// Builds the display name from the geocoder fields, joining the present
    /// ones with ", " and skipping absent or empty ones.
    pub fn from_candidate(
        name: &str,
        admin1: Option<&str>,
        country: Option<&str>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        let mut display_name = name.to_string();
        for part in [admin1, country].into_iter().flatten() {
            if !part.is_empty() {
                display_name.push_str(", ");
                display_name.push_str(part);
            }
        }

        Self {
            display_name,
            latitude,
            longitude,
        }
    }
}

/// One point of the short-term hourly temperature series.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyEntry {
    pub time: NaiveDateTime,
    pub temp: f64,
}

/// Current conditions plus the upcoming hourly series for one set of
/// coordinates. `hourly` is already truncated to [`NEXT_HOURS_LIMIT`];
/// a shorter service response simply stays shorter.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSnapshot {
    pub current_time: NaiveDateTime,
    pub current_temp: f64,
    pub apparent_temp: f64,
    pub hourly: Vec<HourlyEntry>,
}

/// The render-ready result of one successful query.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayModel {
    pub location: String,
    pub temperature: f64,
    pub apparent: f64,
    pub updated_at: NaiveDateTime,
    pub next_hours: Vec<HourlyEntry>,
}

impl DisplayModel {
    pub fn assemble(location: ResolvedLocation, snapshot: ForecastSnapshot) -> Self {
        Self {
            location: location.display_name,
            temperature: snapshot.current_temp,
            apparent: snapshot.apparent_temp,
            updated_at: snapshot.current_time,
            next_hours: snapshot.hourly,
        }
    }
}

/// Lifecycle of one query attempt. Exactly one variant is active at a time;
/// moving to `Loading` discards any previous result or error.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryState {
    #[default]
    Idle,
    Loading,
    Success(DisplayModel),
    Failure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_joins_all_present_fields() {
        let loc = ResolvedLocation::from_candidate(
            "Taipei",
            Some("Taipei City"),
            Some("Taiwan"),
            25.03,
            121.56,
        );
        assert_eq!(loc.display_name, "Taipei, Taipei City, Taiwan");
    }

    #[test]
    fn display_name_skips_absent_fields() {
        let loc = ResolvedLocation::from_candidate("Taipei", None, Some("Taiwan"), 25.03, 121.56);
        assert_eq!(loc.display_name, "Taipei, Taiwan");

        let bare = ResolvedLocation::from_candidate("Taipei", None, None, 25.03, 121.56);
        assert_eq!(bare.display_name, "Taipei");
    }

    #[test]
    fn display_name_skips_empty_fields() {
        let loc = ResolvedLocation::from_candidate("Taipei", Some(""), Some("Taiwan"), 25.03, 121.56);
        assert_eq!(loc.display_name, "Taipei, Taiwan");
    }

    #[test]
    fn assemble_moves_snapshot_into_model() {
        let time = NaiveDateTime::parse_from_str("2024-01-01T00:00", "%Y-%m-%dT%H:%M")
            .expect("valid timestamp");
        let snapshot = ForecastSnapshot {
            current_time: time,
            current_temp: 20.4,
            apparent_temp: 19.1,
            hourly: vec![HourlyEntry { time, temp: 20.0 }],
        };
        let loc = ResolvedLocation::from_candidate("Taipei", None, Some("Taiwan"), 25.03, 121.56);

        let model = DisplayModel::assemble(loc, snapshot);

        assert_eq!(model.location, "Taipei, Taiwan");
        assert_eq!(model.temperature, 20.4);
        assert_eq!(model.apparent, 19.1);
        assert_eq!(model.updated_at, time);
        assert_eq!(model.next_hours.len(), 1);
    }

    #[test]
    fn query_state_defaults_to_idle() {
        assert_eq!(QueryState::default(), QueryState::Idle);
    }
}
