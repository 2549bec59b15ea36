///! Satellite record data types
///!
///! Records are keyed by the catalog number printed in both input formats.

use chrono::{DateTime, Utc};

/// Satellite catalog number (column text, surrounding whitespace removed)
pub type SatelliteId = String;

/// Most complete known attribute set for one satellite
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SatelliteRecord {
    pub id: SatelliteId,
    /// Free-text name line preceding the element set (may be empty)
    pub name: String,
    /// Tag of the input file the orbital data came from
    pub catalog_set: String,
    pub classification: Option<char>,
    /// Moment the element set describes
    pub epoch: Option<DateTime<Utc>>,
    pub international_designator: String,
    /// Degrees
    pub inclination: f64,
    /// Right ascension of the ascending node, degrees
    pub raan: f64,
    pub eccentricity: f64,
    /// Degrees
    pub argument_of_perigee: f64,
    /// Degrees
    pub mean_anomaly: f64,
    /// Revolutions per day
    pub mean_motion: f64,
    pub revolution_number: u32,
    /// Owner code, only ever set from the satellite catalog
    pub owner: Option<String>,
}

impl SatelliteRecord {
    /// Create an empty record for the given catalog number
    pub fn new(id: impl Into<SatelliteId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Overwrite every field present in `update`
    pub fn apply(&mut self, update: RecordUpdate) {
        let RecordUpdate {
            name,
            catalog_set,
            classification,
            epoch,
            international_designator,
            inclination,
            raan,
            eccentricity,
            argument_of_perigee,
            mean_anomaly,
            mean_motion,
            revolution_number,
            owner,
        } = update;

        if let Some(v) = name { self.name = v; }
        if let Some(v) = catalog_set { self.catalog_set = v; }
        if let Some(v) = classification { self.classification = Some(v); }
        if let Some(v) = epoch { self.epoch = Some(v); }
        if let Some(v) = international_designator { self.international_designator = v; }
        if let Some(v) = inclination { self.inclination = v; }
        if let Some(v) = raan { self.raan = v; }
        if let Some(v) = eccentricity { self.eccentricity = v; }
        if let Some(v) = argument_of_perigee { self.argument_of_perigee = v; }
        if let Some(v) = mean_anomaly { self.mean_anomaly = v; }
        if let Some(v) = mean_motion { self.mean_motion = v; }
        if let Some(v) = revolution_number { self.revolution_number = v; }
        if let Some(v) = owner { self.owner = Some(v); }
    }
}

/// Partial update of a [`SatelliteRecord`]
///
/// Every field is optional; a present field overwrites the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordUpdate {
    pub name: Option<String>,
    pub catalog_set: Option<String>,
    pub classification: Option<char>,
    pub epoch: Option<DateTime<Utc>>,
    pub international_designator: Option<String>,
    pub inclination: Option<f64>,
    pub raan: Option<f64>,
    pub eccentricity: Option<f64>,
    pub argument_of_perigee: Option<f64>,
    pub mean_anomaly: Option<f64>,
    pub mean_motion: Option<f64>,
    pub revolution_number: Option<u32>,
    pub owner: Option<String>,
}

impl RecordUpdate {
    /// Update carrying only an owner code (satellite catalog rows)
    pub fn owner(owner: impl Into<String>) -> Self {
        Self {
            owner: Some(owner.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_record_is_empty() {
        let rec = SatelliteRecord::new("25544");
        assert_eq!(rec.id, "25544");
        assert!(rec.name.is_empty());
        assert!(rec.epoch.is_none());
        assert!(rec.owner.is_none());
    }

    #[test]
    fn test_apply_overwrites_present_fields_only() {
        let mut rec = SatelliteRecord::new("25544");
        rec.apply(RecordUpdate {
            name: Some("ISS (ZARYA)".to_string()),
            mean_motion: Some(15.5),
            epoch: Some(Utc.with_ymd_and_hms(2008, 9, 20, 12, 0, 0).unwrap()),
            ..Default::default()
        });
        rec.apply(RecordUpdate::owner("ISS"));

        assert_eq!(rec.name, "ISS (ZARYA)");
        assert_eq!(rec.mean_motion, 15.5);
        assert_eq!(rec.owner.as_deref(), Some("ISS"));
        assert!(rec.epoch.is_some());
        assert_eq!(rec.inclination, 0.0);
    }
}
