//! GPS sub-IFD accumulation.
//!
//! Reference tags (hemisphere, above/below sea level) and magnitude tags may
//! appear in any order. Everything is collected first and the signs are
//! applied once in [`GpsAccumulator::finish`]. A tag that appears twice
//! simply overwrites its earlier value.

use tracing::debug;

use crate::format::tiff::{GpsTag, IfdEntry};

use super::info::{GeoCoordinate, GeoLocation};

/// Altitude reference value meaning "below sea level"
const BELOW_SEA_LEVEL: u8 = 1;

#[derive(Debug, Default)]
pub(crate) struct GpsAccumulator {
    latitude_ref: Option<u8>,
    longitude_ref: Option<u8>,
    altitude_ref: Option<u8>,
    latitude: Option<[f64; 3]>,
    longitude: Option<[f64; 3]>,
    altitude: Option<f64>,
}

impl GpsAccumulator {
    /// Record one GPS directory entry. Unrelated tags are ignored.
    pub(crate) fn visit(&mut self, entry: &IfdEntry) {
        let Some(tag) = GpsTag::from_u16(entry.tag) else {
            return;
        };

        let accepted = match tag {
            // Reference letters are read from the value field whatever the
            // declared type, as most writers store them as 2-byte ASCII.
            GpsTag::LatitudeRef => {
                self.latitude_ref = Some(entry.first_value_byte());
                true
            }
            GpsTag::LongitudeRef => {
                self.longitude_ref = Some(entry.first_value_byte());
                true
            }
            GpsTag::AltitudeRef => {
                self.altitude_ref = Some(entry.first_value_byte());
                true
            }
            GpsTag::Latitude => store(&mut self.latitude, entry.as_rational_triple()),
            GpsTag::Longitude => store(&mut self.longitude, entry.as_rational_triple()),
            GpsTag::Altitude => store(&mut self.altitude, entry.as_rational()),
        };

        if !accepted {
            debug!(
                tag = entry.tag,
                field_type = entry.field_type_raw,
                count = entry.count,
                "skipping GPS entry with unexpected format"
            );
        }
    }

    /// Combine the collected tags into a location, applying each sign once.
    pub(crate) fn finish(self) -> GeoLocation {
        let lat_components = coordinate(self.latitude, self.latitude_ref);
        let lon_components = coordinate(self.longitude, self.longitude_ref);
        let altitude_below_sea_level = self.altitude_ref == Some(BELOW_SEA_LEVEL);

        let magnitude = self.altitude.unwrap_or_default();
        let altitude = if altitude_below_sea_level {
            -magnitude
        } else {
            magnitude
        };

        GeoLocation {
            latitude: lat_components.to_decimal(),
            longitude: lon_components.to_decimal(),
            altitude,
            altitude_below_sea_level,
            lat_components,
            lon_components,
            valid: self.latitude.is_some(),
        }
    }
}

fn store<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match value {
        Some(v) => {
            *slot = Some(v);
            true
        }
        None => false,
    }
}

fn coordinate(dms: Option<[f64; 3]>, reference: Option<u8>) -> GeoCoordinate {
    let [degrees, minutes, seconds] = dms.unwrap_or_default();
    GeoCoordinate {
        degrees,
        minutes,
        seconds,
        direction: reference.map(char::from).unwrap_or_default(),
    }
}

// =============================================================================
// Tests
// =============================================================================
