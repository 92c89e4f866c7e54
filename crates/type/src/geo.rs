// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A point on the globe in milliseconds of arc.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeoPoint {
	pub latitude: i32,
	pub longitude: i32,
}

impl GeoPoint {
	/// 90 degrees in milliseconds of arc.
	pub const MAX_LATITUDE: i32 = 90 * 60 * 60 * 1000;
	/// 180 degrees in milliseconds of arc.
	pub const MAX_LONGITUDE: i32 = 180 * 60 * 60 * 1000;

	pub const fn new(latitude: i32, longitude: i32) -> Self {
		Self {
			latitude,
			longitude,
		}
	}

	pub fn is_valid(&self) -> bool {
		(-Self::MAX_LATITUDE..=Self::MAX_LATITUDE).contains(&self.latitude)
			&& (-Self::MAX_LONGITUDE..=Self::MAX_LONGITUDE).contains(&self.longitude)
	}

	pub fn to_le_bytes(&self) -> [u8; 8] {
		let mut out = [0u8; 8];
		out[..4].copy_from_slice(&self.latitude.to_le_bytes());
		out[4..].copy_from_slice(&self.longitude.to_le_bytes());
		out
	}

	pub fn from_le_bytes(bytes: [u8; 8]) -> Self {
		let mut lat = [0u8; 4];
		let mut lon = [0u8; 4];
		lat.copy_from_slice(&bytes[..4]);
		lon.copy_from_slice(&bytes[4..]);
		Self {
			latitude: i32::from_le_bytes(lat),
			longitude: i32::from_le_bytes(lon),
		}
	}
}

impl Display for GeoPoint {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}x{}", self.latitude, self.longitude)
	}
}

#[cfg(test)]
mod tests {
	use super::GeoPoint;

	#[test]
	fn test_bounds_inclusive() {
		assert!(GeoPoint::new(GeoPoint::MAX_LATITUDE, GeoPoint::MAX_LONGITUDE).is_valid());
		assert!(GeoPoint::new(-GeoPoint::MAX_LATITUDE, -GeoPoint::MAX_LONGITUDE).is_valid());
	}

	#[test]
	fn test_latitude_out_of_range() {
		assert!(!GeoPoint::new(GeoPoint::MAX_LATITUDE + 1, 0).is_valid());
		assert!(!GeoPoint::new(-GeoPoint::MAX_LATITUDE - 1, 0).is_valid());
	}

	#[test]
	fn test_longitude_out_of_range() {
		assert!(!GeoPoint::new(0, GeoPoint::MAX_LONGITUDE + 1).is_valid());
		assert!(!GeoPoint::new(0, -GeoPoint::MAX_LONGITUDE - 1).is_valid());
	}

	#[test]
	fn test_le_bytes() {
		let point = GeoPoint::new(-123_456, 654_321);
		assert_eq!(GeoPoint::from_le_bytes(point.to_le_bytes()), point);
	}
}
