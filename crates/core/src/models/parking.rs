use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// A wall-clock label within one day, stored as minutes since midnight.
///
/// `24:00` is a valid value so the last hourly slot of a day can end at
/// midnight without wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WallClock(u16);

impl WallClock {
    pub const END_OF_DAY: WallClock = WallClock(24 * 60);

    pub fn new(hour: u16, minute: u16) -> Option<Self> {
        if minute >= 60 {
            return None;
        }
        Self::from_minutes(hour.checked_mul(60)?.checked_add(minute)?)
    }

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes <= Self::END_OF_DAY.0).then_some(WallClock(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid wall-clock label '{0}', expected HH:MM between 00:00 and 24:00")]
pub struct ParseWallClockError(String);

impl FromStr for WallClock {
    type Err = ParseWallClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseWallClockError(s.to_string());
        let (hour, minute) = s.split_once(':').ok_or_else(err)?;
        if hour.len() != 2 || minute.len() != 2 {
            return Err(err());
        }
        let hour = hour.parse::<u16>().map_err(|_| err())?;
        let minute = minute.parse::<u16>().map_err(|_| err())?;
        WallClock::new(hour, minute).ok_or_else(err)
    }
}

impl Serialize for WallClock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WallClock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotCategory {
    Standard,
    Accessible,
    Electric,
}

impl SlotCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotCategory::Standard => "standard",
            SlotCategory::Accessible => "accessible",
            SlotCategory::Electric => "electric",
        }
    }
}

impl FromStr for SlotCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(SlotCategory::Standard),
            "accessible" => Ok(SlotCategory::Accessible),
            "electric" => Ok(SlotCategory::Electric),
            other => Err(format!("unknown slot category '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: String,
    pub coordinates: Coordinates,
    pub total_spots: i32,
}

/// An hour-long bookable interval owned by exactly one parking slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: Uuid,
    pub start_time: WallClock,
    pub end_time: WallClock,
    pub is_available: bool,
    pub price: i32,
}

impl TimeSlot {
    /// Checks `start < end` and a positive price.
    pub fn validate(&self) -> Result<(), String> {
        if self.start_time >= self.end_time {
            return Err(format!(
                "time slot {} starts at {} but ends at {}",
                self.id, self.start_time, self.end_time
            ));
        }
        if self.price <= 0 {
            return Err(format!("time slot {} has non-positive price {}", self.id, self.price));
        }
        Ok(())
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.start_time, self.end_time)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingSlot {
    pub id: Uuid,
    pub location_id: Uuid,
    pub number: i32,
    pub is_occupied: bool,
    pub category: SlotCategory,
    /// Hourly rate in whole rupees
    pub price: i32,
    pub location_name: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub available_time_slots: Vec<TimeSlot>,
}

impl ParkingSlot {
    pub fn time_slot(&self, time_slot_id: Uuid) -> Option<&TimeSlot> {
        self.available_time_slots.iter().find(|ts| ts.id == time_slot_id)
    }
}
