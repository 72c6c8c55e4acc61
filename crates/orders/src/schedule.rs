//! Weekly grab-time windows and the order-taking switch.
//!
//! Each weekday carries a comma-joined list of `HH:MM-HH:MM` slots during
//! which the designer accepts dispatched work.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use dispatch_core::error::require_non_blank;
use dispatch_core::time::deserialize_opt;
use dispatch_core::{DomainError, DomainResult, Entity, RecordId, ServerTime, UserId};

const SLOT_FORMAT: &str = "%H:%M";

/// One `HH:MM-HH:MM` window, start strictly before end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeSlot {
    pub fn new(start: NaiveTime, end: NaiveTime) -> DomainResult<Self> {
        if start >= end {
            return Err(DomainError::validation(
                "time",
                format!(
                    "slot start {} is not before end {}",
                    start.format(SLOT_FORMAT),
                    end.format(SLOT_FORMAT)
                ),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn parse(raw: &str) -> DomainResult<Self> {
        let (start, end) = raw
            .trim()
            .split_once('-')
            .ok_or_else(|| DomainError::validation("time", format!("{raw:?} is not HH:MM-HH:MM")))?;
        let parse = |part: &str| {
            NaiveTime::parse_from_str(part.trim(), SLOT_FORMAT)
                .map_err(|_| DomainError::validation("time", format!("{raw:?} is not HH:MM-HH:MM")))
        };
        Self::new(parse(start)?, parse(end)?)
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, at: NaiveTime) -> bool {
        self.start <= at && at < self.end
    }
}

impl core::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format(SLOT_FORMAT),
            self.end.format(SLOT_FORMAT)
        )
    }
}

/// Parse a comma-joined slot list. Blank input means no slots.
pub fn parse_slots(joined: &str) -> DomainResult<Vec<TimeSlot>> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(TimeSlot::parse)
        .collect()
}

/// Raw row of `pUserInfo/userQueryTimes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrabTimeEntry {
    pub id: RecordId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub week: String,
    #[serde(default)]
    pub time: String,
    #[serde(default, deserialize_with = "deserialize_opt")]
    pub create_time: Option<ServerTime>,
}

impl GrabTimeEntry {
    pub fn slots(&self) -> DomainResult<Vec<TimeSlot>> {
        parse_slots(&self.time)
    }

    /// Editable copy keeping the row id.
    pub fn to_window(&self) -> DomainResult<GrabWindow> {
        Ok(GrabWindow {
            id: Some(self.id),
            week: self.week.clone(),
            slots: self.slots()?,
        })
    }
}

impl Entity for GrabTimeEntry {
    type Id = RecordId;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// A weekday with its slots. New days have no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrabWindow {
    pub id: Option<RecordId>,
    pub week: String,
    pub slots: Vec<TimeSlot>,
}

impl GrabWindow {
    pub fn new(week: impl Into<String>, slots: Vec<TimeSlot>) -> Self {
        Self {
            id: None,
            week: week.into(),
            slots,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_non_blank("week", &self.week)?;
        let mut sorted = self.slots.clone();
        sorted.sort();
        if let Some(pair) = sorted.windows(2).find(|w| w[0].overlaps(&w[1])) {
            return Err(DomainError::validation(
                "time",
                format!("{} overlaps {} on {}", pair[0], pair[1], self.week),
            ));
        }
        Ok(())
    }

    pub fn is_open_at(&self, at: NaiveTime) -> bool {
        self.slots.iter().any(|slot| slot.contains(at))
    }

    fn joined(&self) -> String {
        self.slots
            .iter()
            .map(TimeSlot::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[derive(Serialize)]
struct WireWindow<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<RecordId>,
    week: &'a str,
    time: String,
}

/// Body of `pUserInfo/setUserTimes`: the complete replacement schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrabTimeUpdate {
    pub times: Vec<GrabWindow>,
}

impl GrabTimeUpdate {
    pub fn new(times: Vec<GrabWindow>) -> Self {
        Self { times }
    }

    pub fn validate(&self) -> DomainResult<()> {
        for (i, window) in self.times.iter().enumerate() {
            window.validate()?;
            if self.times[..i].iter().any(|w| w.week == window.week) {
                return Err(DomainError::validation(
                    "week",
                    format!("{} is listed twice", window.week),
                ));
            }
        }
        Ok(())
    }
}

impl Serialize for GrabTimeUpdate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let times: Vec<WireWindow<'_>> = self
            .times
            .iter()
            .map(|w| WireWindow {
                id: w.id,
                week: &w.week,
                time: w.joined(),
            })
            .collect();
        let mut s = serializer.serialize_struct("GrabTimeUpdate", 1)?;
        s.serialize_field("times", &times)?;
        s.end()
    }
}

/// Whether the designer currently takes dispatched orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum TakingState {
    Open = 0,
    Closed = 1,
}

impl TryFrom<i64> for TakingState {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Open),
            1 => Ok(Self::Closed),
            other => Err(DomainError::unknown_code("taking state", other)),
        }
    }
}

impl From<TakingState> for i64 {
    fn from(state: TakingState) -> Self {
        state as i64
    }
}

/// Body of `pUserInfo/updateStatexx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakingStateUpdate {
    pub state_xx: TakingState,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn parses_slot_lists() {
        let slots = parse_slots("09:00-12:00, 13:30-18:00,").unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[1].start(), t(13, 30));
        assert_eq!(slots[0].to_string(), "09:00-12:00");
        assert!(parse_slots("").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_and_reversed_slots() {
        assert!(TimeSlot::parse("9am-noon").is_err());
        assert!(TimeSlot::parse("09:00").is_err());
        assert_eq!(TimeSlot::parse("18:00-09:00").unwrap_err().field(), Some("time"));
        assert!(TimeSlot::parse("10:00-10:00").is_err());
    }

    #[test]
    fn window_rejects_overlap() {
        let window = GrabWindow::new(
            "Monday",
            parse_slots("13:00-15:00,09:00-13:30").unwrap(),
        );
        assert!(window.validate().is_err());

        let window = GrabWindow::new("Monday", parse_slots("09:00-13:00,13:00-15:00").unwrap());
        window.validate().unwrap();
        assert!(window.is_open_at(t(13, 0)));
        assert!(!window.is_open_at(t(15, 0)));
    }

    #[test]
    fn entry_round_trips_into_update() {
        let entry: GrabTimeEntry = serde_json::from_value(serde_json::json!({
            "id": 5,
            "createTime": "2025-08-01 08:00:00",
            "updateTime": null,
            "isDelete": false,
            "userId": 501,
            "week": "Tuesday",
            "time": "10:00-12:00,14:00-16:00"
        }))
        .unwrap();
        let mut update = GrabTimeUpdate::new(vec![entry.to_window().unwrap()]);
        update
            .times
            .push(GrabWindow::new("Wednesday", parse_slots("08:00-09:00").unwrap()));
        update.validate().unwrap();

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"times": [
                {"id": 5, "week": "Tuesday", "time": "10:00-12:00,14:00-16:00"},
                {"week": "Wednesday", "time": "08:00-09:00"}
            ]})
        );
    }

    #[test]
    fn duplicate_weekday_is_rejected() {
        let update = GrabTimeUpdate::new(vec![
            GrabWindow::new("Friday", vec![]),
            GrabWindow::new("Friday", vec![]),
        ]);
        assert_eq!(update.validate().unwrap_err().field(), Some("week"));
    }

    #[test]
    fn taking_state_wire_shape() {
        let body = TakingStateUpdate { state_xx: TakingState::Closed };
        assert_eq!(serde_json::to_value(body).unwrap(), serde_json::json!({"state_xx": 1}));
        assert!(serde_json::from_str::<TakingState>("2").is_err());
    }
}
