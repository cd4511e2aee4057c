use super::encoding::daytime_to_string;
use super::xml::XmlElement;
use crate::calendar::WorkingHours;
use std::collections::HashMap;

pub type CalendarUid = usize;

/// Name to UID map of the calendars written during one export.
#[derive(Debug, Default, Clone)]
pub struct CalendarRegistry {
    uids: HashMap<String, CalendarUid>,
    next: CalendarUid,
}

impl CalendarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next UID and record it under `name`. A repeated name
    /// gets a fresh UID and the lookup then points at the newest one.
    pub fn register(&mut self, name: &str) -> CalendarUid {
        let uid = self.next;
        self.next += 1;
        self.uids.insert(name.to_string(), uid);
        uid
    }

    pub fn uid(&self, name: &str) -> Option<CalendarUid> {
        self.uids.get(name).copied()
    }

    /// Number of calendars handed out so far.
    pub fn len(&self) -> usize {
        self.next
    }

    pub fn is_empty(&self) -> bool {
        self.next == 0
    }
}

/// Append a base calendar built from `hours` to the `Calendars` block.
pub fn build_calendar(
    registry: &mut CalendarRegistry,
    calendars: &mut XmlElement,
    name: &str,
    hours: &WorkingHours,
) -> CalendarUid {
    let uid = registry.register(name);

    let mut calendar = XmlElement::new("Calendar");
    calendar.push_text("UID", uid.to_string());
    calendar.push_text("Name", name);
    calendar.push_text("IsBaseCalendar", "1");
    calendar.push_text("BaseCalendarUID", "-1");

    let mut week_days = XmlElement::new("WeekDays");
    for (day_type, (_, intervals)) in (1..).zip(hours.days()) {
        let mut week_day = XmlElement::new("WeekDay");
        week_day.push_text("DayType", format!("{day_type}"));
        if intervals.is_empty() {
            week_day.push_text("DayWorking", "0");
        } else {
            week_day.push_text("DayWorking", "1");
            let mut times = XmlElement::new("WorkingTimes");
            for interval in intervals {
                let mut time = XmlElement::new("WorkingTime");
                time.push_text("FromTime", daytime_to_string(interval.from));
                time.push_text("ToTime", daytime_to_string(interval.to));
                times.push(time);
            }
            week_day.push(times);
        }
        week_days.push(week_day);
    }
    calendar.push(week_days);
    calendars.push(calendar);

    uid
}
