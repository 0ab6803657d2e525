//! Display strings for the two supported locales.
//!
//! Purely cosmetic: nothing in the accumulator, scheduler or ledger reads
//! the locale.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

/// One locale's string bundle.
#[derive(Debug)]
pub struct Strings {
    pub title: &'static str,
    pub total_time: &'static str,
    pub homework_time: &'static str,
    pub start_timer: &'static str,
    pub stop_timer: &'static str,
    pub start_homework: &'static str,
    pub stop_homework: &'static str,
    pub set_reminder: &'static str,
    pub what_to_remember: &'static str,
    pub minutes_from_now: &'static str,
    pub add_reminder: &'static str,
    pub reminder_added: &'static str,
    pub reminder_empty: &'static str,
    pub reminders: &'static str,
    pub no_reminders: &'static str,
    pub in_minutes: &'static str,
    pub minutes: &'static str,
    pub history: &'static str,
    pub date: &'static str,
    pub total_time_spent: &'static str,
    pub homework_time_spent: &'static str,
    pub no_history: &'static str,
    pub switch_to: &'static str,
}

static EN: Strings = Strings {
    title: "Kid's Time Tracker",
    total_time: "Total Time",
    homework_time: "Homework Time",
    start_timer: "Start Timer",
    stop_timer: "Stop Timer",
    start_homework: "Start Homework",
    stop_homework: "Stop Homework",
    set_reminder: "Set a Reminder",
    what_to_remember: "What to remember?",
    minutes_from_now: "minutes from now",
    add_reminder: "Add Reminder",
    reminder_added: "Reminder added",
    reminder_empty: "Please enter what to remember",
    reminders: "Reminders",
    no_reminders: "No reminders set",
    in_minutes: "in",
    minutes: "minutes",
    history: "History",
    date: "Date",
    total_time_spent: "Total Time Spent",
    homework_time_spent: "Homework Time Spent",
    no_history: "No history yet",
    switch_to: "العربية",
};

static AR: Strings = Strings {
    title: "متتبع وقت الأطفال",
    total_time: "الوقت الكلي",
    homework_time: "وقت الواجب المنزلي",
    start_timer: "بدء المؤقت",
    stop_timer: "إيقاف المؤقت",
    start_homework: "بدء الواجب المنزلي",
    stop_homework: "إيقاف الواجب المنزلي",
    set_reminder: "ضبط تذكير",
    what_to_remember: "ماذا تريد أن تتذكر؟",
    minutes_from_now: "دقائق من الآن",
    add_reminder: "إضافة تذكير",
    reminder_added: "تمت إضافة التذكير",
    reminder_empty: "يرجى إدخال ما تريد تذكره",
    reminders: "التذكيرات",
    no_reminders: "لا توجد تذكيرات",
    in_minutes: "في غضون",
    minutes: "دقائق",
    history: "السجل",
    date: "التاريخ",
    total_time_spent: "إجمالي الوقت المستغرق",
    homework_time_spent: "وقت الواجب المنزلي المستغرق",
    no_history: "لا يوجد سجل بعد",
    switch_to: "English",
};

impl Locale {
    pub fn strings(self) -> &'static Strings {
        match self {
            Locale::En => &EN,
            Locale::Ar => &AR,
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Locale::En => Direction::Ltr,
            Locale::Ar => Direction::Rtl,
        }
    }

    /// The other locale; the UI offers a single switch button.
    pub fn toggled(self) -> Self {
        match self {
            Locale::En => Locale::Ar,
            Locale::Ar => Locale::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Locale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "ar" => Ok(Locale::Ar),
            _ => Err(ValidationError::UnknownLocale(s.to_string())),
        }
    }
}
