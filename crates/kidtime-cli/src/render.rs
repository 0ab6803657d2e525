//! Plain-text rendering of session state.

use kidtime_core::{format_hms, HistoryEntry, Locale, SessionSnapshot};

pub fn status_line(snap: &SessionSnapshot) -> String {
    let t = snap.locale.strings();
    let main = if snap.counters.is_timer_running {
        t.stop_timer
    } else {
        t.start_timer
    };
    let homework = if snap.counters.is_homework_timer {
        t.stop_homework
    } else {
        t.start_homework
    };
    format!(
        "{}: {} | {}: {} | [{}] [{}]",
        t.total_time,
        format_hms(snap.counters.total_time_spent),
        t.homework_time,
        format_hms(snap.counters.homework_time_spent),
        main,
        homework,
    )
}

pub fn reminders(snap: &SessionSnapshot) -> String {
    let t = snap.locale.strings();
    if snap.reminders.is_empty() {
        return format!("{}: {}", t.reminders, t.no_reminders);
    }
    let mut out = format!("{}:", t.reminders);
    for r in &snap.reminders {
        out.push_str(&format!(
            "\n  - {} ({} {} {})",
            r.text, t.in_minutes, r.remaining_minutes, t.minutes
        ));
    }
    out
}

pub fn history_table(entries: &[HistoryEntry], locale: Locale) -> String {
    let t = locale.strings();
    if entries.is_empty() {
        return format!("{}: {}", t.history, t.no_history);
    }
    let mut out = format!(
        "{}\n{:<12} {:>16} {:>20}",
        t.history, t.date, t.total_time_spent, t.homework_time_spent
    );
    for e in entries {
        out.push_str(&format!(
            "\n{:<12} {:>16} {:>20}",
            e.date.format("%Y-%m-%d").to_string(),
            format_hms(e.total_time),
            format_hms(e.homework_time)
        ));
    }
    out
}

pub fn help() -> &'static str {
    "commands:
  start | stop | t        start, stop or toggle the main timer
  homework | h            toggle the homework timer
  remind [minutes] text   add a reminder (minutes defaults from config)
  locale [en|ar]          switch display language
  status                  print the session as JSON
  reminders               list pending reminders
  history                 show the daily history
  help                    show this message
  quit                    stop the timer and exit"
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kidtime_core::{MemoryStore, Session, SessionOptions};

    #[test]
    fn status_line_shows_clock_and_actions() {
        let mut session = Session::open(MemoryStore::new(), SessionOptions::default());
        session.toggle_main_on(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        for _ in 0..65 {
            session.tick();
        }
        let line = status_line(&session.snapshot());
        assert_eq!(
            line,
            "Total Time: 00:01:05 | Homework Time: 00:00:00 | [Stop Timer] [Start Homework]"
        );
    }

    #[test]
    fn empty_views_use_placeholders() {
        let session = Session::open(MemoryStore::new(), SessionOptions::default());
        assert_eq!(reminders(&session.snapshot()), "Reminders: No reminders set");
        assert_eq!(history_table(&[], Locale::En), "History: No history yet");
    }

    #[test]
    fn history_rows_are_formatted() {
        let entries = vec![HistoryEntry {
            id: 1,
            date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            total_time: 3725,
            homework_time: 60,
        }];
        let table = history_table(&entries, Locale::En);
        assert!(table.contains("2024-06-10"));
        assert!(table.contains("01:02:05"));
        assert!(table.contains("00:01:00"));
    }
}
