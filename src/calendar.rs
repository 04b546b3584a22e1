//! Month-grid bucketing for the content calendar: 42 Sunday-first cells,
//! posts bucketed by exact date.

use chrono::{Datelike, Days, NaiveDate};

use crate::models::ContentPost;

pub const GRID_CELLS: usize = 42;

#[derive(Debug, Clone)]
pub struct CalendarCell {
    /// `None` for the leading/trailing blanks outside the month.
    pub date: Option<NaiveDate>,
    pub posts: Vec<ContentPost>,
}

#[derive(Debug, Clone)]
pub struct CalendarMonth {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
    pub cells: Vec<CalendarCell>,
}

impl CalendarMonth {
    /// Lays out `month` of `year` and buckets `posts` into day cells.
    /// Invalid year/month combinations yield an all-blank grid.
    pub fn build(year: i32, month: u32, posts: &[ContentPost]) -> Self {
        let mut cells: Vec<CalendarCell> = (0..GRID_CELLS)
            .map(|_| CalendarCell {
                date: None,
                posts: Vec::new(),
            })
            .collect();

        if let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) {
            let leading = first.weekday().num_days_from_sunday() as usize;
            let total_days = days_in_month(first);

            for day in 0..total_days {
                let index = leading + day as usize;
                if index >= GRID_CELLS {
                    break;
                }
                let date = first + Days::new(day);
                cells[index].date = Some(date);
                cells[index].posts = posts.iter().filter(|p| p.date == date).cloned().collect();
            }
        }

        Self { year, month, cells }
    }

    /// Posts scheduled for `day` of this month; empty for blanks and
    /// out-of-range days.
    pub fn posts_for_day(&self, day: u32) -> &[ContentPost] {
        self.cells
            .iter()
            .find(|cell| cell.date.is_some_and(|d| d.day() == day))
            .map(|cell| cell.posts.as_slice())
            .unwrap_or(&[])
    }
}

fn days_in_month(first: NaiveDate) -> u64 {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    match next {
        Some(next_first) => (next_first - first).num_days() as u64,
        None => 0,
    }
}

/// Month navigation, wrapping across year boundaries.
pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}
