//! Signature frame overlay
//!
//! Every sheet ends with a line of text along its bottom edge: the credit on
//! the left, the date centered, and `#<edition>/<max>` on the right. The
//! edition is first plotted as a space-padded placeholder so the date can be
//! centered against a width that does not depend on the edition number, then
//! the number itself is dropped into the blank cells.

use chrono::NaiveDate;

/// Long axis of the plotter's work area, in device units
pub const FRAME_LONG_AXIS: i64 = 2394;

/// Short axis of the plotter's work area, in device units
pub const FRAME_SHORT_AXIS: i64 = 1700;

/// Distance of the text baseline from the far edge
pub const BASELINE_MARGIN: i64 = 40;

/// Label size used for all frame text
pub const LABEL_SIZE: i64 = 30;

/// Identity credited on every sheet
pub const DEFAULT_GROUP: &str = "nycresistor";

const DATE_FORMAT: &str = "%m/%d/%Y";

/// Width of `text` at label `size` under a fixed-advance font
pub fn text_width(text: &str, size: i64) -> i64 {
    text.chars().count() as i64 * size
}

/// X positions of each piece of frame text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    pub baseline: i64,
    pub placeholder_x: i64,
    pub date_x: i64,
    pub edition_x: i64,
}

/// Composes the overlay drawn after the artwork body
#[derive(Debug, Clone)]
pub struct FrameComposer {
    group: String,
}

impl FrameComposer {
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
        }
    }

    /// Credit line: `author/group`, or just the group
    pub fn credit(&self, author: Option<&str>) -> String {
        match author.map(str::trim).filter(|a| !a.is_empty()) {
            Some(author) => format!("{}/{}", author, self.group),
            None => self.group.clone(),
        }
    }

    /// Edition placeholder, e.g. `#  /10` for a run of ten
    pub fn placeholder(max_editions: u32) -> String {
        let max = max_editions.to_string();
        format!("#{}/{}", " ".repeat(max.len()), max)
    }

    pub fn layout(&self, credit: &str, date: &str, edition: u32, max_editions: u32) -> FrameLayout {
        let placeholder_x = FRAME_SHORT_AXIS - text_width(&Self::placeholder(max_editions), LABEL_SIZE);

        let left = text_width(credit, LABEL_SIZE);
        let gap = placeholder_x - left - text_width(date, LABEL_SIZE);
        let date_x = left + gap.div_euclid(2);

        let counter = format!("{}/{}", edition, max_editions);
        let edition_x = FRAME_SHORT_AXIS - text_width(&counter, LABEL_SIZE);

        FrameLayout {
            baseline: FRAME_LONG_AXIS - BASELINE_MARGIN,
            placeholder_x,
            date_x,
            edition_x,
        }
    }

    /// Device commands for the overlay, in drawing order
    pub fn compose(
        &self,
        author: Option<&str>,
        edition: u32,
        max_editions: u32,
        date: NaiveDate,
    ) -> Vec<String> {
        let credit = self.credit(author);
        let date = date.format(DATE_FORMAT).to_string();
        let layout = self.layout(&credit, &date, edition, max_editions);
        let baseline = layout.baseline;

        vec![
            "PV10".to_string(),
            format!("VP0,0,{},{}", FRAME_LONG_AXIS, FRAME_SHORT_AXIS),
            format!("WD0,0,{},{}", FRAME_LONG_AXIS, FRAME_SHORT_AXIS),
            "LR90".to_string(),
            format!("LS{}", LABEL_SIZE),
            "PS1".to_string(),
            format!("MA{},0", baseline),
            format!("PL{}", credit),
            format!("MA{},{}", baseline, layout.placeholder_x),
            format!("PL{}", Self::placeholder(max_editions)),
            "PS2".to_string(),
            format!("MA{},{}", baseline, layout.date_x),
            format!("PL{}", date),
            format!("MA{},{}", baseline, layout.edition_x),
            format!("PL{}", edition),
            "CH".to_string(),
        ]
    }
}

impl Default for FrameComposer {
    fn default() -> Self {
        Self::new(DEFAULT_GROUP)
    }
}
