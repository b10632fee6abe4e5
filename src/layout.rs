/// Summary block: two content lines plus a blank separator.
pub const SUMMARY_LINES: usize = 3;
/// Column header plus the rule line under it.
pub const TABLE_HEADER_LINES: usize = 2;
/// Keeps an exactly-full screen from scrolling.
pub const SLACK_LINES: usize = 1;
pub const RESERVED_LINES: usize = SUMMARY_LINES + TABLE_HEADER_LINES + SLACK_LINES;
/// Assumed height when the terminal cannot report one.
pub const FALLBACK_ROWS: usize = 24;

/// Terminal geometry. A zero dimension means unknown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub rows: usize,
    pub columns: usize,
}

impl Viewport {
    pub fn new(rows: usize, columns: usize) -> Self {
        Viewport { rows, columns }
    }
}

/// How many process rows fit below the summary and table header.
///
/// `user_cap` of 0 means auto-fit. A positive cap is clamped to the visible
/// capacity, except when that capacity is 0, where the cap wins. The result
/// may be 0, which the renderer reads as "no limit".
pub fn resolve_max_rows(viewport: Viewport, user_cap: usize) -> usize {
    let rows = if viewport.rows == 0 {
        FALLBACK_ROWS
    } else {
        viewport.rows
    };
    let visible = rows.saturating_sub(RESERVED_LINES);

    if user_cap > 0 {
        if visible > 0 {
            return visible.min(user_cap);
        }
        return user_cap;
    }
    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Viewport {
        Viewport::new(n, 80)
    }

    #[test]
    fn reserved_chrome_is_six_lines() {
        assert_eq!(RESERVED_LINES, 6);
    }

    #[test]
    fn auto_fit_standard_terminal() {
        assert_eq!(resolve_max_rows(rows(24), 0), 18);
    }

    #[test]
    fn unknown_height_uses_fallback() {
        assert_eq!(resolve_max_rows(rows(0), 0), 18);
        assert_eq!(resolve_max_rows(Viewport::default(), 3), 3);
    }

    #[test]
    fn user_cap_clamped_to_capacity() {
        assert_eq!(resolve_max_rows(rows(24), 5), 5);
        assert_eq!(resolve_max_rows(rows(24), 500), 18);
    }

    #[test]
    fn user_cap_wins_on_degenerate_viewport() {
        assert_eq!(resolve_max_rows(rows(3), 10), 10);
        assert_eq!(resolve_max_rows(rows(6), 10), 10);
    }

    #[test]
    fn degenerate_viewport_without_cap_shows_nothing() {
        assert_eq!(resolve_max_rows(rows(1), 0), 0);
        assert_eq!(resolve_max_rows(rows(6), 0), 0);
        assert_eq!(resolve_max_rows(rows(7), 0), 1);
    }

    #[test]
    fn total_over_extreme_inputs() {
        assert_eq!(resolve_max_rows(rows(usize::MAX), 0), usize::MAX - 6);
        assert_eq!(resolve_max_rows(rows(usize::MAX), usize::MAX), usize::MAX - 6);
        assert_eq!(resolve_max_rows(rows(2), usize::MAX), usize::MAX);
    }
}
