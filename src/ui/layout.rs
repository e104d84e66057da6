// src/ui/layout.rs
//! Layout computation for the UI panels.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Visibility state for UI sections.
#[derive(Debug, Clone, Copy)]
pub struct SectionVisibility {
    pub files: bool,
    pub details: bool,
}

impl Default for SectionVisibility {
    fn default() -> Self {
        Self {
            files: true,
            details: true,
        }
    }
}

impl SectionVisibility {
    /// Toggle a section by number (1-2).
    pub fn toggle(&mut self, section: usize) {
        match section {
            1 => self.files = !self.files,
            2 => self.details = !self.details,
            _ => {}
        }
    }
}

/// Which pane a column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Files,
    Details,
}

/// Computed layout areas for rendering.
pub struct ComputedLayout {
    /// Whole area minus the status line
    pub main_area: Rect,
    /// One-line status bar at the bottom
    pub status_area: Rect,
    /// Column areas within main area, paired with their section
    pub columns: Vec<(Section, Rect)>,
}

/// Compute the layout based on total area and section visibility.
pub fn compute_layout(area: Rect, visibility: &SectionVisibility) -> ComputedLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let (main_area, status_area) = (vertical[0], vertical[1]);

    // Build column weights dynamically based on visible sections
    let mut sections = Vec::new();
    let mut weights = Vec::new();

    if visibility.files {
        sections.push(Section::Files);
        weights.push(60u16);
    }
    if visibility.details {
        sections.push(Section::Details);
        weights.push(40u16);
    }

    let columns: Vec<(Section, Rect)> = if !weights.is_empty() {
        let sum: u16 = weights.iter().copied().sum();
        let constraints: Vec<Constraint> = weights
            .into_iter()
            .map(|w| Constraint::Percentage((w as u32 * 100 / sum as u32) as u16))
            .collect();
        let rects = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(main_area);
        sections.into_iter().zip(rects.iter().copied()).collect()
    } else {
        // Nothing toggled on: keep the file list so the app stays usable
        vec![(Section::Files, main_area)]
    };

    ComputedLayout {
        main_area,
        status_area,
        columns,
    }
}

/// A `percent_x` by `height` rectangle centered in `area`.
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(area.height)),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x.min(100)) / 2),
            Constraint::Percentage(percent_x.min(100)),
            Constraint::Fill(1),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_sections_share_width_above_status_line() {
        let layout = compute_layout(Rect::new(0, 0, 100, 30), &SectionVisibility::default());
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.status_area.y, 29);
        assert_eq!(layout.columns.len(), 2);
        assert_eq!(layout.columns[0].0, Section::Files);
        assert_eq!(layout.columns[0].1.width, 60);
        assert_eq!(layout.main_area.height, 29);
    }

    #[test]
    fn hiding_everything_keeps_the_file_list() {
        let mut vis = SectionVisibility::default();
        vis.toggle(1);
        vis.toggle(2);
        let layout = compute_layout(Rect::new(0, 0, 80, 24), &vis);
        assert_eq!(layout.columns.len(), 1);
        assert_eq!(layout.columns[0].0, Section::Files);
    }

    #[test]
    fn centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let r = centered_rect(50, 5, area);
        assert_eq!(r.height, 5);
        assert_eq!(r.width, 50);
        assert!(r.x >= 20 && r.y >= 15);
    }
}
