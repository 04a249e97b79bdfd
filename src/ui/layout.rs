//! Screen layout: drawer, detail pane, help bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::config::{DrawerPosition, LayoutConfig};

/// Split the frame into (drawer, detail, help bar) areas. A minimized
/// drawer collapses to zero width and the detail pane takes the row.
pub fn create_layout(area: Rect, config: &LayoutConfig) -> (Rect, Rect, Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let (main_area, help_area) = (vertical[0], vertical[1]);

    let drawer_pct = if config.drawer_minimized {
        0
    } else {
        u16::from(config.drawer_width_pct)
    };

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(match config.drawer_position {
            DrawerPosition::Left => [
                Constraint::Percentage(drawer_pct),
                Constraint::Percentage(100 - drawer_pct),
            ],
            DrawerPosition::Right => [
                Constraint::Percentage(100 - drawer_pct),
                Constraint::Percentage(drawer_pct),
            ],
        })
        .split(main_area);

    match config.drawer_position {
        DrawerPosition::Left => (horizontal[0], horizontal[1], help_area),
        DrawerPosition::Right => (horizontal[1], horizontal[0], help_area),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawer_takes_configured_share_on_the_left() {
        let config = LayoutConfig::default();
        let area = Rect::new(0, 0, 100, 40);
        let (drawer, detail, help) = create_layout(area, &config);
        assert_eq!(drawer.x, 0);
        assert_eq!(drawer.width, 30);
        assert_eq!(detail.width, 70);
        assert_eq!(help.height, 1);
        assert_eq!(help.y, 39);
    }

    #[test]
    fn minimized_drawer_has_zero_width() {
        let config = LayoutConfig {
            drawer_minimized: true,
            ..Default::default()
        };
        let (drawer, detail, _) = create_layout(Rect::new(0, 0, 100, 40), &config);
        assert_eq!(drawer.width, 0);
        assert_eq!(detail.width, 100);
    }

    #[test]
    fn right_position_swaps_the_panes() {
        let config = LayoutConfig {
            drawer_position: DrawerPosition::Right,
            ..Default::default()
        };
        let (drawer, detail, _) = create_layout(Rect::new(0, 0, 100, 40), &config);
        assert!(drawer.x > detail.x);
    }
}
