//! Gradient range slider Component driven by mouse drags.

use ratatui::Frame;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tracing::warn;
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult},
    event::{MouseButton, MouseEvent, MouseEventKind},
    props::{AttrValue, Attribute, Props},
};

use crate::color::{Rgb, to_terminal};
use crate::gesture::ListenerKind;
use crate::positioner::TrackBox;
use crate::slider::RangeSlider;
use crate::tui::Msg;
use crate::tui::event::{KeyAction, UserEvent, key_action};

/// Column (relative to the track start) for a percentage along a track `width` cells wide.
fn thumb_column(percent: f64, width: u16) -> u16 {
    let last = width.saturating_sub(1) as f64;
    (percent / 100.0 * last).round().clamp(0.0, last) as u16
}

/// Index of the thumb whose column is closest to `column`, within `reach` cells.
///
/// On a tie the pointer side decides: left of the shared column picks the
/// lower index, at or right of it the higher one, so stacked thumbs can
/// always be pulled apart.
fn nearest_thumb(columns: &[u16], column: u16, reach: u16) -> Option<usize> {
    let mut best: Option<(usize, u16)> = None;
    for (index, &col) in columns.iter().enumerate() {
        let distance = col.abs_diff(column);
        if distance > reach {
            continue;
        }
        best = match best {
            Some((_, d)) if distance > d => best,
            Some((_, d)) if distance == d && column < col => best,
            _ => Some((index, distance)),
        };
    }
    best.map(|(index, _)| index)
}

/// Handle glyph style: tinted with the thumb's color, reversed while dragged.
fn handle_style(color: Rgb, active: bool) -> Style {
    let style = Style::default()
        .fg(to_terminal(color))
        .add_modifier(Modifier::BOLD);
    if active {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

/// Mouse input reduced to what the slider cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pointer {
    Down { column: u16, row: u16 },
    Move { column: u16 },
    Up,
}

/// Track, thumbs and tinted value labels for one [`RangeSlider`].
pub struct GradientRange {
    props: Props,
    slider: RangeSlider,
    /// Track row from the last render; mouse input is mapped against it
    track: Rect,
}

impl GradientRange {
    pub fn new(slider: RangeSlider) -> Self {
        Self {
            props: Props::default(),
            slider,
            track: Rect::default(),
        }
    }

    fn track_box(&self) -> TrackBox {
        TrackBox::new(
            f64::from(self.track.x),
            f64::from(self.track.width.saturating_sub(1)),
        )
    }

    fn thumb_columns(&self) -> Vec<u16> {
        self.slider
            .thumbs()
            .iter()
            .map(|&v| self.track.x + thumb_column(self.slider.percent_of(v), self.track.width))
            .collect()
    }

    fn track_spans(&self) -> Vec<Span<'static>> {
        let config = self.slider.config();
        let last = self.track.width.saturating_sub(1).max(1) as f64;
        (0..self.track.width)
            .map(|i| {
                let value = config.min + (i as f64 / last).min(1.0) * (config.max - config.min);
                let bg = self
                    .slider
                    .gradient()
                    .color_at_on_track(value, config.track_size)
                    .map(to_terminal)
                    .unwrap_or(Color::DarkGray);
                Span::styled("━", Style::default().fg(bg).bg(bg))
            })
            .collect()
    }

    fn on_mouse(&mut self, mouse: MouseEvent) -> Option<Msg> {
        let input = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Pointer::Down {
                column: mouse.column,
                row: mouse.row,
            },
            MouseEventKind::Drag(MouseButton::Left) => Pointer::Move {
                column: mouse.column,
            },
            MouseEventKind::Up(MouseButton::Left) => Pointer::Up,
            _ => return None,
        };
        self.on_pointer(input)
    }

    /// Route one pointer event to the slider.
    ///
    /// Moves and the release count anywhere on screen, but only while the
    /// drag's subscription holds the matching listener.
    fn on_pointer(&mut self, input: Pointer) -> Option<Msg> {
        match input {
            Pointer::Down { column, row } => {
                // Thumbs are grabbable from the label row or the track row.
                if row + 1 < self.track.y || row > self.track.y {
                    return None;
                }
                let index = nearest_thumb(&self.thumb_columns(), column, 1)?;
                if let Err(e) = self.slider.pointer_down(index) {
                    warn!("pointer down rejected: {}", e);
                }
                None
            }
            Pointer::Move { column } => {
                if !self.slider.listeners().is_listening(ListenerKind::Move) {
                    return None;
                }
                match self.slider.pointer_move(f64::from(column), self.track_box()) {
                    Ok(Some(_)) => Some(Msg::Changed(self.slider.snapshot())),
                    Ok(None) => None,
                    Err(e) => {
                        warn!("pointer move rejected: {}", e);
                        None
                    }
                }
            }
            Pointer::Up => {
                if !self.slider.listeners().is_listening(ListenerKind::Up) {
                    return None;
                }
                self.slider
                    .pointer_up()
                    .map(|_| Msg::Changed(self.slider.snapshot()))
            }
        }
    }
}

impl MockComponent for GradientRange {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Labels
                Constraint::Length(1), // Track
                Constraint::Length(1), // Limits
            ])
            .split(area);

        self.track = rows[1];
        frame.render_widget(Paragraph::new(Line::from(self.track_spans())), rows[1]);

        let active = self.slider.gesture().active_index();
        let columns = self.thumb_columns();
        for (index, (&column, (&value, &color))) in columns
            .iter()
            .zip(self.slider.thumbs().iter().zip(self.slider.colors()))
            .enumerate()
        {
            frame.render_widget(
                Paragraph::new(Span::styled("●", handle_style(color, active == Some(index)))),
                Rect::new(column, rows[1].y, 1, 1),
            );

            let label = format!("{}", value);
            let width = (label.len() as u16).min(area.width);
            let x = column
                .saturating_sub(width / 2)
                .clamp(area.x, (area.x + area.width).saturating_sub(width));
            let label_style = Style::default()
                .fg(to_terminal(color))
                .add_modifier(Modifier::BOLD);
            frame.render_widget(
                Paragraph::new(Span::styled(label, label_style)),
                Rect::new(x, rows[0].y, width, 1),
            );
        }

        let config = self.slider.config();
        let dim = Style::default().add_modifier(Modifier::DIM);
        frame.render_widget(
            Paragraph::new(format!("{}", config.min)).style(dim),
            rows[2],
        );
        frame.render_widget(
            Paragraph::new(format!("{}", config.max))
                .style(dim)
                .alignment(Alignment::Right),
            rows[2],
        );
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::Vec(
            self.slider
                .thumbs()
                .iter()
                .map(|&v| StateValue::F64(v))
                .collect(),
        )
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, UserEvent> for GradientRange {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        match ev {
            Event::Mouse(mouse) => self.on_mouse(mouse),
            Event::Keyboard(key_event) => match key_action(&key_event)? {
                KeyAction::Quit => Some(Msg::Quit),
                KeyAction::CancelDrag => self
                    .slider
                    .cancel()
                    .map(|_| Msg::Changed(self.slider.snapshot())),
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumb_columns_span_the_track() {
        assert_eq!(thumb_column(0.0, 41), 0);
        assert_eq!(thumb_column(50.0, 41), 20);
        assert_eq!(thumb_column(100.0, 41), 40);
        assert_eq!(thumb_column(100.0, 0), 0);
    }

    #[test]
    fn nearest_thumb_respects_reach() {
        assert_eq!(nearest_thumb(&[0, 40], 1, 1), Some(0));
        assert_eq!(nearest_thumb(&[0, 40], 39, 1), Some(1));
        assert_eq!(nearest_thumb(&[0, 40], 20, 1), None);
    }

    #[test]
    fn stacked_thumbs_split_by_pointer_side() {
        assert_eq!(nearest_thumb(&[10, 10], 9, 1), Some(0));
        assert_eq!(nearest_thumb(&[10, 10], 10, 1), Some(1));
        assert_eq!(nearest_thumb(&[10, 10], 11, 1), Some(1));
    }

    fn mounted(thumbs: Vec<f64>) -> GradientRange {
        let slider = RangeSlider::new(
            crate::SliderConfig::default(),
            crate::Gradient::default(),
            thumbs,
        )
        .unwrap();
        let mut range = GradientRange::new(slider);
        // 101 cells: one column per value unit.
        range.track = Rect::new(0, 1, 101, 1);
        range
    }

    #[test]
    fn drag_moves_thumb_until_release() {
        let mut range = mounted(vec![0.0, 100.0]);

        assert_eq!(range.on_pointer(Pointer::Down { column: 0, row: 1 }), None);
        assert!(matches!(
            range.on_pointer(Pointer::Move { column: 30 }),
            Some(Msg::Changed(_))
        ));
        assert!(matches!(range.on_pointer(Pointer::Up), Some(Msg::Changed(_))));
        assert_eq!(range.slider.thumbs(), &[30.0, 100.0]);
        assert_eq!(range.slider.listeners().active_count(), 0);

        // The release dropped the subscription, so later moves are not delivered.
        assert_eq!(range.on_pointer(Pointer::Move { column: 60 }), None);
        assert_eq!(range.on_pointer(Pointer::Up), None);
        assert_eq!(range.slider.thumbs(), &[30.0, 100.0]);
    }

    #[test]
    fn moves_without_a_press_are_dropped() {
        let mut range = mounted(vec![0.0, 100.0]);
        assert_eq!(range.on_pointer(Pointer::Move { column: 40 }), None);
        // Press away from any thumb.
        assert_eq!(range.on_pointer(Pointer::Down { column: 50, row: 1 }), None);
        assert_eq!(range.on_pointer(Pointer::Move { column: 40 }), None);
        assert_eq!(range.slider.thumbs(), &[0.0, 100.0]);
        assert!(!range.slider.gesture().is_dragging());
    }

    #[test]
    fn escape_undoes_the_drag() {
        use tuirealm::event::{Key, KeyEvent, KeyModifiers};

        let mut range = mounted(vec![0.0, 100.0]);
        range.on_pointer(Pointer::Down { column: 100, row: 0 });
        range.on_pointer(Pointer::Move { column: 70 });
        assert_eq!(range.slider.thumbs(), &[0.0, 70.0]);

        let esc = Event::Keyboard(KeyEvent::new(Key::Esc, KeyModifiers::NONE));
        assert!(matches!(range.on(esc), Some(Msg::Changed(_))));
        assert_eq!(range.slider.thumbs(), &[0.0, 100.0]);
        assert_eq!(range.on_pointer(Pointer::Move { column: 50 }), None);
    }

    #[test]
    fn handle_takes_the_thumb_color() {
        let red = Rgb::new(255, 6, 36);
        let style = handle_style(red, false);
        assert_eq!(style.fg, Some(Color::Rgb(255, 6, 36)));
        assert!(!style.add_modifier.contains(Modifier::REVERSED));

        let dragged = handle_style(red, true);
        assert_eq!(dragged.fg, Some(Color::Rgb(255, 6, 36)));
        assert!(dragged.add_modifier.contains(Modifier::REVERSED));
    }
}
