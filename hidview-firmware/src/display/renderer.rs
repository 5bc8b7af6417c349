//! Text layout of the status widget

use core::fmt::Write;

use heapless::String;
use hidview_core::config::MAX_LAYOUT_LABEL_LEN;
use hidview_core::StatusState;

/// Width of one panel line in characters
pub const LINE_WIDTH: usize = 32;

/// One frame of the status widget
#[derive(Debug, Default)]
pub struct StatusLines {
    /// Clock and connection marker, e.g. `"13:45 *"`
    pub header: String<LINE_WIDTH>,
    /// Volume and layout, e.g. `"vol: 42  EN"`
    pub controls: String<LINE_WIDTH>,
    /// Track title or the no-media label
    pub track: String<LINE_WIDTH>,
    /// Artist, empty without a title
    pub artist: String<LINE_WIDTH>,
}

/// Lay out a status snapshot
///
/// `layouts` maps the layout index to a name; an index with no name is
/// left blank.
pub fn render(state: &StatusState, layouts: &[String<MAX_LAYOUT_LABEL_LEN>]) -> StatusLines {
    let mut lines = StatusLines::default();

    let marker = if state.connected { "*" } else { "-" };
    let _ = write!(lines.header, "{} {}", state.time_label(), marker);

    let _ = write!(lines.controls, "{}", state.volume_label());
    if let Some(name) = state.layout_label(layouts) {
        let _ = write!(lines.controls, "  {}", name);
    }

    push_truncated(&mut lines.track, state.track_label());
    push_truncated(&mut lines.artist, state.artist_label());

    lines
}

fn push_truncated(line: &mut String<LINE_WIDTH>, text: &str) {
    for ch in text.chars() {
        if line.push(ch).is_err() {
            break;
        }
    }
}
