//! Options for stroking paths and drawing text.
//!
//! Each enum carries the raw integer codes CoreGraphics uses for it, so that
//! values can cross an FFI or serialization boundary as plain integers.

/// Options for angled joins in strokes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Options for the cap of stroked lines.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// How glyph outlines are painted when text is drawn.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextDrawingMode {
    #[default]
    Fill,
    Stroke,
    FillStroke,
    Invisible,
    FillClip,
    StrokeClip,
    FillStrokeClip,
    Clip,
}

impl LineJoin {
    pub const ALL: [LineJoin; 3] = [LineJoin::Miter, LineJoin::Round, LineJoin::Bevel];

    pub fn to_raw(self) -> i32 {
        match self {
            LineJoin::Miter => 0,
            LineJoin::Round => 1,
            LineJoin::Bevel => 2,
        }
    }

    pub fn from_raw(raw: i32) -> Option<LineJoin> {
        Self::ALL.into_iter().find(|join| join.to_raw() == raw)
    }
}

impl LineCap {
    pub const ALL: [LineCap; 3] = [LineCap::Butt, LineCap::Round, LineCap::Square];

    pub fn to_raw(self) -> i32 {
        match self {
            LineCap::Butt => 0,
            LineCap::Round => 1,
            LineCap::Square => 2,
        }
    }

    pub fn from_raw(raw: i32) -> Option<LineCap> {
        Self::ALL.into_iter().find(|cap| cap.to_raw() == raw)
    }
}

impl TextDrawingMode {
    pub const ALL: [TextDrawingMode; 8] = [
        TextDrawingMode::Fill,
        TextDrawingMode::Stroke,
        TextDrawingMode::FillStroke,
        TextDrawingMode::Invisible,
        TextDrawingMode::FillClip,
        TextDrawingMode::StrokeClip,
        TextDrawingMode::FillStrokeClip,
        TextDrawingMode::Clip,
    ];

    pub fn to_raw(self) -> i32 {
        match self {
            TextDrawingMode::Fill => 0,
            TextDrawingMode::Stroke => 1,
            TextDrawingMode::FillStroke => 2,
            TextDrawingMode::Invisible => 3,
            TextDrawingMode::FillClip => 4,
            TextDrawingMode::StrokeClip => 5,
            TextDrawingMode::FillStrokeClip => 6,
            TextDrawingMode::Clip => 7,
        }
    }

    pub fn from_raw(raw: i32) -> Option<TextDrawingMode> {
        Self::ALL.into_iter().find(|mode| mode.to_raw() == raw)
    }

    /// Whether glyphs are filled in this mode.
    pub fn fills(self) -> bool {
        matches!(
            self,
            TextDrawingMode::Fill
                | TextDrawingMode::FillStroke
                | TextDrawingMode::FillClip
                | TextDrawingMode::FillStrokeClip
        )
    }

    /// Whether glyphs are stroked in this mode.
    pub fn strokes(self) -> bool {
        matches!(
            self,
            TextDrawingMode::Stroke
                | TextDrawingMode::FillStroke
                | TextDrawingMode::StrokeClip
                | TextDrawingMode::FillStrokeClip
        )
    }

    /// Whether glyph outlines are added to the clip in this mode.
    pub fn clips(self) -> bool {
        matches!(
            self,
            TextDrawingMode::FillClip
                | TextDrawingMode::StrokeClip
                | TextDrawingMode::FillStrokeClip
                | TextDrawingMode::Clip
        )
    }
}

/// A dash pattern for stroked lines.
///
/// An empty pattern means solid lines.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineDash {
    pub pattern: Vec<f64>,
    pub offset: f64,
}

impl LineDash {
    pub fn new(pattern: impl Into<Vec<f64>>, offset: f64) -> LineDash {
        LineDash {
            pattern: pattern.into(),
            offset,
        }
    }

    /// Solid lines.
    pub fn solid() -> LineDash {
        LineDash::default()
    }

    pub fn is_solid(&self) -> bool {
        self.pattern.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_codes_round_trip() {
        for mode in TextDrawingMode::ALL {
            assert_eq!(TextDrawingMode::from_raw(mode.to_raw()), Some(mode));
        }
        assert_eq!(LineJoin::from_raw(2), Some(LineJoin::Bevel));
        assert_eq!(LineCap::from_raw(1), Some(LineCap::Round));
        assert_eq!(LineCap::from_raw(3), None);
        assert_eq!(TextDrawingMode::from_raw(-1), None);
    }

    #[test]
    fn text_mode_flags() {
        assert!(TextDrawingMode::default().fills());
        assert!(!TextDrawingMode::Invisible.fills());
        assert!(!TextDrawingMode::Invisible.strokes());
        assert!(TextDrawingMode::FillStrokeClip.strokes());
        assert!(TextDrawingMode::Clip.clips());
        assert!(!TextDrawingMode::FillStroke.clips());
    }
}
